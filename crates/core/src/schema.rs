//! Declarative payload contract shared by the validators and the request types
//!
//! Every bound the API enforces on a request field is declared here once. The
//! validators in [`crate::validation`] and the request constructors in
//! [`crate::types`] read these rules instead of repeating literals.

use crate::error::{ValidationError, ValidationResult};
use std::fmt::Display;

/// Length bounds on a text field, counted in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextRule {
    pub field: &'static str,
    pub min: usize,
    pub max: usize,
}

impl TextRule {
    /// Check the length of an already-trimmed value
    pub fn check(&self, value: &str) -> ValidationResult<()> {
        let len = value.chars().count();
        if len < self.min {
            return Err(if self.min <= 1 {
                ValidationError::required(self.field)
            } else {
                ValidationError::new(
                    self.field,
                    format!("must be at least {} characters", self.min),
                )
            });
        }
        if len > self.max {
            return Err(ValidationError::new(
                self.field,
                format!("must be at most {} characters", self.max),
            ));
        }
        Ok(())
    }
}

/// Numeric bounds on a field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeRule<T> {
    pub field: &'static str,
    pub min: T,
    pub max: T,
    /// Whether `min` itself is rejected
    pub exclusive_min: bool,
}

impl<T: PartialOrd + Display + Copy> RangeRule<T> {
    pub fn check(&self, value: T) -> ValidationResult<T> {
        let below = if self.exclusive_min {
            value <= self.min
        } else {
            value < self.min
        };
        if below || value > self.max {
            let message = if self.exclusive_min {
                format!("must be greater than {} and at most {}", self.min, self.max)
            } else {
                format!("must be between {} and {}", self.min, self.max)
            };
            return Err(ValidationError::new(self.field, message));
        }
        Ok(value)
    }
}

/// User account fields (`/auth/register`, `/users/me`)
pub mod user {
    use super::{RangeRule, TextRule};

    pub const EMAIL: &str = "email";
    pub const ROLE: &str = "role";

    pub const FULL_NAME: TextRule = TextRule {
        field: "full_name",
        min: 1,
        max: 100,
    };

    pub const PHONE_NUMBER: TextRule = TextRule {
        field: "phone_number",
        min: 1,
        max: 20,
    };

    /// Minimum in characters; the maximum is enforced in bytes like the server does
    pub const PASSWORD: TextRule = TextRule {
        field: "password",
        min: 8,
        max: 128,
    };

    pub const BIO: TextRule = TextRule {
        field: "bio",
        min: 1,
        max: 500,
    };

    pub const SKILLS: TextRule = TextRule {
        field: "skills",
        min: 1,
        max: 200,
    };

    pub const AVAILABILITY_SCHEDULE: TextRule = TextRule {
        field: "availability_schedule",
        min: 1,
        max: usize::MAX,
    };

    pub const EXPERIENCE_YEARS: RangeRule<u32> = RangeRule {
        field: "experience_years",
        min: 0,
        max: 50,
        exclusive_min: false,
    };

    pub const HOURLY_RATE: RangeRule<f64> = RangeRule {
        field: "hourly_rate",
        min: 0.0,
        max: 10_000.0,
        exclusive_min: true,
    };
}

/// Booking fields (`/bookings`)
pub mod booking {
    pub const MAID_ID: &str = "maid_id";
    pub const BOOKING_DATE: &str = "booking_date";
    pub const TIME_SLOT: &str = "time_slot";
    pub const STATUS: &str = "status";
    pub const NOTES: &str = "notes";

    /// Service type sent when the caller does not pick one
    pub const DEFAULT_SERVICE_TYPE: &str = "house_cleaning";
}

/// Review fields (`/reviews`)
pub mod review {
    use super::RangeRule;

    pub const BOOKING_ID: &str = "booking_id";

    pub const RATING: RangeRule<f64> = RangeRule {
        field: "rating",
        min: 1.0,
        max: 5.0,
        exclusive_min: false,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_rule_counts_characters() {
        // 100 multi-byte characters are still within the full name limit
        let name = "é".repeat(100);
        assert!(user::FULL_NAME.check(&name).is_ok());
        assert!(user::FULL_NAME.check(&format!("{name}é")).is_err());
    }

    #[test]
    fn test_text_rule_empty_is_required() {
        let err = user::FULL_NAME.check("").unwrap_err();
        assert_eq!(err.field, "full_name");
        assert_eq!(err.message, "is required");
    }

    #[test]
    fn test_range_rule_exclusive_min() {
        assert!(user::HOURLY_RATE.check(0.0).is_err());
        assert!(user::HOURLY_RATE.check(0.5).is_ok());
        assert!(user::HOURLY_RATE.check(10_000.0).is_ok());
        assert!(user::HOURLY_RATE.check(10_000.5).is_err());
    }

    #[test]
    fn test_range_rule_inclusive_bounds() {
        assert!(review::RATING.check(1.0).is_ok());
        assert!(review::RATING.check(5.0).is_ok());
        let err = review::RATING.check(5.5).unwrap_err();
        assert_eq!(err.to_string(), "rating: must be between 1 and 5");
    }
}
