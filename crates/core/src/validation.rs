//! Client-side payload checks
//!
//! Each `validate_*` function mirrors the request schema the API enforces and
//! returns the sanitized payload, so a rejected request never leaves the
//! client.

use crate::error::{ValidationError, ValidationResult};
use crate::schema::{self, TextRule};
use crate::status::parse_status;
use crate::types::{
    BookingCreate, BookingUpdate, RegisterRequest, ReviewCreate, UserRole, UserUpdate,
};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::Regex;
use std::sync::LazyLock;
use uuid::Uuid;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));
static DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date pattern"));
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}:\d{2}$").expect("valid time pattern"));

/// Common validation helpers
pub mod validators {
    use super::*;

    /// Trim a value and treat blank input as absent
    pub fn non_blank(value: Option<&str>) -> Option<&str> {
        value.map(str::trim).filter(|v| !v.is_empty())
    }

    /// Trim an optional text field and check it against its rule
    pub fn optional_text(value: Option<&str>, rule: &TextRule) -> ValidationResult<Option<String>> {
        match non_blank(value) {
            Some(value) => {
                rule.check(value)?;
                Ok(Some(value.to_string()))
            }
            None => Ok(None),
        }
    }

    /// Validate email format and normalize it to lower case
    pub fn validate_email(email: &str) -> ValidationResult<String> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::required(schema::user::EMAIL));
        }
        if !EMAIL_RE.is_match(email) {
            return Err(ValidationError::new(schema::user::EMAIL, "invalid email format"));
        }
        Ok(email.to_lowercase())
    }

    /// Validate password strength: length bounds plus at least one letter and one digit
    pub fn validate_password(password: &str) -> ValidationResult<()> {
        let rule = &schema::user::PASSWORD;
        if password.is_empty() {
            return Err(ValidationError::required(rule.field));
        }
        if password.chars().count() < rule.min {
            return Err(ValidationError::new(
                rule.field,
                format!("must be at least {} characters", rule.min),
            ));
        }
        if password.len() > rule.max {
            return Err(ValidationError::new(
                rule.field,
                format!("is too long (max {} characters)", rule.max),
            ));
        }
        let has_letter = password.chars().any(char::is_alphabetic);
        let has_digit = password.chars().any(|c| c.is_ascii_digit());
        if !has_letter || !has_digit {
            return Err(ValidationError::new(
                rule.field,
                "must contain at least one letter and one number",
            ));
        }
        Ok(())
    }

    /// Parse an identifier typed by the user
    pub fn parse_id(field: &str, value: &str) -> ValidationResult<Uuid> {
        let value = value.trim();
        if value.is_empty() {
            return Err(ValidationError::required(field));
        }
        Uuid::parse_str(value).map_err(|_| ValidationError::invalid_format(field, "a UUID"))
    }
}

use validators::{non_blank, optional_text, validate_email, validate_password};

pub fn validate_registration(
    email: &str,
    full_name: &str,
    role: UserRole,
    password: &str,
    phone_number: Option<&str>,
) -> ValidationResult<RegisterRequest> {
    let email = validate_email(email)?;

    let full_name = full_name.trim();
    schema::user::FULL_NAME.check(full_name)?;

    validate_password(password)?;

    let phone_number = optional_text(phone_number, &schema::user::PHONE_NUMBER)?;

    Ok(RegisterRequest {
        email,
        full_name: full_name.to_string(),
        role,
        password: password.to_string(),
        phone_number,
    })
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` slot into the booking payload
pub fn validate_booking(
    maid_id: Uuid,
    date: &str,
    time_slot: &str,
    service_type: Option<&str>,
    notes: Option<&str>,
) -> ValidationResult<BookingCreate> {
    let date = date.trim();
    if date.is_empty() {
        return Err(ValidationError::required(schema::booking::BOOKING_DATE));
    }
    let time_slot = time_slot.trim();
    if time_slot.is_empty() {
        return Err(ValidationError::required(schema::booking::TIME_SLOT));
    }

    if !DATE_RE.is_match(date) {
        return Err(ValidationError::invalid_format(
            schema::booking::BOOKING_DATE,
            "YYYY-MM-DD",
        ));
    }
    if !TIME_RE.is_match(time_slot) {
        return Err(ValidationError::invalid_format(schema::booking::TIME_SLOT, "HH:MM"));
    }

    let day = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
        ValidationError::new(schema::booking::BOOKING_DATE, "is not a calendar date")
    })?;
    let time = NaiveTime::parse_from_str(time_slot, "%H:%M").map_err(|_| {
        ValidationError::new(schema::booking::TIME_SLOT, "is not a valid time of day")
    })?;

    Ok(BookingCreate {
        maid_id,
        service_type: non_blank(service_type)
            .unwrap_or(schema::booking::DEFAULT_SERVICE_TYPE)
            .to_string(),
        booking_date: NaiveDateTime::new(day, time),
        time_slot: time_slot.to_string(),
        notes: non_blank(notes).map(str::to_string),
    })
}

pub fn validate_booking_update(
    status: Option<&str>,
    notes: Option<&str>,
) -> ValidationResult<BookingUpdate> {
    let status = match status {
        Some(word) => Some(parse_status(word)?),
        None => None,
    };
    Ok(BookingUpdate {
        status,
        notes: non_blank(notes).map(str::to_string),
    })
}

pub fn validate_review(
    booking_id: Uuid,
    rating: f64,
    comment: Option<&str>,
) -> ValidationResult<ReviewCreate> {
    if rating.is_nan() {
        return Err(ValidationError::required(schema::review::RATING.field));
    }
    let rating = schema::review::RATING.check(rating)?;
    Ok(ReviewCreate {
        booking_id,
        rating,
        comment: non_blank(comment).map(str::to_string),
    })
}

/// Sanitize a profile update for the given role
///
/// Blank strings count as "not provided". Provider-only fields are dropped
/// for customers.
pub fn validate_user_update(changes: &UserUpdate, role: UserRole) -> ValidationResult<UserUpdate> {
    let mut update = UserUpdate {
        full_name: optional_text(changes.full_name.as_deref(), &schema::user::FULL_NAME)?,
        phone_number: optional_text(changes.phone_number.as_deref(), &schema::user::PHONE_NUMBER)?,
        hourly_rate: changes
            .hourly_rate
            .map(|rate| schema::user::HOURLY_RATE.check(rate))
            .transpose()?,
        ..UserUpdate::default()
    };

    if role == UserRole::Maid {
        update.bio = optional_text(changes.bio.as_deref(), &schema::user::BIO)?;
        update.skills = optional_text(changes.skills.as_deref(), &schema::user::SKILLS)?;
        update.experience_years = changes
            .experience_years
            .map(|years| schema::user::EXPERIENCE_YEARS.check(years))
            .transpose()?;
        update.availability_schedule = optional_text(
            changes.availability_schedule.as_deref(),
            &schema::user::AVAILABILITY_SCHEDULE,
        )?;
    }

    Ok(update)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BookingStatus;

    fn register(password: &str) -> ValidationResult<RegisterRequest> {
        validate_registration(
            "Demo.Customer@MaidEase.com ",
            "  Demo Customer ",
            UserRole::Customer,
            password,
            None,
        )
    }

    #[test]
    fn test_registration_is_normalized() {
        let request = register("DemoPass123").unwrap();
        assert_eq!(request.email, "demo.customer@maidease.com");
        assert_eq!(request.full_name, "Demo Customer");
        assert_eq!(request.phone_number, None);
    }

    #[test]
    fn test_short_password_rejected_for_length() {
        let err = register("short1").unwrap_err();
        assert_eq!(err.field, "password");
        assert!(err.message.contains("at least 8"));
    }

    #[test]
    fn test_password_without_digit_rejected() {
        let err = register("alllettersnonumber").unwrap_err();
        assert_eq!(err.field, "password");
        assert!(err.message.contains("one number"));
    }

    #[test]
    fn test_password_without_letter_rejected() {
        assert!(register("1234567890").is_err());
    }

    #[test]
    fn test_password_too_long_rejected() {
        let password = format!("a1{}", "x".repeat(127));
        let err = register(&password).unwrap_err();
        assert!(err.message.contains("too long"));
    }

    #[test]
    fn test_invalid_email_rejected() {
        for email in ["", "demo", "demo@host", "de mo@host.com"] {
            let result =
                validate_registration(email, "Name", UserRole::Maid, "DemoPass123", None);
            assert_eq!(result.unwrap_err().field, "email", "email {email:?}");
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let err =
            validate_registration("a@b.co", "   ", UserRole::Maid, "DemoPass123", None)
                .unwrap_err();
        assert_eq!(err.field, "full_name");
    }

    #[test]
    fn test_phone_is_trimmed_and_bounded() {
        let ok = validate_registration(
            "a@b.co",
            "Name",
            UserRole::Maid,
            "DemoPass123",
            Some(" 555-0100 "),
        )
        .unwrap();
        assert_eq!(ok.phone_number.as_deref(), Some("555-0100"));

        let blank =
            validate_registration("a@b.co", "Name", UserRole::Maid, "DemoPass123", Some("  "))
                .unwrap();
        assert_eq!(blank.phone_number, None);

        let long = "1".repeat(21);
        assert!(
            validate_registration("a@b.co", "Name", UserRole::Maid, "DemoPass123", Some(&long))
                .is_err()
        );
    }

    #[test]
    fn test_booking_combines_date_and_slot() {
        let maid_id = Uuid::new_v4();
        let booking = validate_booking(maid_id, "2025-11-20", "10:00", None, Some("  ")).unwrap();
        assert_eq!(
            serde_json::to_value(&booking).unwrap()["booking_date"],
            "2025-11-20T10:00:00"
        );
        assert_eq!(booking.service_type, "house_cleaning");
        assert_eq!(booking.notes, None);
    }

    #[test]
    fn test_booking_rejects_bad_date_and_time() {
        let maid_id = Uuid::new_v4();
        assert!(validate_booking(maid_id, "20-11-2025", "10:00", None, None).is_err());
        assert!(validate_booking(maid_id, "2025-02-30", "10:00", None, None).is_err());
        assert!(validate_booking(maid_id, "2025-11-20", "9:00", None, None).is_err());
        assert!(validate_booking(maid_id, "2025-11-20", "25:00", None, None).is_err());
        assert_eq!(
            validate_booking(maid_id, "", "10:00", None, None).unwrap_err().field,
            "booking_date"
        );
    }

    #[test]
    fn test_booking_update_uses_status_table() {
        let update = validate_booking_update(Some("confirmed"), Some(" see you ")).unwrap();
        assert_eq!(update.status, Some(BookingStatus::Accepted));
        assert_eq!(update.notes.as_deref(), Some("see you"));

        assert!(validate_booking_update(Some("approved"), None).is_err());
    }

    #[test]
    fn test_review_rating_bounds() {
        let booking_id = Uuid::new_v4();
        assert!(validate_review(booking_id, 0.5, None).is_err());
        assert!(validate_review(booking_id, f64::NAN, None).is_err());
        let review = validate_review(booking_id, 4.5, Some(" great ")).unwrap();
        assert_eq!(review.comment.as_deref(), Some("great"));
    }

    #[test]
    fn test_user_update_drops_maid_fields_for_customers() {
        let changes = UserUpdate {
            full_name: Some(" Ana ".into()),
            bio: Some("Tidy".into()),
            experience_years: Some(3),
            ..UserUpdate::default()
        };

        let customer = validate_user_update(&changes, UserRole::Customer).unwrap();
        assert_eq!(customer.full_name.as_deref(), Some("Ana"));
        assert_eq!(customer.bio, None);
        assert_eq!(customer.experience_years, None);

        let maid = validate_user_update(&changes, UserRole::Maid).unwrap();
        assert_eq!(maid.bio.as_deref(), Some("Tidy"));
        assert_eq!(maid.experience_years, Some(3));
    }

    #[test]
    fn test_user_update_rejects_out_of_range_values() {
        let rate = UserUpdate {
            hourly_rate: Some(0.0),
            ..UserUpdate::default()
        };
        assert_eq!(
            validate_user_update(&rate, UserRole::Customer).unwrap_err().field,
            "hourly_rate"
        );

        let years = UserUpdate {
            experience_years: Some(51),
            ..UserUpdate::default()
        };
        assert!(validate_user_update(&years, UserRole::Maid).is_err());
    }

    #[test]
    fn test_parse_id() {
        assert!(validators::parse_id("maid_id", "not-a-uuid").is_err());
        assert_eq!(validators::parse_id("maid_id", " ").unwrap_err().message, "is required");
    }
}
