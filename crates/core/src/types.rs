use crate::error::{ValidationError, ValidationResult};
use crate::schema;
use crate::validation;
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Customer,
    Maid,
}

impl UserRole {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Maid => "maid",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Self::Customer),
            "maid" => Ok(Self::Maid),
            _ => Err(ValidationError::new(
                schema::user::ROLE,
                "must be \"customer\" or \"maid\"",
            )),
        }
    }
}

/// Server-side user record, as returned by `/users/me` and `/maids`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub role: UserRole,
    #[serde(default = "default_true")]
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub bio: Option<String>,
    pub skills: Option<String>,
    pub experience_years: Option<u32>,
    pub hourly_rate: Option<f64>,
    pub average_rating: Option<f64>,
    pub availability_schedule: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl UserProfile {
    pub fn is_maid(&self) -> bool {
        self.role == UserRole::Maid
    }
}

/// Token pair issued by `/auth/login` and `/auth/refresh`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

impl fmt::Debug for TokenPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenPair")
            .field("access_token", &"<redacted>")
            .field("refresh_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Credentials for the `/auth/login` form (`username` carries the email)
#[derive(Clone, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: &str, password: &str) -> ValidationResult<Self> {
        let username = email.trim();
        if username.is_empty() {
            return Err(ValidationError::required(schema::user::EMAIL));
        }
        if password.is_empty() {
            return Err(ValidationError::required(schema::user::PASSWORD.field));
        }
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Body of `POST /auth/register`
#[derive(Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RegisterRequest {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}

impl RegisterRequest {
    /// Build a registration payload, rejecting it before it reaches the network
    pub fn new(
        email: &str,
        full_name: &str,
        role: UserRole,
        password: &str,
        phone_number: Option<&str>,
    ) -> ValidationResult<Self> {
        validation::validate_registration(email, full_name, role, password, phone_number)
    }
}

impl fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("email", &self.email)
            .field("full_name", &self.full_name)
            .field("role", &self.role)
            .field("password", &"<redacted>")
            .field("phone_number", &self.phone_number)
            .finish()
    }
}

/// Body of `PUT /users/me`; every field is optional
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hourly_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub availability_schedule: Option<String>,
}

impl UserUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Query parameters for `GET /maids`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaidFilter {
    pub skill: Option<String>,
    pub min_experience: Option<u32>,
    pub max_rate: Option<f64>,
}

impl MaidFilter {
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(skill) = self.skill.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("skill".to_string(), skill.to_string()));
        }
        if let Some(min_experience) = self.min_experience {
            query.push(("min_experience".to_string(), min_experience.to_string()));
        }
        if let Some(max_rate) = self.max_rate {
            query.push(("max_rate".to_string(), max_rate.to_string()));
        }
        query
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Completed,
    Canceled,
}

impl BookingStatus {
    pub const ALL: [Self; 4] = [Self::Pending, Self::Accepted, Self::Completed, Self::Canceled];

    /// Wire name
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Completed => "completed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether the booking still needs the provider's attention
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Pending | Self::Accepted)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::status::parse_status(s)
    }
}

/// The other party of a booking, as embedded by the server
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingParty {
    pub id: Uuid,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub maid_id: Uuid,
    pub service_type: String,
    pub booking_date: NaiveDateTime,
    pub time_slot: Option<String>,
    pub notes: Option<String>,
    pub status: BookingStatus,
    pub total_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub customer: Option<BookingParty>,
    pub maid: Option<BookingParty>,
}

/// Body of `POST /bookings`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingCreate {
    pub maid_id: Uuid,
    pub service_type: String,
    pub booking_date: NaiveDateTime,
    pub time_slot: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingCreate {
    /// Build a booking from a `YYYY-MM-DD` date and an `HH:MM` slot
    pub fn new(
        maid_id: Uuid,
        date: &str,
        time_slot: &str,
        service_type: Option<&str>,
        notes: Option<&str>,
    ) -> ValidationResult<Self> {
        validation::validate_booking(maid_id, date, time_slot, service_type, notes)
    }
}

/// Body of `PUT /bookings/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<BookingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl BookingUpdate {
    /// Build an update from UI vocabulary (`confirm`, `decline`, `cancelled`, ...)
    pub fn new(status: Option<&str>, notes: Option<&str>) -> ValidationResult<Self> {
        validation::validate_booking_update(status, notes)
    }

    pub const fn status(status: BookingStatus) -> Self {
        Self {
            status: Some(status),
            notes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub customer_id: Uuid,
    pub maid_id: Uuid,
    pub rating: f64,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of `POST /reviews`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReviewCreate {
    pub booking_id: Uuid,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ReviewCreate {
    pub fn new(booking_id: Uuid, rating: f64, comment: Option<&str>) -> ValidationResult<Self> {
        validation::validate_review(booking_id, rating, comment)
    }
}

/// Response of `GET /reviews/check/{booking_id}`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewCheck {
    pub exists: bool,
}
