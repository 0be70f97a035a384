//! MaidEase core types and utilities

pub mod error;
pub mod schema;
pub mod status;
pub mod types;
pub mod validation;

pub use error::{ValidationError, ValidationResult};
pub use status::parse_status;
pub use types::{
    Booking, BookingCreate, BookingParty, BookingStatus, BookingUpdate, LoginForm, MaidFilter,
    RegisterRequest, Review, ReviewCheck, ReviewCreate, TokenPair, UserProfile, UserRole,
    UserUpdate,
};
