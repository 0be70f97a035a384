//! Booking client methods

use super::{ApiRequest, MaidEaseClient};
use crate::error::ClientError;
use maidease_core::{Booking, BookingCreate, BookingUpdate};
use uuid::Uuid;

impl MaidEaseClient {
    /// Book a provider
    pub async fn create_booking(&self, booking: &BookingCreate) -> Result<Booking, ClientError> {
        let request = ApiRequest::post("/bookings").json(booking)?;
        self.execute(request).await
    }

    /// Bookings of the signed-in user, as customer or as provider
    pub async fn my_bookings(&self) -> Result<Vec<Booking>, ClientError> {
        self.execute(ApiRequest::get("/bookings/my-bookings")).await
    }

    pub async fn get_booking(&self, booking_id: Uuid) -> Result<Booking, ClientError> {
        self.execute(ApiRequest::get(format!("/bookings/{booking_id}"))).await
    }

    /// Change a booking's status and/or notes
    pub async fn update_booking(
        &self,
        booking_id: Uuid,
        update: &BookingUpdate,
    ) -> Result<Booking, ClientError> {
        let request = ApiRequest::put(format!("/bookings/{booking_id}")).json(update)?;
        self.execute(request).await
    }

    /// Change a booking's status using UI vocabulary (`confirm`, `decline`, ...)
    ///
    /// Unknown words are rejected before anything is sent.
    pub async fn update_booking_status(
        &self,
        booking_id: Uuid,
        status: &str,
        notes: Option<&str>,
    ) -> Result<Booking, ClientError> {
        let update = BookingUpdate::new(Some(status), notes)?;
        self.update_booking(booking_id, &update).await
    }
}
