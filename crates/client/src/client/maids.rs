//! Provider listing client methods

use super::{ApiRequest, MaidEaseClient};
use crate::error::ClientError;
use maidease_core::{MaidFilter, UserProfile};
use uuid::Uuid;

impl MaidEaseClient {
    /// Browse providers (customers only, enforced by the server)
    pub async fn list_maids(&self, filter: &MaidFilter) -> Result<Vec<UserProfile>, ClientError> {
        let request = ApiRequest::get("/maids").query(filter.to_query());
        self.execute(request).await
    }

    /// Get a provider's public profile
    pub async fn get_maid(&self, maid_id: Uuid) -> Result<UserProfile, ClientError> {
        self.execute(ApiRequest::get(format!("/maids/{maid_id}"))).await
    }
}
