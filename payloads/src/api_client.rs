use crate::{
    AdminCredentials, Decision, Wine, WineId, WineStatus, Winery, WineryId,
    requests, responses,
};
use reqwest::StatusCode;
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for the wine catalog backend.
///
/// Holds the admin credential pair when one is available; every request is
/// then sent with a Basic `Authorization` header.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    pub credentials: Option<AdminCredentials>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            credentials: None,
        }
    }

    pub fn with_credentials(mut self, credentials: AdminCredentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    /// The health route sits at the server root, outside `/api`.
    fn health_url(&self) -> String {
        format!("{}/health", &self.address)
    }

    fn authorize(
        &self,
        request: reqwest::RequestBuilder,
    ) -> reqwest::RequestBuilder {
        match &self.credentials {
            Some(credentials) => request.header(
                reqwest::header::AUTHORIZATION,
                credentials.basic_auth_header(),
            ),
            None => request,
        }
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ReqwestResult {
        self.authorize(request).send().await
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.send(request).await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.send(request).await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.post(self.format_url(path)).json(body);
        self.send(request).await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.put(self.format_url(path)).json(body);
        self.send(request).await
    }

    async fn patch(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path)).json(body);
        self.send(request).await
    }

    async fn empty_patch(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.patch(self.format_url(path));
        self.send(request).await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.delete(self.format_url(path));
        self.send(request).await
    }
}

/// Public catalog
impl APIClient {
    pub async fn health_check(
        &self,
    ) -> Result<responses::HealthStatus, ClientError> {
        let request = self.inner_client.get(self.health_url());
        let response = self.send(request).await?;
        ok_body(response).await
    }

    /// Live, available wines matching `query`, sorted by name.
    pub async fn list_wines(
        &self,
        query: &requests::WineQuery,
    ) -> Result<responses::WineList, ClientError> {
        let response = self.get("wines/", query).await?;
        ok_body(response).await
    }

    pub async fn get_wine(&self, wine_id: WineId) -> Result<Wine, ClientError> {
        let response = self.empty_get(&format!("wines/{wine_id}")).await?;
        ok_body(response).await
    }

    pub async fn list_varieties(
        &self,
    ) -> Result<responses::VarietyList, ClientError> {
        let response = self.empty_get("wines/varieties/list").await?;
        ok_body(response).await
    }

    pub async fn list_vintages(
        &self,
    ) -> Result<responses::VintageList, ClientError> {
        let response = self.empty_get("wines/vintages/list").await?;
        ok_body(response).await
    }

    pub async fn list_wineries(
        &self,
    ) -> Result<responses::WineryList, ClientError> {
        let response = self.empty_get("wineries/").await?;
        ok_body(response).await
    }

    pub async fn get_winery(
        &self,
        winery_id: WineryId,
    ) -> Result<Winery, ClientError> {
        let response = self.empty_get(&format!("wineries/{winery_id}")).await?;
        ok_body(response).await
    }

    pub async fn get_winery_by_slug(
        &self,
        slug: &str,
    ) -> Result<Winery, ClientError> {
        let response =
            self.empty_get(&format!("wineries/slug/{slug}")).await?;
        ok_body(response).await
    }
}

/// Wine management (requires credentials)
impl APIClient {
    pub async fn create_wine(
        &self,
        details: &requests::CreateWine,
    ) -> Result<responses::WineCreated, ClientError> {
        let response = self.post("wines/", details).await?;
        ok_body(response).await
    }

    pub async fn update_wine(
        &self,
        wine_id: WineId,
        details: &requests::UpdateWine,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let response = self.put(&format!("wines/{wine_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_wine(
        &self,
        wine_id: WineId,
    ) -> Result<responses::SuccessMessage, ClientError> {
        let response = self.delete(&format!("wines/{wine_id}")).await?;
        ok_body(response).await
    }

    /// Every wine regardless of status, newest first.
    pub async fn list_all_wines_admin(
        &self,
        query: &requests::AdminWineQuery,
    ) -> Result<responses::WineList, ClientError> {
        let response = self.get("wines/admin/all", query).await?;
        ok_body(response).await
    }
}

/// Moderation (requires credentials)
impl APIClient {
    /// Wines awaiting review, newest first.
    pub async fn list_pending(
        &self,
        query: &requests::PendingQuery,
    ) -> Result<responses::WineList, ClientError> {
        let response = self.get("wines/admin/pending", query).await?;
        ok_body(response).await
    }

    pub async fn get_stats(&self) -> Result<responses::WineStats, ClientError> {
        let response = self.empty_get("wines/admin/stats").await?;
        ok_body(response).await
    }

    pub async fn approve_wine(
        &self,
        wine_id: WineId,
    ) -> Result<responses::ModerationOutcome, ClientError> {
        let response = self
            .empty_patch(&format!("wines/admin/{wine_id}/approve"))
            .await?;
        ok_body(response).await
    }

    /// Reject a pending wine. The backend deletes it.
    pub async fn reject_wine(
        &self,
        wine_id: WineId,
    ) -> Result<responses::ModerationOutcome, ClientError> {
        let response = self
            .empty_patch(&format!("wines/admin/{wine_id}/reject"))
            .await?;
        ok_body(response).await
    }

    pub async fn set_wine_status(
        &self,
        wine_id: WineId,
        status: WineStatus,
    ) -> Result<responses::ModerationOutcome, ClientError> {
        let body = requests::StatusUpdate { status };
        let response = self
            .patch(&format!("wines/admin/{wine_id}/status"), &body)
            .await?;
        ok_body(response).await
    }

    /// Carry out a moderation decision on the backend.
    ///
    /// Callers check the decision against the wine's current status with
    /// [`WineStatus::apply`] first; this only picks the endpoint.
    pub async fn moderate(
        &self,
        wine_id: WineId,
        decision: Decision,
    ) -> Result<responses::ModerationOutcome, ClientError> {
        match decision {
            Decision::Approve => self.approve_wine(wine_id).await,
            Decision::Reject => self.reject_wine(wine_id).await,
            Decision::Archive => {
                self.set_wine_status(wine_id, WineStatus::Archived).await
            }
            Decision::Requeue => {
                self.set_wine_status(wine_id, WineStatus::Pending).await
            }
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// A non-success response, with the backend's error detail to display.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    NotFound,
    Unauthorized,
    /// The backend refused the request, e.g. failed validation.
    Rejected,
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) => ErrorKind::Network,
            ClientError::APIError(StatusCode::NOT_FOUND, _) => {
                ErrorKind::NotFound
            }
            ClientError::APIError(
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN,
                _,
            ) => ErrorKind::Unauthorized,
            ClientError::APIError(_, _) => ErrorKind::Rejected,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }

    pub fn is_unauthorized(&self) -> bool {
        self.kind() == ErrorKind::Unauthorized
    }
}

/// Pull the `detail` message out of an error body, falling back to the raw
/// text, then to the status reason.
fn error_message(status: StatusCode, body: String) -> String {
    if let Ok(error) = serde_json::from_str::<responses::ErrorDetail>(&body) {
        return error.detail;
    }
    if body.trim().is_empty() {
        return status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string();
    }
    body
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    match response.text().await {
        Ok(body) => ClientError::APIError(status, error_message(status, body)),
        Err(e) => ClientError::Network(e),
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(response.json::<T>().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_field_becomes_the_message() {
        let message = error_message(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "Wine is not pending"}"#.into(),
        );
        assert_eq!(message, "Wine is not pending");
    }

    #[test]
    fn plain_and_empty_bodies_fall_back() {
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "upstream down".into()),
            "upstream down"
        );
        assert_eq!(
            error_message(StatusCode::NOT_FOUND, String::new()),
            "Not Found"
        );
    }

    #[test]
    fn status_codes_map_to_kinds() {
        let not_found = ClientError::APIError(StatusCode::NOT_FOUND, "".into());
        assert!(not_found.is_not_found());
        let unauthorized =
            ClientError::APIError(StatusCode::UNAUTHORIZED, "".into());
        assert_eq!(unauthorized.kind(), ErrorKind::Unauthorized);
        let rejected = ClientError::APIError(
            StatusCode::UNPROCESSABLE_ENTITY,
            "bad price".into(),
        );
        assert_eq!(rejected.kind(), ErrorKind::Rejected);
        assert_eq!(rejected.to_string(), "bad price");
    }

    #[test]
    fn urls_live_under_api_prefix() {
        let client = APIClient::new("http://localhost:8000");
        assert_eq!(
            client.format_url("wines/admin/stats"),
            "http://localhost:8000/api/wines/admin/stats"
        );
        assert_eq!(client.health_url(), "http://localhost:8000/health");
    }
}
