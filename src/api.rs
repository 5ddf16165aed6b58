use crate::errors::ApiError;
use crate::models::{
    ChatRequest, ChatResponse, ChatTurn, Credentials, ErrorBody, LoginResponse, PainAdaptation,
    PainRequest, ProfilePayload, ProfileResponse, TodayPlanResponse,
};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Access {
    Public,
    Session,
    /// Session endpoint whose 404 means "nothing stored yet".
    Lookup,
}

impl Access {
    /// Statuses decided without reading the response body.
    fn settled_by(self, status: StatusCode) -> bool {
        match self {
            Access::Public => false,
            Access::Session => status == StatusCode::UNAUTHORIZED,
            Access::Lookup => {
                status == StatusCode::UNAUTHORIZED || status == StatusCode::NOT_FOUND
            }
        }
    }
}

/// Typed client for the WellFit backend. Holds the session cookie set at
/// login and sends it with every later request.
#[derive(Clone, Debug)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Value, ApiError> {
        let request = self.http.post(self.url("/api/register")).json(credentials);
        self.execute(request, Access::Public).await
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, ApiError> {
        let request = self.http.post(self.url("/api/login")).json(credentials);
        self.execute(request, Access::Public).await
    }

    pub async fn save_profile(&self, profile: &ProfilePayload) -> Result<Value, ApiError> {
        let request = self.http.post(self.url("/api/profile")).json(profile);
        self.execute(request, Access::Session).await
    }

    pub async fn profile(&self, user_id: i64) -> Result<ProfileResponse, ApiError> {
        let request = self.http.get(self.url(&format!("/api/profile/{user_id}")));
        self.execute(request, Access::Lookup).await
    }

    pub async fn generate_plan(&self) -> Result<Value, ApiError> {
        let request = self.http.post(self.url("/api/generate-plan"));
        self.execute(request, Access::Session).await
    }

    pub async fn today_plan(&self) -> Result<TodayPlanResponse, ApiError> {
        let request = self.http.get(self.url("/api/today-plan"));
        self.execute(request, Access::Session).await
    }

    pub async fn adaptive_workout(&self, pain_text: &str) -> Result<PainAdaptation, ApiError> {
        let request = self
            .http
            .post(self.url("/api/adaptive-workout"))
            .json(&PainRequest { pain_text });
        self.execute(request, Access::Session).await
    }

    pub async fn chat_workout(
        &self,
        message: &str,
        history: &[ChatTurn],
    ) -> Result<ChatResponse, ApiError> {
        let request = self
            .http
            .post(self.url("/api/chat-workout"))
            .json(&ChatRequest { message, history });
        self.execute(request, Access::Session).await
    }

    /// Fire-and-forget: only a transport failure is reported.
    pub async fn logout(&self) -> Result<(), ApiError> {
        let response = self.http.post(self.url("/api/logout")).send().await?;
        debug!(status = %response.status(), "logout acknowledged");
        Ok(())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        access: Access,
    ) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        debug!(url = %response.url(), %status, "api response");

        if access.settled_by(status) {
            return Err(ApiError::rejected(status, None));
        }

        // A body that is not JSON is a transport failure whatever the status.
        let bytes = response.bytes().await?;
        if status.is_success() {
            return Ok(serde_json::from_slice(&bytes)?);
        }

        let body: ErrorBody = serde_json::from_slice(&bytes)?;
        Err(ApiError::rejected(status, body.error))
    }
}
