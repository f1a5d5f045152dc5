use super::types::{ErrorBody, MessageResponse, NewIdeaRequest, RenameIdeaRequest, RoleUpdateRequest};
use super::{AuthBackend, IdeaBackend, UserBackend, VoteBackend};
use crate::config::ClientConfig;
use crate::domain::{Credentials, Idea, IdeaReport, LoginResponse, Role, SignupResponse, User};
use crate::infrastructure::session::SessionManager;
use ideaboard_errors::{AppError, ErrorContext};
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;

/// JSON client for the idea-voting API.
///
/// Every request carries the session's bearer token when one is stored. A 401
/// ends the session (credential and vote ledger) before the error is returned.
#[derive(Clone)]
pub struct ApiClient {
    http_client: reqwest::Client,
    base_url: String,
    session: SessionManager,
}

impl ApiClient {
    pub fn new(config: &ClientConfig, session: SessionManager) -> Result<Self, AppError> {
        let parsed = url::Url::parse(&config.api_base_url).map_err(|e| {
            AppError::Internal(format!("invalid API URL {:?}: {}", config.api_base_url, e))
        })?;

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(config.request_timeout);

        let http_client = builder
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;

        Ok(Self {
            http_client,
            base_url: parsed.as_str().trim_end_matches('/').to_string(),
            session,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http_client
            .request(method, format!("{}{}", self.base_url, path))
            .header("Accept", "application/json");

        match self.session.authorization_header() {
            Some(value) => builder.header("Authorization", value),
            None => builder,
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
        context: ErrorContext,
    ) -> Result<T, AppError> {
        let response = self.send(builder, context).await?;
        response.json().await.map_err(|e| {
            tracing::error!("Unreadable API response: {}", e);
            AppError::Server(format!("unreadable response: {}", e))
        })
    }

    async fn execute_empty(
        &self,
        builder: RequestBuilder,
        context: ErrorContext,
    ) -> Result<(), AppError> {
        self.send(builder, context).await.map(|_| ())
    }

    async fn send(&self, builder: RequestBuilder, context: ErrorContext) -> Result<Response, AppError> {
        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                AppError::Timeout
            } else {
                tracing::error!("API request failed: {}", e);
                AppError::Network(e.to_string())
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|b| b.text());
        tracing::warn!("API error: {} - {}", status, message.as_deref().unwrap_or(""));

        let error = AppError::from_status(status.as_u16(), message, context);
        if error == AppError::Unauthorized {
            self.session.expire();
        }
        Err(error)
    }
}

impl AuthBackend for ApiClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse, AppError> {
        let builder = self.request(Method::POST, "/auth/login").json(credentials);
        self.execute(builder, ErrorContext::Login).await
    }

    async fn signup(&self, credentials: &Credentials) -> Result<SignupResponse, AppError> {
        let builder = self.request(Method::POST, "/auth/signup").json(credentials);
        self.execute(builder, ErrorContext::Signup).await
    }
}

impl VoteBackend for ApiClient {
    async fn vote(&self, idea_id: &str) -> Result<Idea, AppError> {
        let path = format!("/ideas/{}/vote", encode_segment(idea_id));
        self.execute(self.request(Method::POST, &path), ErrorContext::Vote)
            .await
    }
}

impl IdeaBackend for ApiClient {
    async fn list_ideas(&self) -> Result<Vec<Idea>, AppError> {
        self.execute(self.request(Method::GET, "/ideas"), ErrorContext::Other)
            .await
    }

    async fn create_idea(&self, title: &str) -> Result<Idea, AppError> {
        let builder = self
            .request(Method::POST, "/ideas")
            .json(&NewIdeaRequest { title });
        self.execute(builder, ErrorContext::Other).await
    }

    async fn rename_idea(&self, idea_id: &str, new_title: &str) -> Result<Idea, AppError> {
        let path = format!("/ideas/{}", encode_segment(idea_id));
        let builder = self
            .request(Method::PATCH, &path)
            .json(&RenameIdeaRequest { new_title });
        self.execute(builder, ErrorContext::Other).await
    }

    async fn delete_idea(&self, idea_id: &str) -> Result<(), AppError> {
        let path = format!("/ideas/{}", encode_segment(idea_id));
        self.execute_empty(self.request(Method::DELETE, &path), ErrorContext::Other)
            .await
    }

    async fn idea_report(&self, idea_id: &str) -> Result<IdeaReport, AppError> {
        let path = format!("/ideas/{}/report", encode_segment(idea_id));
        self.execute(self.request(Method::GET, &path), ErrorContext::Other)
            .await
    }

    async fn my_voted_ideas(&self) -> Result<Vec<Idea>, AppError> {
        self.execute(self.request(Method::GET, "/users/me/votes"), ErrorContext::Other)
            .await
    }
}

impl UserBackend for ApiClient {
    async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.execute(self.request(Method::GET, "/users"), ErrorContext::Other)
            .await
    }

    async fn update_role(&self, user_id: &str, role: Role) -> Result<String, AppError> {
        let path = format!("/users/{}/role", encode_segment(user_id));
        let builder = self
            .request(Method::PATCH, &path)
            .json(&RoleUpdateRequest { role });
        let response: MessageResponse = self.execute(builder, ErrorContext::Other).await?;
        Ok(response.message)
    }
}

/// Percent-encodes an id for use as a single path segment.
fn encode_segment(segment: &str) -> String {
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("42"), "42");
        assert_eq!(encode_segment("a/b c"), "a%2Fb%20c");
    }
}
