//! Auth endpoints

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Method, StatusCode};

use super::client::{error_from_response, response_message, ApiClient};
use crate::auth::AuthGateway;
use crate::error::{Error, Result};
use crate::models::{NewAccount, TokenResponse, UserIdentity};

const BAD_CREDENTIALS: &str = "Invalid username or password";

/// `/users/*` endpoints of the backend
pub struct AuthApi {
    client: Arc<ApiClient>,
}

impl AuthApi {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for AuthApi {
    async fn verify_current_user(&self) -> Result<UserIdentity> {
        let request = self.client.request(Method::GET, "/users/me");
        self.client
            .send_json(request, "Failed to load current user")
            .await
    }

    async fn exchange_credentials(&self, username: &str, password: &str) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, "/users/signin")
            .form(&[("username", username), ("password", password)]);

        let response = request.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            let message = response_message(response).await;
            return Err(Error::InvalidCredentials(
                message.unwrap_or_else(|| BAD_CREDENTIALS.to_string()),
            ));
        }
        if !status.is_success() {
            return Err(error_from_response(response, "Sign in failed").await);
        }

        let body: TokenResponse = response.json().await?;
        body.token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::InvalidCredentials(BAD_CREDENTIALS.to_string()))
    }

    async fn register(&self, account: &NewAccount) -> Result<String> {
        let request = self
            .client
            .request(Method::POST, "/users/signup")
            .json(account);
        let body: TokenResponse = self.client.send_json(request, "Sign up failed").await?;
        body.token
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::server("Sign up did not return a token"))
    }
}
