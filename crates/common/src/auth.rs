use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::config::ProjectConfig;

const INITIATE_AUTH_TARGET: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const AMZ_JSON: &str = "application/x-amz-json-1.1";
const PASSWORD_FLOW: &str = "USER_PASSWORD_AUTH";

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Authentication failed: Invalid username or password.")]
    AuthenticationFailed,
    #[error("An unexpected error occurred: {0}")]
    Provider(String),
    #[error("An unexpected error occurred: {0}")]
    Network(#[from] reqwest::Error),
    #[error("invalid identity endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Tokens issued by the identity provider.
#[derive(Clone)]
pub struct AuthToken {
    /// Sent as the bearer token to the EPIC API
    pub id_token: String,
    pub expires_in: Option<u64>,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("id_token", &"<redacted>")
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'static str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "UPPERCASE")]
struct AuthParameters<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    authentication_result: Option<AuthenticationResult>,
    challenge_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationResult {
    id_token: String,
    expires_in: Option<u64>,
}

#[derive(Deserialize)]
struct ProviderFault {
    #[serde(rename = "__type", default)]
    kind: String,
    #[serde(alias = "Message", default)]
    message: String,
}

/// Client for the project's identity provider.
#[derive(Debug, Clone)]
pub struct AuthClient {
    endpoint: Url,
    client: Client,
}

impl AuthClient {
    pub fn new(endpoint: Url) -> Result<Self, AuthError> {
        let client = Client::builder().build()?;
        Ok(Self { endpoint, client })
    }

    /// Regional endpoint unless the project overrides it.
    pub fn for_project(project: &ProjectConfig) -> Result<Self, AuthError> {
        let endpoint = match &project.identity_endpoint {
            Some(endpoint) => endpoint.clone(),
            None => Url::parse(&format!(
                "https://cognito-idp.{}.amazonaws.com/",
                project.region
            ))?,
        };
        Self::new(endpoint)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Password-grant exchange.
    pub async fn authenticate(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthToken, AuthError> {
        let request = InitiateAuthRequest {
            auth_flow: PASSWORD_FLOW,
            client_id,
            auth_parameters: AuthParameters { username, password },
        };
        let body = serde_json::to_vec(&request)
            .map_err(|e| AuthError::Provider(format!("failed to encode request: {}", e)))?;

        tracing::debug!(endpoint = %self.endpoint, username, "initiating password auth");
        let response = self
            .client
            .post(self.endpoint.clone())
            .header("X-Amz-Target", INITIATE_AUTH_TARGET)
            .header(CONTENT_TYPE, AMZ_JSON)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(classify_fault(status, &text));
        }

        let parsed: InitiateAuthResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::Provider(format!("malformed provider response: {}", e)))?;

        match parsed.authentication_result {
            Some(result) => Ok(AuthToken {
                id_token: result.id_token,
                expires_in: result.expires_in,
            }),
            None => Err(AuthError::Provider(format!(
                "unsupported authentication challenge: {}",
                parsed.challenge_name.as_deref().unwrap_or("unknown")
            ))),
        }
    }
}

/// Authenticate with the project's stored username and the given password.
pub async fn login(project: &ProjectConfig, password: &str) -> Result<AuthToken, AuthError> {
    AuthClient::for_project(project)?
        .authenticate(&project.identity_pool_client_id, &project.username, password)
        .await
}

fn classify_fault(status: StatusCode, body: &str) -> AuthError {
    let fault: Option<ProviderFault> = serde_json::from_str(body).ok();
    match fault {
        Some(fault) => {
            // Types may arrive namespaced, e.g. `com.amazonaws...#NotAuthorizedException`
            let kind = fault.kind.rsplit('#').next().unwrap_or_default();
            match kind {
                "NotAuthorizedException" | "UserNotFoundException" => {
                    AuthError::AuthenticationFailed
                }
                "" => AuthError::Provider(format!("{}: {}", status, body)),
                other => AuthError::Provider(format!("{}: {}", other, fault.message)),
            }
        }
        None => AuthError::Provider(format!("{}: {}", status, body)),
    }
}
