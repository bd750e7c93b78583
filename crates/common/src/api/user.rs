use reqwest::{Client, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};

use super::{display_value, endpoint, ApiError, ApiRequest};

/// POST /users (admin only).
#[derive(Clone, Serialize)]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

impl std::fmt::Debug for CreateUserRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateUserRequest")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("email", &self.email)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateUserOutcome {
    Created,
    /// 400, carrying the API's `error` message
    Invalid(String),
    /// 409
    AlreadyExists,
}

#[derive(Deserialize)]
struct ValidationBody {
    #[serde(default)]
    error: Option<serde_json::Value>,
}

impl ApiRequest for CreateUserRequest {
    type Response = CreateUserOutcome;

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.post(endpoint(base_url, &["users"])?).json(self))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        match status {
            StatusCode::CREATED => Ok(CreateUserOutcome::Created),
            StatusCode::BAD_REQUEST => {
                let message = serde_json::from_str::<ValidationBody>(body)
                    .ok()
                    .and_then(|b| b.error)
                    .map(|e| display_value(&e))
                    .unwrap_or_else(|| "Bad Request".to_string());
                Ok(CreateUserOutcome::Invalid(message))
            }
            StatusCode::CONFLICT => Ok(CreateUserOutcome::AlreadyExists),
            s => Err(ApiError::from_status(s, body)),
        }
    }
}

/// DELETE /users/{username} (admin only).
#[derive(Debug, Clone)]
pub struct DeleteUserRequest {
    pub username: String,
}

impl ApiRequest for DeleteUserRequest {
    type Response = ();

    fn build_request(&self, base_url: &str, client: &Client) -> Result<RequestBuilder, ApiError> {
        Ok(client.delete(endpoint(base_url, &["users", &self.username])?))
    }

    fn parse_response(&self, status: StatusCode, body: &str) -> Result<Self::Response, ApiError> {
        match status {
            StatusCode::NO_CONTENT => Ok(()),
            StatusCode::NOT_FOUND => Err(ApiError::NotFound(format!(
                "User '{}' not found.",
                self.username
            ))),
            s => Err(ApiError::from_status(s, body)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateUserRequest {
        CreateUserRequest {
            username: "bob".to_string(),
            password: "pw".to_string(),
            email: "bob@example.com".to_string(),
        }
    }

    #[test]
    fn test_create_user_outcomes() {
        let request = create();
        assert_eq!(
            request.parse_response(StatusCode::CREATED, "{}").unwrap(),
            CreateUserOutcome::Created
        );
        assert_eq!(
            request
                .parse_response(StatusCode::BAD_REQUEST, r#"{"error": "Password too short"}"#)
                .unwrap(),
            CreateUserOutcome::Invalid("Password too short".to_string())
        );
        assert_eq!(
            request.parse_response(StatusCode::CONFLICT, "").unwrap(),
            CreateUserOutcome::AlreadyExists
        );
        assert!(request
            .parse_response(StatusCode::INTERNAL_SERVER_ERROR, "boom")
            .is_err());
    }

    #[test]
    fn test_create_user_debug_hides_password() {
        assert!(!format!("{:?}", create()).contains("\"pw\""));
    }

    #[test]
    fn test_delete_missing_user() {
        let request = DeleteUserRequest {
            username: "bob".to_string(),
        };
        assert!(request.parse_response(StatusCode::NO_CONTENT, "").is_ok());
        let err = request.parse_response(StatusCode::NOT_FOUND, "").unwrap_err();
        assert_eq!(err.to_string(), "Error: User 'bob' not found.");
    }
}
