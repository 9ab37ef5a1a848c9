use reqwest::Client;
use serde_json::{json, Value};
use tracing::info;

use super::{send_json, RemoteError};

const SERVICE: &str = "Video service";
const BASIC_AUTH_USER: &str = "OPENVIDUAPP";

pub const DEFAULT_URL: &str = "http://localhost:4443";

/// OpenVidu session ids are restricted to `[A-Za-z0-9_-]`.
pub fn is_valid_session_id(session_id: &str) -> bool {
    !session_id.is_empty()
        && session_id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// OpenVidu REST client authenticated with the server secret.
#[derive(Clone)]
pub struct OpenViduClient {
    http: Client,
    base_url: String,
    secret: String,
}

impl OpenViduClient {
    pub fn new(http: Client, base_url: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
            secret: secret.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/openvidu/api/{path}", self.base_url.trim_end_matches('/'))
    }

    /// Creates a session. An already existing custom session answers with its id.
    pub async fn create_session(&self, body: &Value) -> Result<Value, RemoteError> {
        let request = self
            .http
            .post(self.endpoint("sessions"))
            .basic_auth(BASIC_AUTH_USER, Some(&self.secret))
            .json(body);

        match send_json(SERVICE, request).await {
            Err(RemoteError::Status { status: 409, .. }) => {
                let id = body.get("customSessionId").cloned().unwrap_or(Value::Null);
                info!(session_id = %id, "session already exists");
                Ok(json!({ "id": id }))
            }
            result => result,
        }
    }

    pub async fn create_connection(&self, session_id: &str, body: &Value) -> Result<Value, RemoteError> {
        let request = self
            .http
            .post(self.endpoint(&format!("sessions/{session_id}/connection")))
            .basic_auth(BASIC_AUTH_USER, Some(&self.secret))
            .json(body);

        send_json(SERVICE, request).await
    }

    /// Ensures `session_id` exists and returns a fresh connection token for it.
    pub async fn token(&self, session_id: &str) -> Result<String, RemoteError> {
        let session = self
            .create_session(&json!({ "customSessionId": session_id }))
            .await?;
        let session_id = session
            .get("id")
            .and_then(Value::as_str)
            .filter(|id| is_valid_session_id(id))
            .unwrap_or(session_id)
            .to_string();

        let connection = self.create_connection(&session_id, &json!({})).await?;

        connection
            .get("token")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| RemoteError::Decode {
                service: SERVICE,
                reason: "connection has no token".to_string(),
            })
    }
}
