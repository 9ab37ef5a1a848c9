use reqwest::Client;
use tracing::info;

use super::{send_json, RemoteError};
use crate::parser::matching::{MatchRequest, MatchResponse};

const SERVICE: &str = "AI service";

/// Client for the AI matching service's `POST /match`.
#[derive(Clone)]
pub struct MatcherClient {
    http: Client,
    url: String,
}

impl MatcherClient {
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    pub async fn recommend(&self, request: &MatchRequest) -> Result<MatchResponse, RemoteError> {
        info!(
            mentee_id = %request.mentee.id,
            mentors = request.mentors.len(),
            "requesting matches"
        );

        send_json(SERVICE, self.http.post(&self.url).json(request)).await
    }
}
