use std::sync::Arc;

use axum::extract::FromRef;
use mentorship_database::basic_db::SafeDatabase;
use mentorship_service::auth::token::JwtKeys;
use mentorship_service::remote::gemini::GeminiClient;
use mentorship_service::remote::matcher::MatcherClient;
use mentorship_service::remote::openvidu::OpenViduClient;
use reqwest::Client;

use crate::config::{BackendConfig, GamesConfig, MatcherConfig};

#[derive(Clone)]
pub struct BackendState<T> {
    pub database: T,
    pub keys: Arc<JwtKeys>,
    pub matcher: MatcherClient,
    pub video: OpenViduClient,
}

impl<T: SafeDatabase> BackendState<T> {
    pub fn new(database: T, config: &BackendConfig, http: Client) -> Self {
        Self {
            database,
            keys: Arc::new(JwtKeys::new(&config.secret_key, config.token_ttl)),
            matcher: MatcherClient::new(http.clone(), config.ai_service_url.clone()),
            video: OpenViduClient::new(http, config.openvidu_url.clone(), config.openvidu_secret.clone()),
        }
    }
}

impl<T> FromRef<BackendState<T>> for Arc<JwtKeys> {
    fn from_ref(state: &BackendState<T>) -> Self {
        Arc::clone(&state.keys)
    }
}

#[derive(Clone)]
pub struct MatcherState {
    pub llm: GeminiClient,
}

impl MatcherState {
    pub fn new(config: &MatcherConfig, http: Client) -> Self {
        Self {
            llm: GeminiClient::new(
                http,
                config.gemini_api_url.clone(),
                config.gemini_model.clone(),
                config.gemini_api_key.clone(),
            ),
        }
    }
}

#[derive(Clone)]
pub struct GamesState {
    pub keys: Arc<JwtKeys>,
}

impl GamesState {
    pub fn new(config: &GamesConfig) -> Self {
        // Only verifies tokens, so the lifetime is irrelevant.
        Self {
            keys: Arc::new(JwtKeys::new(&config.secret_key, Default::default())),
        }
    }
}

impl FromRef<GamesState> for Arc<JwtKeys> {
    fn from_ref(state: &GamesState) -> Self {
        Arc::clone(&state.keys)
    }
}
