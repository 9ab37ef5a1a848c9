use axum::extract::State;
use axum::Json;
use mentorship_database::basic_db::SafeDatabase;
use mentorship_service::parser::profile::{MenteeProfile, MentorProfile, Message};
use mentorship_service::parser::user::UserResponse;
use mentorship_service::store::{save_mentee, save_mentor};
use tracing::info;

use crate::account::current_user;
use crate::error::ApiError;
use crate::extract::{ApiJson, BearerClaims};
use crate::state::BackendState;

fn ensure_owner(caller: &UserResponse, profile_id: &str) -> Result<(), ApiError> {
    if caller.id != profile_id && !caller.is_admin() {
        return Err(ApiError::Forbidden(
            "Not authorized to manage this profile".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_mentor<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
    ApiJson(mentor): ApiJson<MentorProfile>,
) -> Result<Json<Message>, ApiError> {
    let caller = current_user(&state, &claims)?;
    ensure_owner(&caller, &mentor.id)?;

    save_mentor(&state.database, &mentor)?;
    info!(mentor_id = %mentor.id, requested_by = %caller.email, "saved mentor profile");

    Ok(Json(Message {
        msg: format!("Mentor profile for {} saved.", mentor.name),
    }))
}

pub async fn create_mentee<T: SafeDatabase>(
    State(state): State<BackendState<T>>,
    claims: BearerClaims,
    ApiJson(mentee): ApiJson<MenteeProfile>,
) -> Result<Json<Message>, ApiError> {
    let caller = current_user(&state, &claims)?;
    ensure_owner(&caller, &mentee.id)?;

    save_mentee(&state.database, &mentee)?;
    info!(mentee_id = %mentee.id, requested_by = %caller.email, "saved mentee profile");

    Ok(Json(Message {
        msg: format!("Mentee profile for {} saved.", mentee.name),
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;
    use mentorship_service::store::{find_mentee, list_mentors};
    use serde_json::json;

    #[tokio::test]
    async fn test_mentee_saves_own_profile() {
        let backend = test_backend();
        let (user_id, token) = signup_and_login(&backend.app, "alice@example.com", "mentee").await;

        let payload = json!({ "id": user_id, "name": "Alice", "interests": ["Physics"] });
        let (status, body) = send(&backend.app, json_request("POST", "/mentees/", Some(&token), payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Mentee profile for Alice saved.");

        let stored = find_mentee(&backend.state.database, &user_id).unwrap().unwrap();
        assert_eq!(stored.interests, vec!["Physics".to_string()]);
    }

    #[tokio::test]
    async fn test_cannot_write_someone_elses_profile() {
        let backend = test_backend();
        let (_, token) = signup_and_login(&backend.app, "bob@example.com", "mentor").await;

        let payload = json!({ "id": "someone-else", "name": "Bob", "qualifications": "PhD" });
        let (status, _) = send(&backend.app, json_request("POST", "/mentors/", Some(&token), payload)).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(list_mentors(&backend.state.database).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_admin_may_write_any_profile() {
        let backend = test_backend();
        let (_, token) = signup_and_login(&backend.app, "root@example.com", "admin").await;

        let payload = json!({ "id": "mentor1", "name": "Dr. Bob", "qualifications": "PhD" });
        let (status, body) = send(&backend.app, json_request("POST", "/mentors/", Some(&token), payload)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["msg"], "Mentor profile for Dr. Bob saved.");
        assert_eq!(list_mentors(&backend.state.database).unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_overlong_profile_id_rejected() {
        let backend = test_backend();
        let (_, token) = signup_and_login(&backend.app, "root@example.com", "admin").await;

        let payload = json!({ "id": "m".repeat(5000), "name": "Dr. Bob", "qualifications": "PhD" });
        let (status, body) = send(&backend.app, json_request("POST", "/mentors/", Some(&token), payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["detail"], "Identifier must be at most 254 characters");
        assert!(list_mentors(&backend.state.database).unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mentee_missing_interests_is_json_detail() {
        let backend = test_backend();
        let (user_id, token) = signup_and_login(&backend.app, "alice@example.com", "mentee").await;

        let payload = json!({ "id": user_id, "name": "Alice" });
        let (status, body) = send(&backend.app, json_request("POST", "/mentees/", Some(&token), payload)).await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["detail"].as_str().unwrap().contains("interests"));
    }

    #[tokio::test]
    async fn test_profiles_require_auth() {
        let backend = test_backend();
        let payload = json!({ "id": "x", "name": "X", "interests": [] });

        let (status, _) = send(&backend.app, json_request("POST", "/mentees/", None, payload)).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
