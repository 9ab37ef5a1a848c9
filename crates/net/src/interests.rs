use axum::Json;
use mentorship_service::parser::interest::{interests_in, Category, Interest};
use serde::Deserialize;

use crate::error::ApiError;
use crate::extract::ApiQuery;

#[derive(Deserialize)]
pub struct CategoryQuery {
    category: Option<String>,
}

pub async fn list_interests(
    ApiQuery(query): ApiQuery<CategoryQuery>,
) -> Result<Json<Vec<&'static Interest>>, ApiError> {
    let category = query
        .category
        .filter(|c| !c.trim().is_empty())
        .map(|c| c.parse::<Category>())
        .transpose()
        .map_err(ApiError::BadRequest)?;

    Ok(Json(interests_in(category)))
}

#[cfg(test)]
mod tests {
    use crate::test_support::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_full_catalogue() {
        let backend = test_backend();
        let (status, body) = send(&backend.app, get_request("/interests/", None)).await;

        assert_eq!(status, StatusCode::OK);
        let interests = body.as_array().unwrap();
        assert_eq!(interests.len(), 24);
        assert_eq!(interests[0]["name"], "Web Development");
        assert_eq!(interests[0]["category"], "technology");
    }

    #[tokio::test]
    async fn test_filter_by_category() {
        let backend = test_backend();
        let (status, body) = send(&backend.app, get_request("/interests/?category=personal", None)).await;

        assert_eq!(status, StatusCode::OK);
        let interests = body.as_array().unwrap();
        assert_eq!(interests.len(), 4);
        assert!(interests.iter().all(|i| i["category"] == "personal"));
    }

    #[tokio::test]
    async fn test_unknown_category() {
        let backend = test_backend();
        let (status, body) = send(&backend.app, get_request("/interests/?category=cooking", None)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "unknown interest category: cooking");
    }
}
