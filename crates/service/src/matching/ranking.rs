use serde::Deserialize;
use thiserror::Error;

use crate::parser::matching::MatchResult;

#[derive(Error, Debug)]
#[error("LLM response parsing failed: {0}")]
pub struct RankingError(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum ModelOutput {
    List(Vec<MatchResult>),
    Wrapped { matches: Vec<MatchResult> },
}

/// Parses model text into matches sorted by descending score.
///
/// The text must be a JSON list of `{mentor_id, score, reason}` objects, optionally inside a
/// markdown code fence or wrapped as `{"matches": [...]}`. Anything else is an error; partial
/// results are never returned. Equal scores keep the model's order.
pub fn rank_matches(text: &str) -> Result<Vec<MatchResult>, RankingError> {
    let body = strip_code_fence(text);

    if body.is_empty() {
        return Err(RankingError("empty model response".to_string()));
    }

    let mut matches = match serde_json::from_str::<ModelOutput>(body) {
        Ok(ModelOutput::List(matches)) | Ok(ModelOutput::Wrapped { matches }) => matches,
        Err(e) => return Err(RankingError(e.to_string())),
    };

    matches.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(matches)
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();

    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Skip the info string (e.g. "json") on the opening fence line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };

    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(matches: &[MatchResult]) -> Vec<&str> {
        matches.iter().map(|m| m.mentor_id.as_str()).collect()
    }

    #[test]
    fn test_sorts_descending_regardless_of_model_order() -> Result<(), RankingError> {
        let text = r#"[
            {"mentor_id": "low", "score": 0.2, "reason": "weak"},
            {"mentor_id": "high", "score": 0.95, "reason": "strong"},
            {"mentor_id": "mid", "score": 0.5, "reason": "ok"}
        ]"#;

        let matches = rank_matches(text)?;
        assert_eq!(ids(&matches), vec!["high", "mid", "low"]);
        assert_eq!(matches[0].reason, "strong");
        Ok(())
    }

    #[test]
    fn test_ties_keep_model_order() -> Result<(), RankingError> {
        let text = r#"[
            {"mentor_id": "a", "score": 0.5, "reason": ""},
            {"mentor_id": "b", "score": 0.9, "reason": ""},
            {"mentor_id": "c", "score": 0.5, "reason": ""}
        ]"#;

        assert_eq!(ids(&rank_matches(text)?), vec!["b", "a", "c"]);
        Ok(())
    }

    #[test]
    fn test_accepts_fenced_output() -> Result<(), RankingError> {
        let text = "```json\n[{\"mentor_id\": \"m\", \"score\": 1, \"reason\": \"r\"}]\n```\n";

        let matches = rank_matches(text)?;
        assert_eq!(ids(&matches), vec!["m"]);
        assert_eq!(matches[0].score, 1.0);
        Ok(())
    }

    #[test]
    fn test_accepts_wrapped_output() -> Result<(), RankingError> {
        let text = r#"{"matches": [{"mentor_id": "x", "score": 0.1, "reason": "r"}, {"mentor_id": "y", "score": 0.7, "reason": "r"}]}"#;

        assert_eq!(ids(&rank_matches(text)?), vec!["y", "x"]);
        Ok(())
    }

    #[test]
    fn test_empty_list_is_fine() -> Result<(), RankingError> {
        assert!(rank_matches("[]")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_malformed_output_is_an_error() {
        let bad = [
            "",
            "Here are my rankings: Bob is best.",
            r#"[{"mentor_id": "a", "score": 0.9, "reason": "r"}, {"mentor_id": "b"}]"#,
            r#"[{"mentor_id": "a", "score": "high", "reason": "r"}]"#,
            r#"{"mentor_id": "a", "score": 0.9, "reason": "r"}"#,
        ];

        for text in bad {
            let err = rank_matches(text).expect_err(text);
            assert!(err.to_string().starts_with("LLM response parsing failed"));
        }
    }
}
