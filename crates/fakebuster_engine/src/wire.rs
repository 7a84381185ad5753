//! JSON schema of the classification backend.
//!
//! Responses are decoded into these types first and only then mapped into
//! core types, so a payload either matches the contract or fails as
//! [`FailureKind::MalformedPayload`].

use fakebuster_core::{AnalysisResult, MatchItem};
use serde::{Deserialize, Serialize};

use crate::{ClassifyError, FailureKind};

#[derive(Debug, Serialize)]
pub(crate) struct CheckRequest<'a> {
    pub article: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct CheckResponse {
    verdict: String,
    detected_language: String,
    confidence: Confidence,
    /// Absent or `null` when nothing matched.
    #[serde(default)]
    matches: Option<Vec<MatchPayload>>,
}

/// The backend has sent both `0.92` and `"0.92"`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Confidence {
    Number(serde_json::Number),
    Text(String),
}

impl Confidence {
    fn into_display(self) -> String {
        match self {
            Confidence::Number(n) => n.to_string(),
            Confidence::Text(s) => s,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MatchPayload {
    source: String,
    headline: String,
    #[serde(default)]
    url: Option<String>,
    score: f64,
}

impl From<CheckResponse> for AnalysisResult {
    fn from(response: CheckResponse) -> Self {
        AnalysisResult {
            verdict: response.verdict,
            detected_language: response.detected_language,
            confidence: response.confidence.into_display(),
            matches: response
                .matches
                .unwrap_or_default()
                .into_iter()
                .map(|m| MatchItem {
                    source: m.source,
                    headline: m.headline,
                    url: m.url.filter(|url| !url.trim().is_empty()),
                    score: m.score,
                })
                .collect(),
        }
    }
}

/// Decodes a `/check-fake-news` success body.
pub fn decode_check_response(body: &[u8]) -> Result<AnalysisResult, ClassifyError> {
    let response: CheckResponse = serde_json::from_slice(body)
        .map_err(|err| ClassifyError::new(FailureKind::MalformedPayload, err.to_string()))?;
    Ok(response.into())
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelatedNews {
    pub query_translated: String,
    pub detected_language: String,
    #[serde(default)]
    pub results: Vec<RelatedArticle>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RelatedArticle {
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pub_date: Option<String>,
}

/// Decodes a `/related-news` success body.
pub fn decode_related_news(body: &[u8]) -> Result<RelatedNews, ClassifyError> {
    serde_json::from_slice(body)
        .map_err(|err| ClassifyError::new(FailureKind::MalformedPayload, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_unset_top_k() {
        let body = serde_json::to_value(CheckRequest {
            article: " text ",
            top_k: None,
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "article": " text " }));

        let body = serde_json::to_value(CheckRequest {
            article: "text",
            top_k: Some(5),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "article": "text", "top_k": 5 }));
    }

    #[test]
    fn numeric_confidence_is_shown_as_sent() {
        let result = decode_check_response(
            br#"{"verdict":"REAL","detected_language":"en","confidence":0.734,"matches":[]}"#,
        )
        .unwrap();
        assert_eq!(result.confidence, "0.734");
    }

    #[test]
    fn null_url_is_none() {
        let result = decode_check_response(
            br#"{"verdict":"REAL","detected_language":"en","confidence":"1",
                "matches":[{"source":"NYT","headline":"h","url":null,"score":0.7}]}"#,
        )
        .unwrap();
        assert_eq!(result.matches[0].url, None);
    }

    #[test]
    fn null_matches_are_empty() {
        let result = decode_check_response(
            br#"{"verdict":"FAKE","detected_language":"en","confidence":"0.5","matches":null}"#,
        )
        .unwrap();
        assert!(result.matches.is_empty());
    }

    #[test]
    fn blank_url_is_none() {
        let result = decode_check_response(
            br#"{"verdict":"REAL","detected_language":"en","confidence":"1",
                "matches":[{"source":"NYT","headline":"h","url":"","score":0.7}]}"#,
        )
        .unwrap();
        assert_eq!(result.matches[0].url, None);
    }

    #[test]
    fn missing_verdict_is_malformed() {
        let err = decode_check_response(br#"{"detected_language":"en","confidence":"1"}"#)
            .unwrap_err();
        assert_eq!(err.kind, FailureKind::MalformedPayload);
    }
}
