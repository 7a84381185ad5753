use futures_util::StreamExt;
use reqwest::header::ACCEPT;

use fakebuster_core::AnalysisResult;
use fakebuster_logging::{fb_debug, fb_info};

use crate::wire::{decode_check_response, decode_related_news, CheckRequest};
use crate::{ClassifyError, ClientSettings, FailureKind, RelatedNews};

const CHECK_PATH: &str = "check-fake-news";
const RELATED_PATH: &str = "related-news";

#[async_trait::async_trait]
pub trait Classifier: Send + Sync {
    async fn classify(&self, article: &str) -> Result<AnalysisResult, ClassifyError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestClassifier {
    settings: ClientSettings,
    client: reqwest::Client,
}

impl ReqwestClassifier {
    pub fn new(settings: ClientSettings) -> Result<Self, ClassifyError> {
        let mut builder = reqwest::Client::builder().connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| ClassifyError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { settings, client })
    }

    pub fn settings(&self) -> &ClientSettings {
        &self.settings
    }

    /// Looks up recent coverage for a free-text query.
    pub async fn related_news(&self, query: &str) -> Result<RelatedNews, ClassifyError> {
        let mut url = self.settings.endpoint(RELATED_PATH);
        url.query_pairs_mut().append_pair("query", query);
        fb_debug!("GET {} query_len={}", RELATED_PATH, query.len());

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        decode_related_news(&body)
    }

    async fn read_body(&self, response: reqwest::Response) -> Result<Vec<u8>, ClassifyError> {
        let status = response.status();
        if !status.is_success() {
            return Err(ClassifyError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let max_bytes = self.settings.max_response_bytes;
        if let Some(content_len) = response.content_length() {
            if content_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(content_len),
                    },
                    "response too large",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > max_bytes {
                return Err(ClassifyError::new(
                    FailureKind::TooLarge {
                        max_bytes,
                        actual: Some(next_len),
                    },
                    "response too large",
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        Ok(bytes)
    }
}

#[async_trait::async_trait]
impl Classifier for ReqwestClassifier {
    async fn classify(&self, article: &str) -> Result<AnalysisResult, ClassifyError> {
        let url = self.settings.endpoint(CHECK_PATH);
        let payload = serde_json::to_vec(&CheckRequest {
            article,
            top_k: self.settings.top_k,
        })
        .map_err(|err| ClassifyError::new(FailureKind::MalformedPayload, err.to_string()))?;
        fb_info!("POST {} article_len={}", url, article.len());

        let response = self
            .client
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .header(ACCEPT, "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_reqwest_error)?;
        let body = self.read_body(response).await?;
        let result = decode_check_response(&body)?;
        fb_debug!(
            "verdict={} language={} matches={}",
            result.verdict,
            result.detected_language,
            result.matches.len()
        );
        Ok(result)
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ClassifyError {
    if err.is_timeout() {
        return ClassifyError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return ClassifyError::new(FailureKind::InvalidUrl, err.to_string());
    }
    ClassifyError::new(FailureKind::Network, err.to_string())
}
