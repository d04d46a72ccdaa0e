//! HTTP translation source backed by the FunTranslations API

use async_trait::async_trait;
use tracing::debug;

use super::traits::TranslationSource;
use crate::errors::{SourceError, SourceResult};
use crate::models::{TranslationKind, TranslationRequest, TranslationResult};
use crate::utils::{StandardHttpClient, url::UrlUtils};

pub const SERVICE_NAME: &str = "translation";

/// Translates text with `POST <base>/<kind>.json` and a `{"text": ...}` body
#[derive(Debug, Clone)]
pub struct FunTranslationsSource {
    base_url: String,
    http: StandardHttpClient,
}

impl FunTranslationsSource {
    pub fn new(base_url: impl Into<String>, http: StandardHttpClient) -> Self {
        Self {
            base_url: base_url.into(),
            http,
        }
    }

    fn translation_url(&self, kind: TranslationKind) -> SourceResult<String> {
        UrlUtils::join(&self.base_url, kind.endpoint())
            .map_err(|e| SourceError::invalid_url(&self.base_url, e))
    }
}

#[async_trait]
impl TranslationSource for FunTranslationsSource {
    async fn translate(
        &self,
        text: &str,
        kind: TranslationKind,
    ) -> SourceResult<TranslationResult> {
        let url = self.translation_url(kind)?;
        let request = TranslationRequest {
            text: text.to_string(),
        };

        let result: TranslationResult = self.http.post_json(&url, &request).await?;
        debug!(
            kind = %kind,
            success_count = result.success_count(),
            "Translation source responded"
        );
        Ok(result)
    }
}
