//! Translation client with optional memoization

use std::sync::Arc;
use tracing::debug;

use crate::cache::{Cache, translation_key};
use crate::errors::SourceResult;
use crate::models::{TranslationKind, TranslationResult};
use crate::sources::TranslationSource;

/// Translates species descriptions, memoizing results per species and style
#[derive(Clone)]
pub struct TranslationClient {
    source: Arc<dyn TranslationSource>,
    cache: Option<Cache<TranslationResult>>,
}

impl TranslationClient {
    pub fn new(
        source: Arc<dyn TranslationSource>,
        cache: Option<Cache<TranslationResult>>,
    ) -> Self {
        Self { source, cache }
    }

    /// Translate the description of species `name` into style `kind`.
    ///
    /// Every decoded response is cached, including one reporting zero
    /// successful translations; later requests for the same species and
    /// style replay it without calling the upstream. Hard failures are
    /// never cached.
    pub async fn translate(
        &self,
        name: &str,
        text: &str,
        kind: TranslationKind,
    ) -> SourceResult<TranslationResult> {
        let key = translation_key(name, kind.endpoint());

        if let Some(cache) = &self.cache {
            if let Some(result) = cache.get(&key).await {
                debug!(species = name, kind = %kind, "Returning cached translation");
                return Ok(result);
            }
        }

        let result = self.source.translate(text, kind).await?;

        if let Some(cache) = &self.cache {
            cache.put(key, result.clone()).await;
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::SourceError;
    use crate::sources::MockTranslationSource;

    #[tokio::test]
    async fn test_success_is_cached_under_name_and_kind() {
        let mut source = MockTranslationSource::new();
        source
            .expect_translate()
            .withf(|text: &str, kind: &TranslationKind| {
                text == "X" && *kind == TranslationKind::Yoda
            })
            .times(1)
            .returning(|_, _| Ok(TranslationResult::translated("Y")));

        let cache = Cache::new("translations");
        let client = TranslationClient::new(Arc::new(source), Some(cache.clone()));

        let first = client.translate("mewtwo", "X", TranslationKind::Yoda).await.unwrap();
        let second = client.translate("mewtwo", "X", TranslationKind::Yoda).await.unwrap();

        assert_eq!(first.translated_text(), "Y");
        assert_eq!(first, second);
        assert!(cache.exists("mewtwoyoda.json").await);
    }

    #[tokio::test]
    async fn test_kinds_are_cached_separately() {
        let mut source = MockTranslationSource::new();
        source
            .expect_translate()
            .times(2)
            .returning(|_, kind| Ok(TranslationResult::translated(kind.as_str())));

        let client =
            TranslationClient::new(Arc::new(source), Some(Cache::new("translations")));

        let yoda = client.translate("onix", "X", TranslationKind::Yoda).await.unwrap();
        let bard = client.translate("onix", "X", TranslationKind::Shakespeare).await.unwrap();

        assert_eq!(yoda.translated_text(), "yoda");
        assert_eq!(bard.translated_text(), "shakespeare");
    }

    #[tokio::test]
    async fn test_soft_failure_is_cached_and_replayed() {
        let mut source = MockTranslationSource::new();
        source
            .expect_translate()
            .times(1)
            .returning(|_, _| Ok(TranslationResult::default()));

        let cache = Cache::new("translations");
        let client = TranslationClient::new(Arc::new(source), Some(cache.clone()));

        for _ in 0..2 {
            let result = client
                .translate("eevee", "X", TranslationKind::Shakespeare)
                .await
                .unwrap();
            assert_eq!(result.success_count(), 0);
            assert!(!result.is_success());
        }
        assert!(cache.exists("eeveeshakespeare.json").await);
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn test_hard_failure_propagates() {
        let mut source = MockTranslationSource::new();
        source
            .expect_translate()
            .returning(|_, _| Err(SourceError::timeout("http://translations/yoda.json")));

        let cache = Cache::new("translations");
        let client = TranslationClient::new(Arc::new(source), Some(cache.clone()));
        let err = client
            .translate("zubat", "X", TranslationKind::Yoda)
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Timeout { .. }));
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_without_cache_always_calls_upstream() {
        let mut source = MockTranslationSource::new();
        source
            .expect_translate()
            .times(2)
            .returning(|_, _| Ok(TranslationResult::translated("Y")));

        let client = TranslationClient::new(Arc::new(source), None);
        for _ in 0..2 {
            let result = client.translate("mewtwo", "X", TranslationKind::Yoda).await;
            assert_eq!(result.unwrap().translated_text(), "Y");
        }
    }
}
