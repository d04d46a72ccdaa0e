//! Species lookup orchestration
//!
//! Validates the requested name, resolves the species through the cache-backed
//! [`SpeciesClient`], picks a description and optionally rewrites it through
//! the [`TranslationClient`].
//!
//! Species failures end the request with a not-found outcome. Translation
//! failures never do: the original description is kept.

use tracing::{debug, info, warn};

use super::{SpeciesClient, TranslationClient};
use crate::errors::{AppError, AppResult};
use crate::models::{Pokemon, SpeciesRecord, TranslationKind};
use crate::utils::validation::validate_species_name;

const RESOURCE_NAME: &str = "pokemon";

#[derive(Clone)]
pub struct LookupService {
    species: SpeciesClient,
    translations: TranslationClient,
}

impl LookupService {
    pub fn new(species: SpeciesClient, translations: TranslationClient) -> Self {
        Self {
            species,
            translations,
        }
    }

    /// Plain lookup: the species with its first English description
    pub async fn get(&self, name: &str) -> AppResult<Pokemon> {
        let species = self.fetch_species(name).await?;
        let description = species.resolve_description();
        Ok(Pokemon::from_species(&species, description.text))
    }

    /// Translated lookup.
    ///
    /// Non-English descriptions are returned untouched. English ones go through
    /// the Yoda style for cave dwellers and legendaries, Shakespeare otherwise.
    pub async fn get_translated(&self, name: &str) -> AppResult<Pokemon> {
        let species = self.fetch_species(name).await?;
        let description = species.resolve_description();

        if !description.is_english() {
            debug!(
                species = name,
                language = description.language_code,
                "Description is not in English, skipping translation"
            );
            return Ok(Pokemon::from_species(&species, description.text));
        }

        let kind = TranslationKind::for_species(species.habitat_name(), species.is_legendary);
        let text = self.translate_or_original(name, description.text, kind).await;

        Ok(Pokemon::from_species(&species, text))
    }

    async fn fetch_species(&self, name: &str) -> AppResult<SpeciesRecord> {
        validate_species_name(name).map_err(|e| AppError::validation(e.to_string()))?;

        self.species.get_species(name).await.map_err(|e| {
            warn!(species = name, kind = e.kind(), error = %e, "Species lookup failed");
            AppError::not_found(RESOURCE_NAME, name)
        })
    }

    async fn translate_or_original(
        &self,
        name: &str,
        text: &str,
        kind: TranslationKind,
    ) -> String {
        match self.translations.translate(name, text, kind).await {
            Ok(result) if result.is_success() => result.contents.translated,
            Ok(_) => {
                info!(
                    species = name,
                    kind = %kind,
                    "Translation produced no result, keeping original description"
                );
                text.to_string()
            }
            Err(e) => {
                warn!(
                    species = name,
                    kind = %kind,
                    error = %e,
                    "Translation failed, keeping original description"
                );
                text.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::errors::SourceError;
    use crate::models::{FlavorTextEntry, NamedResource, TranslationResult};
    use crate::sources::{MockSpeciesSource, MockTranslationSource};
    use rstest::rstest;
    use std::sync::Arc;
    use tracing_test::traced_test;

    fn species(
        name: &str,
        entries: Vec<FlavorTextEntry>,
        habitat: Option<&str>,
        is_legendary: bool,
    ) -> SpeciesRecord {
        SpeciesRecord {
            name: name.to_string(),
            descriptions: entries,
            habitat: habitat.map(NamedResource::named),
            is_legendary,
        }
    }

    fn english(text: &str) -> Vec<FlavorTextEntry> {
        vec![FlavorTextEntry::new(text, "en")]
    }

    fn species_source_returning(record: SpeciesRecord) -> MockSpeciesSource {
        let mut source = MockSpeciesSource::new();
        source
            .expect_fetch_species()
            .returning(move |_| Ok(record.clone()));
        source
    }

    fn service(
        species_source: MockSpeciesSource,
        translation_source: MockTranslationSource,
    ) -> LookupService {
        LookupService::new(
            SpeciesClient::new(Arc::new(species_source), Cache::new("species")),
            TranslationClient::new(
                Arc::new(translation_source),
                Some(Cache::new("translations")),
            ),
        )
    }

    #[tokio::test]
    async fn test_get_returns_public_entity() {
        let record = species("mewtwo", english("some text here"), None, false);
        let mut translation_source = MockTranslationSource::new();
        translation_source.expect_translate().never();

        let pokemon = service(species_source_returning(record), translation_source)
            .get("mewtwo")
            .await
            .unwrap();

        assert_eq!(
            pokemon,
            Pokemon {
                name: "mewtwo".to_string(),
                description: "some text here".to_string(),
                habitat: String::new(),
                is_legendary: false,
            }
        );
    }

    #[rstest]
    #[case("123")]
    #[case("")]
    #[case("mr-mime")]
    #[case("pika chu")]
    #[tokio::test]
    async fn test_invalid_names_never_reach_upstream(#[case] name: &str) {
        let mut species_source = MockSpeciesSource::new();
        species_source.expect_fetch_species().never();
        let mut translation_source = MockTranslationSource::new();
        translation_source.expect_translate().never();
        let lookup = service(species_source, translation_source);

        assert!(matches!(lookup.get(name).await, Err(AppError::Validation { .. })));
        assert!(matches!(
            lookup.get_translated(name).await,
            Err(AppError::Validation { .. })
        ));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_species_failure_is_not_found() {
        let mut species_source = MockSpeciesSource::new();
        species_source
            .expect_fetch_species()
            .returning(|_| Err(SourceError::transport("species", "connection refused")));
        let mut translation_source = MockTranslationSource::new();
        translation_source.expect_translate().never();
        let lookup = service(species_source, translation_source);

        let err = lookup.get_translated("missingno").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { ref id, .. } if id == "missingno"));
        assert!(logs_contain("Species lookup failed"));
    }

    #[tokio::test]
    async fn test_repeated_lookup_uses_cache() {
        let mut species_source = MockSpeciesSource::new();
        species_source
            .expect_fetch_species()
            .times(1)
            .returning(|name| Ok(species(name, english("Cached text"), Some("grassland"), false)));
        let lookup = service(species_source, MockTranslationSource::new());

        let first = lookup.get("bulbasaur").await.unwrap();
        let second = lookup.get("bulbasaur").await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_english_entry_is_preferred_over_earlier_entries() {
        let record = species(
            "pikachu",
            vec![
                FlavorTextEntry::new("Texte en français", "fr"),
                FlavorTextEntry::new("English text", "en"),
            ],
            Some("forest"),
            false,
        );

        let pokemon = service(species_source_returning(record), MockTranslationSource::new())
            .get("pikachu")
            .await
            .unwrap();
        assert_eq!(pokemon.description, "English text");
    }

    #[tokio::test]
    async fn test_non_english_description_skips_translation() {
        let record = species(
            "pikachu",
            vec![FlavorTextEntry::new("Texte", "fr")],
            Some("cave"),
            true,
        );
        let mut translation_source = MockTranslationSource::new();
        translation_source.expect_translate().never();

        let pokemon = service(species_source_returning(record), translation_source)
            .get_translated("pikachu")
            .await
            .unwrap();
        assert_eq!(pokemon.description, "Texte");
    }

    #[tokio::test]
    async fn test_empty_language_entry_skips_translation() {
        let record = species("ghost", vec![FlavorTextEntry::default()], None, false);
        let mut translation_source = MockTranslationSource::new();
        translation_source.expect_translate().never();

        let pokemon = service(species_source_returning(record), translation_source)
            .get_translated("ghost")
            .await
            .unwrap();
        assert_eq!(pokemon.description, "");
    }

    #[rstest]
    #[case(Some("cave"), false, TranslationKind::Yoda)]
    #[case(Some("rare"), true, TranslationKind::Yoda)]
    #[case(Some("cave"), true, TranslationKind::Yoda)]
    #[case(Some("plains"), false, TranslationKind::Shakespeare)]
    #[case(None, false, TranslationKind::Shakespeare)]
    #[tokio::test]
    async fn test_translation_style_selection(
        #[case] habitat: Option<&str>,
        #[case] is_legendary: bool,
        #[case] expected: TranslationKind,
    ) {
        let record = species("zubat", english("X"), habitat, is_legendary);
        let mut translation_source = MockTranslationSource::new();
        translation_source
            .expect_translate()
            .withf(move |text: &str, kind: &TranslationKind| text == "X" && *kind == expected)
            .times(1)
            .returning(|_, _| Ok(TranslationResult::translated("Y")));

        let pokemon = service(species_source_returning(record), translation_source)
            .get_translated("zubat")
            .await
            .unwrap();
        assert_eq!(pokemon.description, "Y");
        assert_eq!(pokemon.is_legendary, is_legendary);
    }

    #[tokio::test]
    #[traced_test]
    async fn test_hard_translation_failure_keeps_original() {
        let record = species("onix", english("A rock snake"), Some("cave"), false);
        let mut translation_source = MockTranslationSource::new();
        translation_source
            .expect_translate()
            .returning(|_, _| Err(SourceError::http(429, "Too Many Requests")));

        let pokemon = service(species_source_returning(record), translation_source)
            .get_translated("onix")
            .await
            .unwrap();
        assert_eq!(pokemon.description, "A rock snake");
        assert_eq!(pokemon.habitat, "cave");
        assert!(logs_contain("Translation failed, keeping original description"));
    }

    #[tokio::test]
    #[traced_test]
    async fn test_soft_translation_failure_keeps_original() {
        let record = species("eevee", english("Adaptable"), Some("urban"), false);
        let mut translation_source = MockTranslationSource::new();
        translation_source
            .expect_translate()
            .times(1)
            .returning(|_, _| Ok(TranslationResult::default()));
        let lookup = service(species_source_returning(record), translation_source);

        for _ in 0..2 {
            let pokemon = lookup.get_translated("eevee").await.unwrap();
            assert_eq!(pokemon.description, "Adaptable");
        }
        assert!(logs_contain("Translation produced no result"));
    }
}
