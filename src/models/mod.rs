//! Data models for the Pokedex Proxy
//!
//! Upstream payloads (species records, translation results) deserialize
//! directly into these types; the public entity is what the HTTP API
//! returns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// ISO 639 code of the only language translations are defined for
pub const ENGLISH_LANGUAGE_CODE: &str = "en";

/// Habitat name that always selects the Yoda translation
pub const CAVE_HABITAT: &str = "cave";

/// A named resource reference as returned by the species source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl NamedResource {
    pub fn named<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            url: None,
        }
    }
}

/// One localized description of a species
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    #[serde(rename = "flavor_text", default)]
    pub text: String,
    #[serde(default)]
    pub language: NamedResource,
    #[serde(default)]
    pub version: NamedResource,
}

impl FlavorTextEntry {
    pub fn new<T: Into<String>, L: Into<String>>(text: T, language_code: L) -> Self {
        Self {
            text: text.into(),
            language: NamedResource::named(language_code),
            version: NamedResource::default(),
        }
    }

    pub fn language_code(&self) -> &str {
        &self.language.name
    }
}

/// Species metadata fetched from the species source
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesRecord {
    pub name: String,
    #[serde(rename = "flavor_text_entries", default)]
    pub descriptions: Vec<FlavorTextEntry>,
    /// Absent or `null` upstream for species with no known habitat
    #[serde(default)]
    pub habitat: Option<NamedResource>,
    #[serde(default)]
    pub is_legendary: bool,
}

impl SpeciesRecord {
    /// Habitat name, empty when the species has none
    pub fn habitat_name(&self) -> &str {
        self.habitat.as_ref().map(|h| h.name.as_str()).unwrap_or("")
    }

    /// Pick the description to show for this species.
    ///
    /// Returns the first English entry; failing that the first entry in any
    /// language together with its language code; an empty list yields two
    /// empty strings.
    pub fn resolve_description(&self) -> ResolvedDescription<'_> {
        if let Some(entry) = self
            .descriptions
            .iter()
            .find(|entry| entry.language_code() == ENGLISH_LANGUAGE_CODE)
        {
            return ResolvedDescription {
                text: &entry.text,
                language_code: ENGLISH_LANGUAGE_CODE,
            };
        }

        match self.descriptions.first() {
            Some(entry) => ResolvedDescription {
                text: &entry.text,
                language_code: entry.language_code(),
            },
            None => ResolvedDescription {
                text: "",
                language_code: "",
            },
        }
    }
}

/// Description chosen for a species and the language it is written in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDescription<'a> {
    pub text: &'a str,
    pub language_code: &'a str,
}

impl ResolvedDescription<'_> {
    pub fn is_english(&self) -> bool {
        self.language_code == ENGLISH_LANGUAGE_CODE
    }
}

/// The two translation styles offered by the translation source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationKind {
    Yoda,
    Shakespeare,
}

impl TranslationKind {
    /// Style for a species: cave dwellers and legendaries get Yoda
    pub fn for_species(habitat: &str, is_legendary: bool) -> Self {
        if habitat == CAVE_HABITAT || is_legendary {
            Self::Yoda
        } else {
            Self::Shakespeare
        }
    }

    /// Endpoint path segment on the translation source
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::Yoda => "yoda.json",
            Self::Shakespeare => "shakespeare.json",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Yoda => "yoda",
            Self::Shakespeare => "shakespeare",
        }
    }
}

impl fmt::Display for TranslationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Request body sent to the translation source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationRequest {
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSuccess {
    #[serde(default)]
    pub total: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationContents {
    #[serde(default)]
    pub translated: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub translation: String,
}

/// Response of the translation source
///
/// `success.total == 0` means the call went through but produced no
/// translation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationResult {
    #[serde(default)]
    pub success: TranslationSuccess,
    #[serde(default)]
    pub contents: TranslationContents,
}

impl TranslationResult {
    pub fn translated<S: Into<String>>(text: S) -> Self {
        Self {
            success: TranslationSuccess { total: 1 },
            contents: TranslationContents {
                translated: text.into(),
                ..Default::default()
            },
        }
    }

    pub fn success_count(&self) -> u32 {
        self.success.total
    }

    pub fn translated_text(&self) -> &str {
        &self.contents.translated
    }

    pub fn is_success(&self) -> bool {
        self.success.total > 0
    }
}

/// The entity served by the lookup endpoints
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    pub description: String,
    pub habitat: String,
    pub is_legendary: bool,
}

impl Pokemon {
    pub fn from_species(species: &SpeciesRecord, description: impl Into<String>) -> Self {
        Self {
            name: species.name.clone(),
            description: description.into(),
            habitat: species.habitat_name().to_string(),
            is_legendary: species.is_legendary,
        }
    }
}
