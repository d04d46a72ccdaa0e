//! Upstream source trait definitions
//!
//! Each upstream the service depends on sits behind one small trait so the
//! HTTP implementations can be swapped for in-process fakes in tests.

use async_trait::async_trait;

use crate::errors::SourceResult;
use crate::models::{SpeciesRecord, TranslationKind, TranslationResult};

/// A component that can fetch a species record by name
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeciesSource: Send + Sync {
    /// Fetch the record for `name`.
    ///
    /// Transport, status and decode failures are all reported as
    /// [`SourceError`](crate::errors::SourceError).
    async fn fetch_species(&self, name: &str) -> SourceResult<SpeciesRecord>;
}

/// A component that can rewrite text in one of the translation styles
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Translate `text` into style `kind`.
    ///
    /// A returned result with a zero success count is a soft failure and is
    /// not an `Err`.
    async fn translate(&self, text: &str, kind: TranslationKind) -> SourceResult<TranslationResult>;
}
