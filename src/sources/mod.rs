//! Upstream data sources
//!
//! - [`pokeapi`]: species metadata over HTTP
//! - [`funtranslations`]: Yoda and Shakespeare rewrites over HTTP

pub mod funtranslations;
pub mod pokeapi;
pub mod traits;

pub use funtranslations::FunTranslationsSource;
pub use pokeapi::PokeApiSpeciesSource;
pub use traits::{SpeciesSource, TranslationSource};

#[cfg(test)]
pub use traits::{MockSpeciesSource, MockTranslationSource};
