//! Service layer
//!
//! Cache-backed upstream clients and the lookup service that ties them
//! together for the HTTP handlers.

pub mod lookup;
pub mod species;
pub mod translation;

pub use lookup::LookupService;
pub use species::SpeciesClient;
pub use translation::TranslationClient;
