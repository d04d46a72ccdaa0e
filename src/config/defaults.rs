/// Configuration default values
///
/// This module contains all the default values for configuration options,
/// making them easily changeable in one central location.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_SHUTDOWN_GRACE_PERIOD_SECS: u64 = 5;

// Upstream defaults
pub const DEFAULT_SPECIES_BASE_URL: &str = "https://pokeapi.co/api/v2/pokemon-species/";
pub const DEFAULT_TRANSLATION_BASE_URL: &str = "https://api.funtranslations.com/translate/";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 3;

// Cache defaults
pub const DEFAULT_CACHE_TRANSLATIONS: bool = true;
