//! URL utilities for consistent URL handling
//!
//! Upstream base URLs come from configuration and may or may not end in a
//! slash; these helpers make endpoint construction independent of that.

use url::Url;

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Parse and validate an absolute http(s) URL
    pub fn parse_and_validate(url: &str) -> Result<Url, String> {
        let parsed = Url::parse(url.trim()).map_err(|e| format!("{url}: {e}"))?;
        match parsed.scheme() {
            "http" | "https" => Ok(parsed),
            other => Err(format!("{url}: unsupported scheme '{other}'")),
        }
    }

    /// Append a single path segment to `base`.
    ///
    /// `base` is treated as a directory whether or not it carries a trailing
    /// slash, so `http://h/api` and `http://h/api/` both yield
    /// `http://h/api/<segment>`.
    ///
    /// ```rust
    /// use pokedex_proxy::utils::url::UrlUtils;
    ///
    /// assert_eq!(
    ///     UrlUtils::join("http://example.com/api", "mewtwo").unwrap(),
    ///     "http://example.com/api/mewtwo"
    /// );
    /// ```
    pub fn join(base: &str, segment: &str) -> Result<String, String> {
        let mut parsed = Self::parse_and_validate(base)?;
        parsed
            .path_segments_mut()
            .map_err(|_| format!("{base}: cannot be a base URL"))?
            .pop_if_empty()
            .push(segment);
        Ok(parsed.to_string())
    }
}
