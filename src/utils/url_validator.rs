//! Destination URL validation.

use url::Url;

/// Longest destination URL accepted, in bytes.
pub const MAX_URL_LENGTH: usize = 2048;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("URL exceeds {MAX_URL_LENGTH} bytes")]
    TooLong,

    #[error("Malformed URL: {0}")]
    Malformed(String),

    #[error("Only http and https URLs can be shortened, got '{0}'")]
    UnsupportedScheme(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute http(s) URL and returns its canonical form.
///
/// Parsing lowercases the host and drops default ports; the fragment is
/// removed because it never reaches the destination server anyway.
///
/// # Errors
///
/// See [`UrlValidationError`].
///
/// # Examples
///
/// ```
/// use shortr::utils::url_validator::validate_target_url;
///
/// assert_eq!(
///     validate_target_url("HTTPS://Example.COM:443/a#top").unwrap(),
///     "https://example.com/a"
/// );
/// assert!(validate_target_url("javascript:alert(1)").is_err());
/// ```
pub fn validate_target_url(input: &str) -> Result<String, UrlValidationError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UrlValidationError::Empty);
    }
    if input.len() > MAX_URL_LENGTH {
        return Err(UrlValidationError::TooLong);
    }

    let mut url = Url::parse(input).map_err(|e| UrlValidationError::Malformed(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlValidationError::UnsupportedScheme(url.scheme().to_string()));
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    url.set_fragment(None);

    Ok(url.into())
}
