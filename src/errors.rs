/*!
 * Error types for the panelwise application.
 *
 * This module contains custom error types for the provider seam, the
 * configuration layer and the term-response parser, using the thiserror
 * crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with the generation API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// The API answered but produced no usable text
    #[error("API returned no content: {0}")]
    EmptyResponse(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors raised while building the runtime configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The API credential is not present in the environment
    #[error("Missing API credential: set the {var_name} environment variable (or add it to .env)")]
    MissingCredential {
        /// Name of the environment variable that was checked
        var_name: String,
    },

    /// A configuration value failed validation
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue {
        field: &'static str,
        reason: String,
    },

    /// The configuration file could not be read or parsed
    #[error("Failed to load config file {path}: {message}")]
    LoadFailed { path: String, message: String },
}

/// Reasons a term-extraction response could not be turned into new terms
#[derive(Error, Debug, PartialEq)]
pub enum TermParseError {
    /// Nothing left after stripping code fences and whitespace
    #[error("response was empty")]
    Empty,

    /// The payload is not valid JSON
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    /// Valid JSON, but not a flat object
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
}
