/*!
 * Tests for error types and conversions
 */

use panelwise::errors::{ConfigError, ProviderError, TermParseError};

/// Test provider error messages
#[test]
fn test_provider_error_display_shouldIncludeDetails() {
    let error = ProviderError::ApiError {
        status_code: 503,
        message: "overloaded".to_string(),
    };
    assert_eq!(error.to_string(), "API responded with error: 503 - overloaded");

    let error = ProviderError::EmptyResponse("no candidates".to_string());
    assert_eq!(error.to_string(), "API returned no content: no candidates");
}

/// Test config error messages
#[test]
fn test_config_error_display_shouldNameTheVariable() {
    let error = ConfigError::MissingCredential {
        var_name: "GOOGLE_API_KEY".to_string(),
    };
    assert!(error.to_string().contains("GOOGLE_API_KEY"));
}

/// Test that provider errors keep their message through anyhow
#[test]
fn test_provider_error_throughAnyhow_shouldKeepMessage() {
    let error = anyhow::Error::from(ProviderError::RateLimitExceeded("quota".to_string()));
    assert!(format!("{:#}", error).contains("quota"));
}

/// Test term parse error messages
#[test]
fn test_term_parse_error_display_shouldDescribeProblem() {
    assert_eq!(TermParseError::Empty.to_string(), "response was empty");
    assert_eq!(
        TermParseError::NotAnObject("an array").to_string(),
        "expected a JSON object, got an array"
    );
}
