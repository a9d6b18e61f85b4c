//! Run-fatal error types.
//!
//! Check-local failures never appear here: they become `failed` check
//! results. These errors abort a run and end up as its `error_message`.

/// Failures while obtaining the rendered page.
#[derive(thiserror::Error, Debug)]
pub enum FetchError {
    #[error("invalid URL `{url}`: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("failed to launch browser: {0:#}")]
    Launch(anyhow::Error),

    #[error("failed to open browser tab: {0:#}")]
    Context(anyhow::Error),

    #[error("failed to load {url}: {reason:#}")]
    Navigation { url: String, reason: anyhow::Error },

    #[error("failed to read page content: {0:#}")]
    Content(anyhow::Error),
}

/// Failures that abort a validation run.
#[derive(thiserror::Error, Debug)]
pub enum ValidatorError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to set up HTTP client: {0:#}")]
    Http(anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_underlying_text() {
        let err = ValidatorError::from(FetchError::Launch(anyhow::anyhow!("Chromium not found")));
        assert_eq!(err.to_string(), "failed to launch browser: Chromium not found");

        let parse = url::Url::parse("not a url").unwrap_err();
        let err = FetchError::InvalidUrl {
            url: "not a url".into(),
            source: parse,
        };
        assert!(err.to_string().starts_with("invalid URL `not a url`"));
    }
}
