use reqwest::StatusCode;
use thiserror::Error;

/// Everything that can stop a sweep. Transport and registry failures are
/// surfaced verbatim and never retried.
#[derive(Debug, Error)]
pub enum SweepError {
    #[error("invalid repository reference {reference:?}: {reason}")]
    InvalidReference { reference: String, reason: String },

    #[error("invalid digest {0:?}")]
    InvalidDigest(String),

    #[error("invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{repository}: registry returned {status}: {body}")]
    Registry {
        repository: String,
        status: StatusCode,
        body: String,
    },

    #[error("failed to write report line: {0}")]
    Output(#[from] std::io::Error),
}
