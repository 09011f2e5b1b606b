use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SweepError;

/// A content digest, e.g. `sha256:8f3b...`. Unique per manifest within a
/// repository; used verbatim in report lines.
#[derive(Clone, Debug, Hash, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct Digest {
    pub algo: String,
    pub hash: String,
}

impl FromStr for Digest {
    type Err = SweepError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s.to_string())
    }
}

impl TryFrom<String> for Digest {
    type Error = SweepError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once(':') {
            Some((algo, hash))
                if !algo.is_empty()
                    && !hash.is_empty()
                    && algo
                        .chars()
                        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
                    && hash
                        .chars()
                        .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)) =>
            {
                Ok(Digest {
                    algo: algo.to_string(),
                    hash: hash.to_string(),
                })
            }
            _ => Err(SweepError::InvalidDigest(value)),
        }
    }
}

impl From<Digest> for String {
    fn from(digest: Digest) -> Self {
        format!("{digest}")
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.algo, self.hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_str() {
        let digest: Digest = "sha256:abcdef0123".parse().unwrap();
        assert_eq!(digest.algo, "sha256");
        assert_eq!(digest.hash, "abcdef0123");
    }

    #[test]
    fn to_str() {
        let digest: Digest = "sha256:abcdef0123".parse().unwrap();
        assert_eq!(digest.to_string(), "sha256:abcdef0123");
    }

    #[test]
    fn rejects_missing_algo() {
        assert!("abcdef0123".parse::<Digest>().is_err());
        assert!(":abcdef0123".parse::<Digest>().is_err());
    }

    #[test]
    fn rejects_uppercase_hex() {
        assert!("sha256:ABCDEF".parse::<Digest>().is_err());
    }

    #[test]
    fn from_json() {
        let parsed: Digest = serde_json::from_str(r#""sha256:00ff""#).unwrap();
        let digest: Digest = "sha256:00ff".parse().unwrap();
        assert_eq!(parsed, digest);
    }

    #[test]
    fn to_json() {
        let digest: Digest = "sha256:00ff".parse().unwrap();
        assert_eq!(serde_json::to_string(&digest).unwrap(), r#""sha256:00ff""#);
    }
}
