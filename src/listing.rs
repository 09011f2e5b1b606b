//! Wire model for the `tags/list` listing extension: per-digest manifest
//! metadata (tags, upload time) plus the child repositories used by the
//! recursive walk. Timestamps arrive as quoted millisecond strings.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::digest::Digest;

/// Metadata for one manifest digest within a repository. Read-only; the
/// registry is the source of truth.
#[derive(Clone, Debug, Deserialize)]
pub struct ManifestSummary {
    #[serde(rename = "mediaType", default)]
    pub media_type: String,
    #[serde(rename = "imageSizeBytes", default, with = "quoted_u64")]
    pub size: u64,
    #[serde(rename = "tag", default)]
    pub tags: Vec<String>,
    #[serde(rename = "timeCreatedMs", with = "millis")]
    pub created: DateTime<Utc>,
    #[serde(rename = "timeUploadedMs", with = "millis")]
    pub uploaded: DateTime<Utc>,
}

/// A repository's full manifest set at one point in time. Fetched fresh per
/// repository per invocation, never cached.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TagListing {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "manifest", default)]
    pub manifests: HashMap<Digest, ManifestSummary>,
    #[serde(rename = "child", default)]
    pub children: Vec<String>,
}

mod millis {
    use chrono::{DateTime, TimeZone, Utc};
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let ms: i64 = raw.parse().map_err(serde::de::Error::custom)?;
        Utc.timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| serde::de::Error::custom(format!("timestamp out of range: {raw}")))
    }
}

mod quoted_u64 {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
