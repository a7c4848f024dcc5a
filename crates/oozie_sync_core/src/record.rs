use serde::Deserialize;

use crate::timestamp::{null_as_default, nullable_rfc822, Instant};

/// One workflow execution as reported by the job listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Record {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(rename = "appName", default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(rename = "createdTime", default, deserialize_with = "nullable_rfc822")]
    pub created_at: Option<Instant>,
    #[serde(rename = "lastModTime", default, deserialize_with = "nullable_rfc822")]
    pub last_modified_at: Option<Instant>,
    #[serde(rename = "endTime", default, deserialize_with = "nullable_rfc822")]
    pub ended_at: Option<Instant>,
}

/// The full job listing returned by one source call.
///
/// `total`, `returned` and `offset` are informational; selection never reads them.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RecordSet {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total: u64,
    #[serde(rename = "workflows", default, deserialize_with = "null_as_default")]
    pub records: Vec<Record>,
    #[serde(rename = "len", default, deserialize_with = "null_as_default")]
    pub returned: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub offset: u64,
}

impl RecordSet {
    pub fn from_json(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
