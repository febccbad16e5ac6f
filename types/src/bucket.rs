use serde::{Deserialize, Serialize};

use crate::response::{FieldError, RepoFields, optional};

/// Bucket name used by the production and performance stacks.
pub const PRODUCTION_BUCKET: &str = "mogilefs-prod-repo";
/// Bucket name used by every other stack.
pub const DEVELOPMENT_BUCKET: &str = "corpus";
/// Hosts that serve [PRODUCTION_BUCKET], as `host:port`.
pub const PRODUCTION_HOSTS: [&str; 2] = [
    "sfo-perf-plosrepo01.int.plos.org:8002",
    "rwc-prod-plosrepo.int.plos.org:8002",
];
/// A bucket as reported by the repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub bucket_name: String,
    #[serde(rename = "bucketID", skip_serializing_if = "Option::is_none")]
    pub bucket_id: Option<i64>,
    pub creation_date: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_objects: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_objects: Option<u64>,
}
impl TryFrom<&RepoFields> for Bucket {
    type Error = FieldError;

    fn try_from(fields: &RepoFields) -> Result<Self, Self::Error> {
        Ok(Self {
            bucket_name: fields.bucket_name()?.to_owned(),
            bucket_id: optional(fields.bucket_id())?,
            creation_date: fields.creation_date()?.to_owned(),
            timestamp: fields.timestamp()?.to_owned(),
            active_objects: optional(fields.active_objects())?,
            total_objects: optional(fields.total_objects())?,
        })
    }
}
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRule {
    /// `host` or `host:port` of the repository base URL
    pub authority: String,
    pub bucket: String,
}
/// Picks the default bucket for a repository by the authority of its base URL.
///
/// Rules are checked in order. The first rule whose authority matches wins,
/// otherwise the fallback is used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultBucketTable {
    pub rules: Vec<BucketRule>,
    pub fallback: String,
}
impl Default for DefaultBucketTable {
    fn default() -> Self {
        Self {
            rules: PRODUCTION_HOSTS
                .iter()
                .map(|authority| BucketRule {
                    authority: authority.to_string(),
                    bucket: PRODUCTION_BUCKET.to_owned(),
                })
                .collect(),
            fallback: DEVELOPMENT_BUCKET.to_owned(),
        }
    }
}
impl DefaultBucketTable {
    /// An empty table that always answers `fallback`
    pub fn with_fallback(fallback: impl Into<String>) -> Self {
        Self {
            rules: Vec::new(),
            fallback: fallback.into(),
        }
    }
    /// Adds a rule ahead of the existing ones so it overrides them.
    pub fn with_rule(mut self, authority: impl Into<String>, bucket: impl Into<String>) -> Self {
        self.rules.insert(
            0,
            BucketRule {
                authority: authority.into(),
                bucket: bucket.into(),
            },
        );
        self
    }
    pub fn resolve(&self, authority: &str) -> &str {
        self.rules
            .iter()
            .find(|rule| rule.authority.eq_ignore_ascii_case(authority))
            .map(|rule| rule.bucket.as_str())
            .unwrap_or(&self.fallback)
    }
}
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn production_hosts() {
        let table = DefaultBucketTable::default();
        assert_eq!(
            table.resolve("sfo-perf-plosrepo01.int.plos.org:8002"),
            PRODUCTION_BUCKET
        );
        assert_eq!(
            table.resolve("rwc-prod-plosrepo.int.plos.org:8002"),
            PRODUCTION_BUCKET
        );
    }
    #[test]
    fn everything_else_is_corpus() {
        let table = DefaultBucketTable::default();
        for authority in [
            "localhost:8080",
            "rwc-prod-plosrepo.int.plos.org",
            "rwc-prod-plosrepo.int.plos.org:8003",
            "",
        ] {
            assert_eq!(table.resolve(authority), DEVELOPMENT_BUCKET, "{authority}");
        }
    }
    #[test]
    fn overrides() {
        let table = DefaultBucketTable::default()
            .with_rule("rwc-prod-plosrepo.int.plos.org:8002", "other-bucket");
        assert_eq!(
            table.resolve("rwc-prod-plosrepo.int.plos.org:8002"),
            "other-bucket"
        );
        let table = DefaultBucketTable::with_fallback("scratch");
        assert_eq!(table.resolve("sfo-perf-plosrepo01.int.plos.org:8002"), "scratch");
    }
    #[test]
    fn bucket_from_fields() {
        let fields = |value: serde_json::Value| match value {
            serde_json::Value::Object(map) => RepoFields::from(map),
            _ => unreachable!(),
        };
        let bucket = Bucket::try_from(&fields(serde_json::json!({
            "bucketName": "corpus",
            "creationDate": "2014-09-10",
            "timestamp": "2014-09-10",
            "activeObjects": 3
        })))
        .unwrap();
        assert_eq!(bucket.bucket_name, "corpus");
        assert_eq!(bucket.bucket_id, None);
        assert_eq!(bucket.active_objects, Some(3));

        let incomplete = fields(serde_json::json!({"bucketName": "corpus"}));
        assert_eq!(
            Bucket::try_from(&incomplete),
            Err(crate::response::MissingField::new("creationDate").into())
        );
        let odd_id = fields(serde_json::json!({
            "bucketName": "corpus",
            "bucketID": "7",
            "creationDate": "2014-09-10",
            "timestamp": "2014-09-10"
        }));
        assert!(matches!(
            Bucket::try_from(&odd_id),
            Err(FieldError::WrongType { field: "bucketID", .. })
        ));
    }
}
