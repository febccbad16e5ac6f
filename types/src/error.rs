use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Numeric error codes returned by the repository in the `repoErrorCode` field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RepoErrorCode {
    ServerError,
    ObjectNotFound,
    BucketNotFound,
    NoBucketEntered,
    NoKeyEntered,
    NoVersionEntered,
    NoCreationMethodEntered,
    InvalidCreationMethod,
    CouldNotParseTimestamp,
    InvalidOffset,
    InvalidLimit,
    IllegalBucketName,
    ObjectDataEmpty,
    InvalidVersionParameter,
    CantDeleteNonEmptyBucket,
    CantCreateNewObjectWithUsedKey,
    CantCreateVersionWithNoOrig,
    BucketAlreadyExists,
    /// A code this client does not know about yet.
    Other(u32),
}
impl RepoErrorCode {
    const TABLE: [(u32, RepoErrorCode); 18] = [
        (0, RepoErrorCode::ServerError),
        (1, RepoErrorCode::ObjectNotFound),
        (2, RepoErrorCode::BucketNotFound),
        (10, RepoErrorCode::NoBucketEntered),
        (11, RepoErrorCode::NoKeyEntered),
        (12, RepoErrorCode::NoVersionEntered),
        (13, RepoErrorCode::NoCreationMethodEntered),
        (14, RepoErrorCode::InvalidCreationMethod),
        (15, RepoErrorCode::CouldNotParseTimestamp),
        (16, RepoErrorCode::InvalidOffset),
        (17, RepoErrorCode::InvalidLimit),
        (18, RepoErrorCode::IllegalBucketName),
        (19, RepoErrorCode::ObjectDataEmpty),
        (20, RepoErrorCode::InvalidVersionParameter),
        (50, RepoErrorCode::CantDeleteNonEmptyBucket),
        (51, RepoErrorCode::CantCreateNewObjectWithUsedKey),
        (52, RepoErrorCode::CantCreateVersionWithNoOrig),
        (53, RepoErrorCode::BucketAlreadyExists),
    ];
    pub fn from_code(code: u32) -> Self {
        Self::TABLE
            .iter()
            .find(|(value, _)| *value == code)
            .map(|(_, error)| *error)
            .unwrap_or(RepoErrorCode::Other(code))
    }
    pub fn code(&self) -> u32 {
        if let RepoErrorCode::Other(code) = self {
            return *code;
        }
        Self::TABLE
            .iter()
            .find(|(_, error)| error == self)
            .map(|(value, _)| *value)
            .unwrap_or_default()
    }
    /// The message the repository sends along with the code.
    pub fn default_message(&self) -> &'static str {
        match self {
            RepoErrorCode::ServerError => "Server error",
            RepoErrorCode::ObjectNotFound => "Object not found",
            RepoErrorCode::BucketNotFound => "Bucket not found",
            RepoErrorCode::NoBucketEntered => "No bucket entered",
            RepoErrorCode::NoKeyEntered => "No object key entered",
            RepoErrorCode::NoVersionEntered => "No object version entered",
            RepoErrorCode::NoCreationMethodEntered => "No creation method entered",
            RepoErrorCode::InvalidCreationMethod => "Invalid creation method",
            RepoErrorCode::CouldNotParseTimestamp => "Could not parse timestamp",
            RepoErrorCode::InvalidOffset => "Invalid offset",
            RepoErrorCode::InvalidLimit => "Invalid limit",
            RepoErrorCode::IllegalBucketName => "Bucket name contains illegal characters",
            RepoErrorCode::ObjectDataEmpty => "Object data must be non-empty",
            RepoErrorCode::InvalidVersionParameter => "Invalid version parameter",
            RepoErrorCode::CantDeleteNonEmptyBucket => {
                "Can not delete bucket since it contains objects"
            }
            RepoErrorCode::CantCreateNewObjectWithUsedKey => {
                "Can not create an object with a key that already exists"
            }
            RepoErrorCode::CantCreateVersionWithNoOrig => {
                "Can not version an object that does not exist"
            }
            RepoErrorCode::BucketAlreadyExists => "Bucket already exists",
            RepoErrorCode::Other(_) => "Unknown repository error",
        }
    }
}
impl From<u32> for RepoErrorCode {
    fn from(code: u32) -> Self {
        Self::from_code(code)
    }
}
impl Display for RepoErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.default_message(), self.code())
    }
}
impl Serialize for RepoErrorCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u32(self.code())
    }
}
impl<'de> Deserialize<'de> for RepoErrorCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u32::deserialize(deserializer)?;
        Ok(Self::from_code(code))
    }
}
