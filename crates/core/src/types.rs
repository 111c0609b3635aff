/// Portfolio record identifiers are opaque strings assigned by the backing store.
pub type ImageId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
