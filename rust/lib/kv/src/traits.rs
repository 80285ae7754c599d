use crate::error::KVError;

/// KVStore is the append-only document storage behind the service.
///
/// Keys follow a namespaced convention: `quote:submission:<id>`.
/// Values are opaque bytes; callers store serialized JSON documents.
/// Nothing in the service updates or deletes a written key.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Write a new key. Returns KVError::AlreadyExists and leaves the stored
    /// value untouched if the key is already present.
    fn insert(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Count the keys matching a prefix.
    fn count(&self, prefix: &str) -> Result<usize, KVError>;
}
