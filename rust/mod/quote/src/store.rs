use std::sync::Arc;

use cover_core::{new_id, now_rfc3339, ServiceError};
use cover_kv::KVStore;
use serde_json::Value;

use crate::model::Submission;
use crate::schema::{self, SubmissionFields};

/// Key prefix of submission documents.
pub const SUBMISSION_PREFIX: &str = "quote:submission:";

fn submission_key(id: &str) -> String {
    format!("{SUBMISSION_PREFIX}{id}")
}

/// Append-only log of form submissions, backed by a KVStore.
pub struct SubmissionStore {
    kv: Arc<dyn KVStore>,
}

impl SubmissionStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    /// Cast a submitted document onto the schema and append it.
    ///
    /// Every call writes a new record under a fresh id; identical bodies are
    /// stored twice.
    pub fn submit(&self, body: &Value) -> Result<Submission, ServiceError> {
        let fields = schema::cast(body).map_err(|e| ServiceError::Validation(e.to_string()))?;
        let record = new_record(new_id(), fields);

        let data =
            serde_json::to_vec(&record).map_err(|e| ServiceError::Internal(e.to_string()))?;
        self.kv
            .insert(&submission_key(&record.id), &data)
            .map_err(|e| ServiceError::Storage(e.to_string()))?;

        Ok(record)
    }

    /// Get a submission by id.
    pub fn get(&self, id: &str) -> Result<Option<Submission>, ServiceError> {
        let Some(data) = self
            .kv
            .get(&submission_key(id))
            .map_err(|e| ServiceError::Storage(e.to_string()))?
        else {
            return Ok(None);
        };
        let record =
            serde_json::from_slice(&data).map_err(|e| ServiceError::Internal(e.to_string()))?;
        Ok(Some(record))
    }

    /// Number of stored submissions.
    pub fn count(&self) -> Result<usize, ServiceError> {
        self.kv
            .count(SUBMISSION_PREFIX)
            .map_err(|e| ServiceError::Storage(e.to_string()))
    }
}

fn new_record(id: String, fields: SubmissionFields) -> Submission {
    Submission {
        id,
        name: fields.name,
        age: fields.age,
        city: fields.city,
        income: fields.income,
        dependents: fields.dependents,
        cover: fields.cover,
        premium: fields.premium,
        created_at: fields.created_at.unwrap_or_else(now_rfc3339),
    }
}

#[cfg(test)]
mod tests {
    use cover_kv::RedbStore;
    use serde_json::json;

    use super::*;

    fn make_store() -> (SubmissionStore, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let kv: Arc<dyn KVStore> = Arc::new(RedbStore::open(&dir.path().join("quote.redb")).unwrap());
        (SubmissionStore::new(kv), dir)
    }

    #[test]
    fn submit_persists_record() {
        let (store, _dir) = make_store();
        let record = store
            .submit(&json!({
                "name": "Asha", "age": "34", "city": "Pune",
                "income": "500000", "dependents": "2", "cover": 800000, "premium": 7200
            }))
            .unwrap();

        assert_eq!(record.id.len(), 32);
        assert!(chrono::DateTime::parse_from_rfc3339(&record.created_at).is_ok());
        assert_eq!(store.count().unwrap(), 1);

        let stored = store.get(&record.id).unwrap().unwrap();
        assert_eq!(stored, record);
        assert_eq!(stored.income, Some(500000.0));
        assert_eq!(stored.cover, Some(800000.0));
    }

    #[test]
    fn repeated_submissions_are_independent() {
        let (store, _dir) = make_store();
        let body = json!({"name": "Asha", "cover": 1, "premium": 0});
        let a = store.submit(&body).unwrap();
        let b = store.submit(&body).unwrap();

        assert_ne!(a.id, b.id);
        assert_eq!(store.count().unwrap(), 2);
    }

    #[test]
    fn missing_fields_stored_as_absent() {
        let (store, _dir) = make_store();
        let record = store.submit(&json!({"city": "Goa"})).unwrap();

        let raw = store.kv.get(&submission_key(&record.id)).unwrap().unwrap();
        let doc: Value = serde_json::from_slice(&raw).unwrap();
        let obj = doc.as_object().unwrap();
        assert_eq!(obj.get("city"), Some(&json!("Goa")));
        assert!(obj.get("name").is_none());
        assert!(obj.get("premium").is_none());
        assert!(obj.contains_key("createdAt"));
    }

    #[test]
    fn client_created_at_is_kept() {
        let (store, _dir) = make_store();
        let record = store
            .submit(&json!({"name": "A", "createdAt": "2026-01-02T03:04:05Z"}))
            .unwrap();
        assert_eq!(record.created_at, "2026-01-02T03:04:05.000Z");
    }

    #[test]
    fn cast_failure_writes_nothing() {
        let (store, _dir) = make_store();
        let err = store.submit(&json!({"age": "abc"})).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn get_unknown_id() {
        let (store, _dir) = make_store();
        assert_eq!(store.get("nope").unwrap(), None);
    }
}
