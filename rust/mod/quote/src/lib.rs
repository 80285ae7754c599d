pub mod api;
pub mod calculator;
pub mod client;
pub mod flow;
pub mod form;
pub mod model;
pub mod schema;
pub mod store;

use std::sync::Arc;

use axum::Router;
use cover_core::Module;
use cover_kv::KVStore;

use store::SubmissionStore;

/// The Quote module: the Submission Sink's HTTP surface over a KV store.
///
/// The calculator, form parsing and the client flow live in this crate too so
/// server and client agree on one payload shape.
pub struct QuoteModule {
    store: Arc<SubmissionStore>,
}

impl QuoteModule {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self {
            store: Arc::new(SubmissionStore::new(kv)),
        }
    }

    pub fn store(&self) -> &Arc<SubmissionStore> {
        &self.store
    }
}

impl Module for QuoteModule {
    fn name(&self) -> &str {
        "quote"
    }

    fn routes(&self) -> Router {
        api::router(Arc::clone(&self.store))
    }
}
