use serde::{Deserialize, Serialize};

use crate::calculator::Quote;

/// A validated quote request, produced by [`crate::form::QuoteForm::parse`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRequest {
    pub name: String,
    pub age: u32,
    pub city: String,
    /// Annual income.
    pub income: f64,
    pub dependents: u32,
}

/// Body the client posts to `POST /api/submit`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionPayload {
    pub name: String,
    pub age: u32,
    pub city: String,
    pub income: f64,
    pub dependents: u32,
    pub cover: i64,
    pub premium: i64,
}

impl SubmissionPayload {
    pub fn new(request: &QuoteRequest, quote: &Quote) -> Self {
        Self {
            name: request.name.clone(),
            age: request.age,
            city: request.city.clone(),
            income: request.income,
            dependents: request.dependents,
            cover: quote.cover,
            premium: quote.premium,
        }
    }
}

/// A persisted form submission. Written once, never updated or deleted.
///
/// Every user field is optional: the sink stores whatever subset of the
/// schema the client sent. Numbers are kept as f64 because the schema types
/// them as plain numbers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependents: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub premium: Option<f64>,

    /// RFC 3339 insert time.
    pub created_at: String,
}
