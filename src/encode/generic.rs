//! Generic nested encoder.
//!
//! Serializes the resolved query together with its result as a structural
//! object graph mirroring the data model 1:1. No special-casing.

use serde::Serialize;

use crate::executor::TabularResult;
use crate::translate::ResolvedQuery;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Envelope<'a> {
    query: &'a ResolvedQuery<'a>,
    result: &'a TabularResult,
}

/// Encode a query/result pairing. A `None` result propagates as `None`.
pub fn encode(
    query: &ResolvedQuery<'_>,
    result: Option<&TabularResult>,
) -> Result<Option<String>, serde_json::Error> {
    match result {
        Some(result) => Ok(Some(serde_json::to_string(&Envelope { query, result })?)),
        None => Ok(None),
    }
}
