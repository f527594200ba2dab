//! Shared response envelope types for API handlers.
//!
//! All API responses use a `{ "data": ... }` envelope. Use [`DataResponse`]
//! instead of ad-hoc `serde_json::json!({ "data": ... })`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}

/// `{ "data": T, "query": "..." }` envelope for filtered listings. `query` is
/// the canonical query string for the applied filters, without a leading `?`.
#[derive(Debug, Serialize)]
pub struct ListingResponse<T: Serialize> {
    pub data: T,
    pub query: String,
}
