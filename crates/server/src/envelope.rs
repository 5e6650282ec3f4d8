//! Success half of the response envelope.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// List envelope, echoing the effective page and limit.
#[derive(Debug, Serialize)]
pub struct PageEnvelope<T> {
    pub message: &'static str,
    pub data: Vec<T>,
    pub page: u64,
    pub limit: u64,
}

pub fn ok<T: Serialize>(message: &'static str, data: T) -> Json<Envelope<T>> {
    Json(Envelope { message, data: Some(data) })
}

pub fn done(message: &'static str) -> Json<Envelope<()>> {
    Json(Envelope { message, data: None })
}
