//! API models for request and response payloads

use serde::Serialize;

pub mod caption;
pub mod session;
pub mod template;

/// Uniform success envelope wrapping every response payload
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> ApiResponse<T> {
    /// Wrap a payload in a successful envelope
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Payload for list operations
#[derive(Debug, Serialize)]
pub struct ListPayload<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> ListPayload<T> {
    /// Build a list payload; total is the full item count (no pagination)
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len() as i64;
        Self { items, total }
    }
}
