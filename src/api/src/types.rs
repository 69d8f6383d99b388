//! Response bodies for the WNBA API.

use serde::Serialize;

use crate::storage::Row;

/// Envelope for every successful schedule lookup
#[derive(Debug, Serialize)]
pub struct ScheduleResponse {
    pub message: &'static str,
    pub data: Vec<Row>,
}

impl ScheduleResponse {
    pub fn success(data: Vec<Row>) -> Self {
        Self {
            message: "success",
            data,
        }
    }
}

/// Error body shared by both sub-APIs
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Only play-by-play execution failures carry details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub stores: StoreStatus,
}

#[derive(Debug, Serialize)]
pub struct StoreStatus {
    pub plays: bool,
    pub schedule: bool,
}
