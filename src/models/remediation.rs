use serde::{Deserialize, Serialize};

/// Body of `POST /kill_process`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KillRequest {
    pub pid: u32,
}

/// Backend answer to a termination request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KillResponse {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub closed_pid: Option<i64>,
    #[serde(default)]
    pub closed_name: Option<String>,
    /// Memory held by the closed process, in megabytes
    #[serde(default)]
    pub closed_memory: Option<f64>,
}
