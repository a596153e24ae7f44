// file: src/server/models.rs
// version: 1.0.0
// guid: b99f8f12-5247-4e43-bf11-1dad4b48c60a

//! JSON request and response bodies for the run endpoints

use crate::error::TransferError;
use crate::transfer::{Flags, Tool, TransferOutcome, TransferSpec};
use serde::{Deserialize, Serialize};

/// Body of `POST /rsync/run`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RsyncRunRequest {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub flags: Option<Flags>,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default)]
    pub use_wsl: bool,
    /// Seconds; absent or zero means the configured default
    #[serde(default)]
    pub timeout: Option<u64>,
}

/// Body of `POST /rclone/run`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RcloneRunRequest {
    #[serde(flatten)]
    pub common: RsyncRunRequest,
    #[serde(default)]
    pub config_path: Option<String>,
}

impl RsyncRunRequest {
    pub fn into_spec(self, tool: Tool) -> (TransferSpec, Option<u64>) {
        let spec = TransferSpec {
            tool,
            source: self.source.unwrap_or_default(),
            destination: self.destination.unwrap_or_default(),
            flags: self.flags,
            dry_run: self.dry_run,
            use_wsl: self.use_wsl,
            config_path: None,
            env: None,
        };
        (spec, self.timeout)
    }
}

impl RcloneRunRequest {
    pub fn into_spec(self) -> (TransferSpec, Option<u64>) {
        let (mut spec, timeout) = self.common.into_spec(Tool::Rclone);
        spec.config_path = self.config_path;
        (spec, timeout)
    }
}

/// Response for both endpoints.
///
/// Completed runs carry `returnCode`; failures carry `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_code: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub output: String,
}

impl RunResponse {
    pub fn failure(error: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            success: false,
            return_code: None,
            error: Some(error.into()),
            output: output.into(),
        }
    }
}

impl From<TransferOutcome> for RunResponse {
    fn from(outcome: TransferOutcome) -> Self {
        Self {
            success: outcome.success(),
            return_code: Some(outcome.return_code),
            error: None,
            output: outcome.output,
        }
    }
}

impl From<&TransferError> for RunResponse {
    fn from(err: &TransferError) -> Self {
        Self::failure(err.to_string(), err.partial_output())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rclone_request_flattens_common_fields() {
        let request: RcloneRunRequest = serde_json::from_value(json!({
            "source": "/local",
            "destination": "remote:bucket",
            "flags": "sync",
            "dry_run": true,
            "use_wsl": false,
            "config_path": "/etc/rclone.conf",
            "timeout": 60
        }))
        .unwrap();

        let (spec, timeout) = request.into_spec();
        assert_eq!(spec.tool, Tool::Rclone);
        assert_eq!(spec.source, "/local");
        assert_eq!(spec.config_path.as_deref(), Some("/etc/rclone.conf"));
        assert!(spec.dry_run);
        assert_eq!(timeout, Some(60));
    }

    #[test]
    fn test_missing_fields_default_to_empty() {
        let request: RsyncRunRequest = serde_json::from_value(json!({})).unwrap();
        let (spec, timeout) = request.into_spec(Tool::Rsync);

        assert!(spec.source.is_empty());
        assert!(spec.destination.is_empty());
        assert!(!spec.dry_run);
        assert_eq!(timeout, None);
    }

    #[test]
    fn test_failure_response_shape() {
        let value = serde_json::to_value(RunResponse::failure("boom", "")).unwrap();
        assert_eq!(value, json!({ "success": false, "error": "boom", "output": "" }));
    }

    #[test]
    fn test_completed_response_shape() {
        let response = RunResponse {
            success: true,
            return_code: Some(0),
            error: None,
            output: "done\n".to_string(),
        };
        let value = serde_json::to_value(response).unwrap();
        assert_eq!(value, json!({ "success": true, "returnCode": 0, "output": "done\n" }));
    }
}
