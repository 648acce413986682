use std::path::Path;

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ClientError {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
    pub data: Option<Value>,
}

impl ClientError {
    pub fn new(code: &str, message: &str, recovery_steps: Vec<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            recovery_steps,
            data: None,
        }
    }

    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn invalid_argument(message: &str) -> Self {
        Self::invalid_argument_for_command(message, None)
    }

    pub fn invalid_argument_for_command(message: &str, command: Option<&str>) -> Self {
        let help_hint = match command {
            Some(cmd) => format!("Run `paydesk {cmd} --help` for usage."),
            None => "Run `paydesk --help` for usage.".to_string(),
        };
        let error = Self::new("invalid_argument", message, vec![help_hint]);
        if let Some(cmd) = command {
            return error.with_data(json!({
                "command_hint": cmd,
            }));
        }
        error
    }

    pub fn invalid_argument_with_recovery(message: &str, recovery_steps: Vec<String>) -> Self {
        Self::new("invalid_argument", message, recovery_steps)
    }

    pub fn invalid_setting(variable: &str, value: &str, expected: &str) -> Self {
        Self::new(
            "invalid_argument",
            &format!("`{variable}` has an unusable value `{value}`: expected {expected}."),
            vec![format!("Unset `{variable}` or set it to {expected}.")],
        )
        .with_data(json!({
            "setting": variable,
            "received": value,
        }))
    }

    pub fn source_unreadable(source: &str, detail: &str) -> Self {
        Self::new(
            "source_unreadable",
            &format!("Could not read records from `{source}`: {detail}"),
            vec![
                "Verify the path exists and is readable.".to_string(),
                "Pass `--data-dir` or the per-source `--payments-file`/`--merchants-file` flags."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn source_missing(path: &Path) -> Self {
        let location = path.display().to_string();
        Self::new(
            "source_unreadable",
            &format!("No record source found at `{location}`."),
            vec![
                format!("Save the backend response body to `{location}`."),
                "Or set `PAYDESK_DATA_DIR` to the directory holding `payments.json` and `merchants.json`."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "source": location,
        }))
    }

    pub fn source_malformed(source: &str, detail: &str) -> Self {
        Self::new(
            "source_malformed",
            &format!("Records from `{source}` are not a valid response envelope: {detail}"),
            vec![
                "Provide the raw `{status, message, data}` body returned by the backend."
                    .to_string(),
            ],
        )
        .with_data(json!({
            "source": source,
        }))
    }

    pub fn source_rejected(source: &str, status: i64, message: &str) -> Self {
        Self::new(
            "source_rejected",
            &format!("The backend answered `{source}` with status {status}: {message}"),
            vec!["Fetch the endpoint again and save a successful response.".to_string()],
        )
        .with_data(json!({
            "source": source,
            "status": status,
        }))
    }

    pub fn record_not_found(kind: &str, code: &str) -> Self {
        let command = match kind {
            "merchant" => "merchants",
            _ => "payments",
        };
        Self::new(
            "record_not_found",
            &format!("No {kind} with code `{code}` was found."),
            vec![format!(
                "Run `paydesk {command} --search <text>` to find a valid code."
            )],
        )
        .with_data(json!({
            "kind": kind,
            "code": code,
        }))
    }

    pub fn internal_serialization(message: &str) -> Self {
        Self::new("internal_serialization_error", message, Vec::new())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::ClientError;

    #[test]
    fn invalid_argument_for_command_carries_hint() {
        let error = ClientError::invalid_argument_for_command("bad page", Some("payments"));
        assert_eq!(error.code, "invalid_argument");
        assert_eq!(
            error.recovery_steps,
            vec!["Run `paydesk payments --help` for usage.".to_string()]
        );
        assert!(error.data.is_some());
        if let Some(data) = error.data {
            assert_eq!(
                data["command_hint"],
                Value::String("payments".to_string())
            );
        }
    }

    #[test]
    fn record_not_found_points_to_matching_listing() {
        let error = ClientError::record_not_found("merchant", "M999");
        assert_eq!(error.code, "record_not_found");
        assert!(error.recovery_steps[0].contains("paydesk merchants"));
    }
}
