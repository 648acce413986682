use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::API_VERSION;
use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Serialize)]
pub struct SuccessEnvelope {
    pub ok: bool,
    pub command: String,
    pub version: String,
    pub data: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureEnvelope {
    pub ok: bool,
    pub error: ErrorContract,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorContract {
    pub code: String,
    pub message: String,
    pub recovery_steps: Vec<String>,
}

/// Response body shape shared by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub status: i64,
    #[serde(default)]
    pub message: String,
    pub data: Option<T>,
}

pub fn success<T>(command: &str, data: T) -> ClientResult<SuccessEnvelope>
where
    T: Serialize,
{
    let json_data = serde_json::to_value(data)
        .map_err(|err| ClientError::internal_serialization(&err.to_string()))?;
    Ok(SuccessEnvelope {
        ok: true,
        command: command.to_string(),
        version: API_VERSION.to_string(),
        data: json_data,
    })
}

pub fn failure_from_error(error: &ClientError) -> FailureEnvelope {
    FailureEnvelope {
        ok: false,
        error: ErrorContract {
            code: error.code.clone(),
            message: error.message.clone(),
            recovery_steps: error.recovery_steps.clone(),
        },
        data: error.data.clone(),
    }
}

/// Decodes a backend envelope and unwraps its `data` payload.
///
/// Any status outside 2xx is a rejected fetch, and a missing `data` field on a
/// successful status is treated as malformed rather than as an empty list.
pub fn unwrap_api_envelope<T>(source: &str, body: &str) -> ClientResult<T>
where
    T: DeserializeOwned,
{
    let envelope: ApiEnvelope<T> = serde_json::from_str(body)
        .map_err(|error| ClientError::source_malformed(source, &error.to_string()))?;

    if !(200..300).contains(&envelope.status) {
        return Err(ClientError::source_rejected(
            source,
            envelope.status,
            &envelope.message,
        ));
    }

    envelope
        .data
        .ok_or_else(|| ClientError::source_malformed(source, "missing `data` field"))
}
