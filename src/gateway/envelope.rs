use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::gateway::GatewayError;

/// The wrapper every backend endpoint responds with. Endpoints disagree on
/// the discriminant: some send `success: bool`, the auth family sends
/// `status: "success" | "error"`. Both are accepted here and resolved once,
/// so call sites never probe raw JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub data: Option<Value>,
}

/// An envelope resolved into exactly one of two outcomes.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Success(Value),
    Failure(String),
}

const GENERIC_FAILURE: &str = "The request could not be completed";

impl Envelope {
    pub fn is_success(&self) -> bool {
        self.success == Some(true) || self.status.as_deref() == Some("success")
    }

    pub fn message_or_generic(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| GENERIC_FAILURE.to_string())
    }

    /// Resolve the envelope into its outcome.
    pub fn normalize(self) -> Outcome {
        if self.is_success() {
            Outcome::Success(self.data.unwrap_or(Value::Null))
        } else {
            let message = self
                .message
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            Outcome::Failure(message)
        }
    }

    /// The OAuth exchange endpoint is known to double-wrap its envelope:
    /// the outer object may be a bare `{data: {status, data, message}}`.
    /// Unwrap one level before the ordinary resolution.
    pub fn normalize_oauth(self) -> Outcome {
        if self.is_success() {
            // Some deployments nest once even on the success path.
            if let Some(Value::Object(ref inner)) = self.data {
                if inner.get("status").and_then(Value::as_str) == Some("success") {
                    if let Some(payload) = inner.get("data") {
                        return Outcome::Success(payload.clone());
                    }
                }
            }
            return Outcome::Success(self.data.unwrap_or(Value::Null));
        }

        if let Some(Value::Object(inner)) = self.data {
            match inner.get("status").and_then(Value::as_str) {
                Some("success") => {
                    return Outcome::Success(
                        inner.get("data").cloned().unwrap_or(Value::Null),
                    )
                }
                Some("error") => {
                    let message = inner
                        .get("message")
                        .and_then(Value::as_str)
                        .unwrap_or(GENERIC_FAILURE)
                        .to_string();
                    return Outcome::Failure(message);
                }
                _ => {}
            }
        }

        Outcome::Failure(self.message.unwrap_or_else(|| GENERIC_FAILURE.to_string()))
    }

    /// Resolve and deserialize the success payload.
    pub fn into_data<T: DeserializeOwned>(self) -> Result<T, GatewayError> {
        match self.normalize() {
            Outcome::Success(value) => serde_json::from_value(value)
                .map_err(|e| GatewayError::Decode(e.to_string())),
            Outcome::Failure(message) => Err(GatewayError::Rejected {
                status: 200,
                message,
            }),
        }
    }

    /// Resolve a success-only endpoint, discarding any payload.
    pub fn into_ack(self) -> Result<Option<String>, GatewayError> {
        let message = self.message.clone();
        match self.normalize() {
            Outcome::Success(_) => Ok(message),
            Outcome::Failure(message) => Err(GatewayError::Rejected {
                status: 200,
                message,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: serde_json::Value) -> Envelope {
        serde_json::from_value(raw).unwrap()
    }

    #[test]
    fn test_success_boolean_discriminant() {
        let env = parse(serde_json::json!({"success": true, "data": {"count": 5}}));
        assert_eq!(
            env.normalize(),
            Outcome::Success(serde_json::json!({"count": 5}))
        );
    }

    #[test]
    fn test_status_string_discriminant() {
        let env = parse(serde_json::json!({
            "code": 200,
            "status": "success",
            "message": "Login successful",
            "data": {"x": 1}
        }));
        assert!(env.is_success());
    }

    #[test]
    fn test_failure_carries_backend_message() {
        let env = parse(serde_json::json!({
            "status": "error",
            "message": "Invalid credentials"
        }));
        assert_eq!(env.normalize(), Outcome::Failure("Invalid credentials".into()));
    }

    #[test]
    fn test_failure_without_message_is_generic() {
        let env = parse(serde_json::json!({"success": false}));
        match env.normalize() {
            Outcome::Failure(msg) => assert_eq!(msg, GENERIC_FAILURE),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_oauth_double_wrapped_success() {
        let env = parse(serde_json::json!({
            "success": false,
            "data": {
                "status": "success",
                "data": {"tokens": {"accessToken": "a", "refreshToken": "r"}}
            }
        }));
        match env.normalize_oauth() {
            Outcome::Success(value) => {
                assert_eq!(value["tokens"]["accessToken"], "a");
            }
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_oauth_double_wrapped_error() {
        let env = parse(serde_json::json!({
            "success": false,
            "data": {"status": "error", "message": "Code expired"}
        }));
        assert_eq!(env.normalize_oauth(), Outcome::Failure("Code expired".into()));
    }

    #[test]
    fn test_oauth_plain_success_passes_through() {
        let env = parse(serde_json::json!({
            "status": "success",
            "data": {"user": {"id": "u"}}
        }));
        match env.normalize_oauth() {
            Outcome::Success(value) => assert_eq!(value["user"]["id"], "u"),
            other => panic!("expected success, got {other:?}"),
        }
    }

    #[test]
    fn test_into_data_decodes_payload() {
        #[derive(serde::Deserialize)]
        struct Count {
            count: i64,
        }
        let env = parse(serde_json::json!({"success": true, "data": {"count": 3}}));
        assert_eq!(env.into_data::<Count>().unwrap().count, 3);
    }
}
