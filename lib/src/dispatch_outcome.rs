use serde_json::{json, Map, Value};

const DRY_RUN_KEY: &str = "dry_run";

/// Failure of a single delivery attempt.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DeliveryError {
    #[error("{0}")]
    Transient(String),
    #[error("{0}")]
    Permanent(String),
}

impl DeliveryError {
    pub fn is_transient(&self) -> bool {
        matches!(self, DeliveryError::Transient(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    Success { response_body: Value },
    Failure { error_message: String },
}

impl DispatchOutcome {
    pub fn dry_run(pnr: &str) -> Self {
        DispatchOutcome::Success {
            response_body: json!({"status": "ok", DRY_RUN_KEY: true, "pnr": pnr}),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, DispatchOutcome::Success { .. })
    }

    /// The JSON object written to the outcome log for this outcome.
    pub fn to_log_entry(&self) -> Value {
        match self {
            DispatchOutcome::Success { response_body } => match response_body {
                Value::Object(body) => {
                    let mut entry = body.clone();
                    entry.entry(DRY_RUN_KEY).or_insert(Value::Bool(false));
                    Value::Object(entry)
                },
                other => {
                    let mut entry = Map::new();
                    entry.insert("response".to_string(), other.clone());
                    entry.insert(DRY_RUN_KEY.to_string(), Value::Bool(false));
                    Value::Object(entry)
                },
            },
            DispatchOutcome::Failure { error_message } => json!({"error": error_message}),
        }
    }
}

impl From<DeliveryError> for DispatchOutcome {
    fn from(error: DeliveryError) -> Self {
        DispatchOutcome::Failure { error_message: error.to_string() }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub success_count: usize,
    pub failure_count: usize,
    pub dry_run: bool,
    pub interrupted: bool,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.success_count + self.failure_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dry_run_entry_keeps_field_order() {
        let entry = DispatchOutcome::dry_run("ABC123").to_log_entry();

        assert_eq!(r#"{"status":"ok","dry_run":true,"pnr":"ABC123"}"#, entry.to_string());
    }

    #[test]
    fn success_entry_is_marked_as_not_dry_run() {
        let object = DispatchOutcome::Success {
            response_body: json!({"id": 7}),
        };
        assert_eq!(json!({"id": 7, "dry_run": false}), object.to_log_entry());

        let array = DispatchOutcome::Success { response_body: json!([1, 2]) };
        assert_eq!(json!({"response": [1, 2], "dry_run": false}), array.to_log_entry());
    }

    #[test]
    fn failure_entry_carries_only_the_error() {
        let outcome = DispatchOutcome::from(DeliveryError::Permanent("Client error 404 Not Found".to_string()));

        assert!(!outcome.is_success());
        assert!(!DeliveryError::Permanent(String::new()).is_transient());
        assert!(DeliveryError::Transient(String::new()).is_transient());
        assert_eq!(json!({"error": "Client error 404 Not Found"}), outcome.to_log_entry());
    }
}
