use serde_json::Value;
use thiserror::Error;

/// Fields every submitted record must carry as non-empty strings.
pub const REQUIRED_FIELDS: [&str; 4] = ["subject", "sender", "timestamp", "content"];

/// Validation failures, in the order they are checked. Missing-field
/// errors take priority over empty-field errors, and all missing fields
/// are reported together.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RecordError {
    #[error("Missing 'data' field in payload")]
    MissingData,

    #[error("Missing required fields: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    #[error("Field '{0}' must be a non-empty string")]
    EmptyField(String),
}

/// Checks a submitted record against the required schema.
pub fn validate_record(data: Option<&Value>) -> Result<(), RecordError> {
    let object = data
        .and_then(Value::as_object)
        .ok_or(RecordError::MissingData)?;

    let missing: Vec<String> = REQUIRED_FIELDS
        .iter()
        .filter(|field| !object.contains_key(**field))
        .map(|field| field.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(RecordError::MissingFields(missing));
    }

    for field in REQUIRED_FIELDS {
        match object.get(field).and_then(Value::as_str) {
            Some(value) if !value.trim().is_empty() => {}
            _ => return Err(RecordError::EmptyField(field.to_string())),
        }
    }

    Ok(())
}
