use serde_json::Value;
use tracing::error;

use crate::error::{Error, Result};

/// Extract the most recent submission from a status payload.
///
/// Every shape problem is logged with its own reason but surfaces as the
/// single `MalformedResponse` kind.
pub fn check_response(body: &Value) -> Result<Value> {
    let Some(object) = body.as_object() else {
        error!("response type mismatch: expected a JSON object");
        return Err(Error::MalformedResponse);
    };
    let Some(homeworks) = object.get("homeworks") else {
        error!("response missing key: homeworks");
        return Err(Error::MalformedResponse);
    };
    let Some(homeworks) = homeworks.as_array() else {
        error!("response type mismatch: homeworks is not a list");
        return Err(Error::MalformedResponse);
    };
    match homeworks.first() {
        Some(homework) => Ok(homework.clone()),
        None => {
            error!("response homeworks is an empty list");
            Err(Error::MalformedResponse)
        }
    }
}

/// The server timestamp of a payload, used to advance the poll cursor.
pub fn response_cursor(body: &Value) -> Option<i64> {
    body.get("current_date").and_then(Value::as_i64)
}

/// True when the payload is well formed but lists no submissions.
pub fn has_no_updates(body: &Value) -> bool {
    body.get("homeworks")
        .and_then(Value::as_array)
        .is_some_and(Vec::is_empty)
}
