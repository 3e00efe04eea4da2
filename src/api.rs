use std::time::Duration;

use tracing::{debug, error};

use crate::error::{Error, Result};

/// Source of homework status snapshots.
pub trait ReviewApi {
    /// Fetch the raw status payload for submissions updated after `from_date`.
    fn homework_statuses(&self, from_date: i64) -> Result<serde_json::Value>;
}

/// Blocking client for the Practicum homework-status endpoint.
pub struct PracticumClient {
    agent: ureq::Agent,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(endpoint: &str, token: &str, timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            endpoint: endpoint.to_string(),
            token: token.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ReviewApi for PracticumClient {
    fn homework_statuses(&self, from_date: i64) -> Result<serde_json::Value> {
        debug!(endpoint = %self.endpoint, from_date, "requesting homework statuses");
        let result = self
            .agent
            .get(&self.endpoint)
            .set("Authorization", &format!("OAuth {}", self.token))
            .query("from_date", &from_date.to_string())
            .call();
        interpret_response(&self.endpoint, result)
    }
}

/// Map a finished request to the parsed body or a `RemoteApi` error.
/// Only HTTP 200 counts as success.
fn interpret_response(
    endpoint: &str,
    result: std::result::Result<ureq::Response, ureq::Error>,
) -> Result<serde_json::Value> {
    let response = match result {
        Ok(response) => response,
        Err(ureq::Error::Status(code, _)) => return Err(unreachable_status(endpoint, code)),
        Err(ureq::Error::Transport(e)) => {
            return Err(Error::RemoteApi(format!("connection failure: {e}")));
        }
    };

    let code = response.status();
    if code != 200 {
        return Err(unreachable_status(endpoint, code));
    }

    response
        .into_json::<serde_json::Value>()
        .map_err(|e| Error::RemoteApi(format!("failed to parse response body: {e}")))
}

fn unreachable_status(endpoint: &str, code: u16) -> Error {
    error!(endpoint, status = code, "endpoint unreachable");
    Error::RemoteApi(format!("endpoint {endpoint} returned status {code}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ENDPOINT: &str = "http://review.test/statuses/";

    fn response(status: u16, body: &str) -> ureq::Response {
        ureq::Response::new(status, "Test", body).unwrap()
    }

    #[test]
    fn test_ok_returns_body_unmodified() {
        let body = r#"{"homeworks":[{"status":"approved","homework_name":"hw1"}],"current_date":17}"#;
        let value = interpret_response(ENDPOINT, Ok(response(200, body))).unwrap();
        assert_eq!(value, serde_json::from_str::<serde_json::Value>(body).unwrap());
    }

    #[test]
    fn test_ok_body_without_schema_is_passed_through() {
        let value = interpret_response(ENDPOINT, Ok(response(200, "[1, 2, 3]"))).unwrap();
        assert_eq!(value, serde_json::json!([1, 2, 3]));
    }

    #[test]
    fn test_error_statuses_become_remote_api_errors() {
        for code in [400, 401, 403, 404, 429, 500, 502, 503] {
            let err =
                interpret_response(ENDPOINT, Err(ureq::Error::Status(code, response(code, ""))))
                    .unwrap_err();
            match err {
                Error::RemoteApi(msg) => assert!(msg.contains(&code.to_string()), "{msg}"),
                other => panic!("expected RemoteApi for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_non_200_success_status_is_rejected() {
        let err = interpret_response(ENDPOINT, Ok(response(204, ""))).unwrap_err();
        assert!(matches!(err, Error::RemoteApi(ref msg) if msg.contains("204")));
    }

    #[test]
    fn test_invalid_json_is_remote_api_error() {
        let err = interpret_response(ENDPOINT, Ok(response(200, "<html>"))).unwrap_err();
        assert!(matches!(err, Error::RemoteApi(_)));
    }

    #[test]
    fn test_transport_failure_is_remote_api_error() {
        // Nothing listens on port 9 of the loopback interface.
        let client = PracticumClient::new(
            "http://127.0.0.1:9/statuses/",
            "token",
            Duration::from_secs(2),
        );
        let err = client.homework_statuses(0).unwrap_err();
        assert!(matches!(err, Error::RemoteApi(ref msg) if msg.contains("connection failure")));
    }
}
