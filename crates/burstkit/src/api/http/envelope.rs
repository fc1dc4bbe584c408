use crate::error::ClientError;

/// Parse a response body and reject the node's error envelope.
///
/// The node reports failures as `{"errorCode": <int>, "errorDescription":
/// <string>}` with a non-zero code. This check runs before any
/// operation-specific decoding, so an error body is always surfaced as
/// [`ClientError::Node`] even when it also carries success-shaped keys.
pub(super) fn parse_checked_body(body: &str) -> Result<serde_json::Value, ClientError> {
    let value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        ClientError::InvalidResponse(format!("response is not JSON: {e}; body={body}"))
    })?;
    reject_error_envelope(&value)?;
    Ok(value)
}

fn reject_error_envelope(value: &serde_json::Value) -> Result<(), ClientError> {
    let Some(code) = value.get("errorCode").and_then(serde_json::Value::as_i64) else {
        return Ok(());
    };
    if code == 0 {
        return Ok(());
    }
    let message = value
        .get("errorDescription")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .to_owned();
    Err(ClientError::Node { code, message })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_body_passes_through() {
        let value = parse_checked_body(r#"{"height": "42"}"#).expect("should pass");
        assert_eq!(value["height"], "42");
    }

    #[test]
    fn error_envelope_becomes_node_error() {
        let err = parse_checked_body(
            r#"{"errorCode": 5, "errorDescription": "Unknown account"}"#,
        )
        .expect_err("must reject");
        assert!(matches!(
            err,
            ClientError::Node { code: 5, ref message } if message == "Unknown account"
        ));
    }

    #[test]
    fn envelope_wins_over_success_shaped_keys() {
        let err = parse_checked_body(
            r#"{"errorCode": 4, "errorDescription": "Incorrect request", "height": "42"}"#,
        )
        .expect_err("must reject");
        assert!(matches!(err, ClientError::Node { code: 4, .. }));
    }

    #[test]
    fn zero_error_code_is_not_an_error() {
        assert!(parse_checked_body(r#"{"errorCode": 0, "height": "42"}"#).is_ok());
    }

    #[test]
    fn missing_description_defaults_to_empty() {
        let err = parse_checked_body(r#"{"errorCode": 9}"#).expect_err("must reject");
        assert!(matches!(
            err,
            ClientError::Node { code: 9, ref message } if message.is_empty()
        ));
    }

    #[test]
    fn non_json_body_is_invalid_response() {
        assert!(matches!(
            parse_checked_body("<html>502</html>"),
            Err(ClientError::InvalidResponse(_))
        ));
    }
}
