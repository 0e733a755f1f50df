use serde::{de::Error, ser::SerializeSeq, Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::error::{OcppError, OcppResult};

/// JSON object carried by every envelope.
pub type Payload = Map<String, Value>;

pub(crate) const CALL: u64 = 2;
pub(crate) const CALL_RESULT: u64 = 3;
pub(crate) const CALL_ERROR: u64 = 4;

/// One OCPP-J frame.
///
/// On the wire every variant is a JSON array whose first element is the
/// message type id:
///
/// * `[2, uniqueId, action, payload]`
/// * `[3, uniqueId, payload]`
/// * `[4, uniqueId, errorCode, errorDescription, errorDetails]`
///
/// Any other array that does not start with the integer `2` is kept verbatim
/// as [`Envelope::Unrecognized`] so the caller can skip it quietly.
#[derive(Debug, Clone, PartialEq)]
pub enum Envelope {
    Call {
        unique_id: String,
        action: String,
        payload: Payload,
    },
    CallResult {
        unique_id: String,
        payload: Payload,
    },
    CallError {
        unique_id: String,
        error_code: String,
        error_description: String,
        error_details: Payload,
    },
    Unrecognized(Vec<Value>),
}

impl Envelope {
    /// Parses one input line.
    ///
    /// # Errors
    ///
    /// Returns [`OcppError::MalformedMessage`] if the line is not a JSON array,
    /// or if it is a Call (`[2, ...]`) without the four-element Call shape.
    pub fn decode(line: &str) -> OcppResult<Self> {
        serde_json::from_str(line).map_err(|error| OcppError::MalformedMessage {
            details: error.to_string(),
        })
    }

    #[must_use]
    pub fn call_result(unique_id: impl Into<String>, payload: Payload) -> Self {
        Self::CallResult {
            unique_id: unique_id.into(),
            payload,
        }
    }

    /// Builds a CallError with empty details.
    #[must_use]
    pub fn call_error(
        unique_id: impl Into<String>,
        error_code: impl Into<String>,
        error_description: impl Into<String>,
    ) -> Self {
        Self::CallError {
            unique_id: unique_id.into(),
            error_code: error_code.into(),
            error_description: error_description.into(),
            error_details: Payload::new(),
        }
    }

    #[must_use]
    pub fn message_type_id(&self) -> Option<u64> {
        match self {
            Self::Call { .. } => Some(CALL),
            Self::CallResult { .. } => Some(CALL_RESULT),
            Self::CallError { .. } => Some(CALL_ERROR),
            Self::Unrecognized(elements) => elements.first().and_then(Value::as_u64),
        }
    }

    #[must_use]
    pub fn unique_id(&self) -> Option<&str> {
        match self {
            Self::Call { unique_id, .. }
            | Self::CallResult { unique_id, .. }
            | Self::CallError { unique_id, .. } => Some(unique_id),
            Self::Unrecognized(elements) => elements.get(1).and_then(Value::as_str),
        }
    }

    /// Renders the envelope as compact single-line JSON.
    ///
    /// # Errors
    ///
    /// Returns [`OcppError::UnexpectedInternal`] if serialization fails.
    pub fn to_line(&self) -> OcppResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for Envelope {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Call {
                unique_id,
                action,
                payload,
            } => {
                let mut state = serializer.serialize_seq(Some(4))?;
                state.serialize_element(&CALL)?;
                state.serialize_element(unique_id)?;
                state.serialize_element(action)?;
                state.serialize_element(payload)?;
                state.end()
            }
            Self::CallResult { unique_id, payload } => {
                let mut state = serializer.serialize_seq(Some(3))?;
                state.serialize_element(&CALL_RESULT)?;
                state.serialize_element(unique_id)?;
                state.serialize_element(payload)?;
                state.end()
            }
            Self::CallError {
                unique_id,
                error_code,
                error_description,
                error_details,
            } => {
                let mut state = serializer.serialize_seq(Some(5))?;
                state.serialize_element(&CALL_ERROR)?;
                state.serialize_element(unique_id)?;
                state.serialize_element(error_code)?;
                state.serialize_element(error_description)?;
                state.serialize_element(error_details)?;
                state.end()
            }
            Self::Unrecognized(elements) => elements.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Envelope {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements: Vec<Value> = Deserialize::deserialize(deserializer)?;

        if elements.first().and_then(Value::as_u64) == Some(CALL) {
            return call_from_elements(elements);
        }
        Ok(reply_from_elements(&elements).unwrap_or(Self::Unrecognized(elements)))
    }
}

fn call_from_elements<E: Error>(elements: Vec<Value>) -> Result<Envelope, E> {
    let length = elements.len();
    if length != 4 {
        return Err(E::custom(format!(
            "Invalid message format: a call expects 4 elements, found {length}."
        )));
    }

    let mut elements = elements.into_iter().skip(1);
    Ok(Envelope::Call {
        unique_id: next_string(&mut elements, "unique id")?,
        action: next_string(&mut elements, "action")?,
        payload: next_object(&mut elements, "payload")?,
    })
}

fn reply_from_elements(elements: &[Value]) -> Option<Envelope> {
    match elements {
        [message_type_id, Value::String(unique_id), Value::Object(payload)]
            if message_type_id.as_u64() == Some(CALL_RESULT) =>
        {
            Some(Envelope::CallResult {
                unique_id: unique_id.clone(),
                payload: payload.clone(),
            })
        }
        [message_type_id, Value::String(unique_id), Value::String(error_code), Value::String(error_description), Value::Object(error_details)]
            if message_type_id.as_u64() == Some(CALL_ERROR) =>
        {
            Some(Envelope::CallError {
                unique_id: unique_id.clone(),
                error_code: error_code.clone(),
                error_description: error_description.clone(),
                error_details: error_details.clone(),
            })
        }
        _ => None,
    }
}

fn next_string<E: Error>(elements: &mut impl Iterator<Item = Value>, field: &str) -> Result<String, E> {
    match elements.next() {
        Some(Value::String(text)) => Ok(text),
        _ => Err(E::custom(format!(
            "Invalid {field}: expected a string but found none."
        ))),
    }
}

fn next_object<E: Error>(elements: &mut impl Iterator<Item = Value>, field: &str) -> Result<Payload, E> {
    match elements.next() {
        Some(Value::Object(object)) => Ok(object),
        _ => Err(E::custom(format!(
            "Invalid {field}: expected an object but found none."
        ))),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use serde_json::json;

    use super::*;

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(object) => object,
            other => panic!("test payload must be an object, got {other}"),
        }
    }

    #[test]
    fn decodes_a_call() {
        let envelope =
            Envelope::decode(r#"[2, "19223201", "BootNotification", {"chargePointVendor": "VendorX"}]"#)
                .expect("valid call");

        assert_eq!(
            envelope,
            Envelope::Call {
                unique_id: "19223201".to_owned(),
                action: "BootNotification".to_owned(),
                payload: payload(json!({"chargePointVendor": "VendorX"})),
            }
        );
        assert_eq!(envelope.message_type_id(), Some(CALL));
        assert_eq!(envelope.unique_id(), Some("19223201"));
    }

    #[test]
    fn decodes_results_and_errors() {
        let result = Envelope::decode(r#"[3, "a", {"status": "Accepted"}]"#).expect("valid result");
        assert_eq!(
            result,
            Envelope::call_result("a", payload(json!({"status": "Accepted"})))
        );

        let error = Envelope::decode(r#"[4, "b", "NotSupported", "Action not supported", {}]"#)
            .expect("valid error");
        assert_eq!(
            error,
            Envelope::call_error("b", "NotSupported", "Action not supported")
        );
    }

    #[rstest]
    #[case::not_json("this is not json")]
    #[case::empty_object("{}")]
    #[case::number("42")]
    #[case::call_missing_payload(r#"[2, "id", "Heartbeat"]"#)]
    #[case::call_extra_element(r#"[2, "id", "Heartbeat", {}, {}]"#)]
    #[case::numeric_unique_id(r#"[2, 42, "Heartbeat", {}]"#)]
    #[case::numeric_action(r#"[2, "id", 5, {}]"#)]
    #[case::array_payload(r#"[2, "id", "Heartbeat", []]"#)]
    #[case::null_payload(r#"[2, "id", "Heartbeat", null]"#)]
    fn rejects_malformed_lines(#[case] line: &str) {
        let result = Envelope::decode(line);

        assert!(
            matches!(result, Err(OcppError::MalformedMessage { .. })),
            "expected MalformedMessage for {line}, got {result:?}"
        );
    }

    #[rstest]
    #[case::empty_array("[]", None, None)]
    #[case::string_type_id(r#"["2", "id", "Heartbeat", {}]"#, None, Some("id"))]
    #[case::unknown_type_id(r#"[7, "id", "Heartbeat", {}]"#, Some(7), Some("id"))]
    #[case::result_too_long(r#"[3, "id", "Heartbeat", {}]"#, Some(3), Some("id"))]
    #[case::error_missing_details(r#"[4, "id", "InternalError", "boom"]"#, Some(4), Some("id"))]
    fn keeps_non_call_frames_verbatim(
        #[case] line: &str,
        #[case] message_type_id: Option<u64>,
        #[case] unique_id: Option<&str>,
    ) {
        let envelope = Envelope::decode(line).expect("only calls must be well formed");

        let expected: Vec<Value> = serde_json::from_str(line).expect("test line is an array");
        assert_eq!(envelope, Envelope::Unrecognized(expected));
        assert_eq!(envelope.message_type_id(), message_type_id);
        assert_eq!(envelope.unique_id(), unique_id);
    }

    #[test]
    fn unrecognized_frames_serialize_unchanged() {
        let envelope = Envelope::decode(r#"[9, "x", true]"#).expect("decodable");

        assert_eq!(envelope.to_line().expect("serializable"), r#"[9,"x",true]"#);
    }

    #[test]
    fn serializes_as_compact_arrays() {
        let result = Envelope::call_result("42", payload(json!({"status": "Accepted"})));
        assert_eq!(
            result.to_line().expect("serializable"),
            r#"[3,"42",{"status":"Accepted"}]"#
        );

        let error = Envelope::call_error("43", "NotSupported", "Action not supported");
        assert_eq!(
            error.to_line().expect("serializable"),
            r#"[4,"43","NotSupported","Action not supported",{}]"#
        );

        let call = Envelope::Call {
            unique_id: "44".to_owned(),
            action: "Heartbeat".to_owned(),
            payload: Payload::new(),
        };
        assert_eq!(
            call.to_line().expect("serializable"),
            r#"[2,"44","Heartbeat",{}]"#
        );
    }

    #[test]
    fn serialized_call_decodes_to_itself() {
        let call = Envelope::Call {
            unique_id: "id-1".to_owned(),
            action: "ChangeConfiguration".to_owned(),
            payload: payload(json!({"key": "HeartbeatInterval", "value": "30"})),
        };
        let line = call.to_line().expect("serializable");

        assert!(!line.contains('\n'), "output must be a single line");
        assert_eq!(Envelope::decode(&line).expect("decodable"), call);
    }
}
