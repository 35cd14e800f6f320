//! Dialogflow v2 webhook request.
//!
//! A body is only accepted when it carries a `queryResult` object. Beyond that
//! the payload is read leniently: fields the handlers use are picked out of the
//! JSON value, and anything of an unexpected shape counts as absent.

use serde_json::{Map, Value};

use crate::errors::FulfillmentError;

/// Parameter map as extracted by the conversational platform.
pub type Parameters = Map<String, Value>;

pub const DEFAULT_ACTION: &str = "default";

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Context {
    pub name: String,
    pub parameters: Parameters,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), parameters: Parameters::new() }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.parameters.insert(key.into(), value.into());
        self
    }

    /// Contexts without a `parameters` object carry nothing a handler can use.
    fn from_value(value: &Value) -> Option<Self> {
        let parameters = value.get("parameters")?.as_object()?.clone();
        let name = value.get("name").and_then(Value::as_str).unwrap_or_default().to_string();
        Some(Self { name, parameters })
    }
}

/// Read-only view of one inbound call, handed to the action handlers.
#[derive(Clone, Debug, PartialEq)]
pub struct FulfillmentRequest {
    pub action: String,
    pub parameters: Parameters,
    pub input_contexts: Vec<Context>,
    pub output_contexts: Vec<Context>,
    pub request_source: Option<String>,
    pub session: Option<String>,
}

impl FulfillmentRequest {
    /// Parses a raw request body. Anything without a `queryResult` object,
    /// including bodies that are not JSON at all, is a malformed request.
    pub fn from_slice(body: &[u8]) -> Result<Self, FulfillmentError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|error| FulfillmentError::MalformedRequest(error.to_string()))?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self, FulfillmentError> {
        let query_result = value.get("queryResult").and_then(Value::as_object).ok_or_else(|| {
            FulfillmentError::MalformedRequest("missing queryResult object".to_string())
        })?;

        let action = query_result
            .get("action")
            .and_then(Value::as_str)
            .filter(|action| !action.is_empty())
            .unwrap_or(DEFAULT_ACTION)
            .to_string();
        let parameters =
            query_result.get("parameters").and_then(Value::as_object).cloned().unwrap_or_default();
        let input_contexts = contexts(query_result, "inputContexts")
            .or_else(|| contexts(query_result, "contexts"))
            .unwrap_or_default();
        let output_contexts = contexts(query_result, "outputContexts").unwrap_or_default();

        Ok(Self {
            action,
            parameters,
            input_contexts,
            output_contexts,
            request_source: value
                .pointer("/originalDetectIntentRequest/source")
                .and_then(Value::as_str)
                .map(str::to_string),
            session: value.get("session").and_then(Value::as_str).map(str::to_string),
        })
    }

    pub fn correlation_id(&self) -> &str {
        self.session.as_deref().unwrap_or("unknown")
    }
}

fn contexts(query_result: &Map<String, Value>, key: &str) -> Option<Vec<Context>> {
    let entries = query_result.get(key)?.as_array()?;
    Some(entries.iter().filter_map(Context::from_value).collect())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{FulfillmentRequest, DEFAULT_ACTION};
    use crate::errors::FulfillmentError;

    #[test]
    fn body_without_query_result_is_malformed() {
        let error = FulfillmentRequest::from_value(&json!({ "session": "abc" }))
            .expect_err("missing queryResult should fail");

        assert!(matches!(error, FulfillmentError::MalformedRequest(_)));
    }

    #[test]
    fn non_json_body_is_malformed() {
        let error = FulfillmentRequest::from_slice(b"action=default")
            .expect_err("form body should fail");

        assert!(matches!(error, FulfillmentError::MalformedRequest(_)));
    }

    #[test]
    fn query_result_must_be_an_object() {
        let error = FulfillmentRequest::from_value(&json!({ "queryResult": "nope" }))
            .expect_err("scalar queryResult should fail");

        assert!(matches!(error, FulfillmentError::MalformedRequest(_)));
    }

    #[test]
    fn missing_or_empty_action_defaults() {
        let missing = FulfillmentRequest::from_value(&json!({ "queryResult": {} }))
            .expect("empty queryResult is accepted");
        let empty = FulfillmentRequest::from_value(&json!({ "queryResult": { "action": "" } }))
            .expect("empty action is accepted");

        assert_eq!(missing.action, DEFAULT_ACTION);
        assert_eq!(empty.action, DEFAULT_ACTION);
        assert!(missing.parameters.is_empty());
        assert!(missing.output_contexts.is_empty());
    }

    #[test]
    fn unexpected_shapes_are_read_as_absent() {
        let request = FulfillmentRequest::from_value(&json!({
            "session": 12,
            "responseId": ["r"],
            "queryResult": {
                "action": 7,
                "parameters": ["x"],
                "outputContexts": { "name": "ctx/not-a-list" },
                "languageCode": 5,
                "allRequiredParamsPresent": "yes"
            },
            "originalDetectIntentRequest": { "source": false, "version": 2 }
        }))
        .expect("lenient parse should succeed");

        assert_eq!(request.action, DEFAULT_ACTION);
        assert!(request.parameters.is_empty());
        assert!(request.output_contexts.is_empty());
        assert_eq!(request.request_source, None);
        assert_eq!(request.correlation_id(), "unknown");
    }

    #[test]
    fn contexts_without_parameter_objects_are_skipped() {
        let request = FulfillmentRequest::from_value(&json!({
            "queryResult": {
                "outputContexts": [
                    { "name": "ctx/bare" },
                    { "name": "ctx/scalar", "parameters": "thing-to-watch" },
                    "ctx/string",
                    { "lifespanCount": "two", "parameters": { "thing-to-watch": "Dark" } }
                ]
            }
        }))
        .expect("request should parse");

        assert_eq!(request.output_contexts.len(), 1);
        assert_eq!(request.output_contexts[0].name, "");
        assert_eq!(request.output_contexts[0].parameters["thing-to-watch"], "Dark");
    }

    #[test]
    fn flattens_source_session_and_contexts() {
        let request = FulfillmentRequest::from_value(&json!({
            "session": "projects/listo/agent/sessions/42",
            "queryResult": {
                "action": "input.welcome",
                "parameters": null,
                "outputContexts": [
                    {
                        "name": "ctx/add-thing",
                        "lifespanCount": 2,
                        "parameters": { "thing-to-watch": "Dark" }
                    }
                ],
                "contexts": [{ "name": "ctx/legacy", "parameters": {} }]
            },
            "originalDetectIntentRequest": { "source": "google" }
        }))
        .expect("request should parse");

        assert_eq!(request.action, "input.welcome");
        assert!(request.parameters.is_empty());
        assert_eq!(request.output_contexts.len(), 1);
        assert_eq!(request.output_contexts[0].name, "ctx/add-thing");
        assert_eq!(request.input_contexts[0].name, "ctx/legacy");
        assert_eq!(request.request_source.as_deref(), Some("google"));
        assert_eq!(request.correlation_id(), "projects/listo/agent/sessions/42");
    }
}
