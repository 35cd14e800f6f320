use serde::{Deserialize, Serialize};

use crate::domain::request::Context;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FulfillmentResponse {
    pub fulfillment_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fulfillment_messages: Option<Vec<FulfillmentMessage>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_contexts: Option<Vec<Context>>,
}

impl FulfillmentResponse {
    pub fn text(text: impl Into<String>) -> Self {
        Self { fulfillment_text: text.into(), fulfillment_messages: None, output_contexts: None }
    }

    pub fn with_messages(mut self, messages: Vec<FulfillmentMessage>) -> Self {
        self.fulfillment_messages = Some(messages);
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Platform {
    ActionsOnGoogle,
}

/// One platform-specific rich block, serialized as
/// `{ "platform": ..., "<payload kind>": { ... } }`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FulfillmentMessage {
    pub platform: Platform,
    #[serde(flatten)]
    pub payload: MessagePayload,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessagePayload {
    SimpleResponses(SimpleResponses),
    Suggestions(Suggestions),
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleResponses {
    pub simple_responses: Vec<SimpleResponse>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleResponse {
    pub text_to_speech: String,
    pub display_text: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestions {
    pub suggestions: Vec<Suggestion>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Suggestion {
    pub title: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{
        FulfillmentMessage, FulfillmentResponse, MessagePayload, Platform, SimpleResponse,
        SimpleResponses, Suggestion, Suggestions,
    };

    #[test]
    fn plain_text_response_omits_optional_fields() {
        let value = serde_json::to_value(FulfillmentResponse::text("Bonjour"))
            .expect("response serializes");

        assert_eq!(value, json!({ "fulfillmentText": "Bonjour" }));
    }

    #[test]
    fn rich_blocks_use_platform_wire_shape() {
        let response = FulfillmentResponse::text("Dark ?").with_messages(vec![
            FulfillmentMessage {
                platform: Platform::ActionsOnGoogle,
                payload: MessagePayload::SimpleResponses(SimpleResponses {
                    simple_responses: vec![SimpleResponse {
                        text_to_speech: "Dark ?".to_string(),
                        display_text: "Dark ?".to_string(),
                    }],
                }),
            },
            FulfillmentMessage {
                platform: Platform::ActionsOnGoogle,
                payload: MessagePayload::Suggestions(Suggestions {
                    suggestions: vec![Suggestion { title: "Film".to_string() }],
                }),
            },
        ]);

        let value = serde_json::to_value(&response).expect("response serializes");

        assert_eq!(
            value,
            json!({
                "fulfillmentText": "Dark ?",
                "fulfillmentMessages": [
                    {
                        "platform": "ACTIONS_ON_GOOGLE",
                        "simple_responses": {
                            "simple_responses": [
                                { "text_to_speech": "Dark ?", "display_text": "Dark ?" }
                            ]
                        }
                    },
                    {
                        "platform": "ACTIONS_ON_GOOGLE",
                        "suggestions": { "suggestions": [{ "title": "Film" }] }
                    }
                ]
            })
        );
    }
}
