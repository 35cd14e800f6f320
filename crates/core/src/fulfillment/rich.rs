use crate::domain::response::{
    FulfillmentMessage, MessagePayload, Platform, SimpleResponse, SimpleResponses, Suggestion,
    Suggestions,
};

/// Chips offered when the category of a title is still unknown.
pub const CATEGORY_CHIPS: [&str; 3] = ["Film", "Série", "Musique"];

pub struct RichResponseBuilder {
    platform: Platform,
    messages: Vec<FulfillmentMessage>,
}

impl RichResponseBuilder {
    pub fn new(platform: Platform) -> Self {
        Self { platform, messages: Vec::new() }
    }

    pub fn simple_response(
        mut self,
        text_to_speech: impl Into<String>,
        display_text: impl Into<String>,
    ) -> Self {
        self.messages.push(FulfillmentMessage {
            platform: self.platform,
            payload: MessagePayload::SimpleResponses(SimpleResponses {
                simple_responses: vec![SimpleResponse {
                    text_to_speech: text_to_speech.into(),
                    display_text: display_text.into(),
                }],
            }),
        });
        self
    }

    pub fn suggestions<F>(mut self, build: F) -> Self
    where
        F: FnOnce(&mut SuggestionsBuilder),
    {
        let mut builder = SuggestionsBuilder::default();
        build(&mut builder);
        self.messages.push(FulfillmentMessage {
            platform: self.platform,
            payload: MessagePayload::Suggestions(builder.build()),
        });
        self
    }

    pub fn build(self) -> Vec<FulfillmentMessage> {
        self.messages
    }
}

#[derive(Default)]
pub struct SuggestionsBuilder {
    suggestions: Vec<Suggestion>,
}

impl SuggestionsBuilder {
    pub fn chip(&mut self, title: impl Into<String>) -> &mut Self {
        self.suggestions.push(Suggestion { title: title.into() });
        self
    }

    fn build(self) -> Suggestions {
        Suggestions { suggestions: self.suggestions }
    }
}

/// Simple response carrying the text, followed by the three category chips.
/// The simple response has to come first for Actions on Google to accept the
/// suggestions.
pub fn category_chooser(text_to_speech: &str, display_text: &str) -> Vec<FulfillmentMessage> {
    RichResponseBuilder::new(Platform::ActionsOnGoogle)
        .simple_response(text_to_speech, display_text)
        .suggestions(|chips| {
            for title in CATEGORY_CHIPS {
                chips.chip(title);
            }
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::{category_chooser, RichResponseBuilder, CATEGORY_CHIPS};
    use crate::domain::response::{MessagePayload, Platform};

    #[test]
    fn chooser_has_simple_response_then_three_chips() {
        let messages = category_chooser("\"Dune\" ?", "\"Dune\" ?");

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|message| message.platform == Platform::ActionsOnGoogle));

        let MessagePayload::SimpleResponses(simple) = &messages[0].payload else {
            panic!("first block should be a simple response");
        };
        assert_eq!(simple.simple_responses.len(), 1);
        assert_eq!(simple.simple_responses[0].text_to_speech, "\"Dune\" ?");
        assert_eq!(simple.simple_responses[0].display_text, "\"Dune\" ?");

        let MessagePayload::Suggestions(suggestions) = &messages[1].payload else {
            panic!("second block should be suggestions");
        };
        let titles: Vec<&str> =
            suggestions.suggestions.iter().map(|chip| chip.title.as_str()).collect();
        assert_eq!(titles, CATEGORY_CHIPS);
    }

    #[test]
    fn chooser_is_idempotent() {
        assert_eq!(category_chooser("a", "b"), category_chooser("a", "b"));
    }

    #[test]
    fn builder_keeps_block_order() {
        let messages = RichResponseBuilder::new(Platform::ActionsOnGoogle)
            .suggestions(|chips| {
                chips.chip("Oui").chip("Non");
            })
            .simple_response("x", "y")
            .build();

        assert!(matches!(messages[0].payload, MessagePayload::Suggestions(_)));
        assert!(matches!(messages[1].payload, MessagePayload::SimpleResponses(_)));
    }
}
