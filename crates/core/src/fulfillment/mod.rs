//! Intent dispatch and slot filling.
//!
//! `FulfillmentEngine::fulfill` is pure: it returns the response to send and,
//! when both slots are filled, the watchlist entry the caller should persist.

pub mod rich;
pub mod slots;
pub mod templates;

use crate::config::FulfillmentConfig;
use crate::domain::request::FulfillmentRequest;
use crate::domain::response::FulfillmentResponse;
use crate::domain::watchlist::WatchlistEntry;

use self::slots::{SlotCompleteness, SlotFill};
use self::templates::{
    capitalize_first, localize_type, render, with_version, CLARIFICATION_TEMPLATE,
    CONFIRMATION_TEMPLATE, NOT_UNDERSTOOD_TEXT, UNKNOWN_TEXT, WELCOME_TEXT,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionHandler {
    Welcome,
    Unknown,
    Default,
}

impl ActionHandler {
    /// Unknown and empty actions fall back to `Default`.
    pub fn from_action(action: &str) -> Self {
        match action {
            "input.welcome" => Self::Welcome,
            "input.unknown" => Self::Unknown,
            _ => Self::Default,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Welcome => "input.welcome",
            Self::Unknown => "input.unknown",
            Self::Default => "default",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Fulfillment {
    pub handler: ActionHandler,
    pub response: FulfillmentResponse,
    pub entry: Option<WatchlistEntry>,
    /// Only set for the `Default` handler.
    pub slots: Option<SlotFill>,
}

#[derive(Clone, Debug)]
pub struct FulfillmentEngine {
    config: FulfillmentConfig,
}

impl FulfillmentEngine {
    pub fn new(config: FulfillmentConfig) -> Self {
        Self { config }
    }

    pub fn fulfill(&self, request: &FulfillmentRequest) -> Fulfillment {
        let handler = ActionHandler::from_action(&request.action);
        match handler {
            ActionHandler::Welcome => fixed(handler, WELCOME_TEXT),
            ActionHandler::Unknown => fixed(handler, UNKNOWN_TEXT),
            ActionHandler::Default => self.fill_slots(request),
        }
    }

    fn fill_slots(&self, request: &FulfillmentRequest) -> Fulfillment {
        let slots = SlotFill::resolve(request);
        let type_phrase = localize_type(&slots.kind);

        let (template, entry, ask_category) = match slots.completeness() {
            SlotCompleteness::Complete => (
                CONFIRMATION_TEMPLATE,
                WatchlistEntry::new(slots.thing.clone(), slots.kind.clone()),
                false,
            ),
            SlotCompleteness::ThingOnly => (CLARIFICATION_TEMPLATE, None, true),
            SlotCompleteness::Empty => (NOT_UNDERSTOOD_TEXT, None, false),
        };

        let mut text = capitalize_first(&render(template, &type_phrase, &slots.thing));
        if self.config.append_version {
            text = with_version(&text, &self.config.version_label);
        }

        let mut response = FulfillmentResponse::text(text);
        if ask_category {
            let messages =
                rich::category_chooser(&response.fulfillment_text, &response.fulfillment_text);
            response = response.with_messages(messages);
        }

        Fulfillment { handler: ActionHandler::Default, response, entry, slots: Some(slots) }
    }
}

fn fixed(handler: ActionHandler, text: &str) -> Fulfillment {
    Fulfillment {
        handler,
        response: FulfillmentResponse::text(capitalize_first(text)),
        entry: None,
        slots: None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ActionHandler, FulfillmentEngine};
    use crate::config::FulfillmentConfig;
    use crate::domain::request::{Context, FulfillmentRequest};
    use crate::domain::response::MessagePayload;
    use crate::domain::watchlist::WatchlistEntry;
    use crate::fulfillment::slots::{SlotSource, THING_TO_WATCH};

    fn engine() -> FulfillmentEngine {
        FulfillmentEngine::new(FulfillmentConfig::default())
    }

    fn request(action: &str, parameters: serde_json::Value) -> FulfillmentRequest {
        FulfillmentRequest::from_value(&json!({
            "queryResult": { "action": action, "parameters": parameters }
        }))
        .expect("request should parse")
    }

    #[test]
    fn actions_map_to_handlers() {
        assert_eq!(ActionHandler::from_action("input.welcome"), ActionHandler::Welcome);
        assert_eq!(ActionHandler::from_action("input.unknown"), ActionHandler::Unknown);
        assert_eq!(ActionHandler::from_action("default"), ActionHandler::Default);
        assert_eq!(ActionHandler::from_action("add.thing"), ActionHandler::Default);
        assert_eq!(ActionHandler::from_action(""), ActionHandler::Default);
    }

    #[test]
    fn welcome_ignores_parameters() {
        let fulfillment = engine().fulfill(&request(
            "input.welcome",
            json!({ "thing-to-watch": "Dune", "type-of-thing": "movie" }),
        ));

        assert_eq!(fulfillment.handler, ActionHandler::Welcome);
        assert_eq!(fulfillment.response.fulfillment_text, "Réponse à input.welcome");
        assert!(fulfillment.entry.is_none());
        assert!(fulfillment.response.fulfillment_messages.is_none());
    }

    #[test]
    fn unknown_intent_has_fixed_text() {
        let fulfillment = engine().fulfill(&request("input.unknown", json!({})));

        assert_eq!(fulfillment.response.fulfillment_text, "Réponse à input.unknown");
        assert!(fulfillment.entry.is_none());
    }

    #[test]
    fn both_slots_confirm_and_emit_entry() {
        let fulfillment = engine().fulfill(&request(
            "add.thing",
            json!({ "thing-to-watch": "Black Mirror", "type-of-thing": "serie" }),
        ));

        assert_eq!(
            fulfillment.response.fulfillment_text,
            "Ok je vais ajouter cette série \"Black Mirror\" à la liste 👍"
        );
        assert_eq!(fulfillment.entry, WatchlistEntry::new("Black Mirror", "serie"));
        assert!(fulfillment.response.fulfillment_messages.is_none());
    }

    #[test]
    fn thing_from_output_context_behaves_like_parameter() {
        let mut from_context = request("default", json!({ "type-of-thing": "movie" }));
        from_context.output_contexts = vec![
            Context::new("ctx/other"),
            Context::new("ctx/add-thing-followup").with_parameter(THING_TO_WATCH, "Dune"),
        ];
        let direct =
            request("default", json!({ "thing-to-watch": "Dune", "type-of-thing": "movie" }));

        let from_context = engine().fulfill(&from_context);
        let direct = engine().fulfill(&direct);

        assert_eq!(from_context.response, direct.response);
        assert_eq!(from_context.entry, direct.entry);
        assert_eq!(
            from_context.slots.map(|slots| slots.thing_source),
            Some(SlotSource::OutputContext { name: "ctx/add-thing-followup".to_string() })
        );
    }

    #[test]
    fn missing_type_asks_for_category_with_chips() {
        let fulfillment =
            engine().fulfill(&request("default", json!({ "thing-to-watch": "Dune" })));

        assert_eq!(
            fulfillment.response.fulfillment_text,
            "\"Dune\" ? C'est un film, une série, une musique ?"
        );
        assert!(fulfillment.entry.is_none());

        let messages =
            fulfillment.response.fulfillment_messages.expect("chooser should be attached");
        let MessagePayload::Suggestions(suggestions) = &messages[1].payload else {
            panic!("second block should be suggestions");
        };
        let titles: Vec<&str> =
            suggestions.suggestions.iter().map(|chip| chip.title.as_str()).collect();
        assert_eq!(titles, vec!["Film", "Série", "Musique"]);
    }

    #[test]
    fn empty_type_asks_for_category() {
        let fulfillment = engine()
            .fulfill(&request("default", json!({ "thing-to-watch": "Dune", "type-of-thing": "" })));

        assert!(fulfillment.response.fulfillment_messages.is_some());
        assert!(fulfillment.entry.is_none());
    }

    #[test]
    fn no_slots_is_not_understood() {
        let fulfillment = engine().fulfill(&request("default", json!({})));

        assert_eq!(
            fulfillment.response.fulfillment_text,
            "Je n'ai pas saisi votre demande, quelle oeuvre essayez-vous d'ajouter ?"
        );
        assert!(fulfillment.entry.is_none());
        assert!(fulfillment.response.fulfillment_messages.is_none());
    }

    #[test]
    fn version_marker_is_opt_in() {
        let engine = FulfillmentEngine::new(FulfillmentConfig {
            append_version: true,
            version_label: "0.0.4".to_string(),
        });

        let fulfillment = engine.fulfill(&request("default", json!({ "thing-to-watch": "Dune" })));
        let welcome = engine.fulfill(&request("input.welcome", json!({})));

        assert!(fulfillment.response.fulfillment_text.ends_with("? 0.0.4"));
        let messages = fulfillment.response.fulfillment_messages.expect("chooser attached");
        let MessagePayload::SimpleResponses(simple) = &messages[0].payload else {
            panic!("first block should be a simple response");
        };
        assert_eq!(simple.simple_responses[0].display_text, fulfillment.response.fulfillment_text);
        assert_eq!(welcome.response.fulfillment_text, "Réponse à input.welcome");
    }
}
