use serde_json::Value;

use crate::domain::request::{Context, FulfillmentRequest, Parameters};

pub const THING_TO_WATCH: &str = "thing-to-watch";
pub const TYPE_OF_THING: &str = "type-of-thing";

/// Where the `thing-to-watch` value was found.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotSource {
    Parameters,
    OutputContext { name: String },
    Missing,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotCompleteness {
    Complete,
    ThingOnly,
    Empty,
}

/// A slot that was present but not a string. `context` is `None` when the
/// value sat in the request parameters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IgnoredSlot {
    pub slot: &'static str,
    pub context: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotFill {
    pub thing: String,
    pub kind: String,
    pub thing_source: SlotSource,
    pub ignored: Vec<IgnoredSlot>,
}

impl SlotFill {
    pub fn resolve(request: &FulfillmentRequest) -> Self {
        let (thing, thing_source) = resolve_thing(&request.parameters, &request.output_contexts);
        let kind = string_slot(&request.parameters, TYPE_OF_THING).unwrap_or_default().to_string();

        let mut ignored: Vec<IgnoredSlot> = [THING_TO_WATCH, TYPE_OF_THING]
            .into_iter()
            .filter(|key| is_unusable(&request.parameters, key))
            .map(|slot| IgnoredSlot { slot, context: None })
            .collect();
        // Contexts are only consulted when the parameters had no usable thing,
        // and only up to the one that supplied it.
        if thing_source != SlotSource::Parameters {
            let scanned = request
                .output_contexts
                .iter()
                .take_while(|context| string_slot(&context.parameters, THING_TO_WATCH).is_none());
            ignored.extend(
                scanned.filter(|context| is_unusable(&context.parameters, THING_TO_WATCH)).map(
                    |context| IgnoredSlot {
                        slot: THING_TO_WATCH,
                        context: Some(context.name.clone()),
                    },
                ),
            );
        }

        Self { thing, kind, thing_source, ignored }
    }

    pub fn completeness(&self) -> SlotCompleteness {
        match (self.thing.is_empty(), self.kind.is_empty()) {
            (false, false) => SlotCompleteness::Complete,
            (false, true) => SlotCompleteness::ThingOnly,
            (true, _) => SlotCompleteness::Empty,
        }
    }
}

/// A slot value, if it is a non-empty string.
pub fn string_slot<'a>(parameters: &'a Parameters, key: &str) -> Option<&'a str> {
    parameters.get(key).and_then(Value::as_str).filter(|value| !value.is_empty())
}

fn is_unusable(parameters: &Parameters, key: &str) -> bool {
    parameters.get(key).is_some_and(|value| !value.is_string() && !value.is_null())
}

/// Looks up `thing-to-watch` in the parameters first, then in the first
/// output context that carries it.
pub fn resolve_thing(
    parameters: &Parameters,
    output_contexts: &[Context],
) -> (String, SlotSource) {
    if let Some(thing) = string_slot(parameters, THING_TO_WATCH) {
        return (thing.to_string(), SlotSource::Parameters);
    }

    output_contexts
        .iter()
        .find_map(|context| {
            let thing = string_slot(&context.parameters, THING_TO_WATCH)?;
            Some((thing.to_string(), SlotSource::OutputContext { name: context.name.clone() }))
        })
        .unwrap_or_else(|| (String::new(), SlotSource::Missing))
}
