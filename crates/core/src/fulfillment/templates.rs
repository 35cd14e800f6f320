//! French response strings and the substitutions applied to them.

pub const WELCOME_TEXT: &str = "Réponse à input.welcome";
pub const UNKNOWN_TEXT: &str = "Réponse à input.unknown";

pub const CONFIRMATION_TEMPLATE: &str = "Ok je vais ajouter {type} \"{thing}\" à la liste 👍";
pub const CLARIFICATION_TEMPLATE: &str = "\"{thing}\" ? C'est un film, une série, une musique ?";
pub const NOT_UNDERSTOOD_TEXT: &str =
    "Je n'ai pas saisi votre demande, quelle oeuvre essayez-vous d'ajouter ?";

const TYPE_PHRASES: [(&str, &str); 3] =
    [("movie", "ce film"), ("serie", "cette série"), ("music", "cette musique")];

/// Turns a raw category into the phrase used in sentences. Each known keyword
/// is replaced once, in order; anything else passes through.
pub fn localize_type(kind: &str) -> String {
    TYPE_PHRASES.iter().fold(kind.to_string(), |phrase, (keyword, localized)| {
        phrase.replacen(keyword, localized, 1)
    })
}

/// Replaces the first `{type}` and then the first `{thing}` placeholder.
pub fn render(template: &str, type_phrase: &str, thing: &str) -> String {
    template.replacen("{type}", type_phrase, 1).replacen("{thing}", thing, 1)
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn with_version(text: &str, version_label: &str) -> String {
    format!("{text} {version_label}")
}
