//! Localized error message bundles.
//!
//! Message text is keyed by error code and resolved through the same
//! longest-prefix locale matching as schema display names.

use once_cell::sync::Lazy;
use std::collections::HashMap;

use crate::schema::accessor::closest_locale;

type Bundle = HashMap<&'static str, &'static str>;

static BUNDLES: Lazy<HashMap<&'static str, Bundle>> = Lazy::new(|| {
    let mut en = Bundle::new();
    en.insert(super::codes::MALFORMED_QUERY, "The query could not be read.");
    en.insert(
        super::codes::INVALID_MODEL_ID,
        "The model id is not of the form provider~domain~model.",
    );
    en.insert(super::codes::UNKNOWN_MODEL, "The requested model was not found.");
    en.insert(
        super::codes::UNRESOLVED_REFERENCE,
        "The query references a column the model does not contain.",
    );
    en.insert(super::codes::EXECUTION_FAILED, "The query could not be executed.");
    en.insert(super::codes::ENCODING_FAILED, "The result could not be encoded.");

    let mut de = Bundle::new();
    de.insert(
        super::codes::MALFORMED_QUERY,
        "Die Abfrage konnte nicht gelesen werden.",
    );
    de.insert(
        super::codes::INVALID_MODEL_ID,
        "Die Modell-Id hat nicht die Form provider~domain~model.",
    );
    de.insert(
        super::codes::UNKNOWN_MODEL,
        "Das angeforderte Modell wurde nicht gefunden.",
    );
    de.insert(
        super::codes::UNRESOLVED_REFERENCE,
        "Die Abfrage verweist auf eine Spalte, die das Modell nicht enth\u{e4}lt.",
    );
    de.insert(
        super::codes::EXECUTION_FAILED,
        "Die Abfrage konnte nicht ausgef\u{fc}hrt werden.",
    );
    de.insert(
        super::codes::ENCODING_FAILED,
        "Das Ergebnis konnte nicht kodiert werden.",
    );

    let mut bundles = HashMap::new();
    bundles.insert("en", en);
    bundles.insert("de", de);
    bundles
});

/// Look up the message for an error code, in the closest available locale.
/// Falls back to English; returns `None` only for unknown codes.
pub fn lookup(code: &str, locale: &str) -> Option<&'static str> {
    let tag = closest_locale(locale, BUNDLES.keys().copied()).unwrap_or("en");
    BUNDLES
        .get(tag)
        .and_then(|bundle| bundle.get(code))
        .or_else(|| BUNDLES.get("en").and_then(|bundle| bundle.get(code)))
        .copied()
}
