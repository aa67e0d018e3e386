//! Read-only lookups over the logical schema.
//!
//! All lookups return `Option` rather than raising, so callers can tell
//! "domain absent" from "model absent" from "column absent" and log a
//! targeted diagnostic.

use std::collections::HashMap;

use super::model::Model;
use super::repository::SchemaRepository;

/// Find a model inside a domain.
pub fn find_model<'a, R>(repository: &'a R, domain_id: &str, model_id: &str) -> Option<&'a Model>
where
    R: SchemaRepository + ?Sized,
{
    repository
        .domain(domain_id)?
        .models
        .iter()
        .find(|model| model.id == model_id)
}

/// Pick the best available locale for a requested one.
///
/// Matching is longest-prefix on `_`-separated subtags: a request for
/// `en_US` matches `en` when `en_US` itself is absent. Tags are compared
/// case-insensitively and `-` is treated as `_`.
pub fn closest_locale<'a>(
    requested: &str,
    available: impl Iterator<Item = &'a str>,
) -> Option<&'a str> {
    let wanted = normalize(requested);
    let mut best: Option<(&'a str, usize)> = None;

    for tag in available {
        let candidate = normalize(tag);
        if candidate == wanted {
            return Some(tag);
        }
        let is_prefix = wanted.starts_with(&candidate)
            && wanted.as_bytes().get(candidate.len()) == Some(&b'_');
        if is_prefix && best.map_or(true, |(_, len)| candidate.len() > len) {
            best = Some((tag, candidate.len()));
        }
    }

    best.map(|(tag, _)| tag)
}

fn normalize(tag: &str) -> String {
    tag.trim().replace('-', "_").to_lowercase()
}

/// Resolve a localized string from a locale-keyed map.
///
/// Falls back to `default_locale` when no available tag matches the
/// request; returns `None` when the map has neither.
pub fn localized<'a>(
    map: &'a HashMap<String, String>,
    requested: &str,
    default_locale: &str,
) -> Option<&'a str> {
    if let Some(tag) = closest_locale(requested, map.keys().map(String::as_str)) {
        return map.get(tag).map(String::as_str);
    }
    map.get(default_locale).map(String::as_str)
}
