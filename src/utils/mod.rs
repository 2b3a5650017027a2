//! Small pure helpers shared across the crate.

/// Irregular plural forms that the suffix rules below cannot derive.
const IRREGULAR_PLURALS: [(&str, &str); 7] = [
    ("people", "person"),
    ("men", "man"),
    ("children", "child"),
    ("mice", "mouse"),
    ("geese", "goose"),
    ("feet", "foot"),
    ("teeth", "tooth"),
];

/// Uppercase the first letter, leaving the rest of the string untouched.
///
/// This is the canonicalization rule for content type names: `"articles"`
/// and `"Articles"` collapse onto the same registry key.
#[must_use]
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive the singular form of an English plural noun.
///
/// Deterministic suffix rules plus a small irregulars table. Words already
/// singular-looking (`"Status"`, `"Glass"`, `"Analysis"`) pass through
/// unchanged. Runs once at registration; nothing re-derives at request time.
#[must_use]
pub fn singularize(input: &str) -> String {
    let lower = input.to_lowercase();

    for (plural, singular) in IRREGULAR_PLURALS {
        if lower == plural {
            return match_case(singular, input);
        }
    }

    if let Some(stem) = input.strip_suffix("ies") {
        if !stem.is_empty() {
            return format!("{stem}y");
        }
    }

    for suffix in ["xes", "ches", "shes", "sses", "zes"] {
        if lower.ends_with(suffix) {
            if let Some(stem) = input.strip_suffix("es") {
                return stem.to_string();
            }
        }
    }

    // Trailing-s words that are not plurals keep their form.
    for keep in ["ss", "us", "is"] {
        if lower.ends_with(keep) {
            return input.to_string();
        }
    }

    if let Some(stem) = input.strip_suffix('s') {
        if !stem.is_empty() {
            return stem.to_string();
        }
    }

    input.to_string()
}

/// Carry the leading-letter case of `reference` over to `word`.
fn match_case(word: &str, reference: &str) -> String {
    if reference.chars().next().is_some_and(char::is_uppercase) {
        capitalize(word)
    } else {
        word.to_string()
    }
}
