//! Base-name derivation: JSON key (or root name) → PascalCase, singular identifier.
//!
//! Singularization is a suffix heuristic, not a dictionary. `status` becomes
//! `Statu`, `address` stays `Address` (trailing `ss`), `categories` becomes
//! `Category`. Callers must not rely on anything smarter.

const FALLBACK: &str = "Unnamed";

pub fn derive_base_name(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();
    if cleaned.is_empty() {
        return FALLBACK.to_string();
    }

    let pascal = if cleaned.contains('_') {
        cleaned
            .split('_')
            .map(|part| capitalize(&part.to_ascii_lowercase()))
            .collect::<String>()
    } else {
        capitalize(&cleaned)
    };

    singularize(pascal)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

// input is ASCII by construction, byte offsets are char offsets
fn singularize(mut name: String) -> String {
    if name.ends_with("ies") && name.len() > 3 {
        name.truncate(name.len() - 3);
        name.push('y');
    } else if name.ends_with('s') && !name.ends_with("ss") && name.len() > 1 {
        name.pop();
    }
    name
}
