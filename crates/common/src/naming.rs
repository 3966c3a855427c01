//! Identifier transliteration for the Rust target
//!
//! Origin identifiers are camelCase/PascalCase. Word boundaries go before an
//! uppercase letter that follows a lowercase letter or digit, and before the
//! last capital of an acronym run that starts a new word ("SSLConfig" becomes
//! "ssl_config").

/// Rust strict and reserved keywords
pub const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl",
    "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords rustc refuses as raw identifiers; these get a trailing underscore
pub const NON_RAW_KEYWORDS: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Raw identifier marker prepended to escaped keywords
pub const RAW_IDENT_PREFIX: &str = "r#";

/// Convert an origin identifier to snake_case
///
/// # Examples
/// ```
/// use sdk_bindgen_common::naming::to_snake_case;
///
/// assert_eq!(to_snake_case("displayName"), "display_name");
/// assert_eq!(to_snake_case("InstanceLifecycleState"), "instance_lifecycle_state");
/// assert_eq!(to_snake_case("SSLConfig"), "ssl_config");
/// ```
pub fn to_snake_case(s: &str) -> String {
    let mut result = String::with_capacity(s.len() + 4);
    let chars: Vec<char> = s.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if ch.is_uppercase() {
            let boundary = i > 0
                && (chars[i - 1].is_lowercase()
                    || chars[i - 1].is_ascii_digit()
                    || (chars[i - 1].is_uppercase()
                        && i + 1 < chars.len()
                        && chars[i + 1].is_lowercase()));
            if boundary && !result.ends_with('_') {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else if ch == '-' || ch == ' ' || ch == '.' {
            if !result.is_empty() && !result.ends_with('_') {
                result.push('_');
            }
        } else {
            result.push(ch);
        }
    }

    while result.contains("__") {
        result = result.replace("__", "_");
    }

    result.trim_matches('_').to_string()
}

/// Whether a transliterated name collides with a Rust keyword
pub fn is_rust_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Prefix `name` with `r#` when it is a Rust keyword
///
/// `self`, `Self`, `super`, `crate` and `_` cannot be raw identifiers and
/// get a trailing `_` instead.
pub fn escape_keyword(name: &str) -> String {
    if NON_RAW_KEYWORDS.contains(&name) {
        format!("{name}_")
    } else if is_rust_keyword(name) {
        format!("{RAW_IDENT_PREFIX}{name}")
    } else {
        name.to_string()
    }
}

/// Target-language field name: transliterate first, then escape
///
/// # Examples
/// ```
/// use sdk_bindgen_common::naming::target_field_name;
///
/// assert_eq!(target_field_name("type"), "r#type");
/// assert_eq!(target_field_name("faultDomain"), "fault_domain");
/// assert_eq!(target_field_name("self"), "self_");
/// ```
pub fn target_field_name(origin: &str) -> String {
    let snake = to_snake_case(origin);
    if snake.is_empty() {
        // Nothing but separators, e.g. `_`
        return escape_keyword("_");
    }
    escape_keyword(&snake)
}
