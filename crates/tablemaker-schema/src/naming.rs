/*!
# Identifier Rules

Column names must be plain identifiers. Generated Rust names are derived from them
deterministically, so the same CSV always yields the same source text.
*/

use std::collections::HashSet;

/// Keywords that cannot be used as Rust identifiers without escaping.
const RUST_KEYWORDS: &[&str] = &[
    "Self", "abstract", "as", "async", "await", "become", "box", "break", "const", "continue",
    "crate", "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if",
    "impl", "in", "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv",
    "pub", "ref", "return", "self", "static", "struct", "super", "trait", "true", "try",
    "type", "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Type names already in scope inside a generated table module or the registry.
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "Arc",
    "AssetStore",
    "Deserialize",
    "FromRow",
    "None",
    "Ok",
    "Option",
    "RegistryLoadError",
    "Result",
    "RowValue",
    "Serialize",
    "Some",
    "String",
    "Table",
    "TableEnum",
    "TableRegistry",
    "Tables",
    "TypeCoercionError",
    "Vec",
];

/// Module names that would clash with the generated registry's methods or imports.
pub const RESERVED_MODULE_NAMES: &[&str] = &[
    "core",
    "new",
    "registry",
    "serde",
    "std",
    "tablemaker_runtime",
];

/// Why a name is not a valid identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentifierIssue {
    Empty,
    BadFirstChar(char),
    BadChar(char),
}

impl std::fmt::Display for IdentifierIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentifierIssue::Empty => write!(f, "name is empty"),
            IdentifierIssue::BadFirstChar(c) => {
                write!(f, "must start with a letter or '_', found '{}'", c)
            }
            IdentifierIssue::BadChar(c) => write!(f, "contains invalid character '{}'", c),
        }
    }
}

/// First char ASCII letter or `_`, then ASCII alphanumerics or `_`.
pub fn validate_identifier(name: &str) -> Result<(), IdentifierIssue> {
    let mut chars = name.chars();
    let first = chars.next().ok_or(IdentifierIssue::Empty)?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return Err(IdentifierIssue::BadFirstChar(first));
    }
    if let Some(bad) = chars.find(|c| !(c.is_ascii_alphanumeric() || *c == '_')) {
        return Err(IdentifierIssue::BadChar(bad));
    }
    Ok(())
}

pub fn is_keyword(name: &str) -> bool {
    RUST_KEYWORDS.contains(&name)
}

/// Split on non-alphanumerics and case boundaries: `IconPath` -> `Icon`, `Path`;
/// `HTTPServer` -> `HTTP`, `Server`.
fn words(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if c.is_ascii_uppercase() && !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars
                .get(i + 1)
                .map(|n| n.is_ascii_lowercase())
                .unwrap_or(false);
            if prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_is_lower)
            {
                words.push(std::mem::take(&mut current));
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

pub fn to_snake_case(text: &str) -> String {
    words(text)
        .iter()
        .map(|w| w.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

pub fn to_upper_camel_case(text: &str) -> String {
    words(text)
        .iter()
        .map(|w| {
            let lower = w.to_ascii_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect()
}

/// Make `base` usable as a Rust identifier: never empty, never starting with a digit,
/// never a keyword.
fn rustify(base: String, fallback: &str) -> String {
    let mut name = if base.is_empty() {
        fallback.to_string()
    } else {
        base
    };
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        name.insert(0, '_');
    }
    if is_keyword(&name) {
        name.push('_');
    }
    name
}

/// Record field name for a column.
pub fn field_ident(column: &str) -> String {
    rustify(to_snake_case(column), "field")
}

/// Type name for a table, enum or enum variant.
pub fn type_ident(text: &str, fallback: &str) -> String {
    rustify(to_upper_camel_case(text), fallback)
}

/// Return `base` if free, else `base{sep}2`, `base{sep}3`, ...; records the result in `taken`.
pub fn claim_unique(base: &str, separator: &str, taken: &mut HashSet<String>) -> String {
    if taken.insert(base.to_string()) {
        return base.to_string();
    }
    let mut n = 2;
    loop {
        let candidate = format!("{}{}{}", base, separator, n);
        if taken.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
