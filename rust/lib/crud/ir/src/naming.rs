//! Identifier derivation: case conversion and the pluralization policy.

use heck::{ToKebabCase, ToLowerCamelCase, ToUpperCamelCase};

/// Suffix appended to nouns whose plural equals the singular.
pub const LIST_SUFFIX: &str = "List";

/// Nouns with no distinct plural. Pluralizing one yields `<word>List`.
const UNCOUNTABLE: &[&str] = &[
    "advice", "aircraft", "bison", "data", "deer", "equipment", "evidence", "feedback",
    "firmware", "fish", "furniture", "hardware", "homework", "information", "jeans",
    "knowledge", "luggage", "media", "metadata", "money", "moose", "music", "news",
    "offspring", "police", "research", "rice", "salmon", "series", "sheep", "software",
    "species", "staff", "swine", "traffic", "trout",
];

/// Singular nouns ending in a plain `s` that would otherwise read as plurals.
const SINGULAR_S: &[&str] = &[
    "alias", "atlas", "bias", "canvas", "gas", "lens", "plus", "yes",
];

const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("criterion", "criteria"),
    ("datum", "data"),
    ("echo", "echoes"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("half", "halves"),
    ("hero", "heroes"),
    ("knife", "knives"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("man", "men"),
    ("matrix", "matrices"),
    ("mouse", "mice"),
    ("ox", "oxen"),
    ("person", "people"),
    ("potato", "potatoes"),
    ("quiz", "quizzes"),
    ("shelf", "shelves"),
    ("thief", "thieves"),
    ("tomato", "tomatoes"),
    ("tooth", "teeth"),
    ("vertex", "vertices"),
    ("wife", "wives"),
    ("wolf", "wolves"),
    ("woman", "women"),
];

/// `UserProfile` → `userProfile`.
pub fn property_name(s: &str) -> String {
    s.to_lower_camel_case()
}

/// `content-editor` → `ContentEditor`.
pub fn pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// `UserProfile` → `user-profile`.
pub fn kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// Lowercase only the first character: `HTTPLog` → `hTTPLog`.
///
/// This is how the Prisma client names model delegates.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
    }
}

/// English pluralization of an identifier.
///
/// Only the last word of a PascalCase / snake_case identifier is inflected:
/// `UserProfile` → `UserProfiles`, `Category` → `Categories`.
/// Uncountable nouns get [`LIST_SUFFIX`] instead: `Equipment` → `EquipmentList`.
pub fn pluralize(word: &str) -> String {
    if word.is_empty() {
        return String::new();
    }
    let (head, last) = split_last_word(word);
    let lower = last.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return format!("{}{}", word, LIST_SUFFIX);
    }

    let plural = match IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        Some((_, plural)) => format!("{}{}", head, match_case(last, plural)),
        None => format!("{}{}", head, pluralize_regular(last)),
    };

    if plural == word {
        format!("{}{}", word, LIST_SUFFIX)
    } else {
        plural
    }
}

fn pluralize_regular(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.ends_with('y') {
        // Consonant + y: category -> categories
        let before_y = lower.chars().rev().nth(1);
        if before_y.is_some_and(|c| !"aeiou".contains(c)) {
            return format!("{}ies", &word[..word.len() - 1]);
        }
        return format!("{}s", word);
    }
    if is_plural_s(&lower) {
        // Already plural (settings, users): the plural equals the singular.
        return word.to_string();
    }
    if lower.ends_with("sis") {
        // analysis -> analyses
        return format!("{}es", &word[..word.len() - 2]);
    }
    if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("sh")
        || lower.ends_with("ch")
    {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

/// A final `s` marks a plural unless it is part of `ss`, `us` or `is`.
fn is_plural_s(lower: &str) -> bool {
    lower.ends_with('s')
        && !lower.ends_with("ss")
        && !lower.ends_with("us")
        && !lower.ends_with("is")
        && !SINGULAR_S.contains(&lower)
}

/// Split an identifier into everything before its last word and the last word.
fn split_last_word(word: &str) -> (&str, &str) {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut start = 0;
    for i in 1..chars.len() {
        let (idx, ch) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|(_, c)| c.is_lowercase());
        if prev == '_' || prev == '-' {
            start = idx;
        } else if ch.is_uppercase()
            && (prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower))
        {
            start = idx;
        }
    }
    word.split_at(start)
}

/// Apply the capitalization of `original` to `replacement`.
fn match_case(original: &str, replacement: &str) -> String {
    let upper_count = original.chars().filter(|c| c.is_uppercase()).count();
    if original.chars().count() > 1 && upper_count == original.chars().count() {
        return replacement.to_uppercase();
    }
    if original.chars().next().is_some_and(char::is_uppercase) {
        let mut chars = replacement.chars();
        if let Some(first) = chars.next() {
            return first.to_uppercase().collect::<String>() + chars.as_str();
        }
    }
    replacement.to_string()
}
