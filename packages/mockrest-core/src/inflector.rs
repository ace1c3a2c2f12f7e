//! Singular/plural rule table for resource names.
//!
//! Fixtures are loaded under plural collection names (`contacts`) while
//! handlers and lookups speak in singular types (`contact`). The rules here
//! are a small, explicit table: irregular pairs, uncountable words, then
//! suffix rules tried in order.

/// Irregular (singular, plural) pairs.
const IRREGULARS: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("wolf", "wolves"),
    ("datum", "data"),
    ("criterion", "criteria"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("quiz", "quizzes"),
    ("movie", "movies"),
    ("cookie", "cookies"),
    ("pie", "pies"),
    ("tie", "ties"),
    ("zombie", "zombies"),
    ("rookie", "rookies"),
    ("calorie", "calories"),
    ("selfie", "selfies"),
    ("shoe", "shoes"),
    ("toe", "toes"),
    ("canoe", "canoes"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("veto", "vetoes"),
];

/// Words with identical singular and plural forms.
const UNCOUNTABLES: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "police",
    "metadata",
];

/// Plural suffix -> singular replacement, tried in order.
const SINGULAR_RULES: &[(&str, &str)] = &[
    ("ies", "y"),
    ("sses", "ss"),
    ("shes", "sh"),
    ("ches", "ch"),
    ("xes", "x"),
    ("zzes", "z"),
    ("ouses", "ouse"),
    ("auses", "ause"),
    ("uses", "us"),
    ("ss", "ss"),
    ("us", "us"),
    ("is", "is"),
    ("s", ""),
];

/// Singular suffix -> plural replacement, tried in order.
const PLURAL_RULES: &[(&str, &str)] = &[
    ("ss", "sses"),
    ("sh", "shes"),
    ("ch", "ches"),
    ("x", "xes"),
    ("z", "zes"),
    ("us", "uses"),
    ("is", "es"),
    ("s", "s"),
];

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

/// Returns the singular form of a resource name.
///
/// Already-singular names are returned unchanged: `singularize("contact") == "contact"`.
pub fn singularize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULARS.iter().find(|(_, plural)| *plural == lower) {
        return with_prefix_case(word, singular);
    }
    if IRREGULARS.iter().any(|(singular, _)| *singular == lower) {
        return word.to_string();
    }
    for (suffix, replacement) in SINGULAR_RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.is_empty() {
                continue;
            }
            return format!("{}{}", stem, replacement);
        }
    }
    word.to_string()
}

/// Returns the plural form of a resource name.
///
/// Already-plural names are returned unchanged: `pluralize("contacts") == "contacts"`.
pub fn pluralize(word: &str) -> String {
    let lower = word.to_ascii_lowercase();
    if lower.is_empty() || UNCOUNTABLES.contains(&lower.as_str()) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULARS.iter().find(|(singular, _)| *singular == lower) {
        return with_prefix_case(word, plural);
    }
    if IRREGULARS.iter().any(|(_, plural)| *plural == lower) {
        return word.to_string();
    }
    if singularize(word) != word {
        return word.to_string();
    }
    if let Some(stem) = word.strip_suffix('y') {
        if !stem.is_empty() && !stem.ends_with(VOWELS) {
            return format!("{}ies", stem);
        }
    }
    for (suffix, replacement) in PLURAL_RULES {
        if let Some(stem) = word.strip_suffix(suffix) {
            return format!("{}{}", stem, replacement);
        }
    }
    format!("{}s", word)
}

/// Resolves a resource name from a request path.
///
/// Takes the first non-empty path segment, drops any query string, and
/// singularizes it: `"/contacts/1"` -> `"contact"`.
pub fn resource_name_from_path(path: &str) -> Option<String> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
        .find(|segment| !segment.is_empty())
        .map(singularize)
}

/// Keeps the capitalization of the first letter when substituting an irregular form.
fn with_prefix_case(word: &str, replacement: &str) -> String {
    match word.chars().next() {
        Some(first) if first.is_uppercase() => {
            let mut chars = replacement.chars();
            match chars.next() {
                Some(head) => head.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        }
        _ => replacement.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_singularize_regular() {
        assert_eq!(singularize("contacts"), "contact");
        assert_eq!(singularize("addresses"), "address");
        assert_eq!(singularize("categories"), "category");
        assert_eq!(singularize("boxes"), "box");
        assert_eq!(singularize("wishes"), "wish");
        assert_eq!(singularize("matches"), "match");
        assert_eq!(singularize("heroes"), "hero");
        assert_eq!(singularize("buses"), "bus");
        assert_eq!(singularize("statuses"), "status");
        assert_eq!(singularize("houses"), "house");
        assert_eq!(singularize("causes"), "cause");
    }

    #[test]
    fn test_singularize_ie_and_oe_words() {
        assert_eq!(singularize("movies"), "movie");
        assert_eq!(singularize("cookies"), "cookie");
        assert_eq!(singularize("Movies"), "Movie");
        assert_eq!(singularize("shoes"), "shoe");
        assert_eq!(singularize("canoes"), "canoe");
        assert_eq!(singularize("photos"), "photo");
    }

    #[test]
    fn test_plural_survives_singularize() {
        let words = [
            "contacts", "addresses", "categories", "days", "boxes", "wishes", "matches",
            "statuses", "buses", "houses", "causes", "movies", "cookies", "shoes", "heroes",
            "photos", "people", "children", "leaves", "quizzes", "sheep",
        ];
        for plural in words {
            assert_eq!(pluralize(&singularize(plural)), plural, "{plural}");
        }
    }

    #[test]
    fn test_singularize_is_idempotent() {
        for word in ["contact", "address", "category", "person", "status", "sheep"] {
            assert_eq!(singularize(word), word, "{word}");
        }
    }

    #[test]
    fn test_singularize_irregular_and_uncountable() {
        assert_eq!(singularize("people"), "person");
        assert_eq!(singularize("People"), "Person");
        assert_eq!(singularize("children"), "child");
        assert_eq!(singularize("sheep"), "sheep");
        assert_eq!(singularize("news"), "news");
    }

    #[test]
    fn test_pluralize_regular() {
        assert_eq!(pluralize("contact"), "contacts");
        assert_eq!(pluralize("address"), "addresses");
        assert_eq!(pluralize("category"), "categories");
        assert_eq!(pluralize("day"), "days");
        assert_eq!(pluralize("box"), "boxes");
        assert_eq!(pluralize("status"), "statuses");
    }

    #[test]
    fn test_pluralize_is_idempotent() {
        for word in ["contacts", "addresses", "categories", "people", "fish"] {
            assert_eq!(pluralize(word), word, "{word}");
        }
    }

    #[test]
    fn test_pluralize_irregular() {
        assert_eq!(pluralize("person"), "people");
        assert_eq!(pluralize("child"), "children");
        assert_eq!(pluralize("Mouse"), "Mice");
    }

    #[test]
    fn test_resource_name_from_path() {
        assert_eq!(resource_name_from_path("/contacts/1").as_deref(), Some("contact"));
        assert_eq!(resource_name_from_path("/contacts").as_deref(), Some("contact"));
        assert_eq!(resource_name_from_path("contacts/1/").as_deref(), Some("contact"));
        assert_eq!(
            resource_name_from_path("/addresses?contact_id=1").as_deref(),
            Some("address")
        );
        assert_eq!(resource_name_from_path("/movies/1").as_deref(), Some("movie"));
        assert_eq!(resource_name_from_path("/shoes").as_deref(), Some("shoe"));
        assert_eq!(resource_name_from_path("/"), None);
        assert_eq!(resource_name_from_path(""), None);
    }
}
