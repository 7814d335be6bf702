//! Portuguese <-> English genre names.
//!
//! Only genres listed here can be asked for by name in the chat.

/// (Portuguese, English) pairs; Portuguese names are lowercase.
pub const GENRE_TRANSLATIONS: [(&str, &str); 19] = [
    ("ação", "Action"),
    ("aventura", "Adventure"),
    ("animação", "Animation"),
    ("comédia", "Comedy"),
    ("crime", "Crime"),
    ("documentário", "Documentary"),
    ("drama", "Drama"),
    ("família", "Family"),
    ("fantasia", "Fantasy"),
    ("história", "History"),
    ("terror", "Horror"),
    ("música", "Music"),
    ("mistério", "Mystery"),
    ("romance", "Romance"),
    ("ficção científica", "Science Fiction"),
    ("cinema tv", "TV Movie"),
    ("suspense", "Thriller"),
    ("guerra", "War"),
    ("faroeste", "Western"),
];

/// English genre for a lowercase Portuguese name
pub fn to_english(portuguese: &str) -> Option<&'static str> {
    GENRE_TRANSLATIONS
        .iter()
        .find(|(pt, _)| *pt == portuguese)
        .map(|(_, en)| *en)
}

/// Portuguese name for an English genre, or the English name when there
/// is no translation.
pub fn to_portuguese(english: &str) -> &str {
    GENRE_TRANSLATIONS
        .iter()
        .find(|(_, en)| *en == english)
        .map(|(pt, _)| *pt)
        .unwrap_or(english)
}

pub fn portuguese_names() -> impl Iterator<Item = &'static str> {
    GENRE_TRANSLATIONS.iter().map(|(pt, _)| *pt)
}

/// Upper-case the first character and lower-case the rest.
///
/// Example: "ficção científica" -> "Ficção científica"
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_directions() {
        assert_eq!(to_english("ação"), Some("Action"));
        assert_eq!(to_english("ficção científica"), Some("Science Fiction"));
        assert_eq!(to_english("Ação"), None);
        assert_eq!(to_portuguese("Thriller"), "suspense");
        assert_eq!(to_portuguese("Foreign"), "Foreign");
    }

    #[test]
    fn test_table_is_bijective() {
        for (pt, en) in GENRE_TRANSLATIONS {
            assert_eq!(to_english(pt), Some(en));
            assert_eq!(to_portuguese(en), pt);
        }
        assert_eq!(portuguese_names().count(), 19);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("ação"), "Ação");
        assert_eq!(capitalize("ficção científica"), "Ficção científica");
        assert_eq!(capitalize("TV Movie"), "Tv movie");
        assert_eq!(capitalize(""), "");
    }
}
