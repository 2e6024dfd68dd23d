use once_cell::sync::Lazy;
use regex::Regex;

static SPECIAL_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^A-Za-z0-9_\s]").expect("valid special character pattern"));
static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("valid space pattern"));

/// Fallback search term: drops punctuation and symbols, collapses spaces
pub fn normalize(text: &str) -> String {
    let stripped = SPECIAL_CHARS.replace_all(text, "");
    let collapsed = SPACE_RUNS.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_punctuation() {
        assert_eq!(normalize("rock & roll!!"), "rock roll");
        assert_eq!(normalize("AC/DC - T.N.T."), "ACDC TNT");
    }

    #[test]
    fn test_keeps_word_characters() {
        assert_eq!(normalize("daft_punk 1997"), "daft_punk 1997");
    }

    #[test]
    fn test_drops_non_ascii_letters() {
        assert_eq!(normalize("Björk"), "Bjrk");
    }

    #[test]
    fn test_trims_and_collapses() {
        assert_eq!(normalize("  ***  a   b  "), "a b");
        assert_eq!(normalize("!!!"), "");
    }

    #[test]
    fn test_only_spaces_are_collapsed() {
        assert_eq!(normalize("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_clean_query_is_unchanged() {
        assert_eq!(normalize("daft punk"), "daft punk");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "rock & roll!!",
            "  spaced   out  ",
            "mixed\t \tspace",
            "Sigur Rós - Ágætis byrjun",
            "",
            "¯\\_(ツ)_/¯",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "normalize({:?})", input);
        }
    }

    #[test]
    fn test_output_character_set() {
        let out = normalize("Hello, World! (live @ 2001) ~ remix #2");
        assert_eq!(out, "Hello World live 2001 remix 2");
        assert!(out
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace()));
        assert!(!out.contains("  "));
    }
}
