//! Counter key normalization

/// Normalize a raw token into a counter key
///
/// Only ASCII letters survive, lower-cased. Hyphens at the edges are trimmed
/// first, although letter filtering would drop them anyway. Input with no
/// letters yields an empty key.
pub fn normalize(token: &str) -> String {
    token
        .trim_matches('-')
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_operators() {
        assert_eq!(normalize("alice++"), "alice");
        assert_eq!(normalize("Bob--"), "bob");
        assert_eq!(normalize("carol+=5"), "carol");
        assert_eq!(normalize("@Dave:"), "dave");
    }

    #[test]
    fn test_normalize_hyphens_and_digits() {
        assert_eq!(normalize("-mary-jane-"), "maryjane");
        assert_eq!(normalize("r2d2"), "rd");
    }

    #[test]
    fn test_normalize_non_ascii_dropped() {
        assert_eq!(normalize("zoë"), "zo");
        assert_eq!(normalize("Ünïcode"), "ncode");
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("++"), "");
        assert_eq!(normalize("42"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let samples = [
            "alice++", "-Bob-", "CAROL+=12", "d.a.v.e", "", "---", "x-y-z", "Ünïcode", "MiXeD_case",
        ];

        for sample in samples {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "not idempotent for {:?}", sample);
        }
    }
}
