//! Title slugs.

/// Convert a record title to its URL slug.
///
/// Lowercases, trims, replaces spaces with `-` and `&` with `and`.
/// Other characters pass through unchanged.
pub fn title_to_slug(title: &str) -> String {
    title
        .to_lowercase()
        .trim()
        .replace(' ', "-")
        .replace('&', "and")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_title() {
        assert_eq!(title_to_slug("Rocket Telemetry"), "rocket-telemetry");
    }

    #[test]
    fn test_ampersand_and_padding() {
        assert_eq!(title_to_slug("  Space & Time "), "space-and-time");
    }

    #[test]
    fn test_every_space_becomes_a_hyphen() {
        assert_eq!(title_to_slug("A  B"), "a--b");
    }

    #[test]
    fn test_punctuation_is_kept() {
        assert_eq!(title_to_slug("C++ Notes: Part 1"), "c++-notes:-part-1");
    }
}
