//! Stable keys derived from display labels.

/// Convert a display label to a lowercase, hyphenated key.
///
/// ASCII alphanumerics are kept (lowercased); every run of other characters
/// becomes one hyphen; leading and trailing hyphens are dropped. The mapping
/// does not depend on locale and `slugify(slugify(x)) == slugify(x)`.
///
/// ```
/// use aac_normalization::slugify;
///
/// assert_eq!(slugify("Litres of Beverage"), "litres-of-beverage");
/// assert_eq!(slugify("  Spirits -- Per Head! "), "spirits-per-head");
/// ```
pub fn slugify(label: &str) -> String {
    let mut slug = String::with_capacity(label.len());
    let mut pending_separator = false;
    for ch in label.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            pending_separator = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_separator = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_labels() {
        assert_eq!(slugify("Beer"), "beer");
        assert_eq!(slugify("Spirits Per Head"), "spirits-per-head");
        assert_eq!(slugify("Wine (incl. fortified)"), "wine-incl-fortified");
    }

    #[test]
    fn test_case_and_punctuation_equivalence() {
        assert_eq!(slugify("Litres of Beverage"), slugify("LITRES_OF_BEVERAGE"));
        assert_eq!(slugify("Beer/Cider"), slugify("beer - cider"));
        assert_ne!(slugify("Beer"), slugify("Beers"));
    }

    #[test]
    fn test_edges() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("---"), "");
        assert_eq!(slugify("  a  "), "a");
        assert_eq!(slugify("Cidre é"), "cidre");
    }
}
