//! Slug predicate shared by locations and stores.
//!
//! Slugs are the public handles visitors see in generator and validator
//! URLs: trimmed, non-empty, lowercase ASCII letters, digits and hyphens.

/// Return `true` when `value` is a valid slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::is_valid_slug;

    #[rstest]
    #[case("loc-gangnam", true)]
    #[case("store-cafe-gangnam", true)]
    #[case("seoul2", true)]
    #[case("", false)]
    #[case(" loc", false)]
    #[case("Loc-Gangnam", false)]
    #[case("loc_gangnam", false)]
    #[case("-loc", false)]
    #[case("loc-", false)]
    fn validates_slugs(#[case] value: &str, #[case] expected: bool) {
        assert_eq!(is_valid_slug(value), expected);
    }
}
