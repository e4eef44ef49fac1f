//! `#photo-<N>` URL-fragment protocol.
//!
//! N is the 1-based photo number. Anything that is not exactly this
//! shape, or whose number falls outside the catalog, is ignored; other
//! page logic may own those fragments.

const PREFIX: &str = "photo-";

/// Canonical fragment for the photo at 0-based `index` (no leading `#`).
pub fn format_fragment(index: usize) -> String {
    format!("{PREFIX}{}", index + 1)
}

/// Parse a fragment into a 0-based catalog index.
///
/// Accepts an optional leading `#`. Returns `None` for unrecognized
/// shapes and out-of-range numbers (including 0).
pub fn parse_fragment(fragment: &str, catalog_len: usize) -> Option<usize> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    let digits = fragment.strip_prefix(PREFIX)?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let number: usize = digits.parse().ok()?;
    if number == 0 || number > catalog_len {
        return None;
    }
    Some(number - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn formats_one_based() {
        assert_eq!(format_fragment(0), "photo-1");
        assert_eq!(format_fragment(14), "photo-15");
    }

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_fragment("photo-3", 15), Some(2));
        assert_eq!(parse_fragment("#photo-3", 15), Some(2));
    }

    #[test]
    fn out_of_range_is_ignored() {
        assert_eq!(parse_fragment("photo-0", 15), None);
        assert_eq!(parse_fragment("photo-16", 15), None);
        assert_eq!(parse_fragment("photo-9999", 15), None);
        assert_eq!(parse_fragment("photo-1", 0), None);
    }

    #[test]
    fn unrecognized_shapes_are_ignored() {
        assert_eq!(parse_fragment("gallery", 15), None);
        assert_eq!(parse_fragment("photo-", 15), None);
        assert_eq!(parse_fragment("photo-1a", 15), None);
        assert_eq!(parse_fragment("photo--1", 15), None);
        assert_eq!(parse_fragment("photo-+2", 15), None);
        assert_eq!(parse_fragment("", 15), None);
    }

    proptest! {
        #[test]
        fn roundtrip_within_bounds(len in 1usize..500, index in 0usize..500) {
            let index = index % len;
            prop_assert_eq!(parse_fragment(&format_fragment(index), len), Some(index));
        }
    }
}
