//! Body-class derivation from the host's template hierarchy.
//!
//! The host hands over its candidate templates most-specific first; the
//! derived classes read least-specific first so base styles cascade. Compiled
//! template variants and the fallback identifier carry no semantic meaning at
//! the body level and are skipped.

/// Sentinel class that always opens the derived list.
pub const BASE_CLASS: &str = "base-data";

/// The hierarchy's catch-all identifier; never meaningful as a class.
pub const FALLBACK_TEMPLATE: &str = "index";

/// Marker found in compiled-template variant identifiers.
pub const COMPILED_MARKER: &str = ".compiled";

/// File-type suffix stripped from template identifiers before use.
const TEMPLATE_SUFFIX: &str = ".tpl";

/// Derive the ordered class list for a template hierarchy.
///
/// Pure function: reverses the host's order, opens with the sentinel, skips
/// the fallback and compiled variants, and maps each remaining identifier to
/// `<stem>-data`.
pub fn body_classes<S: AsRef<str>>(hierarchy: &[S]) -> Vec<String> {
    let mut classes = vec![BASE_CLASS.to_string()];
    for identifier in hierarchy.iter().rev() {
        let identifier = identifier.as_ref();
        if identifier == FALLBACK_TEMPLATE || identifier.contains(COMPILED_MARKER) {
            continue;
        }
        let stem = identifier.strip_suffix(TEMPLATE_SUFFIX).unwrap_or(identifier);
        classes.push(format!("{stem}-data"));
    }
    classes
}

/// Hook form: append derived classes to the host's class list.
///
/// Existing entries are never removed or reordered.
pub fn append_body_classes<S: AsRef<str>>(existing: &mut Vec<String>, hierarchy: &[S]) {
    existing.extend(body_classes(hierarchy));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reverses_and_skips_the_fallback() {
        let classes = body_classes(&["single-post", "single", "index"]);
        assert_eq!(classes, vec!["base-data", "single-data", "single-post-data"]);
    }

    #[test]
    fn compiled_variants_are_skipped() {
        let classes = body_classes(&["page-contact.compiled", "page", "index"]);
        assert_eq!(classes, vec!["base-data", "page-data"]);
    }

    #[test]
    fn template_suffix_is_stripped() {
        let classes = body_classes(&["page.tpl"]);
        assert_eq!(classes, vec!["base-data", "page-data"]);
    }

    #[test]
    fn empty_hierarchy_still_yields_the_sentinel() {
        let classes = body_classes::<&str>(&[]);
        assert_eq!(classes, vec!["base-data"]);
    }

    #[test]
    fn append_preserves_existing_entries() {
        let mut body = vec!["logged-in".to_string(), "rtl".to_string()];
        append_body_classes(&mut body, &["single", "index"]);
        assert_eq!(body, vec!["logged-in", "rtl", "base-data", "single-data"]);
    }
}
