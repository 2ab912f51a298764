use once_cell::sync::Lazy;
use regex::Regex;

// Match page links look like `/match/2345678/`; the digits are the match
// code used as the cross-stage join key.
static MATCH_CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/match/(\d+)/").expect("regex"));

/// Every match code referenced by a tournament listing page, in document
/// order, duplicates preserved. Listing pages link each match more than
/// once; the download stage dedups across all listing files anyway.
pub fn extract_match_codes(html: &str) -> Vec<String> {
    MATCH_CODE_RE
        .captures_iter(html)
        .map(|caps| caps[1].to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::extract_match_codes;

    #[test]
    fn finds_codes_in_document_order() {
        let html = r#"<a href="/match/111/">a</a> <a href="/match/222/">b</a>
                      <a href="/match/111/">again</a>"#;
        assert_eq!(extract_match_codes(html), vec!["111", "222", "111"]);
    }

    #[test]
    fn ignores_other_links() {
        let html = r#"<a href="/team/West-Ham/">t</a> <a href="/match/nope/">x</a>"#;
        assert!(extract_match_codes(html).is_empty());
    }
}
