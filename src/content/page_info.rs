//! Extraction of page metadata for welcome emails.

use once_cell::sync::Lazy;
use regex::Regex;

use super::decode_entities;
use crate::models::PageInfo;

const TITLE_MAX_CHARS: usize = 150;
const DESCRIPTION_MAX_CHARS: usize = 300;

static TITLE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<title[^>]*>([^<]+)</title>").expect("valid regex"));
static META_DESCRIPTION_NAME_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*name=["']description["'][^>]*content=["']([^"']+)["']"#)
        .expect("valid regex")
});
static META_DESCRIPTION_CONTENT_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)<meta[^>]*content=["']([^"']+)["'][^>]*name=["']description["']"#)
        .expect("valid regex")
});

/// Extracts the title and meta description from raw markup.
///
/// Both fields are entity-decoded and truncated. Absent or unparsable fields
/// come back as `None`; extraction never fails.
pub fn extract_page_info(raw_markup: &str) -> PageInfo {
    let title = TITLE
        .captures(raw_markup)
        .map(|caps| truncate_chars(&decode_entities(caps[1].trim()), TITLE_MAX_CHARS));

    let description = META_DESCRIPTION_NAME_FIRST
        .captures(raw_markup)
        .or_else(|| META_DESCRIPTION_CONTENT_FIRST.captures(raw_markup))
        .map(|caps| truncate_chars(&decode_entities(caps[1].trim()), DESCRIPTION_MAX_CHARS));

    PageInfo { title, description }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_title_and_description() {
        let html = r#"<html><head>
            <title>Senior Rust Engineer</title>
            <meta name="description" content="Build monitoring infrastructure">
        </head><body></body></html>"#;

        let info = extract_page_info(html);
        assert_eq!(info.title.as_deref(), Some("Senior Rust Engineer"));
        assert_eq!(info.description.as_deref(), Some("Build monitoring infrastructure"));
    }

    #[test]
    fn test_meta_description_with_content_attribute_first() {
        let html = r#"<meta content="Reversed order works too" name="description">"#;
        let info = extract_page_info(html);
        assert_eq!(info.description.as_deref(), Some("Reversed order works too"));
    }

    #[test]
    fn test_entities_decoded_in_extracted_fields() {
        let html = r#"<title>R&amp;D Lead</title>"#;
        let info = extract_page_info(html);
        assert_eq!(info.title.as_deref(), Some("R&D Lead"));
    }

    #[test]
    fn test_title_truncated() {
        let long_title = "x".repeat(400);
        let html = format!("<title>{long_title}</title>");
        let info = extract_page_info(&html);
        assert_eq!(info.title.unwrap().chars().count(), 150);
    }

    #[test]
    fn test_missing_fields_are_none() {
        let info = extract_page_info("<html><body>no head</body></html>");
        assert_eq!(info, PageInfo::default());
    }
}
