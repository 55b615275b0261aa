//! Reduction of raw page markup to canonical comparable text.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static SCRIPT_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script\b.*?</script>").expect("valid regex"));
static STYLE_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style\b.*?</style>").expect("valid regex"));
static COMMENT_BLOCKS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").expect("valid regex"));
static TAGS: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));
static NAMED_ENTITIES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)&(nbsp|amp|lt|gt|quot|apos);").expect("valid regex"));
static DECIMAL_REFS: Lazy<Regex> = Lazy::new(|| Regex::new(r"&#([0-9]+);").expect("valid regex"));
static HEX_REFS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"&#x([0-9a-fA-F]+);").expect("valid regex"));
static WHITESPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Reduces raw page markup to canonical plain text.
///
/// Script, style, and comment blocks are removed outright. Every remaining
/// tag becomes a single space so words do not concatenate across tag
/// boundaries. HTML entities are decoded, then whitespace runs collapse to a
/// single space and the result is trimmed.
pub fn normalize(raw_markup: &str) -> String {
    let text = SCRIPT_BLOCKS.replace_all(raw_markup, "");
    let text = STYLE_BLOCKS.replace_all(&text, "");
    let text = COMMENT_BLOCKS.replace_all(&text, "");
    let text = TAGS.replace_all(&text, " ");
    let text = decode_entities(&text);
    WHITESPACE_RUNS.replace_all(&text, " ").trim().to_string()
}

/// Decodes the common named entities plus decimal (`&#NNN;`) and hexadecimal
/// (`&#xHHHH;`) numeric character references. References that do not map to a
/// valid character are left untouched.
pub(crate) fn decode_entities(text: &str) -> String {
    let text = NAMED_ENTITIES.replace_all(text, |caps: &Captures| {
        match caps[1].to_ascii_lowercase().as_str() {
            "nbsp" => " ",
            "amp" => "&",
            "lt" => "<",
            "gt" => ">",
            "quot" => "\"",
            "apos" => "'",
            _ => return caps[0].to_string(),
        }
        .to_string()
    });

    let text = DECIMAL_REFS.replace_all(&text, |caps: &Captures| {
        caps[1]
            .parse::<u32>()
            .ok()
            .and_then(char::from_u32)
            .map(String::from)
            .unwrap_or_else(|| caps[0].to_string())
    });

    HEX_REFS
        .replace_all(&text, |caps: &Captures| {
            u32::from_str_radix(&caps[1], 16)
                .ok()
                .and_then(char::from_u32)
                .map(String::from)
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
