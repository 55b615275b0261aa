//! Page metadata captured at monitor-creation time.

/// Title and description extracted from a page, used in welcome emails.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    /// Decoded `<title>` text, truncated.
    pub title: Option<String>,
    /// Decoded meta description, truncated.
    pub description: Option<String>,
}
