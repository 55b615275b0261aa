//! Message bodies for outbound email.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::models::PageInfo;

/// Maximum number of canonical-text characters included in a change alert.
const PREVIEW_CHARS: usize = 600;

/// Maximum number of title characters carried into a welcome-email subject.
const SUBJECT_TITLE_CHARS: usize = 50;

/// Builds the subject and body for the alert sent when a monitored page
/// changes. The body carries a truncated preview of the canonical text.
pub fn change_alert(
    url: &str,
    detected_at: DateTime<Utc>,
    canonical_text: &str,
) -> (String, String) {
    let preview: String = canonical_text.chars().take(PREVIEW_CHARS).collect();
    let marker = if canonical_text.chars().count() > PREVIEW_CHARS { "..." } else { "" };

    let body = format!(
        "The page you're tracking has changed!\n\n\
         URL: {url}\n\n\
         Detected at: {}\n\n\
         Content preview:\n{preview}{marker}\n\n\
         ---\nPageWatch",
        detected_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    );

    ("Page changed".to_string(), body)
}

/// Builds the subject and body for the welcome email sent after a monitor is
/// created.
pub fn welcome(url: &str, page_info: &PageInfo) -> (String, String) {
    let subject = match &page_info.title {
        Some(title) => format!(
            "Now monitoring: {}",
            title.chars().take(SUBJECT_TITLE_CHARS).collect::<String>()
        ),
        None => "Now monitoring your page".to_string(),
    };

    let heading = page_info.title.as_deref().unwrap_or("Your page");
    let description = match &page_info.description {
        Some(description) => format!("{description}\n\n"),
        None => String::new(),
    };

    let body = format!(
        "You're now monitoring this page!\n\n\
         {heading}\n\n\
         {url}\n\n\
         {description}We'll check the page daily and email you as soon as anything changes.\n\n\
         ---\nPageWatch"
    );

    (subject, body)
}
