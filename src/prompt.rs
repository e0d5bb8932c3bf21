//! Prompt construction

/// Builds the provider prompt for a video title.
///
/// The title is embedded verbatim, so callers validate it beforehand.
pub fn thumbnail_prompt(title: &str) -> String {
    format!(
        "YouTube thumbnail for '{title}', cinematic, high detail, vibrant colors, 16:9, no text"
    )
}
