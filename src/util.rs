//! Shared utilities for the skilltree codebase

use std::fmt;

/// A string wrapper that masks its contents in Debug/Display output.
/// Keeps API keys out of logs and error messages.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: String) -> Self {
        Self(s)
    }

    /// Intentionally access the raw secret value (for the authorization header)
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "***")
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<&str> for SecretString {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Pull a JSON object out of a model reply.
///
/// Replies that open with a code fence have every fence line dropped. Replies
/// with prose around a fenced or bare object fall back to the first fence body
/// or the outermost `{...}` span. Anything else is returned trimmed.
pub fn extract_json_block(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.starts_with("```") {
        return trimmed
            .lines()
            .filter(|line| !line.trim().starts_with("```"))
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string();
    }

    if let Some(start) = trimmed.find("```") {
        let body = &trimmed[start + 3..];
        // skip the info string ("json", "JSON", ...)
        let body = body.split_once('\n').map(|(_, rest)| rest).unwrap_or(body);
        if let Some(end) = body.find("```") {
            let inner = body[..end].trim();
            if inner.starts_with('{') {
                return inner.to_string();
            }
        }
    }

    if let (Some(start), Some(end)) = (trimmed.find('{'), trimmed.rfind('}')) {
        if end > start {
            return trimmed[start..=end].to_string();
        }
    }

    trimmed.to_string()
}

/// First `max_chars` characters of `text`, for logging response previews.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
