use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_THINKING_BLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\A\s*<(?:think|thinking|reasoning)>.*?</(?:think|thinking|reasoning)>")
        .expect("thinking block pattern is valid")
});

static THINKING_CLOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)</(?:think|thinking|reasoning)>").expect("thinking tag pattern is valid")
});

// The closing fence must start its own line; JSON strings cannot hold raw newlines.
static JSON_FENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)```[ \t]*(?i:json)[ \t]*\r?\n(.*?)\r?\n[ \t]*```")
        .expect("json fence pattern is valid")
});

pub trait StripThinking {
    /// Removes reasoning that precedes the payload: leading `<think>…</think>`
    /// style blocks, or everything up to an unmatched closing tag. Tags that
    /// appear once the payload has started are left untouched.
    fn strip_thinking(&self) -> String;
}

impl StripThinking for str {
    fn strip_thinking(&self) -> String {
        let mut rest = self;
        while let Some(block) = LEADING_THINKING_BLOCK.find(rest) {
            rest = &rest[block.end()..];
        }

        if let Some(close) = THINKING_CLOSE.find(rest)
            && !inside_object(&rest[..close.start()])
        {
            rest = &rest[close.end()..];
        }

        rest.to_string()
    }
}

/// Whether `prefix` leaves a JSON object open.
fn inside_object(prefix: &str) -> bool {
    prefix.matches('{').count() > prefix.matches('}').count()
}

pub trait ExtractJson {
    /// Locates the JSON payload in a free-form model response.
    ///
    /// A ```` ```json ```` fenced block wins; otherwise the span from the first
    /// `{` to the last `}` is returned. Surrounding prose is ignored.
    fn extract_json(&self) -> Option<&str>;
}

impl ExtractJson for str {
    fn extract_json(&self) -> Option<&str> {
        if let Some(captures) = JSON_FENCE.captures(self)
            && let Some(body) = captures.get(1)
        {
            let body = body.as_str().trim();
            if !body.is_empty() {
                return Some(body);
            }
        }

        let start = self.find('{')?;
        let end = self.rfind('}')?;
        (end > start).then(|| &self[start..=end])
    }
}

/// Shortens `text` to at most `max_chars` characters, marking the cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}… [truncated]", &text[..cut]),
        None => text.to_string(),
    }
}
