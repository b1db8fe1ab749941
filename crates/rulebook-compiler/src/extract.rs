//! Field extraction from a rule body.
//!
//! The body is tokenized in one pass into text segments and fenced code
//! segments. A fence opens on a line starting with three or more backticks
//! and closes on a line made only of at least as many backticks, so a longer
//! fence can contain a shorter one. An opening fence that never closes is
//! ordinary text.
//!
//! Text segments then feed three rules:
//!
//! - `**Impact: ...**` annotations are removed.
//! - A segment whose last line is a caption (`**Label:**` or
//!   `**Label (remark):**`) relabels the example right before it. With no
//!   example before it, the caption stays ordinary text and also labels the
//!   example right after it, if any.
//! - The first non-empty remaining segment becomes the explanation; later
//!   candidates are ignored.

use rulebook_core::CodeExample;
use rulebook_core::constants::DEFAULT_LANGUAGE;

/// Longest caption text accepted as a label.
const MAX_CAPTION_CHARS: usize = 80;

/// Explanation and examples lifted out of a rule body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    /// First prose segment, trimmed.
    pub explanation: String,
    /// Code examples in source order.
    pub examples: Vec<CodeExample>,
}

/// A token of the rule body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Fence {
        language: Option<String>,
        code: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Caption {
    label: String,
    description: Option<String>,
}

impl Caption {
    fn apply(self, example: &mut CodeExample) {
        example.label = self.label;
        example.description = self.description;
    }
}

/// Extract using the default fence language.
pub fn extract(body: &str) -> Extracted {
    extract_with_language(body, DEFAULT_LANGUAGE)
}

/// Extract, tagging untagged fences with `default_language`.
pub fn extract_with_language(body: &str, default_language: &str) -> Extracted {
    let mut out = Extracted::default();
    let mut pending: Option<Caption> = None;
    let segments = tokenize(body);
    let count = segments.len();

    for (idx, segment) in segments.into_iter().enumerate() {
        // Segments alternate, so anything after a text segment is a fence.
        let fence_follows = idx + 1 < count;
        match segment {
            Segment::Fence { language, code } => {
                let language = language.unwrap_or_else(|| default_language.to_string());
                let mut example = CodeExample::new(code, language);
                if let Some(caption) = pending.take() {
                    caption.apply(&mut example);
                }
                out.examples.push(example);
            }
            Segment::Text(raw) => {
                let text = strip_impact_annotations(&raw);
                match (trailing_caption(&text), out.examples.last_mut()) {
                    (Some(caption), Some(last)) => {
                        caption.apply(last);
                        continue;
                    }
                    (Some(caption), None) if fence_follows => pending = Some(caption),
                    _ => {}
                }
                let trimmed = text.trim();
                if out.explanation.is_empty() && !trimmed.is_empty() {
                    out.explanation = trimmed.to_string();
                }
            }
        }
    }

    out
}

/// Split a body into text and fenced segments, preserving order.
pub(crate) fn tokenize(body: &str) -> Vec<Segment> {
    let lines: Vec<&str> = body.split_inclusive('\n').collect();
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    while i < lines.len() {
        if let Some((ticks, info)) = fence_open(lines[i]) {
            if let Some(close) = (i + 1..lines.len()).find(|&j| is_fence_close(lines[j], ticks)) {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                let code = lines[i + 1..close].concat();
                segments.push(Segment::Fence {
                    language: fence_language(info),
                    code: code.trim().to_string(),
                });
                i = close + 1;
                continue;
            }
        }
        text.push_str(lines[i]);
        i += 1;
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// Backtick count and info string of an opening fence line.
fn fence_open(line: &str) -> Option<(usize, &str)> {
    let trimmed = line.trim();
    let ticks = trimmed.chars().take_while(|&c| c == '`').count();
    if ticks < 3 {
        return None;
    }
    let info = trimmed[ticks..].trim();
    if info.contains('`') {
        return None;
    }
    Some((ticks, info))
}

fn is_fence_close(line: &str, ticks: usize) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= ticks && trimmed.chars().all(|c| c == '`')
}

/// First word of the info string (`tsx title="x"` → `tsx`).
fn fence_language(info: &str) -> Option<String> {
    info.split(|c: char| c.is_whitespace() || c == '{' || c == ',')
        .find(|token| !token.is_empty())
        .map(str::to_string)
}

/// Remove `**Impact: ...**` annotations; lines left blank disappear.
fn strip_impact_annotations(text: &str) -> String {
    const MARKER: &str = "**impact:";
    let mut out = String::with_capacity(text.len());

    for line in text.split_inclusive('\n') {
        let lower = line.to_ascii_lowercase();
        let Some(start) = lower.find(MARKER) else {
            out.push_str(line);
            continue;
        };
        let Some(close) = line[start + MARKER.len()..].rfind("**") else {
            out.push_str(line);
            continue;
        };
        let end = start + MARKER.len() + close + 2;
        let kept = format!("{}{}", &line[..start], &line[end..]);
        if !kept.trim().is_empty() {
            out.push_str(&kept);
        }
    }

    out
}

/// Caption on the last non-blank line of `text`.
fn trailing_caption(text: &str) -> Option<Caption> {
    let body = text.trim_end();
    let start = body.rfind('\n').map_or(0, |i| i + 1);
    parse_caption(body[start..].trim())
}

fn parse_caption(line: &str) -> Option<Caption> {
    let inner = line.strip_prefix("**")?.strip_suffix(":**")?.trim();
    if inner.is_empty()
        || inner.contains(':')
        || inner.contains("**")
        || inner.chars().count() > MAX_CAPTION_CHARS
    {
        return None;
    }

    if let (Some(open), true) = (inner.find(" ("), inner.ends_with(')')) {
        let label = inner[..open].trim();
        let description = inner[open + 2..inner.len() - 1].trim();
        if !label.is_empty() {
            return Some(Caption {
                label: label.to_string(),
                description: (!description.is_empty()).then(|| description.to_string()),
            });
        }
    }

    Some(Caption {
        label: inner.to_string(),
        description: None,
    })
}
