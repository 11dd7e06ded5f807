//! Line classifier for the annotation scan.
//!
//! Sorts each schema line into one of three kinds so the annotation parser
//! never has to look at raw prefixes itself.

/// Keywords opening a block the extractor turns into a model.
pub const MODEL_KEYWORDS: &[&str] = &["model", "view"];

/// Prefix of a documentation comment.
pub const DOC_MARKER: &str = "///";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// `model <Name> ...` or `view <Name> ...` at the top level. Holds the full identifier.
    ModelStart(&'a str),
    /// Top-level `///` comment. Holds the text after the marker, trimmed.
    Documentation(&'a str),
    /// Anything else, including comments inside a block.
    Other,
}

/// Stateful classifier: tracks brace depth so that a field named `model`
/// or a field's doc comment inside a block is not mistaken for a top-level line.
#[derive(Debug, Clone, Default)]
pub struct LineClassifier {
    depth: usize,
}

impl LineClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify one line, then account for the braces it opens or closes.
    pub fn classify<'a>(&mut self, line: &'a str) -> LineKind<'a> {
        let kind = if self.depth == 0 {
            classify_top_level(line)
        } else {
            LineKind::Other
        };
        self.depth = depth_after(self.depth, line);
        kind
    }
}

fn classify_top_level(line: &str) -> LineKind<'_> {
    let trimmed = line.trim();
    if let Some(text) = trimmed.strip_prefix(DOC_MARKER) {
        return LineKind::Documentation(text.trim());
    }
    MODEL_KEYWORDS
        .iter()
        .find_map(|keyword| declared_name(trimmed, keyword))
        .map_or(LineKind::Other, LineKind::ModelStart)
}

/// `<keyword> <Name>` → `Name`.
fn declared_name<'a>(line: &'a str, keyword: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(keyword)?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let rest = rest.trim_start();
    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}

/// Brace depth after `line`, ignoring braces in strings and `//` comments.
fn depth_after(mut depth: usize, line: &str) -> usize {
    let mut in_string = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if in_string => {
                chars.next();
            }
            '"' => in_string = !in_string,
            '/' if !in_string && chars.peek() == Some(&'/') => break,
            '{' if !in_string => depth += 1,
            '}' if !in_string => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    depth
}
