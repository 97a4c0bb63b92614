//! Minimal frontmatter reader.
//!
//! Only flat `key: value` / `key: "value"` lines are understood. This is not a
//! YAML parser: a value containing a colon is kept whole, a value containing a
//! double quote is not recognised, and nested structures are ignored.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;

static FIELD_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^(\w[\w_-]*)\s*:\s*"?([^"]*)"?\s*$"#).expect("frontmatter field regex")
});

static H1_LINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s+(.+)$").expect("heading regex"));

/// Flat key/value fields read from a frontmatter block.
pub type Frontmatter = BTreeMap<String, String>;

/// Parse the frontmatter at the very top of `text`.
///
/// Returns `None` when the first line is not `---` or the block is never
/// closed by a second `---` line.
pub fn parse(text: &str) -> Option<Frontmatter> {
    let mut lines = text.split('\n');
    if lines.next()?.trim() != "---" {
        return None;
    }
    let mut fields = Frontmatter::new();
    for line in lines {
        if line.trim() == "---" {
            return Some(fields);
        }
        if let Some(caps) = FIELD_LINE.captures(line) {
            fields.insert(caps[1].to_string(), caps[2].trim().to_string());
        }
    }
    None
}

/// `true` when `text` opens with a closed frontmatter block.
pub fn has_frontmatter(text: &str) -> bool {
    parse(text).is_some()
}

/// Text of the first `# ` heading, trimmed.
pub fn first_heading(text: &str) -> Option<String> {
    text.split('\n')
        .find_map(|line| H1_LINE.captures(line).map(|c| c[1].trim().to_string()))
}

/// `rust-error-handling.md` → `Rust Error Handling`.
pub fn kebab_to_title(file_name: &str) -> String {
    let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
    stem.split('-').map(capitalize).collect::<Vec<_>>().join(" ")
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
