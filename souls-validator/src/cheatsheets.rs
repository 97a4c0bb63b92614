//! Cheatsheet directories and their `_index.md` tables.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use once_cell::sync::Lazy;
use regex::Regex;

use souls_core::frontmatter;
use souls_core::layout::CHEATSHEET_INDEX_FILE;

/// Rows of a generated table: `| name.md |`.
static EXPECTED_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*(\S+\.md)\s*\|").expect("expected row regex"));

/// Hand-edited tables may wrap the name in backticks.
static ACTUAL_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*`?(\S+\.md)`?\s*\|").expect("actual row regex"));

const EMPTY_INDEX: &str = "# Cheatsheet Index\n\nNo cheatsheets yet.\n";
const TABLE_HEADER: &str = "| Cheatsheet | Topic | Confidence | Last Updated |\n\
                            |------------|-------|------------|--------------|\n";

/// Cheatsheet files in `dir`: regular `*.md` files other than the index,
/// sorted by file name.
pub fn list(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let is_sheet = path.is_file()
            && path.extension().is_some_and(|ext| ext == "md")
            && path.file_name().is_some_and(|name| name != CHEATSHEET_INDEX_FILE);
        if is_sheet {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Topic of a cheatsheet without a usable `topic` field: first `# ` heading,
/// else the file name in Title Case.
pub fn fallback_topic(text: &str, file_name: &str) -> String {
    frontmatter::first_heading(text).unwrap_or_else(|| frontmatter::kebab_to_title(file_name))
}

/// The `_index.md` content a cheatsheet directory should have.
pub fn build_index_content(dir: &Path) -> io::Result<String> {
    let files = list(dir)?;
    if files.is_empty() {
        return Ok(EMPTY_INDEX.to_string());
    }

    let mut out = String::from("# Cheatsheet Index\n\n");
    out.push_str(TABLE_HEADER);
    for path in &files {
        out.push_str(&index_row(path));
        out.push('\n');
    }
    Ok(out)
}

fn index_row(path: &Path) -> String {
    let name = file_name(path);
    let text = fs::read(path)
        .ok()
        .and_then(|bytes| String::from_utf8(bytes).ok())
        .unwrap_or_default();
    let fm = frontmatter::parse(&text).unwrap_or_default();
    let field = |key: &str| fm.get(key).filter(|v| !v.is_empty()).cloned();

    let topic = field("topic").unwrap_or_else(|| fallback_topic(&text, &name));
    let confidence = field("confidence").unwrap_or_else(|| "UNKNOWN".to_string());
    let last_updated = field("last_updated").unwrap_or_else(|| modified_date(path));

    format!("| {name} | {topic} | {confidence} | {last_updated} |")
}

/// Local `YYYY-MM-DD` of the file's mtime, or `unknown`.
fn modified_date(path: &Path) -> String {
    match fs::metadata(path).and_then(|m| m.modified()) {
        Ok(time) => DateTime::<Local>::from(time).format("%Y-%m-%d").to_string(),
        Err(_) => "unknown".to_string(),
    }
}

/// File names listed in a freshly built index.
pub fn expected_entries(index: &str) -> BTreeSet<String> {
    EXPECTED_ROW.captures_iter(index).map(|c| c[1].to_string()).collect()
}

/// File names listed in an on-disk index.
pub fn actual_entries(index: &str) -> BTreeSet<String> {
    ACTUAL_ROW.captures_iter(index).map(|c| c[1].to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).expect("write fixture");
    }

    #[test]
    fn empty_directory_has_placeholder_index() {
        let dir = TempDir::new().unwrap();
        write(&dir, "_index.md", "stale");
        assert_eq!(build_index_content(dir.path()).unwrap(), EMPTY_INDEX);
    }

    #[test]
    fn rows_use_frontmatter_then_heading_then_file_name() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "orbits.md",
            "---\ntopic: \"Orbital Mechanics\"\nconfidence: VERIFIED\nlast_updated: \"2025-03-01\"\n---\n",
        );
        write(&dir, "fuel.md", "# Fuel Budgets\n\nbody\n");
        write(&dir, "launch-windows.md", "no heading\n");
        write(&dir, "notes.txt", "ignored");

        let index = build_index_content(dir.path()).unwrap();
        let lines: Vec<&str> = index.lines().collect();
        assert_eq!(lines[0], "# Cheatsheet Index");
        assert_eq!(lines[2], "| Cheatsheet | Topic | Confidence | Last Updated |");
        assert_eq!(lines[3], "|------------|-------|------------|--------------|");
        assert!(lines[4].starts_with("| fuel.md | Fuel Budgets | UNKNOWN | "));
        assert!(lines[5].starts_with("| launch-windows.md | Launch Windows | UNKNOWN | "));
        assert_eq!(lines[6], "| orbits.md | Orbital Mechanics | VERIFIED | 2025-03-01 |");
        assert_eq!(lines.len(), 7);
        assert!(index.ends_with("|\n"));
    }

    #[test]
    fn mtime_fallback_is_a_date() {
        let dir = TempDir::new().unwrap();
        write(&dir, "x.md", "# X\n");
        let index = build_index_content(dir.path()).unwrap();
        let row = index.lines().last().unwrap();
        let date = row.trim_end_matches(" |").rsplit("| ").next().unwrap();
        assert!(chrono::NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok(), "{row}");
    }

    #[test]
    fn entry_extraction_accepts_backticks_on_disk() {
        let on_disk = "| Cheatsheet | Topic |\n|---|---|\n| `a.md` | A |\n| b.md | B |\n";
        let names: Vec<String> = actual_entries(on_disk).into_iter().collect();
        assert_eq!(names, ["a.md", "b.md"]);
        assert!(expected_entries(on_disk).contains("b.md"));
    }
}
