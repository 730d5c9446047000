//! # Drag/drop and clipboard payloads
//!
//! The window-system file list encoding: paths separated by whitespace, any
//! path containing whitespace wrapped in `{ }`. Incoming items may also be
//! `file://` URIs.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const FILE_URI_PREFIX: &str = "file://";

fn braced_item() -> &'static Regex {
    static BRACED: OnceLock<Regex> = OnceLock::new();
    BRACED.get_or_init(|| Regex::new(r"\{([^}]*)\}").expect("brace pattern is valid"))
}

/// Split a drop payload into paths.
///
/// Items are whitespace-separated unless brace-delimited. `file://`
/// prefixes are stripped, along with the leading slash some platforms put
/// in front of a drive letter (`file:///C:/x.folio` becomes `C:/x.folio`).
pub fn parse_drop_payload(data: &str) -> Vec<PathBuf> {
    let mut items = Vec::new();
    let mut current = String::new();
    let mut in_brace = false;

    for ch in data.chars() {
        match ch {
            '{' => {
                in_brace = true;
                current.clear();
            }
            '}' => {
                in_brace = false;
                if !current.is_empty() {
                    items.push(std::mem::take(&mut current));
                }
            }
            c if c.is_whitespace() && !in_brace => {
                if !current.is_empty() {
                    items.push(std::mem::take(&mut current));
                }
            }
            c => current.push(c),
        }
    }
    if !current.is_empty() {
        items.push(current);
    }

    items
        .iter()
        .map(|item| strip_file_uri(item).trim())
        .filter(|item| !item.is_empty())
        .map(PathBuf::from)
        .collect()
}

fn strip_file_uri(item: &str) -> &str {
    let Some(path) = item.strip_prefix(FILE_URI_PREFIX) else {
        return item;
    };
    let bytes = path.as_bytes();
    if bytes.len() > 3 && bytes[0] == b'/' && bytes[2] == b':' {
        &path[1..]
    } else {
        path
    }
}

/// Encode one path for an outgoing drag
pub fn format_drop_path(path: &Path) -> String {
    let text = path.display().to_string();
    if text.chars().any(char::is_whitespace) {
        format!("{{{}}}", text)
    } else {
        text
    }
}

pub fn format_drop_payload<P: AsRef<Path>>(paths: &[P]) -> String {
    paths
        .iter()
        .map(|path| format_drop_path(path.as_ref()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Paths from clipboard text: every `{...}` group when the text has braces,
/// otherwise one path per non-blank line.
pub fn parse_clipboard_paths(text: &str) -> Vec<PathBuf> {
    if text.contains('{') && text.contains('}') {
        return braced_item()
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|item| item.as_str().trim())
            .filter(|item| !item.is_empty())
            .map(PathBuf::from)
            .collect();
    }

    text.lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Case-insensitive extension check (`ext` without the dot)
pub fn has_extension(path: &Path, ext: &str) -> bool {
    path.extension()
        .and_then(|found| found.to_str())
        .is_some_and(|found| found.eq_ignore_ascii_case(ext))
}

/// Keep existing files with the given extension, in order
pub fn usable_documents(paths: Vec<PathBuf>, ext: &str) -> Vec<PathBuf> {
    paths
        .into_iter()
        .filter(|path| has_extension(path, ext) && path.is_file())
        .collect()
}
