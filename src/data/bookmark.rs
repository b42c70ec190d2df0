//! Bookmark recovery from the staged Chromium `Bookmarks` file.
//!
//! `Bookmarks` is a JSON tree: named roots (`bookmark_bar`, `other`,
//! `synced`), each a folder node with nested children. Timestamps are
//! decimal strings of Chromium-epoch microseconds.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::base::error::RecoveryError;

use super::chromedb;

/// One recovered bookmark.
#[derive(Debug, Clone, Serialize)]
pub struct BookmarkRecord {
    pub name: String,
    pub url: String,
    pub date_added: Option<OffsetDateTime>,
}

#[derive(Deserialize)]
struct BookmarksFile {
    #[serde(default)]
    roots: HashMap<String, BookmarkNode>,
}

#[derive(Deserialize)]
struct BookmarkNode {
    #[serde(default)]
    name: String,
    #[serde(rename = "type", default)]
    node_type: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    #[serde(default)]
    children: Vec<BookmarkNode>,
}

/// Read all bookmarks from a staged `Bookmarks` file.
pub fn chromium_bookmarks(path: &Path) -> Result<Vec<BookmarkRecord>, RecoveryError> {
    let raw = fs::read_to_string(path)?;
    let file: BookmarksFile = serde_json::from_str(&raw)
        .map_err(|_| RecoveryError::invalid_data("malformed Bookmarks JSON"))?;

    let mut bookmarks = Vec::new();
    // Stable output order across the named roots.
    let mut roots: Vec<_> = file.roots.into_iter().collect();
    roots.sort_by(|a, b| a.0.cmp(&b.0));
    for (_, node) in roots {
        collect(node, &mut bookmarks);
    }
    Ok(bookmarks)
}

fn collect(node: BookmarkNode, out: &mut Vec<BookmarkRecord>) {
    if node.node_type == "url" {
        if let Some(url) = node.url {
            let micros = node
                .date_added
                .as_deref()
                .and_then(|s| s.parse::<i64>().ok())
                .unwrap_or(0);
            out.push(BookmarkRecord {
                name: node.name,
                url,
                date_added: chromedb::chrome_to_unix_timestamp(micros),
            });
        }
        return;
    }
    for child in node.children {
        collect(child, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_bookmarks_fixture() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bookmarks");
        let date_added = chromedb::CHROME_EPOCH_OFFSET_MICROS + 1_700_000_000_000_000;
        fs::write(
            &path,
            format!(
                r#"{{
                    "roots": {{
                        "bookmark_bar": {{
                            "type": "folder",
                            "name": "Bookmarks bar",
                            "children": [
                                {{"type": "url", "name": "Example",
                                  "url": "https://example.com/",
                                  "date_added": "{date_added}"}},
                                {{"type": "folder", "name": "Work", "children": [
                                    {{"type": "url", "name": "Docs",
                                      "url": "https://docs.example.com/"}}
                                ]}}
                            ]
                        }},
                        "other": {{"type": "folder", "name": "Other", "children": []}}
                    }},
                    "version": 1
                }}"#
            ),
        )
        .unwrap();

        let bookmarks = chromium_bookmarks(&path).unwrap();
        assert_eq!(bookmarks.len(), 2);
        assert_eq!(bookmarks[0].name, "Example");
        assert_eq!(
            bookmarks[0].date_added.unwrap().unix_timestamp(),
            1_700_000_000
        );
        assert_eq!(bookmarks[1].url, "https://docs.example.com/");
        assert!(bookmarks[1].date_added.is_none());
    }

    #[test]
    fn test_bookmarks_malformed() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bookmarks");
        fs::write(&path, b"[oops").unwrap();
        assert!(matches!(
            chromium_bookmarks(&path),
            Err(RecoveryError::InvalidData(_))
        ));
    }
}
