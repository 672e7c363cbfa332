//! Two-phase configuration parsing.
//!
//! The same text is parsed twice: once with `serde_yaml` into the typed
//! [`ConfigFile`] shape to validate structure, and once with `marked_yaml`
//! to recover the line and column of every revision value. The positioned
//! walk also measures the byte extent of each revision token and locates
//! its trailing comment, which is what lets fixes splice new values into
//! the original text without disturbing anything else.

use std::path::{Path, PathBuf};

use super::editor;
use super::model::{ConfigFile, RepoEntry};
use crate::error::{FrostlineError, Result};

/// One source line with its original ending preserved, so untouched lines
/// re-serialize byte for byte.
#[derive(Debug, Clone)]
pub(crate) struct Line {
    pub(crate) text: String,
    pub(crate) ending: &'static str,
}

/// Byte extent of a revision token, including surrounding quotes.
struct RevToken {
    start: usize,
    end: usize,
    quote: Option<char>,
}

/// A parsed configuration document: the original lines plus the lintable
/// entries found in them.
#[derive(Debug)]
pub struct Document {
    path: PathBuf,
    lines: Vec<Line>,
    entries: Vec<RepoEntry>,
}

impl Document {
    /// Parses `content`, which was read from `path`. The path is only used
    /// for error reporting and diagnostics.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let config: ConfigFile =
            serde_yaml::from_str(content).map_err(|err| parse_error(path, err.to_string()))?;

        let node = marked_yaml::parse_yaml(0, content)
            .map_err(|err| parse_error(path, err.to_string()))?;
        let root = node
            .as_mapping()
            .ok_or_else(|| parse_error(path, "document root is not a mapping"))?;
        let repos = root
            .get_sequence("repos")
            .ok_or_else(|| parse_error(path, "missing `repos` sequence"))?;

        let lines = split_lines(content);
        let mut entries = Vec::new();
        for item in repos.iter() {
            let mapping = item
                .as_mapping()
                .ok_or_else(|| parse_error(path, "repository entry is not a mapping"))?;

            // `repo: local` and `repo: meta` entries pin nothing
            let Some(rev_scalar) = mapping.get_scalar("rev") else {
                continue;
            };
            let url_scalar = mapping
                .get_scalar("repo")
                .ok_or_else(|| parse_error(path, "repository entry missing `repo`"))?;
            let url: &str = url_scalar;
            let rev: &str = rev_scalar;

            let marker = rev_scalar
                .span()
                .start()
                .ok_or_else(|| parse_error(path, "missing source position for `rev`"))?;
            let line_idx = marker.line().saturating_sub(1);
            let char_col = marker.column().saturating_sub(1);
            let line_text = lines
                .get(line_idx)
                .map(|line| line.text.as_str())
                .ok_or_else(|| parse_error(path, "rev position is outside the document"))?;

            let token = locate_rev_token(line_text, char_col, rev).ok_or_else(|| {
                parse_error(
                    path,
                    format!("cannot locate revision `{rev}` on line {}", line_idx + 1),
                )
            })?;
            let annotation_start = locate_annotation(line_text, token.end);

            entries.push(RepoEntry {
                url: url.to_string(),
                rev: rev.to_string(),
                annotation: annotation_start
                    .map(|start| line_text[start..].trim_end().to_string()),
                line: line_idx,
                column: char_col,
                rev_span: (token.start, token.end),
                quote: token.quote,
                annotation_byte_start: annotation_start,
                annotation_char_col: annotation_start
                    .map(|start| line_text[..start].chars().count()),
                rev_changed: false,
                annotation_changed: false,
            });
        }

        // Both parses must agree on which entries carry a revision,
        // otherwise an edit could land on the wrong token.
        let expected = config.repos.iter().filter(|repo| repo.rev.is_some()).count();
        if entries.len() != expected {
            return Err(parse_error(
                path,
                "revision entries do not line up with the document structure",
            ));
        }

        Ok(Self {
            path: path.to_path_buf(),
            lines,
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &[RepoEntry] {
        &self.entries
    }

    pub fn entries_mut(&mut self) -> &mut [RepoEntry] {
        &mut self.entries
    }

    /// Re-serializes the document, splicing in any entry edits. Lines no
    /// entry touched are reproduced byte for byte.
    pub fn render(&self) -> String {
        editor::render(&self.lines, &self.entries)
    }
}

fn parse_error(path: &Path, message: impl Into<String>) -> FrostlineError {
    FrostlineError::DocumentParse {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Splits text into lines keeping each line's own ending.
fn split_lines(text: &str) -> Vec<Line> {
    text.split_inclusive('\n')
        .map(|raw| {
            if let Some(stripped) = raw.strip_suffix("\r\n") {
                Line {
                    text: stripped.to_string(),
                    ending: "\r\n",
                }
            } else if let Some(stripped) = raw.strip_suffix('\n') {
                Line {
                    text: stripped.to_string(),
                    ending: "\n",
                }
            } else {
                Line {
                    text: raw.to_string(),
                    ending: "",
                }
            }
        })
        .collect()
}

/// Maps a character column to a byte index within `line`.
fn byte_index(line: &str, char_col: usize) -> Option<usize> {
    line.char_indices()
        .map(|(idx, _)| idx)
        .chain(std::iter::once(line.len()))
        .nth(char_col)
}

/// Finds the byte extent of the revision token whose parsed value is
/// `value`, starting from the parser's reported column. The marker may sit
/// on the opening quote or on the first content character depending on the
/// scalar style, so both are tried before the plain-scalar case.
fn locate_rev_token(line: &str, char_col: usize, value: &str) -> Option<RevToken> {
    let start = byte_index(line, char_col)?;
    let bytes = line.as_bytes();
    let first = *bytes.get(start)?;

    if first == b'"' || first == b'\'' {
        let quote = first as char;
        let close = line[start + 1..].find(quote)? + start + 1;
        return Some(RevToken {
            start,
            end: close + 1,
            quote: Some(quote),
        });
    }

    if start > 0 && (bytes[start - 1] == b'"' || bytes[start - 1] == b'\'') {
        let quote = bytes[start - 1] as char;
        let close = line[start..].find(quote)? + start;
        return Some(RevToken {
            start: start - 1,
            end: close + 1,
            quote: Some(quote),
        });
    }

    if line[start..].starts_with(value) {
        return Some(RevToken {
            start,
            end: start + value.len(),
            quote: None,
        });
    }
    None
}

/// Finds the `#` starting a trailing comment after byte offset `from`,
/// provided only whitespace separates it from the token.
fn locate_annotation(line: &str, from: usize) -> Option<usize> {
    let rest = &line[from..];
    let hash = rest.find('#')?;
    rest[..hash]
        .chars()
        .all(char::is_whitespace)
        .then_some(from + hash)
}
