//! Surgical document editing.
//!
//! Fixes are applied by splicing new text into the affected lines rather
//! than re-serializing the YAML tree, so formatting, key order, and every
//! untouched line survive exactly as written. Within one line, edits are
//! applied right to left so earlier byte extents stay valid.

use std::collections::BTreeMap;

use super::model::RepoEntry;
use super::parser::Line;

/// Renders the document, splicing in the edits of every dirty entry.
pub(crate) fn render(lines: &[Line], entries: &[RepoEntry]) -> String {
    let mut dirty: BTreeMap<usize, Vec<&RepoEntry>> = BTreeMap::new();
    for entry in entries.iter().filter(|entry| entry.dirty()) {
        dirty.entry(entry.line).or_default().push(entry);
    }

    let mut output = String::with_capacity(lines.iter().map(|l| l.text.len() + 2).sum());
    for (idx, line) in lines.iter().enumerate() {
        match dirty.get(&idx) {
            None => output.push_str(&line.text),
            Some(entries) => {
                let mut text = line.text.clone();
                let mut ordered = entries.clone();
                ordered.sort_by_key(|entry| std::cmp::Reverse(entry.rev_span.0));
                for entry in ordered {
                    apply_entry(&mut text, entry);
                }
                output.push_str(&text);
            }
        }
        output.push_str(line.ending);
    }
    output
}

/// Applies one entry's edits to its line. The annotation sits to the right
/// of the revision token, so it is spliced first.
fn apply_entry(line: &mut String, entry: &RepoEntry) {
    if entry.annotation_changed {
        match (&entry.annotation, entry.annotation_byte_start) {
            // Rewrite an existing comment in place, to end of line
            (Some(text), Some(start)) => {
                line.replace_range(start.., text);
            }
            // Append a fresh comment two spaces after the line content
            (Some(text), None) => {
                line.truncate(line.trim_end().len());
                line.push_str("  ");
                line.push_str(text);
            }
            // Remove the comment along with the whitespace before it
            (None, Some(start)) => {
                line.replace_range(start.., "");
                line.truncate(line.trim_end().len());
            }
            (None, None) => {}
        }
    }

    if entry.rev_changed {
        let rendered = match entry.quote {
            Some(quote) => format!("{quote}{}{quote}", entry.rev),
            None => entry.rev.clone(),
        };
        line.replace_range(entry.rev_span.0..entry.rev_span.1, &rendered);
    }
}
