//! Revision classification and the frozen-comment grammar.
//!
//! A revision pin is *frozen* when it names a commit hash rather than a
//! movable reference such as a branch or tag. Frozen pins are expected to
//! carry a trailing comment recording the human-readable version they were
//! frozen from, e.g.:
//!
//! ```yaml
//! rev: 2f035c421f1746ab2f48758db06fa32b5b9324f2  # frozen: v24.1.0
//! ```

use std::sync::LazyLock;

use regex::Regex;

/// Length in hex digits of a full SHA-1 object name.
pub const FULL_HASH_LENGTH: usize = 40;

/// Shortest prefix git will accept as an abbreviated object name.
pub const MIN_HASH_LENGTH: usize = 7;

/// Grammar for the trailing comment on a frozen revision. The comment text
/// is matched whole after trimming surrounding whitespace, so anything that
/// deviates from `# frozen: <rev>[ note]` fails the match.
static FROZEN_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#( frozen: (?P<rev>\S+))?(?P<note> .*)?$")
        .expect("frozen comment pattern must compile")
});

/// Returns true when `rev` consists entirely of hex digits.
fn is_hash(rev: &str) -> bool {
    !rev.is_empty() && rev.chars().all(|c| c.is_ascii_hexdigit())
}

/// Returns true when `rev` looks like an abbreviated commit hash: all hex
/// digits, at least [`MIN_HASH_LENGTH`] long but shorter than a full hash.
pub fn is_abbreviated_hash(rev: &str) -> bool {
    is_hash(rev) && (MIN_HASH_LENGTH..FULL_HASH_LENGTH).contains(&rev.len())
}

/// Returns true when `rev` is a full 40-digit commit hash.
pub fn is_full_hash(rev: &str) -> bool {
    is_hash(rev) && rev.len() == FULL_HASH_LENGTH
}

/// Parsed form of a revision annotation.
///
/// `rev` is the version recorded after `frozen:`, if the comment declares
/// one. `note` is any free-form trailer, kept verbatim (including its
/// leading space) so fixes can carry it over.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrozenComment {
    pub rev: Option<String>,
    pub note: String,
}

/// Parses an annotation against the frozen-comment grammar.
///
/// Returns `None` when the text does not fit the grammar at all (for
/// example `#note` with no space after the hash). Callers treat that case
/// as a comment with no frozen declaration whose entire text is the note.
pub fn parse_frozen_comment(text: &str) -> Option<FrozenComment> {
    let caps = FROZEN_COMMENT.captures(text)?;
    Some(FrozenComment {
        rev: caps.name("rev").map(|m| m.as_str().to_string()),
        note: caps
            .name("note")
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
    })
}

/// Renders the annotation for a frozen revision: `# frozen: <rev><note>`.
pub fn frozen_annotation(rev: &str, note: &str) -> String {
    format!("# frozen: {rev}{note}")
}

/// Renders an annotation that keeps only the free-form note.
pub fn note_annotation(note: &str) -> String {
    format!("#{note}")
}
