//! Extraction and restoration of content the parse/rebuild round trip
//! would otherwise destroy: comments (which may contain markup the
//! parser must never see) and runs of blank lines (which the builder
//! cannot represent).

use memchr::memmem;

/// One extracted comment, delimiters included, byte-identical to the
/// source.
#[derive(Debug, PartialEq, Eq)]
pub struct CommentRecord {
    pub placeholder_id: usize,
    pub raw_text: String,
}

impl CommentRecord {
    fn token(&self) -> String {
        comment_token(self.placeholder_id)
    }
}

fn comment_token(id: usize) -> String {
    format!("__XMLFMT_COMMENT_{}__", id)
}

/// Whether a text node is a comment placeholder token. The builder keeps
/// such nodes on their own line so the restored comment lands at the
/// right indentation.
pub fn is_comment_token(text: &str) -> bool {
    text.strip_prefix("__XMLFMT_COMMENT_")
        .and_then(|rest| rest.strip_suffix("__"))
        .map_or(false, |id| !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()))
}

/// Replace every `<!-- ... -->` with a unique plain-text token and
/// record the original bytes. Unterminated comments are left untouched
/// so the parser can report them.
pub fn extract_comments(text: &str) -> (String, Vec<CommentRecord>) {
    let mut stripped = String::with_capacity(text.len());
    let mut comments = Vec::new();
    let mut rest = text;

    while let Some(at) = memmem::find(rest.as_bytes(), b"<!--") {
        let after = at + 4;
        let Some(len) = memmem::find(rest[after..].as_bytes(), b"-->") else {
            break;
        };
        let end = after + len + 3;

        let record = CommentRecord {
            placeholder_id: comments.len(),
            raw_text: rest[at..end].to_string(),
        };
        stripped.push_str(&rest[..at]);
        stripped.push_str(&record.token());
        comments.push(record);
        rest = &rest[end..];
    }

    stripped.push_str(rest);
    (stripped, comments)
}

/// Put every extracted comment back, or drop the placeholder lines when
/// comments are not preserved. Every placeholder must resolve; a leftover
/// token is a pipeline defect, so restoration asserts none remain.
pub fn restore_comments(text: &str, comments: &[CommentRecord], preserve: bool) -> String {
    let mut result = text.to_string();

    for record in comments {
        let token = record.token();
        if preserve {
            result = result.replacen(&token, &record.raw_text, 1);
        } else {
            result = drop_token(&result, &token);
        }
    }

    debug_assert!(
        memmem::find(result.as_bytes(), b"__XMLFMT_COMMENT_").is_none(),
        "unresolved comment placeholder"
    );
    result
}

/// Remove a token, taking its whole line with it when nothing else is
/// on that line.
fn drop_token(text: &str, token: &str) -> String {
    let Some(at) = memmem::find(text.as_bytes(), token.as_bytes()) else {
        return text.to_string();
    };

    let line_start = text[..at].rfind('\n').map_or(0, |nl| nl + 1);
    let line_end = text[at..]
        .find('\n')
        .map_or(text.len(), |nl| at + nl + 1);
    let line = &text[line_start..line_end];

    if line.trim_end_matches('\n').trim() == token {
        format!("{}{}", &text[..line_start], &text[line_end..])
    } else {
        text.replacen(token, "", 1)
    }
}

/// Collapse each maximal run of whitespace-only lines into a single
/// marker comment carrying the run length. The marker is inert content
/// to the parser and survives re-indentation.
pub fn collapse_blank_lines(text: &str) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    let mut i = 0;

    while i < lines.len() {
        if lines[i].trim().is_empty() && i + 1 < lines.len() {
            let mut count = 1;
            while i + count < lines.len() && lines[i + count].trim().is_empty() {
                count += 1;
            }
            // A trailing whitespace-only line is the final newline, not a
            // blank run.
            if i + count == lines.len() {
                break;
            }
            result.push(format!("<!--__BLANK_LINES_{}__-->", count));
            i += count;
        } else {
            result.push(lines[i].to_string());
            i += 1;
        }
    }

    result.join("\n")
}

/// Cap blank-line runs in a prefix/suffix margin directly, without the
/// marker round trip (margins never pass through the builder). The first
/// and last split fragments are the line tail/head shared with the
/// adjoining content, never blank lines themselves.
pub fn cap_margin_blank_lines(text: &str, max_allowed: usize) -> String {
    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() < 3 {
        return text.to_string();
    }

    let last = lines.len() - 1;
    let mut result: Vec<&str> = vec![lines[0]];
    let mut i = 1;
    while i < last {
        if lines[i].trim().is_empty() {
            let mut count = 1;
            while i + count < last && lines[i + count].trim().is_empty() {
                count += 1;
            }
            for _ in 0..count.min(max_allowed) {
                result.push("");
            }
            i += count;
        } else {
            result.push(lines[i]);
            i += 1;
        }
    }
    result.push(lines[last]);

    result.join("\n")
}

fn blank_marker_count(line: &str) -> Option<usize> {
    line.trim()
        .strip_prefix("<!--__BLANK_LINES_")?
        .strip_suffix("__-->")?
        .parse()
        .ok()
}

/// Expand each blank-line marker to `min(count, max_allowed)` blank
/// lines; with `max_allowed == 0` the marker disappears entirely.
pub fn restore_blank_lines(text: &str, max_allowed: usize) -> String {
    let mut result: Vec<&str> = Vec::new();

    for line in text.split('\n') {
        match blank_marker_count(line) {
            Some(count) => {
                for _ in 0..count.min(max_allowed) {
                    result.push("");
                }
            }
            None => result.push(line),
        }
    }

    result.join("\n")
}
