//! Text-rewrite passes applied to the builder's output. Every pass is a
//! total function from text to text; ordering is the pipeline's job.

pub mod entities;
pub mod multiline;
pub mod spacing;
pub mod wrap;

use memchr::memmem;

/// Collapse whitespace inside the XML declaration to single spaces,
/// or to `<?xml?>` when it carries no attributes.
pub fn normalize_declaration(text: &str) -> String {
    let Some(start) = memmem::find(text.as_bytes(), b"<?xml") else {
        return text.to_string();
    };
    let after = start + 5;
    let Some(len) = memmem::find(text[after..].as_bytes(), b"?>") else {
        return text.to_string();
    };
    let end = after + len + 2;

    let inner = text[after..after + len]
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let decl = if inner.is_empty() {
        "<?xml?>".to_string()
    } else {
        format!("<?xml {}?>", inner)
    };

    format!("{}{}{}", &text[..start], decl, &text[end..])
}

/// Trim trailing whitespace from every line and end the document with
/// exactly one newline.
pub fn finalize(text: &str) -> String {
    let mut out = text
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}
