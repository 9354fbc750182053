// utils crate

use std::path::Path;

/// Number of spaces per indentation level in verification reports.
pub const INDENT_WIDTH: usize = 4;

/// Shift every non-empty line of `text` right by `shift` indentation levels.
///
/// Empty lines are left empty and a trailing newline is preserved.
pub fn indent(text: &str, shift: usize) -> String {
    let pad = " ".repeat(INDENT_WIDTH * shift);

    let mut indented = text
        .lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", pad, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    if text.ends_with('\n') {
        indented.push('\n');
    }
    indented
}

pub fn is_hdu_document(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => {
            let ext = ext.to_string_lossy().to_lowercase();
            ext == "yml" || ext == "yaml"
        }
        None => false,
    }
}
