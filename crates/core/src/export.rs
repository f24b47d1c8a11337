//! Naming for CSV downloads.

const MAX_STEM_CHARS: usize = 50;
const FILENAME_SUFFIX: &str = "_steps.csv";

/// Attachment filename for a checklist export.
///
/// Every character outside `[A-Za-z0-9]` becomes `_` and the stem is capped
/// at 50 characters, so the result is always safe inside a quoted
/// `Content-Disposition` header.
pub fn export_filename(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .take(MAX_STEM_CHARS)
        .collect();
    format!("{stem}{FILENAME_SUFFIX}")
}
