//! Checks applied to an uploaded CSV file before it is parsed.

use crate::error::CoreError;

/// Default upload cap: 1 MiB.
pub const MAX_UPLOAD_BYTES: usize = 1_048_576;

/// MIME types browsers commonly attach to `.csv` files.
pub const ACCEPTED_CONTENT_TYPES: &[&str] = &[
    "text/csv",
    "text/plain",
    "application/csv",
    "application/vnd.ms-excel",
];

/// Validate an upload's name, declared type and size.
///
/// An absent or empty content type is accepted; some clients send none.
/// Parameters such as `; charset=utf-8` are ignored.
pub fn validate_csv_upload(
    filename: &str,
    content_type: Option<&str>,
    size: usize,
    max_bytes: usize,
) -> Result<(), CoreError> {
    if !filename.to_ascii_lowercase().ends_with(".csv") {
        return Err(CoreError::Validation(
            "Invalid file type. Please upload a CSV file.".into(),
        ));
    }

    let mime = content_type
        .and_then(|ct| ct.split(';').next())
        .map(|ct| ct.trim().to_ascii_lowercase())
        .unwrap_or_default();
    if !mime.is_empty() && !ACCEPTED_CONTENT_TYPES.contains(&mime.as_str()) {
        return Err(CoreError::Validation(format!(
            "Invalid content type: {mime}. Please upload a CSV file."
        )));
    }

    if size > max_bytes {
        return Err(CoreError::Validation(format!(
            "File too large. Maximum size is {max_bytes} bytes."
        )));
    }

    Ok(())
}

/// Checklist title derived from an uploaded filename: the name without its
/// extension, or `None` when that leaves nothing.
pub fn title_from_filename(filename: &str) -> Option<String> {
    let base = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    let stem = match base.rfind('.') {
        Some(dot) => &base[..dot],
        None => base,
    };
    let stem = stem.trim();
    (!stem.is_empty()).then(|| stem.to_string())
}
