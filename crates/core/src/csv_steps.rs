//! CSV import/export for checklist steps.
//!
//! The dialect is tolerant on input: header names are matched
//! case-insensitively, only `title` is required, unquoted fields are trimmed,
//! and each data row is validated on its own so that one bad row does not
//! hide problems in the others.
//!
//! Quoting follows the usual convention: a field wrapped in double quotes may
//! contain commas and newlines, and `""` inside quotes is a literal quote.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::step_status::StepStatus;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Export column order. Import accepts these names in any case.
pub const CSV_HEADERS: &[&str] = &[
    "title",
    "description",
    "durationMinutes",
    "startDatetime",
    "endDatetime",
    "status",
    "comments",
    "orderIndex",
];

pub const ERR_EMPTY: &str = "CSV file is empty";
pub const ERR_MISSING_TITLE_COLUMN: &str = "CSV must include a 'title' column";
pub const ERR_NO_STEPS: &str = "No valid steps found in CSV";

/// Naive formats accepted in addition to RFC 3339. Interpreted as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A step as read from one CSV row. Absent optional columns stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedStep {
    pub title: String,
    pub description: Option<String>,
    pub duration_minutes: Option<i32>,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
    pub status: Option<StepStatus>,
    pub comments: Option<String>,
    pub order_index: Option<i32>,
}

/// Outcome of parsing a whole document.
///
/// `success` is only true when every row parsed and at least one step was
/// produced. Row errors are reported alongside the rows that did parse so
/// the caller can decide what to do with a partial result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CsvParseResult {
    pub success: bool,
    pub steps: Vec<ParsedStep>,
    pub errors: Vec<String>,
}

impl CsvParseResult {
    fn document_error(message: &str) -> Self {
        Self {
            success: false,
            steps: Vec::new(),
            errors: vec![message.to_string()],
        }
    }
}

/// A full step, borrowed for export.
#[derive(Debug, Clone, Copy)]
pub struct StepCsvRow<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub duration_minutes: i32,
    pub start_datetime: Option<Timestamp>,
    pub end_datetime: Option<Timestamp>,
    pub status: StepStatus,
    pub comments: Option<&'a str>,
    pub order_index: i32,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a CSV document into step records.
pub fn parse_steps_csv(content: &str) -> CsvParseResult {
    let mut records = split_records(content).into_iter();

    let Some(header) = records.next() else {
        return CsvParseResult::document_error(ERR_EMPTY);
    };

    let mut columns: HashMap<String, usize> = HashMap::new();
    for (index, name) in header.fields.iter().enumerate() {
        columns.entry(name.trim().to_lowercase()).or_insert(index);
    }

    if !columns.contains_key("title") {
        return CsvParseResult::document_error(ERR_MISSING_TITLE_COLUMN);
    }

    let mut steps = Vec::new();
    let mut errors = Vec::new();

    for record in records {
        let row = Row {
            values: &record.fields,
            columns: &columns,
        };
        match parse_step_row(&row) {
            Ok(step) => steps.push(step),
            Err(message) => errors.push(format!("Row {}: {message}", record.row)),
        }
    }

    if steps.is_empty() && errors.is_empty() {
        errors.push(ERR_NO_STEPS.to_string());
    }

    CsvParseResult {
        success: errors.is_empty() && !steps.is_empty(),
        steps,
        errors,
    }
}

/// Column lookup for one data row.
struct Row<'a> {
    values: &'a [String],
    columns: &'a HashMap<String, usize>,
}

impl Row<'_> {
    /// The non-empty value of `column`, if the column exists and is filled.
    fn get(&self, column: &str) -> Option<&str> {
        let index = *self.columns.get(&column.to_lowercase())?;
        self.values
            .get(index)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }
}

fn parse_step_row(row: &Row<'_>) -> Result<ParsedStep, String> {
    let title = row
        .get("title")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or("Title is required")?;

    Ok(ParsedStep {
        title: title.to_string(),
        description: row.get("description").map(str::to_string),
        duration_minutes: parse_non_negative(row, "durationMinutes")?,
        start_datetime: parse_timestamp_field(row, "startDatetime")?,
        end_datetime: parse_timestamp_field(row, "endDatetime")?,
        status: row.get("status").map(StepStatus::parse_lenient).transpose()?,
        comments: row.get("comments").map(str::to_string),
        order_index: parse_non_negative(row, "orderIndex")?,
    })
}

fn parse_non_negative(row: &Row<'_>, column: &str) -> Result<Option<i32>, String> {
    let Some(raw) = row.get(column) else {
        return Ok(None);
    };
    match raw.trim().parse::<i32>() {
        Ok(value) if value >= 0 => Ok(Some(value)),
        _ => Err(format!("Invalid {column}: {raw}")),
    }
}

fn parse_timestamp_field(row: &Row<'_>, column: &str) -> Result<Option<Timestamp>, String> {
    let Some(raw) = row.get(column) else {
        return Ok(None);
    };
    parse_timestamp(raw)
        .map(Some)
        .ok_or_else(|| format!("Invalid {column}: {raw}"))
}

/// Parse a user-supplied date or date-time into a UTC instant.
///
/// Accepts RFC 3339 (any offset), naive date-times (taken as UTC) and plain
/// dates (midnight UTC).
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let s = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

/// One logical CSV record and its 1-based row number among non-blank
/// records. The header is row 1.
#[derive(Debug)]
struct RawRecord {
    row: usize,
    fields: Vec<String>,
}

/// Split a document into records, honouring quotes across line breaks.
///
/// Blank lines (only whitespace, no quotes, no delimiters) are dropped and
/// do not advance the row number. A quoted field spanning line breaks keeps
/// its record a single row.
fn split_records(content: &str) -> Vec<RawRecord> {
    let mut records = Vec::new();
    let mut fields: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut quoted = false;
    let mut blank = true;

    let mut chars = content.chars().peekable();
    while let Some(ch) = chars.next() {
        if in_quotes {
            match ch {
                '"' if chars.peek() == Some(&'"') => {
                    current.push('"');
                    chars.next();
                }
                '"' => in_quotes = false,
                _ => current.push(ch),
            }
            continue;
        }

        match ch {
            '"' => {
                // Whitespace before an opening quote is padding, not content.
                if !quoted && current.trim().is_empty() {
                    current.clear();
                }
                in_quotes = true;
                quoted = true;
                blank = false;
            }
            ',' => {
                fields.push(finish_field(&mut current, quoted));
                quoted = false;
                blank = false;
            }
            '\r' if chars.peek() == Some(&'\n') => {}
            '\n' => {
                if !blank {
                    fields.push(finish_field(&mut current, quoted));
                    records.push(RawRecord {
                        row: records.len() + 1,
                        fields: std::mem::take(&mut fields),
                    });
                }
                current.clear();
                quoted = false;
                blank = true;
            }
            // Padding after a closing quote is dropped as well.
            c if quoted && c.is_whitespace() => {}
            c => {
                if !c.is_whitespace() {
                    blank = false;
                }
                current.push(c);
            }
        }
    }

    if !blank {
        fields.push(finish_field(&mut current, quoted));
        records.push(RawRecord {
            row: records.len() + 1,
            fields,
        });
    }

    records
}

fn finish_field(current: &mut String, quoted: bool) -> String {
    let value = std::mem::take(current);
    if quoted {
        value
    } else {
        value.trim().to_string()
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

/// Render steps as a CSV document, one row per step in the given order.
pub fn steps_to_csv(steps: &[StepCsvRow<'_>]) -> String {
    let mut lines = Vec::with_capacity(steps.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for step in steps {
        let row = [
            csv_escape(step.title),
            csv_escape(step.description.unwrap_or("")),
            step.duration_minutes.to_string(),
            step.start_datetime.map(format_timestamp).unwrap_or_default(),
            step.end_datetime.map(format_timestamp).unwrap_or_default(),
            step.status.as_str().to_string(),
            csv_escape(step.comments.unwrap_or("")),
            step.order_index.to_string(),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}

/// ISO-8601 UTC with millisecond precision, e.g. `2024-03-01T09:30:00.000Z`.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Quote a value iff it contains a comma, a newline, or a double quote.
fn csv_escape(value: &str) -> String {
    if value.contains(',') || value.contains('\n') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
