//! Checklist-level rules shared by the service layer.
//!
//! Default checklists are seeded templates: they can be read and cloned but
//! never changed from the outside. The guard messages below are returned to
//! clients verbatim.

use crate::error::CoreError;

/// Suffix appended to the title of any cloned checklist or step.
pub const COPY_SUFFIX: &str = " (Copy)";

pub const DEFAULT_STEP_TITLE: &str = "New Step";
pub const DEFAULT_DURATION_MINUTES: i32 = 60;
pub const DEFAULT_CATEGORY_COLOR: &str = "#6b7280";

pub const MSG_CHECKLIST_TITLE_REQUIRED: &str = "Checklist title is required";
pub const MSG_CATEGORY_NAME_REQUIRED: &str = "Category name is required";

pub const MSG_EDIT_DEFAULT: &str = "Cannot edit default checklists";
pub const MSG_DELETE_DEFAULT: &str = "Cannot delete default checklists";
pub const MSG_ADD_STEP_DEFAULT: &str = "Cannot add steps to default checklists";
pub const MSG_EDIT_STEP_DEFAULT: &str = "Cannot edit steps in default checklists";
pub const MSG_DELETE_STEP_DEFAULT: &str = "Cannot delete steps from default checklists";
pub const MSG_CLONE_STEP_DEFAULT: &str = "Cannot clone steps in default checklists";
pub const MSG_REORDER_DEFAULT: &str = "Cannot reorder steps in default checklists";

/// Reject a mutation when the owning checklist is a default template.
pub fn ensure_not_default(is_default: bool, message: &str) -> Result<(), CoreError> {
    if is_default {
        return Err(CoreError::Forbidden(message.to_string()));
    }
    Ok(())
}

/// Title given to a clone.
pub fn copy_title(title: &str) -> String {
    format!("{title}{COPY_SUFFIX}")
}

/// Trim a required title, rejecting blanks with `message`.
pub fn require_title(title: Option<&str>, message: &str) -> Result<String, CoreError> {
    title
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| CoreError::Validation(message.to_string()))
}

/// Optional free text: blank becomes `None`, anything else is kept as sent.
pub fn optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Validate a duration supplied over the API.
pub fn validate_duration(minutes: i32) -> Result<i32, CoreError> {
    if minutes < 0 {
        return Err(CoreError::Validation(format!(
            "duration_minutes must be >= 0, got {minutes}"
        )));
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_checklists_are_forbidden() {
        assert_matches!(
            ensure_not_default(true, MSG_EDIT_DEFAULT),
            Err(CoreError::Forbidden(msg)) if msg == MSG_EDIT_DEFAULT
        );
        assert!(ensure_not_default(false, MSG_EDIT_DEFAULT).is_ok());
    }

    #[test]
    fn copy_title_appends_suffix() {
        assert_eq!(copy_title("Review"), "Review (Copy)");
        assert_eq!(copy_title("Review (Copy)"), "Review (Copy) (Copy)");
    }

    #[test]
    fn optional_text_drops_blanks() {
        assert_eq!(optional_text(Some(String::new())), None);
        assert_eq!(optional_text(Some(" \t".to_string())), None);
        assert_eq!(optional_text(Some("notes".to_string())), Some("notes".to_string()));
        assert_eq!(optional_text(None), None);
    }

    #[test]
    fn require_title_trims_and_rejects_blank() {
        assert_eq!(require_title(Some("  Launch "), "x").unwrap(), "Launch");
        assert_matches!(require_title(Some("   "), "required"), Err(CoreError::Validation(m)) if m == "required");
        assert_matches!(require_title(None, "required"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn negative_duration_is_rejected() {
        assert_eq!(validate_duration(0).unwrap(), 0);
        assert_matches!(validate_duration(-5), Err(CoreError::Validation(_)));
    }
}
