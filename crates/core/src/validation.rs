//! Input validation utilities.
//!
//! The form only checks presence: a report is requested once something has been written in at
//! least one narrative field. Select values are passed through as given.

use crate::{IncidentDraft, ReportError, ReportResult};

/// Ensures the draft is not entirely empty.
///
/// # Errors
///
/// Returns `ReportError::EmptyNarrative` if every narrative field is blank.
pub fn ensure_narrative(draft: &IncidentDraft) -> ReportResult<()> {
    if draft.has_narrative() {
        Ok(())
    } else {
        Err(ReportError::EmptyNarrative)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FieldId;

    #[test]
    fn empty_draft_is_rejected() {
        let err = ensure_narrative(&IncidentDraft::default()).unwrap_err();
        assert!(matches!(err, ReportError::EmptyNarrative));
    }

    #[test]
    fn single_narrative_field_is_enough() {
        let draft = IncidentDraft::collect([(FieldId::Why, Some("確認不足"))]);
        ensure_narrative(&draft).expect("one narrative field should pass");
    }
}
