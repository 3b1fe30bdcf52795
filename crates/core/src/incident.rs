//! The Incident Draft: the transient set of form values describing one care incident.

use crate::form::FieldId;
use kaigo_types::NonEmptyText;

/// Flat record of optional form values.
///
/// Created when a form is submitted and dropped once the response has been rendered. Blank values
/// are stored as `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncidentDraft {
    pub physical_status: Option<NonEmptyText>,
    pub body_side: Option<NonEmptyText>,
    pub category: Option<NonEmptyText>,
    pub when: Option<NonEmptyText>,
    pub place: Option<NonEmptyText>,
    pub who: Option<NonEmptyText>,
    pub what: Option<NonEmptyText>,
    pub why: Option<NonEmptyText>,
    pub how: Option<NonEmptyText>,
    pub vitals: Option<NonEmptyText>,
    pub actions_taken: Option<NonEmptyText>,
    pub notes: Option<NonEmptyText>,
}

impl IncidentDraft {
    /// Collects raw form values keyed by field.
    ///
    /// Fields missing from `values` or blank after trimming are left empty, as are select values
    /// that are not one of the field's options.
    pub fn collect<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = (FieldId, Option<&'a str>)>,
    {
        let mut draft = Self::default();
        for (field, value) in values {
            *draft.slot_mut(field) = NonEmptyText::from_optional(value).filter(|v| {
                let accepted = field.accepts(v.as_str());
                if !accepted {
                    tracing::warn!(field = field.name(), "dropping value outside the option list");
                }
                accepted
            });
        }
        draft
    }

    pub fn field(&self, field: FieldId) -> Option<&NonEmptyText> {
        match field {
            FieldId::PhysicalStatus => self.physical_status.as_ref(),
            FieldId::BodySide => self.body_side.as_ref(),
            FieldId::Category => self.category.as_ref(),
            FieldId::When => self.when.as_ref(),
            FieldId::Place => self.place.as_ref(),
            FieldId::Who => self.who.as_ref(),
            FieldId::What => self.what.as_ref(),
            FieldId::Why => self.why.as_ref(),
            FieldId::How => self.how.as_ref(),
            FieldId::Vitals => self.vitals.as_ref(),
            FieldId::ActionsTaken => self.actions_taken.as_ref(),
            FieldId::Notes => self.notes.as_ref(),
        }
    }

    fn slot_mut(&mut self, field: FieldId) -> &mut Option<NonEmptyText> {
        match field {
            FieldId::PhysicalStatus => &mut self.physical_status,
            FieldId::BodySide => &mut self.body_side,
            FieldId::Category => &mut self.category,
            FieldId::When => &mut self.when,
            FieldId::Place => &mut self.place,
            FieldId::Who => &mut self.who,
            FieldId::What => &mut self.what,
            FieldId::Why => &mut self.why,
            FieldId::How => &mut self.how,
            FieldId::Vitals => &mut self.vitals,
            FieldId::ActionsTaken => &mut self.actions_taken,
            FieldId::Notes => &mut self.notes,
        }
    }

    /// True when at least one free-text field is filled in.
    pub fn has_narrative(&self) -> bool {
        FieldId::ALL
            .iter()
            .filter(|f| f.is_narrative())
            .any(|f| self.field(*f).is_some())
    }

    /// Filled-in fields in display order.
    pub fn filled_fields(&self) -> impl Iterator<Item = (FieldId, &NonEmptyText)> + '_ {
        FieldId::ALL
            .into_iter()
            .filter_map(move |f| self.field(f).map(|value| (f, value)))
    }
}
