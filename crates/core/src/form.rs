//! Form field definitions.
//!
//! The incident form is a fixed table of labelled controls. The HTML page, the JSON API and the
//! prompt builder all walk `FieldId::ALL` so a field only needs to be described once.

use crate::constants::{BODY_SIDE_OPTIONS, CATEGORY_OPTIONS, PHYSICAL_STATUS_OPTIONS};

/// Kind of control rendered for a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Select-one list with a fixed set of options.
    Select(&'static [&'static str]),
    /// Single-line free text.
    Text,
    /// Multi-line free text.
    TextArea,
}

/// Identifies one field of the incident form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldId {
    PhysicalStatus,
    BodySide,
    Category,
    When,
    Place,
    Who,
    What,
    Why,
    How,
    Vitals,
    ActionsTaken,
    Notes,
}

impl FieldId {
    /// Every field in display order.
    pub const ALL: [FieldId; 12] = [
        FieldId::PhysicalStatus,
        FieldId::BodySide,
        FieldId::Category,
        FieldId::When,
        FieldId::Place,
        FieldId::Who,
        FieldId::What,
        FieldId::Why,
        FieldId::How,
        FieldId::Vitals,
        FieldId::ActionsTaken,
        FieldId::Notes,
    ];

    /// Form parameter name, also used as the JSON key.
    pub fn name(self) -> &'static str {
        match self {
            FieldId::PhysicalStatus => "physical_status",
            FieldId::BodySide => "body_side",
            FieldId::Category => "category",
            FieldId::When => "when",
            FieldId::Place => "place",
            FieldId::Who => "who",
            FieldId::What => "what",
            FieldId::Why => "why",
            FieldId::How => "how",
            FieldId::Vitals => "vitals",
            FieldId::ActionsTaken => "actions_taken",
            FieldId::Notes => "notes",
        }
    }

    /// Label shown next to the control.
    pub fn label(self) -> &'static str {
        match self {
            FieldId::PhysicalStatus => "身体状況",
            FieldId::BodySide => "部位",
            FieldId::Category => "事故種別",
            FieldId::When => "いつ",
            FieldId::Place => "どこで",
            FieldId::Who => "誰が",
            FieldId::What => "何を",
            FieldId::Why => "なぜ",
            FieldId::How => "どのように",
            FieldId::Vitals => "バイタル",
            FieldId::ActionsTaken => "対応",
            FieldId::Notes => "状況メモ（箇条書きでOK）",
        }
    }

    /// Label used for the field's line in the prompt.
    pub fn prompt_label(self) -> &'static str {
        match self {
            FieldId::PhysicalStatus => "身体状況",
            FieldId::BodySide => "部位",
            FieldId::Category => "事象",
            FieldId::Notes => "現場メモ",
            other => other.label(),
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::PhysicalStatus => FieldKind::Select(PHYSICAL_STATUS_OPTIONS),
            FieldId::BodySide => FieldKind::Select(BODY_SIDE_OPTIONS),
            FieldId::Category => FieldKind::Select(CATEGORY_OPTIONS),
            FieldId::Notes => FieldKind::TextArea,
            _ => FieldKind::Text,
        }
    }

    /// Example text shown while the control is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldId::When => "例：2月3日 7:40頃、朝食後",
            FieldId::Place => "例：食堂、居室のベッド脇",
            FieldId::Who => "例：Aさん（本人）、発見者は介護職員B",
            FieldId::What => "例：Bさん用の内服薬をAさんに配薬した",
            FieldId::Why => "例：配薬時の氏名確認が不十分だった",
            FieldId::How => "例：配薬ケースを取り違えた",
            FieldId::Vitals => "例：BP 128/74、P 72、SpO2 97%、KT 36.5℃",
            FieldId::ActionsTaken => "例：看護師へ報告し、主治医の指示で経過観察",
            FieldId::Notes => "例：朝食後、Aさんの薬をBさんに誤薬。バイタル異常なし。",
            _ => "",
        }
    }

    /// Whether `value` can be stored for this field. Selects only take one of their options.
    pub fn accepts(self, value: &str) -> bool {
        match self.kind() {
            FieldKind::Select(options) => options.contains(&value),
            FieldKind::Text | FieldKind::TextArea => true,
        }
    }

    /// Free-text fields; at least one must be filled in before a report is requested.
    pub fn is_narrative(self) -> bool {
        !matches!(self.kind(), FieldKind::Select(_))
    }
}
