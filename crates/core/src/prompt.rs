//! Prompt construction for the Report Requester.
//!
//! The prompt is a fixed instruction template: a short role description, the enumerated field
//! values and an outline of the sections the report should contain. Every filled-in value is
//! copied in verbatim.

use std::fmt::Write as _;

use crate::constants::UNSELECTED;
use crate::{FieldId, IncidentDraft};

const ROLE: &str = "あなたは介護施設のリスクマネジメント担当者です。";

const INSTRUCTION: &str = "以下の情報を元に、客観的事実に基づいた事故報告書を清書してください。\n\
報告書は5W1H（いつ・どこで・誰が・何を・なぜ・どのように）が揃うように構成してください。";

const OUTPUT_OUTLINE: &str = "1. 発生状況（「～と思われる」などの断定を避け、客観的に記述）\n\
2. 要因の推察（人・物・環境の視点で）\n\
3. 確認事項（スタッフへの逆質問）";

/// Builds the prompt sent to the text-generation endpoint.
///
/// The selects share one summary line; each narrative field that has a value gets its own line.
pub fn build_prompt(draft: &IncidentDraft) -> String {
    let select = |field: FieldId| {
        draft
            .field(field)
            .map(|v| v.as_str())
            .unwrap_or(UNSELECTED)
    };

    let mut prompt = String::new();
    let _ = writeln!(prompt, "{ROLE}");
    let _ = writeln!(prompt, "{INSTRUCTION}");
    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "【入力情報】");
    let _ = writeln!(
        prompt,
        "{}: {} / {}: {} / {}: {}",
        FieldId::PhysicalStatus.prompt_label(),
        select(FieldId::PhysicalStatus),
        FieldId::BodySide.prompt_label(),
        select(FieldId::BodySide),
        FieldId::Category.prompt_label(),
        select(FieldId::Category),
    );

    for (field, value) in draft.filled_fields().filter(|(f, _)| f.is_narrative()) {
        let _ = writeln!(prompt, "{}: {}", field.prompt_label(), value);
    }

    let _ = writeln!(prompt);
    let _ = writeln!(prompt, "【出力構成】");
    prompt.push_str(OUTPUT_OUTLINE);
    prompt.push('\n');
    prompt
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn scenario_draft() -> IncidentDraft {
        IncidentDraft::collect([
            (FieldId::Category, Some("転倒")),
            (FieldId::PhysicalStatus, Some("一部介助")),
            (FieldId::Notes, Some("居室で転倒、意識清明")),
        ])
    }

    #[test]
    fn prompt_contains_scenario_values() {
        let prompt = build_prompt(&scenario_draft());
        assert!(prompt.contains("転倒"));
        assert!(prompt.contains("一部介助"));
        assert!(prompt.contains("居室で転倒、意識清明"));
        assert!(prompt.contains("現場メモ: 居室で転倒、意識清明"));
    }

    #[test]
    fn prompt_marks_missing_selects() {
        let prompt = build_prompt(&scenario_draft());
        assert!(prompt.contains("身体状況: 一部介助 / 部位: 未選択 / 事象: 転倒"));
    }

    #[test]
    fn prompt_skips_empty_narrative_lines() {
        let prompt = build_prompt(&scenario_draft());
        assert!(!prompt.contains("いつ:"));
        assert!(!prompt.contains("バイタル:"));
    }

    #[test]
    fn prompt_keeps_role_and_outline() {
        let prompt = build_prompt(&IncidentDraft::default());
        assert!(prompt.starts_with(ROLE));
        assert!(prompt.contains("【入力情報】"));
        assert!(prompt.contains("3. 確認事項（スタッフへの逆質問）"));
    }

    #[test]
    fn prompt_is_deterministic() {
        let draft = scenario_draft();
        assert_eq!(build_prompt(&draft), build_prompt(&draft));
    }

    #[test]
    fn multi_line_notes_are_copied_verbatim() {
        let notes = "・7:40 食堂で発見\n・看護師へ報告";
        let draft = IncidentDraft::collect([(FieldId::Notes, Some(notes))]);
        assert!(build_prompt(&draft).contains(notes));
    }

    proptest! {
        #[test]
        fn every_filled_value_is_a_substring(values in proptest::collection::vec(
            proptest::option::of("\\PC{0,24}"),
            FieldId::ALL.len(),
        )) {
            let draft = IncidentDraft::collect(
                FieldId::ALL.into_iter().zip(values.iter().map(|v| v.as_deref())),
            );
            let prompt = build_prompt(&draft);
            for (_, value) in draft.filled_fields() {
                prop_assert!(prompt.contains(value.as_str()));
            }
        }
    }
}
