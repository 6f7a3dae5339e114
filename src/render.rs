use crate::error::PlannerError;
use crate::form::answers::ProfileAnswers;
use serde::Serialize;
use uuid::Uuid;

/// Model output prepared for display and for copying.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedText {
    pub markdown: String,
    pub code_block: String,
}

impl RenderedText {
    pub fn new(text: &str) -> Self {
        Self { markdown: text.to_string(), code_block: code_block(text) }
    }
}

/// Wraps text in a fence longer than any backtick run it contains.
pub fn code_block(text: &str) -> String {
    let longest_run = text
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest_run.max(2) + 1);
    let newline = if text.ends_with('\n') { "" } else { "\n" };
    format!("{fence}text\n{text}{newline}{fence}")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    NoPlan,
    PlanReady,
    PlanAndTranslationReady,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanView {
    pub plan_id: Uuid,
    pub source: RenderedText,
    pub translation: Option<RenderedText>,
    pub target_language: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl From<PlannerError> for Notice {
    fn from(err: PlannerError) -> Self {
        Self { message: err.to_string() }
    }
}

/// Everything a UI layer needs to draw the session after one action.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderModel {
    pub session_id: Uuid,
    pub status: SessionStatus,
    pub answers: Option<ProfileAnswers>,
    pub plan: Option<PlanView>,
    pub notice: Option<Notice>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_gets_a_triple_fence() {
        assert_eq!(code_block("Day 1: squats\n"), "```text\nDay 1: squats\n```");
    }

    #[test]
    fn trailing_blank_lines_survive() {
        assert_eq!(code_block("line\n\n"), "```text\nline\n\n```");
        assert_eq!(code_block("line"), "```text\nline\n```");
    }

    #[test]
    fn fence_outgrows_embedded_backticks() {
        let text = "use this:\n```\nsquat 5x5\n```\nand `inline`";
        let block = code_block(text);
        assert!(block.starts_with("````text\n"));
        assert!(block.ends_with("\n````"));
        assert!(block.contains(text));
    }

    #[test]
    fn rendered_text_keeps_markdown_verbatim() {
        let rendered = RenderedText::new("## Plan\n**bold**");
        assert_eq!(rendered.markdown, "## Plan\n**bold**");
        assert!(rendered.code_block.contains("**bold**"));
    }

    #[test]
    fn notice_carries_error_text() {
        let notice = Notice::from(PlannerError::NoPlan);
        assert_eq!(notice.message, "No plan has been generated yet");
    }
}
