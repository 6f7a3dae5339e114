use super::client::ChatMessage;
use super::prompts;
use crate::form::answers::ProfileAnswers;
use crate::form::schema::FormSchema;

/// Renders answers and plans into the message lists sent to the model.
///
/// Free text is interpolated as-is. Nothing is escaped.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    plan_days: u32,
    target_language: String,
}

impl PromptBuilder {
    pub fn new(plan_days: u32, target_language: impl Into<String>) -> Self {
        Self { plan_days, target_language: target_language.into() }
    }

    /// One `- Label: value` line per schema field, in schema order.
    pub fn client_details(&self, schema: &FormSchema, answers: &ProfileAnswers) -> String {
        schema
            .fields()
            .iter()
            .filter_map(|field| answers.get(field.key).map(|value| format!("- {}: {}", field.label, value)))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn plan_prompt(&self, schema: &FormSchema, answers: &ProfileAnswers) -> String {
        format!(
            "{}\nClient details:\n{}\n\n{}",
            prompts::PERSONA,
            self.client_details(schema, answers),
            prompts::PLAN_REQUEST.replace("{days}", &self.plan_days.to_string()),
        )
    }

    pub fn plan_messages(&self, schema: &FormSchema, answers: &ProfileAnswers) -> Vec<ChatMessage> {
        vec![
            ChatMessage::system(prompts::PLANNER_SYSTEM_PROMPT),
            ChatMessage::user(self.plan_prompt(schema, answers)),
        ]
    }

    pub fn translation_messages(&self, source_text: &str) -> Vec<ChatMessage> {
        let language = self.target_language.as_str();
        vec![
            ChatMessage::system(prompts::TRANSLATOR_SYSTEM_PROMPT.replace("{language}", language)),
            ChatMessage::user(format!(
                "{}\n\n{}",
                prompts::TRANSLATE_REQUEST.replace("{language}", language),
                source_text
            )),
        ]
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }
}
