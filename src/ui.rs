use crate::ai::client::ChatModel;
use crate::error::PlannerError;
use crate::form::answers::{AnswerValue, ProfileAnswers, Submission};
use crate::form::schema::{FieldDescriptor, FieldKind, FormSchema};
use crate::render::{RenderModel, SessionStatus};
use crate::session::{Action, Planner, Session};
use console::style;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, MultiSelect, Select};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;
use termimad::MadSkin;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Generate,
    Translate,
    CopyPlan,
    CopyTranslation,
    Quit,
}

impl MenuItem {
    fn label(self, status: SessionStatus) -> &'static str {
        match (self, status) {
            (MenuItem::Generate, SessionStatus::NoPlan) => "Generate my plan",
            (MenuItem::Generate, _) => "Edit answers and regenerate",
            (MenuItem::Translate, SessionStatus::PlanAndTranslationReady) => "Show translation",
            (MenuItem::Translate, _) => "Translate plan",
            (MenuItem::CopyPlan, _) => "Show plan as code block",
            (MenuItem::CopyTranslation, _) => "Show translation as code block",
            (MenuItem::Quit, _) => "Quit",
        }
    }
}

/// Actions available in each state.
fn menu_for(status: SessionStatus) -> Vec<MenuItem> {
    match status {
        SessionStatus::NoPlan => vec![MenuItem::Generate, MenuItem::Quit],
        SessionStatus::PlanReady => vec![MenuItem::Generate, MenuItem::Translate, MenuItem::CopyPlan, MenuItem::Quit],
        SessionStatus::PlanAndTranslationReady => vec![
            MenuItem::Generate,
            MenuItem::Translate,
            MenuItem::CopyPlan,
            MenuItem::CopyTranslation,
            MenuItem::Quit,
        ],
    }
}

pub struct TerminalUi {
    theme: ColorfulTheme,
    skin: MadSkin,
}

impl Default for TerminalUi {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalUi {
    pub fn new() -> Self {
        let mut skin = MadSkin::default_dark();
        skin.inline_code.set_fg(termimad::crossterm::style::Color::Yellow);
        Self { theme: ColorfulTheme::default(), skin }
    }

    pub async fn run<M: ChatModel>(&self, planner: &Planner<'_, M>) -> Result<(), PlannerError> {
        let mut session = Session::new();
        let mut view = planner.handle(&mut session, Action::Show).await;

        println!();
        println!("  {}", style("🏋️  Gym & 🍎 Meal Planner").cyan().bold());
        println!("  Answer the questions below to get your customized gym and meal plan.");

        loop {
            let items = menu_for(view.status);
            let labels: Vec<&str> = items.iter().map(|i| i.label(view.status)).collect();
            println!();
            let choice = Select::with_theme(&self.theme)
                .with_prompt("What next?")
                .items(&labels)
                .default(0)
                .interact()?;

            match items[choice] {
                MenuItem::Generate => {
                    let submission = self.ask_profile(planner.schema(), view.answers.as_ref())?;
                    view = with_spinner(
                        "Generating your personalized plan...",
                        planner.handle(&mut session, Action::Submit(submission)),
                    )
                    .await;
                    self.show_plan(&view);
                }
                MenuItem::Translate => {
                    view = with_spinner("Translating...", planner.handle(&mut session, Action::Translate)).await;
                    self.show_translation(&view);
                }
                MenuItem::CopyPlan => {
                    if let Some(plan) = &view.plan {
                        println!("{}", plan.source.code_block);
                    }
                }
                MenuItem::CopyTranslation => {
                    if let Some(translation) = view.plan.as_ref().and_then(|p| p.translation.as_ref()) {
                        println!("{}", translation.code_block);
                    }
                }
                MenuItem::Quit => break,
            }
        }
        Ok(())
    }

    /// One prompt per descriptor, prefilled from the previous submission.
    fn ask_profile(&self, schema: &FormSchema, previous: Option<&ProfileAnswers>) -> Result<Submission, PlannerError> {
        let mut submission = Submission::new();
        for field in schema.fields() {
            let current = previous
                .and_then(|a| a.get(field.key).cloned())
                .unwrap_or_else(|| field.fallback());
            let value = self.ask_field(field, &current)?;
            submission.insert(field.key.to_string(), value);
        }
        Ok(submission)
    }

    fn ask_field(&self, field: &FieldDescriptor, current: &AnswerValue) -> Result<AnswerValue, PlannerError> {
        let value = match field.kind {
            FieldKind::Text => {
                let text: String = Input::with_theme(&self.theme)
                    .with_prompt(field.label)
                    .with_initial_text(current.to_string())
                    .allow_empty(true)
                    .interact_text()?;
                AnswerValue::Text(text)
            }
            FieldKind::Number => {
                let prompt = match field.range() {
                    Some((min, max)) => format!(
                        "{} ({}–{})",
                        field.label,
                        AnswerValue::Number(min),
                        AnswerValue::Number(max)
                    ),
                    None => field.label.to_string(),
                };
                let default = match current {
                    AnswerValue::Number(n) => *n,
                    _ => 0.0,
                };
                let n: f64 = Input::with_theme(&self.theme)
                    .with_prompt(prompt)
                    .default(default)
                    .interact_text()?;
                AnswerValue::Number(n)
            }
            FieldKind::SingleChoice => {
                let options = field.options();
                let selected = options
                    .iter()
                    .position(|o| AnswerValue::Text(o.to_string()) == *current)
                    .unwrap_or(0);
                let index = Select::with_theme(&self.theme)
                    .with_prompt(field.label)
                    .items(options)
                    .default(selected)
                    .interact()?;
                AnswerValue::Text(options[index].to_string())
            }
            FieldKind::MultiChoice => {
                let options = field.options();
                let chosen: Vec<bool> = options
                    .iter()
                    .map(|o| matches!(current, AnswerValue::Choices(c) if c.iter().any(|x| x.as_str() == *o)))
                    .collect();
                let picked = MultiSelect::with_theme(&self.theme)
                    .with_prompt(field.label)
                    .items(options)
                    .defaults(&chosen)
                    .interact()?;
                AnswerValue::Choices(picked.into_iter().map(|i| options[i].to_string()).collect())
            }
        };
        Ok(value)
    }

    fn show_notice(&self, view: &RenderModel) -> bool {
        match &view.notice {
            Some(notice) => {
                println!();
                println!("  {} {}", style("✗").red().bold(), style(&notice.message).red());
                true
            }
            None => false,
        }
    }

    fn show_plan(&self, view: &RenderModel) {
        if self.show_notice(view) {
            return;
        }
        if let Some(plan) = &view.plan {
            println!();
            println!("  {}", style("📝 Your Plan").green().bold());
            println!();
            print!("{}", self.skin.term_text(&plan.source.markdown));
        }
    }

    fn show_translation(&self, view: &RenderModel) {
        if self.show_notice(view) {
            return;
        }
        if let Some(plan) = &view.plan {
            if let Some(translation) = &plan.translation {
                println!();
                println!("  {}", style(format!("📝 Plan ({})", plan.target_language)).green().bold());
                println!();
                print!("{}", self.skin.term_text(&translation.markdown));
            }
        }
    }
}

/// Blocks on `work` while a spinner runs.
async fn with_spinner<F: Future>(message: &str, work: F) -> F::Output {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(80));
    let output = work.await;
    spinner.finish_and_clear();
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_tracks_state_machine() {
        assert_eq!(menu_for(SessionStatus::NoPlan), vec![MenuItem::Generate, MenuItem::Quit]);
        assert!(menu_for(SessionStatus::PlanReady).contains(&MenuItem::Translate));
        assert!(!menu_for(SessionStatus::PlanReady).contains(&MenuItem::CopyTranslation));
        assert!(menu_for(SessionStatus::PlanAndTranslationReady).contains(&MenuItem::CopyTranslation));
    }

    #[test]
    fn labels_reflect_status() {
        assert_eq!(MenuItem::Generate.label(SessionStatus::NoPlan), "Generate my plan");
        assert_eq!(MenuItem::Generate.label(SessionStatus::PlanReady), "Edit answers and regenerate");
        assert_eq!(MenuItem::Translate.label(SessionStatus::PlanAndTranslationReady), "Show translation");
    }

    #[tokio::test]
    async fn spinner_passes_output_through() {
        let out = with_spinner("working", async { 42 }).await;
        assert_eq!(out, 42);
    }
}
