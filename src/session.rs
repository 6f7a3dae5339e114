use crate::ai::builder::PromptBuilder;
use crate::ai::client::ChatModel;
use crate::config::Config;
use crate::error::PlannerError;
use crate::form::answers::{ProfileAnswers, Submission};
use crate::form::schema::FormSchema;
use crate::render::{Notice, PlanView, RenderModel, RenderedText, SessionStatus};
use uuid::Uuid;

/// Generated plan plus its lazily computed translation.
///
/// Each instance has its own id. The translation cache belongs to the
/// instance, so a regenerated plan never inherits an old translation even
/// when the text happens to match.
#[derive(Debug, Clone)]
pub struct PlanResult {
    id: Uuid,
    source_text: String,
    translated_text: Option<String>,
}

impl PlanResult {
    fn new(source_text: String) -> Self {
        Self { id: Uuid::new_v4(), source_text, translated_text: None }
    }
}

/// Per-user state. Nothing outlives it.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    answers: Option<ProfileAnswers>,
    plan: Option<PlanResult>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self { id: Uuid::new_v4(), answers: None, plan: None }
    }

    pub fn status(&self) -> SessionStatus {
        match &self.plan {
            None => SessionStatus::NoPlan,
            Some(plan) if plan.translated_text.is_some() => SessionStatus::PlanAndTranslationReady,
            Some(_) => SessionStatus::PlanReady,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Show,
    Submit(Submission),
    Translate,
}

/// Handles one user action at a time against a session.
pub struct Planner<'a, M> {
    config: &'a Config,
    model: M,
    schema: FormSchema,
    prompts: PromptBuilder,
}

impl<'a, M: ChatModel> Planner<'a, M> {
    pub fn new(config: &'a Config, model: M, schema: FormSchema) -> Self {
        Self {
            config,
            model,
            schema,
            prompts: PromptBuilder::new(config.plan_days, config.target_language.clone()),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Applies the action and returns what to display. Failures become an
    /// inline notice and leave the session as it was.
    pub async fn handle(&self, session: &mut Session, action: Action) -> RenderModel {
        let outcome = match action {
            Action::Show => Ok(()),
            Action::Submit(submission) => self.submit(session, &submission).await,
            Action::Translate => self.translate(session).await,
        };
        let notice = outcome.err().map(|e| {
            log::error!("❌ Session {}: {}", session.id, e);
            Notice::from(e)
        });
        self.render(session, notice)
    }

    pub async fn submit(&self, session: &mut Session, submission: &Submission) -> Result<(), PlannerError> {
        let answers = self.schema.collect(submission)?;
        let messages = self.prompts.plan_messages(&self.schema, &answers);

        log::info!("🏋️  Generating {}-day plan for session {}", self.config.plan_days, session.id);
        let text = self.model.complete(&messages, &self.config.plan).await?;

        let plan = PlanResult::new(text);
        log::info!("   -> Plan {} ready ({} chars)", plan.id, plan.source_text.chars().count());
        session.answers = Some(answers);
        session.plan = Some(plan);
        Ok(())
    }

    pub async fn translate(&self, session: &mut Session) -> Result<(), PlannerError> {
        let plan = session.plan.as_mut().ok_or(PlannerError::NoPlan)?;
        if plan.translated_text.is_some() {
            log::debug!("Translation of plan {} already cached", plan.id);
            return Ok(());
        }

        log::info!("🌐 Translating plan {} into {}", plan.id, self.prompts.target_language());
        let messages = self.prompts.translation_messages(&plan.source_text);
        let text = self.model.complete(&messages, &self.config.translation).await?;
        plan.translated_text = Some(text);
        Ok(())
    }

    pub fn render(&self, session: &Session, notice: Option<Notice>) -> RenderModel {
        RenderModel {
            session_id: session.id,
            status: session.status(),
            answers: session.answers.clone(),
            plan: session.plan.as_ref().map(|plan| PlanView {
                plan_id: plan.id,
                source: RenderedText::new(&plan.source_text),
                translation: plan.translated_text.as_deref().map(RenderedText::new),
                target_language: self.prompts.target_language().to_string(),
            }),
            notice,
        }
    }
}
