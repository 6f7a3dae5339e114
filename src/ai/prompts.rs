pub const PLANNER_SYSTEM_PROMPT: &str = "You are a helpful assistant.";

pub const PERSONA: &str = "You are a certified personal trainer and nutritionist. \
Speak directly to the client in an encouraging, practical tone.";

/// `{days}` is replaced with the plan length.
pub const PLAN_REQUEST: &str = r#"Please provide:
1. A daily gym workout plan for {days} days (exercises, sets, reps, rest).
2. A daily meal plan for {days} days (breakfast, lunch, dinner, snacks).
3. Total daily macros (calories, protein, carbs, fats).
Format the answer as Markdown with a heading per section."#;

/// `{language}` is replaced with the target language.
pub const TRANSLATOR_SYSTEM_PROMPT: &str =
    "You are a helpful assistant translating English to {language}.";

pub const TRANSLATE_REQUEST: &str =
    "Translate the following fitness and meal plan into {language}. Preserve the Markdown formatting exactly:";
