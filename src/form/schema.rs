use super::answers::AnswerValue;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    Number,
    SingleChoice,
    MultiChoice,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Constraint {
    Range { min: f64, max: f64 },
    Options { options: &'static [&'static str] },
}

/// Static metadata for one form input.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub constraint: Option<Constraint>,
    pub default: Option<AnswerValue>,
}

impl FieldDescriptor {
    pub fn text(key: &'static str, label: &'static str) -> Self {
        Self { key, label, kind: FieldKind::Text, constraint: None, default: None }
    }

    pub fn number(key: &'static str, label: &'static str, min: f64, max: f64) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::Number,
            constraint: Some(Constraint::Range { min, max }),
            default: None,
        }
    }

    pub fn single_choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::SingleChoice,
            constraint: Some(Constraint::Options { options }),
            default: None,
        }
    }

    pub fn multi_choice(key: &'static str, label: &'static str, options: &'static [&'static str]) -> Self {
        Self {
            key,
            label,
            kind: FieldKind::MultiChoice,
            constraint: Some(Constraint::Options { options }),
            default: None,
        }
    }

    pub fn with_default(mut self, value: impl Into<AnswerValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn range(&self) -> Option<(f64, f64)> {
        match self.constraint {
            Some(Constraint::Range { min, max }) => Some((min, max)),
            _ => None,
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self.constraint {
            Some(Constraint::Options { options }) => options,
            _ => &[],
        }
    }

    /// The value used when the client supplies nothing for this field.
    pub fn fallback(&self) -> AnswerValue {
        if let Some(default) = &self.default {
            return default.clone();
        }
        match self.kind {
            FieldKind::Text => AnswerValue::Text(String::new()),
            FieldKind::Number => AnswerValue::Number(self.range().map(|(min, _)| min).unwrap_or(0.0)),
            FieldKind::SingleChoice => {
                AnswerValue::Text(self.options().first().map(|o| o.to_string()).unwrap_or_default())
            }
            FieldKind::MultiChoice => AnswerValue::Choices(Vec::new()),
        }
    }
}

const GENDERS: &[&str] = &["Male", "Female", "Other"];

const ACTIVITY_LEVELS: &[&str] = &[
    "Sedentary (little to no exercise)",
    "Lightly Active (1–3 days/week)",
    "Moderately Active (3–5 days/week)",
    "Very Active (6–7 days/week)",
];

const GOALS: &[&str] = &["Lose weight", "Build muscle", "Maintain weight", "Improve endurance"];

const DIETS: &[&str] = &[
    "No Restrictions",
    "Vegetarian",
    "Vegan",
    "Gluten-Free",
    "Dairy-Free",
    "No Pork",
    "No Beef",
];

/// Ordered list of descriptors. Drives both the form and collection.
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    fields: Vec<FieldDescriptor>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// The fitness-profile questionnaire.
    pub fn fitness_profile() -> Self {
        Self::new(vec![
            FieldDescriptor::text("name", "Name"),
            FieldDescriptor::number("age", "Age", 10.0, 100.0).with_default(AnswerValue::Number(25.0)),
            FieldDescriptor::single_choice("gender", "Gender", GENDERS),
            FieldDescriptor::number("height", "Height (cm)", 100.0, 250.0).with_default(AnswerValue::Number(170.0)),
            FieldDescriptor::number("weight", "Weight (kg)", 30.0, 200.0).with_default(AnswerValue::Number(70.0)),
            FieldDescriptor::single_choice("activity_level", "Activity Level", ACTIVITY_LEVELS),
            FieldDescriptor::single_choice("goal", "Primary Goal", GOALS),
            FieldDescriptor::multi_choice("diet", "Dietary Preferences / Restrictions", DIETS),
            FieldDescriptor::number("workout_days", "Workout Days per Week", 1.0, 7.0).with_default(AnswerValue::Number(3.0)),
            FieldDescriptor::text("injuries", "Injuries or Limitations").with_default("None"),
        ])
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let schema = FormSchema::fitness_profile();
        let keys: HashSet<_> = schema.fields().iter().map(|f| f.key).collect();
        assert_eq!(keys.len(), schema.fields().len());
    }

    #[test]
    fn constraints_match_kinds() {
        for field in FormSchema::fitness_profile().fields() {
            match field.kind {
                FieldKind::Number => assert!(field.range().is_some(), "{} has no range", field.key),
                FieldKind::SingleChoice | FieldKind::MultiChoice => {
                    assert!(!field.options().is_empty(), "{} has no options", field.key)
                }
                FieldKind::Text => assert!(field.constraint.is_none()),
            }
        }
    }

    #[test]
    fn fallbacks_follow_kind() {
        let schema = FormSchema::fitness_profile();
        assert_eq!(schema.get("workout_days").unwrap().fallback(), AnswerValue::Number(3.0));
        assert_eq!(schema.get("gender").unwrap().fallback(), AnswerValue::Text("Male".into()));
        assert_eq!(schema.get("diet").unwrap().fallback(), AnswerValue::Choices(vec![]));
        assert_eq!(schema.get("name").unwrap().fallback(), AnswerValue::Text(String::new()));

        let bare = FieldDescriptor::number("reps", "Reps", 5.0, 20.0);
        assert_eq!(bare.fallback(), AnswerValue::Number(5.0));
    }

    #[test]
    fn serializes_for_any_ui_layer() {
        let json = serde_json::to_value(FormSchema::fitness_profile()).unwrap();
        let age = &json["fields"][1];
        assert_eq!(age["key"], "age");
        assert_eq!(age["kind"], "number");
        assert_eq!(age["constraint"]["type"], "range");
        assert_eq!(age["constraint"]["max"], 100.0);
    }
}
