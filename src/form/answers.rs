use super::schema::{FieldDescriptor, FieldKind, FormSchema};
use crate::error::PlannerError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A single submitted value. Single-choice answers are carried as `Text`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Number(f64),
    Text(String),
    Choices(Vec<String>),
}

impl From<f64> for AnswerValue {
    fn from(n: f64) -> Self {
        AnswerValue::Number(n)
    }
}

impl From<&str> for AnswerValue {
    fn from(s: &str) -> Self {
        AnswerValue::Text(s.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(s: String) -> Self {
        AnswerValue::Text(s)
    }
}

impl From<Vec<String>> for AnswerValue {
    fn from(v: Vec<String>) -> Self {
        AnswerValue::Choices(v)
    }
}

impl fmt::Display for AnswerValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0"
            AnswerValue::Number(n) if n.fract() == 0.0 && n.abs() < 1e15 => write!(f, "{}", *n as i64),
            AnswerValue::Number(n) => write!(f, "{n}"),
            AnswerValue::Text(s) => f.write_str(s),
            AnswerValue::Choices(c) if c.is_empty() => f.write_str("No selection"),
            AnswerValue::Choices(c) => f.write_str(&c.join(", ")),
        }
    }
}

/// Raw client input, keyed by field. Missing keys fall back to defaults.
pub type Submission = HashMap<String, AnswerValue>;

/// The collected profile: exactly one entry per schema field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ProfileAnswers {
    values: BTreeMap<String, AnswerValue>,
}

impl ProfileAnswers {
    pub fn get(&self, key: &str) -> Option<&AnswerValue> {
        self.values.get(key)
    }
}

impl FormSchema {
    /// Turns a raw submission into answers, applying defaults and clamping.
    /// Keys not in the schema are ignored.
    pub fn collect(&self, submission: &Submission) -> Result<ProfileAnswers, PlannerError> {
        let mut values = BTreeMap::new();
        for field in self.fields() {
            let value = match submission.get(field.key) {
                Some(raw) => normalize(field, raw)?,
                None => field.fallback(),
            };
            values.insert(field.key.to_string(), value);
        }
        Ok(ProfileAnswers { values })
    }
}

fn invalid(field: &FieldDescriptor, reason: impl Into<String>) -> PlannerError {
    PlannerError::InvalidField { field: field.key.to_string(), reason: reason.into() }
}

fn normalize(field: &FieldDescriptor, raw: &AnswerValue) -> Result<AnswerValue, PlannerError> {
    match field.kind {
        FieldKind::Text => match raw {
            AnswerValue::Text(s) if s.trim().is_empty() => Ok(field.fallback()),
            AnswerValue::Text(s) => Ok(AnswerValue::Text(s.clone())),
            AnswerValue::Number(_) => Ok(AnswerValue::Text(raw.to_string())),
            AnswerValue::Choices(_) => Err(invalid(field, "expected text, got a list")),
        },
        FieldKind::Number => {
            let n = match raw {
                AnswerValue::Number(n) => *n,
                AnswerValue::Text(s) if s.trim().is_empty() => return Ok(field.fallback()),
                AnswerValue::Text(s) => s
                    .trim()
                    .parse::<f64>()
                    .map_err(|_| invalid(field, format!("'{s}' is not a number")))?,
                AnswerValue::Choices(_) => return Err(invalid(field, "expected a number, got a list")),
            };
            if !n.is_finite() {
                return Err(invalid(field, "number must be finite"));
            }
            Ok(AnswerValue::Number(clamp(field, n)))
        }
        FieldKind::SingleChoice => match raw {
            AnswerValue::Text(s) => Ok(AnswerValue::Text(pick_option(field, s)?)),
            _ => Err(invalid(field, "expected one option")),
        },
        FieldKind::MultiChoice => {
            let picked: Vec<&String> = match raw {
                AnswerValue::Choices(items) => items.iter().collect(),
                AnswerValue::Text(s) => vec![s],
                AnswerValue::Number(_) => return Err(invalid(field, "expected a list of options")),
            };
            let mut chosen: Vec<String> = Vec::with_capacity(picked.len());
            for item in picked {
                let option = pick_option(field, item)?;
                if !chosen.contains(&option) {
                    chosen.push(option);
                }
            }
            Ok(AnswerValue::Choices(chosen))
        }
    }
}

fn clamp(field: &FieldDescriptor, n: f64) -> f64 {
    match field.range() {
        Some((min, max)) => {
            let clamped = n.clamp(min, max);
            if clamped != n {
                log::debug!("Clamped {} from {} to {}", field.key, n, clamped);
            }
            clamped
        }
        None => n,
    }
}

fn pick_option(field: &FieldDescriptor, choice: &str) -> Result<String, PlannerError> {
    field
        .options()
        .iter()
        .find(|o| **o == choice)
        .map(|o| o.to_string())
        .ok_or_else(|| invalid(field, format!("'{choice}' is not one of the options")))
}
