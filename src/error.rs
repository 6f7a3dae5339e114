use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("API Error: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("JSON Error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Input Error: {0}")]
    InputError(#[from] dialoguer::Error),

    #[error("{0} not found. Please set it in your .env file or environment.")]
    MissingCredential(&'static str),

    #[error("Generation Failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid value for '{field}': {reason}")]
    InvalidField { field: String, reason: String },

    #[error("No plan has been generated yet")]
    NoPlan,
}
