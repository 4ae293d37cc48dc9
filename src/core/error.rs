// Centralized error types for the gateway

use thiserror::Error;

/// Failures returned by every `Gateway` operation
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("User not found: {0}")]
    NotFound(String),

    #[error("Login already taken: {login}")]
    AlreadyExists { login: String },

    #[error("Unauthenticated user")]
    Unauthenticated,

    #[error("Invalid input: {0}")]
    InvalidInput(#[from] ValidationErrors),

    #[error("Failed to persist snapshot: {0}")]
    Snapshot(#[from] anyhow::Error),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound(_))
    }

    pub fn is_already_exists(&self) -> bool {
        matches!(self, GatewayError::AlreadyExists { .. })
    }

    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, GatewayError::Unauthenticated)
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Field-level rule violations on create and patch requests
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("name cannot be empty")]
    EmptyName,

    #[error("login cannot be empty")]
    EmptyLogin,
}

/// Every rule a request broke, in field order
#[derive(Error, Debug, Clone, Default, PartialEq, Eq)]
#[error("{}", join_messages(.0))]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    /// Record the failure of `check`, if any
    pub fn collect(&mut self, check: Result<(), ValidationError>) {
        if let Err(error) = check {
            self.push(error);
        }
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `Ok` when nothing was recorded
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

fn join_messages(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
