// ── Form-driven mutation flow ──
//
// Every create/edit screen follows one contract: a draft of loosely
// typed input fields is validated and coerced into a request body, and
// only a valid draft ever reaches the wire. Validation failures list
// every offending field at once so the user fixes them in one pass.

mod banner;
mod email_template;
mod product;

pub use banner::BannerDraft;
pub use email_template::EmailTemplateDraft;
pub use product::ProductDraft;

use scoopadmin_api::{MutationBody, ResourceKind};

use crate::dispatcher::Dispatcher;
use crate::error::CoreError;

// ── Validation errors ───────────────────────────────────────────────

/// One field-level problem found during draft validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All problems found in one validation pass. Never empty.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{}", self.summary())]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn contains(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn summary(&self) -> String {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        parts.join("; ")
    }
}

/// Collects field errors during a validation pass.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn require(&mut self, field: &'static str, value: &str) {
        if value.trim().is_empty() {
            self.push(field, "is required");
        }
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

// ── Form mode & submission ──────────────────────────────────────────

/// Whether the form creates a new record or edits an existing one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Outcome of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { id: String },
    Updated,
}

/// A validated draft ready for submission.
pub trait Draft {
    fn kind(&self) -> ResourceKind;

    /// Validate the draft and build the request body. Edit mode must
    /// carry the record id inside the body.
    fn build(&self, mode: &FormMode) -> Result<MutationBody, ValidationErrors>;
}

/// Validate and submit a draft. Invalid drafts never produce a request.
pub async fn submit<D: Draft>(
    dispatcher: &Dispatcher,
    draft: &D,
    mode: FormMode,
) -> Result<SubmitOutcome, CoreError> {
    let body = draft.build(&mode)?;
    match mode {
        FormMode::Create => {
            let id = dispatcher.create(draft.kind(), body).await?;
            Ok(SubmitOutcome::Created { id })
        }
        FormMode::Edit { .. } => {
            dispatcher.update(draft.kind(), body).await?;
            Ok(SubmitOutcome::Updated)
        }
    }
}

/// Push non-empty optional text onto a multipart field list.
pub(crate) fn push_opt(fields: &mut Vec<(String, String)>, key: &str, value: &str) {
    if !value.trim().is_empty() {
        fields.push((key.to_owned(), value.trim().to_owned()));
    }
}
