//! Render model
//!
//! What a UI layer should draw for the current [`DialogState`]. Kept free of
//! any toolkit so the headless driver and tests can inspect it directly.

use serde::Serialize;

use crate::state::DialogState;

/// Label of the submit button when idle
pub const SUBMIT_LABEL: &str = "Save";

/// Label of the submit button while a write is pending
pub const BUSY_LABEL: &str = "...";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DialogView {
    pub title: String,
    pub body: DialogBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DialogBody {
    /// Waiting for the record; nothing is drawn
    Hidden,
    /// The record could not be loaded
    FetchError { message: String },
    Form(FormView),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormView {
    /// Banner above the form with the latest submission error
    pub alert: Option<String>,
    pub fields: Vec<FieldView>,
    pub cancel_enabled: bool,
    pub submit: SubmitButton,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldView {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub value: String,
    /// Inline message shown beneath the input
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitButton {
    pub label: String,
    pub enabled: bool,
}

impl DialogView {
    /// Build the view, or `None` once the dialog has closed
    pub fn from_state(state: &DialogState) -> Option<Self> {
        if state.is_closed() {
            return None;
        }

        let body = if let Some(message) = state.fetch_error() {
            DialogBody::FetchError {
                message: message.to_string(),
            }
        } else if !state.is_form_visible() {
            DialogBody::Hidden
        } else {
            DialogBody::Form(FormView::from_state(state))
        };

        Some(Self {
            title: state.title(),
            body,
        })
    }

    pub fn form(&self) -> Option<&FormView> {
        match &self.body {
            DialogBody::Form(form) => Some(form),
            _ => None,
        }
    }
}

impl FormView {
    fn from_state(state: &DialogState) -> Self {
        let form = &state.form;
        let fields = form
            .schema()
            .iter()
            .map(|spec| FieldView {
                name: spec.name.clone(),
                label: spec.label.clone(),
                placeholder: spec.placeholder.clone(),
                value: form.fields.get(&spec.name).unwrap_or_default().to_string(),
                error: form.field_errors.get(&spec.name).map(str::to_string),
            })
            .collect();

        let pending = form.submission.is_pending();
        Self {
            alert: form.alert().map(str::to_string),
            fields,
            cancel_enabled: !pending,
            submit: SubmitButton {
                label: if pending { BUSY_LABEL } else { SUBMIT_LABEL }.to_string(),
                enabled: !pending,
            },
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldView> {
        self.fields.iter().find(|f| f.name == name)
    }
}
