//! Form schema and form state
//!
//! A dialog's form is described by an ordered list of [`FieldSpec`]s. The
//! [`FormState`] holds the current values, the latest validation messages and
//! the submission lifecycle.

use recform_core::{FieldMap, Record};

use crate::validation;

/// Message shown when the name field is left blank
pub const NAME_REQUIRED_MESSAGE: &str = "Please enter a name";

/// A constraint checked at validation time
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRule {
    /// Value must be non-empty after trimming
    Required { message: String },
}

impl FieldRule {
    /// Returns the violation message, if `value` breaks this rule
    pub fn check(&self, value: &str) -> Option<&str> {
        match self {
            FieldRule::Required { message } if value.trim().is_empty() => Some(message),
            FieldRule::Required { .. } => None,
        }
    }
}

/// Declaration of one editable field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub label: String,
    pub placeholder: String,
    pub rules: Vec<FieldRule>,
}

impl FieldSpec {
    /// A plain text field labelled after its name
    pub fn text(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: capitalize(&name),
            placeholder: String::new(),
            name,
            rules: Vec::new(),
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn required(mut self, message: impl Into<String>) -> Self {
        self.rules.push(FieldRule::Required {
            message: message.into(),
        });
        self
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The baseline schema: a single required `name` field
pub fn default_schema() -> Vec<FieldSpec> {
    vec![FieldSpec::text("name")
        .placeholder("Name")
        .required(NAME_REQUIRED_MESSAGE)]
}

/// Lifecycle of the single write a dialog may have in flight
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    /// A create/update call is outstanding; submit is disabled
    Pending,
    /// The last write was rejected with this message
    Failed(String),
}

impl Submission {
    pub fn is_pending(&self) -> bool {
        matches!(self, Submission::Pending)
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            Submission::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Transient form state, owned by one dialog instance
#[derive(Debug, Clone)]
pub struct FormState {
    schema: Vec<FieldSpec>,

    /// Current input values, in declared field order
    pub fields: FieldMap,

    /// Validation messages from the latest validation pass; empty means valid
    pub field_errors: FieldMap,

    pub submission: Submission,

    /// Number of submit attempts that reached validation
    pub submit_attempts: u32,
}

impl FormState {
    /// Empty form for `schema`: every declared field starts as `""`
    pub fn new(schema: Vec<FieldSpec>) -> Self {
        let fields = schema.iter().map(|spec| (spec.name.as_str(), "")).collect();
        Self {
            schema,
            fields,
            field_errors: FieldMap::new(),
            submission: Submission::Idle,
            submit_attempts: 0,
        }
    }

    pub fn schema(&self) -> &[FieldSpec] {
        &self.schema
    }

    /// Seed declared fields from `record`; missing attributes become `""`
    pub fn populate_from(&mut self, record: &Record) {
        for spec in &self.schema {
            let value = record.attribute(&spec.name).unwrap_or_default();
            self.fields.set(spec.name.as_str(), value);
        }
    }

    /// Set a declared field. Returns `false` for unknown field names.
    pub fn set_field(&mut self, name: &str, value: impl Into<String>) -> bool {
        if !self.schema.iter().any(|spec| spec.name == name) {
            return false;
        }
        self.fields.set(name, value);
        true
    }

    /// Recompute `field_errors` from the current values. Returns `true` if valid.
    pub fn validate(&mut self) -> bool {
        self.field_errors = validation::validate(&self.schema, &self.fields);
        self.field_errors.is_empty()
    }

    /// Message for the alert banner (latest write failure only)
    pub fn alert(&self) -> Option<&str> {
        self.submission.failure_message()
    }

    pub fn can_submit(&self) -> bool {
        !self.submission.is_pending()
    }
}
