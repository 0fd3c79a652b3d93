//! Dialog state (the TEA Model)

use recform_core::{Record, RecordId};

use crate::config::Settings;
use crate::form::{default_schema, FieldSpec, FormState};

/// Whether the dialog edits an existing record or creates a new one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogMode {
    Create,
    Edit(RecordId),
}

impl DialogMode {
    pub fn from_id(id: Option<RecordId>) -> Self {
        match id {
            Some(id) => DialogMode::Edit(id),
            None => DialogMode::Create,
        }
    }

    pub fn record_id(&self) -> Option<&RecordId> {
        match self {
            DialogMode::Create => None,
            DialogMode::Edit(id) => Some(id),
        }
    }

    /// Verb used in the dialog title
    pub fn verb(&self) -> &'static str {
        match self {
            DialogMode::Create => "Create",
            DialogMode::Edit(_) => "Update",
        }
    }
}

/// Progress of the pre-population fetch (edit mode only)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Loading,
    Ready(Record),
    /// Terminal: the form stays hidden, only cancel/dismiss remain
    Error(String),
}

/// How the dialog handed control back to its caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CloseReason {
    /// The write succeeded
    Saved,
    /// The cancel button was used
    Cancelled,
    /// The dialog frame was dismissed (escape, backdrop click)
    Dismissed,
}

/// Complete state of one dialog instance
#[derive(Debug, Clone)]
pub struct DialogState {
    pub mode: DialogMode,

    /// `None` in create mode, where no fetch is needed
    pub fetch: Option<FetchState>,

    pub form: FormState,

    pub entity_label: String,

    pub revalidate_on_change: bool,

    fetch_requested: bool,
    populated: bool,
    closed: Option<CloseReason>,
}

impl DialogState {
    /// Dialog with the default schema and default settings
    pub fn new(id: Option<RecordId>) -> Self {
        Self::with_settings(id, default_schema(), &Settings::default())
    }

    pub fn with_settings(id: Option<RecordId>, schema: Vec<FieldSpec>, settings: &Settings) -> Self {
        let mode = DialogMode::from_id(id);
        let fetch = match mode {
            DialogMode::Create => None,
            DialogMode::Edit(_) => Some(FetchState::Loading),
        };

        Self {
            mode,
            fetch,
            form: FormState::new(schema),
            entity_label: settings.dialog.entity_label.clone(),
            revalidate_on_change: settings.dialog.revalidate_on_change,
            fetch_requested: false,
            populated: false,
            closed: None,
        }
    }

    pub fn title(&self) -> String {
        format!("{} {}", self.mode.verb(), self.entity_label)
    }

    /// Fetch gate: the form body may be shown
    pub fn is_form_visible(&self) -> bool {
        match &self.fetch {
            None => true,
            Some(FetchState::Ready(_)) => true,
            Some(FetchState::Loading) | Some(FetchState::Error(_)) => false,
        }
    }

    pub fn fetch_error(&self) -> Option<&str> {
        match &self.fetch {
            Some(FetchState::Error(message)) => Some(message),
            _ => None,
        }
    }

    /// A fetch or write is outstanding
    pub fn has_outstanding_request(&self) -> bool {
        let fetching = self.fetch_requested && matches!(self.fetch, Some(FetchState::Loading));
        fetching || self.form.submission.is_pending()
    }

    /// Record the fetch as issued. Returns the id to fetch the first time only.
    pub(crate) fn begin_fetch(&mut self) -> Option<RecordId> {
        if self.fetch_requested || !matches!(self.fetch, Some(FetchState::Loading)) {
            return None;
        }
        self.fetch_requested = true;
        self.mode.record_id().cloned()
    }

    /// Open the fetch gate and seed the form. Only the first record counts.
    pub(crate) fn apply_fetched(&mut self, record: Record) -> bool {
        if self.populated || !matches!(self.fetch, Some(FetchState::Loading)) {
            return false;
        }
        self.form.populate_from(&record);
        self.fetch = Some(FetchState::Ready(record));
        self.populated = true;
        true
    }

    pub(crate) fn fail_fetch(&mut self, message: String) -> bool {
        if !matches!(self.fetch, Some(FetchState::Loading)) {
            return false;
        }
        self.fetch = Some(FetchState::Error(message));
        true
    }

    pub fn is_closed(&self) -> bool {
        self.closed.is_some()
    }

    pub fn close_reason(&self) -> Option<CloseReason> {
        self.closed
    }

    /// Mark the dialog closed. Returns `false` if it already was.
    pub(crate) fn close(&mut self, reason: CloseReason) -> bool {
        if self.closed.is_some() {
            return false;
        }
        self.closed = Some(reason);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_mode_gate_is_open() {
        let state = DialogState::new(None);
        assert_eq!(state.mode, DialogMode::Create);
        assert!(state.fetch.is_none());
        assert!(state.is_form_visible());
        assert_eq!(state.title(), "Create Item");
    }

    #[test]
    fn test_edit_mode_starts_loading() {
        let state = DialogState::new(Some(RecordId::from("abc")));
        assert_eq!(state.fetch, Some(FetchState::Loading));
        assert!(!state.is_form_visible());
        assert_eq!(state.title(), "Update Item");
    }

    #[test]
    fn test_begin_fetch_only_once() {
        let mut state = DialogState::new(Some(RecordId::from("abc")));
        assert_eq!(state.begin_fetch(), Some(RecordId::from("abc")));
        assert!(state.has_outstanding_request());
        assert_eq!(state.begin_fetch(), None);
    }

    #[test]
    fn test_begin_fetch_in_create_mode() {
        let mut state = DialogState::new(None);
        assert_eq!(state.begin_fetch(), None);
        assert!(!state.has_outstanding_request());
    }

    #[test]
    fn test_apply_fetched_is_a_snapshot() {
        let mut state = DialogState::new(Some(RecordId::from("abc")));
        assert!(state.apply_fetched(Record::new("abc").with_field("name", "Widget")));
        assert!(!state.apply_fetched(Record::new("abc").with_field("name", "Changed")));
        assert_eq!(state.form.fields.get("name"), Some("Widget"));
    }

    #[test]
    fn test_fail_fetch_keeps_form_hidden() {
        let mut state = DialogState::new(Some(RecordId::from("abc")));
        assert!(state.fail_fetch("Record not found: abc".to_string()));
        assert!(!state.is_form_visible());
        assert_eq!(state.fetch_error(), Some("Record not found: abc"));
    }

    #[test]
    fn test_close_only_once() {
        let mut state = DialogState::new(None);
        assert!(state.close(CloseReason::Cancelled));
        assert!(!state.close(CloseReason::Saved));
        assert_eq!(state.close_reason(), Some(CloseReason::Cancelled));
    }

    #[test]
    fn test_custom_entity_label() {
        let mut settings = Settings::default();
        settings.dialog.entity_label = "Project".to_string();

        let state = DialogState::with_settings(None, default_schema(), &settings);

        assert_eq!(state.title(), "Create Project");
    }
}
