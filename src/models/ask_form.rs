use crate::api::{ApiError, AskResponse, Source};

/// Everything the Ask view shows, as plain data.
///
/// The view keeps one of these in a signal and drives it through
/// `begin_submit` → `finish`, or resets it with `clear`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AskForm {
    /// Raw textarea contents
    pub input: String,
    pub submitting: bool,
    /// Empty while there is no error
    pub error: String,
    pub answer: String,
    /// Last full response, kept for rendering its sources
    pub response: Option<AskResponse>,
}

/// One rendered citation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLink {
    pub label: String,
    pub href: Option<String>,
}

impl From<&Source> for SourceLink {
    fn from(source: &Source) -> Self {
        let label = source
            .title
            .as_deref()
            .filter(|title| !title.is_empty())
            .or(source.url.as_deref())
            .unwrap_or_default()
            .to_string();
        Self {
            label,
            href: source.url.clone(),
        }
    }
}

impl AskForm {
    /// Whether the Ask button is enabled.
    pub fn can_submit(&self) -> bool {
        !self.submitting && !self.input.trim().is_empty()
    }

    /// Start a submission. Returns the trimmed question to send, or `None`
    /// (leaving the form untouched) when there is nothing to send.
    pub fn begin_submit(&mut self) -> Option<String> {
        if !self.can_submit() {
            return None;
        }
        let question = self.input.trim().to_string();
        self.submitting = true;
        self.error.clear();
        self.answer.clear();
        self.response = None;
        Some(question)
    }

    /// Record the outcome of the submission started by `begin_submit`.
    pub fn finish(&mut self, result: Result<AskResponse, ApiError>) {
        match result {
            Ok(response) => {
                self.answer = response.answer.clone().unwrap_or_default();
                self.response = Some(response);
            }
            Err(e) => {
                self.error = e.to_string();
            }
        }
        self.submitting = false;
    }

    /// Reset answer, error, response and input.
    pub fn clear(&mut self) {
        self.input.clear();
        self.error.clear();
        self.answer.clear();
        self.response = None;
    }

    pub fn error_line(&self) -> Option<String> {
        (!self.error.is_empty()).then(|| format!("Error: {}", self.error))
    }

    pub fn answer_text(&self) -> Option<&str> {
        (!self.answer.is_empty()).then_some(self.answer.as_str())
    }

    /// Citation links, empty when the response carried none.
    pub fn source_links(&self) -> Vec<SourceLink> {
        self.response
            .as_ref()
            .and_then(|r| r.sources.as_deref())
            .unwrap_or_default()
            .iter()
            .map(SourceLink::from)
            .collect()
    }

    pub const fn submit_label(&self) -> &'static str {
        if self.submitting {
            "Asking…"
        } else {
            "Ask"
        }
    }
}
