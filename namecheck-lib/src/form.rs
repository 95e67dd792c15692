//! Per-form search state.
//!
//! A `SearchForm` owns the input text, the in-flight flag, the last error and
//! the last result of one lookup form. Every dispatched request is identified
//! by a [`Ticket`]; only the completion carrying the latest ticket may touch
//! the visible state, so late responses for superseded or cancelled requests
//! are dropped.

use crate::error::NameCheckError;
use crate::types::{DomainResponse, Tab, UsernameResponse};
use crate::utils::submittable_query;
use tracing::{debug, trace};

/// Identity of a dispatched request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket {
    /// Form the request belongs to
    pub tab: Tab,
    /// Generation of the form at dispatch time
    pub generation: u64,
    /// Trimmed query that was sent
    pub query: String,
}

/// Observable phase of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Success,
    Failure,
}

/// State of one lookup form.
#[derive(Debug, Clone)]
pub struct SearchForm<R> {
    tab: Tab,
    input: String,
    loading: bool,
    error: Option<String>,
    result: Option<R>,
    generation: u64,
    pending: Option<u64>,
}

/// Username form.
pub type UsernameForm = SearchForm<UsernameResponse>;

/// Domain form.
pub type DomainForm = SearchForm<DomainResponse>;

impl<R> SearchForm<R> {
    /// Create an empty form for a tab.
    pub fn new(tab: Tab) -> Self {
        Self {
            tab,
            input: String::new(),
            loading: false,
            error: None,
            result: None,
            generation: 0,
            pending: None,
        }
    }

    pub fn tab(&self) -> Tab {
        self.tab
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn result(&self) -> Option<&R> {
        self.result.as_ref()
    }

    /// Number of requests dispatched so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether the submit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.input.trim().is_empty()
    }

    pub fn phase(&self) -> FormPhase {
        if self.loading {
            FormPhase::Submitting
        } else if self.error.is_some() {
            FormPhase::Failure
        } else if self.result.is_some() {
            FormPhase::Success
        } else {
            FormPhase::Idle
        }
    }

    /// Replace the input text. Result and error stay visible until the
    /// next submission.
    pub fn set_input<S: Into<String>>(&mut self, value: S) {
        self.input = value.into();
    }

    /// Reset input, result and error. A pending request is cancelled so
    /// it cannot repopulate the cleared form.
    pub fn clear(&mut self) {
        self.input.clear();
        self.result = None;
        self.error = None;
        self.cancel_pending();
    }

    /// Start a submission of the current input.
    ///
    /// Returns `None` without touching the network when the trimmed input is
    /// shorter than the tab minimum; result and error are cleared in that
    /// case. Otherwise the form enters the submitting phase and the returned
    /// ticket supersedes any request still in flight.
    pub fn submit(&mut self) -> Option<Ticket> {
        let Some(query) = submittable_query(self.tab, &self.input) else {
            debug!(tab = %self.tab, "input below minimum length, not submitting");
            self.result = None;
            self.error = None;
            self.cancel_pending();
            return None;
        };

        self.generation += 1;
        self.pending = Some(self.generation);
        self.loading = true;
        self.error = None;

        Some(Ticket {
            tab: self.tab,
            generation: self.generation,
            query,
        })
    }

    /// Apply the outcome of a request.
    ///
    /// Returns `false` and leaves the form untouched when the ticket is not
    /// the one currently pending.
    pub fn complete(&mut self, ticket: &Ticket, outcome: Result<R, NameCheckError>) -> bool {
        if ticket.tab != self.tab || self.pending != Some(ticket.generation) {
            trace!(
                tab = %ticket.tab,
                generation = ticket.generation,
                current = self.generation,
                "dropping stale completion"
            );
            return false;
        }

        self.pending = None;
        self.loading = false;

        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.error = None;
            }
            Err(err) => {
                self.error = Some(if err.is_blank() {
                    fallback_error(self.tab).to_string()
                } else {
                    err.to_string()
                });
                self.result = None;
            }
        }

        true
    }

    /// Forget the pending request, if any. Returns whether one was pending.
    pub fn cancel_pending(&mut self) -> bool {
        self.loading = false;
        self.pending.take().is_some()
    }
}

/// Message shown when a failure carries no text of its own.
pub fn fallback_error(tab: Tab) -> &'static str {
    match tab {
        Tab::Username => "Failed to check username availability",
        Tab::Domain => "Failed to check domain availability",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PlatformStatus;

    fn taken_response(username: &str) -> UsernameResponse {
        UsernameResponse {
            username: username.to_string(),
            all_available: false,
            results: vec![PlatformStatus {
                platform: "github".to_string(),
                available: false,
                url: format!("https://github.com/{}", username),
                error: None,
            }],
            suggestions: vec![format!("{}_", username)],
        }
    }

    #[test]
    fn test_short_username_does_not_submit() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("a");
        assert!(form.submit().is_none());
        assert!(!form.is_loading());
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.generation(), 0);
    }

    #[test]
    fn test_short_input_clears_previous_state() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("testuser123");
        let ticket = form.submit().unwrap();
        assert!(form.complete(&ticket, Ok(taken_response("testuser123"))));
        assert!(form.result().is_some());

        form.set_input("a");
        assert!(form.submit().is_none());
        assert!(form.result().is_none());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_short_domain_does_not_submit() {
        let mut form = DomainForm::new(Tab::Domain);
        form.set_input("ex");
        assert!(form.submit().is_none());
        form.set_input("exa");
        assert!(form.submit().is_some());
    }

    #[test]
    fn test_submit_trims_and_sets_loading() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("  testuser123 ");
        let ticket = form.submit().unwrap();
        assert_eq!(ticket.query, "testuser123");
        assert_eq!(ticket.tab, Tab::Username);
        assert_eq!(ticket.generation, 1);
        assert_eq!(form.phase(), FormPhase::Submitting);
    }

    #[test]
    fn test_failure_sets_error_and_clears_result() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("testuser123");
        let first = form.submit().unwrap();
        form.complete(&first, Ok(taken_response("testuser123")));

        let second = form.submit().unwrap();
        assert!(form.error().is_none());
        assert!(form.complete(&second, Err(NameCheckError::http_status(500, "/check"))));
        assert_eq!(form.error(), Some("HTTP error! status: 500"));
        assert!(form.result().is_none());
        assert_eq!(form.phase(), FormPhase::Failure);
    }

    #[test]
    fn test_empty_error_message_uses_fallback() {
        let mut form = DomainForm::new(Tab::Domain);
        form.set_input("example.com");
        let ticket = form.submit().unwrap();
        form.complete(&ticket, Err(NameCheckError::network("")));
        assert_eq!(form.error(), Some("Failed to check domain availability"));
        assert!(form.result().is_none());
    }

    #[test]
    fn test_resubmit_replaces_result() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("testuser123");
        let first = form.submit().unwrap();
        form.complete(&first, Ok(taken_response("testuser123")));

        let second = form.submit().unwrap();
        assert_eq!(second.query, first.query);
        let mut replacement = taken_response("testuser123");
        replacement.suggestions.clear();
        form.complete(&second, Ok(replacement.clone()));
        assert_eq!(form.result(), Some(&replacement));
    }

    #[test]
    fn test_superseded_ticket_is_dropped() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("first");
        let older = form.submit().unwrap();
        form.set_input("second");
        let newer = form.submit().unwrap();

        assert!(form.complete(&newer, Ok(taken_response("second"))));
        assert!(!form.complete(&older, Ok(taken_response("first"))));
        assert_eq!(form.result().unwrap().username, "second");
    }

    #[test]
    fn test_clear_resets_and_cancels() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("testuser123");
        let ticket = form.submit().unwrap();
        form.clear();

        assert_eq!(form.input(), "");
        assert!(!form.is_loading());
        assert!(!form.complete(&ticket, Ok(taken_response("testuser123"))));
        assert!(form.result().is_none());
        assert!(form.error().is_none());
    }

    #[test]
    fn test_ticket_for_other_tab_is_rejected() {
        let mut form = UsernameForm::new(Tab::Username);
        form.set_input("testuser123");
        let mut ticket = form.submit().unwrap();
        ticket.tab = Tab::Domain;
        assert!(!form.complete(&ticket, Ok(taken_response("testuser123"))));
        assert!(form.is_loading());
    }

    #[test]
    fn test_can_submit_requires_non_blank_input() {
        let mut form = UsernameForm::new(Tab::Username);
        assert!(!form.can_submit());
        form.set_input("   ");
        assert!(!form.can_submit());
        form.set_input("a");
        assert!(form.can_submit());
    }
}
