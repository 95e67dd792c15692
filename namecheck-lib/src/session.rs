//! Two-tab search session.
//!
//! The session owns one form per tab and tracks which tab is visible.
//! Switching away from a tab cancels its in-flight request, so a response
//! arriving later is dropped instead of landing in a hidden form.

use crate::client::LookupBackend;
use crate::error::NameCheckError;
use crate::form::{DomainForm, SearchForm, Ticket, UsernameForm};
use crate::types::{DomainResponse, Tab, UsernameResponse};
use tracing::debug;

/// Outcome of a backend call, tagged by form.
#[derive(Debug, Clone)]
pub enum Completion {
    Username(Result<UsernameResponse, NameCheckError>),
    Domain(Result<DomainResponse, NameCheckError>),
}

impl Completion {
    /// Error carried by this completion, if it failed.
    pub fn error(&self) -> Option<&NameCheckError> {
        match self {
            Completion::Username(Err(e)) | Completion::Domain(Err(e)) => Some(e),
            _ => None,
        }
    }
}

/// Perform the backend call a ticket stands for.
pub async fn run_lookup(backend: &dyn LookupBackend, ticket: &Ticket) -> Completion {
    debug!(tab = %ticket.tab, generation = ticket.generation, query = %ticket.query, "dispatching lookup");
    match ticket.tab {
        Tab::Username => Completion::Username(backend.check_username(&ticket.query).await),
        Tab::Domain => Completion::Domain(backend.check_domain(&ticket.query).await),
    }
}

/// Tab switcher plus the two forms.
#[derive(Debug, Clone)]
pub struct Session {
    active: Tab,
    username: UsernameForm,
    domain: DomainForm,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Tab::default())
    }
}

impl Session {
    /// Create a session showing `initial`.
    pub fn new(initial: Tab) -> Self {
        Self {
            active: initial,
            username: SearchForm::new(Tab::Username),
            domain: SearchForm::new(Tab::Domain),
        }
    }

    pub fn active_tab(&self) -> Tab {
        self.active
    }

    pub fn username_form(&self) -> &UsernameForm {
        &self.username
    }

    pub fn domain_form(&self) -> &DomainForm {
        &self.domain
    }

    /// Make `tab` the visible one. Returns `false` if it already was.
    pub fn switch_tab(&mut self, tab: Tab) -> bool {
        if tab == self.active {
            return false;
        }

        let cancelled = match self.active {
            Tab::Username => self.username.cancel_pending(),
            Tab::Domain => self.domain.cancel_pending(),
        };
        if cancelled {
            debug!(from = %self.active, to = %tab, "tab switch cancelled pending lookup");
        }

        self.active = tab;
        true
    }

    /// Input text of the active form.
    pub fn input(&self) -> &str {
        match self.active {
            Tab::Username => self.username.input(),
            Tab::Domain => self.domain.input(),
        }
    }

    /// Whether the active form has a request in flight.
    pub fn is_loading(&self) -> bool {
        match self.active {
            Tab::Username => self.username.is_loading(),
            Tab::Domain => self.domain.is_loading(),
        }
    }

    /// Error of the active form.
    pub fn error(&self) -> Option<&str> {
        match self.active {
            Tab::Username => self.username.error(),
            Tab::Domain => self.domain.error(),
        }
    }

    /// Replace the input of the active form.
    pub fn set_input<S: Into<String>>(&mut self, value: S) {
        match self.active {
            Tab::Username => self.username.set_input(value),
            Tab::Domain => self.domain.set_input(value),
        }
    }

    /// Clear the active form.
    pub fn clear(&mut self) {
        match self.active {
            Tab::Username => self.username.clear(),
            Tab::Domain => self.domain.clear(),
        }
    }

    /// Submit the active form. See [`SearchForm::submit`].
    pub fn submit(&mut self) -> Option<Ticket> {
        match self.active {
            Tab::Username => self.username.submit(),
            Tab::Domain => self.domain.submit(),
        }
    }

    /// Apply a completion. Returns whether visible state changed.
    pub fn complete(&mut self, ticket: &Ticket, completion: Completion) -> bool {
        if ticket.tab != self.active {
            debug!(tab = %ticket.tab, "dropping completion for inactive tab");
            return false;
        }

        match completion {
            Completion::Username(outcome) => self.username.complete(ticket, outcome),
            Completion::Domain(outcome) => self.domain.complete(ticket, outcome),
        }
    }

    /// Submit the active form and wait for the backend in place.
    ///
    /// Returns `None` when the input was too short to submit, otherwise
    /// whether the completion was applied.
    pub async fn search(&mut self, backend: &dyn LookupBackend) -> Option<bool> {
        let ticket = self.submit()?;
        let completion = run_lookup(backend, &ticket).await;
        Some(self.complete(&ticket, completion))
    }
}
