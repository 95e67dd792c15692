//! Interactive two-tab session.
//!
//! One loop owns the [`Session`]. Lookups run on spawned tasks and report
//! back over a channel tagged with their ticket, so the prompt stays usable
//! while a request is in flight and late answers are dropped by the session.

use crate::{ui, Settings};
use console::{style, Term};
use namecheck_lib::{
    run_lookup, Completion, DebouncedReceiver, Debouncer, DomainView, LookupBackend, Session,
    Tab, Ticket, UsernameView,
};
use std::error::Error;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// A line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Switch(Tab),
    Clear,
    Help,
    /// 1-based suggestion index
    Copy(usize),
    /// Re-submit the current input
    Resubmit,
    Query(String),
    Unknown(String),
}

/// Parse one prompt line.
pub fn parse_command(line: &str) -> Command {
    let line = line.trim();

    let Some(rest) = line.strip_prefix(':') else {
        return if line.is_empty() {
            Command::Resubmit
        } else {
            Command::Query(line.to_string())
        };
    };

    let mut parts = rest.split_whitespace();
    match (parts.next().unwrap_or(""), parts.next()) {
        ("q" | "quit", None) => Command::Quit,
        ("u" | "username", None) => Command::Switch(Tab::Username),
        ("d" | "domain", None) => Command::Switch(Tab::Domain),
        ("clear", None) => Command::Clear,
        ("help" | "h", None) => Command::Help,
        ("copy", Some(n)) => match n.parse::<usize>() {
            Ok(index) if index > 0 => Command::Copy(index),
            _ => Command::Unknown(line.to_string()),
        },
        _ => Command::Unknown(line.to_string()),
    }
}

enum Flow {
    Continue,
    Quit,
}

type Done = (Ticket, Completion);

struct Repl {
    session: Session,
    backend: Arc<dyn LookupBackend>,
    done_tx: mpsc::UnboundedSender<Done>,
    debouncer: Option<Debouncer<(Tab, String)>>,
    pretty: bool,
    term: Term,
}

impl Repl {
    fn show_prompt(&self) {
        let _ = self.term.write_str(&ui::prompt(self.session.active_tab()));
    }

    fn handle_line(&mut self, line: &str) -> Flow {
        match parse_command(line) {
            Command::Quit => return Flow::Quit,
            Command::Switch(tab) => {
                if self.session.switch_tab(tab) {
                    ui::print_tab_header(tab);
                    self.render_active();
                }
            }
            Command::Clear => {
                self.session.clear();
                println!("  {}", style("Cleared.").dim());
            }
            Command::Help => ui::print_interactive_help(),
            Command::Copy(index) => self.copy_suggestion(index),
            Command::Resubmit => self.submit(),
            Command::Query(text) => {
                self.session.set_input(text.as_str());
                match &self.debouncer {
                    Some(debouncer) => {
                        debouncer.push((self.session.active_tab(), text));
                    }
                    None => self.submit(),
                }
            }
            Command::Unknown(raw) => {
                println!(
                    "  {} {} (type :help)",
                    style("Unknown command:").yellow(),
                    raw
                );
            }
        }
        Flow::Continue
    }

    /// A debounced value settled. Searches only if it still is what the
    /// visible form holds.
    fn handle_settled(&mut self, tab: Tab, text: String) {
        if tab != self.session.active_tab() || self.session.input() != text {
            debug!(%tab, "settled input no longer current, skipping");
            return;
        }
        self.submit();
    }

    fn submit(&mut self) {
        let Some(ticket) = self.session.submit() else {
            // Too short: the form was reset, nothing to send
            return;
        };

        println!(
            "  {}",
            style(ui::busy_message(ticket.tab, &ticket.query)).dim()
        );

        let backend = Arc::clone(&self.backend);
        let tx = self.done_tx.clone();
        tokio::spawn(async move {
            let completion = run_lookup(backend.as_ref(), &ticket).await;
            let _ = tx.send((ticket, completion));
        });
    }

    fn handle_done(&mut self, ticket: Ticket, completion: Completion) -> bool {
        let applied = self.session.complete(&ticket, completion);
        if applied {
            self.render_active();
        }
        applied
    }

    fn render_active(&self) {
        if let Some(error) = self.session.error() {
            ui::print_error(error);
            return;
        }

        let lines = match self.session.active_tab() {
            Tab::Username => self
                .session
                .username_form()
                .result()
                .map(|r| ui::username_lines(&UsernameView::from(r), self.pretty)),
            Tab::Domain => self
                .session
                .domain_form()
                .result()
                .map(|r| ui::domain_lines(&DomainView::from(r), self.pretty)),
        };

        if let Some(lines) = lines {
            println!();
            ui::print_lines(&lines);
            println!();
        }
    }

    fn copy_suggestion(&self, index: usize) {
        let chip = match self.session.active_tab() {
            Tab::Username => self
                .session
                .username_form()
                .result()
                .map(UsernameView::from)
                .and_then(|view| view.suggestions.into_iter().nth(index - 1)),
            Tab::Domain => None,
        };

        let Some(chip) = chip else {
            println!("  {}", style(format!("No suggestion #{}", index)).yellow());
            return;
        };

        match ui::copy_to_clipboard(chip.copy_text()) {
            Ok(()) => println!("  Copied {}", style(chip.caption()).cyan()),
            Err(e) => {
                warn!(error = %e, "clipboard copy failed");
                println!("  {} {}", style("Could not copy:").yellow(), chip.copy_text());
            }
        }
    }
}

/// Wait for the next settled auto-search value; never resolves when
/// auto-search is off.
async fn next_settled(
    settled: &mut Option<DebouncedReceiver<(Tab, String)>>,
) -> Option<(Tab, String)> {
    match settled {
        Some(rx) => rx.settled().await,
        None => std::future::pending().await,
    }
}

/// Run the session until `:quit` or end of input.
pub async fn run(
    backend: Arc<dyn LookupBackend>,
    initial: Tab,
    settings: &Settings,
) -> Result<(), Box<dyn Error>> {
    let (done_tx, mut done_rx) = mpsc::unbounded_channel::<Done>();

    let (debouncer, mut settled) = if settings.client.auto_search {
        let (debouncer, settled) = Debouncer::new(settings.client.debounce);
        info!(quiet_ms = settings.client.debounce.as_millis() as u64, "auto-search enabled");
        (Some(debouncer), Some(settled))
    } else {
        (None, None)
    };

    let mut repl = Repl {
        session: Session::new(initial),
        backend,
        done_tx,
        debouncer,
        pretty: settings.pretty,
        term: Term::stdout(),
    };

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    ui::print_tab_header(initial);
    println!("  {}", style("Type :help for commands").dim());
    repl.show_prompt();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if let Flow::Quit = repl.handle_line(&line) {
                            return Ok(());
                        }
                    }
                    None => break,
                }
                repl.show_prompt();
            }
            Some((ticket, completion)) = done_rx.recv() => {
                if repl.handle_done(ticket, completion) {
                    repl.show_prompt();
                }
            }
            Some((tab, text)) = next_settled(&mut settled) => {
                repl.handle_settled(tab, text);
            }
        }
    }

    // End of input: flush pending auto-search input, then wait for the
    // visible form's request so piped sessions print their last result.
    repl.debouncer = None;
    if let Some(rx) = settled.as_mut() {
        while let Some((tab, text)) = rx.settled().await {
            repl.handle_settled(tab, text);
        }
    }

    while repl.session.is_loading() {
        match done_rx.recv().await {
            Some((ticket, completion)) => {
                repl.handle_done(ticket, completion);
            }
            None => break,
        }
    }

    Ok(())
}
