//! Terminal rendering for the namecheck CLI.
//!
//! Result panels, the tab header of the interactive session, the spinner shown
//! while a lookup is in flight, and the OSC 52 clipboard sequence used by
//! `:copy`. Uses only the `console` crate for styling.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use console::{pad_str, style, Alignment, Style, Term};
use namecheck_lib::{
    DomainView, PlatformCard, Tab, Tone, UsernameView, DOMAIN_AVAILABLE_HINT,
    DOMAIN_AVAILABLE_MESSAGE,
};
use std::io;
use std::time::{Duration, Instant};
use tokio::sync::oneshot;

// ── Spinner ──────────────────────────────────────────────────────────────────

const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const SPINNER_TICK: Duration = Duration::from_millis(80);

/// Busy indicator for one lookup, drawn on stderr so stdout stays clean.
///
/// The line names the tab the lookup belongs to and how long it has been
/// waiting on the backend.
pub struct Spinner {
    stop_tx: oneshot::Sender<()>,
    handle: tokio::task::JoinHandle<()>,
}

impl Spinner {
    pub fn start(tab: Tab, query: &str) -> Self {
        let caption = busy_message(tab, query);
        let (stop_tx, mut stop_rx) = oneshot::channel();

        let handle = tokio::spawn(async move {
            let term = Term::stderr();
            let started = Instant::now();
            let mut ticks = tokio::time::interval(SPINNER_TICK);

            for frame in SPINNER_FRAMES.iter().cycle() {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticks.tick() => {
                        let _ = term.clear_line();
                        let _ = term.write_str(&spinner_line(tab, &caption, frame, started.elapsed()));
                    }
                }
            }
            let _ = term.clear_line();
        });

        Self { stop_tx, handle }
    }

    /// Stop the spinner and clear its line.
    pub async fn stop(self) {
        let _ = self.stop_tx.send(());
        let _ = self.handle.await;
    }
}

fn spinner_line(tab: Tab, caption: &str, frame: &str, elapsed: Duration) -> String {
    format!(
        "{} {} {} {}",
        style(frame).cyan(),
        style(format!("[{}]", tab_caption(tab))).bold(),
        caption,
        style(format!("{:.1}s", elapsed.as_secs_f32())).dim()
    )
}

/// Spinner caption for a lookup.
pub fn busy_message(tab: Tab, query: &str) -> String {
    match tab {
        Tab::Username => format!("Checking @{}...", query),
        Tab::Domain => format!("Looking up {}...", query),
    }
}

// ── Tabs ─────────────────────────────────────────────────────────────────────

fn tab_caption(tab: Tab) -> &'static str {
    match tab {
        Tab::Username => "@ Username",
        Tab::Domain => "🌐 Domain",
    }
}

/// Tab strip with the active tab highlighted.
pub fn tab_header(active: Tab) -> String {
    [Tab::Username, Tab::Domain]
        .into_iter()
        .map(|tab| {
            if tab == active {
                style(format!("[ {} ]", tab_caption(tab))).cyan().bold().to_string()
            } else {
                style(format!("  {}  ", tab_caption(tab))).dim().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Input prompt of the active form.
pub fn prompt(active: Tab) -> String {
    match active {
        Tab::Username => format!("{} ", style("username>").cyan()),
        Tab::Domain => format!("{} ", style("domain>").cyan()),
    }
}

/// Print the tab strip followed by a blank line.
pub fn print_tab_header(active: Tab) {
    println!();
    println!("  {}", tab_header(active));
    println!();
}

// ── Username results ─────────────────────────────────────────────────────────

fn tone_style(tone: Tone) -> Style {
    match tone {
        Tone::Success => Style::new().green().bold(),
        Tone::Warning => Style::new().yellow().bold(),
        Tone::Unavailable => Style::new().red().bold(),
        Tone::Neutral => Style::new().dim(),
    }
}

fn card_line(card: &PlatformCard, pretty: bool) -> String {
    let detail = match (&card.link, &card.error) {
        (Some(link), _) => link.clone(),
        (None, Some(error)) => error.clone(),
        (None, None) => String::new(),
    };

    if pretty {
        format!(
            "    {} {}  {}  {}",
            card.icon,
            style(pad_str(&card.platform, 12, Alignment::Left, Some(".."))).white(),
            tone_style(card.status.tone()).apply_to(pad_str(
                card.status.label(),
                9,
                Alignment::Left,
                None
            )),
            style(detail).dim(),
        )
    } else if detail.is_empty() {
        format!("{}: {}", card.platform, card.status.label())
    } else {
        format!("{}: {} ({})", card.platform, card.status.label(), detail)
    }
}

/// Lines of a username result panel.
pub fn username_lines(view: &UsernameView, pretty: bool) -> Vec<String> {
    let mut lines = Vec::new();

    if pretty {
        lines.push(format!(
            "  {}  {}",
            style(view.title()).bold(),
            tone_style(view.tone()).apply_to(view.summary_label()),
        ));
        lines.push(format!(
            "  {} {}",
            style("── Platforms ").bold(),
            style("─".repeat(40)).dim()
        ));
    } else {
        lines.push(format!("{}: {}", view.title(), view.summary_label()));
    }

    lines.extend(view.cards.iter().map(|card| card_line(card, pretty)));

    if !view.suggestions.is_empty() {
        let chips = view
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, chip)| format!("[{}] {}", i + 1, chip.caption()))
            .collect::<Vec<_>>()
            .join("  ");

        if pretty {
            lines.push(String::new());
            lines.push(format!(
                "  {} {}",
                style("── Suggested alternatives ").bold(),
                style("─".repeat(27)).dim()
            ));
            lines.push(format!("    {}", style(chips).cyan()));
        } else {
            lines.push(format!("Suggestions: {}", chips));
        }
    }

    lines
}

// ── Domain results ───────────────────────────────────────────────────────────

fn detail_line(label: &str, value: &str) -> String {
    format!(
        "    {}  {}",
        style(pad_str(label, 13, Alignment::Left, None)).dim(),
        value
    )
}

/// Lines of a domain result panel.
pub fn domain_lines(view: &DomainView, pretty: bool) -> Vec<String> {
    let badge_style = match view {
        DomainView::Error { .. } => Style::new().red().bold(),
        DomainView::Registered(_) => Style::new().yellow().bold(),
        DomainView::Available { .. } => Style::new().green().bold(),
    };

    let mut lines = vec![if pretty {
        format!(
            "  {} {}  {}",
            view.icon(),
            style(view.domain_name()).bold(),
            badge_style.apply_to(view.badge())
        )
    } else {
        format!("{}: {}", view.domain_name(), view.badge())
    }];

    match view {
        DomainView::Error { message, .. } => {
            lines.push(if pretty {
                format!("    {}", style(message).red())
            } else {
                message.clone()
            });
        }
        DomainView::Available { .. } => {
            if pretty {
                lines.push(format!("    {}", DOMAIN_AVAILABLE_MESSAGE));
                lines.push(format!("    {}", style(DOMAIN_AVAILABLE_HINT).dim()));
            } else {
                lines.push(DOMAIN_AVAILABLE_MESSAGE.to_string());
                lines.push(DOMAIN_AVAILABLE_HINT.to_string());
            }
        }
        DomainView::Registered(details) => {
            let rows = [
                ("Registrar", details.registrar.as_str()),
                ("Created", details.created.as_str()),
                ("Expires", details.expires.as_str()),
                ("Name servers", details.name_server_summary.as_str()),
            ];
            for (label, value) in rows {
                lines.push(if pretty {
                    detail_line(label, value)
                } else {
                    format!("{}: {}", label, value)
                });
            }
            if !details.name_servers.is_empty() {
                let chips = details.name_servers.join("  ");
                lines.push(if pretty {
                    format!("      {}", style(chips).cyan())
                } else {
                    format!("  {}", chips)
                });
            }
        }
    }

    lines
}

/// Print a panel line by line.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        println!("{}", line);
    }
}

/// Print a form-level error (failed request).
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Print the platforms the backend probes.
pub fn print_platforms(platforms: &[String], pretty: bool) {
    if !pretty {
        for platform in platforms {
            println!("{}", platform);
        }
        return;
    }

    println!();
    println!(
        "{}",
        style(format!("Platforms checked ({}):", platforms.len()))
            .yellow()
            .bold()
    );
    for platform in platforms {
        println!(
            "  {} {}",
            namecheck_lib::platform_icon(platform),
            style(platform).green()
        );
    }
    println!();
}

/// Print the command reference of the interactive session.
pub fn print_interactive_help() {
    let cmd = Style::new().green().bold();
    println!("  Type a name and press Enter to check it.");
    println!("  {}  switch to username lookups", cmd.apply_to(":u, :username"));
    println!("  {}    switch to domain lookups", cmd.apply_to(":d, :domain  "));
    println!("  {}          clear the current form", cmd.apply_to(":clear"));
    println!("  {}         copy suggestion N to the clipboard", cmd.apply_to(":copy N"));
    println!("  {}           show this help", cmd.apply_to(":help"));
    println!("  {}        leave", cmd.apply_to(":q, :quit"));
}

// ── Clipboard ────────────────────────────────────────────────────────────────

/// OSC 52 escape sequence asking the terminal to place `text` on the
/// system clipboard.
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Copy text to the clipboard through the terminal.
pub fn copy_to_clipboard(text: &str) -> io::Result<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "stdout is not a terminal",
        ));
    }
    term.write_str(&osc52_sequence(text))?;
    term.flush()
}

// ── Tests ────────────────────────────────────────────────────────────────────
