//! Colorful console output for assertion events.
//!
//! Provides a custom `tracing` layer that formats AssertForge events with
//! colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Assertion count summaries
//! - **WARN**: Illegal builder steps
//! - **DEBUG**: Failed assertions, early-exit signals and resolved expressions
//! - **TRACE**: Passed assertions and individual reductions

use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use assertforge_config::{AssertConfig, DEFAULT_FILTER};


static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();

/// Package version for the header line.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initializes console output with the default filter.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    init_with_filter(DEFAULT_FILTER);
}

/// Initializes console output with the filter from `config`.
pub fn init_with_config(config: &AssertConfig) {
    init_with_filter(&config.console.filter);
}

/// Initializes console output. `RUST_LOG` takes precedence over `filter`;
/// invalid directives in `filter` are skipped.
pub fn init_with_filter(filter: &str) {
    INIT.get_or_init(|| {
        EPOCH.get_or_init(Instant::now);
        print_header();

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(AssertConsoleLayer)
            .try_init();
    });
}

fn elapsed_secs() -> f64 {
    EPOCH.get().map_or(0.0, |epoch| epoch.elapsed().as_secs_f64())
}

fn print_header() {
    let header = format!("AssertForge v{VERSION}");
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", header.bright_cyan().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats assertion events with colors.
pub struct AssertConsoleLayer;

impl<S: Subscriber> Layer<S> for AssertConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from assertforge crates only
        if !metadata.target().starts_with("assertforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Debug, Default)]
struct EventVisitor {
    event: Option<String>,
    count: Option<u64>,
    tokens: Option<u64>,
    nodes: Option<u64>,
    operands: Option<u64>,
    position: Option<u64>,
    operator: Option<String>,
    step: Option<String>,
    state: Option<String>,
    constraint: Option<String>,
    message: Option<String>,
    signal: Option<String>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "operator" => self.operator = Some(value),
            "step" => self.step = Some(value),
            "state" => self.state = Some(value),
            "constraint" => self.constraint = Some(value),
            "message" => self.message = Some(value),
            "signal" => self.signal = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    // Display-formatted fields (`%value`) arrive here without quotes.
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "count" => self.count = Some(value),
            "tokens" => self.tokens = Some(value),
            "nodes" => self.nodes = Some(value),
            "operands" => self.operands = Some(value),
            "position" => self.position = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "assert_pass" => format_pass(v, level),
        "assert_fail" => format_fail(v),
        "assert_signal" => format_signal(v),
        "assert_count" => format_count(v),
        "illegal_step" => format_illegal_step(v),
        "resolve" => format_resolve(v),
        "reduce" => format_reduce(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs()).bright_black().to_string()
}

fn format_pass(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} assertion #{}",
        format_elapsed(),
        "✓".bright_green(),
        v.count.unwrap_or(0).to_string().bright_black()
    )
}

fn format_fail(v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} assertion #{} failed │ {}",
        format_elapsed(),
        "✗".bright_red().bold(),
        v.count.unwrap_or(0).to_string().bright_yellow(),
        v.constraint.as_deref().unwrap_or("?").white().bold()
    );
    if let Some(message) = &v.message {
        for line in message.replace("\\n", "\n").lines().filter(|l| !l.trim().is_empty()) {
            output.push('\n');
            output.push_str(&format!("          {}", line.red()));
        }
    }
    output
}

fn format_signal(v: &EventVisitor) -> String {
    let signal = v.signal.as_deref().unwrap_or("");
    let (icon, text) = match signal.split_once(':') {
        Some(("Test passed", _)) => ("■".bright_green().to_string(), signal.bright_green().to_string()),
        Some(("Test ignored", _)) => ("■".yellow().to_string(), signal.yellow().to_string()),
        Some(("Test inconclusive", _)) => ("■".bright_magenta().to_string(), signal.bright_magenta().to_string()),
        _ => ("■".bright_red().to_string(), signal.bright_red().to_string()),
    };
    format!("{} {} {}", format_elapsed(), icon, text)
}

fn format_count(v: &EventVisitor) -> String {
    let count = v.count.unwrap_or(0);
    let noun = if count == 1 { "assertion" } else { "assertions" };
    format!(
        "{} {} {} {}",
        format_elapsed(),
        "Σ".bright_cyan().bold(),
        count.to_string().bright_yellow(),
        noun
    )
}

fn format_illegal_step(v: &EventVisitor) -> String {
    format!(
        "{} {} `{}` is not allowed {} │ token {}",
        format_elapsed(),
        "⚠".yellow().bold(),
        v.step.as_deref().unwrap_or("?").bright_white(),
        v.state.as_deref().unwrap_or("here"),
        v.position.unwrap_or(0).to_string().bright_yellow()
    )
}

fn format_resolve(v: &EventVisitor) -> String {
    format!(
        "{} {} resolved │ {} tokens │ {} nodes",
        format_elapsed(),
        "▶".bright_blue(),
        v.tokens.unwrap_or(0).to_string().white(),
        v.nodes.unwrap_or(0).to_string().white()
    )
}

fn format_reduce(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    format!(
        "{} {} reduce {} │ {} operands",
        format_elapsed(),
        "·".bright_black(),
        v.operator.as_deref().unwrap_or("?").bright_black(),
        v.operands.unwrap_or(0).to_string().bright_black()
    )
}
