//! Colorful console output for routing sessions.
//!
//! Provides a `tracing` layer that formats the structured events of the
//! RouteForge crates, keyed by their `event` field.

use std::io::{self, Write};
use std::sync::OnceLock;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();

/// Filter used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER: &str = "routeforge=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. If another
/// global subscriber is already installed it is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(RouteConsoleLayer)
            .try_init();
    });
}

fn print_banner() {
    let title = format!("RouteForge v{}", env!("CARGO_PKG_VERSION"));
    let rule = "=".repeat(title.len() + 4);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = writeln!(stdout, "  {}", title.bright_white().bold());
    let _ = writeln!(stdout, "{}", rule.bright_cyan());
    let _ = stdout.flush();
}

/// A tracing layer that formats routing events with colors.
pub struct RouteConsoleLayer;

impl<S: Subscriber> Layer<S> for RouteConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("routeforge") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(*metadata.level(), &visitor);
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    plan: Option<String>,
    operation: Option<String>,
    visit: Option<String>,
    score: Option<String>,
    expected: Option<String>,
    actual: Option<String>,
    vehicles: Option<u64>,
    visits: Option<u64>,
    locations: Option<u64>,
    pairs: Option<u64>,
    written: Option<u64>,
    incremental: Option<bool>,
}

impl EventVisitor {
    fn set_text(&mut self, name: &str, value: String) {
        match name {
            "event" => self.event = Some(value),
            "plan" => self.plan = Some(value),
            "operation" => self.operation = Some(value),
            "visit" => self.visit = Some(value),
            "score" => self.score = Some(value),
            "expected" => self.expected = Some(value),
            "actual" => self.actual = Some(value),
            _ => {}
        }
    }
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        self.set_text(field.name(), s.trim_matches('"').to_string());
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.set_text(field.name(), value.to_string());
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "vehicles" => self.vehicles = Some(value),
            "visits" => self.visits = Some(value),
            "locations" => self.locations = Some(value),
            "pairs" => self.pairs = Some(value),
            "written" => self.written = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        if let Ok(value) = u64::try_from(value) {
            self.record_u64(field, value);
        }
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        if field.name() == "incremental" {
            self.incremental = Some(value);
        }
    }
}

fn format_event(level: Level, v: &EventVisitor) -> String {
    match v.event.as_deref().unwrap_or("") {
        "session_started" => format_session_started(level, v),
        "session_mutation" => format_mutation(v),
        "route_plan_created" => format_plan_created(level, v),
        "driving_time_matrix_built" => format_matrix_built(level, v),
        "score_corruption" | "arrival_time_corruption" => format_corruption(level, v),
        _ => String::new(),
    }
}

fn format_session_started(level: Level, v: &EventVisitor) -> String {
    let director = if v.incremental.unwrap_or(false) {
        "incremental"
    } else {
        "easy"
    };
    format!(
        "{} {} {} plan '{}' started: vehicles ({}), visits ({}), score director ({}), score ({})",
        timestamp().bright_black(),
        format_level(level),
        "[Session]".bright_cyan(),
        v.plan.as_deref().unwrap_or("?").white().bold(),
        format_count(v.vehicles),
        format_count(v.visits),
        director.bright_magenta(),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_mutation(v: &EventVisitor) -> String {
    format!(
        "    {} {:<8} | arrivals written {:>5} | {}",
        "->".bright_blue(),
        v.operation.as_deref().unwrap_or("?").white(),
        v.written.unwrap_or(0).to_formatted_string(&Locale::en),
        format_score(v.score.as_deref().unwrap_or("N/A"))
    )
}

fn format_plan_created(level: Level, v: &EventVisitor) -> String {
    format!(
        "{} {} {} plan '{}' created: vehicles ({}), visits ({}), locations ({})",
        timestamp().bright_black(),
        format_level(level),
        "[Plan]".bright_cyan(),
        v.plan.as_deref().unwrap_or("?").white().bold(),
        format_count(v.vehicles),
        format_count(v.visits),
        format_count(v.locations)
    )
}

fn format_matrix_built(level: Level, v: &EventVisitor) -> String {
    format!(
        "{} {} {} driving time matrix built: locations ({}), pairs ({})",
        timestamp().bright_black(),
        format_level(level),
        "[Matrix]".bright_cyan(),
        format_count(v.locations),
        format_count(v.pairs)
    )
}

fn format_corruption(level: Level, v: &EventVisitor) -> String {
    let subject = match &v.visit {
        Some(visit) => format!("arrival time of visit '{}'", visit),
        None => "score".to_string(),
    };
    format!(
        "{} {} {} {} corrupted after {}: expected ({}), actual ({})",
        timestamp().bright_black(),
        format_level(level),
        "[Session]".bright_cyan(),
        subject.bright_red().bold(),
        v.operation.as_deref().unwrap_or("?"),
        v.expected.as_deref().unwrap_or("N/A").bright_green(),
        v.actual.as_deref().unwrap_or("N/A").bright_red()
    )
}

fn format_level(level: Level) -> String {
    match level {
        Level::ERROR => "ERROR".bright_red().bold().to_string(),
        Level::WARN => " WARN".yellow().to_string(),
        Level::INFO => " INFO".bright_green().to_string(),
        Level::DEBUG => "DEBUG".bright_blue().to_string(),
        _ => "TRACE".bright_black().to_string(),
    }
}

fn format_count(count: Option<u64>) -> String {
    count
        .unwrap_or(0)
        .to_formatted_string(&Locale::en)
        .bright_yellow()
        .to_string()
}

fn timestamp() -> String {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| {
            let secs = d.as_secs() % 100000;
            let millis = d.subsec_millis();
            format!("{:5}.{:03}", secs, millis)
        })
        .unwrap_or_else(|_| "    0.000".to_string())
}

/// Colors a `"{hard}hard/{soft}soft"` score: red hard part when negative,
/// yellow soft part when negative.
fn format_score(score: &str) -> String {
    let Some((hard, soft)) = score
        .split_once('/')
        .filter(|(hard, _)| hard.ends_with("hard"))
    else {
        return score.white().to_string();
    };
    let hard_num: i64 = hard.trim_end_matches("hard").parse().unwrap_or(0);
    let soft_num: i64 = soft.trim_end_matches("soft").parse().unwrap_or(0);

    let hard_str = if hard_num < 0 {
        hard.bright_red().to_string()
    } else {
        hard.bright_green().to_string()
    };
    let soft_str = if soft_num < 0 {
        soft.yellow().to_string()
    } else {
        soft.white().to_string()
    };
    format!("{}/{}", hard_str, soft_str)
}
