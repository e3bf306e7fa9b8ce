// ABOUTME: Terminal reporting for CLI commands.
// ABOUTME: Progress and results rendered as text, bare results, or JSON lines.

use serde::Serialize;
use std::time::Instant;

/// How command results are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Progress lines, details, and a timed result line.
    Normal,
    /// Only the result line, for CI logs.
    Quiet,
    /// One JSON object per event.
    Json,
}

impl OutputMode {
    /// `--json` takes precedence over `--quiet`.
    pub fn from_flags(quiet: bool, json: bool) -> Self {
        match (quiet, json) {
            (_, true) => OutputMode::Json,
            (true, false) => OutputMode::Quiet,
            (false, false) => OutputMode::Normal,
        }
    }
}

pub struct Output {
    mode: OutputMode,
    started: Option<Instant>,
}

impl Output {
    pub fn new(mode: OutputMode) -> Self {
        Self {
            mode,
            started: None,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Start timing; the result line then carries the elapsed time.
    pub fn start_timer(&mut self) {
        self.started = Some(Instant::now());
    }

    fn elapsed(&self) -> Option<f64> {
        self.started.map(|t| t.elapsed().as_secs_f64())
    }

    pub fn progress(&self, message: &str) {
        if self.mode == OutputMode::Normal {
            println!("{message}");
        }
    }

    /// An aligned `label value` line.
    pub fn detail(&self, label: &str, value: &str) {
        if self.mode == OutputMode::Normal {
            println!("  {label:<14} {value}");
        }
    }

    pub fn warning(&self, message: &str) {
        match self.mode {
            OutputMode::Normal => eprintln!("Warning: {message}"),
            OutputMode::Quiet => {}
            OutputMode::Json => Stream::Stderr.emit(&Event::new("warning", message)),
        }
    }

    pub fn success(&self, message: &str) {
        self.report(message, None::<&()>);
    }

    /// The final result of a command. JSON events attach `data`.
    pub fn report<T: Serialize>(&self, message: &str, data: Option<&T>) {
        match (self.mode, self.elapsed()) {
            (OutputMode::Normal, Some(secs)) => println!("{message} ({secs:.1}s)"),
            (OutputMode::Normal, None) | (OutputMode::Quiet, _) => println!("{message}"),
            (OutputMode::Json, duration_secs) => {
                let event = Event {
                    duration_secs,
                    data: data.and_then(|d| serde_json::to_value(d).ok()),
                    ..Event::new("success", message)
                };
                Stream::Stdout.emit(&event);
            }
        }
    }

    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Normal | OutputMode::Quiet => eprintln!("Error: {message}"),
            OutputMode::Json => Stream::Stderr.emit(&Event {
                duration_secs: self.elapsed(),
                ..Event::new("error", message)
            }),
        }
    }
}

enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn emit(&self, event: &Event<'_>) {
        let Ok(line) = serde_json::to_string(event) else {
            return;
        };
        match self {
            Stream::Stdout => println!("{line}"),
            Stream::Stderr => eprintln!("{line}"),
        }
    }
}

#[derive(Serialize)]
struct Event<'a> {
    event: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_secs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<serde_json::Value>,
}

impl<'a> Event<'a> {
    fn new(event: &'a str, message: &'a str) -> Self {
        Self {
            event,
            message,
            duration_secs: None,
            data: None,
        }
    }
}
