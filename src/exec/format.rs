// src/exec/format.rs

//! Turning raw output records into prefixed [`Line`]s.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::{CommandSpec, DisplayConfig};
use crate::types::{Line, LineKind};

/// CSI colour / style sequences, e.g. `ESC[31m` or `ESC[1;4m`.
static ESCAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\x1b\[[0-9;]*m").expect("escape regex is valid"));

/// Remove ANSI colour / style sequences from `text`.
pub fn strip_ansi(text: &str) -> Cow<'_, str> {
    ESCAPE.replace_all(text, "")
}

/// Per-command formatter. The prefix is computed once and reused for every
/// line of the command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormatter {
    prefix: String,
}

impl LineFormatter {
    pub fn new(name: Option<&str>, display: &DisplayConfig) -> Self {
        let prefix = match name {
            _ if !display.names => String::new(),
            // Same width as a named prefix so columns line up.
            None => " ".repeat(display.width + 1),
            Some(name) => format!("{name:<width$} ", width = display.width),
        };
        Self { prefix }
    }

    pub fn for_command(spec: &CommandSpec) -> Self {
        Self::new(spec.name.as_deref(), &spec.display)
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Format one output record. `record` keeps its trailing newline, if any.
    pub fn format(&self, kind: LineKind, record: &str) -> Line {
        let record = strip_ansi(record);
        let mut text = String::with_capacity(self.prefix.len() + 2 + record.len());
        text.push_str(&self.prefix);
        text.push_str(kind.divider());
        text.push_str(&record);
        Line::new(kind, text)
    }

    /// Format a diagnostic about the command. Always newline-terminated.
    pub fn auxiliary(&self, message: &str) -> Line {
        let mut line = self.format(LineKind::Auxiliary, message);
        if !line.text.ends_with('\n') {
            line.text.push('\n');
        }
        line
    }
}
