use std::fmt;

/// Where a [`Line`] came from, and therefore where it goes.
///
/// - `Auxiliary`: a diagnostic produced by `mux` itself about a command
///   (spawn failure, read failure, abnormal exit). Routed to stderr.
/// - `Stdout` / `Stderr`: output of the child on the matching stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Auxiliary,
    Stdout,
    Stderr,
}

impl LineKind {
    /// Divider written between the name prefix and the line text.
    pub fn divider(self) -> &'static str {
        match self {
            LineKind::Auxiliary => "! ",
            LineKind::Stdout | LineKind::Stderr => "| ",
        }
    }

    /// True if lines of this kind belong on the parent's stderr.
    pub fn is_error_stream(self) -> bool {
        !matches!(self, LineKind::Stdout)
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LineKind::Auxiliary => "aux",
            LineKind::Stdout => "stdout",
            LineKind::Stderr => "stderr",
        };
        f.write_str(s)
    }
}

/// A fully formatted line, ready to be written verbatim by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    pub kind: LineKind,
    pub text: String,
}

impl Line {
    pub fn new(kind: LineKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}
