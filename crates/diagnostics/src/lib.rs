use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub fn new(start: usize, end: usize, line: usize, col: usize) -> Self {
        Self { start, end, line, col }
    }

    pub fn dummy() -> Self {
        Self { start: 0, end: 0, line: 0, col: 0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lex,
    Parse,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Lex => "lex",
            DiagnosticKind::Parse => "parse",
        }
    }
}

/// A front-end error with enough position information to point at the
/// offending source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub message: String,
    pub span: Span,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            notes: vec![],
        }
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

pub type DiagResult<T> = Result<T, Diagnostic>;

/// Renders a diagnostic against its source: a `kind error (line:col)` header,
/// the offending line, and a caret underline.
pub fn format_diagnostic(source: &str, d: &Diagnostic) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} error ({}:{}): {}",
        d.kind.label(),
        d.span.line,
        d.span.col,
        d.message
    );
    let line_idx = d.span.line.saturating_sub(1);
    if let Some(line_text) = source.lines().nth(line_idx) {
        let _ = writeln!(out, "{}", line_text);
        let col = d.span.col.max(1);
        let width = d.span.end.saturating_sub(d.span.start).max(1);
        let mut caret_line = " ".repeat(col - 1);
        caret_line.push('^');
        caret_line.push_str(&"~".repeat(width - 1));
        let _ = writeln!(out, "{}", caret_line);
    }
    for note in &d.notes {
        let _ = writeln!(out, "note: {}", note);
    }
    out
}
