use std::fmt::{self, Display};

pub use annotate_snippets::Renderer;
use annotate_snippets::{Level, Snippet};
pub use text_size::TextRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Warning,
    Error,
}

impl Severity {
    fn level(self) -> Level {
        match self {
            Severity::Warning => Level::Warning,
            Severity::Error => Level::Error,
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        })
    }
}

/// A problem found in the source text, anchored to a range.
///
/// Lexing and parsing never stop on a diagnostic; they are collected next
/// to the result and rendered by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    severity: Severity,
    message: String,
    range: TextRange,
    label: Option<String>,
}

impl Diagnostic {
    pub fn error(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Error, message: message.into(), range, label: None }
    }

    pub fn warning(message: impl Into<String>, range: TextRange) -> Self {
        Self { severity: Severity::Warning, message: message.into(), range, label: None }
    }

    /// Text shown under the highlighted range.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn render<'a>(
        &'a self,
        renderer: &'a Renderer,
        path: &'a str,
        text: &'a str,
    ) -> impl Display + 'a {
        let level = self.severity.level();

        let annotation = level.span(self.range.into());
        let annotation = match &self.label {
            Some(label) => annotation.label(label),
            None => annotation,
        };

        let message = level
            .title(&self.message)
            .snippet(Snippet::source(text).origin(path).annotation(annotation).fold(true));
        renderer.render(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(diagnostic: &Diagnostic, text: &str) -> String {
        diagnostic.render(&Renderer::plain(), "config.toml", text).to_string()
    }

    #[test]
    fn renders_error_with_label() {
        let text = "key = \"value\nnext = 1\n";
        let diagnostic =
            Diagnostic::error("unterminated string", TextRange::new(6.into(), 12.into()))
                .with_label("missing closing quote");

        let rendered = render(&diagnostic, text);
        assert!(rendered.contains("error: unterminated string"), "{rendered}");
        assert!(rendered.contains("config.toml"), "{rendered}");
        assert!(rendered.contains("missing closing quote"), "{rendered}");
    }

    #[test]
    fn renders_warning() {
        let diagnostic = Diagnostic::warning("leading zeros", TextRange::new(7.into(), 11.into()));
        assert_eq!(diagnostic.severity(), Severity::Warning);
        assert_eq!(diagnostic.label(), None);

        let rendered = render(&diagnostic, "port = 0080\n");
        assert!(rendered.contains("warning: leading zeros"), "{rendered}");
    }

    #[test]
    fn severity_orders_errors_last() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(Severity::Error.to_string(), "error");
    }
}
