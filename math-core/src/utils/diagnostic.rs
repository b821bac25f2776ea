use std::io;
use std::path::PathBuf;
pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFiles};
use termcolor::Buffer;
use super::src_span::SrcSpan;

pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, file_id: usize, label_style: Option<LabelStyle>) -> CodespanLabel<usize> {
        let label = CodespanLabel::new(
            label_style.unwrap_or(LabelStyle::Primary),
            file_id,
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
}

/// One renderable report: a title, an optional snippet with a label under
/// the offending span, then hints as notes.
pub struct Diagnostic<'a> {
    pub title: String,
    pub hints: Vec<String>,
    pub severity: Severity,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write(&self, buf: &mut Buffer) -> io::Result<()> {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }
    }

    pub fn write_span(&self, location: &Location, buf: &mut Buffer) -> io::Result<()> {
        let mut files = SimpleFiles::new();

        // a line that was typed at the prompt has no path
        let name = match location.path.as_os_str().is_empty() {
            true => "<stdin>".to_string(),
            false => location.path.to_string_lossy().into_owned(),
        };

        let file_id = files.add(name, location.src);

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(self.severity)
            .with_message(&self.title)
            .with_labels(vec![location.label.to_codespan_label(file_id, None)])
            .with_notes(self.hints.clone());

        let config = codespan_reporting::term::Config::default();

        codespan_reporting::term::emit(buf, &config, &files, &diagnostic)
            .map_err(|error| io::Error::new(io::ErrorKind::Other, error.to_string()))
    }

    pub fn write_title(&self, buf: &mut Buffer) -> io::Result<()> {
        use std::io::Write;
        use termcolor::{Color, ColorSpec, WriteColor};

        let (kind, colour) = match self.severity {
            Severity::Bug | Severity::Error => ("error", Color::Red),
            Severity::Warning => ("warning", Color::Yellow),
            Severity::Note | Severity::Help => ("note", Color::Cyan),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))?;
        write!(buf, "{kind}")?;

        buf.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(buf, ": {}", self.title)?;

        buf.set_color(&ColorSpec::new())?;

        for hint in &self.hints {
            writeln!(buf, "  = {hint}")?;
        }

        Ok(())
    }
}
