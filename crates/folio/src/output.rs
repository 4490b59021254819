//! Status lines for the CLI, written to stderr.

use std::fmt;

use console::{Style, Term};

/// How a status line is styled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tone {
    Plain,
    Good,
    Caution,
    Bad,
    Title,
}

impl Tone {
    fn style(self) -> Style {
        match self {
            Self::Plain => Style::new(),
            Self::Good => Style::new().green(),
            Self::Caution => Style::new().yellow(),
            Self::Bad => Style::new().red(),
            Self::Title => Style::new().cyan().bold(),
        }
    }
}

pub(crate) struct Output {
    term: Term,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// Write one styled line. Terminal write failures are ignored.
    pub(crate) fn line(&self, tone: Tone, msg: impl AsRef<str>) {
        self.write(&tone.style().apply_to(msg.as_ref()).to_string());
    }

    /// Write a `label: value` line with the label dimmed.
    pub(crate) fn field(&self, label: &str, value: impl fmt::Display) {
        let label = Style::new().dim().apply_to(format!("{label}:"));
        self.write(&format!("{label} {value}"));
    }

    fn write(&self, text: &str) {
        let _ = self.term.write_line(text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tone_is_unstyled() {
        assert_eq!(Tone::Plain.style().apply_to("ready").to_string(), "ready");
    }

    #[test]
    fn test_bad_tone_is_red() {
        let text = Tone::Bad
            .style()
            .force_styling(true)
            .apply_to("failed")
            .to_string();

        assert!(text.contains("\u{1b}[31m"), "{text:?}");
        assert!(text.contains("failed"));
    }
}
