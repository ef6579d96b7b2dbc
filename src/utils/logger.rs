#[cfg(feature = "cli")]
use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};
#[cfg(feature = "cli")]
use std::fmt::Write;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Success,
    Error,
    Info,
    Warning,
}

impl LogLevel {
    fn label(self) -> &'static str {
        match self {
            LogLevel::Success => "SUCCESS",
            LogLevel::Error => "ERROR",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
        }
    }

    #[cfg(feature = "cli")]
    fn color(self) -> Color {
        match self {
            LogLevel::Success => Color::Rgb {
                r: 76,
                g: 175,
                b: 80,
            },
            LogLevel::Error => Color::Rgb {
                r: 244,
                g: 67,
                b: 54,
            },
            LogLevel::Info => Color::Rgb {
                r: 33,
                g: 150,
                b: 243,
            },
            LogLevel::Warning => Color::Rgb {
                r: 255,
                g: 152,
                b: 0,
            },
        }
    }
}

/// Terminal logger. Errors and warnings go to stderr, the rest to stdout.
#[derive(Debug, Clone, Default)]
pub struct Logger;

impl Logger {
    pub fn new() -> Self {
        Logger
    }

    pub fn log_message(&self, level: LogLevel, message: &str) {
        self.emit(level, &self.format_line(level, message));
    }

    pub fn log_message_with_trace(&self, level: LogLevel, message: &str, trace: Vec<&str>) {
        let mut out = self.format_line(level, message);
        for t in trace {
            out.push_str(&format!("\n     ↳ {}", t));
        }
        self.emit(level, &out);
    }

    fn emit(&self, level: LogLevel, text: &str) {
        match level {
            LogLevel::Error | LogLevel::Warning => eprintln!("{}", text),
            _ => println!("{}", text),
        }
    }

    fn format_line(&self, level: LogLevel, message: &str) -> String {
        format!(
            "🧩 {} {} {}",
            self.app_signature(),
            self.format_status(level),
            message
        )
    }

    #[cfg(feature = "cli")]
    fn app_signature(&self) -> String {
        let mut s = String::new();
        let _ = write!(&mut s, "{}", SetForegroundColor(Color::Grey));
        s.push('[');
        let _ = write!(
            &mut s,
            "{}{}",
            SetForegroundColor(Color::Rgb {
                r: 255,
                g: 113,
                b: 57,
            }),
            SetAttribute(Attribute::Bold)
        );
        s.push_str("SystemAddons");
        let _ = write!(
            &mut s,
            "{}{}",
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Color::Grey)
        );
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);
        s
    }

    #[cfg(not(feature = "cli"))]
    fn app_signature(&self) -> String {
        "[SystemAddons]".to_string()
    }

    #[cfg(feature = "cli")]
    fn format_status(&self, level: LogLevel) -> String {
        let mut s = String::new();
        s.push('[');
        let _ = write!(
            &mut s,
            "{}{}",
            SetForegroundColor(level.color()),
            SetAttribute(Attribute::Bold)
        );
        s.push_str(level.label());
        let _ = write!(&mut s, "{}", SetAttribute(Attribute::Reset));
        s.push(']');
        let _ = write!(&mut s, "{}", ResetColor);
        s
    }

    #[cfg(not(feature = "cli"))]
    fn format_status(&self, level: LogLevel) -> String {
        format!("[{}]", level.label())
    }
}
