use crate::utils::logger::{LogLevel, Logger};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style.tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]));
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    bar
}

/// Awaits `action` behind a spinner, then logs how it went.
pub async fn run_step<T, F, S>(start_message: &str, on_success: S, action: F) -> Result<T, String>
where
    F: Future<Output = Result<T, String>>,
    S: FnOnce(&T) -> String,
{
    let bar = spinner(start_message);
    let result = action.await;
    bar.finish_and_clear();

    match &result {
        Ok(value) => Logger::new().log_message(LogLevel::Success, &on_success(value)),
        Err(_) => {
            Logger::new().log_message(LogLevel::Error, &format!("{} failed", start_message))
        }
    }
    result
}
