//! Shell-side collaborators: the paste widget and the printing navigator.

use std::io::{self, BufRead, Write};

use serde_json::Value;
use workpay_core::widget::{AuthWidget, WidgetConfig, WidgetOutcome};
use workpay_types::{Navigator, Route};

/// Auth widget driven by pasting the provider's response into the terminal.
///
/// The handshake itself happens out of band; the operator pastes the
/// resulting payload (JSON, possibly stringified) on one line. An empty line
/// or closed stdin counts as a cancelled attempt.
pub struct PasteWidget {
    config: WidgetConfig,
}

impl PasteWidget {
    pub fn new(config: WidgetConfig) -> Self {
        Self { config }
    }
}

impl AuthWidget for PasteWidget {
    async fn run(&self) -> WidgetOutcome {
        println!("Reference ID: {}", self.config.reference_id);
        if self.config.props.debug
            && let Some(widget_id) = &self.config.widget_id
        {
            println!("Widget ID: {widget_id}");
        }
        print!("Paste the {} auth response: ", self.config.props.app_name);
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) => WidgetOutcome::Failure("stdin closed before a response was pasted".into()),
            Ok(_) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    WidgetOutcome::Failure("empty response pasted".into())
                } else {
                    WidgetOutcome::Success(Value::String(trimmed.to_string()))
                }
            }
            Err(err) => WidgetOutcome::Failure(format!("failed to read response: {err}")),
        }
    }
}

/// Navigator that announces transitions on stdout.
///
/// Route params stay out of the output; tokens are only ever printed masked,
/// elsewhere.
pub struct PrintNavigator;

impl Navigator for PrintNavigator {
    fn navigate(&mut self, route: &Route) {
        println!("Navigating to {}", route.name());
    }
}

/// Asks whether to retry a failed login. Defaults to no on EOF.
pub fn confirm_retry() -> bool {
    print!("Try again? [y/N]: ");
    let _ = io::stdout().flush();

    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(n) if n > 0 => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
        _ => false,
    }
}
