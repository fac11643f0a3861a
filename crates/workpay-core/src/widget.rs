//! The external auth widget contract.
//!
//! The widget performs the actual authentication handshake; it is consumed
//! only through this interface and eventually reports exactly one outcome.
//! Its payload shape is not guaranteed; see [`crate::bootstrap`].

use serde_json::Value;

use crate::config::Config;

/// Completion outcome reported by the widget.
#[derive(Debug, Clone)]
pub enum WidgetOutcome {
    /// Authentication finished; the payload shape varies by provider.
    Success(Value),
    /// Authentication was cancelled or failed; detail is for logs only.
    Failure(String),
}

/// An external authentication widget.
///
/// There is no timeout: the flow waits indefinitely for the widget to
/// report an outcome.
pub trait AuthWidget {
    fn run(&self) -> impl Future<Output = WidgetOutcome> + Send;
}

/// Extra properties bag handed to the widget.
#[derive(Debug, Clone)]
pub struct WidgetProps {
    pub app_name: String,
    pub debug: bool,
}

/// Widget configuration.
///
/// `widget_id`/`auth_token` are widget credentials used only by the OTP
/// variant; the plain-token flow needs the correlation reference id alone.
#[derive(Debug, Clone)]
pub struct WidgetConfig {
    pub reference_id: String,
    pub widget_id: Option<String>,
    pub auth_token: Option<String>,
    pub props: WidgetProps,
}

impl WidgetConfig {
    /// Builds the widget configuration from the loaded app config.
    pub fn from_config(config: &Config) -> Self {
        Self {
            reference_id: config.reference_id.clone(),
            widget_id: config.widget.widget_id.clone(),
            auth_token: config.widget.auth_token.clone(),
            props: WidgetProps {
                app_name: config.widget.app_name.clone(),
                debug: config.widget.debug,
            },
        }
    }
}
