//! Login/logout command handlers.

use anyhow::{Result, bail};
use workpay_core::bootstrap::{ExtractionPolicy, SessionBootstrap};
use workpay_core::config::Config;
use workpay_core::session::mask_token;
use workpay_core::widget::WidgetConfig;
use workpay_types::{Navigator, Route};

use crate::cli::shell::{PasteWidget, PrintNavigator, confirm_retry};

/// Runs one login flow, offering a debounced retry after each failure.
pub async fn login(config: &Config, otp: bool) -> Result<()> {
    if otp && config.widget.widget_id.is_none() {
        bail!("the OTP flow needs widget.widget_id in the config (see 'workpay config path')");
    }

    let policy = if otp {
        ExtractionPolicy::otp_login()
    } else {
        ExtractionPolicy::proxy_login()
    };
    let mut bootstrap =
        SessionBootstrap::new(super::repository(config), policy, config.retry_delay());
    let widget = PasteWidget::new(WidgetConfig::from_config(config));
    let mut navigator = PrintNavigator;

    loop {
        match bootstrap.run_widget(&widget).await {
            Ok(route) => {
                if let Route::RoleSelection { token, .. } = &route {
                    println!("Signed in ({}).", mask_token(token));
                }
                navigator.navigate(&route);
                return Ok(());
            }
            Err(failure) => {
                eprintln!("Login failed: {}", failure.user_message());
                if !confirm_retry() {
                    bail!("login aborted");
                }
                bootstrap.retry().await;
            }
        }
    }
}

/// Clears the persisted session.
pub async fn logout(config: &Config) -> Result<()> {
    let repo = super::repository(config);
    let was_signed_in = repo.signed_in().await?;
    repo.clear_auth_data().await?;

    if was_signed_in {
        println!("Signed out.");
    } else {
        println!("No active session.");
    }
    Ok(())
}
