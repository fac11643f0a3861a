//! Role selection command handler.

use anyhow::{Result, bail};
use workpay_core::config::Config;
use workpay_types::{Navigator, RoleChoice};

use crate::cli::shell::PrintNavigator;

/// Maps the chosen role to its destination, carrying the session params.
pub async fn run(config: &Config, choice: &str) -> Result<()> {
    let Some(choice) = RoleChoice::parse(choice) else {
        bail!("unknown role '{choice}' (expected hire, work, or both)");
    };

    let repo = super::repository(config);
    let Some(token) = repo.auth_token().await? else {
        bail!("not signed in; run 'workpay login' first");
    };
    let email = repo.user_email().await?;

    let route = choice.destination(token, email);
    PrintNavigator.navigate(&route);
    Ok(())
}
