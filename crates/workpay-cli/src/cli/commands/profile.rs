//! Client profile command handler.

use anyhow::{Result, bail};
use workpay_core::config::Config;
use workpay_core::profile::ProfileForm;
use workpay_types::{Navigator, Route};

use crate::cli::shell::PrintNavigator;

/// Validates the profile form and moves on to the main screen.
pub async fn run(config: &Config, form: ProfileForm) -> Result<()> {
    let repo = super::repository(config);
    if !repo.signed_in().await? {
        bail!("not signed in; run 'workpay login' first");
    }

    form.validate()?;

    println!("Profile completed.");
    PrintNavigator.navigate(&Route::Home);
    Ok(())
}
