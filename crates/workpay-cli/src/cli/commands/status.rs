//! Status command handler.

use anyhow::Result;
use workpay_core::config::Config;
use workpay_core::session::mask_token;

/// Prints the persisted session state and the derived initial route.
pub async fn run(config: &Config) -> Result<()> {
    let repo = super::repository(config);

    match repo.auth_token().await? {
        Some(token) => {
            println!("Signed in.");
            println!("Token: {}", mask_token(&token));
            match repo.user_email().await? {
                Some(email) => println!("Email: {email}"),
                None => println!("Email: (not provided)"),
            }
            println!("Reference ID: {}", repo.reference_id());
        }
        None => println!("Not signed in."),
    }

    let route = repo.initial_route().await?;
    println!("Initial route: {}", route.name());
    Ok(())
}
