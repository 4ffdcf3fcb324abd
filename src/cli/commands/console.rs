use crate::aws_config::ProfileStore;
use crate::console::{self, FederationClient};
use crate::credentials::{ConsolePrompt, StsRoleAssumer};
use crate::env;
use crate::error::Result;
use crate::session::SessionManager;

pub async fn execute(profile_name: &str, store: &ProfileStore) -> Result<()> {
    let profile = store.resolve(profile_name)?;

    eprintln!("Opening AWS Console...");
    eprintln!("  Profile: {}", profile.name);
    eprintln!("  Role: {}", profile.role_arn);

    let assumer = StsRoleAssumer::new(
        profile.source_profile.as_deref(),
        profile.region.as_deref(),
    )
    .await;
    let manager = SessionManager::new(assumer, FederationClient::new(), ConsolePrompt);

    let url = manager.signin_url(&profile).await?;

    let headless = env::is_headless_environment();
    console::open_url(&url, headless)?;

    if !headless {
        eprintln!("✓ Console opened successfully");
    }

    Ok(())
}
