use anyhow::Context;
use tokio::net::TcpListener;

use activities_api::{
    app_state::AppState,
    config::read_config,
    domain::{seed, ActivityDirectory},
    router, telemetry,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename(".env.local").ok();
    telemetry::init();

    let config = read_config().context("Failed to read configuration")?;

    let activities = seed::activities().context("Invalid participant in seed data")?;
    let violations = seed::validate(&activities, &config.directory.school_domain);
    if !violations.is_empty() {
        for violation in &violations {
            tracing::error!("Seed data violation: {}", violation);
        }
        anyhow::bail!("Seed data has {} violation(s)", violations.len());
    }
    tracing::info!("Loaded {} activities", activities.len());

    let directory =
        ActivityDirectory::new(activities).with_policy(config.directory.signup_policy());
    tracing::debug!("Signup policy: {:?}", directory.policy());

    let app = router::create(
        AppState::new(directory),
        &config.application.static_dir,
        &config.application.app_url,
    );

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}
