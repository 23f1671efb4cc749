use crate::api;
use crate::api::handlers::auth::AuthConfig;
use crate::cli::actions::Action;
use anyhow::Result;
use std::time::Duration;

/// Handle the server action
pub async fn handle(action: Action) -> Result<()> {
    match action {
        Action::Server {
            port,
            max_login_attempts,
            login_window_minutes,
            session_ttl_seconds,
            remember_ttl_seconds,
            sweep_interval_seconds,
        } => {
            let config = AuthConfig::new()
                .with_max_login_attempts(max_login_attempts)
                .with_login_window(Duration::from_secs(login_window_minutes * 60))
                .with_session_ttl(Duration::from_secs(session_ttl_seconds))
                .with_remember_ttl(Duration::from_secs(remember_ttl_seconds))
                .with_sweep_interval(Duration::from_secs(sweep_interval_seconds));

            api::new(port, config).await?;
        }
    }

    Ok(())
}
