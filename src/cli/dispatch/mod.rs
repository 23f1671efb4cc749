use crate::cli::actions::Action;
use anyhow::Result;

pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    Ok(Action::Server {
        port: matches.get_one::<u16>("port").copied().unwrap_or(8080),
        max_login_attempts: matches
            .get_one::<u32>("max-login-attempts")
            .copied()
            .unwrap_or(5),
        login_window_minutes: matches
            .get_one::<u64>("login-window-minutes")
            .copied()
            .unwrap_or(60),
        session_ttl_seconds: matches
            .get_one::<u64>("session-ttl-seconds")
            .copied()
            .unwrap_or(3600),
        remember_ttl_seconds: matches
            .get_one::<u64>("remember-ttl-seconds")
            .copied()
            .unwrap_or(31_536_000),
        sweep_interval_seconds: matches
            .get_one::<u64>("sweep-interval-seconds")
            .copied()
            .unwrap_or(300),
    })
}
