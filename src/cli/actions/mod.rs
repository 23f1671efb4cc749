pub mod server;

#[derive(Debug)]
pub enum Action {
    Server {
        port: u16,
        max_login_attempts: u32,
        login_window_minutes: u64,
        session_ttl_seconds: u64,
        remember_ttl_seconds: u64,
        sweep_interval_seconds: u64,
    },
}
