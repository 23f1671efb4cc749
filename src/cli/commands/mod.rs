use clap::{
    builder::{
        styling::{AnsiColor, Effects, Styles},
        ValueParser,
    },
    Arg, ColorChoice, Command,
};

pub fn validator_log_level() -> ValueParser {
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            // Successfully parsed as a number
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    Command::new("zono")
        .about("DNS zone console")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .arg(
            Arg::new("port")
                .short('p')
                .long("port")
                .help("Port to listen on")
                .default_value("8080")
                .env("ZONO_PORT")
                .value_parser(clap::value_parser!(u16)),
        )
        .arg(
            Arg::new("max-login-attempts")
                .long("max-login-attempts")
                .help("Login attempts allowed per identity inside the window")
                .default_value("5")
                .env("ZONO_MAX_LOGIN_ATTEMPTS")
                .value_parser(clap::value_parser!(u32)),
        )
        .arg(
            Arg::new("login-window-minutes")
                .long("login-window-minutes")
                .help("Rate-limit window for login attempts, in minutes")
                .default_value("60")
                .env("ZONO_LOGIN_WINDOW_MINUTES")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("session-ttl-seconds")
                .long("session-ttl-seconds")
                .help("Session lifetime without remember-me, in seconds")
                .default_value("3600")
                .env("ZONO_SESSION_TTL_SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("remember-ttl-seconds")
                .long("remember-ttl-seconds")
                .help("Session and cookie lifetime with remember-me, in seconds")
                .default_value("31536000")
                .env("ZONO_REMEMBER_TTL_SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("sweep-interval-seconds")
                .long("sweep-interval-seconds")
                .help("Period of the expired attempt/session sweep, in seconds")
                .default_value("300")
                .env("ZONO_SWEEP_INTERVAL_SECONDS")
                .value_parser(clap::value_parser!(u64)),
        )
        .arg(
            Arg::new("verbosity")
                .short('v')
                .long("verbosity")
                .help("Log level: error (0), warn (1), info (2), debug (3), trace (4)")
                .default_value("0")
                .env("ZONO_VERBOSITY")
                .value_parser(validator_log_level()),
        )
}
