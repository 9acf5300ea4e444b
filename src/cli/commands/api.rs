use crate::config::DEFAULT_API_BASE_URL;
use clap::{Arg, Command};

pub const ARG_API_BASE_URL: &str = "api-base-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_USERNAME: &str = "username";
pub const ARG_PASSWORD: &str = "password";

#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_BASE_URL)
                .long(ARG_API_BASE_URL)
                .help("Base URL of the backend API")
                .env("GATEKEEPER_API_BASE_URL")
                .default_value(DEFAULT_API_BASE_URL)
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long(ARG_TIMEOUT)
                .help("Request timeout in seconds")
                .env("GATEKEEPER_TIMEOUT_SECONDS")
                .default_value("10")
                .value_parser(clap::value_parser!(u64))
                .global(true),
        )
        .arg(
            Arg::new(ARG_USERNAME)
                .short('u')
                .long(ARG_USERNAME)
                .help("Username to sign in with")
                .env("GATEKEEPER_USERNAME")
                .global(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long(ARG_PASSWORD)
                .help("Password to sign in with")
                .env("GATEKEEPER_PASSWORD")
                .hide_env_values(true)
                .global(true),
        )
}
