pub mod api;
pub mod logging;
pub mod products;

use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ColorChoice, Command,
};

pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_LOGIN: &str = "login";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_NAVIGATE: &str = "navigate";
pub const ARG_PATH: &str = "path";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("gatekeeper")
        .about("Session-aware API client")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(Command::new(CMD_WHOAMI).about("Show the current session"))
        .subcommand(Command::new(CMD_LOGIN).about("Sign in with --username and --password"))
        .subcommand(Command::new(CMD_LOGOUT).about("End the session"))
        .subcommand(
            Command::new(CMD_NAVIGATE)
                .about("Resolve a view path through the route guards")
                .arg(Arg::new(ARG_PATH).help("View path, e.g. /products").required(true)),
        )
        .subcommand(products::subcommand());

    let command = api::with_args(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_API_BASE_URL;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "gatekeeper");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session-aware API client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_defaults() {
        temp_env::with_vars(
            [
                ("GATEKEEPER_API_BASE_URL", None::<&str>),
                ("GATEKEEPER_TIMEOUT_SECONDS", None),
                ("GATEKEEPER_USERNAME", None),
                ("GATEKEEPER_PASSWORD", None),
            ],
            || {
                let matches = new().get_matches_from(vec!["gatekeeper", "whoami"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_BASE_URL).cloned(),
                    Some(DEFAULT_API_BASE_URL.to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(10));
                assert_eq!(matches.get_one::<String>(api::ARG_USERNAME), None);
                assert_eq!(matches.subcommand_name(), Some(CMD_WHOAMI));
            },
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("GATEKEEPER_API_BASE_URL", Some("https://shop.example.com/api")),
                ("GATEKEEPER_TIMEOUT_SECONDS", Some("3")),
                ("GATEKEEPER_USERNAME", Some("ana")),
                ("GATEKEEPER_PASSWORD", Some("secret")),
                ("GATEKEEPER_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["gatekeeper", "login"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_BASE_URL).cloned(),
                    Some("https://shop.example.com/api".to_string())
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(3));
                assert_eq!(
                    matches.get_one::<String>(api::ARG_USERNAME).cloned(),
                    Some("ana".to_string())
                );
                assert_eq!(
                    matches.get_one::<String>(api::ARG_PASSWORD).cloned(),
                    Some("secret".to_string())
                );
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );
            },
        );
    }

    #[test]
    fn test_global_args_after_subcommand() {
        temp_env::with_vars([("GATEKEEPER_API_BASE_URL", None::<&str>)], || {
            let matches = new().get_matches_from(vec![
                "gatekeeper",
                "navigate",
                "/products/new",
                "--api-base-url",
                "http://127.0.0.1:9000/api",
            ]);
            assert_eq!(
                matches.get_one::<String>(api::ARG_API_BASE_URL).cloned(),
                Some("http://127.0.0.1:9000/api".to_string())
            );
            let path = matches
                .subcommand_matches(CMD_NAVIGATE)
                .and_then(|sub| sub.get_one::<String>(ARG_PATH).cloned());
            assert_eq!(path, Some("/products/new".to_string()));
        });
    }

    #[test]
    fn test_check_log_level_env() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, &level) in levels.iter().enumerate() {
            temp_env::with_vars([("GATEKEEPER_LOG_LEVEL", Some(level))], || {
                let matches = new().get_matches_from(vec!["gatekeeper", "whoami"]);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_usize {
            temp_env::with_vars([("GATEKEEPER_LOG_LEVEL", None::<String>)], || {
                let mut args = vec!["gatekeeper".to_string(), "whoami".to_string()];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }

    #[test]
    fn test_products_subcommands() {
        let matches = new().get_matches_from(vec![
            "gatekeeper",
            "products",
            "update",
            "7",
            "--name",
            "Lamp",
            "--price",
            "19.5",
        ]);
        let Some(("products", catalog)) = matches.subcommand() else {
            panic!("expected products subcommand");
        };
        let Some(("update", update)) = catalog.subcommand() else {
            panic!("expected update subcommand");
        };
        assert_eq!(update.get_one::<i64>(products::ARG_ID).copied(), Some(7));
        assert_eq!(update.get_one::<f64>(products::ARG_PRICE).copied(), Some(19.5));
        assert_eq!(
            update.get_one::<String>(products::ARG_DESCRIPTION).cloned(),
            Some(String::new())
        );
    }

    #[test]
    fn test_products_requires_action() {
        let result = new().try_get_matches_from(vec!["gatekeeper", "products"]);
        assert!(result.is_err());
    }
}
