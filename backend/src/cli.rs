//! Minimal CLI parsing for configuration overrides.

use std::env;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub port_override: Option<u16>,
    pub database_url_override: Option<String>,
    pub print_schema: bool,
}

impl CliOptions {
    pub fn from_args() -> Self {
        Self::parse(env::args().skip(1))
    }

    fn parse(args: impl IntoIterator<Item = String>) -> Self {
        let mut options = CliOptions::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--print-schema" => options.print_schema = true,
                "--port" => {
                    if let Some(value) = args.next() {
                        options.port_override = value.parse().ok();
                    }
                }
                "--database-url" => {
                    options.database_url_override = args.next();
                }
                _ if arg.starts_with("--port=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.port_override = value.parse().ok();
                    }
                }
                _ if arg.starts_with("--database-url=") => {
                    if let Some(value) = arg.split_once('=').map(|(_, v)| v) {
                        options.database_url_override = Some(value.to_string());
                    }
                }
                _ => {}
            }
        }
        options
    }
}
