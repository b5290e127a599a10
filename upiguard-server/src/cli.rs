use clap::{Arg, ArgAction, Command, ValueHint};

/// CLI arguments for upiguard-server
#[derive(Debug, Clone, Default)]
pub struct CliArgs {
    pub port: Option<u16>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    pub strict_validation: bool,
    pub log_level: Option<String>,
}

impl CliArgs {
    /// Parse command line arguments
    pub fn parse() -> Self {
        let matches = Command::new("upiguard-server")
            .version(upiguard::VERSION)
            .about("HTTP API for UPI handle safety classification")
            .long_about(
                r#"Upiguard Server classifies UPI payment handles as SAFE or
SUSPICIOUS. When an OPENAI_API_KEY is present in the environment, handles
are classified by the OpenAI API with a deterministic heuristic fallback;
without a key the heuristic path answers directly.

Command line arguments take precedence over environment variables.

Examples:
  upiguard-server --port 8080
  upiguard-server --model gpt-4 --request-timeout 10
  upiguard-server --strict-validation --log-level debug"#,
            )
            .arg(
                Arg::new("port")
                    .short('p')
                    .long("port")
                    .value_name("PORT")
                    .help("Port to listen on")
                    .long_help(
                        "Port number for the HTTP server to listen on.
Environment variable: UPIGUARD_PORT",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u16)),
            )
            .arg(
                Arg::new("model")
                    .long("model")
                    .value_name("MODEL")
                    .help("Completion model requested from the provider")
                    .long_help(
                        "Name of the completion model requested from the
OpenAI-compatible provider.
Environment variable: UPIGUARD_MODEL",
                    )
                    .value_hint(ValueHint::Other),
            )
            .arg(
                Arg::new("base_url")
                    .long("base-url")
                    .value_name("URL")
                    .help("OpenAI-compatible API base URL")
                    .long_help(
                        "Base URL of the OpenAI-compatible completion API.
Useful for pointing at a local or proxy endpoint.
Environment variable: UPIGUARD_API_BASE_URL",
                    )
                    .value_hint(ValueHint::Url),
            )
            .arg(
                Arg::new("request_timeout")
                    .long("request-timeout")
                    .value_name("SECONDS")
                    .help("Provider request timeout in seconds")
                    .long_help(
                        "Timeout applied to each completion request. A timed-out
request falls back to the heuristic classifier.
Environment variable: UPIGUARD_REQUEST_TIMEOUT_SECS",
                    )
                    .value_hint(ValueHint::Other)
                    .value_parser(clap::value_parser!(u64)),
            )
            .arg(
                Arg::new("strict_validation")
                    .long("strict-validation")
                    .help("Apply the strict handle shape before classification")
                    .long_help(
                        "Validate handles against the full local-part@provider
regex instead of the relaxed '@' and length boundary.
Environment variable: UPIGUARD_VALIDATION_POLICY=strict",
                    )
                    .action(ArgAction::SetTrue),
            )
            .arg(
                Arg::new("log_level")
                    .long("log-level")
                    .value_name("LEVEL")
                    .help("Log level filter (e.g. info, debug, upiguard=trace)")
                    .value_hint(ValueHint::Other),
            )
            .get_matches();

        Self {
            port: matches.get_one::<u16>("port").copied(),
            model: matches.get_one::<String>("model").cloned(),
            base_url: matches.get_one::<String>("base_url").cloned(),
            request_timeout_secs: matches.get_one::<u64>("request_timeout").copied(),
            strict_validation: matches.get_flag("strict_validation"),
            log_level: matches.get_one::<String>("log_level").cloned(),
        }
    }
}
