//! Server configuration module

use anyhow::Result;
use std::env;
use std::time::Duration;

use upiguard::config::ClassifierConfig;
use upiguard::validator::ValidationPolicy;

/// Default listening port.
const DEFAULT_PORT: u16 = 3000;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,

    /// Classification pipeline configuration
    pub classifier: ClassifierConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            classifier: ClassifierConfig::builder()
                .build()
                .expect("default classifier config is valid"),
        }
    }
}

impl ServerConfig {
    /// Load configuration from CLI arguments and environment variables.
    /// CLI arguments take precedence over environment variables.
    pub fn from_cli_and_env(cli_args: crate::cli::CliArgs) -> Result<Self> {
        let mut port = DEFAULT_PORT;
        if let Some(cli_port) = cli_args.port {
            port = cli_port;
        } else if let Ok(env_port) = env::var("UPIGUARD_PORT") {
            port = env_port.parse()?;
        }

        let mut builder = ClassifierConfig::builder();

        // The credential only ever comes from the environment
        if let Ok(key) = env::var("OPENAI_API_KEY") {
            builder = builder.with_api_key(key);
        }

        if let Some(model) = cli_args.model {
            builder = builder.with_model(model);
        } else if let Ok(model) = env::var("UPIGUARD_MODEL") {
            builder = builder.with_model(model);
        }

        if let Some(base_url) = cli_args.base_url {
            builder = builder.with_base_url(base_url);
        } else if let Ok(base_url) = env::var("UPIGUARD_API_BASE_URL") {
            builder = builder.with_base_url(base_url);
        }

        if let Some(secs) = cli_args.request_timeout_secs {
            builder = builder.with_timeout(Duration::from_secs(secs));
        } else if let Ok(secs) = env::var("UPIGUARD_REQUEST_TIMEOUT_SECS") {
            builder = builder.with_timeout(Duration::from_secs(secs.parse()?));
        }

        if cli_args.strict_validation {
            builder = builder.with_validation_policy(ValidationPolicy::Strict);
        } else if let Ok(policy) = env::var("UPIGUARD_VALIDATION_POLICY") {
            let policy = match policy.to_lowercase().as_str() {
                "strict" => ValidationPolicy::Strict,
                _ => ValidationPolicy::Relaxed,
            };
            builder = builder.with_validation_policy(policy);
        }

        Ok(Self {
            port,
            classifier: builder.build()?,
        })
    }
}
