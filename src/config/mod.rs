//! Configuration loading.
//!
//! Sources, later ones overriding earlier ones:
//! 1. built-in defaults (`Settings::default()`)
//! 2. `config/default.{toml,yaml,json,...}` if present
//! 3. environment variables prefixed with `POPSUB`, nested with `__`,
//!    e.g. `POPSUB__SUBSCRIBER__AUTO_ACK=false`

mod settings;

use std::path::Path;

use config::{Config, ConfigError, Environment, File, Source};

use self::settings::PartialSettings;

pub use settings::{LoggingSettings, PublisherSettings, Settings, SubscriberSettings};

const ENV_PREFIX: &str = "POPSUB";

/// Loads the configuration from `config/default` and the environment.
pub fn load_config() -> Result<Settings, ConfigError> {
    build(File::with_name("config/default").required(false))
}

/// Loads the configuration from an explicit file and the environment.
/// The file must exist.
pub fn load_config_from(path: impl AsRef<Path>) -> Result<Settings, ConfigError> {
    build(File::from(path.as_ref()).required(true))
}

fn build<F>(file: F) -> Result<Settings, ConfigError>
where
    F: Source + Send + Sync + 'static,
{
    let config = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let partial: PartialSettings = config.try_deserialize()?;
    Ok(merge(partial))
}

fn merge(partial: PartialSettings) -> Settings {
    let default = Settings::default();

    Settings {
        publisher: PublisherSettings {
            topic: partial
                .publisher
                .as_ref()
                .and_then(|p| p.topic.clone())
                .unwrap_or(default.publisher.topic),
            format: partial
                .publisher
                .as_ref()
                .and_then(|p| p.format)
                .unwrap_or(default.publisher.format),
        },
        subscriber: SubscriberSettings {
            topic: partial
                .subscriber
                .as_ref()
                .and_then(|s| s.topic.clone())
                .unwrap_or(default.subscriber.topic),
            auto_ack: partial
                .subscriber
                .as_ref()
                .and_then(|s| s.auto_ack)
                .unwrap_or(default.subscriber.auto_ack),
            format: partial
                .subscriber
                .as_ref()
                .and_then(|s| s.format)
                .unwrap_or(default.subscriber.format),
        },
        logging: LoggingSettings {
            level: partial
                .logging
                .as_ref()
                .and_then(|l| l.level.clone())
                .unwrap_or(default.logging.level),
        },
    }
}
