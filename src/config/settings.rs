use serde::Deserialize;

use crate::codec::Format;
use crate::subscriber::{SubOptTrait, SubOptions};

/// Top-level configuration settings for the application.
///
/// Covers the publishing side, the subscribing side and logging.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Settings {
    pub publisher: PublisherSettings,
    pub subscriber: SubscriberSettings,
    pub logging: LoggingSettings,
}

/// Where and how typed values are published.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PublisherSettings {
    pub topic: String,
    pub format: Format,
}

/// Where typed values are read from and how each message is handled.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SubscriberSettings {
    pub topic: String,
    pub auto_ack: bool,
    pub format: Format,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LoggingSettings {
    pub level: String,
}

/// Partial configuration settings loaded from files or environment.
///
/// Missing values are filled from `Settings::default()`. Present values must
/// be valid: an unknown format name fails deserialization.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub publisher: Option<PartialPublisherSettings>,
    pub subscriber: Option<PartialSubscriberSettings>,
    pub logging: Option<PartialLoggingSettings>,
}

#[derive(Debug, Deserialize)]
pub struct PartialPublisherSettings {
    pub topic: Option<String>,
    pub format: Option<Format>,
}

#[derive(Debug, Deserialize)]
pub struct PartialSubscriberSettings {
    pub topic: Option<String>,
    pub auto_ack: Option<bool>,
    pub format: Option<Format>,
}

#[derive(Debug, Deserialize)]
pub struct PartialLoggingSettings {
    pub level: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            publisher: PublisherSettings {
                topic: "events".to_string(),
                format: Format::Json,
            },
            subscriber: SubscriberSettings {
                topic: "events".to_string(),
                auto_ack: true,
                format: Format::Json,
            },
            logging: LoggingSettings {
                level: "info".to_string(),
            },
        }
    }
}

impl SubOptTrait for SubscriberSettings {
    fn get_auto_ack(&self) -> bool {
        self.auto_ack
    }

    fn get_format(&self) -> Format {
        self.format
    }
}

impl From<&SubscriberSettings> for SubOptions {
    fn from(settings: &SubscriberSettings) -> Self {
        SubOptions::new(settings.format).auto_ack(settings.auto_ack)
    }
}
