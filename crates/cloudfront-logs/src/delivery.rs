//! CloudWatch Logs delivery definitions.
use std::collections::BTreeMap;

use snafu::prelude::*;

use crate::{DeliveryConfigParseSnafu, DeliveryConfigReadSnafu, Result};

/// Log type CloudFront publishes its standard access logs under.
pub const ACCESS_LOGS: &str = "ACCESS_LOGS";

pub const DEFAULT_SUFFIX_PATH: &str = "{DistributionId}/{yyyy}/{MM}/{dd}/{HH}/";

/// Format the delivered log records are written in.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Plain,
    Parquet,
    Json,
    W3c,
    Raw,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Plain => "plain",
            OutputFormat::Parquet => "parquet",
            OutputFormat::Json => "json",
            OutputFormat::W3c => "w3c",
            OutputFormat::Raw => "raw",
        }
    }
}

impl core::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How delivery source and destination names are chosen.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Naming {
    /// Names embed the distribution id, so one account can hold a pipeline
    /// per distribution.
    #[default]
    Derived,
    /// `S3-delivery` and `S3-destination`, whatever the distribution.
    Fixed,
}

impl Naming {
    pub fn source_name(&self, distribution_id: &str) -> String {
        match self {
            Naming::Derived => format!("CloudFront-{distribution_id}"),
            Naming::Fixed => "S3-delivery".to_owned(),
        }
    }

    pub fn destination_name(&self, distribution_id: &str) -> String {
        match self {
            Naming::Derived => format!("S3-destination-cloudfrontlogs-{distribution_id}"),
            Naming::Fixed => "S3-destination".to_owned(),
        }
    }
}

/// Registers a resource as a log producer.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySource {
    pub name: String,
    pub resource_arn: String,
    pub log_type: String,
}

/// Registers a log sink.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDestination {
    pub name: String,
    pub destination_resource_arn: String,
    pub output_format: OutputFormat,
}

/// Links a source to a destination.
#[derive(Debug, Clone, PartialEq)]
pub struct Delivery {
    pub source_name: String,
    pub destination_arn: String,
    pub suffix_path: String,
    pub hive_compatible_path: bool,
    pub tags: BTreeMap<String, String>,
}

/// Tunables for the S3 side of a delivery.
///
/// May be read from a TOML file:
///
/// ```toml
/// suffix_path = "{DistributionId}/{yyyy}/{MM}/{dd}/"
/// hive_compatible_path = false
///
/// [tags]
/// Team = "edge"
/// ```
///
/// Missing keys keep their defaults.
#[derive(Debug, Clone, PartialEq, serde::Deserialize)]
#[serde(default)]
pub struct DeliveryOptions {
    pub suffix_path: String,
    pub hive_compatible_path: bool,
    /// Added to the tags every delivery carries, replacing them on
    /// conflicting keys.
    pub tags: BTreeMap<String, String>,
}

impl Default for DeliveryOptions {
    fn default() -> Self {
        Self {
            suffix_path: DEFAULT_SUFFIX_PATH.to_owned(),
            hive_compatible_path: true,
            tags: BTreeMap::default(),
        }
    }
}

impl DeliveryOptions {
    pub fn from_toml_str(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("reading delivery config from {path:?}");
        let contents = std::fs::read_to_string(path).context(DeliveryConfigReadSnafu { path })?;
        Self::from_toml_str(&contents).context(DeliveryConfigParseSnafu { path })
    }

    /// Tags for a delivery created at `now`.
    pub fn tags_at(&self, now: chrono::DateTime<chrono::Utc>) -> BTreeMap<String, String> {
        let mut tags = BTreeMap::from([
            ("Service".to_owned(), "CloudFront".to_owned()),
            (
                "Created".to_owned(),
                now.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            ),
        ]);
        tags.extend(self.tags.clone());
        tags
    }
}
