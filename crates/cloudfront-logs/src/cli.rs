//! Command line interface.
//!
//! Required flags default to the empty string so that missing and empty
//! values are rejected the same way, by [`Command::validate`], before any
//! remote call is made.
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use snafu::prelude::*;

use crate::{
    delivery::{DeliveryOptions, Naming, OutputFormat},
    distribution::{BehaviorPolicies, CreatedDistribution, Distribution},
    pipeline::{LoggingPipeline, PipelineReport},
    resolve_account, Error, MissingFlagSnafu, Platform, Result,
};

pub const DEFAULT_REGION: &str = "us-east-1";

/// Region used when neither `--region` nor `CF_LOGS_REGION` is given:
/// `AWS_REGION` if set, otherwise [`DEFAULT_REGION`].
pub fn default_region() -> String {
    std::env::var("AWS_REGION")
        .ok()
        .filter(|region| !region.is_empty())
        .unwrap_or_else(|| DEFAULT_REGION.to_owned())
}

#[derive(Parser, Debug)]
#[clap(name = "cf-logs", author, version, about)]
pub struct Cli {
    /// Sets the verbosity level
    #[clap(short, action = clap::ArgAction::Count, global = true)]
    pub verbosity: u8,

    /// TOML file overriding the delivery's S3 suffix path, hive
    /// partitioning and tags.
    #[clap(long, global = true, env = "CF_LOGS_DELIVERY_CONFIG")]
    pub delivery_config: Option<PathBuf>,

    #[clap(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Delivery options from `--delivery-config`, or the defaults.
    pub fn delivery_options(&self) -> Result<DeliveryOptions> {
        match &self.delivery_config {
            Some(path) => DeliveryOptions::from_file(path),
            None => Ok(DeliveryOptions::default()),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Create a CloudFront distribution and ship its access logs to S3.
    Provision(ProvisionArgs),
    /// Ship an existing distribution's access logs to S3.
    Attach(AttachArgs),
    /// Ship an existing distribution's access logs to S3 as Parquet, under
    /// the fixed names "S3-delivery" and "S3-destination".
    AttachParquet(TargetArgs),
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct ProvisionArgs {
    /// Origin host
    #[clap(long, env = "CF_LOGS_ORIGIN_HOST", default_value = "", hide_default_value = true)]
    pub origin_host: String,

    /// Cache policy ID
    #[clap(long, env = "CF_LOGS_CACHE_POLICY_ID", default_value = "", hide_default_value = true)]
    pub cache_policy_id: String,

    /// Origin request policy ID
    #[clap(
        long,
        env = "CF_LOGS_ORIGIN_REQUEST_POLICY_ID",
        default_value = "",
        hide_default_value = true
    )]
    pub origin_request_policy_id: String,

    /// Response headers policy ID
    #[clap(
        long,
        env = "CF_LOGS_RESPONSE_HEADERS_POLICY_ID",
        default_value = "",
        hide_default_value = true
    )]
    pub response_headers_policy_id: String,

    /// S3 bucket name for logs
    #[clap(long, env = "CF_LOGS_BUCKET_NAME", default_value = "", hide_default_value = true)]
    pub bucket_name: String,

    /// AWS region
    #[clap(long, env = "CF_LOGS_REGION", default_value_t = default_region())]
    pub region: String,
}

/// An existing distribution and the bucket its logs go to.
#[derive(Args, Debug, Clone, PartialEq)]
pub struct TargetArgs {
    /// CloudFront distribution ID
    #[clap(long, env = "CF_LOGS_DISTRIBUTION_ID", default_value = "", hide_default_value = true)]
    pub distribution_id: String,

    /// S3 bucket name for logs
    #[clap(long, env = "CF_LOGS_BUCKET_NAME", default_value = "", hide_default_value = true)]
    pub bucket_name: String,

    /// AWS region
    #[clap(long, env = "CF_LOGS_REGION", default_value_t = default_region())]
    pub region: String,
}

#[derive(Args, Debug, Clone, PartialEq)]
pub struct AttachArgs {
    #[clap(flatten)]
    pub target: TargetArgs,

    /// How delivery source and destination are named
    #[clap(long, value_enum, env = "CF_LOGS_NAMING", default_value_t = Naming::Derived)]
    pub naming: Naming,

    /// Format of the delivered log records
    #[clap(
        long,
        value_enum,
        env = "CF_LOGS_OUTPUT_FORMAT",
        default_value_t = OutputFormat::Plain
    )]
    pub output_format: OutputFormat,
}

fn required(flag: &'static str, value: &str) -> Result<()> {
    ensure!(!value.is_empty(), MissingFlagSnafu { flag });
    Ok(())
}

impl ProvisionArgs {
    pub fn validate(&self) -> Result<()> {
        required("origin-host", &self.origin_host)?;
        required("cache-policy-id", &self.cache_policy_id)?;
        required("origin-request-policy-id", &self.origin_request_policy_id)?;
        required("response-headers-policy-id", &self.response_headers_policy_id)?;
        required("bucket-name", &self.bucket_name)
    }

    pub fn distribution(&self) -> Distribution {
        Distribution::https_origin(
            &self.origin_host,
            BehaviorPolicies {
                cache_policy_id: self.cache_policy_id.clone(),
                origin_request_policy_id: self.origin_request_policy_id.clone(),
                response_headers_policy_id: self.response_headers_policy_id.clone(),
            },
        )
    }
}

impl TargetArgs {
    pub fn validate(&self) -> Result<()> {
        required("distribution-id", &self.distribution_id)?;
        required("bucket-name", &self.bucket_name)
    }

    fn pipeline(&self) -> LoggingPipeline {
        LoggingPipeline::new(&self.distribution_id, &self.bucket_name, &self.region)
    }
}

impl Command {
    /// The subcommand's name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Command::Provision(_) => "provision",
            Command::Attach(_) => "attach",
            Command::AttachParquet(_) => "attach-parquet",
        }
    }

    pub fn region(&self) -> &str {
        match self {
            Command::Provision(args) => &args.region,
            Command::Attach(args) => &args.target.region,
            Command::AttachParquet(args) => &args.region,
        }
    }

    pub fn validate(&self) -> Result<()> {
        match self {
            Command::Provision(args) => args.validate(),
            Command::Attach(args) => args.target.validate(),
            Command::AttachParquet(args) => args.validate(),
        }
    }

    /// Validates, resolves the account and then creates every resource the
    /// command calls for.
    pub async fn execute<P: Platform>(
        &self,
        options: DeliveryOptions,
        platform: &P,
    ) -> Result<Summary> {
        self.validate()?;
        let account_id = resolve_account(platform).await?;

        match self {
            Command::Provision(args) => {
                let distribution = args.distribution();
                log::info!("creating distribution {distribution:?}");
                let created = platform
                    .create_distribution(&distribution)
                    .await
                    .map_err(|error| Error::Create {
                        name: format!("distribution for {}", args.origin_host),
                        error: Box::new(error),
                    })?;
                println!(
                    "{} CloudFront distribution with ID: {}",
                    "Successfully created".green(),
                    created.id
                );

                let report = LoggingPipeline::new(&created.id, &args.bucket_name, &args.region)
                    .with_options(options)
                    .run(platform, &account_id)
                    .await?;
                Ok(Summary::Provisioned {
                    args: args.clone(),
                    distribution: created,
                    report,
                })
            }
            Command::Attach(args) => {
                let report = args
                    .target
                    .pipeline()
                    .with_naming(args.naming)
                    .with_output_format(args.output_format)
                    .with_options(options)
                    .run(platform, &account_id)
                    .await?;
                Ok(Summary::Attached {
                    args: args.target.clone(),
                    report,
                })
            }
            Command::AttachParquet(args) => {
                let report = args
                    .pipeline()
                    .with_naming(Naming::Fixed)
                    .with_output_format(OutputFormat::Parquet)
                    .with_options(options)
                    .run(platform, &account_id)
                    .await?;
                Ok(Summary::Attached {
                    args: args.clone(),
                    report,
                })
            }
        }
    }
}

/// The configuration summary printed after a successful run.
#[derive(Clone, Debug, PartialEq)]
pub enum Summary {
    Provisioned {
        args: ProvisionArgs,
        distribution: CreatedDistribution,
        report: PipelineReport,
    },
    Attached {
        args: TargetArgs,
        report: PipelineReport,
    },
}

impl Summary {
    pub fn report(&self) -> &PipelineReport {
        match self {
            Summary::Provisioned { report, .. } | Summary::Attached { report, .. } => report,
        }
    }
}

impl core::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", "Configuration Summary:".bold())?;
        match self {
            Summary::Provisioned {
                args,
                distribution,
                report,
            } => {
                writeln!(f, "- Distribution ID: {}", distribution.id)?;
                writeln!(f, "- Distribution ARN: {}", distribution.arn)?;
                writeln!(f, "- Domain Name: {}", distribution.domain_name)?;
                writeln!(f, "- Origin Host: {}", args.origin_host)?;
                writeln!(f, "- Cache Policy ID: {}", args.cache_policy_id)?;
                writeln!(
                    f,
                    "- Origin Request Policy ID: {}",
                    args.origin_request_policy_id
                )?;
                writeln!(
                    f,
                    "- Response Headers Policy ID: {}",
                    args.response_headers_policy_id
                )?;
                writeln!(f, "- S3 Bucket for Logs: {}", args.bucket_name)?;
                writeln!(f, "- Delivery ID: {}", report.delivery_id)?;
                writeln!(f, "- Region: {}", args.region)
            }
            Summary::Attached { args, report } => {
                writeln!(f, "- Distribution ID: {}", args.distribution_id)?;
                writeln!(f, "- S3 Bucket: {}", args.bucket_name)?;
                writeln!(f, "- Delivery Source: {}", report.source_name)?;
                writeln!(f, "- Delivery Destination: {}", report.destination_name)?;
                writeln!(f, "- Delivery ID: {}", report.delivery_id)?;
                writeln!(f, "- Region: {}", args.region)
            }
        }
    }
}
