//! The logging pipeline: delivery source, then destination, then delivery.
use colored::Colorize;

use crate::{
    arn,
    delivery::{
        Delivery, DeliveryDestination, DeliveryOptions, DeliverySource, Naming, OutputFormat,
        ACCESS_LOGS,
    },
    Error, Platform, Result,
};

/// How far a pipeline has progressed.
///
/// Stages only move forward. Once [`Stage::Failed`] is reached the pipeline
/// stays there, and [`LoggingPipeline::reached`] tells which resources were
/// left registered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    NotStarted,
    SourceCreated,
    DestinationCreated,
    DeliveryCreated,
    Failed,
}

impl core::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Stage::NotStarted => "not started",
            Stage::SourceCreated => "source created",
            Stage::DestinationCreated => "destination created",
            Stage::DeliveryCreated => "delivery created",
            Stage::Failed => "failed",
        })
    }
}

/// What a successful run registered.
#[derive(Clone, Debug, PartialEq)]
pub struct PipelineReport {
    pub source_name: String,
    pub destination_name: String,
    pub bucket_arn: String,
    pub destination_arn: String,
    pub delivery_id: String,
}

/// Ships one distribution's access logs into one bucket.
#[derive(Clone, Debug)]
pub struct LoggingPipeline {
    pub distribution_id: String,
    pub bucket_name: String,
    pub region: String,
    pub naming: Naming,
    pub output_format: OutputFormat,
    pub options: DeliveryOptions,
    stage: Stage,
    reached: Stage,
}

impl LoggingPipeline {
    /// A pipeline with names derived from the distribution id and plain
    /// output.
    pub fn new(
        distribution_id: impl Into<String>,
        bucket_name: impl Into<String>,
        region: impl Into<String>,
    ) -> Self {
        Self {
            distribution_id: distribution_id.into(),
            bucket_name: bucket_name.into(),
            region: region.into(),
            naming: Naming::default(),
            output_format: OutputFormat::default(),
            options: DeliveryOptions::default(),
            stage: Stage::NotStarted,
            reached: Stage::NotStarted,
        }
    }

    pub fn with_naming(mut self, naming: Naming) -> Self {
        self.naming = naming;
        self
    }

    pub fn with_output_format(mut self, output_format: OutputFormat) -> Self {
        self.output_format = output_format;
        self
    }

    pub fn with_options(mut self, options: DeliveryOptions) -> Self {
        self.options = options;
        self
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The last stage completed before the pipeline stopped.
    pub fn reached(&self) -> Stage {
        self.reached
    }

    pub fn source(&self, account_id: &str) -> DeliverySource {
        DeliverySource {
            name: self.naming.source_name(&self.distribution_id),
            resource_arn: arn::distribution(account_id, &self.distribution_id),
            log_type: ACCESS_LOGS.to_owned(),
        }
    }

    pub fn destination(&self) -> DeliveryDestination {
        DeliveryDestination {
            name: self.naming.destination_name(&self.distribution_id),
            destination_resource_arn: arn::bucket(&self.bucket_name),
            output_format: self.output_format,
        }
    }

    pub fn delivery(&self, account_id: &str) -> Delivery {
        let destination_name = self.naming.destination_name(&self.distribution_id);
        Delivery {
            source_name: self.naming.source_name(&self.distribution_id),
            destination_arn: arn::delivery_destination(&self.region, account_id, &destination_name),
            suffix_path: self.options.suffix_path.clone(),
            hive_compatible_path: self.options.hive_compatible_path,
            tags: self.options.tags_at(chrono::Utc::now()),
        }
    }

    fn advance(&mut self, stage: Stage) {
        log::debug!("pipeline for {}: {stage}", self.distribution_id);
        self.stage = stage;
        self.reached = stage;
    }

    fn fail<E: crate::UserError>(&mut self, name: String, error: E) -> Error {
        self.stage = Stage::Failed;
        log::error!(
            "pipeline for {} failed after reaching '{}', nothing will be rolled back",
            self.distribution_id,
            self.reached
        );
        Error::Create {
            name,
            error: Box::new(error),
        }
    }

    /// Registers source, destination and delivery in that order.
    ///
    /// Stops at the first failure without undoing earlier registrations.
    pub async fn run<P: Platform>(
        &mut self,
        platform: &P,
        account_id: &str,
    ) -> Result<PipelineReport> {
        let source = self.source(account_id);
        log::info!("putting delivery source {source:?}");
        if let Err(error) = platform.put_delivery_source(&source).await {
            return Err(self.fail(format!("delivery source {}", source.name), error));
        }
        self.advance(Stage::SourceCreated);
        println!(
            "{} delivery source: {}",
            "Successfully created".green(),
            source.name
        );

        let destination = self.destination();
        log::info!("putting delivery destination {destination:?}");
        if let Err(error) = platform.put_delivery_destination(&destination).await {
            return Err(self.fail(format!("delivery destination {}", destination.name), error));
        }
        self.advance(Stage::DestinationCreated);
        println!(
            "{} delivery destination: {}",
            "Successfully created".green(),
            destination.name
        );

        let delivery = self.delivery(account_id);
        log::info!("creating delivery {delivery:?}");
        let delivery_id = match platform.create_delivery(&delivery).await {
            Ok(id) => id,
            Err(error) => {
                return Err(self.fail(format!("delivery {}", delivery.source_name), error));
            }
        };
        self.advance(Stage::DeliveryCreated);
        println!(
            "{} delivery with ID: {delivery_id}",
            "Successfully created".green()
        );
        println!("CloudFront access logs v2 configured!");

        Ok(PipelineReport {
            source_name: source.name,
            destination_name: destination.name,
            bucket_arn: destination.destination_resource_arn,
            destination_arn: delivery.destination_arn,
            delivery_id,
        })
    }
}
