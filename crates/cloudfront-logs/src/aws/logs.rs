//! CloudWatch Logs deliveries.
use anyhow::Context;
use aws_config::SdkConfig;
use aws_sdk_cloudwatchlogs::types::{DeliveryDestinationConfiguration, S3DeliveryConfiguration};

use crate::delivery::{Delivery, DeliveryDestination, DeliverySource, OutputFormat};

impl From<OutputFormat> for aws_sdk_cloudwatchlogs::types::OutputFormat {
    fn from(value: OutputFormat) -> Self {
        Self::from(value.as_str())
    }
}

pub async fn put_delivery_source(cfg: &SdkConfig, source: &DeliverySource) -> anyhow::Result<()> {
    let client = aws_sdk_cloudwatchlogs::Client::new(cfg);
    let out = client
        .put_delivery_source()
        .name(&source.name)
        .resource_arn(&source.resource_arn)
        .log_type(&source.log_type)
        .send()
        .await
        .map_err(super::sdk_error("PutDeliverySource"))?;
    if let Some(arn) = out.delivery_source().and_then(|s| s.arn()) {
        log::debug!("delivery source arn: {arn}");
    }
    Ok(())
}

pub async fn put_delivery_destination(
    cfg: &SdkConfig,
    destination: &DeliveryDestination,
) -> anyhow::Result<()> {
    let client = aws_sdk_cloudwatchlogs::Client::new(cfg);
    let configuration = DeliveryDestinationConfiguration::builder()
        .destination_resource_arn(&destination.destination_resource_arn)
        .build()?;
    let out = client
        .put_delivery_destination()
        .name(&destination.name)
        .delivery_destination_configuration(configuration)
        .output_format(destination.output_format.into())
        .send()
        .await
        .map_err(super::sdk_error("PutDeliveryDestination"))?;
    if let Some(arn) = out.delivery_destination().and_then(|d| d.arn()) {
        log::debug!("delivery destination arn: {arn}");
    }
    Ok(())
}

pub async fn create_delivery(cfg: &SdkConfig, delivery: &Delivery) -> anyhow::Result<String> {
    let client = aws_sdk_cloudwatchlogs::Client::new(cfg);
    let s3 = S3DeliveryConfiguration::builder()
        .suffix_path(&delivery.suffix_path)
        .enable_hive_compatible_path(delivery.hive_compatible_path)
        .build();
    let out = client
        .create_delivery()
        .delivery_source_name(&delivery.source_name)
        .delivery_destination_arn(&delivery.destination_arn)
        .set_tags(Some(delivery.tags.clone().into_iter().collect()))
        .s3_delivery_configuration(s3)
        .send()
        .await
        .map_err(super::sdk_error("CreateDelivery"))?;
    let id = out
        .delivery
        .and_then(|d| d.id)
        .context("missing output delivery id")?;
    log::info!("...created delivery {id}");
    Ok(id)
}
