//! The AWS platform.
use aws_config::{BehaviorVersion, Region};
pub use aws_config::SdkConfig;

use crate::{
    delivery::{Delivery, DeliveryDestination, DeliverySource},
    distribution::{CreatedDistribution, Distribution},
    Platform,
};

pub mod cloudfront;
pub mod logs;
pub mod sts;

/// A wrapper around the AWS `SdkConfig` that implements [`Platform`].
pub struct Aws(pub SdkConfig);

impl AsRef<SdkConfig> for Aws {
    fn as_ref(&self) -> &SdkConfig {
        &self.0
    }
}

impl Aws {
    /// Loads credentials and settings from the environment, pinned to
    /// `region`.
    pub async fn load(region: impl Into<String>) -> Self {
        let region = region.into();
        log::debug!("loading AWS config for region {region}");
        let cfg = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region))
            .load()
            .await;
        Aws(cfg)
    }
}

/// Maps an SDK error into one that carries the whole source chain in its
/// message.
fn sdk_error<E: std::error::Error>(operation: &'static str) -> impl FnOnce(E) -> anyhow::Error {
    move |error| {
        anyhow::anyhow!(
            "{operation} failed: {}",
            aws_sdk_sts::error::DisplayErrorContext(error)
        )
    }
}

impl Platform for Aws {
    type Error = anyhow::Error;

    async fn account_id(&self) -> anyhow::Result<String> {
        sts::caller_account(&self.0).await
    }

    async fn create_distribution(
        &self,
        distribution: &Distribution,
    ) -> anyhow::Result<CreatedDistribution> {
        cloudfront::create_distribution(&self.0, distribution).await
    }

    async fn put_delivery_source(&self, source: &DeliverySource) -> anyhow::Result<()> {
        logs::put_delivery_source(&self.0, source).await
    }

    async fn put_delivery_destination(
        &self,
        destination: &DeliveryDestination,
    ) -> anyhow::Result<()> {
        logs::put_delivery_destination(&self.0, destination).await
    }

    async fn create_delivery(&self, delivery: &Delivery) -> anyhow::Result<String> {
        logs::create_delivery(&self.0, delivery).await
    }
}
