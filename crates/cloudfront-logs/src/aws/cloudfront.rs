//! CloudFront distributions.
use anyhow::Context;
use aws_config::SdkConfig;
use aws_sdk_cloudfront::types::{
    CustomOriginConfig, DefaultCacheBehavior, DistributionConfig, Origin, OriginSslProtocols,
    Origins,
};

use crate::distribution::{
    CreatedDistribution, CustomOrigin, Distribution, OriginProtocolPolicy, PriceClass,
    SslProtocol, ViewerProtocolPolicy,
};

impl From<OriginProtocolPolicy> for aws_sdk_cloudfront::types::OriginProtocolPolicy {
    fn from(value: OriginProtocolPolicy) -> Self {
        Self::from(value.as_str())
    }
}

impl From<SslProtocol> for aws_sdk_cloudfront::types::SslProtocol {
    fn from(value: SslProtocol) -> Self {
        Self::from(value.as_str())
    }
}

impl From<ViewerProtocolPolicy> for aws_sdk_cloudfront::types::ViewerProtocolPolicy {
    fn from(value: ViewerProtocolPolicy) -> Self {
        Self::from(value.as_str())
    }
}

impl From<PriceClass> for aws_sdk_cloudfront::types::PriceClass {
    fn from(value: PriceClass) -> Self {
        Self::from(value.as_str())
    }
}

fn custom_origin(origin: &CustomOrigin) -> anyhow::Result<Origin> {
    let ssl_protocols = OriginSslProtocols::builder()
        .quantity(i32::try_from(origin.ssl_protocols.len())?)
        .set_items(Some(
            origin.ssl_protocols.iter().map(|p| (*p).into()).collect(),
        ))
        .build()?;
    let custom = CustomOriginConfig::builder()
        .http_port(origin.http_port)
        .https_port(origin.https_port)
        .origin_protocol_policy(origin.protocol_policy.into())
        .origin_ssl_protocols(ssl_protocols)
        .build()?;
    let origin = Origin::builder()
        .id(&origin.id)
        .domain_name(&origin.domain_name)
        .custom_origin_config(custom)
        .build()?;
    Ok(origin)
}

/// Translates a [`Distribution`] into the SDK's request shape.
pub fn distribution_config(distribution: &Distribution) -> anyhow::Result<DistributionConfig> {
    let items = distribution
        .origins
        .iter()
        .map(custom_origin)
        .collect::<anyhow::Result<Vec<_>>>()?;
    let origins = Origins::builder()
        .quantity(i32::try_from(items.len())?)
        .set_items(Some(items))
        .build()?;
    let behavior = DefaultCacheBehavior::builder()
        .target_origin_id(&distribution.target_origin_id)
        .viewer_protocol_policy(distribution.viewer_protocol_policy.into())
        .cache_policy_id(&distribution.policies.cache_policy_id)
        .origin_request_policy_id(&distribution.policies.origin_request_policy_id)
        .response_headers_policy_id(&distribution.policies.response_headers_policy_id)
        .build()?;
    let config = DistributionConfig::builder()
        .caller_reference(&distribution.caller_reference)
        .comment(&distribution.comment)
        .enabled(distribution.enabled)
        .default_cache_behavior(behavior)
        .origins(origins)
        .price_class(distribution.price_class.into())
        .build()?;
    Ok(config)
}

pub async fn create_distribution(
    cfg: &SdkConfig,
    distribution: &Distribution,
) -> anyhow::Result<CreatedDistribution> {
    let client = aws_sdk_cloudfront::Client::new(cfg);
    let config = distribution_config(distribution)?;
    let out = client
        .create_distribution()
        .distribution_config(config)
        .send()
        .await
        .map_err(super::sdk_error("CreateDistribution"))?;
    let created = out.distribution.context("missing output distribution")?;
    log::info!("...created distribution {}", created.id());
    Ok(CreatedDistribution {
        id: created.id().to_owned(),
        domain_name: created.domain_name().to_owned(),
        arn: created.arn().to_owned(),
    })
}
