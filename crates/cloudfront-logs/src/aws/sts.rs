//! AWS Security Token Service.
use anyhow::Context;
use aws_config::SdkConfig;

/// Account id of the credentials `cfg` was loaded with.
pub async fn caller_account(cfg: &SdkConfig) -> anyhow::Result<String> {
    let client = aws_sdk_sts::Client::new(cfg);
    let out = client
        .get_caller_identity()
        .send()
        .await
        .map_err(super::sdk_error("GetCallerIdentity"))?;
    out.account.context("missing caller identity account")
}
