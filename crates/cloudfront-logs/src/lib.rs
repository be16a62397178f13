//! # cflogs
//!
//! Provisions AWS CloudFront distributions and the CloudWatch Logs
//! "delivery" pipelines that ship their access logs into an S3 bucket.
//!
//! A logging pipeline is three registrations made against CloudWatch Logs,
//! one after the other:
//!
//! 1. a **delivery source**, naming the distribution as a log producer,
//! 2. a **delivery destination**, naming the bucket as a log sink along
//!    with the output format (plain, Parquet, ...),
//! 3. a **delivery**, linking the two with an S3 key template and the
//!    hive-compatible partitioning flag.
//!
//! The calls are not transactional. If a later call fails, whatever was
//! registered before it stays registered; see [`pipeline::Stage`].
//!
//! ## Platforms
//!
//! Every remote call goes through the [`Platform`] trait. [`aws::Aws`] is
//! the implementation backed by the AWS SDK. Tests drive the same code
//! against an in-memory platform that records what it was asked to do.
//!
//! ## Error Handling
//!
//! [`Error`] covers everything that can go wrong in a run. Platform errors
//! are boxed into it together with the name of the resource that was being
//! created.
use std::future::Future;

pub mod arn;
pub mod aws;
pub mod cli;
pub mod delivery;
pub mod distribution;
pub mod pipeline;

use delivery::{Delivery, DeliveryDestination, DeliverySource};
use distribution::{CreatedDistribution, Distribution};

/// Marker trait for platform errors.
pub trait UserError: core::fmt::Display + core::fmt::Debug + 'static {}
impl<T: core::fmt::Display + core::fmt::Debug + 'static> UserError for T {}

/// Top-level error enum that encompasses all errors.
#[derive(snafu::Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Missing required flag '--{flag}'"))]
    MissingFlag { flag: &'static str },

    #[snafu(display("Could not read delivery config {path:?}: {source}"))]
    DeliveryConfigRead {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not parse delivery config {path:?}: {source}"))]
    DeliveryConfigParse {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },

    #[snafu(display("Could not resolve the caller's account id: {error}"))]
    Account { error: Box<dyn UserError> },

    #[snafu(display("Error during '{name}' creation: {error}"))]
    Create {
        name: String,
        error: Box<dyn UserError>,
    },
}

type Result<T, E = Error> = core::result::Result<T, E>;

/// The cloud platform that resources are created on.
///
/// Each method is exactly one remote call. Implementations should not
/// retry; a failed call is reported as-is and ends the run.
pub trait Platform {
    /// Errors that may occur interacting with the platform.
    type Error: UserError;

    /// Returns the account id of the caller's credentials.
    fn account_id(&self) -> impl Future<Output = Result<String, Self::Error>>;

    /// Creates a distribution, returning its identifiers.
    fn create_distribution(
        &self,
        distribution: &Distribution,
    ) -> impl Future<Output = Result<CreatedDistribution, Self::Error>>;

    /// Registers a delivery source.
    fn put_delivery_source(
        &self,
        source: &DeliverySource,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Registers a delivery destination.
    fn put_delivery_destination(
        &self,
        destination: &DeliveryDestination,
    ) -> impl Future<Output = Result<(), Self::Error>>;

    /// Links a source to a destination, returning the new delivery's id.
    fn create_delivery(
        &self,
        delivery: &Delivery,
    ) -> impl Future<Output = Result<String, Self::Error>>;
}

/// Resolves the account id the run operates in.
pub async fn resolve_account<P: Platform>(platform: &P) -> Result<String> {
    let account_id = platform
        .account_id()
        .await
        .map_err(|error| Error::Account {
            error: Box::new(error),
        })?;
    log::info!("operating in account {account_id}");
    Ok(account_id)
}
