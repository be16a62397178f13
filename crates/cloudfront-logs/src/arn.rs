//! Amazon Resource Names for the resources a pipeline touches.

/// `arn:aws:cloudfront::<account>:distribution/<id>`
pub fn distribution(account_id: &str, distribution_id: &str) -> String {
    format!("arn:aws:cloudfront::{account_id}:distribution/{distribution_id}")
}

/// `arn:aws:s3:::<bucket>`
pub fn bucket(bucket_name: &str) -> String {
    format!("arn:aws:s3:::{bucket_name}")
}

/// `arn:aws:logs:<region>:<account>:delivery-destination:<name>`
pub fn delivery_destination(region: &str, account_id: &str, name: &str) -> String {
    format!("arn:aws:logs:{region}:{account_id}:delivery-destination:{name}")
}
