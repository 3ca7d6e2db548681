//! The S3 bucket configuration snapshots are delivered to.
use snafu::prelude::*;

use crate::{
    policy,
    provider::{S3, BUCKET_ALREADY_OWNED_BY_YOU},
    BucketSnafu, Result,
};

/// The region S3 refuses an explicit location constraint for.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Name given to a bucket provisioned for `account_id` in `region`.
pub fn default_bucket_name(account_id: &str, region: &str) -> String {
    format!("aws-config-bucket-{account_id}-{region}")
}

/// A bucket and the region it lives in.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BucketDefinition {
    pub name: String,
    pub region: String,
    /// Sent with the create request. Omitted for [`DEFAULT_REGION`].
    pub location_constraint: Option<String>,
}

impl BucketDefinition {
    pub fn new(name: impl Into<String>, region: impl Into<String>) -> Self {
        let region = region.into();
        let location_constraint = (region != DEFAULT_REGION).then(|| region.clone());
        BucketDefinition {
            name: name.into(),
            region,
            location_constraint,
        }
    }
}

/// Creates the bucket and applies the delivery bucket policy, returning the
/// bucket name.
///
/// A bucket the caller already owns is taken as is, policy included.
pub async fn provision_bucket<P: S3>(
    provider: &P,
    bucket: &BucketDefinition,
    account_id: &str,
) -> Result<String> {
    match provider.create_bucket(bucket).await {
        Ok(()) => log::info!("...created bucket {} in {}", bucket.name, bucket.region),
        Err(e) if e.is(BUCKET_ALREADY_OWNED_BY_YOU) => {
            log::info!("bucket {} already exists and is owned by you", bucket.name);
            return Ok(bucket.name.clone());
        }
        Err(source) => {
            return Err(source).context(BucketSnafu {
                bucket: &bucket.name,
                region: &bucket.region,
            })
        }
    }

    let document = policy::bucket_policy(&bucket.name, account_id);
    log::debug!("bucket policy: {document:#}");
    provider
        .put_bucket_policy(bucket, &document.to_string())
        .await
        .context(BucketSnafu {
            bucket: &bucket.name,
            region: &bucket.region,
        })?;
    log::info!("...applied bucket policy to {}", bucket.name);

    Ok(bucket.name.clone())
}
