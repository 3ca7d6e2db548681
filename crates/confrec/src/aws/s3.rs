use aws_sdk_s3::{
    config::Region,
    types::{BucketLocationConstraint, CreateBucketConfiguration},
};

use crate::{
    bucket::BucketDefinition,
    provider::{ServiceError, S3},
};

use super::{service_error, Aws};

impl Aws {
    fn s3_client(&self, region: &str) -> aws_sdk_s3::Client {
        let config = aws_sdk_s3::config::Builder::from(&self.0)
            .region(Region::new(region.to_owned()))
            .build();
        aws_sdk_s3::Client::from_conf(config)
    }
}

impl S3 for Aws {
    async fn create_bucket(&self, bucket: &BucketDefinition) -> Result<(), ServiceError> {
        let configuration = bucket.location_constraint.as_deref().map(|constraint| {
            CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(constraint))
                .build()
        });
        let _ = self
            .s3_client(&bucket.region)
            .create_bucket()
            .bucket(&bucket.name)
            .set_create_bucket_configuration(configuration)
            .send()
            .await
            .map_err(|e| service_error("CreateBucket", e))?;
        Ok(())
    }

    async fn put_bucket_policy(
        &self,
        bucket: &BucketDefinition,
        policy: &str,
    ) -> Result<(), ServiceError> {
        let _ = self
            .s3_client(&bucket.region)
            .put_bucket_policy()
            .bucket(&bucket.name)
            .policy(policy)
            .send()
            .await
            .map_err(|e| service_error("PutBucketPolicy", e))?;
        Ok(())
    }
}
