//! Remote services the provisioners talk to.
//!
//! Each service is a trait so that the orchestration can run against the
//! real AWS SDKs ([`crate::aws::Aws`]) or against anything else that keeps the
//! same request/response contract.
use std::future::Future;

use crate::{
    bucket::BucketDefinition,
    recorder::{DeliveryChannelDefinition, RecorderDefinition},
};

/// Error code IAM reports when a role or policy name is taken.
pub const ENTITY_ALREADY_EXISTS: &str = "EntityAlreadyExists";

/// Error code S3 reports when the caller already owns the bucket.
pub const BUCKET_ALREADY_OWNED_BY_YOU: &str = "BucketAlreadyOwnedByYou";

/// A failed call to a remote service.
///
/// `code` is the service's stable error code, when it reported one.
#[derive(Clone, Debug, PartialEq)]
pub struct ServiceError {
    pub operation: &'static str,
    pub code: Option<String>,
    pub message: String,
}

impl ServiceError {
    pub fn new(operation: &'static str, code: Option<&str>, message: impl Into<String>) -> Self {
        ServiceError {
            operation,
            code: code.map(ToOwned::to_owned),
            message: message.into(),
        }
    }

    /// A response that came back without a field the caller needs.
    pub fn missing(operation: &'static str, what: &str) -> Self {
        Self::new(operation, None, format!("response is missing {what}"))
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Whether the service reported the given error code.
    pub fn is(&self, code: &str) -> bool {
        self.code() == Some(code)
    }
}

impl core::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} failed ({code}): {}", self.operation, self.message),
            None => write!(f, "{} failed: {}", self.operation, self.message),
        }
    }
}

impl std::error::Error for ServiceError {}

/// Identity and access management.
pub trait Iam {
    /// Creates a role with the given trust policy, returning its ARN.
    fn create_role(
        &self,
        name: &str,
        trust_policy: &str,
    ) -> impl Future<Output = Result<String, ServiceError>>;

    /// Returns the ARN of an existing role.
    fn get_role(&self, name: &str) -> impl Future<Output = Result<String, ServiceError>>;

    fn attach_role_policy(
        &self,
        role_name: &str,
        policy_arn: &str,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    /// Creates a customer managed policy, returning its ARN.
    fn create_policy(
        &self,
        name: &str,
        document: &str,
    ) -> impl Future<Output = Result<String, ServiceError>>;
}

/// Caller identity.
pub trait Sts {
    /// The account id of the credentials in use.
    fn account_id(&self) -> impl Future<Output = Result<String, ServiceError>>;
}

/// Object storage.
pub trait S3 {
    fn create_bucket(
        &self,
        bucket: &BucketDefinition,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    fn put_bucket_policy(
        &self,
        bucket: &BucketDefinition,
        policy: &str,
    ) -> impl Future<Output = Result<(), ServiceError>>;
}

/// The configuration recording service. Every call targets one region.
pub trait ConfigService {
    /// Creates or overwrites the region's configuration recorder.
    fn put_configuration_recorder(
        &self,
        region: &str,
        recorder: &RecorderDefinition,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    /// Creates or overwrites the region's delivery channel.
    fn put_delivery_channel(
        &self,
        region: &str,
        channel: &DeliveryChannelDefinition,
    ) -> impl Future<Output = Result<(), ServiceError>>;

    fn start_configuration_recorder(
        &self,
        region: &str,
        recorder_name: &str,
    ) -> impl Future<Output = Result<(), ServiceError>>;
}

/// Everything a [`Plan`](crate::Plan) needs to be applied.
pub trait Provider: Iam + Sts + S3 + ConfigService {}

impl<T: Iam + Sts + S3 + ConfigService> Provider for T {}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn classifies_by_code() {
        let err = ServiceError::new("CreateRole", Some(ENTITY_ALREADY_EXISTS), "role exists");
        assert!(err.is(ENTITY_ALREADY_EXISTS));
        assert!(!err.is(BUCKET_ALREADY_OWNED_BY_YOU));
        assert_eq!(
            "CreateRole failed (EntityAlreadyExists): role exists",
            err.to_string()
        );

        let err = ServiceError::missing("GetRole", "role");
        assert_eq!(None, err.code());
        assert_eq!("GetRole failed: response is missing role", err.to_string());
    }
}
