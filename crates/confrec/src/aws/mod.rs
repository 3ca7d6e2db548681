//! The real AWS services.
//!
//! [`Aws`] implements every [`provider`](crate::provider) trait with the AWS
//! SDKs. Clients are built per call from the shared `SdkConfig`; regional
//! calls override the region on a copy of it.
use aws_sdk_iam::error::{DisplayErrorContext, ProvideErrorMetadata};

use crate::provider::ServiceError;

pub use aws_config::SdkConfig;

mod config;
mod iam;
mod s3;
mod sts;

/// A wrapper around the AWS `SdkConfig` that provides `AsRef<SdkConfig>`.
#[derive(Clone, Debug)]
pub struct Aws(pub SdkConfig);

impl AsRef<SdkConfig> for Aws {
    fn as_ref(&self) -> &SdkConfig {
        &self.0
    }
}

impl Aws {
    /// Loads credentials and region from the standard provider chain.
    pub async fn from_env() -> Self {
        Aws(aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await)
    }
}

/// Converts an SDK failure into a [`ServiceError`], keeping the service's
/// error code.
pub(crate) fn service_error<E>(operation: &'static str, err: E) -> ServiceError
where
    E: ProvideErrorMetadata + std::error::Error,
{
    let message = err
        .message()
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| DisplayErrorContext(&err).to_string());
    ServiceError::new(operation, err.code(), message)
}
