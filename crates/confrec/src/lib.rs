//! # Confrec
//!
//! Confrec turns on AWS Config recording for a list of regions.
//!
//! It makes sure the account has everything the recording service needs and
//! then points a recorder at it in every region:
//!
//! 1. An IAM role (`AWSConfigRole`) the config service may assume, with the
//!    AWS managed config policy and an S3 access policy attached.
//! 2. An S3 bucket, created in the first listed region, whose bucket policy
//!    lets the config service check the bucket ACL and deliver snapshots.
//! 3. Per region, a configuration recorder, a delivery channel pointing at
//!    the bucket and a started recorder.
//!
//! Every step is "create if absent, otherwise reuse". Running twice converges
//! on the same end state. Nothing is ever deleted.
//!
//! ## Usage
//!
//! Work is described as a [`Plan`] built from [`Parameters`]. The plan can be
//! printed before anything touches the account, and then applied against a
//! [`Provider`]:
//!
//! ```no_run
//! # async fn run() -> Result<(), confrec::Error> {
//! let params = confrec::Parameters::from_file("parameter.json")?;
//! let resource_types = params.load_resource_types(None::<&str>)?;
//! let plan = confrec::Plan::new(&params, resource_types);
//! println!("{plan}");
//!
//! let resolved = plan.apply(&confrec::aws::Aws::from_env().await).await?;
//! println!("bucket: {:?}", resolved.config_bucket);
//! # Ok(())
//! # }
//! ```
//!
//! ## Providers
//!
//! [`aws::Aws`] talks to the real services. Anything that implements the
//! [`provider`] traits can stand in for it, which is how the tests in this
//! crate observe every call without an AWS account.
//!
//! ## Error Handling
//!
//! All fallible operations return [`Error`]. Failures reported by a provider
//! are carried as a [`ServiceError`], whose stable `code` is the only thing
//! used to tell "already exists" apart from real failures.

pub mod aws;
pub mod bucket;
pub mod params;
pub mod plan;
pub mod policy;
pub mod provider;
pub mod recorder;
pub mod role;

pub use params::{DeliveryFrequency, Parameters, RecordingFrequency};
pub use plan::{Plan, Step};
pub use provider::{ConfigService, Iam, Provider, ServiceError, Sts, S3};

/// Top-level error enum that encompasses all errors.
#[derive(snafu::Snafu, Debug)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Could not read file '{path:?}': {source}"))]
    ReadFile {
        path: std::path::PathBuf,
        source: std::io::Error,
    },

    #[snafu(display("Could not parse file '{path:?}': {source}"))]
    ParseFile {
        path: std::path::PathBuf,
        source: serde_json::Error,
    },

    #[snafu(display("Parameter file '{path:?}' lists no regions in 'enable_region'"))]
    NoRegions { path: std::path::PathBuf },

    #[snafu(display("Could not {action} '{name}': {source}"))]
    Iam {
        action: &'static str,
        name: String,
        source: ServiceError,
    },

    #[snafu(display("Could not determine the caller's account id: {source}"))]
    Identity { source: ServiceError },

    #[snafu(display("Could not set up bucket '{bucket}' in {region}: {source}"))]
    Bucket {
        bucket: String,
        region: String,
        source: ServiceError,
    },

    #[snafu(display("Could not put configuration recorder in {region}: {source}"))]
    Recorder {
        region: String,
        source: ServiceError,
    },

    #[snafu(display("Could not put delivery channel in {region}: {source}"))]
    DeliveryChannel {
        region: String,
        source: ServiceError,
    },

    #[snafu(display("Could not start configuration recorder in {region}: {source}"))]
    StartRecorder {
        region: String,
        source: ServiceError,
    },

    #[snafu(display("{what} is unresolved when configuring {region}"))]
    Unresolved { what: &'static str, region: String },
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
