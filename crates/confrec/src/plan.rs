//! Orchestration.
//!
//! A [`Plan`] is the ordered list of [`Step`]s a run takes. Building one
//! touches nothing remote, so it doubles as a dry run. Applying it runs the
//! steps one at a time, in order, and stops at the first failure. Work done
//! before the failure is left in place.
use snafu::prelude::*;

use crate::{
    bucket::{self, BucketDefinition},
    params::Parameters,
    provider::Provider,
    recorder::{self, DeliveryChannelDefinition, RecorderDefinition},
    role, IdentitySnafu, Result, UnresolvedSnafu,
};

/// A single remote action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Create or reuse the recorder role.
    ProvisionRole,
    /// Create or reuse the delivery bucket in `region`.
    ProvisionBucket { region: String },
    PutRecorder { region: String },
    PutDeliveryChannel { region: String },
    StartRecorder { region: String },
}

impl core::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::ProvisionRole => write!(f, "provision role '{}'", role::ROLE_NAME),
            Step::ProvisionBucket { region } => write!(f, "provision bucket in {region}"),
            Step::PutRecorder { region } => write!(f, "put configuration recorder in {region}"),
            Step::PutDeliveryChannel { region } => write!(f, "put delivery channel in {region}"),
            Step::StartRecorder { region } => write!(f, "start configuration recorder in {region}"),
        }
    }
}

/// The steps of one run, plus everything needed to carry them out.
#[derive(Clone, Debug)]
pub struct Plan {
    pub steps: Vec<Step>,
    params: Parameters,
    resource_types: Vec<String>,
}

impl core::fmt::Display for Plan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, step) in self.steps.iter().enumerate() {
            writeln!(f, "  {:>2}. {step}", i + 1)?;
        }
        Ok(())
    }
}

/// Values resolved while applying.
struct Resolved {
    role_arn: Option<String>,
    bucket: Option<String>,
}

impl Plan {
    /// Lays out the steps for `params`.
    ///
    /// The role is only provisioned when no role ARN was given, the bucket
    /// only when no bucket was given. Every region then gets its recorder,
    /// delivery channel and start, in list order.
    pub fn new(params: &Parameters, resource_types: Vec<String>) -> Self {
        let mut steps = vec![];
        if params.role_arn.is_none() {
            steps.push(Step::ProvisionRole);
        }
        if params.config_bucket.is_none() {
            steps.push(Step::ProvisionBucket {
                region: params.primary_region().to_owned(),
            });
        }
        for region in params.enable_region.iter() {
            steps.push(Step::PutRecorder {
                region: region.clone(),
            });
            steps.push(Step::PutDeliveryChannel {
                region: region.clone(),
            });
            steps.push(Step::StartRecorder {
                region: region.clone(),
            });
        }
        Plan {
            steps,
            params: params.clone(),
            resource_types,
        }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Runs every step against `provider`.
    ///
    /// Returns a copy of the parameters with the role ARN and bucket name
    /// filled in.
    pub async fn apply<P: Provider>(&self, provider: &P) -> Result<Parameters> {
        let mut resolved = Resolved {
            role_arn: self.params.role_arn.clone(),
            bucket: self.params.config_bucket.clone(),
        };
        for (i, step) in self.steps.iter().enumerate() {
            log::debug!("applying step {}/{}: {step}", i + 1, self.steps.len());
            self.apply_step(provider, step, &mut resolved).await?;
        }

        let mut params = self.params.clone();
        params.role_arn = resolved.role_arn;
        params.config_bucket = resolved.bucket;
        Ok(params)
    }

    async fn apply_step<P: Provider>(
        &self,
        provider: &P,
        step: &Step,
        resolved: &mut Resolved,
    ) -> Result<()> {
        match step {
            Step::ProvisionRole => {
                let role_arn = role::provision_role(provider)
                    .await
                    .inspect_err(|e| log::error!("could not provision IAM role: {e}"))?;
                log::info!("using role {role_arn}");
                resolved.role_arn = Some(role_arn);
            }
            Step::ProvisionBucket { region } => {
                let account_id = provider
                    .account_id()
                    .await
                    .context(IdentitySnafu)
                    .inspect_err(|e| log::error!("{e}"))?;
                log::debug!("running as account {account_id}");
                let definition =
                    BucketDefinition::new(bucket::default_bucket_name(&account_id, region), region);
                let name = bucket::provision_bucket(provider, &definition, &account_id)
                    .await
                    .inspect_err(|e| log::error!("could not provision S3 bucket: {e}"))?;
                log::info!("using bucket {name}");
                resolved.bucket = Some(name);
            }
            Step::PutRecorder { region } => {
                log::info!("configuring AWS Config in {region}");
                let role_arn = resolved.role_arn.as_deref().context(UnresolvedSnafu {
                    what: "role ARN",
                    region,
                })?;
                let definition =
                    RecorderDefinition::new(&self.params, role_arn, &self.resource_types);
                recorder::put_recorder(provider, region, &definition).await?;
            }
            Step::PutDeliveryChannel { region } => {
                let bucket = resolved.bucket.as_deref().context(UnresolvedSnafu {
                    what: "config bucket",
                    region,
                })?;
                let definition = DeliveryChannelDefinition::new(&self.params, bucket);
                recorder::put_delivery_channel(provider, region, &definition).await?;
            }
            Step::StartRecorder { region } => {
                recorder::start_recorder(provider, region, recorder::RECORDER_NAME).await?;
            }
        }
        Ok(())
    }
}
