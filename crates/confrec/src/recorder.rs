//! Per-region configuration recorder and delivery channel.
use snafu::prelude::*;

use crate::{
    params::{DeliveryFrequency, Parameters, RecordingFrequency},
    provider::ConfigService,
    DeliveryChannelSnafu, RecorderSnafu, Result, StartRecorderSnafu,
};

/// Every region gets exactly one recorder, always by this name.
pub const RECORDER_NAME: &str = "aws-config-recorder";

/// Definition of a region's configuration recorder.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RecorderDefinition {
    pub name: String,
    pub role_arn: String,
    pub recording_frequency: RecordingFrequency,
    pub all_supported: bool,
    pub include_global_resource_types: bool,
    /// Only present when not recording all supported types.
    pub resource_types: Option<Vec<String>>,
}

impl RecorderDefinition {
    pub fn new(
        params: &Parameters,
        role_arn: impl Into<String>,
        resource_types: &[String],
    ) -> Self {
        RecorderDefinition {
            name: RECORDER_NAME.to_owned(),
            role_arn: role_arn.into(),
            recording_frequency: params.recording_frequency,
            all_supported: params.all_supported,
            include_global_resource_types: params.include_global_resource_types,
            resource_types: (!params.all_supported).then(|| resource_types.to_vec()),
        }
    }
}

/// Definition of a region's delivery channel.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeliveryChannelDefinition {
    pub name: String,
    pub s3_bucket_name: String,
    pub delivery_frequency: DeliveryFrequency,
    pub sns_topic_arn: Option<String>,
}

impl DeliveryChannelDefinition {
    pub fn new(params: &Parameters, bucket: impl Into<String>) -> Self {
        DeliveryChannelDefinition {
            name: params.delivery_channel_name.clone(),
            s3_bucket_name: bucket.into(),
            delivery_frequency: params.frequency,
            sns_topic_arn: params.topic_arn.clone(),
        }
    }
}

pub async fn put_recorder<P: ConfigService>(
    provider: &P,
    region: &str,
    recorder: &RecorderDefinition,
) -> Result<()> {
    log::debug!("recorder for {region}: {recorder:?}");
    provider
        .put_configuration_recorder(region, recorder)
        .await
        .context(RecorderSnafu { region })
        .inspect_err(|e| log::error!("{e}"))?;
    log::info!("...put configuration recorder {} in {region}", recorder.name);
    Ok(())
}

pub async fn put_delivery_channel<P: ConfigService>(
    provider: &P,
    region: &str,
    channel: &DeliveryChannelDefinition,
) -> Result<()> {
    log::debug!("delivery channel for {region}: {channel:?}");
    provider
        .put_delivery_channel(region, channel)
        .await
        .context(DeliveryChannelSnafu { region })
        .inspect_err(|e| log::error!("{e}"))?;
    log::info!("...put delivery channel {} in {region}", channel.name);
    Ok(())
}

pub async fn start_recorder<P: ConfigService>(
    provider: &P,
    region: &str,
    recorder_name: &str,
) -> Result<()> {
    provider
        .start_configuration_recorder(region, recorder_name)
        .await
        .context(StartRecorderSnafu { region })
        .inspect_err(|e| log::error!("{e}"))?;
    log::info!("...started configuration recorder {recorder_name} in {region}");
    log::info!("AWS Config is recording in {region}");
    Ok(())
}
