use aws_sdk_config::{
    config::Region,
    types::{
        ConfigSnapshotDeliveryProperties, ConfigurationRecorder, DeliveryChannel,
        MaximumExecutionFrequency, RecordingFrequency, RecordingGroup, RecordingMode, ResourceType,
    },
};

use crate::{
    provider::{ConfigService, ServiceError},
    recorder::{DeliveryChannelDefinition, RecorderDefinition},
};

use super::{service_error, Aws};

impl Aws {
    fn config_client(&self, region: &str) -> aws_sdk_config::Client {
        let config = aws_sdk_config::config::Builder::from(&self.0)
            .region(Region::new(region.to_owned()))
            .build();
        aws_sdk_config::Client::from_conf(config)
    }
}

fn recording_group(recorder: &RecorderDefinition) -> RecordingGroup {
    RecordingGroup::builder()
        .all_supported(recorder.all_supported)
        .include_global_resource_types(recorder.include_global_resource_types)
        .set_resource_types(recorder.resource_types.as_ref().map(|types| {
            types
                .iter()
                .map(|t| ResourceType::from(t.as_str()))
                .collect()
        }))
        .build()
}

impl ConfigService for Aws {
    async fn put_configuration_recorder(
        &self,
        region: &str,
        recorder: &RecorderDefinition,
    ) -> Result<(), ServiceError> {
        const OP: &str = "PutConfigurationRecorder";
        let mode = RecordingMode::builder()
            .recording_frequency(RecordingFrequency::from(
                recorder.recording_frequency.as_str(),
            ))
            .build()
            .map_err(|e| ServiceError::new(OP, None, e.to_string()))?;
        let configuration_recorder = ConfigurationRecorder::builder()
            .name(&recorder.name)
            .role_arn(&recorder.role_arn)
            .recording_group(recording_group(recorder))
            .recording_mode(mode)
            .build();
        let _ = self
            .config_client(region)
            .put_configuration_recorder()
            .configuration_recorder(configuration_recorder)
            .send()
            .await
            .map_err(|e| service_error(OP, e))?;
        Ok(())
    }

    async fn put_delivery_channel(
        &self,
        region: &str,
        channel: &DeliveryChannelDefinition,
    ) -> Result<(), ServiceError> {
        let properties = ConfigSnapshotDeliveryProperties::builder()
            .delivery_frequency(MaximumExecutionFrequency::from(
                channel.delivery_frequency.as_str(),
            ))
            .build();
        let delivery_channel = DeliveryChannel::builder()
            .name(&channel.name)
            .s3_bucket_name(&channel.s3_bucket_name)
            .set_sns_topic_arn(channel.sns_topic_arn.clone())
            .config_snapshot_delivery_properties(properties)
            .build();
        let _ = self
            .config_client(region)
            .put_delivery_channel()
            .delivery_channel(delivery_channel)
            .send()
            .await
            .map_err(|e| service_error("PutDeliveryChannel", e))?;
        Ok(())
    }

    async fn start_configuration_recorder(
        &self,
        region: &str,
        recorder_name: &str,
    ) -> Result<(), ServiceError> {
        let _ = self
            .config_client(region)
            .start_configuration_recorder()
            .configuration_recorder_name(recorder_name)
            .send()
            .await
            .map_err(|e| service_error("StartConfigurationRecorder", e))?;
        Ok(())
    }
}
