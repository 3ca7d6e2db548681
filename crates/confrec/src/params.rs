//! Run parameters.
//!
//! Parameters are read once from a JSON document whose field names follow
//! the AWS Config console's naming (`RoleARN`, `ConfigBucket`,
//! `enable_region`, ...). After loading they are never mutated; applying a
//! [`Plan`](crate::Plan) returns a copy with the resolved role and bucket
//! filled in.
use std::path::{Path, PathBuf};

use snafu::prelude::*;

use crate::{NoRegionsSnafu, ParseFileSnafu, ReadFileSnafu, Result};

/// Where the resource-type list lives when the parameters don't say.
pub const DEFAULT_RESOURCE_TYPES_PATH: &str = "resource_types.json";

/// How often the recorder records configuration changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RecordingFrequency {
    #[default]
    #[serde(rename = "CONTINUOUS")]
    Continuous,
    #[serde(rename = "DAILY")]
    Daily,
}

impl RecordingFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordingFrequency::Continuous => "CONTINUOUS",
            RecordingFrequency::Daily => "DAILY",
        }
    }
}

impl core::fmt::Display for RecordingFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How often configuration snapshots are delivered to the bucket.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DeliveryFrequency {
    #[serde(rename = "One_Hour")]
    OneHour,
    #[serde(rename = "Three_Hours")]
    ThreeHours,
    #[serde(rename = "Six_Hours")]
    SixHours,
    #[serde(rename = "Twelve_Hours")]
    TwelveHours,
    #[default]
    #[serde(rename = "TwentyFour_Hours")]
    TwentyFourHours,
}

impl DeliveryFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryFrequency::OneHour => "One_Hour",
            DeliveryFrequency::ThreeHours => "Three_Hours",
            DeliveryFrequency::SixHours => "Six_Hours",
            DeliveryFrequency::TwelveHours => "Twelve_Hours",
            DeliveryFrequency::TwentyFourHours => "TwentyFour_Hours",
        }
    }
}

impl core::fmt::Display for DeliveryFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Treats both `""` and `null` as an absent value.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn default_true() -> bool {
    true
}

fn default_delivery_channel_name() -> String {
    "default".to_owned()
}

/// The flat parameter record driving a run.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Parameters {
    /// Role the recorder assumes. Provisioned when absent.
    #[serde(rename = "RoleARN", default, deserialize_with = "empty_as_none")]
    pub role_arn: Option<String>,

    /// Bucket snapshots are delivered to. Provisioned in the first region
    /// when absent.
    #[serde(rename = "ConfigBucket", default, deserialize_with = "empty_as_none")]
    pub config_bucket: Option<String>,

    /// Regions to enable, in the order they are processed.
    #[serde(rename = "enable_region")]
    pub enable_region: Vec<String>,

    #[serde(rename = "RecordingFrequency", default)]
    pub recording_frequency: RecordingFrequency,

    /// Record every supported resource type instead of an explicit list.
    #[serde(rename = "AllSupported", default = "default_true")]
    pub all_supported: bool,

    #[serde(rename = "IncludeGlobalResourceTypes", default)]
    pub include_global_resource_types: bool,

    #[serde(rename = "DeliveryChannelName", default = "default_delivery_channel_name")]
    pub delivery_channel_name: String,

    /// Snapshot delivery frequency.
    #[serde(rename = "Frequency", default)]
    pub frequency: DeliveryFrequency,

    /// Optional SNS topic notified on delivery.
    #[serde(rename = "TopicArn", default, deserialize_with = "empty_as_none")]
    pub topic_arn: Option<String>,

    /// Path of the resource-type list, relative to the working directory.
    #[serde(rename = "ResourceTypes", default, deserialize_with = "empty_as_none")]
    pub resource_types: Option<String>,
}

/// Reads and deserializes a JSON file, logging on failure.
pub fn read_json_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    log::debug!("reading {path:?}");
    let result = std::fs::read_to_string(path)
        .context(ReadFileSnafu { path })
        .and_then(|contents| serde_json::from_str(&contents).context(ParseFileSnafu { path }));
    if let Err(e) = &result {
        log::error!("{e}");
    }
    result
}

impl Parameters {
    /// Parses parameters from a JSON string.
    ///
    /// `origin` is only used to name the source in errors.
    pub fn from_json(json: &str, origin: impl AsRef<Path>) -> Result<Self> {
        let path = origin.as_ref();
        let params: Self = serde_json::from_str(json).context(ParseFileSnafu { path })?;
        params.validate(path)?;
        Ok(params)
    }

    /// Reads parameters from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let params: Self = read_json_file(path.as_ref())?;
        params.validate(path.as_ref())?;
        Ok(params)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        ensure!(
            !self.enable_region.is_empty(),
            NoRegionsSnafu {
                path: path.to_path_buf()
            }
        );
        Ok(())
    }

    /// The region the config bucket is created in.
    pub fn primary_region(&self) -> &str {
        // non-empty, checked on load
        self.enable_region.first().map(String::as_str).unwrap_or_default()
    }

    /// Where the resource-type list is read from.
    pub fn resource_types_path(&self) -> PathBuf {
        PathBuf::from(
            self.resource_types
                .as_deref()
                .unwrap_or(DEFAULT_RESOURCE_TYPES_PATH),
        )
    }

    /// Loads the explicit resource-type list, if one is needed.
    ///
    /// When every supported type is recorded the list is never consulted, so
    /// this returns an empty list without touching the filesystem.
    pub fn load_resource_types(
        &self,
        override_path: Option<impl AsRef<Path>>,
    ) -> Result<Vec<String>> {
        if self.all_supported {
            log::debug!("recording all supported resource types, skipping resource type list");
            return Ok(vec![]);
        }
        let path = override_path
            .map(|p| p.as_ref().to_path_buf())
            .unwrap_or_else(|| self.resource_types_path());
        let types: Vec<String> = read_json_file(&path)?;
        if types.is_empty() {
            log::warn!("resource type list {path:?} is empty, the recorder will record nothing");
        }
        log::info!("loaded {} resource types from {path:?}", types.len());
        Ok(types)
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(std::env!("CARGO_MANIFEST_DIR"))
            .join("fixtures")
            .join(name)
    }

    #[test]
    fn empty_strings_are_absent() {
        let params = Parameters::from_json(
            r#"{
                "RoleARN": "",
                "ConfigBucket": "",
                "enable_region": ["us-east-1", "eu-west-1"],
                "RecordingFrequency": "CONTINUOUS",
                "AllSupported": true,
                "IncludeGlobalResourceTypes": true,
                "DeliveryChannelName": "dc1",
                "Frequency": "TwentyFour_Hours",
                "TopicArn": ""
            }"#,
            "inline",
        )
        .unwrap();
        assert_eq!(None, params.role_arn);
        assert_eq!(None, params.config_bucket);
        assert_eq!(None, params.topic_arn);
        assert_eq!("us-east-1", params.primary_region());
        assert_eq!(DeliveryFrequency::TwentyFourHours, params.frequency);
        assert_eq!(RecordingFrequency::Continuous, params.recording_frequency);
        assert_eq!("dc1", params.delivery_channel_name);
    }

    #[test]
    fn defaults_fill_missing_fields() {
        let params = Parameters::from_json(r#"{"enable_region": ["eu-central-1"]}"#, "inline")
            .unwrap();
        assert!(params.all_supported);
        assert!(!params.include_global_resource_types);
        assert_eq!("default", params.delivery_channel_name);
        assert_eq!(
            PathBuf::from(DEFAULT_RESOURCE_TYPES_PATH),
            params.resource_types_path()
        );
    }

    #[test]
    fn no_regions_is_an_error() {
        let err = Parameters::from_json(r#"{"enable_region": []}"#, "inline").unwrap_err();
        assert!(matches!(err, crate::Error::NoRegions { .. }), "{err}");
    }

    #[test]
    fn unknown_frequency_is_a_parse_error() {
        let err = Parameters::from_json(
            r#"{"enable_region": ["us-east-1"], "Frequency": "Weekly"}"#,
            "inline",
        )
        .unwrap_err();
        assert!(matches!(err, crate::Error::ParseFile { .. }), "{err}");
    }

    #[test]
    fn reads_parameter_fixture() {
        let params = Parameters::from_file(fixture("parameter.json")).unwrap();
        assert_eq!(
            Some("arn:aws:iam::123456789012:role/AWSConfigRole"),
            params.role_arn.as_deref()
        );
        assert_eq!(Some("config-archive"), params.config_bucket.as_deref());
        assert_eq!(
            vec!["ap-southeast-2".to_owned(), "us-west-2".to_owned()],
            params.enable_region
        );
        assert_eq!(RecordingFrequency::Daily, params.recording_frequency);
        assert_eq!(DeliveryFrequency::SixHours, params.frequency);
        assert!(!params.all_supported);
        assert_eq!(
            Some("arn:aws:sns:ap-southeast-2:123456789012:config-topic"),
            params.topic_arn.as_deref()
        );
    }

    #[test]
    fn resource_types_keep_file_order() {
        let params = Parameters::from_file(fixture("parameter.json")).unwrap();
        let types = params
            .load_resource_types(Some(fixture("resource_types.json")))
            .unwrap();
        assert_eq!(
            vec![
                "AWS::EC2::Instance".to_owned(),
                "AWS::S3::Bucket".to_owned(),
                "AWS::IAM::Role".to_owned(),
            ],
            types
        );
    }

    #[test]
    fn all_supported_skips_resource_types_file() {
        let params = Parameters::from_json(r#"{"enable_region": ["us-east-1"]}"#, "inline")
            .unwrap();
        let types = params
            .load_resource_types(Some("/definitely/not/here.json"))
            .unwrap();
        assert!(types.is_empty());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = Parameters::from_file(fixture("missing.json")).unwrap_err();
        assert!(matches!(err, crate::Error::ReadFile { .. }), "{err}");
    }
}
