//! Policy documents.
use serde_json::json;

pub const POLICY_VERSION: &str = "2012-10-17";

/// Service principal of AWS Config.
pub const CONFIG_SERVICE_PRINCIPAL: &str = "config.amazonaws.com";

/// Trust policy letting the config service assume a role.
pub fn trust_policy() -> serde_json::Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [{
            "Effect": "Allow",
            "Principal": {
                "Service": CONFIG_SERVICE_PRINCIPAL
            },
            "Action": "sts:AssumeRole"
        }]
    })
}

/// Identity policy granting the role delivery access to any bucket.
pub fn s3_access_policy() -> serde_json::Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [{
            "Effect": "Allow",
            "Action": [
                "s3:PutObject",
                "s3:GetBucketAcl"
            ],
            "Resource": [
                "arn:aws:s3:::*",
                "arn:aws:s3:::*/AWSLogs/*"
            ]
        }]
    })
}

/// Bucket policy letting the config service check the bucket ACL and put
/// snapshots under `AWSLogs/{account_id}/`.
pub fn bucket_policy(bucket: &str, account_id: &str) -> serde_json::Value {
    json!({
        "Version": POLICY_VERSION,
        "Statement": [
            {
                "Sid": "AWSConfigBucketPermissionsCheck",
                "Effect": "Allow",
                "Principal": {"Service": CONFIG_SERVICE_PRINCIPAL},
                "Action": "s3:GetBucketAcl",
                "Resource": format!("arn:aws:s3:::{bucket}")
            },
            {
                "Sid": "AWSConfigBucketDelivery",
                "Effect": "Allow",
                "Principal": {"Service": CONFIG_SERVICE_PRINCIPAL},
                "Action": "s3:PutObject",
                "Resource": format!("arn:aws:s3:::{bucket}/AWSLogs/{account_id}/*"),
                "Condition": {
                    "StringEquals": {
                        "s3:x-amz-acl": "bucket-owner-full-control"
                    }
                }
            }
        ]
    })
}

/// ARN of a customer managed policy.
pub fn customer_policy_arn(account_id: &str, policy_name: &str) -> String {
    format!("arn:aws:iam::{account_id}:policy/{policy_name}")
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn bucket_policy_is_scoped_to_bucket_and_account() {
        let policy = bucket_policy("my-bucket", "123456789012");
        let statements = policy["Statement"].as_array().unwrap();
        assert_eq!(2, statements.len());
        assert_eq!("arn:aws:s3:::my-bucket", statements[0]["Resource"]);
        assert_eq!("s3:GetBucketAcl", statements[0]["Action"]);
        assert_eq!(
            "arn:aws:s3:::my-bucket/AWSLogs/123456789012/*",
            statements[1]["Resource"]
        );
        assert_eq!(
            "bucket-owner-full-control",
            statements[1]["Condition"]["StringEquals"]["s3:x-amz-acl"]
        );
    }

    #[test]
    fn trust_policy_names_config_service() {
        let policy = trust_policy();
        assert_eq!(
            CONFIG_SERVICE_PRINCIPAL,
            policy["Statement"][0]["Principal"]["Service"]
        );
        assert_eq!("sts:AssumeRole", policy["Statement"][0]["Action"]);
    }

    #[test]
    fn customer_policy_arn_uses_account() {
        assert_eq!(
            "arn:aws:iam::123456789012:policy/AWSConfigS3AccessPolicy",
            customer_policy_arn("123456789012", "AWSConfigS3AccessPolicy")
        );
    }
}
