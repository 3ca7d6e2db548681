//! The IAM role assumed by the configuration recorder.
use snafu::prelude::*;

use crate::{
    policy,
    provider::{Iam, Sts, ENTITY_ALREADY_EXISTS},
    IamSnafu, IdentitySnafu, Result,
};

pub const ROLE_NAME: &str = "AWSConfigRole";

/// AWS managed policy with the permissions the recorder needs.
pub const MANAGED_POLICY_ARN: &str = "arn:aws:iam::aws:policy/service-role/AWS_ConfigRole";

/// Customer managed policy granting delivery access to S3.
pub const S3_POLICY_NAME: &str = "AWSConfigS3AccessPolicy";

/// Makes sure the recorder role exists with both policies attached,
/// returning the role's ARN.
///
/// A role or policy that already exists is reused as is. Its documents are
/// not compared against the ones this crate would create.
pub async fn provision_role<P: Iam + Sts>(provider: &P) -> Result<String> {
    let trust_policy = policy::trust_policy().to_string();
    let role_arn = match provider.create_role(ROLE_NAME, &trust_policy).await {
        Ok(arn) => {
            log::info!("...created role {ROLE_NAME}");
            arn
        }
        Err(e) if e.is(ENTITY_ALREADY_EXISTS) => {
            log::info!("role {ROLE_NAME} already exists, reusing it");
            provider.get_role(ROLE_NAME).await.context(IamSnafu {
                action: "get role",
                name: ROLE_NAME,
            })?
        }
        Err(source) => {
            return Err(source).context(IamSnafu {
                action: "create role",
                name: ROLE_NAME,
            })
        }
    };

    attach_policy(provider, MANAGED_POLICY_ARN).await?;

    let document = policy::s3_access_policy().to_string();
    let s3_policy_arn = match provider.create_policy(S3_POLICY_NAME, &document).await {
        Ok(arn) => {
            log::info!("...created policy {S3_POLICY_NAME}");
            arn
        }
        Err(e) if e.is(ENTITY_ALREADY_EXISTS) => {
            let account_id = provider.account_id().await.context(IdentitySnafu)?;
            log::info!("policy {S3_POLICY_NAME} already exists, reusing it");
            policy::customer_policy_arn(&account_id, S3_POLICY_NAME)
        }
        Err(source) => {
            return Err(source).context(IamSnafu {
                action: "create policy",
                name: S3_POLICY_NAME,
            })
        }
    };
    attach_policy(provider, &s3_policy_arn).await?;

    Ok(role_arn)
}

async fn attach_policy<P: Iam>(provider: &P, policy_arn: &str) -> Result<()> {
    provider
        .attach_role_policy(ROLE_NAME, policy_arn)
        .await
        .context(IamSnafu {
            action: "attach policy to role",
            name: policy_arn,
        })?;
    log::info!("...attached policy {policy_arn} to role {ROLE_NAME}");
    Ok(())
}
