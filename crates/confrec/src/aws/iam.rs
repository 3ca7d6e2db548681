use crate::provider::{Iam, ServiceError};

use super::{service_error, Aws};

impl Iam for Aws {
    async fn create_role(&self, name: &str, trust_policy: &str) -> Result<String, ServiceError> {
        let client = aws_sdk_iam::Client::new(&self.0);
        let role = client
            .create_role()
            .role_name(name)
            .assume_role_policy_document(trust_policy)
            .send()
            .await
            .map_err(|e| service_error("CreateRole", e))?
            .role
            .ok_or_else(|| ServiceError::missing("CreateRole", "role"))?;
        Ok(role.arn)
    }

    async fn get_role(&self, name: &str) -> Result<String, ServiceError> {
        let client = aws_sdk_iam::Client::new(&self.0);
        let role = client
            .get_role()
            .role_name(name)
            .send()
            .await
            .map_err(|e| service_error("GetRole", e))?
            .role
            .ok_or_else(|| ServiceError::missing("GetRole", "role"))?;
        Ok(role.arn)
    }

    async fn attach_role_policy(
        &self,
        role_name: &str,
        policy_arn: &str,
    ) -> Result<(), ServiceError> {
        let client = aws_sdk_iam::Client::new(&self.0);
        let _ = client
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| service_error("AttachRolePolicy", e))?;
        Ok(())
    }

    async fn create_policy(&self, name: &str, document: &str) -> Result<String, ServiceError> {
        let client = aws_sdk_iam::Client::new(&self.0);
        client
            .create_policy()
            .policy_name(name)
            .policy_document(document)
            .send()
            .await
            .map_err(|e| service_error("CreatePolicy", e))?
            .policy
            .and_then(|policy| policy.arn)
            .ok_or_else(|| ServiceError::missing("CreatePolicy", "policy arn"))
    }
}
