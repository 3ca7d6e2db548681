use crate::provider::{ServiceError, Sts};

use super::{service_error, Aws};

impl Sts for Aws {
    async fn account_id(&self) -> Result<String, ServiceError> {
        let client = aws_sdk_sts::Client::new(&self.0);
        client
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| service_error("GetCallerIdentity", e))?
            .account
            .ok_or_else(|| ServiceError::missing("GetCallerIdentity", "account"))
    }
}
