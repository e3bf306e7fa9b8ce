// ABOUTME: Output store backed by CloudFormation stack outputs.
// ABOUTME: A stack that does not exist yet resolves every output to None.

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_cloudformation::Client;

use super::{OutputError, OutputStore};
use crate::aws::SdkFailure;

/// Reads outputs from a deployed CloudFormation stack.
#[derive(Clone)]
pub struct StackOutputStore {
    client: Client,
    stack: String,
}

impl StackOutputStore {
    pub fn new(sdk_config: &SdkConfig, stack: impl Into<String>) -> Self {
        Self {
            client: Client::new(sdk_config),
            stack: stack.into(),
        }
    }
}

/// CloudFormation reports a missing stack as a generic validation error.
fn is_missing_stack(failure: &SdkFailure) -> bool {
    failure.has_code("ValidationError")
        && failure
            .detail
            .as_deref()
            .is_some_and(|m| m.contains("does not exist"))
}

#[async_trait]
impl OutputStore for StackOutputStore {
    async fn get(&self, key: &str) -> Result<Option<String>, OutputError> {
        let response = match self
            .client
            .describe_stacks()
            .stack_name(&self.stack)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                let failure = SdkFailure::from_sdk(&err);
                if is_missing_stack(&failure) {
                    tracing::debug!("Stack {} does not exist yet", self.stack);
                    return Ok(None);
                }
                return Err(OutputError::Stack {
                    stack: self.stack.clone(),
                    message: failure.summary,
                });
            }
        };

        Ok(response
            .stacks()
            .first()
            .and_then(|stack| {
                stack
                    .outputs()
                    .iter()
                    .find(|output| output.output_key() == Some(key))
            })
            .and_then(|output| output.output_value())
            .map(str::to_string))
    }
}
