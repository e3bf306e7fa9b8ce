// ABOUTME: Shared AWS SDK setup and error classification.
// ABOUTME: Loads SDK config from settings and sorts SDK errors into transient or permanent.

use aws_config::{BehaviorVersion, Region, SdkConfig};
use aws_sdk_s3::config::http::HttpResponse;
use aws_sdk_s3::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};

use crate::config::AwsConfig;

/// Service error codes that signal throttling or a temporary outage.
const TRANSIENT_CODES: &[&str] = &[
    "SlowDown",
    "Throttling",
    "ThrottlingException",
    "TooManyRequests",
    "RequestTimeout",
    "RequestLimitExceeded",
    "ServiceUnavailable",
    "InternalError",
];

/// Load the shared SDK configuration, honouring configured region and profile.
pub async fn load_sdk_config(aws: &AwsConfig) -> SdkConfig {
    let mut loader = aws_config::defaults(BehaviorVersion::latest());
    if let Some(region) = &aws.region {
        loader = loader.region(Region::new(region.clone()));
    }
    if let Some(profile) = &aws.profile {
        loader = loader.profile_name(profile);
    }
    loader.load().await
}

/// A flattened view of an SDK error.
#[derive(Debug, Clone)]
pub(crate) struct SdkFailure {
    /// Service error code, e.g. `NoSuchBucket`.
    pub code: Option<String>,
    /// Service error message without the surrounding context.
    pub detail: Option<String>,
    /// Full error chain, for display.
    pub summary: String,
    pub transient: bool,
}

impl SdkFailure {
    pub fn from_sdk<E>(err: &SdkError<E, HttpResponse>) -> Self
    where
        E: ProvideErrorMetadata + std::error::Error + Send + Sync + 'static,
    {
        let summary = DisplayErrorContext(err).to_string();
        match err {
            SdkError::TimeoutError(_) | SdkError::DispatchFailure(_) | SdkError::ResponseError(_) => {
                Self {
                    code: None,
                    detail: None,
                    summary,
                    transient: true,
                }
            }
            SdkError::ServiceError(service) => {
                let code = service.err().code().map(str::to_string);
                let status = service.raw().status().as_u16();
                let transient = status >= 500
                    || status == 429
                    || code
                        .as_deref()
                        .is_some_and(|c| TRANSIENT_CODES.contains(&c));
                Self {
                    code,
                    detail: service.err().message().map(str::to_string),
                    summary,
                    transient,
                }
            }
            _ => Self {
                code: None,
                detail: None,
                summary,
                transient: false,
            },
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}
