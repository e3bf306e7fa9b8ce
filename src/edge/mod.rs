// ABOUTME: Edge function synthesis from validated website configuration.
// ABOUTME: Produces the response-header injector and the optional domain redirector.

mod headers;
mod request;
mod response;

pub use headers::{DEFAULT_SECURITY_HEADERS, SecurityHeaders};
pub use request::{RequestFragment, request_function};
pub use response::response_function;

use serde::Serialize;
use std::fmt;

use crate::config::Website;

/// CloudFront function names are limited to 64 characters.
const MAX_FUNCTION_NAME_LEN: usize = 64;

/// When the edge runtime invokes a function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventType {
    ViewerRequest,
    ViewerResponse,
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventType::ViewerRequest => write!(f, "viewer-request"),
            EventType::ViewerResponse => write!(f, "viewer-response"),
        }
    }
}

/// A generated edge function, handed to the provisioning layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeFunctionSpec {
    pub name: String,
    pub event_type: EventType,
    pub code: String,
}

/// The edge functions attached to a website's distribution.
#[derive(Debug, Clone, Serialize)]
pub struct EdgeFunctions {
    pub response: EdgeFunctionSpec,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<EdgeFunctionSpec>,
}

impl EdgeFunctions {
    /// Build both functions for a website.
    pub fn build(website: &Website) -> Self {
        Self {
            response: response_function(website),
            request: request_function(website),
        }
    }

    /// All generated functions, response first.
    pub fn iter(&self) -> impl Iterator<Item = &EdgeFunctionSpec> {
        std::iter::once(&self.response).chain(self.request.as_ref())
    }
}

/// `<site>-<suffix>`, shortening the site part to respect the name limit.
pub(crate) fn function_name(website: &Website, suffix: &str) -> String {
    let budget = MAX_FUNCTION_NAME_LEN - suffix.len() - 1;
    let site = website.site.as_str();
    let site = &site[..site.len().min(budget)];
    format!("{site}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SiteName;
    use std::path::PathBuf;

    fn website(site: &str) -> Website {
        Website {
            site: SiteName::new(site).unwrap(),
            path: PathBuf::from("dist"),
            custom_domain: None,
            allow_iframe: false,
            error_page: None,
            redirect_to_main_domain: false,
        }
    }

    #[test]
    fn function_name_appends_suffix() {
        assert_eq!(function_name(&website("docs"), "response"), "docs-response");
    }

    #[test]
    fn function_name_respects_length_limit() {
        let name = function_name(&website(&"a".repeat(63)), "response");
        assert_eq!(name.len(), MAX_FUNCTION_NAME_LEN);
        assert!(name.ends_with("-response"));
    }

    #[test]
    fn event_type_serializes_kebab_case() {
        let json = serde_json::to_string(&EventType::ViewerResponse).unwrap();
        assert_eq!(json, "\"viewer-response\"");
    }

    #[test]
    fn iter_yields_only_response_without_redirect() {
        let functions = EdgeFunctions::build(&website("docs"));
        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["docs-response"]);
    }
}
