// ABOUTME: Viewer-request function assembled from enabled code fragments.
// ABOUTME: Currently the only fragment redirects secondary domains to the main one.

use super::{EdgeFunctionSpec, EventType, function_name};
use crate::config::Website;
use crate::types::DomainName;

/// A piece of request-handling logic that can be enabled by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestFragment {
    /// Redirect any host other than the main domain to the main domain,
    /// keeping the path and query string.
    RedirectToMainDomain(DomainName),
}

impl RequestFragment {
    /// Fragments enabled for a website, in execution order.
    pub fn enabled_for(website: &Website) -> Vec<RequestFragment> {
        let mut fragments = Vec::new();
        if website.redirect_to_main_domain
            && let Some(primary) = website.primary_domain()
        {
            fragments.push(RequestFragment::RedirectToMainDomain(primary.clone()));
        }
        fragments
    }

    fn code(&self) -> String {
        match self {
            RequestFragment::RedirectToMainDomain(domain) => redirect_code(domain),
        }
    }
}

/// Build the request function, or `None` when no fragment is enabled.
pub fn request_function(website: &Website) -> Option<EdgeFunctionSpec> {
    let fragments = RequestFragment::enabled_for(website);
    if fragments.is_empty() {
        return None;
    }

    let body = fragments
        .iter()
        .map(RequestFragment::code)
        .collect::<Vec<_>>()
        .join("\n");

    let code = format!(
        r#"function handler(event) {{
    var request = event.request;
{body}
    return request;
}}
"#
    );

    Some(EdgeFunctionSpec {
        name: function_name(website, "request"),
        event_type: EventType::ViewerRequest,
        code,
    })
}

fn redirect_code(domain: &DomainName) -> String {
    // JSON string literals are valid JS string literals.
    let host = serde_json::Value::from(domain.as_str()).to_string();
    let origin = serde_json::Value::from(format!("https://{}", domain)).to_string();
    format!(
        r#"    var host = request.headers.host ? request.headers.host.value : "";
    if (host !== {host}) {{
        var params = [];
        for (var key in request.querystring) {{
            var param = request.querystring[key];
            var values = param.multiValue ? param.multiValue : [param];
            for (var i = 0; i < values.length; i++) {{
                params.push(values[i].value === "" ? key : key + "=" + values[i].value);
            }}
        }}
        var query = params.length > 0 ? "?" + params.join("&") : "";
        return {{
            statusCode: 301,
            statusDescription: "Moved Permanently",
            headers: {{ location: {{ value: {origin} + request.uri + query }} }}
        }};
    }}"#
    )
}
