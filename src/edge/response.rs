// ABOUTME: Viewer-response function that adds default security headers.
// ABOUTME: Origin headers are merged over the defaults at edge execution time.

use super::headers::SecurityHeaders;
use super::{EdgeFunctionSpec, EventType, function_name};
use crate::config::Website;

/// Build the response function. Always present.
///
/// The defaults are the first argument to `Object.assign`, so any header the
/// origin already set overwrites its default.
pub fn response_function(website: &Website) -> EdgeFunctionSpec {
    let headers = SecurityHeaders::for_site(website.allow_iframe);

    let code = format!(
        r#"function handler(event) {{
    var response = event.response;
    response.headers = Object.assign({headers}, response.headers);
    return response;
}}
"#,
        headers = headers.to_object_literal()
    );

    EdgeFunctionSpec {
        name: function_name(website, "response"),
        event_type: EventType::ViewerResponse,
        code,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SiteName;
    use std::path::PathBuf;

    fn website(allow_iframe: bool) -> Website {
        Website {
            site: SiteName::new("docs").unwrap(),
            path: PathBuf::from("dist"),
            custom_domain: None,
            allow_iframe,
            error_page: None,
            redirect_to_main_domain: false,
        }
    }

    #[test]
    fn defaults_are_merged_under_origin_headers() {
        let function = response_function(&website(false));
        assert!(function.code.contains("Object.assign({"));
        assert!(function.code.contains("}, response.headers)"));
    }

    #[test]
    fn response_function_is_a_viewer_response_handler() {
        let function = response_function(&website(false));
        assert_eq!(function.event_type, EventType::ViewerResponse);
        assert_eq!(function.name, "docs-response");
        assert!(function.code.starts_with("function handler(event) {"));
        assert!(function.code.contains("return response;"));
    }

    #[test]
    fn frame_options_follow_allow_iframe() {
        assert!(
            response_function(&website(false))
                .code
                .contains(r#""x-frame-options":{"value":"SAMEORIGIN"}"#)
        );
        assert!(
            !response_function(&website(true))
                .code
                .contains("x-frame-options")
        );
    }
}
