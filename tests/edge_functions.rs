// ABOUTME: Integration tests for edge function generation.
// ABOUTME: Checks header tables, iframe handling, and when the redirect function exists.

mod support;

use skiff::edge::{DEFAULT_SECURITY_HEADERS, EdgeFunctions, EventType, SecurityHeaders};
use support::fixtures::website_from_yaml;

fn build(extra: &str) -> EdgeFunctions {
    website_functions(&format!("site: landing\npath: dist\n{extra}"))
}

fn website_functions(yaml: &str) -> EdgeFunctions {
    EdgeFunctions::build(&website_from_yaml(yaml))
}

mod response {
    use super::*;

    #[test]
    fn default_headers_are_injected() {
        let functions = build("");
        let response = &functions.response;

        assert_eq!(response.name, "landing-response");
        assert_eq!(response.event_type, EventType::ViewerResponse);
        assert!(response.code.starts_with("function handler(event) {"));
        for (name, value) in DEFAULT_SECURITY_HEADERS {
            let entry = format!(r#""{name}":{{"value":"{value}"}}"#);
            assert!(response.code.contains(&entry), "missing {entry}");
        }
    }

    #[test]
    fn iframes_allowed_drops_frame_options() {
        let functions = build("security:\n  allow_iframe: true\n");
        assert!(!functions.response.code.contains("x-frame-options"));
        assert!(functions.response.code.contains("strict-transport-security"));
    }

    #[test]
    fn iframes_disallowed_keeps_sameorigin() {
        let functions = build("security:\n  allow_iframe: false\n");
        assert!(
            functions
                .response
                .code
                .contains(r#""x-frame-options":{"value":"SAMEORIGIN"}"#)
        );
    }

    #[test]
    fn origin_headers_take_precedence() {
        let functions = build("");
        assert!(
            functions
                .response
                .code
                .contains("Object.assign({")
        );
        assert!(functions.response.code.contains("}, response.headers)"));
    }

    #[test]
    fn removal_set_is_applied_to_the_base_table() {
        let headers = SecurityHeaders::without(&["x-xss-protection", "not-a-header"]);
        assert_eq!(headers.len(), DEFAULT_SECURITY_HEADERS.len() - 1);
        assert!(!headers.contains("x-xss-protection"));
        assert_eq!(headers.get("x-content-type-options"), Some("nosniff"));
    }
}

mod request {
    use super::*;

    #[test]
    fn absent_without_redirect_flag() {
        let functions = build("domain: www.example.com\ncertificate: arn:cert\n");
        assert!(functions.request.is_none());
        assert_eq!(functions.iter().count(), 1);
    }

    #[test]
    fn absent_without_domains() {
        let functions = build("redirect_to_main_domain: true\n");
        assert!(functions.request.is_none());
    }

    #[test]
    fn present_with_redirect_and_domain() {
        let functions = build(
            "domain: [www.example.com, example.com]\ncertificate: arn:cert\nredirect_to_main_domain: true\n",
        );
        let request = functions.request.as_ref().expect("request function");

        assert_eq!(request.name, "landing-request");
        assert_eq!(request.event_type, EventType::ViewerRequest);
        assert!(request.code.contains(r#"host !== "www.example.com""#));
        assert!(request.code.contains("statusCode: 301"));
        assert!(request.code.contains("request.uri + query"));
        assert_eq!(functions.iter().count(), 2);
    }

    #[test]
    fn specs_serialize_with_kebab_case_event_types() {
        let functions = build(
            "domain: example.com\ncertificate: arn:cert\nredirect_to_main_domain: true\n",
        );
        let json = serde_json::to_value(&functions).unwrap();
        assert_eq!(json["response"]["event_type"], "viewer-response");
        assert_eq!(json["request"]["event_type"], "viewer-request");
    }
}

mod naming {
    use super::*;

    #[test]
    fn long_site_names_fit_the_function_name_limit() {
        let site = "a".repeat(63);
        let functions = website_functions(&format!("site: {site}\npath: dist\n"));
        assert!(functions.response.name.len() <= 64);
        assert!(functions.response.name.ends_with("-response"));
    }
}
