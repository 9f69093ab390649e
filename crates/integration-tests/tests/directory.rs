//! Integration tests for the internal directory.
//!
//! These tests require:
//! - A `PostgreSQL` database with `employee_info_view` and migrations applied
//! - The directory server running with `DIRECTORY_MODE=internal`

use jcpao_directory_integration_tests::{internal_base_url, no_redirect_client, session_client};
use reqwest::StatusCode;

const EMPTY_RESULT: &str = "No attorneys found matching the search criteria.";

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_health_endpoints() {
    let client = session_client();
    let base_url = internal_base_url();

    let resp = client
        .get(format!("{base_url}/health"))
        .send()
        .await
        .expect("Failed to get health");
    assert_eq!(resp.status(), StatusCode::OK);

    let resp = client
        .get(format!("{base_url}/health/ready"))
        .send()
        .await
        .expect("Failed to get readiness");
    assert_eq!(resp.status(), StatusCode::OK);
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_directory_renders_with_security_headers() {
    let client = session_client();
    let base_url = internal_base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get directory");

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get("x-frame-options").map(|v| v.as_bytes()),
        Some(b"DENY".as_slice())
    );
    assert!(resp.headers().contains_key("x-request-id"));

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("JCPAO Assistant Prosecuting Attorney Directory"));
    assert!(body.contains("All Job Positions"));
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_search_without_match_then_reset() {
    let client = session_client();
    let base_url = internal_base_url();

    let resp = client
        .post(format!("{base_url}/filters"))
        .form(&[
            ("position", "All"),
            ("unit", "All"),
            ("location", "All"),
            ("q", "zz-no-such-attorney-zz"),
        ])
        .send()
        .await
        .expect("Failed to apply filters");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(EMPTY_RESULT));

    let resp = client
        .post(format!("{base_url}/filters/reset"))
        .send()
        .await
        .expect("Failed to reset filters");
    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(!body.contains("zz-no-such-attorney-zz"));
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_contact_view_clears_search() {
    let client = session_client();
    let base_url = internal_base_url();

    client
        .post(format!("{base_url}/filters"))
        .form(&[("q", "zz-no-such-attorney-zz")])
        .send()
        .await
        .expect("Failed to apply filters");

    let resp = client
        .post(format!("{base_url}/view"))
        .form(&[("view", "contact")])
        .send()
        .await
        .expect("Failed to switch view");
    assert_eq!(resp.status(), StatusCode::OK);

    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Attorney Name"));
    assert!(!body.contains(EMPTY_RESULT));
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_unlisted_filter_rejected() {
    let client = no_redirect_client();
    let base_url = internal_base_url();

    let resp = client
        .post(format!("{base_url}/filters"))
        .form(&[("unit", "COMBAT")])
        .send()
        .await
        .expect("Failed to post filters");

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
