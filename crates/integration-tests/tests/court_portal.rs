//! Integration tests for the court portal verification gate.
//!
//! These tests require:
//! - A `PostgreSQL` database with `employee_info_view` and migrations applied
//! - The directory server running with `COURT_SECURITY_CODE` set
//! - The same `COURT_SECURITY_CODE` and database URL in this environment

use jcpao_directory_integration_tests::{
    base_url, court_code, court_log_count, database, no_redirect_client, session_client,
};
use reqwest::{StatusCode, header::LOCATION};

const FAILED: &str =
    "Failed to verify user. Please try again with an authorized email and security code.";

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_unverified_sees_form() {
    let client = session_client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/court"))
        .send()
        .await
        .expect("Failed to get court portal");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("16th Circuit Court of Jackson County, Missouri"));
    assert!(body.contains("Enter authorized security code"));
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_internal_directory_not_served() {
    let client = no_redirect_client();
    let base_url = base_url();

    let resp = client
        .get(format!("{base_url}/"))
        .send()
        .await
        .expect("Failed to get root");
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    for path in ["filters", "filters/reset", "view"] {
        let resp = client
            .post(format!("{base_url}/{path}"))
            .send()
            .await
            .expect("Failed to post internal route");
        assert_eq!(resp.status(), StatusCode::NOT_FOUND, "/{path}");
    }
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_gated_routes_redirect() {
    let client = no_redirect_client();
    let base_url = base_url();

    for path in ["filters", "filters/reset", "view"] {
        let resp = client
            .post(format!("{base_url}/court/{path}"))
            .form(&[("view", "main")])
            .send()
            .await
            .expect("Failed to post gated route");

        assert_eq!(resp.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            resp.headers().get(LOCATION).map(|v| v.as_bytes()),
            Some(b"/court".as_slice())
        );
    }
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_wrong_code_rejected_without_log() {
    let client = session_client();
    let base_url = base_url();
    let pool = database().await;
    let email = "integration-wrong-code@jacksongov.org";
    let before = court_log_count(&pool, email).await;

    let resp = client
        .post(format!("{base_url}/court/verify"))
        .form(&[("email", email), ("code", "definitely-not-it")])
        .send()
        .await
        .expect("Failed to post verification");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(FAILED));
    assert!(body.contains("Enter authorized security code"));
    assert_eq!(court_log_count(&pool, email).await, before);
}

#[tokio::test]
#[ignore = "Requires running directory server and database"]
async fn test_verify_logs_once_then_logout() {
    let client = session_client();
    let base_url = base_url();
    let pool = database().await;
    let email = "integration-clerk@jacksongov.org";
    let code = court_code();
    let before = court_log_count(&pool, email).await;

    let resp = client
        .post(format!("{base_url}/court/verify"))
        .form(&[("email", email), ("code", code.as_str())])
        .send()
        .await
        .expect("Failed to post verification");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains(&format!("{email} successfully verified.")));
    assert!(body.contains("All Job Positions"));
    assert_eq!(court_log_count(&pool, email).await, before + 1);

    // Already verified: no second log row
    client
        .post(format!("{base_url}/court/verify"))
        .form(&[("email", email), ("code", code.as_str())])
        .send()
        .await
        .expect("Failed to post verification");
    assert_eq!(court_log_count(&pool, email).await, before + 1);

    let resp = client
        .post(format!("{base_url}/court/logout"))
        .send()
        .await
        .expect("Failed to log out");
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Enter authorized security code"));
}
