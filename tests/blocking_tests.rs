use ghupdate::blocking::VersionChecker;
use ghupdate::{VersionCheckError, VersionCheckerConfig};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LATEST_PATH: &str = "/repos/test/repo/releases/latest";

/// Starts a mock API serving `response`. The checker itself runs on the test thread.
fn start_server(runtime: &Runtime, response: ResponseTemplate) -> MockServer {
    runtime.block_on(async {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(LATEST_PATH))
            .respond_with(response)
            .mount(&mock_server)
            .await;

        mock_server
    })
}

fn checker(current_version: &str, mock_server: &MockServer) -> VersionChecker {
    let config = VersionCheckerConfig::new(current_version, "test", "repo")
        .ignored_chars(['.', 'v'])
        .base_url(mock_server.uri());

    VersionChecker::with_config(config).unwrap()
}

#[test]
fn test_blocking_update_available() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(
        &runtime,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": "v1.0.0" })),
    );

    let checker = checker("v0.3.5", &mock_server);

    assert_eq!(checker.latest_tag().unwrap(), "v1.0.0");
    assert_eq!(checker.latest_version_code().unwrap(), 100);
    assert!(checker.is_update_available().unwrap());
}

#[test]
fn test_blocking_no_update_when_on_latest() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(
        &runtime,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "tag_name": "v0.3.5" })),
    );

    let checker = checker("v0.3.5", &mock_server);

    assert!(!checker.is_update_available().unwrap());
}

#[test]
fn test_blocking_not_found_is_unreachable() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(&runtime, ResponseTemplate::new(404).set_body_string("Not Found"));

    let checker = checker("v0.3.5", &mock_server);

    assert!(matches!(
        checker.is_update_available(),
        Err(VersionCheckError::RepositoryUnreachable { .. })
    ));
}

#[test]
fn test_blocking_missing_tag_name_is_malformed() {
    let runtime = Runtime::new().unwrap();
    let mock_server = start_server(
        &runtime,
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "no tag" })),
    );

    let checker = checker("v0.3.5", &mock_server);

    assert!(matches!(
        checker.latest_tag(),
        Err(VersionCheckError::MalformedResponse { .. })
    ));
}

#[test]
fn test_blocking_unreachable_host_without_runtime() {
    // No runtime anywhere in this test; nothing listens on port 1
    let config = VersionCheckerConfig::new("v0.3.5", "test", "repo")
        .ignored_chars(['.', 'v'])
        .base_url("http://127.0.0.1:1");
    let checker = VersionChecker::with_config(config).unwrap();

    assert!(matches!(
        checker.is_update_available(),
        Err(VersionCheckError::RepositoryUnreachable { .. })
    ));
}
