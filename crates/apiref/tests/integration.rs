//! Integration tests for apiref using wiremock and on-disk fixtures

use apiref::{
    extract_docs, extract_docs_with_options, inspect_registry_file, ActionOption, ApirefError,
    DocsConfig, HttpMethod, LoadOptions, Locator,
};
use std::path::PathBuf;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn fixture_html() -> String {
    std::fs::read_to_string(fixture("api_docs.html")).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("apiref=debug")
        .with_test_writer()
        .try_init();
}

#[tokio::test]
async fn test_extract_from_file() {
    init_tracing();
    let location = fixture("api_docs.html");
    let extraction = extract_docs(Some(location.to_str().unwrap()))
        .await
        .unwrap();

    let keys: Vec<&str> = extraction.catalog.keys().collect();
    assert_eq!(
        keys,
        vec![
            "Account - Show",
            "Account - Update",
            "Device Groups - Assign Profile",
            "Devices - List All",
            "Devices - Retrieve One",
            "Devices - Update OS",
            "FileVault Profiles - List All",
        ]
    );
    assert_eq!(extraction.dropped, 1);

    let list = extraction.catalog.get("Devices - List All").unwrap();
    assert_eq!(
        list.description.as_deref(),
        Some("Returns a listing of all devices.\nResults are paginated.")
    );
    assert_eq!(list.http_method, Some(HttpMethod::Get));
    assert_eq!(
        list.options,
        Some(vec![ActionOption::new(
            "search",
            "Limit response to devices with matching name."
        )])
    );

    let assign = extraction
        .catalog
        .get("Device Groups - Assign Profile")
        .unwrap();
    assert_eq!(
        assign.locator,
        Locator::Path(Some(
            "/device_groups/{DEVICE_GROUP_ID}/profiles/{PROFILE_ID}".to_string()
        ))
    );
    assert_eq!(assign.positional_args, vec!["DEVICE_GROUP_ID", "PROFILE_ID"]);

    let update_os = extraction.catalog.get("Devices - Update OS").unwrap();
    assert_eq!(update_os.options, None);

    let tags: Vec<&str> = extraction
        .diagnostics
        .iter()
        .map(|d| d.tag.as_str())
        .collect();
    assert_eq!(tags, vec!["blockquote"]);
}

#[tokio::test]
async fn test_rendered_text() {
    let location = fixture("api_docs.html");
    let extraction = extract_docs(Some(location.to_str().unwrap()))
        .await
        .unwrap();
    let text = extraction.catalog.render_text();

    assert!(text.starts_with(
        "\nAccount - Show\nDesc: None\nMethod: GET\nPath: /account\nArgs: \nOptions:\n"
    ));
    assert!(text.contains(
        "\nAccount - Update\nDesc: Update account settings.\nMethod: PATCH\nPath: /account\n\
         Args: \nOptions:\n    name: Name of the account.\n    \
         apple_store_country_code: Country code of the App Store.\n"
    ));
    assert!(text.contains("Args: device_group_id, profile_id\n"));
    assert!(!text.contains("Assign Device"));
    assert!(!text.contains("Webhooks"));
    assert!(!text.contains("API Endpoint"));
}

#[tokio::test]
async fn test_extract_over_http() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", "apiref-test/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(fixture_html(), "text/html"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = DocsConfig::default().docs_url(format!("{}/", mock_server.uri()));
    let options = LoadOptions::default().user_agent("apiref-test/1.0");
    let extraction = extract_docs_with_options(None, config, options)
        .await
        .unwrap();

    assert_eq!(extraction.catalog.len(), 7);
    assert!(extraction.catalog.get("Account - Update").is_some());
}

#[tokio::test]
async fn test_http_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let url = format!("{}/docs", mock_server.uri());
    let err = extract_docs(Some(url.as_str())).await.unwrap_err();
    match err {
        ApirefError::HttpStatus { status, url: failed } => {
            assert_eq!(status, 503);
            assert_eq!(failed, url);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_page_without_content_container() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw("<html><body><h1>Maintenance</h1></body></html>", "text/html"),
        )
        .mount(&mock_server)
        .await;

    let url = format!("{}/", mock_server.uri());
    let err = extract_docs(Some(url.as_str())).await.unwrap_err();
    assert!(matches!(err, ApirefError::MissingContainer(_)));
}

#[tokio::test]
async fn test_missing_file() {
    let err = extract_docs(Some("/nonexistent/apiref/docs.html"))
        .await
        .unwrap_err();
    assert!(matches!(err, ApirefError::Io { .. }));
}

const REGISTRY_JSON: &str = r#"{
    "client": "Session",
    "resources": [
        {
            "name": "DeviceGroups",
            "methods": [
                {
                    "name": "list_all",
                    "doc": "Returns a listing of device groups.",
                    "source": "def list_all(self):\n    return self.get_data(self.url)",
                    "params": []
                }
            ]
        },
        {
            "name": "Devices",
            "methods": [
                {
                    "name": "get_device",
                    "doc": "Returns a device.\n\n        Args:\n            deviceID: device id\n        ",
                    "http_method": "GET",
                    "params": [
                        {"name": "deviceID"},
                        {"name": "search", "default": "None"}
                    ]
                },
                {"name": "push_apps_device", "legacy": true, "replaced_by": "push_apps"},
                {"name": "_build", "params": []},
                {"name": "get_data", "inherited": true}
            ]
        }
    ]
}"#;

#[tokio::test]
async fn test_inspect_registry_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("registry.json"), REGISTRY_JSON).unwrap();

    let catalog = inspect_registry_file(dir.path()).await.unwrap();
    let keys: Vec<&str> = catalog.keys().collect();
    assert_eq!(
        keys,
        vec![
            "Device Groups - List All",
            "Devices - Get Device",
            "Devices - Push Apps Device (legacy, replaced by Push Apps)",
        ]
    );

    let text = catalog.render_text();
    assert_eq!(
        text,
        "\nDevice Groups - List All\n\
         Desc: Returns a listing of device groups.\n\
         Method: GET\n\
         Call: DeviceGroups.list_all()\n\
         Args: \n\
         Options:\n\
         \nDevices - Get Device\n\
         Desc: Returns a device.\n\nArgs:\n    deviceID: device id\n\
         Method: GET\n\
         Call: Devices.get_device(deviceID, search=None)\n\
         Args: deviceID\n\
         Options:\n    search: None\n\
         \nDevices - Push Apps Device (legacy, replaced by Push Apps)\n\n"
    );
}

#[tokio::test]
async fn test_inspect_registry_invalid_json() {
    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), "{ not json").unwrap();

    let err = inspect_registry_file(file.path()).await.unwrap_err();
    assert!(matches!(err, ApirefError::InvalidRegistry(_)));
}
