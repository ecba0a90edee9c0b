mod common;

use common::{client_for, text, unreachable_client};
use ngsi_cli::commands::loggers::{self, DataArgs, ListArgs, NameArgs};
use wiremock::matchers::{body_string, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LOGGERS: &str = "/v1/admin/log/loggers";
const LOGGER: &str = r#"{"logger":{"name":"test","level":"DEBUG"}}"#;

#[tokio::test]
async fn test_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOGGERS))
        .and(query_param("transient", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","loggers":[{"name":"org.apache.flume","level":"INFO"}]}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let args = ListArgs {
        transient: true,
        pretty: false,
    };
    let mut out = Vec::new();
    loggers::list(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(
        text(out),
        r#"{"success":"true","loggers":[{"name":"org.apache.flume","level":"INFO"}]}"#
    );
}

#[tokio::test]
async fn test_list_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOGGERS))
        .respond_with(ResponseTemplate::new(400).set_body_string("error"))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = loggers::list(&client_for(&server), &ListArgs::default(), &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "loggersList002 400 Bad Request error");
}

#[tokio::test]
async fn test_get_pretty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOGGERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","logger":{"name":"test","level":"DEBUG"}}"#,
        ))
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    loggers::get(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(
        text(out),
        "{\n  \"success\": \"true\",\n  \"logger\": {\n    \"name\": \"test\",\n    \"level\": \"DEBUG\"\n  }\n}"
    );
}

#[tokio::test]
async fn test_get_pretty_rejects_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LOGGERS))
        .respond_with(ResponseTemplate::new(200).set_body_string("{"))
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = loggers::get(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("loggersGet", 3));
}

#[tokio::test]
async fn test_create_sends_only_transient() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(LOGGERS))
        .and(query_param("transient", "true"))
        .and(query_param_is_missing("name"))
        .and(body_string(LOGGER))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","result":"Logger 'test' posted"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let args = DataArgs {
        data: LOGGER.into(),
        transient: true,
        pretty: false,
    };
    let mut out = Vec::new();
    loggers::create(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(text(out), r#"{"success":"true","result":"Logger 'test' posted"}"#);
}

#[tokio::test]
async fn test_create_bad_data_argument() {
    let args = DataArgs {
        data: "@".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = loggers::create(&unreachable_client(), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "loggersCreate001 file name error");
}

#[tokio::test]
async fn test_update_reads_data_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let file = dir.path().join("logger.json");
    std::fs::write(&file, LOGGER).unwrap();

    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(LOGGERS))
        .and(query_param("transient", "false"))
        .and(body_string(LOGGER))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","result":"Logger 'test' put"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let args = DataArgs {
        data: format!("@{}", file.display()),
        ..Default::default()
    };
    let mut out = Vec::new();
    loggers::update(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(text(out), r#"{"success":"true","result":"Logger 'test' put"}"#);
}

#[tokio::test]
async fn test_update_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(LOGGERS))
        .respond_with(ResponseTemplate::new(400).set_body_string("error"))
        .mount(&server)
        .await;

    let args = DataArgs {
        data: LOGGER.into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = loggers::update(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("loggersUpdate", 3));
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(LOGGERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","result":" Logger 'test' removed successfully"}"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    loggers::delete(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert!(text(out).ends_with("removed successfully\"}"));
}

#[tokio::test]
async fn test_delete_transport_error() {
    let args = NameArgs {
        name: "test".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = loggers::delete(&unreachable_client(), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("loggersDelete", 1));
}
