mod common;

use common::{client_for, text, unreachable_client};
use ngsi_cli::commands::appenders::{self, CreateArgs, ListArgs, NameArgs, UpdateArgs};
use wiremock::matchers::{body_string, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const APPENDERS: &str = "/v1/admin/log/appenders";
const APPENDER: &str = r#"{"name":"test","class":"","layout":"","ConversionPattern":"","Threshold":""}"#;

#[tokio::test]
async fn test_list_sends_transient_false_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .and(query_param("transient", "false"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success":"true","appenders":[]}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut out = Vec::new();
    appenders::list(&client_for(&server), &ListArgs::default(), &mut out)
        .await
        .unwrap();
    assert_eq!(text(out), r#"{"success":"true","appenders":[]}"#);
}

#[tokio::test]
async fn test_list_pretty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .and(query_param("transient", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","appenders":[{"name":"DAILY","active":"true"}]}"#,
        ))
        .mount(&server)
        .await;

    let args = ListArgs {
        transient: true,
        pretty: true,
    };
    let mut out = Vec::new();
    appenders::list(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    let expected = "{\n  \"success\": \"true\",\n  \"appenders\": [\n    {\n      \"name\": \"DAILY\",\n      \"active\": \"true\"\n    }\n  ]\n}";
    assert_eq!(text(out), expected);
}

#[tokio::test]
async fn test_list_transport_error() {
    let mut out = Vec::new();
    let err = appenders::list(&unreachable_client(), &ListArgs::default(), &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("appendersList", 1));
}

#[tokio::test]
async fn test_list_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .respond_with(ResponseTemplate::new(400).set_body_string("error"))
        .mount(&server)
        .await;

    let mut out = Vec::new();
    let err = appenders::list(&client_for(&server), &ListArgs::default(), &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.errno, 2);
    assert_eq!(err.message, "400 Bad Request error");
    assert_eq!(err.to_string(), "appendersList002 400 Bad Request error");
}

#[tokio::test]
async fn test_list_pretty_rejects_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"success\""))
        .mount(&server)
        .await;

    let args = ListArgs {
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::list(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.errno, 3);
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_get_sends_name() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string(APPENDER))
        .expect(1)
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    appenders::get(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(text(out), APPENDER);
}

#[tokio::test]
async fn test_get_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_string(r#"{"success":"false","result":"Appender name 'test' not found"}"#),
        )
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::get(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "appendersGet002 404 Not Found {\"success\":\"false\",\"result\":\"Appender name 'test' not found\"}");
}

#[tokio::test]
async fn test_create_posts_data_as_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(APPENDERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "true"))
        .and(header("content-type", "application/json"))
        .and(body_string(APPENDER))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success":"true","result":"Appender 'test' posted"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let args = CreateArgs {
        name: Some("test".into()),
        data: APPENDER.into(),
        transient: true,
        pretty: false,
    };
    let mut out = Vec::new();
    appenders::create(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(text(out), r#"{"success":"true","result":"Appender 'test' posted"}"#);
}

#[tokio::test]
async fn test_create_without_name_omits_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(APPENDERS))
        .and(query_param_is_missing("name"))
        .and(query_param("transient", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
        .expect(1)
        .mount(&server)
        .await;

    let args = CreateArgs {
        data: APPENDER.into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    appenders::create(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_create_requires_data() {
    let server = MockServer::start().await;
    let args = CreateArgs {
        name: Some("test".into()),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::create(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.errno, 1);
    assert_eq!(err.message, "data is empty");
}

#[tokio::test]
async fn test_create_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(APPENDERS))
        .respond_with(ResponseTemplate::new(400).set_body_string("error"))
        .mount(&server)
        .await;

    let args = CreateArgs {
        data: APPENDER.into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::create(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("appendersCreate", 3));
}

#[tokio::test]
async fn test_update_puts_data() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(APPENDERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "false"))
        .and(body_string(APPENDER))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success":"true","result":"Appender 'test' put"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let args = UpdateArgs {
        name: "test".into(),
        data: APPENDER.into(),
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    appenders::update(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(
        text(out),
        "{\n  \"success\": \"true\",\n  \"result\": \"Appender 'test' put\"\n}"
    );
}

#[tokio::test]
async fn test_update_transport_error() {
    let args = UpdateArgs {
        name: "test".into(),
        data: APPENDER.into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::update(&unreachable_client(), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("appendersUpdate", 2));
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(APPENDERS))
        .and(query_param("name", "test"))
        .and(query_param("transient", "true"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string(r#"{"success":"true","result":" Appender 'test' removed successfully"}"#),
        )
        .expect(1)
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        transient: true,
        pretty: false,
    };
    let mut out = Vec::new();
    appenders::delete(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert!(text(out).contains("removed successfully"));
}

#[tokio::test]
async fn test_delete_status_error() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(APPENDERS))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::delete(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "appendersDelete002 500 Internal Server Error boom");
}

#[tokio::test]
async fn test_update_pretty_rejects_invalid_json() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(APPENDERS))
        .respond_with(ResponseTemplate::new(200).set_body_string("{"))
        .mount(&server)
        .await;

    let args = UpdateArgs {
        name: "test".into(),
        data: APPENDER.into(),
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    let err = appenders::update(&client_for(&server), &args, &mut out)
        .await
        .unwrap_err();
    assert_eq!((err.function, err.errno), ("appendersUpdate", 4));
}

#[tokio::test]
async fn test_get_pretty_keeps_numbers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(APPENDERS))
        .and(query_param("name", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"success":"true","size":12345678901234567890123,"ratio":0.10000000000000001}"#,
        ))
        .mount(&server)
        .await;

    let args = NameArgs {
        name: "test".into(),
        pretty: true,
        ..Default::default()
    };
    let mut out = Vec::new();
    appenders::get(&client_for(&server), &args, &mut out)
        .await
        .unwrap();
    assert_eq!(
        text(out),
        "{\n  \"success\": \"true\",\n  \"size\": 12345678901234567890123,\n  \"ratio\": 0.10000000000000001\n}"
    );
}
