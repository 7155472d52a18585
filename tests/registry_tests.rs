/// End-to-end lookups against a mock actor registry
use aktor_client::{
    token::StaticTokenProvider,
    transport::{ReqwestTransport, ReqwestTransportConfig},
    AktorClient, AktorClientConfig, AktorError, BlockingAktorClient, CONNECTIVITY_FAILURE_STATUS,
};
use mockito::Matcher;
use std::sync::Arc;
use std::time::Duration;
use tokio_test::{assert_err, assert_ok};

const FNR: &str = "12345678901";

fn client(endpoint_url: String) -> AktorClient {
    let transport = ReqwestTransport::new(&ReqwestTransportConfig {
        user_agent: "aktor-client-tests".to_string(),
        timeout: Duration::from_secs(5),
    })
    .unwrap();

    AktorClient::new(
        AktorClientConfig {
            consumer_id: "srvhelsearbeidsgiver".to_string(),
            endpoint_url,
            timeout: None,
        },
        Arc::new(StaticTokenProvider::new("test-token")),
        Arc::new(transport),
    )
}

fn identer_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("gjeldende".into(), "true".into()),
        Matcher::UrlEncoded("identgruppe".into(), "AktoerId".into()),
    ])
}

#[tokio::test]
async fn test_resolves_aktor_id() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .match_header("authorization", "Bearer test-token")
        .match_header("nav-consumer-id", "srvhelsearbeidsgiver")
        .match_header("nav-personidenter", FNR)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"12345678901": [{"ident": "1000000000001"}]}"#)
        .create_async()
        .await;

    let aktor_id = assert_ok!(client(server.url()).get_aktor_id(FNR).await);

    assert_eq!(aktor_id, "1000000000001");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_wrapped_response_from_registry() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"12345678901": {"identer": [
                {"ident": "1000000000001", "identgruppe": "AktoerId", "gjeldende": true}
            ], "feilmelding": null}}"#,
        )
        .create_async()
        .await;

    let aktor_id = assert_ok!(client(server.url()).get_aktor_id(FNR).await);
    assert_eq!(aktor_id, "1000000000001");
}

#[tokio::test]
async fn test_empty_list_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .with_status(200)
        .with_body(r#"{"12345678901": []}"#)
        .create_async()
        .await;

    let err = assert_err!(client(server.url()).get_aktor_id(FNR).await);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_registry_404() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .with_status(404)
        .create_async()
        .await;

    let err = assert_err!(client(server.url()).get_aktor_id(FNR).await);
    assert!(matches!(err, AktorError::HttpStatus { status: 404 }));
}

#[tokio::test]
async fn test_registry_500() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .with_status(500)
        .with_body(r#"{"message": "internal"}"#)
        .create_async()
        .await;

    let err = assert_err!(client(server.url()).get_aktor_id(FNR).await);
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_shared_reqwest_client() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .match_header("user-agent", "shared-client")
        .with_status(200)
        .with_body(r#"{"12345678901": [{"ident": "1000000000001"}]}"#)
        .create_async()
        .await;

    let http_client = reqwest::Client::builder()
        .user_agent("shared-client")
        .build()
        .unwrap();
    let client = AktorClient::new(
        AktorClientConfig {
            consumer_id: "srvhelsearbeidsgiver".to_string(),
            endpoint_url: server.url(),
            timeout: Some(Duration::from_secs(5)),
        },
        Arc::new(StaticTokenProvider::new("test-token")),
        Arc::new(ReqwestTransport::with_client(http_client)),
    );

    let aktor_id = assert_ok!(client.get_aktor_id(FNR).await);
    assert_eq!(aktor_id, "1000000000001");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_null_entry_from_registry_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .with_status(200)
        .with_body(r#"{"12345678901": null}"#)
        .create_async()
        .await;

    let err = assert_err!(client(server.url()).get_aktor_id(FNR).await);
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let err = assert_err!(
        client(format!("http://127.0.0.1:{}", port))
            .get_aktor_id(FNR)
            .await
    );

    assert!(matches!(err, AktorError::Connectivity { .. }));
    assert_eq!(err.status(), Some(CONNECTIVITY_FAILURE_STATUS));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_blocking_client() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/identer")
        .match_query(identer_query())
        .match_header("nav-personidenter", FNR)
        .with_status(200)
        .with_body(r#"{"12345678901": [{"ident": "1000000000001"}, {"ident": "1000000000009"}]}"#)
        .create();

    let blocking = BlockingAktorClient::new(client(server.url())).unwrap();

    assert_eq!(blocking.inner().config().endpoint_url, server.url());
    assert_eq!(blocking.get_aktor_id(FNR).unwrap(), "1000000000001");
    mock.assert();
}
