use cep_lookup::{normalize, CepError, CepProvider, ViaCepClient};
use httpmock::prelude::*;
use std::time::Duration;

fn client_for(server: &MockServer) -> ViaCepClient {
    ViaCepClient::new(&server.url("/ws"), Duration::from_secs(2)).unwrap()
}

#[tokio::test]
async fn test_fetch_success_payload() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/72006206/json/");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "cep": "72006-206",
                    "logradouro": "Rua Rua 4A Blocos 2 e 3 Travessa 3",
                    "complemento": "",
                    "bairro": "Setor Habitacional Vicente Pires",
                    "localidade": "Brasília",
                    "uf": "DF",
                    "ibge": "5300108",
                    "ddd": "61"
                }));
        })
        .await;

    let cep = normalize(Some("72.006-206")).unwrap();
    let response = client_for(&server).fetch(&cep).await.unwrap().unwrap();

    mock.assert_async().await;
    assert_eq!(response.cep.as_deref(), Some("72006-206"));
    assert_eq!(response.localidade.as_deref(), Some("Brasília"));
    assert_eq!(response.uf.as_deref(), Some("DF"));
    assert!(!response.erro);
}

#[tokio::test]
async fn test_fetch_erro_flag_in_both_forms() {
    for body in [r#"{"erro": true}"#, r#"{"erro": "true"}"#] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ws/99999999/json/");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .body(body);
            })
            .await;

        let cep = normalize(Some("99999999")).unwrap();
        let response = client_for(&server).fetch(&cep).await.unwrap().unwrap();
        assert!(response.erro, "body {}", body);
        assert!(response.is_not_found());
    }
}

#[tokio::test]
async fn test_fetch_empty_or_null_body_is_absent() {
    for body in ["", "  ", "null"] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/ws/99999999/json/");
                then.status(200).body(body);
            })
            .await;

        let cep = normalize(Some("99999999")).unwrap();
        let response = client_for(&server).fetch(&cep).await.unwrap();
        assert!(response.is_none(), "body {:?}", body);
    }
}

#[tokio::test]
async fn test_fetch_malformed_body_is_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/72006206/json/");
            then.status(200).body("<html>Bad gateway</html>");
        })
        .await;

    let cep = normalize(Some("72006206")).unwrap();
    let err = client_for(&server).fetch(&cep).await.unwrap_err();
    assert!(matches!(err, CepError::UpstreamUnavailable { .. }));
}

#[tokio::test]
async fn test_fetch_server_error_is_unavailable() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/72006206/json/");
            then.status(500);
        })
        .await;

    let cep = normalize(Some("72006206")).unwrap();
    let err = client_for(&server).fetch(&cep).await.unwrap_err();

    assert!(matches!(err, CepError::UpstreamUnavailable { .. }));
    // single attempt, no retry
    mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_fetch_timeout_is_unavailable() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/ws/72006206/json/");
            then.status(200)
                .delay(Duration::from_millis(1500))
                .json_body(serde_json::json!({ "cep": "72006-206" }));
        })
        .await;

    let client = ViaCepClient::new(&server.url("/ws"), Duration::from_millis(200)).unwrap();
    let cep = normalize(Some("72006206")).unwrap();
    let err = client.fetch(&cep).await.unwrap_err();

    match err {
        CepError::UpstreamUnavailable { message } => assert!(message.contains("timed out")),
        other => panic!("expected UpstreamUnavailable, got {:?}", other),
    }
}

#[tokio::test]
async fn test_fetch_connection_refused_is_unavailable() {
    // nothing listens on port 9 of the loopback interface
    let client = ViaCepClient::new("http://127.0.0.1:9/ws", Duration::from_secs(2)).unwrap();
    let cep = normalize(Some("72006206")).unwrap();

    let err = client.fetch(&cep).await.unwrap_err();
    assert!(matches!(err, CepError::UpstreamUnavailable { .. }));
}
