use std::{sync::Arc, time::Duration};

use chrono::NaiveDate;
use identity_check::{
    config::CrossCoreApiConfig,
    factory::ServiceFactory,
    gateway::transport::ReqwestTransport,
    identity::{Address, AddressType, PersonIdentity},
    interrupt::Interrupt,
    service::IdentityCheckOutcome,
    signer::{HmacSigner, Signer},
};
use wiremock::{
    matchers::{header, header_exists, method, path},
    Mock, MockServer, ResponseTemplate,
};

const HMAC_KEY: &str = "experian-secret-key";

fn person() -> PersonIdentity {
    PersonIdentity {
        first_name: "Jane".to_owned(),
        surname: "Doe".to_owned(),
        date_of_birth: NaiveDate::from_ymd_opt(1976, 12, 26).unwrap(),
        addresses: vec![Address {
            address_type: AddressType::Current,
            post_town: "PostTown".to_owned(),
            street: "Street Name".to_owned(),
            postal: "Postcode".to_owned(),
        }],
    }
}

fn config(endpoint_uri: String) -> CrossCoreApiConfig {
    CrossCoreApiConfig {
        tenant_id: "tenant-id".to_owned(),
        endpoint_uri,
        hmac_key: HMAC_KEY.to_owned(),
        connect_timeout_secs: Some(2),
        client_identity_pem: None,
    }
}

#[tokio::test]
async fn posts_signed_body_and_returns_response_verbatim() {
    let _ = env_logger::builder().is_test(true).try_init();
    let server = MockServer::start().await;
    let provider_body = r#"{"responseHeader":{"overallResponse":{"decision":"ACCEPT"}}}"#;

    Mock::given(method("POST"))
        .and(path("/identity-check"))
        .and(header("Accept", "application/json"))
        .and(header("Content-Type", "application/json"))
        .and(header_exists("hmac-signature"))
        .respond_with(ResponseTemplate::new(200).set_body_string(provider_body))
        .expect(1)
        .mount(&server)
        .await;

    let service =
        ServiceFactory::from_config(&config(format!("{}/identity-check", server.uri()))).unwrap();

    let outcome = service.verify_identity(&person(), &Interrupt::new()).await;

    assert_eq!(
        outcome,
        IdentityCheckOutcome::Response(provider_body.to_owned())
    );

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    let body = String::from_utf8(received[0].body.clone()).unwrap();
    let expected_signature = HmacSigner::new(HMAC_KEY)
        .unwrap()
        .sign_payload(Some(&body))
        .unwrap();
    let signature = received[0]
        .headers
        .get("hmac-signature")
        .unwrap()
        .to_str()
        .unwrap();
    assert_eq!(signature, expected_signature);

    let sent: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(sent["header"]["tenantId"], "tenant-id");
    assert_eq!(
        sent["payload"]["contacts"][0]["person"]["personDetails"]["dateOfBirth"],
        "1976-12-26"
    );
}

#[tokio::test]
async fn error_status_body_is_still_returned() {
    let server = MockServer::start().await;
    let provider_body = r#"{"errors":[{"code":"E001"}]}"#;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string(provider_body))
        .mount(&server)
        .await;

    let service = ServiceFactory::from_config(&config(server.uri())).unwrap();

    let outcome = service.verify_identity(&person(), &Interrupt::new()).await;

    assert_eq!(
        outcome,
        IdentityCheckOutcome::Response(provider_body.to_owned())
    );
}

#[tokio::test]
async fn unreachable_provider_is_unavailable() {
    // Reserve a free port, then release it so nothing is listening there.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let service = ServiceFactory::from_config(&config(uri)).unwrap();

    let outcome = service.verify_identity(&person(), &Interrupt::new()).await;

    assert_eq!(outcome, IdentityCheckOutcome::Unavailable);
}

#[tokio::test]
async fn interrupt_abandons_slow_provider() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(30)))
        .mount(&server)
        .await;

    let transport = ReqwestTransport::new(Duration::from_secs(2), None).unwrap();
    let service = ServiceFactory::with_transport(&config(server.uri()), Arc::new(transport)).unwrap();
    let interrupt = Interrupt::new();
    let trigger = interrupt.clone();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        trigger.interrupt();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(10),
        service.verify_identity(&person(), &interrupt),
    )
    .await
    .expect("interrupt should end the check");

    assert_eq!(outcome, IdentityCheckOutcome::Unavailable);
    assert!(interrupt.is_interrupted());
}
