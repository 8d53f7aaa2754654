use std::sync::Arc;

use ed25519_dalek::{Signer, SigningKey};
use thanks_bot::dispatch::{EndpointRequest, EndpointResponse, InteractionDispatcher};
use thanks_bot::interactions_endpoint::Verifier;
use thanks_bot::json::{self, json, Value};
use thanks_bot::store::{KeyValueStore, MemoryStore};
use thanks_bot::thanks::ThanksLedger;

const TIMESTAMP: &str = "1720371062";
const HELPER: &str = "207979074358681600";
const ASKER: &str = "161940482831515648";

macro_rules! resource {
    ($filename:expr) => {
        std::fs::read(concat!("./tests/resources/", $filename, ".json")).unwrap()
    };
}

fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[42; 32])
}

fn hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

fn setup() -> (InteractionDispatcher, Arc<dyn KeyValueStore>) {
    let public_key = hex(signing_key().verifying_key().as_bytes());
    let verifier = Verifier::from_hex(&public_key).unwrap();

    let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
    (InteractionDispatcher::new(verifier, ThanksLedger::new(Arc::clone(&store))), store)
}

async fn deliver(dispatcher: &InteractionDispatcher, body: &[u8]) -> EndpointResponse {
    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(body);
    let signature = hex(&signing_key().sign(&message).to_bytes());

    dispatcher
        .handle(EndpointRequest {
            signature: Some(&signature),
            timestamp: Some(TIMESTAMP),
            body,
        })
        .await
}

fn content(response: &EndpointResponse) -> Value {
    let body: Value = json::from_slice(&response.body).unwrap();
    body["data"]["content"].clone()
}

#[tokio::test]
async fn ping() {
    let (dispatcher, _) = setup();
    let response = deliver(&dispatcher, &resource!("ping")).await;

    assert_eq!(response.status, 200);
    assert_eq!(response.content_type, None);
    assert_eq!(json::from_slice::<Value>(&response.body).unwrap(), json!({"type": 1}));
}

#[tokio::test]
async fn tampered_body() {
    let (dispatcher, _) = setup();
    let body = resource!("ping");

    let mut message = TIMESTAMP.as_bytes().to_vec();
    message.extend_from_slice(&body);
    let signature = hex(&signing_key().sign(&message).to_bytes());

    let mut tampered = body.clone();
    tampered.push(b' ');
    let response = dispatcher
        .handle(EndpointRequest {
            signature: Some(&signature),
            timestamp: Some(TIMESTAMP),
            body: &tampered,
        })
        .await;

    assert_eq!(response.status, 401);
    assert_eq!(response.body, b"Invalid signature");
}

#[tokio::test]
async fn thanks_from_every_entry_point_add_up() {
    let (dispatcher, store) = setup();
    let announcement = format!("<@{HELPER}> -- you received thanks from <@{ASKER}>!");

    for fixture in [
        resource!("thank_chat_input"),
        resource!("thank_user_context"),
        resource!("thank_message_context"),
    ] {
        let response = deliver(&dispatcher, &fixture).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.content_type, Some("application/json"));
        assert_eq!(content(&response), json!(announcement));
    }
    assert_eq!(store.get(HELPER).await.unwrap().as_deref(), Some("3"));

    let response = deliver(&dispatcher, &resource!("my_thanks")).await;
    assert_eq!(content(&response), json!("You've received 3 thanks :tada:"));
}

#[tokio::test]
async fn my_thanks_before_any_thanks() {
    let (dispatcher, _) = setup();
    let response = deliver(&dispatcher, &resource!("my_thanks")).await;

    let body: Value = json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({"type": 4, "data": {"content": "You don't have any thanks yet!"}}));
}

#[tokio::test]
async fn thanking_yourself_from_the_menu() {
    let (dispatcher, store) = setup();
    let mut payload: Value = json::from_slice(&resource!("thank_user_context")).unwrap();
    payload["data"]["target_id"] = json!(ASKER);

    let response = deliver(&dispatcher, &json::to_vec(&payload).unwrap()).await;
    let body: Value = json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({"type": 4, "data": {"flags": 64, "content": "You can't thank yourself!"}}));
    assert_eq!(store.get(ASKER).await.unwrap(), None);
}
