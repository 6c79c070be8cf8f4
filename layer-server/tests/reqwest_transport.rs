mod common;

use common::{closed_addr, serve_once, APP_ID, APP_TOKEN};
use layer_server::{
    Error, LayerServerClient, LayerServerOptions, NewConversation, ReqwestClient,
};

fn client_for(addr: std::net::SocketAddr) -> LayerServerClient<ReqwestClient> {
    let transport = ReqwestClient::with_timeout(&format!("http://{}", addr), 5).unwrap();
    LayerServerClient::new(transport, &LayerServerOptions::new(APP_ID, APP_TOKEN))
}

#[tokio::test]
async fn post_conversation_round_trip() {
    let (addr, requests) = serve_once(201, r#"{"id": "layer:///conversations/1"}"#);
    let client = client_for(addr);
    let conversation = NewConversation {
        participants: vec!["1234".into(), "5678".into()],
        distinct: false,
        metadata: None,
    };

    let response = client.post_conversation(&conversation).await.unwrap();
    assert_eq!(response.status(), 201);

    let request = requests.recv().unwrap();
    assert_eq!(request.method, "POST");
    assert_eq!(request.target, "/apps/123456789abc/conversations");
    assert_eq!(request.header("authorization"), Some("Bearer thisIsAToken"));
    assert_eq!(
        request.header("accept"),
        Some("application/vnd.layer+json; version=2.0")
    );
    assert_eq!(request.body, serde_json::to_string(&conversation).unwrap());
}

#[tokio::test]
async fn server_error_is_delivered() {
    let (addr, _requests) = serve_once(500, r#"{"id": "internal_server_error"}"#);
    let client = client_for(addr);

    let response = client.get_conversation_messages("convId").await.unwrap();
    assert_eq!(response.status(), 500);
    assert!(!response.is_success());
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let client = client_for(closed_addr());

    let result = client.get_conversation("convId").await;
    assert!(matches!(result, Err(Error::Transport(_))));
    assert!(client.get_conversation("convId").await.ok().is_none());
}
