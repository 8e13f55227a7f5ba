mod support;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use support::{RecordingLlmClient, ScriptedReply, seed_document, test_app};

async fn serve(app: axum::Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn next_message<S>(ws: &mut S) -> Option<Message>
where
    S: futures::Stream<Item = Result<Message, tokio_tungstenite::tungstenite::Error>> + Unpin,
{
    tokio::time::timeout(Duration::from_secs(5), ws.next())
        .await
        .expect("timed out waiting for frame")
        .and_then(Result::ok)
}

#[tokio::test]
async fn given_text_frames_when_chatting_then_each_gets_one_reply() {
    let seed = seed_document(&["once upon a time"]);
    let llm = Arc::new(RecordingLlmClient::with_script(vec![
        ScriptedReply::Reply("it was a dark night".to_string()),
        ScriptedReply::Reply("the end".to_string()),
    ]));
    let addr = serve(test_app(Arc::clone(&llm), seed.path().to_path_buf())).await;

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/alice"))
        .await
        .unwrap();

    ws.send(Message::text("how does it start?")).await.unwrap();
    let first = next_message(&mut ws).await.unwrap();
    assert_eq!(first.to_text().unwrap(), "it was a dark night");

    ws.send(Message::text("and then?")).await.unwrap();
    let second = next_message(&mut ws).await.unwrap();
    assert_eq!(second.to_text().unwrap(), "the end");

    let requests = llm.requests();
    assert_eq!(requests.len(), 2);
    assert!(requests[0][0].content.contains("once upon a time"));
    assert!(requests[1][0].content.contains("how does it start?"));
    assert!(requests[1][0].content.ends_with("user prompt: and then?"));
}

#[tokio::test]
async fn given_binary_frame_when_chatting_then_reply_is_binary() {
    let seed = seed_document(&["seed"]);
    let llm = Arc::new(RecordingLlmClient::new());
    let addr = serve(test_app(llm, seed.path().to_path_buf())).await;

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/bob"))
        .await
        .unwrap();

    ws.send(Message::binary(b"raw question".to_vec()))
        .await
        .unwrap();
    let reply = next_message(&mut ws).await.unwrap();

    assert!(reply.is_binary());
    assert_eq!(&reply.into_data()[..], b"reply 1");
}

#[tokio::test]
async fn given_completion_failure_when_chatting_then_connection_closes_without_reply() {
    let seed = seed_document(&["seed"]);
    let llm = Arc::new(RecordingLlmClient::with_script(vec![ScriptedReply::Fail]));
    let addr = serve(test_app(llm, seed.path().to_path_buf())).await;

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/carol"))
        .await
        .unwrap();

    ws.send(Message::text("hello")).await.unwrap();
    let next = next_message(&mut ws).await;

    assert!(matches!(next, None | Some(Message::Close(_))));
}

#[tokio::test]
async fn given_missing_seed_document_when_connecting_then_connection_closes_without_reply() {
    let llm = Arc::new(RecordingLlmClient::new());
    let addr = serve(test_app(Arc::clone(&llm), "/no/such/seed.pdf".into())).await;

    let (mut ws, _) = tokio_tungstenite::connect_async(format!("ws://{addr}/ws/dave"))
        .await
        .unwrap();

    let _ = ws.send(Message::text("hello")).await;
    let next = next_message(&mut ws).await;

    assert!(matches!(next, None | Some(Message::Close(_))));
    assert!(llm.requests().is_empty());
}
