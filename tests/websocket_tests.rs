use futures_util::{SinkExt, StreamExt};
use serde_json::{Value, json};
use std::{net::SocketAddr, sync::Arc, time::Duration};
use tokio::{
    net::{TcpListener, TcpStream},
    time::timeout,
};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

use sensorhub::{server::serve, state::AppState};

type Client = WebSocketStream<MaybeTlsStream<TcpStream>>;

async fn start_hub(endpoints: usize) -> (Arc<AppState>, Vec<SocketAddr>) {
    let state = Arc::new(AppState::new());
    let mut listeners = Vec::new();
    let mut addrs = Vec::new();
    for _ in 0..endpoints {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        addrs.push(listener.local_addr().unwrap());
        listeners.push(listener);
    }
    tokio::spawn(serve(state.clone(), listeners));
    (state, addrs)
}

async fn client(addr: SocketAddr) -> Client {
    let (socket, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    socket
}

async fn send(client: &mut Client, event: &str, data: Value) {
    let frame = json!({ "event": event, "data": data }).to_string();
    client.send(Message::text(frame)).await.unwrap();
}

async fn next_event(client: &mut Client) -> Value {
    loop {
        let frame = timeout(Duration::from_secs(5), client.next())
            .await
            .expect("timed out waiting for an event")
            .unwrap()
            .unwrap();
        if let Message::Text(text) = frame {
            return serde_json::from_str(text.as_str()).unwrap();
        }
    }
}

async fn wait_until(state: &AppState, done: impl Fn(&sensorhub::HubService) -> bool) {
    timeout(Duration::from_secs(5), async {
        loop {
            if done(&*state.hub.lock().await) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("hub never reached the expected state");
}

fn register_producer(uid: &str) -> Value {
    json!({ "producerUid": uid, "producerName": "Rack 4", "metricsList": ["cpu", "memory"] })
}

#[tokio::test]
async fn test_producer_and_observer_round_trip() {
    let (state, addrs) = start_hub(1).await;

    let mut producer = client(addrs[0]).await;
    send(&mut producer, "registerProducer", register_producer("p1")).await;
    let ack = next_event(&mut producer).await;
    assert_eq!(ack["event"], "producerRegistered");
    assert_eq!(ack["data"]["producerInfo"]["producerUid"], "p1");
    assert_eq!(ack["data"]["producerInfo"]["ownerAddress"], "127.0.0.1");

    send(&mut producer, "metricData", json!({ "producerUid": "p1", "payload": { "cpu": 41 } })).await;
    wait_until(&state, |hub| hub.cache().get("p1").is_some()).await;

    let mut observer = client(addrs[0]).await;
    send(&mut observer, "registerObserver", json!({})).await;

    let ack = next_event(&mut observer).await;
    assert_eq!(ack["event"], "observerRegistered");
    assert_eq!(ack["data"]["observerInfo"]["observerAddress"], "127.0.0.1");

    let announced = next_event(&mut observer).await;
    assert_eq!(announced["event"], "producerRegistered");
    assert_eq!(announced["data"]["producerInfo"]["producerUid"], "p1");

    let cached = next_event(&mut observer).await;
    assert_eq!(
        cached,
        json!({ "event": "metricData", "data": { "producerUid": "p1", "payload": { "cpu": 41 } } })
    );

    send(&mut producer, "metricData", json!({ "producerUid": "p1", "payload": { "cpu": 42 } })).await;
    let live = next_event(&mut observer).await;
    assert_eq!(live["data"]["payload"]["cpu"], 42);

    producer.close(None).await.unwrap();
    let gone = next_event(&mut observer).await;
    assert_eq!(gone["event"], "producerUnregistered");
    assert_eq!(gone["data"]["producerInfo"]["producerUid"], "p1");

    wait_until(&state, |hub| hub.producers().is_empty() && hub.cache().is_empty()).await;
}

#[tokio::test]
async fn test_malformed_frames_do_not_close_the_connection() {
    let (state, addrs) = start_hub(1).await;

    let mut producer = client(addrs[0]).await;
    producer.send(Message::text("not json")).await.unwrap();
    send(&mut producer, "registerProducer", json!({ "producerUid": "p1" })).await;
    send(&mut producer, "shutdownHub", json!({})).await;
    send(&mut producer, "registerProducer", register_producer("p1")).await;

    let ack = next_event(&mut producer).await;
    assert_eq!(ack["event"], "producerRegistered");
    wait_until(&state, |hub| hub.producers().contains("p1")).await;
}

#[tokio::test]
async fn test_split_endpoints_share_one_hub() {
    let (state, addrs) = start_hub(2).await;

    let mut observer = client(addrs[1]).await;
    send(&mut observer, "registerObserver", json!({})).await;
    assert_eq!(next_event(&mut observer).await["event"], "observerRegistered");

    let mut producer = client(addrs[0]).await;
    send(&mut producer, "registerProducer", register_producer("p7")).await;

    let announced = next_event(&mut observer).await;
    assert_eq!(announced["event"], "producerRegistered");
    assert_eq!(announced["data"]["producerInfo"]["producerUid"], "p7");

    drop(observer);
    wait_until(&state, |hub| hub.observers().is_empty()).await;
    assert!(state.hub.lock().await.producers().contains("p7"));
}
