use super::*;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use voxnav_protocols::MessageId;

fn frame(payload: &[u8]) -> Vec<u8> {
    let mut buf = (payload.len() as u32).to_ne_bytes().to_vec();
    buf.extend_from_slice(payload);
    buf
}

#[tokio::test]
async fn test_reader_skips_bad_json() {
    let (mut host, ours) = tokio::io::duplex(1024);
    let (tx, mut rx) = mpsc::channel(8);
    let reader = tokio::spawn(read_frames(ours, 1024, tx));

    host.write_all(&frame(br#"{"type":"ping","id":1}"#)).await.unwrap();
    host.write_all(&frame(b"{oops")).await.unwrap();
    host.write_all(&frame(br#"{"type":"ping","id":2}"#)).await.unwrap();
    drop(host);

    assert_eq!(rx.recv().await.unwrap(), json!({"type": "ping", "id": 1}));
    assert_eq!(rx.recv().await.unwrap(), json!({"type": "ping", "id": 2}));
    assert!(rx.recv().await.is_none());
    reader.await.unwrap();
}

#[tokio::test]
async fn test_reader_stops_on_oversize_frame() {
    let (mut host, ours) = tokio::io::duplex(1024);
    let (tx, mut rx) = mpsc::channel(8);
    let reader = tokio::spawn(read_frames(ours, 16, tx));

    host.write_all(&(64u32).to_ne_bytes()).await.unwrap();

    reader.await.unwrap();
    assert!(rx.recv().await.is_none());
}

#[tokio::test]
async fn test_writer_frames_messages() {
    let (ours, mut host) = tokio::io::duplex(1024);
    let (tx, rx) = mpsc::channel(8);
    let writer = tokio::spawn(write_frames(ours, 1024, rx));

    tx.send(ProtocolMessage::pong(MessageId::new("p"))).await.unwrap();
    drop(tx);
    writer.await.unwrap();

    let mut bytes = Vec::new();
    host.read_to_end(&mut bytes).await.unwrap();
    let mut header = [0u8; 4];
    header.copy_from_slice(&bytes[..4]);
    assert_eq!(u32::from_ne_bytes(header) as usize, bytes.len() - 4);
    let value: Value = serde_json::from_slice(&bytes[4..]).unwrap();
    assert_eq!(value, json!({"type": "ack", "id": "p", "ok": "pong"}));
}

#[tokio::test]
async fn test_writer_drops_oversize_message() {
    let (ours, mut host) = tokio::io::duplex(1024);
    let (tx, rx) = mpsc::channel(8);
    let writer = tokio::spawn(write_frames(ours, 48, rx));

    tx.send(ProtocolMessage::error(MessageId::new(1), "x".repeat(100)))
        .await
        .unwrap();
    tx.send(ProtocolMessage::ack(MessageId::new(2))).await.unwrap();
    drop(tx);
    writer.await.unwrap();

    let mut bytes = Vec::new();
    host.read_to_end(&mut bytes).await.unwrap();
    let value: Value = serde_json::from_slice(&bytes[4..]).unwrap();
    assert_eq!(value["id"], json!(2));
}

#[test]
fn test_connector_keeps_launch() {
    let connector = NativeHostConnector::new(HostLaunch::command(
        "com.voxnav.voice_browser",
        "/usr/local/bin/voxnav-host",
        vec!["--stdio".to_string()],
    ))
    .with_max_message_bytes(4096);

    let launch = connector.launch();
    assert_eq!(launch.name, "com.voxnav.voice_browser");
    assert_eq!(launch.args, vec!["--stdio".to_string()]);
    assert_eq!(connector.endpoint(), "com.voxnav.voice_browser");
}

#[tokio::test]
async fn test_spawn_failure_is_connection_error() {
    let connector = NativeHostConnector::new(HostLaunch::command(
        "com.voxnav.voice_browser",
        "/nonexistent/voxnav-host",
        Vec::new(),
    ));

    let err = connector.connect().await.unwrap_err();
    assert!(matches!(err, ChannelError::ConnectionFailed(ref m) if m.contains("/nonexistent")));
}

#[cfg(unix)]
#[tokio::test]
async fn test_echo_host_round_trip() {
    // `cat` echoes each frame back unchanged.
    let connector = NativeHostConnector::new(HostLaunch::command("echo", "cat", Vec::new()));
    assert_eq!(connector.endpoint(), "echo");

    let Connection {
        outbound,
        mut inbound,
    } = connector.connect().await.unwrap();

    outbound
        .send(ProtocolMessage::ping(MessageId::new(5)))
        .await
        .unwrap();
    assert_eq!(inbound.recv().await.unwrap(), json!({"type": "ping", "id": 5}));

    // Closing our side ends the host, which closes the inbound queue.
    drop(outbound);
    assert!(inbound.recv().await.is_none());
}
