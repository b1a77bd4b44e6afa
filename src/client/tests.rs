use super::pubsub_client::Client;
use crate::broker::message::Delivery;
use bytes::Bytes;
use tokio::sync::mpsc;

#[test]
fn test_client_new() {
    let (tx, _) = mpsc::unbounded_channel::<Delivery>();
    let client = Client::new(tx);
    assert!(!client.id.is_empty());
}

#[test]
fn test_client_ids_are_unique() {
    let (tx, _) = mpsc::unbounded_channel::<Delivery>();
    let a = Client::new(tx.clone());
    let b = Client::new(tx);
    assert_ne!(a.id, b.id);
}

#[test]
fn test_dropping_client_closes_channel() {
    let (tx, mut rx) = mpsc::unbounded_channel::<Delivery>();
    let client = Client::new(tx);
    client
        .sender
        .send(Delivery::new("t", Bytes::from_static(b"x")))
        .unwrap();
    drop(client);

    assert!(rx.try_recv().is_ok());
    assert_eq!(
        rx.try_recv().unwrap_err(),
        mpsc::error::TryRecvError::Disconnected
    );
}
