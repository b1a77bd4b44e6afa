//! Demo for PopSub Typed
//!
//! Wires a typed publisher and subscriber to the in-process broker using the
//! loaded configuration, sends a few values and prints what arrives.

use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use popsub_typed::config::load_config;
use popsub_typed::utils::logging;
use popsub_typed::{MemoryBroker, Pub, PubTrait, Sub, SubOptions, SubTrait, UnSubTrait};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

#[derive(Debug, Serialize, Deserialize)]
struct Greeting {
    id: u64,
    text: String,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let config = match load_config() {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            error!("Failed to load configuration: {}", e);
            return;
        }
    };
    logging::init(&config.logging.level);

    if let Err(e) = run(config).await {
        error!("Demo failed: {}", e);
    }
}

async fn run(config: popsub_typed::config::Settings) -> Result<(), Box<dyn std::error::Error>> {
    let broker = MemoryBroker::new();

    let subscription = Arc::new(broker.subscription(config.subscriber.topic.clone()));
    let subscriber: Sub<Greeting> = Sub::new(
        subscription.clone(),
        Some(subscription),
        Arc::new(SubOptions::from(&config.subscriber)),
    );
    let mut messages = subscriber.subscribe().await?;

    let publisher: Pub<Greeting> = Pub::new(
        Arc::new(broker.clone()),
        config.publisher.topic.clone(),
        config.publisher.format,
    );
    info!(
        topic = %publisher.topic(),
        format = %publisher.format(),
        "publishing greetings"
    );

    let count = 3;
    for id in 1..=count {
        let greeting = Greeting {
            id,
            text: format!("hello #{id}"),
        };
        publisher.publish(&greeting).await?;
    }

    let mut received = 0;
    while received < count {
        match tokio::time::timeout(Duration::from_secs(1), messages.next()).await {
            Ok(Some(msg)) => {
                received += 1;
                match msg.item {
                    Ok(greeting) => println!("Received: {greeting:?}"),
                    Err(e) => warn!("Skipping message: {}", e),
                }
            }
            Ok(None) => break,
            Err(_) => {
                warn!(
                    "No message within 1s; publisher and subscriber topics or formats may differ"
                );
                break;
            }
        }
    }

    subscriber.unsubscribe().await?;
    info!(received, pending_acks = broker.pending_acks()?, "done");
    Ok(())
}
