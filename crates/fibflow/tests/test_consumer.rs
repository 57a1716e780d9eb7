use anyhow::{anyhow, Result};
use fibflow::kit::producer::{ColdFibonacci, ProducerConfig};
use fibflow::kit::send::{FuncSender, MessageSender};
use fibflow::{AppConfig, AppGraph, MainConsumer};
use futures::stream::{self, BoxStream, StreamExt};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep, Duration};

struct FakeColdFibonacci;

impl ColdFibonacci for FakeColdFibonacci {
    fn fibonacci(&self) -> BoxStream<'static, u64> {
        stream::iter(vec![2, 3]).boxed()
    }
}

fn display<T: Send + 'static>() -> (MessageSender<T>, mpsc::UnboundedReceiver<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    let sink = FuncSender(move |value: T| -> Result<()> {
        tx.send(value).map_err(|_| anyhow!("The display is gone"))?;
        Ok(())
    });
    (MessageSender::new(sink), rx)
}

#[tokio::test(start_paused = true)]
async fn test_cold_values_reach_the_display() -> Result<()> {
    let graph = AppGraph::new(&AppConfig::default());
    let consumer = MainConsumer::new(Arc::new(FakeColdFibonacci), graph.never_ending.clone());
    let (sink, mut shown) = display();

    let mut binding = consumer.bind_cold(sink);
    assert_eq!(shown.recv().await, Some(2));
    assert_eq!(shown.recv().await, Some(3));
    binding.join().await;
    assert!(binding.is_finished());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_dropped_binding_stops_the_run() -> Result<()> {
    let graph = AppGraph::new(&AppConfig::default());
    let consumer = graph.main_consumer();

    let (sink, mut shown) = display();
    let binding = consumer.bind_cold(sink);
    assert_eq!(shown.recv().await, Some(2));
    assert_eq!(shown.recv().await, Some(3));
    assert_eq!(graph.cold.active_runs(), 1);

    drop(binding);
    sleep(Duration::from_millis(1)).await;
    assert_eq!(graph.cold.active_runs(), 0);

    let (sink, mut shown) = display();
    let _binding = consumer.bind_cold(sink);
    assert_eq!(shown.recv().await, Some(2));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_rendered_values() -> Result<()> {
    let graph = AppGraph::new(&AppConfig::default());
    let consumer = graph.main_consumer();
    let (text, mut shown) = display::<String>();

    let binding = consumer.bind_never_ending(text.reform(|value: u64| value.to_string()))?;
    assert_eq!(shown.recv().await.as_deref(), Some("2"));
    assert_eq!(shown.recv().await.as_deref(), Some("3"));
    binding.unbind().await;
    graph.shutdown().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_every_access_opens_a_new_subscription() -> Result<()> {
    let graph = AppGraph::new(&AppConfig::default());
    let consumer = graph.main_consumer();

    let mut first = consumer.never_ending()?;
    assert_eq!(first.recv().await, Some(2));
    assert_eq!(first.recv().await, Some(3));

    let mut second = consumer.never_ending()?;
    assert_ne!(first.id(), second.id());
    assert_eq!(second.recv().await, Some(3));
    assert_eq!(graph.never_ending.subscriber_count(), 2);

    graph.shutdown().await;
    assert_eq!(first.recv().await, None);
    assert_eq!(second.recv().await, None);
    assert!(consumer.never_ending().is_err());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_graph_uses_configured_intervals() -> Result<()> {
    let config = AppConfig {
        producer: ProducerConfig::default().with_broadcast_interval(Duration::from_secs(10)),
        ..AppConfig::default()
    };
    let graph = AppGraph::new(&config);
    let mut sub = graph.main_consumer().never_ending()?;
    let started = tokio::time::Instant::now();
    assert_eq!(sub.recv().await, Some(2));
    assert_eq!(sub.recv().await, Some(3));
    assert!(started.elapsed() >= Duration::from_secs(10));
    graph.shutdown().await;
    Ok(())
}
