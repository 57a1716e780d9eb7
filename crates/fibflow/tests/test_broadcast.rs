use anyhow::Result;
use fibflow::kit::producer::{BroadcastProducer, ProducerConfig, ProducerError};
use fibflow::kit::runtime::RunState;
use futures::StreamExt;
use std::sync::Arc;
use tokio::runtime::{Builder, Handle};
use tokio::time::{sleep, timeout, Duration};

fn producer() -> BroadcastProducer {
    BroadcastProducer::new(&ProducerConfig::default())
}

#[tokio::test(start_paused = true)]
async fn test_late_subscriber_starts_from_cached_value() -> Result<()> {
    let producer = producer();
    producer.start(Some(Handle::current()))?;

    let mut a = producer.subscribe()?;
    assert_eq!(a.recv().await, Some(2));
    assert_eq!(a.recv().await, Some(3));

    let mut b = producer.subscribe()?;
    assert_eq!(b.recv().await, Some(3));
    assert_eq!(a.recv().await, Some(5));
    assert_eq!(b.recv().await, Some(5));

    producer.stop();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_subscribers_see_gap_free_continuations() -> Result<()> {
    let producer = producer();
    let mut a = producer.subscribe()?;
    assert_eq!(a.recv().await, Some(2));
    assert_eq!(a.recv().await, Some(3));

    let b = producer.subscribe()?;
    let from_b: Vec<u64> = b.take(5).collect().await;
    let from_a: Vec<u64> = a.take(4).collect().await;

    assert_eq!(from_b, vec![3, 5, 8, 13, 21]);
    assert_eq!(from_a, vec![5, 8, 13, 21]);
    producer.stop();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_ends_the_run_for_good() -> Result<()> {
    let producer = producer();
    let mut sub = producer.subscribe()?;
    assert_eq!(sub.recv().await, Some(2));

    producer.stop();
    assert_eq!(producer.state(), RunState::Stopped);
    assert_eq!(sub.recv().await, None);
    producer.join().await;
    assert_eq!(producer.subscriber_count(), 0);

    sleep(Duration::from_secs(30)).await;
    assert_eq!(producer.last(), None);
    assert!(matches!(producer.subscribe(), Err(ProducerError::Stopped)));
    assert!(matches!(producer.start(None), Err(ProducerError::Stopped)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_detached_subscriber_does_not_disturb_others() -> Result<()> {
    let producer = producer();
    let mut stays = producer.subscribe()?;
    let mut leaves = producer.subscribe()?;
    assert_eq!(leaves.recv().await, Some(2));
    drop(leaves);
    assert_eq!(producer.subscriber_count(), 1);

    let values: Vec<u64> = stays.by_ref().take(3).collect().await;
    assert_eq!(values, vec![2, 3, 5]);
    producer.stop();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_slow_subscriber_stays_attached() -> Result<()> {
    let producer = producer();
    let slow = producer.subscribe()?;
    let mut fast = producer.subscribe()?;

    let mut from_fast = Vec::new();
    for _ in 0..70 {
        from_fast.extend(fast.recv().await);
    }
    assert_eq!(from_fast.len(), 70);
    assert_eq!(producer.subscriber_count(), 2);

    let from_slow: Vec<u64> = slow.take(70).collect().await;
    assert_eq!(from_slow, from_fast);
    producer.stop();
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_stop_releases_a_pending_join() -> Result<()> {
    let producer = Arc::new(producer());
    let _sub = producer.subscribe()?;
    let joiner = {
        let producer = producer.clone();
        tokio::spawn(async move { producer.join().await })
    };
    sleep(Duration::from_secs(1)).await;
    producer.stop();
    timeout(Duration::from_secs(60), joiner).await??;
    assert_eq!(producer.state(), RunState::Stopped);
    Ok(())
}

#[test]
fn test_start_on_a_given_runtime() -> Result<()> {
    let runtime = Builder::new_multi_thread().enable_all().build()?;
    let producer = producer();
    producer.start(Some(runtime.handle().clone()))?;
    let mut sub = producer.subscribe()?;
    let first = runtime.block_on(sub.recv());
    assert!(first.is_some());
    producer.stop();
    runtime.block_on(producer.join());
    Ok(())
}
