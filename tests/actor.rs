use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use phasevisor::{Config, Event, EventKind, Phase, PhaseActor, SignalQueue, Subscribe};

fn every(ms: u64) -> Config {
    Config {
        grace: Duration::from_secs(1),
        ..Config::with_fixed_interval(Duration::from_millis(ms))
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn wait_for_green_returns_after_first_cycle() {
    let actor = Arc::new(PhaseActor::new(every(50)).unwrap());
    assert_eq!(actor.current_phase(), Phase::Red);

    let t0 = Instant::now();
    actor.simulate();

    let waiter = Arc::clone(&actor);
    let (elapsed, phase) = tokio::task::spawn_blocking(move || {
        waiter.wait_for_phase(Phase::Green);
        (t0.elapsed(), waiter.current_phase())
    })
    .await
    .unwrap();

    assert!(elapsed >= Duration::from_millis(50), "returned early: {elapsed:?}");
    assert!(elapsed < Duration::from_millis(200), "returned late: {elapsed:?}");
    assert_eq!(phase, Phase::Green);

    actor.shutdown().await.unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn independent_listeners_all_return() {
    const WAITERS: usize = 6;
    let actor = PhaseActor::new(every(20)).unwrap();

    let handles: Vec<_> = (0..WAITERS)
        .map(|_| {
            let listener = actor.listener();
            thread::spawn(move || listener.wait_for_phase_timeout(Phase::Green, Duration::from_secs(2)))
        })
        .collect();

    actor.simulate();

    let results = tokio::task::spawn_blocking(move || {
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect::<Vec<_>>()
    })
    .await
    .unwrap();
    assert!(results.iter().all(Result::is_ok), "{results:?}");

    actor.shutdown().await.unwrap();
}

#[test]
fn shared_queue_consumes_one_value_per_waiter() {
    const WAITERS: usize = 5;
    let queue = Arc::new(SignalQueue::new());
    let received = Arc::new(AtomicU64::new(0));

    let handles: Vec<_> = (0..WAITERS)
        .map(|_| {
            let queue = Arc::clone(&queue);
            let received = Arc::clone(&received);
            thread::spawn(move || {
                assert_eq!(queue.receive(), Phase::Green);
                received.fetch_add(1, Ordering::Relaxed);
            })
        })
        .collect();

    for _ in 0..WAITERS {
        queue.send(Phase::Green);
    }
    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(received.load(Ordering::Relaxed), WAITERS as u64);
    assert!(queue.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn actor_waiters_share_one_green_each() {
    const WAITERS: usize = 4;
    let actor = Arc::new(PhaseActor::new(every(10)).unwrap());
    let mut rx = actor.events();

    let (done_tx, done_rx) = std::sync::mpsc::channel();
    for _ in 0..WAITERS {
        let actor = Arc::clone(&actor);
        let done_tx = done_tx.clone();
        thread::spawn(move || {
            actor.wait_for_phase(Phase::Green);
            let _ = done_tx.send(());
        });
    }
    actor.simulate();

    let returned = tokio::task::spawn_blocking(move || {
        (0..WAITERS)
            .filter(|_| done_rx.recv_timeout(Duration::from_secs(2)).is_ok())
            .count()
    })
    .await
    .unwrap();
    assert_eq!(returned, WAITERS);
    actor.shutdown().await.unwrap();

    let mut announced = 0;
    while let Ok(ev) = rx.try_recv() {
        if ev.is_phase_change() && ev.phase == Some(Phase::Green) {
            announced += 1;
        }
    }
    let left = std::iter::from_fn(|| actor.queue().try_receive())
        .filter(|p| p.is_green())
        .count();
    assert_eq!(announced - left, WAITERS, "announced {announced}, left {left}");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn stale_backlog_is_delivered_newest_first() {
    let actor = PhaseActor::new(every(5)).unwrap();
    actor.simulate();
    tokio::time::sleep(Duration::from_millis(60)).await;
    actor.shutdown().await.unwrap();

    let last = actor.current_phase();
    let backlog: Vec<Phase> = std::iter::from_fn(|| actor.queue().try_receive()).collect();
    assert!(backlog.len() >= 2, "expected several toggles, got {backlog:?}");
    assert_eq!(backlog[0], last);
    for pair in backlog.windows(2) {
        assert_eq!(pair[1], pair[0].toggled());
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn queue_limit_bounds_backlog() {
    let cfg = Config {
        queue_limit: 2,
        ..every(2)
    };
    let actor = PhaseActor::new(cfg).unwrap();
    actor.simulate();
    tokio::time::sleep(Duration::from_millis(50)).await;
    actor.shutdown().await.unwrap();

    assert!(actor.queue().len() <= 2);
    assert_eq!(actor.queue().try_receive(), Some(actor.current_phase()));
}

#[derive(Default)]
struct Collector {
    kinds: Mutex<Vec<EventKind>>,
    greens: AtomicU64,
}

#[async_trait]
impl Subscribe for Collector {
    async fn on_event(&self, ev: &Event) {
        self.kinds.lock().unwrap().push(ev.kind);
        if ev.is_phase_change() && ev.phase == Some(Phase::Green) {
            self.greens.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn name(&self) -> &'static str {
        "collector"
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn subscribers_receive_lifecycle_events() {
    let collector = Arc::new(Collector::default());
    let actor = PhaseActor::builder(every(10))
        .with_subscribers(vec![collector.clone() as Arc<dyn Subscribe>])
        .build()
        .unwrap();

    actor.simulate();
    tokio::time::timeout(Duration::from_secs(2), actor.wait_for_phase_async(Phase::Green))
        .await
        .expect("green never observed");
    actor.shutdown().await.unwrap();

    let kinds = collector.kinds.lock().unwrap().clone();
    assert_eq!(kinds.first(), Some(&EventKind::ActorStarted));
    assert!(kinds.contains(&EventKind::PhaseChanged));
    assert!(kinds.contains(&EventKind::ShutdownRequested));
    assert!(kinds.contains(&EventKind::ActorStopped));
    assert_eq!(kinds.last(), Some(&EventKind::AllStoppedWithin));
    assert!(collector.greens.load(Ordering::Relaxed) >= 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn seeded_actors_draw_intervals_in_range() {
    let cfg = Config {
        interval_min: Duration::from_millis(3),
        interval_max: Duration::from_millis(8),
        seed: Some(2024),
        grace: Duration::from_secs(1),
        ..Config::default()
    };
    let actor = PhaseActor::new(cfg).unwrap();
    let mut rx = actor.events();
    actor.simulate();

    let mut seen = 0;
    while seen < 5 {
        let ev = tokio::time::timeout(Duration::from_secs(2), rx.recv())
            .await
            .expect("actor stalled")
            .unwrap();
        if let Some(ms) = ev.interval_ms {
            assert!((3..=8).contains(&ms), "interval {ms}ms out of range");
            seen += 1;
        }
    }

    actor.shutdown().await.unwrap();
}

#[cfg(feature = "logging")]
#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn log_writer_subscriber_runs() {
    use phasevisor::LogWriter;

    let actor = PhaseActor::builder(every(5))
        .with_subscribers(vec![Arc::new(LogWriter::new()) as Arc<dyn Subscribe>])
        .build()
        .unwrap();
    actor.simulate();
    tokio::time::sleep(Duration::from_millis(20)).await;
    actor.shutdown().await.unwrap();
}
