use std::time::Duration;

use realm_content::{ThingKind, TileWorldConfig};
use realm_core::{
    ActionRequest, CardinalDirection, Change, ConfigError, Outcome, Position, ResolveError,
    ThingId, ThingSpec, World, WorldConfig,
};
use realm_runtime::{Event, Runtime, RuntimeConfig, RuntimeError, Topic};
use tokio::sync::broadcast;
use tokio::time::timeout;

async fn next(rx: &mut broadcast::Receiver<Event>) -> Event {
    timeout(Duration::from_secs(1), rx.recv())
        .await
        .expect("event should arrive")
        .expect("bus should stay open")
}

fn empty_world(width: u32, height: u32) -> World {
    World::new(&WorldConfig::new("runtime-test").with_size(width, height)).unwrap()
}

#[tokio::test]
async fn resolve_publishes_outcome_and_change() {
    let runtime = Runtime::builder()
        .world(empty_world(10, 10))
        .build()
        .await
        .expect("runtime should start");
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);
    let mut changes = handle.subscribe(Topic::Change);

    let agent = handle
        .spawn(ThingKind::Agent.spec("Tester", Position::new(5, 5)))
        .await
        .unwrap();
    let event = handle
        .resolve(ActionRequest::step(agent, CardinalDirection::East))
        .await
        .unwrap();

    assert_eq!(event.outcome, Outcome::Succeeded);
    assert_eq!(next(&mut outcomes).await, Event::Outcome(event));
    match next(&mut changes).await {
        Event::Change(change) => assert_eq!(
            change.change,
            Change::Moved {
                thing: agent,
                from: Position::new(5, 5),
                to: Position::new(6, 5),
            }
        ),
        other => panic!("unexpected event {other:?}"),
    }

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn push_cascade_reports_every_outcome() {
    let runtime = Runtime::builder()
        .world(empty_world(10, 10))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);

    let agent = handle
        .spawn(ThingKind::Agent.spec("A", Position::new(5, 5)))
        .await
        .unwrap();
    let tile = handle
        .spawn(ThingKind::Tile.spec("T", Position::new(6, 5)))
        .await
        .unwrap();

    let event = handle
        .resolve(ActionRequest::move_by(agent, 1, 0))
        .await
        .unwrap();
    assert_eq!(event.outcome, Outcome::Succeeded);

    let Event::Outcome(cascade) = next(&mut outcomes).await else {
        panic!("expected outcome");
    };
    assert_eq!(cascade.actor, tile);
    assert_eq!(cascade.cause, Some(event.request));
    assert_eq!(next(&mut outcomes).await, Event::Outcome(event));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.locate(Position::new(7, 5)).map(|t| t.id), Some(tile));
    assert_eq!(snapshot.locate(Position::new(6, 5)).map(|t| t.id), Some(agent));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn unknown_actor_surfaces_resolve_error() {
    let runtime = Runtime::builder()
        .world(empty_world(3, 3))
        .build()
        .await
        .unwrap();

    let err = runtime
        .handle()
        .resolve(ActionRequest::move_by(ThingId(99), 1, 0))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Resolve(ResolveError::ActorNotFound { .. })
    ));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn submitted_requests_are_resolved_in_order() {
    let runtime = Runtime::builder()
        .world(empty_world(10, 1))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    let mut outcomes = handle.subscribe(Topic::Outcome);
    let agent = handle
        .spawn(ThingKind::Agent.spec("A", Position::new(0, 0)))
        .await
        .unwrap();

    for _ in 0..3 {
        handle
            .submit(ActionRequest::step(agent, CardinalDirection::East))
            .unwrap();
    }
    let mut requests = Vec::new();
    for _ in 0..3 {
        let Event::Outcome(event) = next(&mut outcomes).await else {
            panic!("expected outcome");
        };
        assert_eq!(event.outcome, Outcome::Succeeded);
        requests.push(event.request);
    }
    assert!(requests.windows(2).all(|w| w[0] < w[1]));

    let snapshot = handle.snapshot().await.unwrap();
    assert_eq!(snapshot.things[0].position, Position::new(3, 0));

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn generated_tile_world_has_centred_agent() {
    let config = TileWorldConfig::new(WorldConfig::new("generated").with_size(20, 10))
        .with_densities(0.1, 0.05)
        .with_seed(17);
    let runtime = Runtime::builder()
        .config(RuntimeConfig {
            event_buffer_size: 16,
            command_buffer_size: 4,
        })
        .tile_world(config)
        .build()
        .await
        .unwrap();

    let agent = runtime.agent().expect("generator places an agent");
    let snapshot = runtime.handle().snapshot().await.unwrap();
    let placed = snapshot.things.iter().find(|t| t.id == agent).unwrap();
    assert_eq!(placed.position, Position::new(10, 5));
    assert_eq!(snapshot.things.len(), 1 + 20 + 10 + 10);

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn invalid_tile_world_fails_to_build() {
    let config = TileWorldConfig::default().with_densities(0.9, 0.1);
    let err = Runtime::builder().tile_world(config).build().await.err().unwrap();
    assert!(matches!(
        err,
        RuntimeError::Generate(realm_content::GenerateError::Config(ConfigError::Invalid { .. }))
    ));

    let err = Runtime::builder().build().await.err().unwrap();
    assert!(matches!(err, RuntimeError::MissingWorld));
}

#[tokio::test]
async fn spawn_and_clear_round_trip() {
    let runtime = Runtime::builder()
        .world(empty_world(4, 4))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();

    handle
        .spawn(ThingSpec::new("rock", "Rock", Position::new(1, 1)).glyph('#'))
        .await
        .unwrap();
    let err = handle
        .spawn(ThingSpec::new("rock", "Rock", Position::new(1, 1)).glyph('#'))
        .await
        .unwrap_err();
    assert!(matches!(err, RuntimeError::State(_)));

    handle.clear().await.unwrap();
    assert!(handle.snapshot().await.unwrap().things.is_empty());

    runtime.shutdown().await.unwrap();
}

#[tokio::test]
async fn handle_fails_after_shutdown() {
    let runtime = Runtime::builder()
        .world(empty_world(2, 2))
        .build()
        .await
        .unwrap();
    let handle = runtime.handle();
    runtime.shutdown().await.unwrap();

    let err = handle.snapshot().await.unwrap_err();
    assert!(matches!(err, RuntimeError::CommandChannelClosed));
}
