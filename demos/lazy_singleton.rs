//! Walk-through of a registry's life: discovery, creation, duplicates and teardown.
//!
//! Run with: `RUST_LOG=debug cargo run --example lazy_singleton`

use lazy_singleton::{
    cap_assert, cap_info, cap_success, cap_warn, CapLog, LifeEvents, SceneHost, SingletonRegistry,
};
use std::sync::Arc;

#[derive(Default)]
struct Player {
    life: LifeEvents,
}

#[derive(Default)]
struct ScoreBoard;

fn main() {
    env_logger::init();

    // -------------------------------------------------------------------------
    // 1. A scene with a player already placed in it
    // -------------------------------------------------------------------------
    let host = SceneHost::new();
    let placed = host.spawn("Player", Player::default());
    let registry = Arc::new(SingletonRegistry::new(host));

    registry.set_trace_callback(|event| println!("   [trace] {event}"));

    let log: Arc<CapLog> = registry.get_instance().expect("logger before teardown");
    cap_info!(log, "logger resolved");

    // -------------------------------------------------------------------------
    // 2. Discovery and creation
    // -------------------------------------------------------------------------
    let player = registry.get_instance::<Player>().expect("player before teardown");
    cap_assert!(log, Arc::ptr_eq(&placed, &player), "placed player discovered");

    let _board = registry.get_instance::<ScoreBoard>();
    cap_success!(log, "{} objects live", registry.host().len());

    // -------------------------------------------------------------------------
    // 3. A second player wakes up and is destroyed
    // -------------------------------------------------------------------------
    let copy = registry.host().spawn("Player (copy)", Player::default());
    if !registry.awake(&copy) {
        cap_warn!(log, "duplicate player removed");
    }

    // -------------------------------------------------------------------------
    // 4. Life events, then teardown
    // -------------------------------------------------------------------------
    {
        let log = log.clone();
        player.life.on_damage_taken(move || cap_warn!(log, "ouch"));
    }
    {
        let registry = Arc::downgrade(&registry);
        player.life.on_death(move || {
            if let Some(registry) = registry.upgrade() {
                registry.begin_teardown::<Player>();
            }
        });
    }

    player.life.take_damage();
    player.life.die();

    let after = registry.get_instance::<Player>();
    cap_assert!(
        log,
        after.is_some_and(|p| Arc::ptr_eq(&p, &player)),
        "teardown kept the existing player"
    );
}
