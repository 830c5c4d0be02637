use super::*;

// =============================================================
// PresenceState::tick
// =============================================================

#[test]
fn default_state_is_connected_with_three_users() {
    let state = PresenceState::default();
    assert!(state.connected);
    assert_eq!(state.user_count, 3);
}

#[test]
fn new_clamps_user_count_to_one() {
    assert_eq!(PresenceState::new(0).user_count, 1);
    assert_eq!(PresenceState::new(5).user_count, 5);
}

#[test]
fn user_count_never_drops_below_one() {
    let mut rng = StdRng::seed_from_u64(42);
    let mut state = PresenceState::new(1);
    for _ in 0..10_000 {
        state.tick(&mut rng);
        assert!(state.user_count >= 1);
    }
}

#[test]
fn tick_moves_user_count_by_at_most_one() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut state = PresenceState::new(50);
    for _ in 0..1_000 {
        let before = state.user_count;
        state.tick(&mut rng);
        assert!(before.abs_diff(state.user_count) <= 1);
    }
}

#[test]
fn tick_visits_every_delta_and_both_connection_states() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut state = PresenceState::new(1_000);
    let (mut up, mut down, mut flat, mut online, mut offline) = (false, false, false, false, false);
    for _ in 0..1_000 {
        let before = state.user_count;
        state.tick(&mut rng);
        match state.user_count.cmp(&before) {
            std::cmp::Ordering::Greater => up = true,
            std::cmp::Ordering::Less => down = true,
            std::cmp::Ordering::Equal => flat = true,
        }
        if state.connected {
            online = true;
        } else {
            offline = true;
        }
    }
    assert!(up && down && flat);
    assert!(online && offline);
}

#[test]
fn same_seed_same_sequence() {
    let mut a = PresenceState::default();
    let mut b = PresenceState::default();
    let mut rng_a = StdRng::seed_from_u64(99);
    let mut rng_b = StdRng::seed_from_u64(99);
    for _ in 0..100 {
        a.tick(&mut rng_a);
        b.tick(&mut rng_b);
        assert_eq!(a, b);
    }
}

// =============================================================
// PresenceSimulator
// =============================================================

fn seeded(seed: u64) -> PresenceConfig {
    PresenceConfig { seed: Some(seed), ..PresenceConfig::default() }
}

#[tokio::test(start_paused = true)]
async fn simulator_publishes_initial_state_before_first_tick() {
    let sim = PresenceSimulator::spawn(&Handle::current(), seeded(3));
    assert_eq!(sim.snapshot(), PresenceState::default());
    assert!(sim.is_running());
}

#[tokio::test(start_paused = true)]
async fn simulator_ticks_on_interval() {
    let start = Instant::now();
    let sim = PresenceSimulator::spawn(&Handle::current(), seeded(3));
    let mut rx = sim.subscribe();

    rx.changed().await.unwrap();
    assert!(start.elapsed() >= PRESENCE_INTERVAL);
    rx.changed().await.unwrap();
    assert!(start.elapsed() >= PRESENCE_INTERVAL * 2);
}

#[tokio::test(start_paused = true)]
async fn simulator_matches_manual_ticks_for_same_seed() {
    let sim = PresenceSimulator::spawn(&Handle::current(), seeded(11));
    let mut rx = sim.subscribe();

    let mut rng = StdRng::seed_from_u64(11);
    let mut expected = PresenceState::default();
    for _ in 0..5 {
        rx.changed().await.unwrap();
        expected.tick(&mut rng);
        assert_eq!(*rx.borrow_and_update(), expected);
        assert!(rx.borrow().user_count >= 1);
    }
}

#[tokio::test(start_paused = true)]
async fn stop_ends_the_task() {
    let mut sim = PresenceSimulator::spawn(&Handle::current(), seeded(5));
    let mut rx = sim.subscribe();
    sim.stop();
    assert!(!sim.is_running());
    // The aborted task drops its sender; no further ticks arrive.
    assert!(rx.changed().await.is_err());
    sim.stop();
}

#[tokio::test(start_paused = true)]
async fn drop_stops_the_task() {
    let sim = PresenceSimulator::spawn(&Handle::current(), seeded(5));
    let mut rx = sim.subscribe();
    drop(sim);
    assert!(rx.changed().await.is_err());
}
