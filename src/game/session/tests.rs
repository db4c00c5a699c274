use super::*;
use crate::game::types::Phase;
use std::time::Duration;

fn fixed_interval(interval_ms: u64) -> ConfigOverrides {
    ConfigOverrides {
        base_interval_ms: Some(interval_ms),
        min_interval_ms: Some(interval_ms),
        special_food_chance: Some(0.0),
        ..ConfigOverrides::default()
    }
}

fn drain_events(io: &mut SessionIo) -> Vec<serde_json::Value> {
    let mut events = Vec::new();
    while let Ok(payload) = io.events_rx.try_recv() {
        events.push(serde_json::from_str(&payload).unwrap());
    }
    events
}

#[tokio::test(start_paused = true)]
async fn running_session_ticks_at_its_interval() {
    let (session, mut io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.start(Some(fixed_interval(100)), None).await.unwrap();

    let events = drain_events(&mut io);
    assert_eq!(events[0]["type"], "stats");
    assert_eq!(events[0]["stats"]["phase"], "running");

    tokio::time::sleep(Duration::from_millis(1050)).await;
    assert_eq!(session.tick_count().await, 10);

    let frame: serde_json::Value =
        serde_json::from_str(&io.frames.take_latest().expect("frame published")).unwrap();
    assert_eq!(frame["type"], "frame");
    assert_eq!(frame["tick"], 10);
    assert_eq!(frame["stats"]["phase"], "running");
    assert!(!frame["commands"].as_array().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn stop_cancels_scheduled_ticks() {
    let (session, mut io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.start(Some(fixed_interval(50)), None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(220)).await;

    session.stop().await;
    assert_eq!(session.stats().await.phase, Phase::Idle);
    io.frames.take_latest();

    tokio::time::sleep(Duration::from_millis(500)).await;
    assert!(io.frames.take_latest().is_none());
    let events = drain_events(&mut io);
    assert_eq!(events.last().unwrap()["stats"]["phase"], "idle");
}

#[tokio::test(start_paused = true)]
async fn wall_collision_ends_the_loop_and_reports_game_over() {
    let (session, mut io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.start(Some(fixed_interval(100)), None).await.unwrap();
    assert!(session.propose_direction(Direction::Right));

    tokio::time::sleep(Duration::from_secs(3)).await;
    let stats = session.stats().await;
    assert_eq!(stats.phase, Phase::GameOver);
    assert!(stats.game_over);
    assert_eq!(stats.high_score, stats.score);

    let ticks = session.tick_count().await;
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(session.tick_count().await, ticks);

    let events = drain_events(&mut io);
    let game_over = events
        .iter()
        .find(|event| event["type"] == "gameOver")
        .expect("game over event");
    assert_eq!(game_over["cause"], "wall");
    assert_eq!(game_over["score"], stats.score);
}

#[tokio::test(start_paused = true)]
async fn restart_resets_score_and_keeps_high_score() {
    let (session, _io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.start(Some(fixed_interval(100)), None).await.unwrap();
    session.propose_direction(Direction::Right);
    tokio::time::sleep(Duration::from_secs(3)).await;
    let first = session.stats().await;
    assert_eq!(first.phase, Phase::GameOver);

    assert_eq!(session.controller.lock().await.high_score(), first.score);

    session.start(None, None).await.unwrap();
    let stats = session.stats().await;
    assert_eq!(stats.phase, Phase::Running);
    assert_eq!(stats.score, 0);
    assert_eq!(stats.level, 1);
    assert_eq!(stats.high_score, first.high_score);
    assert_eq!(stats.interval_ms, GameConfig::default().base_interval_ms);
}

#[tokio::test(start_paused = true)]
async fn invalid_start_config_is_reported() {
    let (session, mut io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    let keep_open = session
        .handle_text_message(r#"{"type":"start","config":{"cellSize":0}}"#)
        .await;
    assert!(keep_open);
    assert_eq!(session.stats().await.phase, Phase::Idle);

    let events = drain_events(&mut io);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["type"], "error");
}

#[tokio::test(start_paused = true)]
async fn text_input_reaches_the_pending_direction() {
    let (session, _io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.handle_text_message(r#"{"type":"start"}"#).await;
    session
        .handle_text_message(r#"{"type":"key","key":"ArrowUp"}"#)
        .await;
    assert_eq!(session.input.pending(), Direction::Up);

    session
        .handle_text_message(r#"{"type":"swipe","startX":0,"startY":0,"x":-50,"y":5}"#)
        .await;
    assert_eq!(session.input.pending(), Direction::Left);

    session
        .handle_text_message(r#"{"type":"direction","direction":"down"}"#)
        .await;
    assert_eq!(session.input.pending(), Direction::Down);

    session.handle_text_message(r#"{"type":"stop"}"#).await;
    assert_eq!(session.stats().await.phase, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn restart_while_running_replaces_the_previous_loop() {
    let (session, mut io) = Session::new(GameConfig::default(), DeviceProfile::Desktop);
    session.start(Some(fixed_interval(100)), None).await.unwrap();
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(session.tick_count().await, 2);

    session.start(Some(fixed_interval(100)), None).await.unwrap();
    assert_eq!(session.tick_count().await, 0);

    tokio::time::sleep(Duration::from_millis(1050)).await;
    assert_eq!(session.tick_count().await, 10);
    assert_eq!(session.stats().await.phase, Phase::Running);

    let restarts = drain_events(&mut io)
        .iter()
        .filter(|event| event["type"] == "stats")
        .count();
    assert_eq!(restarts, 2);
}
