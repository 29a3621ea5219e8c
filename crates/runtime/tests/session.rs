//! End-to-end session scenarios against the bundled content pack and small
//! hand-built packs.

use std::sync::Arc;
use std::time::Duration;

use quest_content::{ContentFactory, ContentPack, StepEntry, WorldGraph, bundled_data_dir};
use quest_core::{
    BattleEvent, Combatant, EncounterOrigin, FollowUp, GameConfig, HeroTemplate, Location, LocationId,
    MonsterTemplate, MonsterTemplateId, PlayerId, PlayerSetup, PuzzleTypeId, SavedSession,
    SessionId, SessionStatus, Station, StationId,
};
use quest_runtime::{
    ChannelDispatcher, Event, EventBus, GameSession, InMemorySessionRepo, OracleManager,
    RepositoryError, SessionConfig, SessionEvent, SessionRepository, Topic,
};
use tokio::sync::broadcast;

const PLAYER: PlayerId = PlayerId(1);

fn bundled_oracles() -> OracleManager {
    let pack = ContentFactory::new(bundled_data_dir())
        .load_all()
        .expect("bundled pack loads");
    OracleManager::from_content(pack)
}

fn knight() -> PlayerSetup {
    PlayerSetup::new(PLAYER, "Ada", "knight")
}

/// One location, one station, `steps` steps of the given monster.
fn tiny_pack(hero: HeroTemplate, monster: MonsterTemplate, steps: u32) -> ContentPack {
    let location = LocationId::new("yard");
    let station = StationId::new("yard_gate");
    ContentPack {
        config: GameConfig::with_total_steps(steps),
        world: WorldGraph {
            locations: vec![Location {
                id: location.clone(),
                name: "Yard".into(),
                order: 1,
            }],
            stations: vec![Station {
                id: station.clone(),
                location,
                name: "Gate".into(),
                order: 1,
            }],
        },
        steps: (1..=steps)
            .map(|step| StepEntry {
                station: station.clone(),
                step,
                monster: monster.id.clone(),
                puzzle: PuzzleTypeId::new("word_search"),
            })
            .collect(),
        monsters: vec![monster],
        heroes: vec![hero],
    }
}

fn hero(id: &str, hp: u32, attack: u32) -> HeroTemplate {
    HeroTemplate {
        id: id.into(),
        name: id.to_string(),
        base_hp: hp,
        base_attack: attack,
        base_defense: 0,
    }
}

async fn next_matching(
    rx: &mut broadcast::Receiver<Event>,
    mut matches: impl FnMut(&Event) -> bool,
) -> Event {
    let wait = async {
        loop {
            let event = rx.recv().await.expect("event bus open");
            if matches(&event) {
                return event;
            }
        }
    };
    tokio::time::timeout(Duration::from_secs(30), wait)
        .await
        .expect("event should arrive")
}

#[tokio::test]
async fn start_dispatches_the_first_puzzle() {
    let (dispatcher, mut requests) = ChannelDispatcher::new();
    let session = GameSession::builder()
        .config(SessionConfig::instant())
        .oracles(bundled_oracles())
        .dispatcher(Arc::new(dispatcher))
        .start(knight())
        .await
        .unwrap();

    let request = requests.recv().await.unwrap();
    assert_eq!(request.session, SessionId(1));
    assert_eq!(request.position.station.as_str(), "meadow_gate");
    assert_eq!(request.position.step_index, 1);
    assert_eq!(request.puzzle, PuzzleTypeId::new("word_search"));

    match &session.opening().events[0] {
        BattleEvent::EncounterStarted { monster, hp, .. } => {
            assert_eq!(monster, &MonsterTemplateId::new("slime"));
            assert_eq!(*hp, 20);
        }
        other => panic!("unexpected opening event {:?}", other),
    }

    let state = session.handle().query().await.unwrap();
    assert_eq!(state.status, SessionStatus::Active);
    assert_eq!(state.player.hp(), 100);
}

#[tokio::test(start_paused = true)]
async fn second_signal_during_pacing_is_rejected() {
    let session = GameSession::builder()
        .config(SessionConfig::default())
        .oracles(bundled_oracles())
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    let report = handle.puzzle_correct(1, false).await.unwrap();
    assert_eq!(report.follow_up, FollowUp::Continue);

    let before = handle.query().await.unwrap();
    let err = handle.puzzle_correct(1, false).await.unwrap_err();
    assert!(err.is_rejection());
    let err = handle.puzzle_wrong().await.unwrap_err();
    assert!(err.is_rejection());
    assert_eq!(handle.query().await.unwrap(), before);

    tokio::time::sleep(Duration::from_millis(400)).await;

    let state = handle.query().await.unwrap();
    assert!(state.guard.is_idle());
    assert_eq!(state.monster.as_ref().unwrap().hp(), 10);
    handle.puzzle_correct(1, false).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn defeat_advances_and_autosaves() {
    let bus = EventBus::new();
    let mut progress = bus.subscribe(Topic::Progress);
    let mut lifecycle = bus.subscribe(Topic::Session);
    let repository = Arc::new(InMemorySessionRepo::new());

    let session = GameSession::builder()
        .config(SessionConfig::default())
        .oracles(bundled_oracles())
        .repository(repository.clone())
        .event_bus(bus)
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    let report = handle.puzzle_correct(2, false).await.unwrap();
    assert_eq!(report.follow_up, FollowUp::MonsterDefeated);

    let advanced = next_matching(&mut progress, |event| {
        matches!(event, Event::Battle(BattleEvent::PositionAdvanced { .. }))
    })
    .await;
    let Event::Battle(BattleEvent::PositionAdvanced { to, .. }) = advanced else {
        unreachable!()
    };
    assert_eq!(to.step_index, 2);

    next_matching(&mut lifecycle, |event| {
        matches!(event, Event::Session(SessionEvent::Saved { .. }))
    })
    .await;
    let saved = repository.load(PLAYER).unwrap().expect("autosaved");
    assert_eq!(saved.position.step_index, 2);
    assert_eq!(saved.profile.currency, 3);
    assert_eq!(saved.monster.unwrap().hp, 20);
}

type RepoResult<T> = Result<T, RepositoryError>;

/// Store whose disk is always full.
struct ReadOnlyRepo;

impl SessionRepository for ReadOnlyRepo {
    fn save(&self, _player: PlayerId, _session: &SavedSession) -> RepoResult<()> {
        Err(RepositoryError::Io(std::io::Error::other("disk full")))
    }

    fn load(&self, _player: PlayerId) -> RepoResult<Option<SavedSession>> {
        Ok(None)
    }

    fn delete(&self, _player: PlayerId) -> RepoResult<()> {
        Ok(())
    }
}

#[tokio::test(start_paused = true)]
async fn failed_autosave_is_reported_and_play_continues() {
    let bus = EventBus::new();
    let mut lifecycle = bus.subscribe(Topic::Session);

    let session = GameSession::builder()
        .config(SessionConfig::default())
        .oracles(bundled_oracles())
        .repository(Arc::new(ReadOnlyRepo))
        .event_bus(bus)
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    let report = handle.puzzle_correct(2, false).await.unwrap();
    assert_eq!(report.follow_up, FollowUp::MonsterDefeated);

    let failed = next_matching(&mut lifecycle, |event| {
        matches!(event, Event::Session(SessionEvent::SaveFailed { .. }))
    })
    .await;
    let Event::Session(SessionEvent::SaveFailed { player, reason }) = failed else {
        unreachable!()
    };
    assert_eq!(player, PLAYER);
    assert!(reason.contains("disk full"));

    let state = handle.query().await.unwrap();
    assert_eq!(state.status, SessionStatus::Active);
    assert_eq!(state.player.position.step_index, 2);
    assert_eq!(state.monster.as_ref().unwrap().hp(), 20);
    handle.puzzle_correct(1, false).await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn end_drops_the_pending_follow_up() {
    let bus = EventBus::new();
    let mut rewards = bus.subscribe(Topic::Reward);
    let mut lifecycle = bus.subscribe(Topic::Session);
    let repository = Arc::new(InMemorySessionRepo::new());

    let session = GameSession::builder()
        .oracles(bundled_oracles())
        .repository(repository.clone())
        .event_bus(bus)
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    let report = handle.puzzle_correct(2, false).await.unwrap();
    let cancelled = handle.end().await.unwrap();
    assert_eq!(cancelled, Some(report.ticket));

    session.shutdown().await.unwrap();
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(rewards.try_recv().is_err());
    assert!(repository.load(PLAYER).unwrap().is_none());
    next_matching(&mut lifecycle, |event| {
        matches!(event, Event::Session(SessionEvent::Ended { .. }))
    })
    .await;
    assert!(handle.query().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn restore_during_pacing_makes_the_round_stale() {
    let bus = EventBus::new();
    let mut rewards = bus.subscribe(Topic::Reward);
    let mut lifecycle = bus.subscribe(Topic::Session);

    let session = GameSession::builder()
        .oracles(bundled_oracles())
        .event_bus(bus)
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    let saved = handle.save().await.unwrap();
    let report = handle.puzzle_correct(2, false).await.unwrap();
    assert_eq!(report.follow_up, FollowUp::MonsterDefeated);

    let request = handle.restore(saved).await.unwrap();
    assert_eq!(request.session, SessionId(2));

    let cancelled = next_matching(&mut lifecycle, |event| {
        matches!(event, Event::Session(SessionEvent::RoundCancelled { .. }))
    })
    .await;
    assert_eq!(
        cancelled,
        Event::Session(SessionEvent::RoundCancelled {
            ticket: report.ticket
        })
    );

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert!(rewards.try_recv().is_err());

    let state = handle.query().await.unwrap();
    assert_eq!(state.session, SessionId(2));
    assert!(state.guard.is_idle());
    assert_eq!(state.monster.as_ref().unwrap().hp(), 20);
    assert_eq!(state.player.position.step_index, 1);
}

#[tokio::test]
async fn save_is_refused_while_a_round_is_paced() {
    let session = GameSession::builder()
        .config(SessionConfig {
            hit_delay: Duration::from_secs(60),
            ..SessionConfig::default()
        })
        .oracles(bundled_oracles())
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    handle.puzzle_correct(1, false).await.unwrap();
    let err = handle.save().await.unwrap_err();
    assert!(err.is_rejection());
    handle.end().await.unwrap();
}

#[tokio::test]
async fn resume_and_new_game_use_the_stored_snapshot() {
    let repository = Arc::new(InMemorySessionRepo::new());
    let session = GameSession::builder()
        .config(SessionConfig::instant())
        .oracles(bundled_oracles())
        .repository(repository.clone())
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();

    assert!(handle.resume().await.unwrap().is_none());

    let mut saved = handle.save().await.unwrap();
    saved.hp = 42;
    repository.save(PLAYER, &saved).unwrap();

    let request = handle.resume().await.unwrap().expect("snapshot stored");
    assert_eq!(request.session, SessionId(2));
    assert_eq!(handle.query().await.unwrap().player.hp(), 42);

    let request = handle.new_game().await.unwrap();
    assert_eq!(request.session, SessionId(3));
    assert_eq!(request.position.step_index, 1);
    assert!(!repository.exists(PLAYER));
    assert_eq!(handle.query().await.unwrap().player.hp(), 100);
}

#[tokio::test]
async fn player_defeat_deletes_the_snapshot() {
    let brute = MonsterTemplate::builder("brute").hp(50).attack(30).build();
    let pack = tiny_pack(hero("glass", 5, 1), brute, 2);

    let bus = EventBus::new();
    let mut battle = bus.subscribe(Topic::Battle);
    let repository = Arc::new(InMemorySessionRepo::new());
    let session = GameSession::builder()
        .config(SessionConfig::instant())
        .oracles(OracleManager::from_content(pack))
        .repository(repository.clone())
        .event_bus(bus)
        .start(PlayerSetup::new(PLAYER, "Ada", "glass"))
        .await
        .unwrap();
    let handle = session.handle();

    handle.save().await.unwrap();
    assert!(repository.exists(PLAYER));

    let report = handle.puzzle_wrong().await.unwrap();
    assert_eq!(report.follow_up, FollowUp::PlayerDefeated);
    next_matching(&mut battle, |event| {
        matches!(event, Event::Battle(BattleEvent::PlayerDefeated { .. }))
    })
    .await;

    let state = handle.query().await.unwrap();
    assert_eq!(state.status, SessionStatus::Defeated);
    assert!(!repository.exists(PLAYER));
    assert!(handle.puzzle_wrong().await.is_err());
}

#[tokio::test]
async fn last_monster_completes_the_game() {
    let dummy = MonsterTemplate::builder("dummy").hp(1).attack(1).build();
    let pack = tiny_pack(hero("knight", 100, 10), dummy, 1);

    let bus = EventBus::new();
    let mut progress = bus.subscribe(Topic::Progress);
    let (dispatcher, mut requests) = ChannelDispatcher::new();
    let session = GameSession::builder()
        .config(SessionConfig::instant())
        .oracles(OracleManager::from_content(pack))
        .dispatcher(Arc::new(dispatcher))
        .event_bus(bus)
        .start(knight())
        .await
        .unwrap();
    let handle = session.handle();
    requests.recv().await.unwrap();

    handle.puzzle_correct(1, true).await.unwrap();
    next_matching(&mut progress, |event| {
        matches!(event, Event::Battle(BattleEvent::GameComplete { .. }))
    })
    .await;

    let state = handle.query().await.unwrap();
    assert_eq!(state.status, SessionStatus::Complete);
    assert!(state.monster.is_none());
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn missing_step_spawns_the_fallback_monster() {
    let mut pack = tiny_pack(
        hero("knight", 100, 10),
        MonsterTemplate::builder("dummy").build(),
        1,
    );
    pack.steps.clear();

    let session = GameSession::builder()
        .config(SessionConfig::instant())
        .oracles(OracleManager::from_content(pack))
        .start(knight())
        .await
        .unwrap();

    match &session.opening().events[0] {
        BattleEvent::EncounterStarted { origin, monster, .. } => {
            assert!(origin.is_fallback());
            assert!(matches!(origin, EncounterOrigin::Fallback(_)));
            assert_eq!(monster.as_str(), GameConfig::FALLBACK_MONSTER_ID);
        }
        other => panic!("unexpected opening event {:?}", other),
    }
}

#[tokio::test]
async fn unknown_hero_fails_to_start() {
    let err = GameSession::builder()
        .oracles(bundled_oracles())
        .start(PlayerSetup::new(PLAYER, "Ada", "bard"))
        .await
        .err()
        .expect("unknown hero");
    assert_eq!(err.error_code(), "BATTLE_UNKNOWN_HERO");

    let err = GameSession::builder()
        .start(knight())
        .await
        .err()
        .expect("no oracles");
    assert_eq!(err.error_code(), "SESSION_MISSING_ORACLES");
}
