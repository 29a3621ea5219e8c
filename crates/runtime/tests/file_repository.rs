use quest_core::{
    HeroId, LocationId, MonsterSnapshot, MonsterTemplateId, PlayerId, PlayerProfile,
    ProgressionPosition, SavedSession, StationId,
};
use quest_runtime::{FileSessionRepository, RepositoryError, SessionRepository};
use tempfile::TempDir;

fn saved(player: u64, step: u32) -> SavedSession {
    SavedSession {
        player_id: PlayerId(player),
        display_name: format!("learner {}", player),
        hero: HeroId::new("knight"),
        profile: PlayerProfile::default(),
        hp: 73,
        position: ProgressionPosition::new(
            LocationId::new("meadow"),
            StationId::new("meadow_pond"),
            step,
        ),
        monster: Some(MonsterSnapshot {
            template_id: MonsterTemplateId::new("frogling"),
            hp: 12,
            has_dropped_reward: false,
        }),
    }
}

#[test]
fn save_then_load_returns_the_snapshot() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();

    repo.save(PlayerId(7), &saved(7, 2)).unwrap();

    assert_eq!(repo.load(PlayerId(7)).unwrap(), Some(saved(7, 2)));
    assert!(repo.session_path(PlayerId(7)).exists());
    assert!(!repo.session_path(PlayerId(7)).with_extension("bin.tmp").exists());
}

#[test]
fn save_replaces_the_previous_snapshot() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();

    repo.save(PlayerId(7), &saved(7, 1)).unwrap();
    repo.save(PlayerId(7), &saved(7, 3)).unwrap();

    let loaded = repo.load(PlayerId(7)).unwrap().unwrap();
    assert_eq!(loaded.position.step_index, 3);
    assert_eq!(repo.list_players().unwrap(), vec![PlayerId(7)]);
}

#[test]
fn missing_snapshot_loads_as_none_and_deletes_cleanly() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path().join("nested")).unwrap();

    assert_eq!(repo.load(PlayerId(1)).unwrap(), None);
    repo.delete(PlayerId(1)).unwrap();
    assert!(!repo.exists(PlayerId(1)));
}

#[test]
fn list_players_ignores_foreign_files() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();

    repo.save(PlayerId(12), &saved(12, 1)).unwrap();
    repo.save(PlayerId(3), &saved(3, 1)).unwrap();
    std::fs::write(dir.path().join("notes.txt"), "hello").unwrap();
    std::fs::write(dir.path().join("session_abc.bin"), "x").unwrap();

    assert_eq!(repo.list_players().unwrap(), vec![PlayerId(3), PlayerId(12)]);

    repo.delete(PlayerId(3)).unwrap();
    assert_eq!(repo.list_players().unwrap(), vec![PlayerId(12)]);
}

#[test]
fn garbage_on_disk_is_reported_as_corrupted() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();

    std::fs::write(repo.session_path(PlayerId(5)), [0xff, 0x01]).unwrap();
    assert!(matches!(
        repo.load(PlayerId(5)),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn snapshot_under_the_wrong_name_is_rejected() {
    let dir = TempDir::new().unwrap();
    let repo = FileSessionRepository::new(dir.path()).unwrap();

    repo.save(PlayerId(9), &saved(8, 1)).unwrap();
    assert!(matches!(
        repo.load(PlayerId(9)),
        Err(RepositoryError::CorruptedData(_))
    ));
}

#[test]
fn file_names_round_trip_player_ids() {
    assert_eq!(
        FileSessionRepository::parse_file_name("session_42.bin"),
        Some(PlayerId(42))
    );
    assert_eq!(FileSessionRepository::parse_file_name("session_42.bin.tmp"), None);
    assert_eq!(FileSessionRepository::parse_file_name("state_42.bin"), None);
}
