use sattori::{
    FileStore, FixedAnswer, JsonLedgerStore, Screen, ScoreError, ScoreKeeper, SessionSettings,
    SessionState,
};
use std::collections::HashSet;
use std::path::Path;
use tempfile::TempDir;

type FileKeeper = ScoreKeeper<JsonLedgerStore<FileStore>>;

fn open(dir: &Path, settings: SessionSettings) -> FileKeeper {
    let store = JsonLedgerStore::new(FileStore::new(dir.to_str().unwrap().to_string()));
    ScoreKeeper::activate(store, settings).unwrap()
}

fn play_rounds(keeper: &mut FileKeeper, rounds: &[&[(&str, &str)]]) {
    for round in rounds {
        for (player, score) in round.iter() {
            keeper.session_mut().set_pending_score(player, *score).unwrap();
        }
        keeper.session_mut().next_round().unwrap();
    }
}

#[test]
fn test_saved_game_survives_reload() {
    let temp_dir = TempDir::new().unwrap();

    let mut keeper = open(temp_dir.path(), SessionSettings::default());
    for name in ["Zoe", "Adam", "Mia"] {
        keeper.roster_mut().add_player(name).unwrap();
    }
    keeper.start_game().unwrap();
    play_rounds(
        &mut keeper,
        &[
            &[("Zoe", "4"), ("Adam", "10"), ("Mia", "2")],
            &[("Mia", "7"), ("Zoe", "1"), ("Adam", "0")],
        ],
    );
    let saved_totals = keeper.session().totals();
    let saved_roster: HashSet<String> = keeper.session().roster().iter().cloned().collect();
    drop(keeper);

    let saved = std::fs::read_to_string(temp_dir.path().join("rounds.json")).unwrap();
    assert!(saved.starts_with(r#"[{"Zoe":"4","Adam":"10","Mia":"2"}"#));

    let reloaded = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(reloaded.screen(), Screen::Scoreboard);
    assert_eq!(reloaded.session().state(), SessionState::InProgress);

    let reloaded_roster: HashSet<String> = reloaded.session().roster().iter().cloned().collect();
    assert_eq!(reloaded_roster, saved_roster);
    // 玩家順序沿用第一回合的欄位順序
    assert_eq!(reloaded.session().roster(), &["Zoe", "Adam", "Mia"]);
    assert_eq!(reloaded.session().totals(), saved_totals);
    assert_eq!(reloaded.session().ledger().len(), 2);
}

#[test]
fn test_reloaded_game_continues_and_finishes() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("rounds.json"),
        r#"[{"A":5,"B":"3","C":3}]"#,
    )
    .unwrap();

    let mut keeper = open(temp_dir.path(), SessionSettings::default());
    for (player, score) in [("A", "-3"), ("B", "1"), ("C", "1")] {
        keeper.session_mut().set_pending_score(player, score).unwrap();
    }
    keeper.session_mut().finish_game().unwrap();

    assert_eq!(keeper.session().winner().unwrap().to_string(), "A");
    drop(keeper);

    // 結束後的遊戲重新載入仍會回到計分板
    let reloaded = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(reloaded.session().ledger().len(), 2);
    assert_eq!(reloaded.session().total("A"), 2.0);
}

#[test]
fn test_corrupt_save_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rounds.json");
    std::fs::write(&path, "[{\"A\": 1,").unwrap();

    let keeper = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(keeper.screen(), Screen::Roster);
    assert!(!path.exists());
}

#[test]
fn test_non_utf8_save_starts_fresh() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("rounds.json");
    std::fs::write(&path, [0xff, 0xfe, b'[', b']']).unwrap();

    let keeper = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(keeper.screen(), Screen::Roster);
    assert!(keeper.session().ledger().is_empty());
    assert!(!path.exists());
}

#[test]
fn test_reserved_names_cannot_join_a_saved_game() {
    let temp_dir = TempDir::new().unwrap();
    let mut keeper = open(temp_dir.path(), SessionSettings::default());

    let err = keeper.roster_mut().add_player("date").unwrap_err();
    assert!(matches!(err, ScoreError::ReservedName { .. }));
    keeper.roster_mut().add_player("Ana").unwrap();
    keeper.roster_mut().add_player("Bo").unwrap();
    keeper.start_game().unwrap();
    play_rounds(&mut keeper, &[&[("Ana", "1"), ("Bo", "5")]]);
    let before = keeper.session().totals();
    drop(keeper);

    let reloaded = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(reloaded.session().roster(), &["Ana", "Bo"]);
    assert_eq!(reloaded.session().totals(), before);
}

#[test]
fn test_reserved_keys_follow_settings() {
    let temp_dir = TempDir::new().unwrap();
    let settings = SessionSettings {
        reserved_keys: vec!["note".to_string()],
        ..SessionSettings::default()
    };

    let mut keeper = open(temp_dir.path(), settings.clone());
    assert!(keeper.roster_mut().add_player("note").is_err());
    keeper.roster_mut().add_player("date").unwrap();
    keeper.roster_mut().add_player("Bo").unwrap();
    keeper.start_game().unwrap();
    play_rounds(&mut keeper, &[&[("date", "1"), ("Bo", "5")]]);
    drop(keeper);

    let reloaded = open(temp_dir.path(), settings);
    assert_eq!(reloaded.session().roster(), &["date", "Bo"]);
    assert_eq!(reloaded.session().total("date"), 1.0);
}

#[test]
fn test_reset_removes_saved_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut keeper = open(temp_dir.path(), SessionSettings::default());
    keeper.roster_mut().add_player("A").unwrap();
    keeper.roster_mut().add_player("B").unwrap();
    keeper.start_game().unwrap();
    play_rounds(&mut keeper, &[&[("A", "1"), ("B", "2")]]);

    let path = temp_dir.path().join("rounds.json");
    assert!(path.exists());

    keeper.reset_game(&mut FixedAnswer::new(true)).unwrap();
    assert!(!path.exists());

    let reloaded = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(reloaded.screen(), Screen::Roster);
}

#[test]
fn test_custom_reserved_keys() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("rounds.json"),
        r#"[{"note":"first","A":1,"B":2}]"#,
    )
    .unwrap();

    let settings = SessionSettings {
        reserved_keys: vec!["note".to_string()],
        ..SessionSettings::default()
    };
    let keeper = open(temp_dir.path(), settings);
    assert_eq!(keeper.session().roster(), &["A", "B"]);

    // 預設設定下 note 會被當成玩家
    let keeper = open(temp_dir.path(), SessionSettings::default());
    assert_eq!(keeper.session().roster(), &["note", "A", "B"]);
}

#[test]
fn test_stamped_rounds_reload() {
    let temp_dir = TempDir::new().unwrap();
    let settings = SessionSettings {
        stamp_rounds: true,
        ..SessionSettings::default()
    };

    let mut keeper = open(temp_dir.path(), settings.clone());
    keeper.roster_mut().add_player("A").unwrap();
    keeper.roster_mut().add_player("B").unwrap();
    keeper.start_game().unwrap();
    play_rounds(&mut keeper, &[&[("A", "1"), ("B", "2")], &[("A", "3"), ("B", "4")]]);
    drop(keeper);

    let saved = std::fs::read_to_string(temp_dir.path().join("rounds.json")).unwrap();
    assert!(saved.contains(r#""roundNumber":2"#));
    assert!(saved.contains(r#""timestamp""#));

    let reloaded = open(temp_dir.path(), settings);
    assert_eq!(reloaded.session().roster(), &["A", "B"]);
    assert_eq!(reloaded.session().total("B"), 6.0);
}
