use sattori::app::export::scoreboard_to_string;
use sattori::{
    ExportFormat, JsonLedgerStore, MemoryStore, Screen, ScoreKeeper, SessionSettings,
    SessionState, Shell,
};
use std::io::Cursor;

type MemoryKeeper = ScoreKeeper<JsonLedgerStore<MemoryStore>>;

fn run_script(
    keeper: MemoryKeeper,
    script: &str,
    assume_yes: bool,
) -> (MemoryKeeper, String) {
    let input = Cursor::new(script.as_bytes().to_vec());
    let mut shell = Shell::new(input, Vec::new(), keeper, assume_yes);
    shell.run().unwrap();
    let (keeper, output) = shell.into_parts();
    (keeper, String::from_utf8(output).unwrap())
}

fn fresh_keeper() -> MemoryKeeper {
    ScoreKeeper::activate(
        JsonLedgerStore::new(MemoryStore::new()),
        SessionSettings::default(),
    )
    .unwrap()
}

#[test]
fn test_full_game_through_shell() {
    let script = "\
add Ana
add Ana
add
start
add Bo
add Cy
start
score Ana 5
next
score Bo 3
score Cy 3
next
round 1 0 0
finish
score Ana 1
quit
";
    let (keeper, output) = run_script(fresh_keeper(), script, false);

    assert!(output.contains("❌ Player name must be unique."));
    assert!(output.contains("❌ Player name cannot be empty."));
    assert!(output.contains("❌ At least 2 players are required."));
    assert!(output.contains("❌ All players must enter their scores before proceeding."));
    assert!(output.contains("🏆 Winner: Tie between Bo, Cy"));
    assert!(output.contains("The game is finished. Type 'reset' to start over."));

    let session = keeper.session();
    assert_eq!(session.state(), SessionState::Finished);
    assert_eq!(session.roster(), &["Ana", "Bo", "Cy"]);
    assert_eq!(session.ledger().len(), 2);
    assert_eq!(session.total("Ana"), 6.0);
    assert_eq!(session.total("Bo"), 3.0);

    let csv = scoreboard_to_string(session, ExportFormat::Csv).unwrap();
    assert_eq!(
        csv,
        "Player,Round 1,Round 2,Total\nAna,5,1,6\nBo,3,0,3\nCy,3,0,3\n"
    );
}

#[test]
fn test_round_command_checks_value_count() {
    let script = "add A\nadd B\nstart\nround 1\nround 1 2 3\nround 4 2\nnext\n";
    let (keeper, output) = run_script(fresh_keeper(), script, false);

    assert_eq!(output.matches("Expected 2 scores (A, B), got").count(), 2);
    assert_eq!(keeper.session().ledger().len(), 1);
    assert_eq!(keeper.session().total("A"), 4.0);
}

#[test]
fn test_reset_asks_on_same_input() {
    let script = "add A\nadd B\nstart\nround 1 2\nnext\nreset\nno\nreset\ny\n";
    let (keeper, output) = run_script(fresh_keeper(), script, false);

    assert!(output.contains("Are you sure you want to reset the game? [y/N]"));
    assert!(output.contains("Reset cancelled."));
    assert!(output.contains("Game reset."));
    assert_eq!(keeper.screen(), Screen::Roster);
    assert!(keeper.session().store().inner().is_empty());
}

#[test]
fn test_assume_yes_skips_prompt() {
    let script = "add A\nadd B\nstart\nreset\n";
    let (keeper, output) = run_script(fresh_keeper(), script, true);

    assert!(!output.contains("[y/N]"));
    assert!(output.contains("Game reset."));
    assert_eq!(keeper.screen(), Screen::Roster);
}

#[test]
fn test_saved_game_opens_on_scoreboard() {
    let mut kv = MemoryStore::new();
    kv.insert_raw("rounds", r#"[{"Ana":2,"Bo":"7"}]"#);
    let keeper =
        ScoreKeeper::activate(JsonLedgerStore::new(kv), SessionSettings::default()).unwrap();

    let (keeper, output) = run_script(keeper, "add Cy\nscore Ana 1\nscore Bo 1\nfinish\n", false);

    assert!(output.starts_with("Scoreboard\n"));
    assert!(output.contains("The game is already running."));
    assert!(output.contains("🏆 Winner: Ana"));
    assert_eq!(keeper.session().ledger().len(), 2);
}

#[test]
fn test_unknown_commands_and_help() {
    let (_, output) = run_script(fresh_keeper(), "dance\nhelp\nscore A 1\n", false);

    assert!(output.contains("Unknown command 'dance'."));
    assert!(output.contains("add <name>"));
    assert!(output.contains("Start the game first."));
}
