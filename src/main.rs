use anyhow::Context;
use clap::Parser;
use sattori::adapters::confirm::{FixedAnswer, LinePrompt};
use sattori::app::export::write_scoreboard;
use sattori::app::render::render_scoreboard;
use sattori::config::{CliConfig, Command, TomlConfig};
use sattori::core::ConfigProvider;
use sattori::utils::error::ErrorSeverity;
use sattori::utils::logger;
use sattori::{
    FileStore, JsonLedgerStore, Screen, ScoreError, ScoreKeeper, SessionSettings, Shell,
};
use std::io::{self, BufWriter, Write};

type Keeper = ScoreKeeper<JsonLedgerStore<FileStore>>;

fn main() {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if let Err(e) = run(&cli) {
        // 記錄詳細錯誤信息
        let exit_code = match e.downcast_ref::<ScoreError>() {
            Some(score_error) => {
                tracing::error!(
                    "❌ {} (Category: {:?}, Severity: {:?})",
                    score_error,
                    score_error.category(),
                    score_error.severity()
                );
                eprintln!("❌ {}", score_error.user_friendly_message());
                eprintln!("💡 {}", score_error.recovery_suggestion());

                // 根據錯誤嚴重程度決定退出碼
                match score_error.severity() {
                    ErrorSeverity::Low => 1,
                    ErrorSeverity::Medium => 2,
                    ErrorSeverity::High => 3,
                    ErrorSeverity::Critical => 4,
                }
            }
            None => {
                tracing::error!("❌ {:#}", e);
                eprintln!("❌ {:#}", e);
                1
            }
        };
        std::process::exit(exit_code);
    }
}

fn run(cli: &CliConfig) -> anyhow::Result<()> {
    let config = cli.resolve()?;
    tracing::debug!("Resolved config: {:?}", config);

    match cli.command() {
        Command::Play => play(&config, cli.yes),
        Command::Status => status(&config),
        Command::Export { format, output } => {
            let keeper = open_keeper(&config)?;
            if keeper.screen() == Screen::Roster {
                anyhow::bail!("No saved game to export");
            }

            match output {
                Some(path) => {
                    let file = std::fs::File::create(&path)
                        .with_context(|| format!("Failed to create export file '{}'", path))?;
                    write_scoreboard(keeper.session(), format, BufWriter::new(file))?;
                    tracing::info!("📁 Scoreboard saved to: {}", path);
                }
                None => write_scoreboard(keeper.session(), format, io::stdout().lock())?,
            }
            Ok(())
        }
        Command::Reset => {
            let mut keeper = open_keeper(&config)?;
            let reset = if cli.yes {
                keeper.reset_game(&mut FixedAnswer::new(true))?
            } else {
                let mut input = io::stdin().lock();
                let mut output = io::stdout();
                keeper.reset_game(&mut LinePrompt::new(&mut input, &mut output))?
            };
            println!("{}", if reset { "✅ Game reset." } else { "Reset cancelled." });
            Ok(())
        }
    }
}

fn open_keeper(config: &TomlConfig) -> anyhow::Result<Keeper> {
    let store = JsonLedgerStore::with_key(
        FileStore::new(config.data_dir().to_string()),
        config.storage_key(),
    );
    let keeper = ScoreKeeper::activate(store, SessionSettings::from_provider(config))
        .with_context(|| format!("Failed to open saved game in '{}'", config.data_dir()))?;
    Ok(keeper)
}

fn play(config: &TomlConfig, assume_yes: bool) -> anyhow::Result<()> {
    tracing::info!("🚀 Starting Sattori score keeper");
    let keeper = open_keeper(config)?;

    let stdin = io::stdin();
    let mut shell = Shell::new(stdin.lock(), io::stdout(), keeper, assume_yes);
    shell.run()?;

    let (_, mut output) = shell.into_parts();
    output.flush()?;
    Ok(())
}

fn status(config: &TomlConfig) -> anyhow::Result<()> {
    let keeper = open_keeper(config)?;
    match keeper.screen() {
        Screen::Roster => println!("No saved game. Run 'sattori play' to start one."),
        Screen::Scoreboard => print!("{}", render_scoreboard(keeper.session())),
    }
    Ok(())
}
