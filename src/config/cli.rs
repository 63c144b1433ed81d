use crate::app::export::ExportFormat;
use crate::config::toml_config::TomlConfig;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "sattori")]
#[command(about = "Keep score for a game of Sattori, lowest total wins")]
pub struct CliConfig {
    /// Path to TOML configuration file (defaults to ./sattori.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding the saved game, overrides the configuration file
    #[arg(long)]
    pub data_dir: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Answer yes to every confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Enter players and scores interactively (default)
    Play,
    /// Print the saved game
    Status,
    /// Write the scoreboard as CSV or TSV
    Export {
        #[arg(long, value_enum, default_value_t = ExportFormat::Csv)]
        format: ExportFormat,

        /// Output file, stdout when omitted
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Discard the saved game
    Reset,
}

impl CliConfig {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Play)
    }

    /// 載入設定檔並套用命令列覆蓋設定
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = TomlConfig::load(self.config.as_deref())?;

        if let Some(data_dir) = &self.data_dir {
            tracing::debug!("🔧 Data directory overridden to: {}", data_dir);
            config.storage.data_dir = data_dir.clone();
        }

        config.validate()?;
        Ok(config)
    }
}
