pub mod export;
pub mod render;
pub mod shell;

pub use export::ExportFormat;
pub use shell::{parse_command, Shell, ShellCommand};
