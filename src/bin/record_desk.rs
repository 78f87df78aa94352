//! The `record-desk` command line.  Each subcommand runs one of the desk programs in the terminal.

use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use record_desk::apps::{self, Program};
use record_desk::console::Console;
use record_desk::logging::init_logging;

#[derive(Debug, Parser)]
#[command(name = "record-desk", version, about = "Menu-driven record keeping programs with flat-file storage")]
struct Cli {
    /// Directory that holds the data files
    #[arg(long, env = "RECORD_DESK_DATA_DIR", default_value = ".")]
    data_dir : PathBuf,

    /// Log filter, e.g. `info` or `record_desk=debug`.  Overrides RUST_LOG
    #[arg(long)]
    log_level : Option<String>,

    #[command(subcommand)]
    program : Program,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref())?;

    std::fs::create_dir_all(&cli.data_dir)
        .with_context(|| format!("creating data directory {}", cli.data_dir.display()))?;
    debug!(program = ?cli.program, data_dir = %cli.data_dir.display(), "starting");

    let stdin = io::stdin();
    let mut console = Console::new(stdin.lock(), io::stdout());
    apps::run(cli.program, &mut console, &cli.data_dir)
}
