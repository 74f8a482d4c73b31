mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use std::io;

use quill_config::Config;
use quill_logger::LogLevel;

use app::PromptConfirm;
use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // A broken config should not stop the editor
    let config = Config::load().unwrap_or_default();

    if let Ok(log_path) = config.log_file_path() {
        let min_level = config
            .logging
            .min_level
            .parse()
            .unwrap_or(LogLevel::Info);
        quill_logger::init(log_path, config.logging.max_entries, min_level);
    }

    let stdin = io::stdin();
    let mut confirm = PromptConfirm::new(stdin.lock(), io::stderr());
    let mut stdout = io::stdout().lock();

    let result = app::run(&cli, &config.search, &mut confirm, &mut stdout);
    if let Err(err) = &result {
        quill_logger::error(format!("{:#}", err));
    }
    result
}
