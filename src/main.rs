use anyhow::Result;
use clap::Parser;
use simplelog::LevelFilter;

use release_bump::cli::{orchestration, Args};
use release_bump::config;
use release_bump::git::Git2Repository;
use release_bump::ui;

fn initialize_logger(filter: LevelFilter) -> Result<()> {
    let config = simplelog::ConfigBuilder::new()
        .add_filter_allow_str("release_bump")
        .build();

    simplelog::TermLogger::init(
        filter,
        config,
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let root = std::env::current_dir()?;

    // Load configuration
    let config = match config::load_config(&root) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    initialize_logger(config.logging.level_filter()?)?;
    if let Some(path) = &config.source {
        log::debug!("loaded configuration from {}", path.display());
    }

    let repo = match Git2Repository::open(&root) {
        Ok(repo) => repo,
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    };

    let today = chrono::Local::now().date_naive();

    match orchestration::run_release_workflow(&root, &config, args.target(), today, &repo) {
        Ok(result) => {
            if let Some(commit) = &result.changelog_commit {
                ui::display_success(&format!("{} {}", commit.short_hash(), commit.message));
            }
            ui::display_success(&format!(
                "{} {}",
                result.version_commit.short_hash(),
                result.version_commit.message
            ));
            ui::display_version_change(&result.current, &result.target);
            Ok(())
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
