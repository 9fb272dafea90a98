mod config;

use anyhow::Result;
use clap::{Arg, ArgAction, Command};
use leafsync_core::{recent_items, render_recent_fragment, PandocConverter, PandocOptions, Syncer};
use tracing_subscriber::EnvFilter;

fn make_command() -> Command {
    Command::new("leafsync")
        .about("Keep generated Leaf templates in lock-step with markdown posts")
        .arg(
            Arg::new("original-dir")
                .long("original-dir")
                .value_name("DIR")
                .required(true)
                .help("Directory of <filename>.md markdown files under markdown/"),
        )
        .arg(
            Arg::new("processed-dir")
                .long("processed-dir")
                .value_name("DIR")
                .required(true)
                .help("Directory for generated <filename>.leaf resources under leaf/m/"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .default_value("./leafsync.toml")
                .help("Configuration file"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::SetTrue)
                .help("Print extra processing information"),
        )
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let matches = make_command().get_matches();
    init_tracing(matches.get_flag("verbose"));

    let config = config::load_sync_config(&matches)?;

    let converter = PandocConverter::new(&config.pandoc_path, PandocOptions::default());
    let syncer = Syncer::new(&config, &converter);
    let outcome = syncer.run()?;

    let report = &outcome.report;
    println!(
        "added {} / skipped {} / dropped {} / failed {}",
        report.added,
        report.skipped,
        report.dropped,
        report.failures.len()
    );
    for failure in &report.failures {
        eprintln!("  {}: {}", failure.rel_path, failure.error);
    }

    // Recent menu fragment for BaseRecent.leaf
    let items = recent_items(&outcome.sources, config.recent_max);
    print!("{}", render_recent_fragment(&items));

    Ok(())
}
