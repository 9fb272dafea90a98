use anyhow::Result;
use clap::ArgMatches;
use config::{Config as ConfigBuilder, Environment, File};
use leafsync_core::config::SyncConfig;
use std::path::Path;

/// Load the sync configuration with cascading precedence:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (LEAFSYNC_*)
/// 3. Configuration file
/// 4. Defaults (lowest priority)
pub fn load_sync_config(args: &ArgMatches) -> Result<SyncConfig> {
    let config_file = args
        .get_one::<String>("config")
        .cloned()
        .unwrap_or_else(|| "./leafsync.toml".to_string());

    let mut builder = ConfigBuilder::builder();

    // 1. Start with defaults
    builder = builder.add_source(config::Config::try_from(&SyncConfig::default())?);

    // 2. Add configuration file if it exists
    if Path::new(&config_file).exists() {
        builder = builder.add_source(File::with_name(&config_file.replace(".toml", "")));
    }

    // 3. Add environment variables with LEAFSYNC_ prefix
    builder = builder.add_source(
        Environment::with_prefix("LEAFSYNC")
            .prefix_separator("_")
            .separator("__"),
    );

    // 4. Override with CLI arguments (highest priority)
    let mut cli_overrides = std::collections::HashMap::new();

    if let Some(original) = args.get_one::<String>("original-dir") {
        cli_overrides.insert("original_dir".to_string(), original.clone());
    }
    if let Some(processed) = args.get_one::<String>("processed-dir") {
        cli_overrides.insert("processed_dir".to_string(), processed.clone());
    }

    if !cli_overrides.is_empty() {
        builder = builder.add_source(config::Config::try_from(&cli_overrides)?);
    }

    let config = builder.build()?;
    let sync_config: SyncConfig = config.try_deserialize()?;

    Ok(sync_config)
}
