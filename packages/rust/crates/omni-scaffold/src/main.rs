//! omni-scaffold CLI: generate a project and print the report as JSON.
//!
//! Logging: set `RUST_LOG=omni_scaffold=debug` (or `--verbose`) to see
//! per-transform logs on stderr.

mod cli;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use omni_scaffold::{EnabledModules, Generator, Module, ScaffoldSettings, load_settings};

use crate::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if cli.verbose {
            "omni_scaffold=debug,omni_edit=debug,omni_io=debug"
        } else {
            "omni_scaffold=info,omni_edit=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let enabled = cli
        .modules
        .iter()
        .map(|name| name.parse::<Module>())
        .collect::<Result<EnabledModules, _>>()?;

    let overrides = ScaffoldSettings {
        dry_run: cli.dry_run.then_some(true),
        skip_install: cli.skip_install.then_some(true),
        ..ScaffoldSettings::default()
    };
    let settings =
        load_settings(&cli.template_root, cli.config.as_deref())?.with_overrides(overrides);

    let report = Generator::new(&cli.template_root, settings)
        .generate(&cli.project_dir, &enabled)
        .await?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
