use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::Level;

use crate::config::{read_config, resolve_settings};
use crate::pipeline;
use bench_report_cli_types::Cli;

pub fn handle_calls() -> Result<()> {
    let cli = Cli::parse();
    let logger_level = match cli.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(logger_level.as_str())).init();

    let config = read_config(cli.config.as_deref())?;
    let settings = resolve_settings(cli.input, cli.output_dir, cli.formats, &config);
    log::debug!("Resolved settings: {:?}", settings);

    println!("BENCHMARK PERFORMANCE ANALYSIS");
    println!("{}", "=".repeat(50));

    pipeline::run(&settings)?;
    Ok(())
}
