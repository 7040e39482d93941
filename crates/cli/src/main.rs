mod cli;
mod error;
mod logging;
mod replay;

use std::io::Read;

use clap::Parser;
use droptune::ShellConfig;
use tracing::error;

use crate::cli::Cli;
use crate::error::{ReplayError, Result};

#[tokio::main]
async fn main() {
	let cli = Cli::parse();
	logging::init_logging(cli.verbose);

	if let Err(err) = run(cli).await {
		error!(target = "droptune", error = %err, "replay failed");
		std::process::exit(1);
	}
}

async fn run(cli: Cli) -> Result<()> {
	let config = match &cli.config {
		Some(path) => ShellConfig::from_file(path)?,
		None => ShellConfig::default(),
	};

	let script = if cli.script.as_os_str() == "-" {
		let mut buf = String::new();
		std::io::stdin().read_to_string(&mut buf)?;
		buf
	} else {
		std::fs::read_to_string(&cli.script).map_err(|source| ReplayError::Script {
			path: cli.script.clone(),
			source,
		})?
	};

	let messages = replay::parse_script(&script)?;
	let report = replay::replay(config, messages, !cli.no_start).await?;
	println!("{}", serde_json::to_string_pretty(&report)?);
	Ok(())
}
