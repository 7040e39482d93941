use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "droptune-replay")]
#[command(about = "Replay engine and page events through the Droptune shell")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv trace)
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub verbose: u8,

	/// Shell configuration file (JSON)
	#[arg(short, long, value_name = "FILE")]
	pub config: Option<PathBuf>,

	/// Do not visit the base URL before replaying
	#[arg(long)]
	pub no_start: bool,

	/// Newline-delimited inbound messages; `-` reads stdin
	#[arg(default_value = "-")]
	pub script: PathBuf,
}
