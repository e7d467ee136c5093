pub mod server;

use std::{net::SocketAddr, path::PathBuf};

use clap::Parser;
use color_eyre::{Result, eyre};
use tracing_subscriber::EnvFilter;

use bella_config::Config;

#[derive(Debug, Parser)]
#[command(
	version = bella_cli::VERSION,
	rename_all = "kebab",
	styles = bella_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> Result<()> {
	let config = bella_config::load(&args.config)?;

	init_tracing(&config);
	enforce_loopback(&config)?;

	let api_base = resolve_api_base(&config);

	server::serve_mcp(&config.service.mcp_bind, &api_base).await
}

fn init_tracing(config: &Config) {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn enforce_loopback(config: &Config) -> Result<()> {
	if !config.security.bind_localhost_only {
		return Ok(());
	}

	let bind_addr: SocketAddr = config.service.mcp_bind.parse().map_err(|err| {
		eyre::eyre!("service.mcp_bind must be a valid socket address: {err}")
	})?;

	if !bind_addr.ip().is_loopback() {
		return Err(eyre::eyre!(
			"service.mcp_bind must be a loopback address when bind_localhost_only is true."
		));
	}

	Ok(())
}

/// `mcp.api_base` when configured, otherwise the HTTP API's own bind address.
fn resolve_api_base(config: &Config) -> String {
	config
		.mcp
		.as_ref()
		.and_then(|mcp| mcp.api_base.clone())
		.unwrap_or_else(|| config.service.http_bind.clone())
}
