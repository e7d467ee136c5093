use clap::Parser;

use bella_mcp::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	bella_mcp::run(args).await
}
