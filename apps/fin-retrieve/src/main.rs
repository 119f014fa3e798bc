use clap::Parser;

use fin_retrieve::Args;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	fin_retrieve::run(args).await
}
