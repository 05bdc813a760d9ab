//! Entrypoint for the `login` binary.

use clap::Parser as _;

use schoolportal_login::{cli::Cli, inner_main};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    inner_main(Cli::parse()).await
}
