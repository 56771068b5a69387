//! Bazaar Application CLI

use std::process;

use clap::Parser;

mod cli;

#[tokio::main]
pub async fn main() {
    let _env = dotenvy::dotenv();

    if let Err(error) = cli::Cli::parse().run().await {
        #[expect(
            clippy::print_stderr,
            reason = "the CLI reports failures on stderr without a subscriber"
        )]
        {
            eprintln!("{error}");
        }

        process::exit(1);
    }
}
