use clap::Parser;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    // Config and logging are set up inside `run` once the config file is read.
    let cli = Cli::parse();
    if let Err(err) = cli.run().await {
        eprintln!("s3mirror error: {:#}", err);
        std::process::exit(1);
    }
}
