mod commands;
mod terminal;

use commands::{CommandLine, Commands, quote, simulate};
use terminal::logging;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging();

    let cfg = commands.config();

    match commands.command {
        Commands::Quote { rate, days, late } => quote::quote(rate, days, late, &cfg),
        Commands::Simulate(args) => simulate::simulate(args, &cfg).await,
    }
}
