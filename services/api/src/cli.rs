use crate::report::{run_match_report, MatchReportArgs};
use crate::server;
use campus_nest::error::AppError;
use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "Campus Nest",
    about = "Run the Campus Nest roommate matching service or inspect rankings from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Work with roommate profiles offline
    Roommates {
        #[command(subcommand)]
        command: RoommatesCommand,
    },
}

#[derive(Subcommand, Debug)]
enum RoommatesCommand {
    /// Rank roommate candidates for one user of a CSV roster
    Match(MatchReportArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Roommates {
            command: RoommatesCommand::Match(args),
        } => run_match_report(args),
    }
}
