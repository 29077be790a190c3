use crate::demo::{run_demo, DemoArgs};
use crate::server;
use crate::token::{run_token, TokenArgs};
use clap::{Args, Parser, Subcommand};
use internboard::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "internboard",
    about = "Job and internship board with application tracking",
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
    /// Mint a bearer token signed with the configured secret
    Token(TokenArgs),
    /// Walk through posting, applying, reviewing and closing a job in memory
    Demo(DemoArgs),
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
        Command::Token(args) => run_token(args),
        Command::Demo(args) => run_demo(args),
    }
}
