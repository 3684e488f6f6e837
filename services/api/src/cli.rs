use crate::demo::{run_demo, DemoArgs};
use crate::review::{
    run_review_pipeline, run_review_resolve, run_review_submit, ReviewPipelineArgs,
    ReviewResolveArgs, ReviewSubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use moderation_review::config::AppConfig;
use moderation_review::error::AppError;
use moderation_review::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "Moderation Review Desk",
    about = "Resolve moderation review statuses and serve the review API",
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
    /// Resolve, inspect, and submit review forms
    Review {
        #[command(subcommand)]
        command: ReviewCommand,
    },
    /// Walk the reference review scenarios through a review session
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum ReviewCommand {
    /// Resolve a status from yes/no answers and show pipeline progress
    Resolve(ReviewResolveArgs),
    /// List the status pipeline and questions for a form variant
    Pipeline(ReviewPipelineArgs),
    /// Submit a filled-in review form from a JSON file
    Submit(ReviewSubmitArgs),
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

    let config = AppConfig::load()?;

    match command {
        Command::Serve(args) => server::run(config, args).await,
        Command::Review { command } => {
            telemetry::init(&config.telemetry)?;
            let default_variant = config.review.default_variant;
            match command {
                ReviewCommand::Resolve(args) => run_review_resolve(args, default_variant),
                ReviewCommand::Pipeline(args) => run_review_pipeline(args, default_variant),
                ReviewCommand::Submit(args) => run_review_submit(args, default_variant),
            }
        }
        Command::Demo(args) => {
            telemetry::init(&config.telemetry)?;
            run_demo(args, config.review.default_variant)
        }
    }
}
