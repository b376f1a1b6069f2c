//! gh-purge binary entry point.

use clap::Parser;
use gh_purge::api::GitHubClient;
use gh_purge::cli::{self, Cli};
use gh_purge::config::{self, PurgeConfig};
use gh_purge::error::PurgeError;
use gh_purge::workflow::{
    PlainPrompter, Prompter, PurgeWorkflow, RunOutcome, TerminalPrompter, WorkflowSettings,
};

#[tokio::main]
async fn main() {
    // before clap and the subscriber read PURGE_AUTH / PURGE_LOG
    config::load_dotenv();
    let args = Cli::parse();
    cli::logging::init();

    let mut config = PurgeConfig::from_env();
    args.apply(&mut config);
    if config.accessible {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }

    println!("{}", console::style("GitHub Purge").magenta().bold());
    println!("Authenticate with GitHub and select repositories to delete");

    let code = match run(&args, &config).await {
        Ok(code) => code,
        Err(e) if e.is_cancellation() => {
            gh_purge::info!("{e}");
            e.exit_code()
        }
        Err(e) => {
            gh_purge::failure!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}

async fn run(args: &Cli, config: &PurgeConfig) -> Result<i32, PurgeError> {
    config.validate()?;
    let client = GitHubClient::new(config)?;
    let mut prompter: Box<dyn Prompter> = if config.accessible {
        Box::new(PlainPrompter::stdio())
    } else {
        Box::new(TerminalPrompter::new())
    };

    let token = cli::auth::obtain_token(args.auth, &client, config, prompter.as_mut()).await?;

    let mut workflow = PurgeWorkflow::new(&client, prompter.as_mut(), WorkflowSettings::from(config));
    let summary = workflow.run(&token).await?;

    if let RunOutcome::Completed(report) = &summary.outcome {
        println!();
        print!("{}", report.render(&summary.identity));
    }
    Ok(summary.exit_code())
}
