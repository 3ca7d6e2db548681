//! Turns on AWS Config recording across regions.
//!
//! Reads `parameter.json` (and the resource-type list it names) from the
//! working directory, makes sure the recorder role and delivery bucket exist,
//! then configures and starts a recorder in every listed region.
//!
//! ```sh
//! enable-config            # same as `enable-config apply`
//! enable-config plan       # print the steps without touching AWS
//! enable-config -v apply --parameters prod.json
//! ```
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use colored::Colorize;
use confrec::{aws::Aws, Parameters, Plan};

#[derive(Parser)]
#[command(
    name = "enable-config",
    about = "Provision and start AWS Config recording across regions"
)]
struct Cli {
    /// Increase logging verbosity.
    #[clap(short, action = clap::ArgAction::Count)]
    verbosity: u8,

    /// Parameter file.
    #[arg(long, env = "CONFREC_PARAMETERS", default_value = "parameter.json")]
    parameters: PathBuf,

    /// Resource-type list, overriding the parameter file's `ResourceTypes`.
    #[arg(long, env = "CONFREC_RESOURCE_TYPES")]
    resource_types: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Default)]
enum Command {
    /// Show the steps that would run.
    Plan,
    /// Provision and enable recording.
    #[default]
    Apply,
}

#[::tokio::main]
async fn main() -> anyhow::Result<()> {
    let Cli {
        verbosity,
        parameters,
        resource_types,
        command,
    } = Cli::parse();

    let level = match verbosity {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::default()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("confrec", level)
        .filter_module("enable_config", level)
        .init();

    let params = Parameters::from_file(&parameters)?;
    let resource_types = params.load_resource_types(resource_types.as_ref())?;
    let plan = Plan::new(&params, resource_types);

    match command.unwrap_or_default() {
        Command::Plan => {
            println!("{}\n{plan}", "Plan:".bold());
        }
        Command::Apply => {
            println!("{}\n{plan}", "Plan:".bold());
            let aws = Aws::from_env().await;
            let resolved = plan.apply(&aws).await.inspect_err(|e| {
                log::error!("setting up AWS Config failed: {e}");
            })?;
            log::info!(
                "recorder role: {}",
                resolved.role_arn.as_deref().unwrap_or_default()
            );
            log::info!(
                "config bucket: {}",
                resolved.config_bucket.as_deref().unwrap_or_default()
            );
            println!("{}", "Done.".green());
        }
    }
    Ok(())
}
