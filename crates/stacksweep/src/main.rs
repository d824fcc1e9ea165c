//! stacksweep: stack resource listing and teardown
//!
//! Discovers every resource belonging to a deployment stack by its service
//! name prefix and either lists them or tears them down in dependency
//! order.

use anyhow::Result;
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL_CONDENSED, Cell, ContentArrangement, Table};
use stacksweep::api::{ResourceDiscovery, Session, TaggedResource};
use stacksweep::config::{Feature, SweepConfig};
use stacksweep::orchestrator::{LiveServices, StackSweeper};
use stacksweep_common::SweepReport;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "stacksweep")]
#[command(about = "List and tear down one stack's cloud resources")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the stack's live resources
    List {
        /// Service name identifying the stack
        service_name: String,

        /// Target region; defaults to the session's home region
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Delete every resource belonging to the stack, dynamic groups included
    Delete {
        /// Service name identifying the stack
        service_name: String,

        /// Target region; defaults to the session's home region
        #[arg(short, long)]
        region: Option<String>,

        /// Tenancy OCID, needed for the dynamic-group step
        #[arg(long, env = "OCI_TENANCY")]
        tenancy: Option<String>,
    },

    /// Delete only a feature's auto-provisioned resources, ahead of an
    /// infrastructure-as-code destroy
    PreDestroy {
        /// Service name identifying the stack
        service_name: String,

        /// Target region; defaults to the session's home region
        #[arg(short, long)]
        region: Option<String>,

        /// Feature to run pre-destroy for
        #[arg(short, long, value_enum, default_value = "autoscaling")]
        feature: Feature,
    },
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        print_error(&e);
        std::process::exit(1);
    }
}

/// Print error in a user-friendly way
fn print_error(e: &anyhow::Error) {
    use std::io::Write;

    let mut stderr = std::io::stderr();

    let _ = writeln!(stderr, "\n\x1b[1;31mError:\x1b[0m {e}");

    let mut source = e.source();
    while let Some(cause) = source {
        let _ = writeln!(stderr, "  \x1b[33mCaused by:\x1b[0m {cause}");
        source = cause.source();
    }

    if std::env::var("RUST_BACKTRACE").is_err() {
        let _ = writeln!(
            stderr,
            "\n\x1b[2mSet RUST_BACKTRACE=1 for a detailed backtrace\x1b[0m"
        );
    }
}

async fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::List {
            service_name,
            region,
        } => {
            let config = SweepConfig::new(&service_name, region, None);
            handle_list(&config).await?;
        }

        Command::Delete {
            service_name,
            region,
            tenancy,
        } => {
            let config = SweepConfig::new(&service_name, region, tenancy);
            handle_delete(&config).await?;
        }

        Command::PreDestroy {
            service_name,
            region,
            feature,
        } => {
            let config = SweepConfig::new(&service_name, region, None);
            handle_pre_destroy(&config, feature).await?;
        }
    }

    Ok(())
}

/// Handle the list command
async fn handle_list(config: &SweepConfig) -> Result<()> {
    info!(prefix = %config.prefix, "Listing stack resources");

    let session = Session::new(config.region.as_deref())?;
    let discovery = ResourceDiscovery::new(session, config.prefix.clone());
    let resources = discovery.list_stack_resources().await?;

    if resources.is_empty() {
        println!("No resources found for stack prefix {}", config.prefix);
        return Ok(());
    }

    print_resource_table(&resources);
    Ok(())
}

/// Handle the delete command
async fn handle_delete(config: &SweepConfig) -> Result<()> {
    info!(prefix = %config.prefix, "Deleting all stack resources");

    let session = Session::new(config.region.as_deref())?;
    let discovery = ResourceDiscovery::new(session.clone(), config.prefix.clone());
    let resources = discovery.list_stack_resources().await?;

    let sweeper = StackSweeper::new(LiveServices::new(&session), config.prefix.clone());
    let mut report = sweeper.run(&resources).await;

    match &config.tenancy_id {
        Some(tenancy) => {
            let group_report = sweeper.delete_dynamic_groups(tenancy).await?;
            for record in group_report.records() {
                report.record(
                    record.kind,
                    record.display_name.clone(),
                    record.identifier.clone(),
                    record.outcome,
                    record.error.clone(),
                );
            }
        }
        None => warn!("No tenancy OCID given, skipping the dynamic-group step"),
    }

    print_summary(config, &report);
    Ok(())
}

/// Handle the pre-destroy command
async fn handle_pre_destroy(config: &SweepConfig, feature: Feature) -> Result<()> {
    info!(prefix = %config.prefix, feature = ?feature, "Pre-destroying feature resources");

    let session = Session::new(config.region.as_deref())?;
    let discovery = ResourceDiscovery::new(session.clone(), config.prefix.clone());
    let resources = discovery.list_stack_resources().await?;

    let sweeper = StackSweeper::new(LiveServices::new(&session), config.prefix.clone());
    let report = match feature {
        Feature::Autoscaling => sweeper.pre_destroy(&resources).await,
    };

    print_summary(config, &report);
    Ok(())
}

/// Render the discovery listing as a table on stdout
fn print_resource_table(resources: &[TaggedResource]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["NAME", "TYPE", "STATE", "OCID", "CREATED"]);

    for r in resources {
        table.add_row(vec![
            Cell::new(&r.display_name),
            Cell::new(&r.resource_type),
            Cell::new(&r.lifecycle_state),
            Cell::new(&r.identifier),
            Cell::new(
                r.time_created
                    .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
                    .unwrap_or_default(),
            ),
        ]);
    }

    println!("{table}");
    println!("\nTotal: {} resources", resources.len());
}

/// Print the end-of-run summary
fn print_summary(config: &SweepConfig, report: &SweepReport) {
    println!("\n=== Sweep Report ===");
    println!("Prefix: {}", config.prefix);
    println!();
    println!("Deleted:      {}", report.deleted());
    println!("Already gone: {}", report.already_gone());
    println!("Skipped:      {}", report.skipped());
    println!("Failed:       {}", report.failed());

    let failures = report.failures();
    if !failures.is_empty() {
        println!();
        println!("Failures:");
        for f in failures {
            println!(
                "  {} {} ({}): {}",
                f.kind,
                f.display_name,
                f.identifier,
                f.error.as_deref().unwrap_or("unknown error")
            );
        }
    }
}
