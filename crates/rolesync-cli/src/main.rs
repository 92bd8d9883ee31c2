//! rolesync CLI
//!
//! Thin sequencing over the core operations: parse the requirements file,
//! optionally bump pinned versions, then install whatever is missing. A
//! failed install pass exits non-zero but keeps every partial success on
//! disk.

mod cli;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use rolesync_core::{FloatingRefs, SyncOptions, Syncer, resolve_latest_versions, state};
use rolesync_manifest as manifest;

use cli::Cli;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    println!("parsing {}", cli.requirements.display());
    let (mut main_entries, included) = manifest::load(&cli.requirements)?;

    let floating = FloatingRefs::default();
    let syncer = Syncer::new(
        &cli.roles_path,
        SyncOptions {
            limit: cli.limit,
            cleanup: !cli.no_cleanup,
            floating: floating.clone(),
        },
    );

    if let Some(name) = &cli.delete {
        let merged = manifest::merge(main_entries, vec![included]);
        println!("deleting {name}");
        syncer.delete_installed(&merged, name)?;
        println!("done");
        return Ok(());
    }

    if cli.list {
        let merged = manifest::merge(main_entries, vec![included]);
        for entry in syncer.list_installed(&merged) {
            let info = state::read_install_info(&cli.roles_path, &entry);
            println!("- {}, {}", entry.name(), info.version);
        }
        return Ok(());
    }

    if cli.update {
        println!("updating {}", cli.requirements.display());
        let changes = resolve_latest_versions(&mut main_entries, &floating).await?;
        manifest::persist(&main_entries, &cli.requirements)?;
        if !changes.is_empty() {
            println!("{}", changes.summary("requirements changes:\n"));
        }
    }

    if !cli.no_install {
        println!("installing/updating roles (if any)");
        let merged = manifest::merge(main_entries, vec![included]);
        let report = syncer.sync(&merged).await?;
        if let Some(summary) = report.summary() {
            println!("{summary}");
        }
        // Aggregate failure exits non-zero; successful installs stay applied.
        report.into_result()?;
    }

    println!("done");
    Ok(())
}
