//! Release command - cut a dated release

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, hyperlink};
use anstream::println;
use chrono::Utc;
use devrel::error::Result;
use devrel::flow::{RunOptions, RunOutcome, cut_release, release_version};
use devrel::publish::ReleaseTarget;
use std::path::Path;

/// Options for the release command
#[derive(Debug, Clone, Default)]
pub struct ReleaseOptions {
    /// Dry run - show what would be done without making changes
    pub dry_run: bool,
}

/// Run the release command
pub async fn run_release(
    path: &Path,
    config_path: Option<&Path>,
    version: &str,
    options: ReleaseOptions,
) -> Result<()> {
    let version = release_version(version)?;

    let ctx = CommandContext::new(path, config_path)?;
    println!("{} {}", "Repository:".muted(), ctx.repository().accent());

    let progress = CliProgress::compact();
    let outcome = cut_release(
        ctx.platform.as_ref(),
        &ctx.config,
        version,
        &ctx.artifacts,
        RunOptions {
            now: Utc::now(),
            dry_run: options.dry_run,
        },
        &progress,
    )
    .await?;

    let report = match outcome {
        RunOutcome::Planned { plan, .. } => {
            println!();
            if let ReleaseTarget::Create(ref new_release) = plan.target {
                println!("{}: {}", "Release name".emphasis(), new_release.name);
                println!("{}:", "Release notes".emphasis());
                for line in new_release.body.lines() {
                    println!("  {line}");
                }
                println!();
            }
            println!("{}:", "Steps".emphasis());
            for step in plan.steps(None) {
                println!("  {} {}", arrow(), step);
            }
            println!();
            println!("{}", "Dry run complete".muted());
            return Ok(());
        }
        RunOutcome::Published(report) => report,
        RunOutcome::NothingPending => return Ok(()),
    };

    if !report.is_success() {
        println!(
            "{}",
            format!("Release '{version}' left at: {}", report.state).warn()
        );
    }
    let report = report.into_result()?;

    println!();
    println!("✅ Release {version} created and assets uploaded.");
    println!(
        "{} {} uploaded, {} skipped",
        format!("{CHECK} Assets:").success(),
        report.uploaded.len().accent(),
        report.skipped.len().accent()
    );
    for skipped in &report.skipped {
        println!(
            "  {} {}",
            skipped.file_name.warn(),
            skipped.reason.muted()
        );
    }
    if let Some(release) = report.release {
        println!("  {}", hyperlink(&release.html_url, &release.html_url));
    }

    Ok(())
}
