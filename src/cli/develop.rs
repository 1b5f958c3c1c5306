//! Develop command - reconcile the rolling pre-release

use crate::cli::CliProgress;
use crate::cli::context::CommandContext;
use crate::cli::style::{CHECK, Stylize, arrow, check, hyperlink, spinner_style};
use anstream::println;
use chrono::Utc;
use devrel::error::Result;
use devrel::flow::{RunOptions, RunOutcome, reconcile_develop};
use devrel::publish::PublishPlan;
use devrel::types::Release;
use indicatif::ProgressBar;
use std::path::Path;
use std::time::Duration;

/// Options for the develop command
#[derive(Debug, Clone, Default)]
pub struct DevelopOptions {
    /// Dry run - show what would be done without making changes
    pub dry_run: bool,
}

/// Run the develop command
pub async fn run_develop(
    path: &Path,
    config_path: Option<&Path>,
    options: DevelopOptions,
) -> Result<()> {
    let mut ctx = CommandContext::new(path, config_path)?;
    let integration = ctx.config.integration_branch.clone();
    let stable = ctx.config.stable_branch.clone();
    println!("{} {}", "Repository:".muted(), ctx.repository().accent());

    // Fetch both branches so ancestry reflects the remote
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching from {}...", ctx.mirror.remote().emphasis()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    ctx.mirror
        .sync(&[integration.as_str(), stable.as_str()])
        .inspect_err(|_| spinner.finish_and_clear())?;

    spinner.finish_with_message(format!(
        "{} Fetched {} and {} from {}",
        check(),
        integration.accent(),
        stable.accent(),
        ctx.mirror.remote().emphasis()
    ));

    let progress = CliProgress::compact();
    let outcome = reconcile_develop(
        ctx.platform.as_ref(),
        &ctx.mirror,
        &ctx.config,
        &ctx.artifacts,
        RunOptions {
            now: Utc::now(),
            dry_run: options.dry_run,
        },
        &progress,
    )
    .await?;

    let report = match outcome {
        RunOutcome::NothingPending => {
            println!("✅ No new PRs to include.");
            return Ok(());
        }
        RunOutcome::Planned { plan, existing } => {
            print_preview(&plan, existing.as_ref());
            println!("{}", "Dry run complete".muted());
            return Ok(());
        }
        RunOutcome::Published(report) => report,
    };

    if !report.is_success() {
        println!(
            "{}",
            format!(
                "Release '{}' left at: {}",
                ctx.config.rolling_tag, report.state
            )
            .warn()
        );
    }
    let report = report.into_result()?;

    println!();
    println!("✅ Release updated successfully.");
    println!(
        "{} {} deleted, {} uploaded",
        format!("{CHECK} Assets:").success(),
        report.deleted_assets.len().accent(),
        report.uploaded.len().accent()
    );
    if let Some(release) = report.release {
        println!("  {}", hyperlink(&release.html_url, &release.html_url));
    }

    Ok(())
}

/// Print the notes and steps a run would apply
fn print_preview(plan: &PublishPlan, existing: Option<&Release>) {
    println!();
    if let Some(ref notes) = plan.notes {
        println!("{}:", "Release notes".emphasis());
        for line in notes.lines() {
            println!("  {line}");
        }
        println!();
    }

    println!("{}:", "Steps".emphasis());
    for step in plan.steps(existing) {
        println!("  {} {}", arrow(), step);
    }
    println!();
}
