use std::io::{self, BufRead, Write};

use anyhow::{self, Context};
use colored::*;
use is_root::is_root;
use tracing::info_span;

use sonda_common::models::report::Report;
use sonda_common::{config::Config, info, models::target::Target, success};
use sonda_core::pipeline::{self, ReconPipeline};

use crate::sprint;
use crate::terminal::{
    colors, format,
    print::{self, Print},
    spinner::SpinnerGuard,
};

pub async fn recon(domain_arg: Option<&str>, cfg: &Config) -> anyhow::Result<()> {
    let target: Target = match domain_arg {
        Some(raw) => Target::parse(raw)?,
        None => prompt_for_target()?,
    };

    Print::header("host reconnaissance");
    info!("Investigating {target}");

    if !is_root() {
        info!("Running without root privileges, MAC discovery will be unavailable");
    }

    let pipeline: ReconPipeline = ReconPipeline::from_config(cfg)?;

    let report = {
        let _guard: SpinnerGuard = run_spinner();
        pipeline.run(&target).await?
    };

    format::print_report(&report, cfg);
    print_summary(&report, cfg);
    Ok(())
}

fn print_summary(report: &Report, cfg: &Config) {
    let answered: ColoredString = format!("{} of 5 probes answered", report.present_count())
        .bold()
        .green();
    let output: &ColoredString =
        &format!("Recon complete: {answered}").color(colors::TEXT_DEFAULT);

    match cfg.quiet {
        0 => {
            print::divider();
            print::centerln(output);
        }
        _ => {
            sprint!();
            success!("{output}")
        }
    }
}

fn run_spinner() -> SpinnerGuard {
    let span = info_span!("recon", indicatif.pb_show = true);
    let _enter = span.enter();

    SpinnerGuard::with_status(span.clone(), || {
        format!("Currently {}...", pipeline::active_stage())
            .color(colors::TEXT_DEFAULT)
            .italic()
    })
}

/// Interactive fallback for runs started without an argument.
fn prompt_for_target() -> anyhow::Result<Target> {
    let mut stderr = io::stderr();
    write!(
        stderr,
        "{} ",
        "Enter the target domain:".color(colors::PRIMARY)
    )?;
    stderr.flush()?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading the target domain from stdin")?;

    Target::parse(&line)
}
