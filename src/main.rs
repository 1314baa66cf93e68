//! hrprep: HR Data Preparation CLI Tool
//!
//! A command-line pipeline that cleans four raw HR tables into normalized
//! CSVs and derives descriptive statistics and performance insight reports.

use std::time::Instant;

use anyhow::Result;
use chrono::Local;
use clap::Parser;
use polars::prelude::DataFrame;

use hrprep::cli::{Cli, Commands};
use hrprep::pipeline::{
    clean_employee, clean_engagement, clean_recruitment, clean_training, DataPaths,
    EMPLOYEE_CLEAN, ENGAGEMENT_CLEAN, RECRUITMENT_CLEAN, TRAINING_CLEAN,
};
use hrprep::report::{run_descriptive_statistics, run_performance_insights, PipelineSummary};
use hrprep::utils::{
    print_banner, print_completion, print_config, print_step_header, print_step_time,
    print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let paths = DataPaths::new(&cli.root);
    // Experience for active employees is measured against today's date.
    let today = Local::now().date_naive();

    print_banner(env!("CARGO_PKG_VERSION"));
    print_config(&paths);

    let mut summary = PipelineSummary::default();
    let mut step = 0u8;

    match cli.command {
        Commands::CleanEmployee => {
            clean_stage(&mut step, "Clean Employee", EMPLOYEE_CLEAN, &mut summary, || {
                clean_employee(&paths)
            })?;
        }
        Commands::CleanEngagement => {
            clean_stage(
                &mut step,
                "Clean Engagement Survey",
                ENGAGEMENT_CLEAN,
                &mut summary,
                || clean_engagement(&paths),
            )?;
        }
        Commands::CleanRecruitment => {
            clean_stage(
                &mut step,
                "Clean Recruitment",
                RECRUITMENT_CLEAN,
                &mut summary,
                || clean_recruitment(&paths),
            )?;
        }
        Commands::CleanTraining => {
            clean_stage(
                &mut step,
                "Clean Training & Development",
                TRAINING_CLEAN,
                &mut summary,
                || clean_training(&paths),
            )?;
        }
        Commands::Clean => clean_all(&paths, &mut step, &mut summary)?,
        Commands::Stats => {
            report_stage(&mut step, "Descriptive Statistics", &mut summary, || {
                run_descriptive_statistics(&paths, today)
            })?;
        }
        Commands::Insights => {
            report_stage(&mut step, "Performance Insights", &mut summary, || {
                run_performance_insights(&paths, today)
            })?;
        }
        Commands::Report => report_all(&paths, &mut step, &mut summary, today)?,
        Commands::Run => {
            clean_all(&paths, &mut step, &mut summary)?;
            report_all(&paths, &mut step, &mut summary, today)?;
        }
    }

    summary.display();
    print_completion();

    Ok(())
}

fn clean_all(paths: &DataPaths, step: &mut u8, summary: &mut PipelineSummary) -> Result<()> {
    clean_stage(step, "Clean Employee", EMPLOYEE_CLEAN, summary, || {
        clean_employee(paths)
    })?;
    clean_stage(
        step,
        "Clean Engagement Survey",
        ENGAGEMENT_CLEAN,
        summary,
        || clean_engagement(paths),
    )?;
    clean_stage(step, "Clean Recruitment", RECRUITMENT_CLEAN, summary, || {
        clean_recruitment(paths)
    })?;
    clean_stage(
        step,
        "Clean Training & Development",
        TRAINING_CLEAN,
        summary,
        || clean_training(paths),
    )?;
    Ok(())
}

fn report_all(
    paths: &DataPaths,
    step: &mut u8,
    summary: &mut PipelineSummary,
    today: chrono::NaiveDate,
) -> Result<()> {
    report_stage(step, "Descriptive Statistics", summary, || {
        run_descriptive_statistics(paths, today)
    })?;
    report_stage(step, "Performance Insights", summary, || {
        run_performance_insights(paths, today)
    })?;
    Ok(())
}

fn clean_stage(
    step: &mut u8,
    title: &str,
    output: &str,
    summary: &mut PipelineSummary,
    run: impl FnOnce() -> Result<DataFrame>,
) -> Result<()> {
    *step += 1;
    print_step_header(*step, title);
    let start = Instant::now();
    let df = run()?;
    summary.add_cleaned(output, df.height());
    print_success(&format!("Wrote {}", output));
    print_step_time(start.elapsed());
    Ok(())
}

fn report_stage(
    step: &mut u8,
    title: &str,
    summary: &mut PipelineSummary,
    run: impl FnOnce() -> Result<Vec<(String, usize)>>,
) -> Result<()> {
    *step += 1;
    print_step_header(*step, title);
    let start = Instant::now();
    let outputs = run()?;
    print_success(&format!("Wrote {} report file(s)", outputs.len()));
    summary.add_reports(outputs);
    print_step_time(start.elapsed());
    Ok(())
}
