// src/cli.rs
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

use crate::config::ClientConfig;
use crate::core::ServiceClient;
use crate::render::{render_analysis, render_message};
use crate::repl;
use crate::session::CareerSession;
use crate::utils::text_or_file;

#[derive(Parser)]
#[command(name = "career-compass")]
#[command(about = "Match your resume against a job description and chat with a career assistant")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Base URL of the analysis backend
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// YAML configuration file (defaults to ./career_compass.yaml when present)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score a resume against a job description
    Analyze {
        #[command(flatten)]
        job: JobArgs,
        #[command(flatten)]
        resume: ResumeArgs,
        /// Print the raw analysis as JSON
        #[arg(long)]
        json: bool,
    },
    /// Ask the career assistant a single question
    Chat {
        query: String,
        #[command(flatten)]
        resume: ResumeArgs,
    },
    /// Interactive session combining analysis and chat
    Session {
        #[command(flatten)]
        job: JobArgs,
        #[command(flatten)]
        resume: ResumeArgs,
    },
    /// Check that the backend is reachable
    Status,
}

#[derive(Args, Debug, Default)]
pub struct JobArgs {
    /// Job description read from a text file
    #[arg(long, value_name = "PATH", conflicts_with = "job_text")]
    pub job: Option<PathBuf>,

    /// Job description given inline
    #[arg(long, value_name = "TEXT")]
    pub job_text: Option<String>,
}

#[derive(Args, Debug, Default)]
pub struct ResumeArgs {
    /// Resume file to upload (PDF, DOCX or TXT, at most 5MB)
    #[arg(long = "resume", value_name = "PATH", conflicts_with = "resume_text")]
    pub resume_file: Option<PathBuf>,

    /// Resume given inline as plain text
    #[arg(long, value_name = "TEXT")]
    pub resume_text: Option<String>,
}

pub async fn handle_command(cli: Cli, config: ClientConfig) -> Result<()> {
    let client = ServiceClient::new(config.api_url.clone(), config.timeout_seconds)
        .context("Failed to create HTTP client")?;
    info!("Using analysis backend at {}", client.base_url());

    match cli.command {
        Command::Analyze { job, resume, json } => {
            let mut session = CareerSession::new(client);
            prepare(&mut session, &job, &resume).await?;

            println!("⏳ Analyzing match...");
            let analysis = session.analyze().await?;

            if json {
                println!("{}", serde_json::to_string_pretty(analysis)?);
            } else {
                print!("{}", render_analysis(analysis));
            }
        }

        Command::Chat { query, resume } => {
            let mut session = CareerSession::new(client);
            prepare(&mut session, &JobArgs::default(), &resume).await?;

            if let Some(reply) = session.chat(&query).await? {
                println!("{}", render_message(reply));
            }
        }

        Command::Session { job, resume } => {
            let mut session = CareerSession::new(client);
            prepare(&mut session, &job, &resume).await?;
            repl::run(&mut session).await?;
        }

        Command::Status => {
            let status = client.service_info().await.with_context(|| {
                format!("Backend not reachable at {}", client.base_url())
            })?;

            println!("✅ {} v{}", status.message, status.version);
            for (name, path) in &status.endpoints {
                println!("   {:<14} {}", name, path);
            }
        }
    }

    Ok(())
}

async fn prepare<A: crate::core::CareerApi>(
    session: &mut CareerSession<A>,
    job: &JobArgs,
    resume: &ResumeArgs,
) -> Result<()> {
    if let Some(text) = text_or_file(job.job_text.as_deref(), job.job.as_deref()).await? {
        session.set_job_description(text);
    }

    if let Some(path) = &resume.resume_file {
        session.select_file_path(path).await?;
    } else if let Some(text) = &resume.resume_text {
        session.set_resume_text(text.clone());
    }

    Ok(())
}
