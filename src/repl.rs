// src/repl.rs
//! Interactive terminal session: plain lines are chat queries, `:` lines are commands

use anyhow::Result;
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

use crate::core::CareerApi;
use crate::render::{
    render_analysis, render_message, render_suggestions, render_transcript, CHAT_SUGGESTIONS,
};
use crate::session::CareerSession;
use crate::utils::{read_file_content, split_command, write_file_content};

const HELP: &str = "\
Commands:
  :job <path>        load the job description from a file
  :job-text <text>   set the job description inline
  :text <text>       set the resume text (drops a selected file)
  :file <path>       select a resume file (PDF, DOCX or TXT, max 5MB)
  :remove-file       unselect the resume file
  :analyze           score the resume against the job description
  :history           show the chat transcript
  :suggest [n]       list starter questions, or ask question n
  :save <path>       export the transcript as JSON
  :help              show this help
  :quit              leave the session
Anything else is sent to the career assistant.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplCommand {
    Chat(String),
    Job(PathBuf),
    JobText(String),
    ResumeText(String),
    File(PathBuf),
    RemoveFile,
    Analyze,
    History,
    Suggest(Option<usize>),
    Save(PathBuf),
    Help,
    Quit,
    Empty,
    MissingArgument(&'static str),
    Unknown(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Empty;
        }
        if !trimmed.starts_with(':') {
            return Self::Chat(trimmed.to_string());
        }

        let (word, rest) = split_command(trimmed);
        let required = |name: &'static str, build: fn(&str) -> Self| {
            if rest.is_empty() {
                Self::MissingArgument(name)
            } else {
                build(rest)
            }
        };

        match word {
            ":job" => required(":job", |r| Self::Job(PathBuf::from(r))),
            ":job-text" => required(":job-text", |r| Self::JobText(r.to_string())),
            ":text" => required(":text", |r| Self::ResumeText(r.to_string())),
            ":file" => required(":file", |r| Self::File(PathBuf::from(r))),
            ":save" => required(":save", |r| Self::Save(PathBuf::from(r))),
            ":remove-file" => Self::RemoveFile,
            ":analyze" => Self::Analyze,
            ":history" => Self::History,
            ":suggest" => match rest.parse::<usize>() {
                Ok(n) => Self::Suggest(Some(n)),
                Err(_) if rest.is_empty() => Self::Suggest(None),
                Err(_) => Self::Unknown(trimmed.to_string()),
            },
            ":help" => Self::Help,
            ":quit" | ":exit" => Self::Quit,
            _ => Self::Unknown(trimmed.to_string()),
        }
    }
}

pub async fn run<A: CareerApi>(session: &mut CareerSession<A>) -> Result<()> {
    info!("Interactive session {} started", session.transcript().session_id);
    println!("Career Compass. Type :help for commands.");
    println!("{}", render_suggestions());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };

        match ReplCommand::parse(&line) {
            ReplCommand::Quit => break,
            command => {
                if let Err(e) = execute(session, command).await {
                    error!("Session command failed: {:#}", e);
                    eprintln!("❌ {}", e);
                }
            }
        }
    }

    info!(
        "Interactive session ended after {} messages",
        session.transcript().len()
    );
    Ok(())
}

async fn execute<A: CareerApi>(session: &mut CareerSession<A>, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Chat(query) => ask(session, &query).await?,
        ReplCommand::Job(path) => {
            let text = read_file_content(&path).await?;
            session.set_job_description(text);
            println!("✅ Job description loaded from {}", path.display());
        }
        ReplCommand::JobText(text) => {
            session.set_job_description(text);
            println!("✅ Job description set");
        }
        ReplCommand::ResumeText(text) => {
            session.set_resume_text(text);
            println!("✅ Resume text set");
        }
        ReplCommand::File(path) => {
            session.select_file_path(&path).await?;
            if let Some(file) = session.resume_file() {
                println!("✅ {} ({:.1} KB)", file.name, file.size_kb());
            }
        }
        ReplCommand::RemoveFile => {
            session.remove_file();
            println!("Resume file removed");
        }
        ReplCommand::Analyze => {
            println!("⏳ Analyzing match...");
            let analysis = session.analyze().await?;
            print!("{}", render_analysis(analysis));
        }
        ReplCommand::History => println!("{}", render_transcript(session.transcript())),
        ReplCommand::Suggest(None) => println!("{}", render_suggestions()),
        ReplCommand::Suggest(Some(n)) => {
            match n.checked_sub(1).and_then(|i| CHAT_SUGGESTIONS.get(i)) {
                Some(suggestion) => {
                    println!("[you] {}", suggestion);
                    ask(session, suggestion).await?;
                }
                None => eprintln!("Pick a suggestion between 1 and {}", CHAT_SUGGESTIONS.len()),
            }
        }
        ReplCommand::Save(path) => {
            let json = session.transcript().to_json()?;
            write_file_content(&path, &json).await?;
            println!("✅ Transcript saved to {}", path.display());
        }
        ReplCommand::Help => println!("{}", HELP),
        ReplCommand::MissingArgument(name) => eprintln!("{} needs an argument, see :help", name),
        ReplCommand::Unknown(input) => eprintln!("Unknown command: {}", input),
        ReplCommand::Empty | ReplCommand::Quit => {}
    }

    Ok(())
}

async fn ask<A: CareerApi>(session: &mut CareerSession<A>, query: &str) -> Result<()> {
    println!("⏳ Thinking...");
    if let Some(reply) = session.chat(query).await? {
        println!("{}", render_message(reply));
    }
    Ok(())
}
