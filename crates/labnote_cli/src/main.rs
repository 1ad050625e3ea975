//! labnote command-line entry point.
//!
//! # Responsibility
//! - Parse arguments and wire the core service to terminal output.
//! - Map check outcomes onto process exit status.
//!
//! # Exit status
//! - `0`: command succeeded and no error-severity findings exist.
//! - `1`: the requested document is missing, or `check` found errors.
//! - `2`: operational failure (bad root, unreadable files, bad logging).

use clap::{Parser, Subcommand, ValueEnum};
use labnote_core::{
    default_log_level, init_logging, open_notebook, FsDocumentRepository, NotebookService,
    NotebookServiceError, SearchQuery, SessionId, Severity,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(
    name = "labnote",
    version,
    about = "Organize and check a notebook of dated Markdown session notes"
)]
struct Cli {
    /// Notebook root directory.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Directory for rotating log files. Logging stays off when omitted.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace|debug|info|warn|error.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List sessions in index order.
    List,
    /// Print the raw markdown of one session document.
    Show {
        /// Session number (the day/session counter in the notes).
        session: SessionId,
    },
    /// Run every integrity check over the notebook.
    Check {
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },
    /// Render the table of contents.
    Toc {
        #[arg(long, value_enum, default_value_t = TocFormat::Markdown)]
        format: TocFormat,
    },
    /// Search note text across the notebook.
    Search {
        /// Query text, matched case-insensitively.
        text: String,
        /// Maximum number of hits to print.
        #[arg(long, default_value_t = 20)]
        limit: u32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ReportFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum TocFormat {
    Markdown,
    Json,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .clone()
            .unwrap_or_else(|| default_log_level().to_string());
        if let Err(err) = init_logging(&level, &log_dir.to_string_lossy()) {
            eprintln!("labnote: {err}");
            return ExitCode::from(2);
        }
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("labnote: {err}");
            ExitCode::from(2)
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let notebook = open_notebook(&cli.root)?;
    let service = NotebookService::new(FsDocumentRepository::new(&notebook));

    match &cli.command {
        Command::List => {
            for document in service.list_documents()? {
                let session = document
                    .session
                    .map(|session| session.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{session}\t{}\t{}", document.title, document.rel_path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Show { session } => match service.document_text(*session) {
            Ok(text) => {
                print!("{text}");
                Ok(ExitCode::SUCCESS)
            }
            Err(NotebookServiceError::DocumentNotFound(session)) => {
                eprintln!("labnote: missing document for session {session}");
                Ok(ExitCode::FAILURE)
            }
            Err(err) => Err(err.into()),
        },
        Command::Check { format } => {
            let report = service.check_notebook()?;
            match format {
                ReportFormat::Text => {
                    for finding in &report.findings {
                        println!("{finding}");
                    }
                    println!(
                        "{} document(s) checked: {} error(s), {} warning(s)",
                        report.documents_checked,
                        report.error_count(),
                        report.warning_count()
                    );
                }
                ReportFormat::Json => println!("{}", report.to_json()?),
            }
            let failed = report
                .findings
                .iter()
                .any(|finding| finding.severity == Severity::Error);
            Ok(if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }
        Command::Toc { format } => {
            let index = service.build_index()?;
            match format {
                TocFormat::Markdown => {
                    print!("{}", index.render_markdown());
                    for warning in &index.warnings {
                        eprintln!("{warning}");
                    }
                }
                TocFormat::Json => println!("{}", index.to_json()?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Search { text, limit } => {
            let mut query = SearchQuery::new(text.clone());
            query.limit = *limit;
            for hit in service.search(&query)? {
                let session = hit
                    .session
                    .map(|session| session.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("{}:{}\t[{session}]\t{}", hit.path.display(), hit.line, hit.snippet);
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}
