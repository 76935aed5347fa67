use chrono::Utc;
use clap::Parser;
use pdf_chat_core::{
    load_pdf_upload, load_pdf_uploads, ChunkingConfig, DocumentUpload, HostedChatModel, Session,
    SessionError, SessionOptions,
};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "pdf-chat", version, about = "Chat with a set of PDF documents")]
struct Cli {
    /// Individual PDF files to load.
    #[arg(long = "file")]
    files: Vec<PathBuf>,

    /// Folder scanned recursively for PDFs.
    #[arg(long)]
    folder: Option<PathBuf>,

    /// OpenAI-compatible chat completions endpoint.
    #[arg(long, default_value = "https://api.openai.com/v1/chat/completions")]
    chat_endpoint: String,

    /// Model name sent to the endpoint.
    #[arg(long, default_value = "gpt-4o-mini")]
    chat_model: String,

    /// Bearer token for the endpoint.
    #[arg(long, env = "PDF_CHAT_API_KEY")]
    api_key: Option<String>,

    /// Number of chunks retrieved per question.
    #[arg(long, default_value = "3")]
    top_k: usize,

    /// Maximum chunk length in characters.
    #[arg(long, default_value = "1000")]
    chunk_size: usize,

    /// Overlap between consecutive chunks in characters.
    #[arg(long, default_value = "200")]
    chunk_overlap: usize,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer())
        .init();

    let cli = Cli::parse();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        started_at = %Utc::now().to_rfc3339(),
        "pdf-chat boot"
    );

    let documents = collect_documents(&cli)?;

    let model = HostedChatModel::new(&cli.chat_endpoint, &cli.chat_model, cli.api_key.clone());
    let options = SessionOptions {
        chunking: ChunkingConfig {
            chunk_size: cli.chunk_size,
            chunk_overlap: cli.chunk_overlap,
            ..ChunkingConfig::default()
        },
        top_k: cli.top_k,
    };
    let mut session = Session::new(model, options);

    run_process(&mut session, &documents);

    println!("Ask a question about your documents.");
    println!("Commands: :process  :clear  :quit");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let line = line.trim();

        match line {
            "" => continue,
            ":quit" | ":exit" => break,
            ":clear" => {
                session.clear();
                println!("Conversation cleared.");
            }
            ":process" => run_process(&mut session, &documents),
            question => match session.ask(question).await {
                Ok(answer) => println!("{answer}"),
                Err(SessionError::NotReady) => {
                    println!("Please process your documents before asking questions (:process).");
                }
                Err(error) => println!("error: {error}"),
            },
        }
    }

    Ok(())
}

fn collect_documents(cli: &Cli) -> anyhow::Result<Vec<DocumentUpload>> {
    let mut documents = Vec::new();

    for path in &cli.files {
        documents
            .push(load_pdf_upload(path).map_err(|error| anyhow::anyhow!(error.to_string()))?);
    }

    if let Some(folder) = &cli.folder {
        let mut from_folder =
            load_pdf_uploads(folder).map_err(|error| anyhow::anyhow!(error.to_string()))?;
        documents.append(&mut from_folder);
    }

    Ok(documents)
}

fn run_process(session: &mut Session<HostedChatModel>, documents: &[DocumentUpload]) {
    match session.process(documents) {
        Ok(report) => {
            for warning in &report.warnings {
                warn!(
                    document = %warning.document,
                    page = warning.page,
                    "page had no extractable text"
                );
            }
            info!(
                documents = report.documents,
                chunks = report.chunks,
                processed_at = %report.processed_at.to_rfc3339(),
                "documents processed"
            );
            println!(
                "Processed {} document(s) into {} chunk(s).",
                report.documents, report.chunks
            );
        }
        Err(error) => println!("error: {error}"),
    }
}
