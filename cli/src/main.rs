//! quizdoc CLI - question tables from quiz JSON to DOCX
//!
//! Generates, previews and inspects question documents, and serves the
//! single-page web form.

use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use quizdoc::render::JsonFormat;
use quizdoc::{GenerateOptions, QuestionTableRenderer, SchemaVariant};
use std::fs;
use std::io::{self, Read, Write};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::format::FmtSpan;

/// Quiz JSON to Word question tables
#[derive(Parser)]
#[command(
    name = "quizdoc",
    author = "iyulab",
    version,
    about = "Generate DOCX question tables from quiz JSON",
    long_about = "quizdoc - Question table generator.\n\n\
                  Turns a JSON list of quiz questions into a Word document with \
                  metadata, options and hint/solution tables for every question."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a DOCX document from quiz JSON
    #[command(visible_alias = "gen")]
    Generate {
        /// Input JSON file path ("-" for stdin)
        input: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = quizdoc::options::DEFAULT_FILE_NAME)]
        output: PathBuf,

        /// Field keys used by the input
        #[arg(long, env = "QUIZDOC_SCHEMA", default_value = "learning-unit")]
        schema: SchemaVariant,

        /// Document title
        #[arg(long)]
        title: Option<String>,

        /// Document author
        #[arg(long)]
        author: Option<String>,

        /// Text written for missing fields
        #[arg(long, default_value = quizdoc::question::DEFAULT_PLACEHOLDER)]
        placeholder: String,
    },

    /// Print the generated tables without writing a file
    Preview {
        /// Input JSON file path ("-" for stdin)
        input: PathBuf,

        /// Print the document model as JSON
        #[arg(long)]
        json: bool,

        /// Field keys used by the input
        #[arg(long, env = "QUIZDOC_SCHEMA", default_value = "learning-unit")]
        schema: SchemaVariant,
    },

    /// Show the tables and page breaks of a DOCX file
    Inspect {
        /// DOCX file path
        input: PathBuf,
    },

    /// Serve the web form
    Serve {
        /// The address to bind to
        #[arg(short, long, env = "ADDRESS", default_value = "127.0.0.1:1414")]
        address: SocketAddr,

        /// Field keys used by submitted JSON
        #[arg(long, env = "QUIZDOC_SCHEMA", default_value = "learning-unit")]
        schema: SchemaVariant,

        /// File name offered by the download link
        #[arg(long, env = "QUIZDOC_FILE_NAME", default_value = quizdoc::options::DEFAULT_FILE_NAME)]
        file_name: String,
    },

    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = match cli.command {
        Commands::Serve { .. } => "quizdoc=info,tower_http=info",
        _ => "warn",
    };
    init_logging(default_filter);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(default_filter: &str) {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.to_owned());
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Generate {
            input,
            output,
            schema,
            title,
            author,
            placeholder,
        } => {
            let pb = create_spinner("Reading questions...");

            let json = read_input(&input)?;
            let mut options = GenerateOptions::new()
                .with_schema(schema)
                .with_placeholder(placeholder);
            if let Some(title) = title {
                options = options.with_title(title);
            }
            if let Some(author) = author {
                options = options.with_author(author);
            }

            let records = quizdoc::parse_questions(&json, options.schema)?;
            pb.set_message("Rendering tables...");

            let bytes = QuestionTableRenderer::new(&options).render(&records)?;
            fs::write(&output, bytes)?;

            pb.finish_and_clear();
            println!(
                "{} Generated {} questions: {}",
                "✓".green().bold(),
                records.len(),
                output.display()
            );
        }

        Commands::Preview {
            input,
            json,
            schema,
        } => {
            let json_input = read_input(&input)?;
            let options = GenerateOptions::new().with_schema(schema);

            let records = quizdoc::parse_questions(&json_input, options.schema)?;
            let doc = QuestionTableRenderer::new(&options).build(&records)?;

            let content = if json {
                quizdoc::render::to_json(&doc, JsonFormat::Pretty)?
            } else {
                quizdoc::render::to_text(&doc)?
            };
            write_output(&content)?;
        }

        Commands::Inspect { input } => {
            let pb = create_spinner("Reading document...");

            let doc = quizdoc::read_docx(&input)?;

            pb.finish_and_clear();

            println!("{}", "Document Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            if let Some(ref title) = doc.metadata.title {
                println!("{}: {}", "Title".bold(), title);
            }
            if let Some(ref author) = doc.metadata.author {
                println!("{}: {}", "Author".bold(), author);
            }
            if let Some(ref application) = doc.metadata.application {
                println!("{}: {}", "Application".bold(), application);
            }

            let rows: usize = doc.tables().map(|t| t.row_count()).sum();
            println!("\n{}", "Content Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Tables".bold(), doc.table_count());
            println!("{}: {}", "Rows".bold(), rows);
            println!("{}: {}", "Page breaks".bold(), doc.page_break_count());
        }

        Commands::Serve {
            address,
            schema,
            file_name,
        } => {
            let options = GenerateOptions::new()
                .with_schema(schema)
                .with_file_name(file_name);
            println!(
                "{} Serving on http://{}",
                "✓".green().bold(),
                address
            );

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(quizdoc::web::serve(address, options))?;
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!("{} {}", "quizdoc".green().bold(), env!("CARGO_PKG_VERSION"));
    println!("Question tables from quiz JSON to Word documents");
    println!();
    println!("Schemas: learning-unit (default), standards");
    println!("Repository: https://github.com/iyulab/quizdoc");
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn read_input(path: &Path) -> io::Result<String> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin().lock().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn write_output(content: &str) -> io::Result<()> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    writeln!(handle, "{}", content)
}
