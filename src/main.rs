//! CLI entry point for `mailpanel`.

use std::path::{Path, PathBuf};

use clap::{CommandFactory, Parser, Subcommand};
use humansize::{format_size, BINARY};

use mailpanel::export::attachment::{export_all_attachments, export_attachment, ExportMode};
use mailpanel::model::{AttachmentInfo, Message, MimeNode, MimePart};
use mailpanel::panel::MessageView;
use mailpanel::parser::parse_eml;
use mailpanel::resolve;

#[derive(Parser)]
#[command(
    name = "mailpanel",
    version,
    about = "Preview captured emails: plain text, HTML and attachments"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose logging (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the plain-text body of a message
    Text { file: PathBuf },
    /// Print the HTML preview document of a message
    Html { file: PathBuf },
    /// Show headers, bodies and attachments of a message
    Show {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// List attachments
    Attachments {
        file: PathBuf,
        #[arg(long)]
        json: bool,
    },
    /// Write attachments to a directory
    Extract {
        file: PathBuf,
        /// Attachment position (all attachments when omitted)
        #[arg(short, long)]
        index: Option<usize>,
        #[arg(short, long)]
        output: PathBuf,
        /// Undo the transfer encoding instead of writing the stored bytes
        #[arg(long)]
        decode: bool,
    },
    /// Print the MIME part tree
    Tree { file: PathBuf },
    /// Print the effective configuration
    Config {
        /// Write the default configuration file if none exists
        #[arg(long)]
        init: bool,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Generate a man page
    Manpage,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = mailpanel::config::load_config();

    // Configure logging: stderr + optional log file
    let log_level = match cli.verbose {
        0 => config.general.log_level.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    setup_logging(log_level, &config);

    match cli.command {
        Commands::Text { file } => cmd_text(&file),
        Commands::Html { file } => cmd_html(&file),
        Commands::Show { file, json } => cmd_show(&file, json),
        Commands::Attachments { file, json } => cmd_attachments(&file, json),
        Commands::Extract {
            file,
            index,
            output,
            decode,
        } => cmd_extract(&file, index, &output, decode),
        Commands::Tree { file } => cmd_tree(&file),
        Commands::Config { init } => cmd_config(&config, init),
        Commands::Completions { shell } => cmd_completions(shell),
        Commands::Manpage => cmd_manpage(),
    }
}

/// Set up tracing with stderr output and optional file logging.
fn setup_logging(level: &str, config: &mailpanel::config::Config) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let log_dir = mailpanel::config::cache_dir(config);
    if std::fs::create_dir_all(&log_dir).is_ok() {
        let file_appender = tracing_appender::rolling::never(&log_dir, "mailpanel.log");
        let file_layer = tracing_subscriber::fmt::layer()
            .with_ansi(false)
            .with_writer(file_appender);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .with(file_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(stderr_layer)
            .init();
    }
}

fn load(path: &Path) -> anyhow::Result<Message> {
    Ok(parse_eml(path)?)
}

fn cmd_text(path: &Path) -> anyhow::Result<()> {
    let message = load(path)?;
    println!("{}", resolve::resolve_plain_text(&message));
    Ok(())
}

fn cmd_html(path: &Path) -> anyhow::Result<()> {
    let message = load(path)?;
    println!("{}", resolve::resolve_html_preview(&message));
    Ok(())
}

fn cmd_show(path: &Path, json: bool) -> anyhow::Result<()> {
    let message = load(path)?;
    let id = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let view = MessageView::new(id, &message);

    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
        return Ok(());
    }

    println!();
    println!("  {:<10} {}", "Subject", view.subject);
    println!("  {:<10} {}", "From", view.from);
    println!("  {:<10} {}", "To", view.to);
    println!("  {:<10} {}", "Date", view.date);
    println!("  {}", "-".repeat(72));
    println!();
    println!("{}", view.plain_text);
    if !view.attachments.is_empty() {
        println!();
        println!("  [Attachments: {} file(s)]", view.attachments.len());
        print_attachments_table(&view.attachments);
    }
    println!();
    Ok(())
}

fn cmd_attachments(path: &Path, json: bool) -> anyhow::Result<()> {
    let message = load(path)?;
    let infos: Vec<AttachmentInfo> = message
        .attachments()
        .into_iter()
        .enumerate()
        .map(|(index, part)| AttachmentInfo::from_part(index, part))
        .collect();

    if json {
        let output = serde_json::json!({
            "count": infos.len(),
            "attachments": infos,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    if infos.is_empty() {
        println!("  No attachments found.");
        return Ok(());
    }
    print_attachments_table(&infos);
    Ok(())
}

fn cmd_extract(
    path: &Path,
    index: Option<usize>,
    output: &Path,
    decode: bool,
) -> anyhow::Result<()> {
    let message = load(path)?;
    let mode = if decode {
        ExportMode::Decoded
    } else {
        ExportMode::Raw
    };

    let paths = match index {
        Some(index) => {
            std::fs::create_dir_all(output)?;
            vec![export_attachment(&message, index, output, mode)?]
        }
        None => export_all_attachments(&message, output, mode)?,
    };

    println!(
        "  Extracted {} attachment(s) to {}",
        paths.len(),
        output.display()
    );
    Ok(())
}

fn cmd_tree(path: &Path) -> anyhow::Result<()> {
    let message = load(path)?;
    print_part(message.root(), 0);
    Ok(())
}

fn print_part(part: &MimePart, depth: usize) {
    let content_type = part.header("Content-Type").unwrap_or("(no content type)");
    let encoding = part
        .header("Content-Transfer-Encoding")
        .map(|e| format!(" [{e}]"))
        .unwrap_or_default();
    println!(
        "{}{}{} {}",
        "  ".repeat(depth + 1),
        content_type,
        encoding,
        format_size(part.body().len(), BINARY)
    );
    for child in resolve::child_parts(part) {
        print_part(child, depth + 1);
    }
}

fn cmd_config(config: &mailpanel::config::Config, init: bool) -> anyhow::Result<()> {
    if init {
        match mailpanel::config::config_file_path() {
            Some(path) if path.exists() => {
                println!("  Config already exists at {}", path.display());
            }
            _ => {
                mailpanel::config::save_config(config)?;
                if let Some(path) = mailpanel::config::config_file_path() {
                    println!("  Wrote {}", path.display());
                }
            }
        }
        return Ok(());
    }
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

/// Generate shell completions and print to stdout.
fn cmd_completions(shell: clap_complete::Shell) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    clap_complete::generate(shell, &mut cmd, "mailpanel", &mut std::io::stdout());
    Ok(())
}

/// Generate a man page and print to stdout.
fn cmd_manpage() -> anyhow::Result<()> {
    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buf = Vec::new();
    man.render(&mut buf)?;
    std::io::Write::write_all(&mut std::io::stdout(), &buf)?;
    Ok(())
}

/// Print attachment summaries as a human-readable table.
fn print_attachments_table(infos: &[AttachmentInfo]) {
    println!("  {:<4} {:<50} {:>10}", "#", "Attachment", "Size");
    println!("  {}", "-".repeat(66));
    for info in infos {
        let label: String = info.label.chars().take(49).collect();
        println!(
            "  {:<4} {:<50} {:>10}",
            info.index,
            label,
            format_size(info.size, BINARY)
        );
    }
}
