//! unicourse CLI - CRICOS register course extraction tool
//!
//! A command-line tool for extracting grouped institution and course
//! listings from register workbooks, from a local file or straight from a
//! URL.

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use unicourse::render::{to_json, to_markdown, to_text, JsonFormat};
use unicourse::{ColumnMap, ExtractOptions, LoadState, WorkbookParser};

/// CRICOS register extraction to JSON, Markdown, and plain text
#[derive(Parser)]
#[command(
    name = "unicourse",
    version,
    about = "Extract institution and course listings from register workbooks",
    long_about = "unicourse - CRICOS register course extraction tool.\n\n\
                  Reads a register workbook (XLSX), groups courses by institution,\n\
                  and renders the result as JSON, Markdown, or plain text."
)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a workbook and render the groups as JSON
    Json {
        /// Input workbook path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output compact JSON (no indentation)
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Extract a workbook and render the groups as Markdown
    #[command(visible_alias = "md")]
    Markdown {
        /// Input workbook path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Extract a workbook and render the groups as aligned plain text
    Text {
        /// Input workbook path
        input: PathBuf,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show workbook information and extraction statistics
    Info {
        /// Input workbook path
        input: PathBuf,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Fetch a register workbook from a URL and render it
    Fetch {
        /// URL of the workbook resource
        url: String,

        /// Output file path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering format
        #[arg(long, default_value = "text")]
        format: Format,

        #[command(flatten)]
        extract: ExtractArgs,
    },

    /// Show version information
    Version,
}

/// Extraction flags shared by the subcommands.
#[derive(Args)]
struct ExtractArgs {
    /// Worksheet to read (0-based)
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// Number of leading rows discarded as headers
    #[arg(long, default_value_t = 2)]
    header_rows: usize,
}

impl From<ExtractArgs> for ExtractOptions {
    fn from(args: ExtractArgs) -> Self {
        ExtractOptions::new()
            .with_sheet_index(args.sheet)
            .with_header_rows(args.header_rows)
            .with_columns(ColumnMap::Positional)
    }
}

/// Rendering format for the fetch subcommand.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Pretty-printed JSON
    Json,
    /// Markdown listing
    Markdown,
    /// Aligned plain text
    Text,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Json {
            input,
            output,
            compact,
            extract,
        } => {
            let pb = create_spinner("Extracting workbook...");
            let groups = unicourse::extract_path_with(&input, &extract.into())?;

            let format = if compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            let json = to_json(&groups, format)?;

            pb.finish_and_clear();
            write_output(output.as_ref(), &json)?;
            report_written(output.as_ref(), "JSON");
        }

        Commands::Markdown {
            input,
            output,
            extract,
        } => {
            let pb = create_spinner("Extracting workbook...");
            let groups = unicourse::extract_path_with(&input, &extract.into())?;
            let md = to_markdown(&groups);

            pb.finish_and_clear();
            write_output(output.as_ref(), &md)?;
            report_written(output.as_ref(), "Markdown");
        }

        Commands::Text {
            input,
            output,
            extract,
        } => {
            let pb = create_spinner("Extracting workbook...");
            let groups = unicourse::extract_path_with(&input, &extract.into())?;
            let text = to_text(&groups);

            pb.finish_and_clear();
            write_output(output.as_ref(), &text)?;
            report_written(output.as_ref(), "text");
        }

        Commands::Info { input, extract } => {
            let pb = create_spinner("Analyzing workbook...");

            let parser = WorkbookParser::open(&input)?;
            let workbook = parser.parse()?;
            let options: ExtractOptions = extract.into();
            let groups = unicourse::extract_groups(&workbook, &options)?;

            pb.finish_and_clear();

            println!("{}", "Workbook Information".cyan().bold());
            println!("{}", "─".repeat(40));
            println!(
                "{}: {}",
                "File".bold(),
                input.file_name().unwrap_or_default().to_string_lossy()
            );
            println!("{}: {}", "Sheets".bold(), workbook.sheet_count());
            for (i, name) in workbook.sheet_names().iter().enumerate() {
                let marker = if i == options.sheet_index { "*" } else { " " };
                println!("  {} [{}] {}", marker, i, name);
            }
            if let Some(sheet) = workbook.sheets.get(options.sheet_index) {
                println!(
                    "{}: {}",
                    "Declared range".bold(),
                    sheet.declared_range()
                );
                println!("{}: {}", "Occupied cells".bold(), sheet.cells.len());
            }

            let course_total: usize = groups.iter().map(|g| g.courses.len()).sum();
            println!("\n{}", "Extraction Statistics".cyan().bold());
            println!("{}", "─".repeat(40));
            println!("{}: {}", "Institutions".bold(), groups.len());
            println!("{}: {}", "Courses".bold(), course_total);
        }

        Commands::Fetch {
            url,
            output,
            format,
            extract,
        } => {
            let pb = create_spinner("Fetching register workbook...");
            let state = LoadState::resolve(&url, &extract.into());
            pb.finish_and_clear();

            match state {
                LoadState::Ready(groups) => {
                    let rendered = match format {
                        Format::Json => to_json(&groups, JsonFormat::Pretty)?,
                        Format::Markdown => to_markdown(&groups),
                        Format::Text => to_text(&groups),
                    };
                    write_output(output.as_ref(), &rendered)?;
                    report_written(output.as_ref(), "fetched data");
                }
                LoadState::Failed(msg) => {
                    eprintln!("{}: {}", "Error".red().bold(), msg);
                    std::process::exit(1);
                }
                LoadState::Pending => unreachable!("resolve always settles"),
            }
        }

        Commands::Version => {
            print_version();
        }
    }

    Ok(())
}

fn print_version() {
    println!(
        "{} {}",
        "unicourse".green().bold(),
        env!("CARGO_PKG_VERSION")
    );
    println!("CRICOS register course extraction");
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

fn report_written(path: Option<&PathBuf>, what: &str) {
    if let Some(p) = path {
        println!(
            "{} Wrote {} to {}",
            "✓".green().bold(),
            what,
            p.display()
        );
    }
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", content)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
