//! qconv — LIKE clause converter CLI
//!
//! Rewrites `LIKE '%word%'` WHERE clauses for Athena or Redshift.
//!
//! # Usage
//!
//! ```bash
//! # Convert a file, print to stdout
//! qconv -f queries.sql -s athena -t 2
//!
//! # Write to a file and echo the result
//! qconv -f queries.sql -s redshift -t 4 -o converted.sql -v
//!
//! # Show how one statement is decomposed
//! qconv -s redshift -t 5 explain "SELECT * FROM t WHERE a LIKE '%x%'"
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use query_converter::input::{read_statements, render, split_statements};
use query_converter::prelude::*;
use std::io::Read;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qconv")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Rewrite LIKE/AND/OR WHERE clauses into regex or bit-match predicates", long_about = None)]
#[command(after_help = "EXAMPLES:
    qconv -f queries.sql -s athena -t 1
    qconv -f queries.sql -s redshift -t 4 -o out.sql -v
    cat queries.sql | qconv -s redshift -t 3 --format json
    qconv styles")]
struct Cli {
    /// SQL file with ';'-terminated statements (stdin when omitted)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Target service
    #[arg(short, long, value_enum)]
    service: Option<CliService>,

    /// Rewrite style (1-5)
    #[arg(short = 't', long = "type")]
    style: Option<u8>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "sql")]
    format: OutputFormat,

    /// Config file (defaults to ./qconv.toml, then the user config dir)
    #[arg(long, env = "QCONV_CONFIG")]
    config: Option<PathBuf>,

    /// Echo output and show keyword counts
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Clone, Copy, ValueEnum)]
enum CliService {
    Athena,
    Redshift,
}

impl From<CliService> for Engine {
    fn from(val: CliService) -> Self {
        match val {
            CliService::Athena => Engine::Athena,
            CliService::Redshift => Engine::Redshift,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Sql,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the clause tree of one statement and its rewrite
    Explain {
        /// The statement to explain
        statement: String,
    },
    /// Show the style reference
    Styles,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match &cli.command {
        Some(Commands::Explain { statement }) => explain_statement(statement, &cli),
        Some(Commands::Styles) => {
            show_styles();
            Ok(())
        }
        None => run(&cli),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(2);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "query_converter=debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::discover(cli.config.as_deref())?;
    let request = config.request(cli.service.map(Engine::from), cli.style)?;
    let pipeline = Pipeline::with_options(request, &config.bitmatch)?;

    let statements = match &cli.file {
        Some(path) => read_statements(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            split_statements(&raw)
        }
    };

    let conversion = pipeline.convert_all(&statements)?;

    let text = match cli.format {
        OutputFormat::Sql => render(&conversion.statements),
        OutputFormat::Json => serde_json::to_string_pretty(&conversion)?,
    };

    match &cli.output {
        Some(path) => {
            std::fs::write(path, &text)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            if cli.verbose {
                print!("{}", text);
            }
            eprintln!(
                "{} Wrote {} statement(s) to {}",
                "✓".green(),
                conversion.statements.len(),
                path.display().to_string().cyan()
            );
        }
        None => print!("{}", text),
    }

    if cli.verbose {
        print_summary(&conversion);
    }

    Ok(())
}

fn print_summary(conversion: &Conversion) {
    eprintln!();
    eprintln!("{}", "Summary:".green().bold());
    for (i, stats) in conversion.stats.iter().enumerate() {
        eprintln!(
            "  {} OR branches: {}  single: {}  AND predicates: {}",
            format!("#{}", i + 1).dimmed(),
            stats.or_branches.to_string().cyan(),
            stats.single_predicates.to_string().cyan(),
            stats.and_predicates.to_string().cyan()
        );
    }
    eprintln!(
        "  {} statement(s)",
        conversion.summary.statements.to_string().cyan()
    );
}

fn explain_statement(statement: &str, cli: &Cli) -> Result<()> {
    println!("{}", "Statement Explanation".cyan().bold());
    println!();
    println!("{} {}", "Input:".dimmed(), statement.yellow());
    println!();

    let stmt = query_converter::parse(statement)?;

    println!("{}", "Clause Tree:".green().bold());
    println!("  {} {}", "Front:".dimmed(), stmt.front.white());
    for (i, group) in stmt.or_group.iter().enumerate() {
        let label = if group.is_single() { "OR" } else { "OR/AND" };
        println!("  [{}] {}", label.cyan(), format!("#{}", i + 1).dimmed());
        for p in &group.predicates {
            println!("      {} LIKE {}", p.column.white(), p.token.yellow());
        }
    }

    let stats = StatementStats::of(&stmt);
    println!();
    println!(
        "  {} {}  {} {}  {} {}",
        "OR branches:".dimmed(),
        stats.or_branches,
        "single:".dimmed(),
        stats.single_predicates,
        "AND predicates:".dimmed(),
        stats.and_predicates
    );

    // Rewrite only when a style can be resolved.
    let config = Config::discover(cli.config.as_deref())?;
    if let Ok(request) = config.request(cli.service.map(Engine::from), cli.style) {
        let strategy = request.strategy()?;
        let sql = stmt.to_sql_with_options(strategy, &config.bitmatch)?;
        println!();
        println!("{} {}", "Generated SQL".green().bold(), format!("({})", strategy).dimmed());
        println!("  {}", sql.white());
    }

    Ok(())
}

fn show_styles() {
    println!("{}", "Style Reference".cyan().bold());
    println!();
    println!(
        "{:10} {:6} {}",
        "Service".white().bold(),
        "Type".white().bold(),
        "Rewrite".white().bold()
    );
    println!("{}", "─".repeat(72).dimmed());

    for strategy in Strategy::ALL {
        println!(
            "{:10} {:6} {}",
            strategy.engine().to_string().cyan(),
            strategy.style().to_string().yellow(),
            strategy.description().white()
        );
    }
    for (engine, style) in [(Engine::Redshift, 1), (Engine::Redshift, 2)] {
        println!(
            "{:10} {:6} {}",
            engine.to_string().cyan(),
            style.to_string().yellow(),
            "not implemented".dimmed()
        );
    }
}
