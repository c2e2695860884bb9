//! sift - CSS selector compiler debugging tool
//!
//! Usage:
//!   sift <selector>...            Print the canonical form of each selector
//!   sift <selector> --json        Dump the parsed model as JSON
//!   sift <selector> --chunks      Show the scanner's chunks
//!   sift <selector> --verbose     Show chunks and every compound selector
//!   sift --file selectors.txt     Read selectors from a file, one per line
//!
//! Examples:
//!   sift 'div.k1.k2 > b#xo:not(:checked)'
//!   sift 'li:nth-child( -n + 6 )' --json

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use owo_colors::OwoColorize;
use serde::Serialize;
use sift_common::warning::{set_quiet, warn_once};
use sift_selector::{
    DEFAULT_MAX_NESTING_DEPTH, ParserConfig, PseudoClass, PseudoFunction, SelectorGroup,
    SelectorParser, SelectorSyntaxError, render_group, scan_group,
};
use strum::VariantArray;

/// sift: compile CSS selectors and inspect the result
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "sift")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Canonical form
    sift '.kl'                      # *.kl

    # Several selectors, including groups
    sift 'a, b > c' 'div[a1="123"]'

    # Scanner output and model breakdown
    sift --verbose 'ul > li:nth-child(odd)'

    # JSON model for tooling
    sift --json 'input:not(:checked)'
"#)]
struct Cli {
    /// Selectors to compile
    #[arg(value_name = "SELECTOR")]
    selectors: Vec<String>,

    /// Read selectors from a file, one per line (blank lines are skipped)
    #[arg(short, long, value_name = "FILE")]
    file: Option<PathBuf>,

    /// Print the parsed model as JSON instead of canonical text
    #[arg(short, long)]
    json: bool,

    /// Show the chunks the scanner cuts each selector into
    #[arg(short, long)]
    chunks: bool,

    /// Show chunks and a breakdown of every compound selector
    #[arg(short, long)]
    verbose: bool,

    /// Maximum nesting of selector arguments such as :not(:has(...))
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_NESTING_DEPTH)]
    max_depth: usize,

    /// Suppress notices about normalized input (e.g. '::name')
    #[arg(short, long)]
    quiet: bool,

    /// List the supported pseudo-classes and pseudo-functions and exit
    #[arg(long)]
    list_pseudo: bool,
}

/// One line of `--json` output.
#[derive(Serialize)]
struct Report<'a> {
    selector: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    canonical: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a SelectorGroup>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a SelectorSyntaxError>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    set_quiet(cli.quiet);

    if cli.list_pseudo {
        print_pseudo_tables();
        return Ok(());
    }

    let selectors = collect_selectors(&cli)?;
    if selectors.is_empty() {
        bail!("no selectors given; pass them as arguments or with --file");
    }

    let parser = SelectorParser::new(ParserConfig::new().with_max_nesting_depth(cli.max_depth));
    let mut failures = 0_usize;

    for source in &selectors {
        if cli.chunks || cli.verbose {
            print_chunks(source);
        }

        match parser.parse_group_with_notices(source) {
            Ok((group, notices)) => {
                for notice in &notices {
                    warn_once("Selector", &notice.message);
                }
                if cli.json {
                    print_json(&Report {
                        selector: source,
                        canonical: Some(render_group(&group)),
                        model: Some(&group),
                        error: None,
                    })?;
                } else {
                    println!("{}", render_group(&group).green());
                    if cli.verbose {
                        print_breakdown(&group);
                    }
                }
            }
            Err(err) => {
                failures += 1;
                if cli.json {
                    print_json(&Report {
                        selector: source,
                        canonical: None,
                        model: None,
                        error: Some(&err),
                    })?;
                } else {
                    report_error(source, &err);
                }
            }
        }
    }

    if failures > 0 {
        bail!("{failures} of {} selectors failed to parse", selectors.len());
    }
    Ok(())
}

/// Selectors from the command line followed by those from `--file`.
fn collect_selectors(cli: &Cli) -> Result<Vec<String>> {
    let mut selectors = cli.selectors.clone();
    if let Some(path) = &cli.file {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Error reading '{}'", path.display()))?;
        selectors.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
    }
    Ok(selectors)
}

fn print_json(report: &Report<'_>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(report)?);
    Ok(())
}

fn print_chunks(source: &str) {
    // Scan errors are reported by the parse that follows.
    let Ok(selectors) = scan_group(source) else {
        return;
    };
    println!("{} {}", "=== Chunks:".bold(), source.bold());
    for (index, chunks) in selectors.iter().enumerate() {
        if selectors.len() > 1 {
            println!("  selector {index}");
        }
        for chunk in chunks {
            let leading = chunk
                .leading
                .map_or_else(|| "start".to_owned(), |c| format!("{c:?}"));
            println!(
                "  {:>4}..{:<4} {:<16} {}",
                chunk.offset,
                chunk.end(),
                leading.dimmed(),
                chunk.text
            );
        }
    }
}

fn print_breakdown(group: &SelectorGroup) {
    for list in group {
        for id in list.ids() {
            let compound = &list[id];
            let combinator = compound
                .combinator
                .map_or_else(|| "-".to_owned(), |c| format!("{c:?}"));
            println!(
                "  [{}] {}  element={} combinator={}",
                id.0,
                compound.to_string().bold(),
                compound.element,
                combinator
            );
            for simple in &compound.simple_selectors {
                println!("        {simple:?}");
            }
        }
    }
}

fn report_error(source: &str, err: &SelectorSyntaxError) {
    eprintln!("{} {}", "error:".red().bold(), err);
    eprintln!("  {source}");
    if let Some(position) = err.position {
        eprintln!("  {}{}", " ".repeat(position), "^".red().bold());
    }
}

fn print_pseudo_tables() {
    println!("{}", "Pseudo-classes:".bold());
    for class in PseudoClass::VARIANTS {
        println!("  :{}", class.name());
    }
    println!("{}", "Pseudo-functions:".bold());
    for function in PseudoFunction::VARIANTS {
        println!("  :{}()  {:?}", function.name(), function.grammar());
    }
}
