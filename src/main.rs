//! parsed-paper - content statistics for HTML documents

use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use serde_json::{Map, Value, json};

use parsed_paper::{ResearchConfig, Researcher, parse_fragment, parse_html};

#[derive(Parser)]
#[command(name = "parsed-paper")]
#[command(version, about = "Content statistics for HTML documents", long_about = None)]
#[command(after_help = "EXAMPLES:
    parsed-paper post.html --domain yoast.com        Run every research
    parsed-paper post.html -r wordCount              Run a single research
    parsed-paper snippet.html --fragment             Parse a body fragment")]
struct Cli {
    /// Input HTML file
    #[arg(value_name = "INPUT")]
    input: String,

    /// Site domain; links to this host are internal
    #[arg(short, long)]
    domain: Option<String>,

    /// JSON configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Research to run (repeatable); defaults to all
    #[arg(short, long = "research", value_name = "NAME")]
    research: Vec<String>,

    /// Treat the input as a body fragment rather than a full document
    #[arg(long)]
    fragment: bool,

    /// Log builder and research decisions
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether every research succeeded.
fn run(cli: &Cli) -> Result<bool, String> {
    let mut config = match &cli.config {
        Some(path) => ResearchConfig::from_path(path).map_err(|e| e.to_string())?,
        None => ResearchConfig::new(),
    };
    if let Some(domain) = &cli.domain {
        config = config.with_site_domain(domain.as_str());
    }
    config.validate().map_err(|e| e.to_string())?;

    let html = std::fs::read_to_string(&cli.input).map_err(|e| format!("{}: {e}", cli.input))?;
    let tree = if cli.fragment {
        parse_fragment(&html)
    } else {
        parse_html(&html)
    };

    let researcher = Researcher::with_defaults();
    for name in &cli.research {
        if !researcher.has_research(name) {
            let known: Vec<_> = researcher.research_names().collect();
            return Err(format!(
                "unknown research '{name}' (known: {})",
                known.join(", ")
            ));
        }
    }

    let results = if cli.research.is_empty() {
        futures::executor::block_on(researcher.do_all(&tree, &config))
    } else {
        cli.research
            .iter()
            .map(|name| {
                let result =
                    futures::executor::block_on(researcher.do_research(name, &tree, &config));
                (name.clone(), result)
            })
            .collect()
    };

    let mut ok = true;
    let mut output = Map::new();
    for (name, result) in results {
        let value = match result {
            Ok(value) => value,
            Err(e) => {
                ok = false;
                json!({ "error": e.to_string() })
            }
        };
        output.insert(name, value);
    }

    let pretty = serde_json::to_string_pretty(&Value::Object(output)).map_err(|e| e.to_string())?;
    println!("{pretty}");
    Ok(ok)
}
