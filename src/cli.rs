use crate::compiler::compile_plan;
use crate::config::load_config;
use crate::normalize::normalize_payload;
use crate::parser::{parse_template, referenced_shortcodes};
use crate::plan_dump::{plan_to_json, write_plan_dump};
use crate::render::{render_html, write_output_html};
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "rplan",
    version,
    about = "Compile a shortcode layout template and a generated-content payload into a render plan"
)]
pub struct Args {
    /// Layout template file or '-' for stdin
    #[arg(short = 't', long = "template")]
    pub template: PathBuf,

    /// Content payload (JSON) file or '-' for stdin
    #[arg(short = 'p', long = "payload")]
    pub payload: PathBuf,

    /// Output file. Defaults to stdout if omitted.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "json")]
    pub output_format: OutputFormat,

    /// Config JSON file (chart palette, breakpoint, page title)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Log plan diagnostics to stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Html,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);
    run_with(args)
}

/// Runs the pipeline for already-parsed arguments.
pub fn run_with(args: Args) -> Result<()> {
    if is_stdin(&args.template) && is_stdin(&args.payload) {
        return Err(anyhow::anyhow!(
            "Template and payload cannot both be read from stdin"
        ));
    }

    let config = load_config(args.config.as_deref())?;
    let template = read_input(&args.template)?;
    let payload = read_input(&args.payload)?;

    let rows = parse_template(&template);
    let sections = normalize_payload(&payload);
    if rows.is_empty() {
        warn!("template has no layout rows");
    }
    let absent: Vec<&str> = referenced_shortcodes(&rows)
        .into_iter()
        .filter(|shortcode| sections.get(shortcode).is_none())
        .collect();
    if !absent.is_empty() {
        info!(?absent, "template references shortcodes missing from the payload");
    }

    let plan = compile_plan(&rows, &sections);
    match args.output_format {
        OutputFormat::Json => match args.output.as_deref() {
            Some(path) => write_plan_dump(path, &plan, &config.chart)?,
            None => println!("{}", plan_to_json(&plan, &config.chart)?),
        },
        OutputFormat::Html => {
            let html = render_html(&plan, &config);
            write_output_html(&html, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

fn is_stdin(path: &Path) -> bool {
    path == Path::new("-")
}

fn read_input(path: &Path) -> Result<String> {
    if is_stdin(path) {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}
