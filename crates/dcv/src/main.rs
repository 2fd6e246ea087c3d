//! dcv converts Markdown files to PDF and PDF files to Markdown.
//!
//! Sources are given as a positional PATH. The earlier flag style
//! (`--file/-f`, `--dir/-d`) is still accepted.

mod commands;
mod config;
mod context;
mod scaffold;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{ArgAction, Args, CommandFactory, Parser, Subcommand};

use convert_core::options::{ConversionOptions, RenderEngine};

use crate::commands::{Kind, SourceSelection};
use crate::context::AppContext;
use crate::scaffold::AssetSelection;

#[derive(Parser)]
#[command(
    name = "dcv",
    version,
    disable_version_flag = true,
    about = "Document Converter - convert between PDF and Markdown formats"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Show version and exit
    #[arg(short = 'v', long = "version")]
    show_version: bool,

    /// Verbosity level (repeat for more detail)
    #[arg(long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Dump effective merged config as TOML and exit
    #[arg(long, global = true)]
    dump_config: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert Markdown file(s) to PDF
    Md2pdf {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Convert PDF file(s) to Markdown
    Pdf2md {
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Convert Markdown and PDF files, choosing the direction by extension
    Convert {
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        render: RenderArgs,
    },
    /// Export the default CSS and HTML template for customization
    Scaffold {
        /// Export the default CSS stylesheet
        #[arg(long)]
        css: bool,
        /// Export the default HTML template
        #[arg(long)]
        template: bool,
        /// Export all assets (CSS + template)
        #[arg(short = 'a', long)]
        all: bool,
        /// Directory to write the files to (default: current directory)
        #[arg(short = 'o', long = "output-dir")]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Args, Clone, Default)]
struct SourceArgs {
    /// Input file or directory
    path: Option<PathBuf>,

    /// Input file (earlier flag style)
    #[arg(short = 'f', long = "file", hide = true)]
    file: Option<PathBuf>,

    /// Input directory (earlier flag style)
    #[arg(short = 'd', long = "dir", hide = true)]
    dir: Option<PathBuf>,

    /// Output directory for converted files
    #[arg(short = 'o', long = "output-dir")]
    output_dir: Option<PathBuf>,

    /// Do not descend into subdirectories
    #[arg(long)]
    no_recursive: bool,
}

#[derive(Args, Clone, Default)]
struct RenderArgs {
    /// Custom CSS stylesheet
    #[arg(short = 'c', long)]
    css: Option<PathBuf>,

    /// Custom HTML template
    #[arg(long)]
    template: Option<PathBuf>,

    /// Top page margin (e.g. 30mm, 1in)
    #[arg(long)]
    margin_top: Option<String>,

    /// Right page margin
    #[arg(long)]
    margin_right: Option<String>,

    /// Bottom page margin
    #[arg(long)]
    margin_bottom: Option<String>,

    /// Left page margin
    #[arg(long)]
    margin_left: Option<String>,

    /// PDF engine: chromium (default) or md-to-pdf
    #[arg(long, value_parser = parse_engine)]
    engine: Option<RenderEngine>,

    /// Browser executable used by the chromium engine
    #[arg(long)]
    browser: Option<PathBuf>,
}

fn parse_engine(s: &str) -> std::result::Result<RenderEngine, String> {
    RenderEngine::from_name(s).ok_or_else(|| format!("unknown engine '{}' (expected chromium or md-to-pdf)", s))
}

impl SourceArgs {
    fn selection(&self) -> SourceSelection {
        SourceSelection {
            path: self.path.clone(),
            file: self.file.clone(),
            dir: self.dir.clone(),
        }
    }

    fn apply(&self, opts: &mut ConversionOptions) {
        if let Some(ref dir) = self.output_dir {
            opts.output_dir = dir.clone();
        }
        if self.no_recursive {
            opts.recursive = false;
        }
    }
}

impl RenderArgs {
    fn apply(&self, opts: &mut ConversionOptions) {
        if self.css.is_some() {
            opts.css = self.css.clone();
        }
        if self.template.is_some() {
            opts.template = self.template.clone();
        }
        if let Some(engine) = self.engine {
            opts.engine = engine;
        }
        if self.browser.is_some() {
            opts.browser = self.browser.clone();
        }

        let margins = convert_core::options::PageMargins {
            top: self.margin_top.clone(),
            right: self.margin_right.clone(),
            bottom: self.margin_bottom.clone(),
            left: self.margin_left.clone(),
        };
        opts.margins.merge(&margins);
    }
}

/// Apply CLI flags on top of config-loaded options.
/// Only overrides what was explicitly provided.
fn apply_cli_overrides(opts: &mut ConversionOptions, cli: &Cli) {
    if cli.verbose > 0 {
        opts.verbose = cli.verbose;
    }
    match &cli.command {
        Some(Commands::Md2pdf { source, render }) | Some(Commands::Convert { source, render }) => {
            source.apply(opts);
            render.apply(opts);
        }
        Some(Commands::Pdf2md { source }) => source.apply(opts),
        Some(Commands::Scaffold { .. }) | None => {}
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn main() {
    let cli = Cli::parse();

    if cli.show_version {
        println!("dcv version: {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let loaded = config::load_config();
    let mut opts = loaded.options.clone();
    config::apply_env_overrides(&mut opts, |name| std::env::var(name).ok());
    apply_cli_overrides(&mut opts, &cli);

    // Config files may raise the verbosity, so logging starts once they are merged.
    init_logging(opts.verbose);
    loaded.log();
    log::debug!("{} settings: {:?}", opts.app_name, opts);

    // Handle --dump-config
    if cli.dump_config {
        match toml::to_string_pretty(&opts) {
            Ok(s) => {
                println!("{}", s);
                process::exit(0);
            }
            Err(e) => {
                eprintln!("Error serializing config: {}", e);
                process::exit(1);
            }
        }
    }

    let Some(command) = cli.command else {
        let _ = Cli::command().print_help();
        println!();
        return;
    };

    match run(command, opts) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(command: Commands, opts: ConversionOptions) -> Result<i32> {
    match command {
        Commands::Md2pdf { source, .. } => {
            let input = source.selection().resolve()?;
            let ctx = AppContext::new(opts);
            let report = commands::run_md2pdf(&ctx, &input)?;
            Ok(commands::finish(&report, Kind::Markdown))
        }
        Commands::Pdf2md { source } => {
            let input = source.selection().resolve()?;
            let ctx = AppContext::new(opts);
            let report = commands::run_pdf2md(&ctx, &input)?;
            Ok(commands::finish(&report, Kind::Pdf))
        }
        Commands::Convert { source, .. } => {
            let input = source.selection().resolve()?;
            let ctx = AppContext::new(opts);
            let report = commands::run_convert(&ctx, &input)?;
            Ok(commands::finish(&report, Kind::Any))
        }
        Commands::Scaffold {
            css,
            template,
            all,
            output_dir,
        } => {
            let output_dir = output_dir.unwrap_or_else(|| PathBuf::from("."));
            let selection = AssetSelection {
                css: css || all,
                template: template || all,
            };
            scaffold::run_scaffold(&output_dir, selection)
        }
    }
}
