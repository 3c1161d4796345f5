//! recgrid - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// recgrid - browse, search, sort and bulk-edit a JSON array of records
#[derive(Parser, Debug)]
#[command(name = "recgrid")]
#[command(version)]
#[command(about = "Terminal table for JSON records: search, sort, paginate, select")]
pub struct Args {
    /// Path to a JSON array of objects (reads from stdin if not provided)
    pub file: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rows per page (must be positive)
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub page_size: Option<u32>,

    /// Column searched by the search bar
    #[arg(short = 'k', long)]
    pub search_key: Option<String>,

    /// Start with this search query
    #[arg(short, long)]
    pub search: Option<String>,

    /// Field offered in the filter bar (dotted path, e.g. college.campus)
    #[arg(short, long)]
    pub filter_field: Option<String>,

    /// Field holding each record's identity (dotted path)
    #[arg(long)]
    pub id_field: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,
}

impl Args {
    fn cli_overrides(&self) -> recgrid::config::CliOverrides {
        recgrid::config::CliOverrides {
            page_size: self.page_size.map(|n| n as usize),
            search_key: self.search_key.clone(),
            filter_field: self.filter_field.clone(),
            id_field: self.id_field.clone(),
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set NO_COLOR env var if --no-color flag is passed
    if args.no_color {
        std::env::set_var("NO_COLOR", "1");
    }

    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = recgrid::config::load_config_with_precedence(args.config.clone())?;
        let merged = recgrid::config::merge_config(config_file);
        let with_env = recgrid::config::apply_env_overrides(merged);
        recgrid::config::apply_cli_overrides(with_env, args.cli_overrides())
    };

    recgrid::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    let source = recgrid::source::detect_record_source(args.file.clone())?;

    recgrid::view::run_with_source(source, &config, args.search.clone())?;

    Ok(())
}
