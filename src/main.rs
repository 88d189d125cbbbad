use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use template_naming::config::{self, NamingConfig, OutputFormat};
use template_naming::face_types::FaceTypeRegistry;
use template_naming::{catalog, output, scan};
use tracing_subscriber::EnvFilter;

/// Filenames to work on. Read from stdin (one per line) when none are given.
#[derive(clap::Args, Clone)]
struct NameArgs {
    names: Vec<String>,
}

impl NameArgs {
    fn resolve(self) -> std::io::Result<Vec<String>> {
        if !self.names.is_empty() {
            return Ok(self.names);
        }
        catalog::read_names(std::io::stdin().lock())
    }
}

#[derive(Parser)]
#[command(name = "template-naming")]
#[command(about = "Parse, group, and check photo template filenames")]
#[command(long_about = "\
Parse, group, and check photo template filenames

Template filenames follow <group_type>_<code>[_<face>].<ext>:

  girl_young_hhhh5_n.jpg   group girl_young, code hhhh5, narrow face
  girl_young_hhhh5_w.jpg   same template group, wide face
  girl_child_abc12.png     group girl_child, code abc12, both faces

The group type may contain underscores; the code is exactly five letters or
digits; the face marker is n (narrow) or w (wide) and may be omitted.

Run 'template-naming gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml (stock settings when omitted)
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    /// Output format (overrides output.format in config)
    #[arg(long, value_enum, global = true)]
    format: Option<OutputFormat>,

    /// Log debug details to stderr
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print every parsed field for each filename
    Parse(NameArgs),
    /// Report invalid names, duplicates, and missing face variants
    Check(NameArgs),
    /// Group narrow and wide variants by template group id
    Group(NameArgs),
    /// Collect template files from a directory, then group and check them
    Scan {
        /// Directory to scan
        dir: PathBuf,
    },
    /// Show whether group types require narrow/wide variants
    Requires {
        /// Group type codes
        #[arg(required = true)]
        codes: Vec<String>,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let Cli {
        config_dir,
        format,
        verbose,
        command,
    } = Cli::parse();
    init_tracing(verbose);

    let clean = match command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            true
        }
        Command::Parse(args) => {
            let settings = Settings::load(config_dir.as_deref(), format)?;
            let entries = catalog::parse_all(&args.resolve()?);
            match settings.format {
                OutputFormat::Text => output::print_parse_results(&entries, &settings.registry),
                OutputFormat::Json => {
                    let parsed: Vec<_> = entries.iter().map(|e| &e.parsed).collect();
                    println!("{}", serde_json::to_string_pretty(&parsed)?);
                }
            }
            true
        }
        Command::Check(args) => {
            let settings = Settings::load(config_dir.as_deref(), format)?;
            let catalog = catalog::build_catalog(&args.resolve()?, &settings.registry);
            report_issues(&catalog, &settings)?
        }
        Command::Group(args) => {
            let settings = Settings::load(config_dir.as_deref(), format)?;
            let catalog = catalog::build_catalog(&args.resolve()?, &settings.registry);
            match settings.format {
                OutputFormat::Text => output::print_catalog(&catalog),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&catalog)?),
            }
            true
        }
        Command::Scan { dir } => {
            let settings = Settings::load(config_dir.as_deref(), format)?;
            let names = scan::collect_template_names(&dir, &settings.config.scan)?;
            let catalog = catalog::build_catalog(&names, &settings.registry);
            if settings.format == OutputFormat::Text {
                println!("==> Scanned {} ({} files)", dir.display(), names.len());
                output::print_catalog(&catalog);
                println!();
            }
            report_issues(&catalog, &settings)?
        }
        Command::Requires { codes } => {
            let settings = Settings::load(config_dir.as_deref(), format)?;
            match settings.format {
                OutputFormat::Text => output::print_requires(&codes, &settings.registry),
                OutputFormat::Json => {
                    let answers: serde_json::Map<String, serde_json::Value> = codes
                        .iter()
                        .map(|c| (c.clone(), settings.registry.requires_face_type(c).into()))
                        .collect();
                    println!("{}", serde_json::to_string_pretty(&answers)?);
                }
            }
            true
        }
    };

    Ok(if clean {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Resolved config plus the values every command reads from it.
struct Settings {
    config: NamingConfig,
    registry: FaceTypeRegistry,
    format: OutputFormat,
}

impl Settings {
    fn load(
        config_dir: Option<&Path>,
        format: Option<OutputFormat>,
    ) -> Result<Self, config::ConfigError> {
        let config = config::load_config(config_dir)?;
        init_thread_pool(&config.processing);
        Ok(Self {
            registry: config.registry(),
            format: format.unwrap_or(config.output.format),
            config,
        })
    }
}

/// Print catalog issues. Returns whether the catalog was clean.
fn report_issues(
    catalog: &catalog::Catalog,
    settings: &Settings,
) -> Result<bool, Box<dyn std::error::Error>> {
    let issues = match catalog.check(settings.config.check.require_face_variants) {
        Ok(()) => Vec::new(),
        Err(issues) => issues,
    };
    match settings.format {
        OutputFormat::Text => output::print_issues(&issues),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&issues)?),
    }
    Ok(issues.is_empty())
}

/// Install the stderr log subscriber. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Size the global rayon pool used by `parse_all`.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
