use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use stylebook::components::{self, BuildOptions, ComponentsResult};
use stylebook::config::{self, StylebookConfig};
use stylebook::render::TemplateSet;
use stylebook::{data, generate, output};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "stylebook")]
#[command(about = "Static style-guide generator for atomic-design components")]
#[command(long_about = "\
Static style-guide generator for atomic-design components

Your component directory is the data source. Directories become categories,
templates become components, and JSON files next to them become their data.

Component structure:

  components/
  ├── stylebook.toml                 # Config (optional)
  ├── intro.jinja                    # Root category template
  ├── atoms/
  │   ├── _icon.jinja                # Partial (leading underscore)
  │   ├── button.html.jinja          # Atom \"Button\"
  │   └── button.html.json           # Its example data (optional)
  ├── molecules/
  │   └── media-card.html.jinja      # Molecule \"Media Card\"
  ├── widgets/
  │   └── carousel.html.jinja        # Category outside the taxonomy
  └── data/
      ├── global.json                # Merged into every render context
      └── nav.json                   # Available as `nav`

Run 'stylebook gen-config' to generate a documented stylebook.toml.")]
#[command(version)]
struct Cli {
    /// Component directory
    #[arg(long, default_value = "components", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render all components and write the style guide
    Build,
    /// Render all components and list them without writing anything
    Check,
    /// Print the aggregated data as JSON
    Data,
    /// Print a stock stylebook.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            println!("==> Building {}", cli.source.display());
            let result = build(&cli.source, &config)?;
            println!("==> Writing style guide → {}", cli.output.display());
            let pages = generate::generate(&result, &config, &cli.output)?;
            output::print_build_output(&pages, &result);
        }
        Command::Check => {
            let config = config::load_config(&cli.source)?;
            println!("==> Checking {}", cli.source.display());
            let result = build(&cli.source, &config)?;
            output::print_check_output(&result);
            println!("==> Components are valid");
        }
        Command::Data => {
            let config = config::load_config(&cli.source)?;
            let data = data::aggregate_data(&config::data_pattern(&config, &cli.source))?;
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the `-v` count picks the level.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Discover templates, aggregate shared data and build the component listing.
fn build(
    source: &Path,
    config: &StylebookConfig,
) -> Result<ComponentsResult, Box<dyn std::error::Error>> {
    let set = TemplateSet::load(source, &config.template_extension)?;
    let shared = data::aggregate_data(&config::data_pattern(config, source))?;
    let result = components::build_components(&BuildOptions {
        templates: &set.templates,
        data: &shared,
        partials: &set.partials,
        component_dir: source,
        root_name: &config.root_name,
        taxonomy: &config.taxonomy,
        template_extension: &config.template_extension,
    })?;
    Ok(result)
}
