//! Main CLI application for the sparse Game of Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sparse_life::{
    config::{CliOverrides, FileSeedArg, NamedSeedArg, OutputFormat, Settings},
    driver::Driver,
    game_of_life::{library, save_pattern_to_file, save_snapshot},
    seed_grid,
    utils::{ColorOutput, GridFormatter, TerminalRenderer, Viewport},
};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sparse_life")]
#[command(about = "Conway's Game of Life on an unbounded grid")]
#[command(version = "0.1.0")]
struct Cli {
    /// Verbose logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Json,
}

impl From<FormatArg> for OutputFormat {
    fn from(format: FormatArg) -> Self {
        match format {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
        }
    }
}

#[derive(clap::Args)]
struct SimulationArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/default.yaml")]
    config: PathBuf,

    /// Number of generations (overrides config)
    #[arg(short, long)]
    generations: Option<u64>,

    /// Library pattern to seed as name@x,y (repeatable, replaces configured seeds)
    #[arg(short, long = "seed")]
    seeds: Vec<NamedSeedArg>,

    /// Pattern file to seed as path@x,y (repeatable, replaces configured seeds)
    #[arg(long = "pattern-file")]
    pattern_files: Vec<FileSeedArg>,

    /// Write the final generation to this file (overrides config)
    #[arg(short, long)]
    export: Option<PathBuf>,

    /// Export format (overrides config)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Viewport width in cells (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Viewport height in cells (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Shift the view right by this many cells, on top of the configured pan
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pan_x: i64,

    /// Shift the view down by this many cells, on top of the configured pan
    #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
    pan_y: i64,
}

impl SimulationArgs {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            generations: self.generations,
            seeds: self
                .seeds
                .iter()
                .map(|s| s.0.clone())
                .chain(self.pattern_files.iter().map(|s| s.0.clone()))
                .collect(),
            export_path: self.export.clone(),
            format: self.format.map(Into::into),
            width: self.width,
            height: self.height,
            ..Default::default()
        }
    }

    /// Configured viewport with the command line pan applied
    fn viewport(&self, settings: &Settings) -> Viewport {
        let mut viewport = Viewport::from(&settings.display);
        viewport.pan(self.pan_x, self.pan_y);
        viewport
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation at a fixed tick rate, drawing each generation
    Run {
        #[command(flatten)]
        sim: SimulationArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Append frames instead of redrawing in place
        #[arg(long)]
        no_clear: bool,
    },

    /// Advance without delay and print the final generation
    Step {
        #[command(flatten)]
        sim: SimulationArgs,

        /// Print the grid with coordinates
        #[arg(long)]
        coords: bool,
    },

    /// List the built-in patterns
    Patterns {
        /// Also draw each pattern
        #[arg(long)]
        show: bool,
    },

    /// Create an example configuration and pattern file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Run { sim, interval, no_clear } => {
            let mut overrides = sim.overrides();
            overrides.tick_interval_ms = interval;
            run_command(&sim, overrides, !no_clear)
        }
        Commands::Step { sim, coords } => step_command(&sim, coords),
        Commands::Patterns { show } => patterns_command(show),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "sparse_life=debug" } else { "sparse_life=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!("{}", ColorOutput::warning(&format!(
            "Config file {} not found, using defaults", config_path.display()
        )));
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

fn export_if_requested(settings: &Settings, grid: &sparse_life::LifeGrid) -> Result<()> {
    if let Some(ref path) = settings.output.export_path {
        save_snapshot(&grid.snapshot(), grid.generation(), path, settings.output.format)
            .with_context(|| format!("Failed to export snapshot to {}", path.display()))?;
        println!("{}", ColorOutput::success(&format!("Snapshot written to {}", path.display())));
    }
    Ok(())
}

fn run_command(sim: &SimulationArgs, overrides: CliOverrides, clear_screen: bool) -> Result<()> {
    let settings = load_settings(&sim.config, &overrides)?;
    let mut grid = seed_grid(&settings)?;

    let mut renderer = TerminalRenderer::new(std::io::stdout(), sim.viewport(&settings))
        .with_clear_screen(clear_screen);
    let driver = Driver::from_config(&settings.simulation);

    let summary = driver
        .run(&mut grid, settings.simulation.generations, &mut renderer)
        .context("Simulation failed")?;

    println!();
    if summary.extinct {
        println!("{}", ColorOutput::warning(&format!(
            "Population died out after {} generations", summary.generations
        )));
    } else {
        println!("{}", ColorOutput::success(&format!(
            "Completed {} generations, {} living cells",
            summary.generations,
            summary.final_population
        )));
    }
    if summary.coalesced_ticks > 0 {
        println!("{}", ColorOutput::warning(&format!(
            "{} ticks were coalesced because generations took longer than the interval",
            summary.coalesced_ticks
        )));
    }

    export_if_requested(&settings, &grid)
}

fn step_command(sim: &SimulationArgs, coords: bool) -> Result<()> {
    let settings = load_settings(&sim.config, &sim.overrides())?;
    let mut grid = seed_grid(&settings)?;
    let initial_population = grid.population();

    println!("{}", ColorOutput::info(&format!(
        "Advancing {} generations from {} living cells",
        settings.simulation.generations,
        initial_population
    )));

    let start = Instant::now();
    grid.advance_by(settings.simulation.generations);
    let elapsed = start.elapsed();

    let snapshot = grid.snapshot();
    let region = sim.viewport(&settings).region();
    if coords {
        println!("{}", GridFormatter::format_with_coords(&snapshot, &region));
    } else {
        println!("{}", GridFormatter::format_region(&snapshot, &region));
    }

    println!("{}", GridFormatter::format_stats(grid.generation(), &snapshot));
    println!("Living cells: {} → {}", initial_population, grid.population());
    println!("Time: {:.3}s", elapsed.as_secs_f64());

    export_if_requested(&settings, &grid)
}

fn patterns_command(show: bool) -> Result<()> {
    println!("Name           | Category   | Size  | Living");
    println!("---------------|------------|-------|-------");

    for entry in library::PATTERNS {
        let pattern = entry.pattern();
        println!(
            "{:14} | {:10} | {:>2}x{:<2} | {}",
            entry.name,
            entry.category.to_string(),
            pattern.width(),
            pattern.height(),
            pattern.living_count()
        );
        if show {
            println!("{}", pattern);
        }
    }

    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("📁 Setting up example files..."));

    let config_path = directory.join("config/default.yaml");
    if config_path.exists() && !force {
        println!("{}", ColorOutput::warning(&format!(
            "{} already exists, use --force to overwrite", config_path.display()
        )));
        return Ok(());
    }

    Settings::default()
        .to_file(&config_path)
        .context("Failed to create default configuration")?;
    println!("Created default configuration: {}", config_path.display());

    let pattern_path = directory.join("patterns/glider.txt");
    let glider = library::get("glider").context("Glider missing from pattern library")?;
    save_pattern_to_file(&glider, &pattern_path)
        .with_context(|| format!("Failed to write {}", pattern_path.display()))?;
    println!("Created example pattern: {}", pattern_path.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --config {}", config_path.display());
    println!("3. Or seed a file: cargo run -- step --pattern-file {}@0,0", pattern_path.display());

    Ok(())
}
