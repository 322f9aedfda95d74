use anyhow::Result;
use clap::Parser;
use surfacecam::{
    CameraSurfaceEngineBuilder, FixedOrientation, MockProvider, SurfaceTarget, SurfacecamConfig,
};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(name = "surfacecam")]
#[command(about = "Camera surface lifecycle and parameter negotiation engine")]
#[command(version)]
#[command(long_about = "Drives a scripted surface lifecycle against a mock camera backend: \
the surface is created, laid out, flash and focus modes are cycled, the facing is switched, \
and the surface is destroyed. Size negotiation, parameter commits and mode notifications \
are logged along the way.")]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "surfacecam.toml", help = "Path to TOML configuration file")]
    config: String,

    /// Enable debug logging (most verbose)
    #[arg(short, long, help = "Enable debug level logging")]
    debug: bool,

    /// Enable verbose logging (info level)
    #[arg(short, long, help = "Enable verbose info level logging")]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, help = "Enable quiet mode - only log errors")]
    quiet: bool,

    /// Validate configuration and exit
    #[arg(long, help = "Validate configuration file and exit")]
    validate_config: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in TOML format and exit")]
    print_config: bool,

    /// Override log format (json, pretty, compact)
    #[arg(long, value_name = "FORMAT", help = "Log output format: json, pretty, or compact")]
    log_format: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.print_config {
        print_default_config()?;
        return Ok(());
    }

    init_logging(&args);

    info!("Starting surfacecam v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration file: {}", args.config);

    let config = match SurfacecamConfig::load_from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    if args.validate_config {
        match config.validate() {
            Ok(()) => {
                println!("✓ Configuration is valid");
                return Ok(());
            }
            Err(e) => {
                eprintln!("✗ Configuration validation failed: {}", e);
                std::process::exit(1);
            }
        }
    }

    config.validate().map_err(|e| {
        error!("Configuration validation failed: {}", e);
        e
    })?;

    run_scripted_lifecycle(&config)
}

/// Exercise every public engine operation against the mock backend.
fn run_scripted_lifecycle(config: &SurfacecamConfig) -> Result<()> {
    let mut provider =
        MockProvider::new(config.mock_preview_sizes(), config.mock_capture_sizes());
    provider.set_fail_open(config.mock.fail_open);
    provider.set_fail_bind(config.mock.fail_bind);

    let mut engine = CameraSurfaceEngineBuilder::new()
        .provider(provider)
        .orientation_source(FixedOrientation(config.orientation()?))
        .params(config.params_config()?)
        .build()?;

    engine.set_on_flash_mode_changed(|index, mode| {
        println!("flash mode changed -> index {} ({})", index, mode);
    });
    engine.set_on_focus_mode_changed(|index, mode| {
        println!("focus mode changed -> index {} ({})", index, mode);
    });

    let (width, height) = config.surface.resolution;

    engine.on_surface_created(SurfaceTarget(1))?;
    engine.on_surface_changed(width, height)?;

    info!("Cycling flash modes through one full revolution");
    let flash_count = config.flash_modes()?.len();
    for _ in 0..flash_count {
        engine.advance_flash_mode()?;
    }

    info!("Advancing focus mode once");
    engine.advance_focus_mode()?;

    info!("Switching camera facing");
    engine.switch_camera()?;

    engine.on_surface_destroyed();
    info!("Scripted lifecycle complete");

    Ok(())
}

fn init_logging(args: &Args) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

    let log_level = if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else if args.quiet {
        "error"
    } else {
        "warn"
    };

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("surfacecam={}", log_level)));

    let fmt_layer = match args.log_format.as_deref() {
        Some("json") => fmt::layer()
            .json()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed(),
        Some("compact") => fmt::layer()
            .compact()
            .with_target(false)
            .boxed(),
        Some("pretty") | None => fmt::layer()
            .pretty()
            .with_target(true)
            .with_file(args.debug)
            .with_line_number(args.debug)
            .boxed(),
        Some(format) => {
            eprintln!("Warning: Unknown log format '{}', using default", format);
            fmt::layer().with_target(true).boxed()
        }
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(env_filter)
        .init();
}

/// Print default configuration in TOML format
fn print_default_config() -> Result<()> {
    println!("# Surfacecam Configuration File");
    println!("# Default configuration with all available options");
    println!();
    println!("{}", toml::to_string_pretty(&SurfacecamConfig::default())?);
    Ok(())
}
