//! UTM Dispatch console
//!
//! Drives the dispatch core from a terminal. Session and theme live in the
//! configured key-value store, so they survive between invocations.
//!
//! ```sh
//! utm-console login --email ivan@example.com --password secret
//! utm-console whoami
//! utm-console navigate /no-fly-zones
//! utm-console theme set auto --prefers-dark
//! utm-console drones --search mavic --status active
//! utm-console --check
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::{error, info};

use utm_dispatch::domain::{
    search_drones, search_flights, DroneFilter, DroneStatus, FlightFilter, FlightStatus,
    RepositoryProvider,
};
use utm_dispatch::interfaces::{submit_login, submit_register, LoginForm, RegisterForm};
use utm_dispatch::shared::{validate_pagination, PaginationParams};
use utm_dispatch::{
    default_config_path, init_tracing, open_storage, AppConfig, AppContext, ColorSchemeSignal,
    GuardDecision, ThemeMode,
};

/// UTM Dispatch: drone flight-operations console.
#[derive(Parser, Debug)]
#[command(
    name = "utm-console",
    version,
    about = "Console front-end for the UTM dispatch core",
    long_about = "Console front-end for the UTM dispatch core.\n\n\
                  Default config: ~/.config/utm-dispatch/config.toml"
)]
struct Cli {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "UTM_CONFIG")]
    config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    log_level: Option<String>,

    /// Report the OS colour scheme as dark.
    #[arg(long, global = true)]
    prefers_dark: bool,

    /// Validate the configuration file and exit.
    #[arg(long)]
    check: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in
    Login {
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
    },
    /// Create an account and sign in
    Register {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        password: String,
        #[arg(long, default_value = "")]
        confirm_password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in identity
    Whoami,
    /// Display preference
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
    /// Resolve a path through the route guard
    Navigate { path: String },
    /// List drones
    Drones {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<DroneStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List pilots
    Pilots,
    /// List flight applications
    Flights {
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        status: Option<FlightStatus>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// List no-fly zones
    Zones,
    /// Current weather at a coordinate
    Weather {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },
}

#[derive(Subcommand, Debug)]
enum ThemeAction {
    Show,
    Set { mode: ThemeMode },
    Toggle,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // ── Load configuration ─────────────────────────────────────
    let config_path = cli.config.clone().unwrap_or_else(default_config_path);

    let mut config = match AppConfig::load(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load config from {}: {}", config_path.display(), e);
            eprintln!("Using default configuration.");
            AppConfig::default()
        }
    };

    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    init_tracing(&config);
    info!("Configuration loaded from {}", config_path.display());

    // ── Config validation mode ─────────────────────────────────
    if cli.check {
        println!("✅ Configuration is valid");
        println!("   Config file : {}", config_path.display());
        println!("   Storage     : {:?} {}", config.storage.backend, config.storage.path.display());
        println!("   Latency     : {} ms", config.session.simulated_latency_ms);
        println!("   Timeout     : {} ms", config.session.request_timeout_ms);
        println!("   Weather key : {}", if config.weather.api_key.is_some() { "set" } else { "missing" });
        println!("   Log level   : {}", config.logging.level);
        return Ok(());
    }

    let Some(command) = cli.command else {
        println!("Nothing to do. See `utm-console --help`.");
        return Ok(());
    };

    // ── Build context ──────────────────────────────────────────
    let storage = open_storage(&config.storage)?;
    let ctx = AppContext::with_storage(config, storage, ColorSchemeSignal::new(cli.prefers_dark));
    ctx.init().await;

    let outcome = run(&ctx, command).await;
    print_notifications(&ctx);
    ctx.dispose();

    if let Err(ref e) = outcome {
        error!("Command failed: {}", e);
    }
    outcome
}

async fn run(ctx: &AppContext, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Login { email, password } => {
            let form = LoginForm { email, password };
            // Failures are already reported through the notification queue.
            let _ = submit_login(&ctx.session, &ctx.notifications, form).await;
        }
        Command::Register {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
            };
            let _ = submit_register(&ctx.session, &ctx.notifications, form).await;
        }
        Command::Logout => {
            ctx.session.logout();
            println!("Signed out");
        }
        Command::Whoami => match ctx.session.current_user() {
            Some(user) => println!("{} <{}> [{}]", user.name, user.email, user.role),
            None => println!("Not signed in"),
        },
        Command::Theme { action } => {
            match action {
                ThemeAction::Show => {}
                ThemeAction::Set { mode } => ctx.theme.set_theme(mode),
                ThemeAction::Toggle => {
                    ctx.theme.toggle_theme();
                }
            }
            let theme = ctx.theme.snapshot();
            println!(
                "Theme: {} ({})",
                theme.preference,
                if theme.is_dark { "dark" } else { "light" }
            );
        }
        Command::Navigate { path } => {
            let nav = ctx.navigate(&path);
            match nav.decision {
                GuardDecision::Render => println!("{} -> render", nav.route),
                GuardDecision::Loading => println!("{} -> loading", nav.route),
                GuardDecision::Redirect(to) => println!("{} -> redirect to {}", nav.route, to),
            }
        }
        Command::Drones {
            search,
            status,
            page,
            limit,
        } => {
            let filter = DroneFilter { search, status };
            let result = search_drones(ctx.repos.drones(), &filter, pagination(page, limit)).await?;
            for d in &result.items {
                println!("{:>3}  {:<22} {:<14} {:<12} {}", d.id, d.name, d.model, d.status, d.serial_number);
            }
            println!("page {}/{} ({} total)", result.page, result.total_pages, result.total);
        }
        Command::Pilots => {
            for p in ctx.repos.pilots().list().await? {
                println!("{:>3}  {:<22} {:<12} {}", p.id, p.full_name, p.license_number, p.email);
            }
        }
        Command::Flights {
            search,
            status,
            page,
            limit,
        } => {
            let filter = FlightFilter {
                search,
                status,
                flight_type: None,
            };
            let result = search_flights(ctx.repos.flights(), &filter, pagination(page, limit)).await?;
            for f in &result.items {
                println!(
                    "{:>3}  {:<32} {:<10} {} -> {}",
                    f.id,
                    f.title,
                    f.status,
                    f.start_time.format("%Y-%m-%d %H:%M"),
                    f.end_time.format("%H:%M")
                );
            }
            println!("page {}/{} ({} total)", result.page, result.total_pages, result.total);
        }
        Command::Zones => {
            for z in ctx.repos.zones().list().await? {
                println!("{:>3}  {:<28} {} points", z.id, z.name, z.polygon.len());
            }
        }
        Command::Weather { lat, lon } => {
            let w = ctx.weather.current(lat, lon).await?;
            println!(
                "{}°C, {}, wind {} m/s @ {}°, humidity {}%, pressure {} hPa",
                w.temperature, w.description, w.wind_speed, w.wind_direction, w.humidity, w.pressure
            );
        }
    }
    Ok(())
}

fn pagination(page: Option<u32>, limit: Option<u32>) -> PaginationParams {
    let (page, limit) = validate_pagination(page, limit);
    PaginationParams { page, limit }
}

fn print_notifications(ctx: &AppContext) {
    for n in ctx.notifications.notifications() {
        match n.title {
            Some(ref title) => println!("[{}] {}: {}", n.severity.as_str(), title, n.message),
            None => println!("[{}] {}", n.severity.as_str(), n.message),
        }
    }
}
