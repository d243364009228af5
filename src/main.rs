use clap::{Parser, Subcommand};
use launchnav::bridge::{CallbackBridge, ConsoleHost, EventSink, NavigatorBridge, ScriptedBridge};
use launchnav::core::config::{self, CliOverrides, ResolvedConfig};
use launchnav::{
    App, Host, LaunchMode, LaunchNavigator, LaunchOptions, Location, Platform, TransportMode,
    get_app_display_name,
};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "launchnav", about = "Launch navigation apps with a destination")]
struct Args {
    /// Platform to act as (defaults to config, then the build target)
    #[arg(short, long, global = true)]
    platform: Option<Platform>,

    /// Native host to drive
    #[arg(long, default_value_t, value_enum, global = true)]
    host: Host,

    /// Verbose logging and debug launches
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the apps of the platform with their capabilities
    Apps,
    /// List the transport modes an app accepts
    Modes { app: App },
    /// Show which optional parameters an app honours
    Supports { app: App },
    /// Report which apps are installed
    Available,
    /// Launch an app (or the picker when no app is given)
    Navigate {
        /// Address or "lat,lng"
        destination: String,
        #[arg(short, long)]
        app: Option<App>,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        start_name: Option<String>,
        #[arg(long)]
        dest_name: Option<String>,
        #[arg(short, long)]
        mode: Option<TransportMode>,
        #[arg(long)]
        launch_mode: Option<LaunchMode>,
        /// App specific parameter, repeatable: --extra t=k
        #[arg(long = "extra", value_parser = parse_key_value)]
        extras: Vec<(String, String)>,
    },
    /// Pick an app in the terminal, then launch it
    Select {
        destination: String,
        /// Restrict the picker to these apps
        #[arg(long = "only")]
        only: Vec<App>,
        #[arg(long)]
        header: Option<String>,
    },
    /// Send an analytics event
    Event {
        name: String,
        #[arg(long = "param", value_parser = parse_key_value)]
        params: Vec<(String, String)>,
        #[arg(long)]
        value: Option<f64>,
    },
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{s}'"))
}

fn build_bridge(host: &Host, config: &ResolvedConfig) -> Arc<dyn NavigatorBridge> {
    match host {
        Host::Console => {
            let sink = config.analytics_endpoint.as_deref().map(EventSink::new);
            Arc::new(CallbackBridge::new(ConsoleHost::new(
                config.platform,
                config.installed_apps.clone(),
                sink,
            )))
        }
        Host::DryRun => {
            let installed = if config.installed_apps.is_empty() {
                launchnav::get_apps_for_platform(config.platform)
            } else {
                config.installed_apps.clone()
            };
            Arc::new(ScriptedBridge::new().installed(installed))
        }
    }
}

fn yes_no(b: bool) -> &'static str {
    if b { "yes" } else { "no" }
}

async fn run(args: Args, config: ResolvedConfig) -> Result<(), Box<dyn std::error::Error>> {
    let bridge = build_bridge(&args.host, &config);
    let navigator = LaunchNavigator::from_config(bridge, &config);
    let platform = navigator.platform();

    match args.command {
        Command::Apps => {
            for app in navigator.apps() {
                println!(
                    "{:<12} {:<20} modes={:<3} start={:<3} start_name={:<3} dest_name={}",
                    app.as_str(),
                    get_app_display_name(app),
                    yes_no(navigator.supports_transport_mode(app)),
                    yes_no(navigator.supports_start(app)),
                    yes_no(navigator.supports_start_name(app)),
                    yes_no(navigator.supports_dest_name(app)),
                );
            }
        }
        Command::Modes { app } => {
            let modes = navigator.transport_modes(app);
            if modes.is_empty() {
                println!("{} on {} does not take a transport mode", get_app_display_name(app), platform);
            }
            for mode in modes {
                println!("{mode}");
            }
        }
        Command::Supports { app } => {
            println!("transport mode: {}", yes_no(navigator.supports_transport_mode(app)));
            println!("launch mode:    {}", yes_no(navigator.supports_launch_mode(app)));
            println!("start:          {}", yes_no(navigator.supports_start(app)));
            println!("start name:     {}", yes_no(navigator.supports_start_name(app)));
            println!("dest name:      {}", yes_no(navigator.supports_dest_name(app)));
        }
        Command::Available => {
            for (app, available) in navigator.available_apps().await? {
                println!("{:<12} {}", app.as_str(), yes_no(available));
            }
        }
        Command::Navigate {
            destination,
            app,
            start,
            start_name,
            dest_name,
            mode,
            launch_mode,
            extras,
        } => {
            let mut options = LaunchOptions::new().enable_debug(args.debug);
            options.app = app;
            options.start = start.as_deref().map(Location::parse).transpose()?;
            options.start_name = start_name;
            options.destination_name = dest_name;
            options.transport_mode = mode;
            options.launch_mode = launch_mode;
            options.extras = extras.into_iter().collect();
            navigator.navigate(destination.as_str(), options).await?;
        }
        Command::Select {
            destination,
            only,
            header,
        } => {
            let mut options = LaunchOptions::new()
                .enable_debug(args.debug)
                .selection_list(only)
                .on_app_selected(|app| log::info!("User selected {}", app));
            options.app_selection.dialog_header = header;
            let app = navigator.user_select(destination.as_str(), options).await?;
            eprintln!("Launched {}", get_app_display_name(app));
        }
        Command::Event {
            name,
            params,
            value,
        } => {
            let params = (!params.is_empty()).then(|| {
                serde_json::Value::Object(
                    params
                        .into_iter()
                        .map(|(k, v)| (k, serde_json::Value::String(v)))
                        .collect(),
                )
            });
            if let Some(sent) = navigator.log_event(name, params, value) {
                sent.await?;
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            platform: args.platform,
            app: None,
            enable_debug: args.debug,
        },
    );

    // Initialize file logger - writes to launchnav.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let level = if resolved.enable_debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    if let Ok(log_file) = File::create("launchnav.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    log::info!(
        "launchnav starting: platform={}, host={:?}",
        resolved.platform,
        args.host
    );

    match run(args, resolved).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::warn!("Command failed: {}", e);
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
