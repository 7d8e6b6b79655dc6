// panmenu - browse and control mpd through dmenu (or any line selector)
// Config is loaded once, CLI flags override it, then the command menu runs until cancelled

use anyhow::{Context, Result};
use clap::Parser;
use panmenu::{Config, Menu, MpcSession, ProcessPicker};
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::fmt::writer::MakeWriterExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "panmenu")]
#[command(about = "Control mpd from dmenu, rofi or fzf")]
struct Args {
    /// mpd host (overrides config)
    #[arg(short = 'a', long = "address")]
    address: Option<String>,

    /// mpd port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Load settings from this file instead of the default location
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable developer logging (stderr + debug output)
    #[arg(long)]
    dev: bool,

    /// Selector command line, e.g. `rofi -dmenu -i`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    picker_cmd: Vec<String>,
}

fn init_logging(log_dir: &Path, dev: bool) -> Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    // Daily rotating file appender
    let file_appender = tracing_appender::rolling::daily(log_dir, "panmenu.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    // Base filter: info level for general logs, debug for panmenu
    let base_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,panmenu=debug"));

    let builder = tracing_subscriber::fmt()
        .with_target(true)
        .with_level(true)
        .with_ansi(false)
        .with_env_filter(base_filter);

    // dev mode mirrors everything to stderr as well
    if dev {
        let subscriber = builder
            .with_writer(file_writer.and(std::io::stderr))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = builder.with_writer(file_writer).finish();
        tracing::subscriber::set_global_default(subscriber)?;
    }

    // Keep the writer thread alive for the whole run
    std::mem::forget(guard);

    Ok(())
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(address) = &args.address {
        config.mpd.host = address.clone();
    }
    if let Some(port) = args.port {
        config.mpd.port = port;
    }
    if !args.picker_cmd.is_empty() {
        config.picker.command = args.picker_cmd.join(" ");
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging(&config.log_directory(), args.dev)?;
    info!(
        "panmenu starting against {}:{} with picker '{}'",
        config.mpd.host, config.mpd.port, config.picker.command
    );

    let mut session = MpcSession::new(&config.mpd);
    session
        .check()
        .with_context(|| format!("Cannot reach mpd at {}:{}", config.mpd.host, config.mpd.port))?;
    let mut picker = ProcessPicker::new(&config.picker);

    let mut menu = Menu::new(&mut session, &mut picker, config.search.clone());
    if let Err(e) = menu.run() {
        error!("panmenu aborted: {}", e);
        return Err(e.into());
    }

    info!("panmenu exiting");
    Ok(())
}
