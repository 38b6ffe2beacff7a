// cli.rs - Command-line interface configuration
use std::path::PathBuf;

use clap::Parser;

use crate::config::PilotConfig;

pub const STORE_ENV_VAR: &str = "PILOT_STORE";
pub const DEFAULT_STORE_FILE: &str = "camera-pilot-state.json";

#[derive(Parser, Debug, Clone)]
#[command(name = "camera-pilot")]
#[command(about = "Mirror a flying viewport onto a scene camera", long_about = None)]
pub struct Cli {
    /// JSON config file with thresholds, undo label and store path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Durable state file (overrides PILOT_STORE and the config file)
    #[arg(long)]
    pub store: Option<PathBuf>,

    /// Number of viewport frames to simulate
    #[arg(long, default_value_t = 240)]
    pub frames: u64,

    /// Name of the camera to pilot when no session was restored
    #[arg(long, default_value = "Main Camera")]
    pub target: String,

    /// Destroy the piloted object on this frame
    #[arg(long = "destroy-at")]
    pub destroy_at: Option<u64>,

    /// Run as if a live simulation were playing (no dirty flags)
    #[arg(long, default_value = "false")]
    pub simulating: bool,

    /// Print a status line every N frames (0 disables)
    #[arg(long = "status-every", default_value_t = 60)]
    pub status_every: u64,

    /// Disable console output
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// `--store`, then `PILOT_STORE`, then the config file, then the default
    pub fn store_path(&self, config: &PilotConfig) -> PathBuf {
        let from_env = std::env::var_os(STORE_ENV_VAR).map(PathBuf::from);
        self.resolve_store_path(from_env, config)
    }

    fn resolve_store_path(&self, from_env: Option<PathBuf>, config: &PilotConfig) -> PathBuf {
        self.store
            .clone()
            .or(from_env)
            .or_else(|| config.store_path.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_FILE))
    }
}
