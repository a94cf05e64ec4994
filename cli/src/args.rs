use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use traffic_flow_core_rs::OrderGuard;

#[derive(Parser, Debug, Clone)]
#[command(
    author,
    version,
    about = "Run the single-lane traffic simulation headless",
    long_about = None
)]
pub struct CommandLineArgs {
    /// JSON simulation config; defaults are used for anything missing
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Number of ticks to run
    #[arg(long, short, default_value_t = 3600)]
    pub ticks: u64,

    /// Timestep per tick in seconds
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f64,

    /// Override the RNG seed from the config file
    #[arg(long)]
    pub seed: Option<u64>,

    /// Override a parameter, e.g. `--set spawn_probability=0.9`
    #[arg(long = "set", value_parser = parse_key_val)]
    pub overrides: Vec<(String, f64)>,

    /// Override the fleet order guard
    #[arg(long, value_enum)]
    pub order_guard: Option<GuardArg>,

    /// Log filter directive (e.g. `info`, `traffic_flow_core_rs=debug`)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardArg {
    Off,
    Clamp,
}

impl From<GuardArg> for OrderGuard {
    fn from(arg: GuardArg) -> Self {
        match arg {
            GuardArg::Off => OrderGuard::Off,
            GuardArg::Clamp => OrderGuard::Clamp,
        }
    }
}

fn parse_key_val(s: &str) -> Result<(String, f64), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    let value = value
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid value for `{}`: {}", key, e))?;
    Ok((key.trim().to_string(), value))
}
