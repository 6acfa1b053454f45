mod application;
mod args;
mod world;

use anyhow::{Context, Result};
use clap::Parser;
use winit::dpi::LogicalSize;

use afterglow_engine::device::GpuInit;
use afterglow_engine::logging::{init_logging, LoggingConfig};
use afterglow_engine::window::{Runtime, RuntimeConfig};

use crate::application::Application;
use crate::args::LaunchArgs;

fn main() -> Result<()> {
    let args = LaunchArgs::parse();

    init_logging(LoggingConfig {
        env_filter: args.log.clone(),
        default_filter: "warn,afterglow=info,afterglow_engine=info".to_string(),
        ..LoggingConfig::default()
    });

    let config = args.config();
    log::info!("launch config: {config:?}");

    let runtime = RuntimeConfig {
        initial_size: LogicalSize::new(args.width, args.height),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), Application::new(config))
        .context("afterglow runtime failed")
}
