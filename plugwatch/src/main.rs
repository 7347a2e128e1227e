mod config;
mod tasks;

use anyhow::Context;
use clap::Parser;
use config::{Config, DeviceConfig};
use plugwatch::{client::HttpClient, device::PlugDevice};
use std::{
	fs::File,
	path::{Path, PathBuf},
	sync::Arc,
};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
pub struct Arguments {
	#[clap(env = "PLUGWATCH_CONFIG_PATH")]
	config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let arguments = Arguments::parse();
	let (shutdown_tx, shutdown_rx) = watch::channel(false);

	// Read the configuration file
	let config = load_config(arguments.config)?;

	let devices = config
		.devices
		.iter()
		.map(create_device)
		.collect::<anyhow::Result<Vec<_>>>()?;

	let poll_task = tokio::spawn(tasks::poll::poll_task(
		devices,
		config.interval(),
		shutdown_rx,
	));

	tokio::signal::ctrl_c().await?;
	tracing::debug!("received ctrl-c, closing");
	shutdown_tx.send(true)?;

	poll_task.await??;

	Ok(())
}

fn create_device(config: &DeviceConfig) -> anyhow::Result<PlugDevice<HttpClient>> {
	let client = HttpClient::new(
		config.host.clone(),
		config.token.as_deref(),
		config.timeout(),
	)
	.with_context(|| format!("creating client for device '{}'", config.name))?;

	let mut device = PlugDevice::new(&config.name, Arc::new(client));
	if config.energy_monitoring {
		device = device.with_energy_monitoring();
	}
	for child_id in &config.sockets {
		device = device.with_socket(child_id);
	}

	tracing::debug!(
		"configured device '{}' with {} sockets",
		config.name,
		config.sockets.len()
	);
	Ok(device)
}

fn load_config<T: AsRef<Path>>(path: T) -> anyhow::Result<Config> {
	let path = path.as_ref();
	let config_file =
		File::open(path).with_context(|| format!("opening config file {}", path.display()))?;
	let config = match path.extension().and_then(|s| s.to_str()) {
		Some("yaml") | Some("yml") => serde_yaml::from_reader(config_file)?,
		Some("json") => serde_json::from_reader(config_file)?,
		None | Some(_) => anyhow::bail!("unknown config file extension: {}", path.display()),
	};
	Ok(config)
}
