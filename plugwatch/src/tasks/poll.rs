use plugwatch::{
	client::TapoClient,
	components::TelemetryRefresher,
	device::PlugDevice,
};
use std::time::Duration;
use tokio::{
	sync::watch,
	time::{interval, MissedTickBehavior},
};

/// Updates every device once per `period` until shutdown is signalled.
pub async fn poll_task<C: TapoClient>(
	mut devices: Vec<PlugDevice<C>>,
	period: Duration,
	mut shutdown: watch::Receiver<bool>,
) -> anyhow::Result<()> {
	tracing::info!(
		"polling {} devices every {}s",
		devices.len(),
		period.as_secs()
	);

	let mut ticker = interval(period);
	ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

	loop {
		tokio::select! {
			_ = ticker.tick() => {
				for device in devices.iter_mut() {
					device.update().await;
					report(device);
				}
			}
			_ = shutdown.changed() => {
				tracing::debug!("shutdown signalled, stopping poll task");
				break
			}
		}
	}

	Ok(())
}

fn report<C: TapoClient>(device: &PlugDevice<C>) {
	if let Some(energy) = device.energy() {
		report_outlet(device.name(), energy);
	}
	for (_, socket) in device.sockets() {
		report_outlet(device.name(), socket);
	}
}

fn report_outlet<C: TapoClient>(device: &str, outlet: &TelemetryRefresher<C>) {
	let addressing = outlet.addressing();
	match (outlet.energy_info(), outlet.power_info()) {
		(None, None) => {
			tracing::warn!("no energy telemetry available for '{device}' {addressing}");
		}
		(energy, power) => {
			tracing::info!(
				device,
				outlet = %addressing,
				power_w = power.map(|p| p.current_power),
				energy_power_w = energy.and_then(|e| e.current_power_watts()),
				today_wh = energy.map(|e| e.today_energy),
				month_wh = energy.map(|e| e.month_energy),
				today_runtime_min = energy.map(|e| e.today_runtime),
				"energy telemetry"
			);
		}
	}
}
