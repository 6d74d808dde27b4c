//! Cast device discovery over mDNS

use crate::{config::{DiscoveryConfig, MAX_DISCOVERY_WINDOW_MS}, types::DeviceInfo, Error, Result};
use mdns_sd::{ServiceDaemon, ServiceEvent};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument};

const DISCOVERY_POLL: Duration = Duration::from_millis(250);

fn instance_name_from_fullname(fullname: &str, service_type: &str) -> String {
    fullname
        .trim()
        .strip_suffix(service_type)
        .map(|name| name.trim_end_matches('.').trim())
        .filter(|name| !name.is_empty())
        .unwrap_or(fullname)
        .trim_matches('.')
        .to_string()
}

fn non_empty_property(service: &mdns_sd::ResolvedService, key: &str) -> Option<String> {
    service
        .get_property_val_str(key)
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToString::to_string)
}

fn device_from_resolved_service(service: &mdns_sd::ResolvedService, service_type: &str) -> Option<DeviceInfo> {
    let mut v4_addresses: Vec<_> = service.get_addresses_v4().iter().copied().collect();
    v4_addresses.sort();
    let address = v4_addresses.first().map(ToString::to_string)?;

    let name = non_empty_property(service, "fn")
        .unwrap_or_else(|| instance_name_from_fullname(service.get_fullname(), service_type));
    let model = non_empty_property(service, "md").unwrap_or_default();

    Some(DeviceInfo {
        name,
        model,
        address,
        port: service.get_port(),
    })
}

fn browse_deadline(start: Instant, config: &DiscoveryConfig) -> Result<Instant> {
    let too_long = || Error::InvalidConfig(format!("discovery window of {} ms is too long", config.window_ms));
    if config.window_ms > MAX_DISCOVERY_WINDOW_MS {
        return Err(too_long());
    }
    start.checked_add(config.window()).ok_or_else(too_long)
}

fn browse_blocking(config: &DiscoveryConfig) -> Result<Vec<DeviceInfo>> {
    let deadline = browse_deadline(Instant::now(), config)?;
    let mdns = ServiceDaemon::new().map_err(|e| Error::Discovery(e.to_string()))?;
    let receiver = match mdns.browse(&config.service_type) {
        Ok(receiver) => receiver,
        Err(e) => {
            let _ = mdns.shutdown();
            return Err(Error::Discovery(e.to_string()));
        }
    };

    let mut by_address: HashMap<String, DeviceInfo> = HashMap::new();
    while Instant::now() < deadline {
        let timeout = deadline.saturating_duration_since(Instant::now()).min(DISCOVERY_POLL);
        let Ok(event) = receiver.recv_timeout(timeout) else {
            continue;
        };
        if let ServiceEvent::ServiceResolved(service) = event {
            if let Some(device) = device_from_resolved_service(&service, &config.service_type) {
                debug!(device = %device, "Device resolved");
                by_address.insert(device.address.clone(), device);
            }
        }
    }

    if let Err(e) = mdns.stop_browse(&config.service_type) {
        debug!("Failed to stop mDNS browse cleanly: {}", e);
    }
    let _ = mdns.shutdown();

    let mut devices: Vec<DeviceInfo> = by_address.into_values().collect();
    sort_devices(&mut devices);
    Ok(devices)
}

/// Sort by case-insensitive name, then address
pub fn sort_devices(devices: &mut [DeviceInfo]) {
    devices.sort_by(|a, b| {
        a.name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.address.cmp(&b.address))
    });
}

/// Pick a device by friendly name (case-insensitive) or exact address
pub fn select_device(devices: &[DeviceInfo], wanted: &str) -> Option<DeviceInfo> {
    let wanted = wanted.trim();
    devices
        .iter()
        .find(|d| d.name.eq_ignore_ascii_case(wanted) || d.address == wanted)
        .cloned()
}

/// Browse the network for cast devices during the configured window
#[instrument(skip(config), fields(service = %config.service_type))]
pub async fn discover_devices(config: &DiscoveryConfig) -> Result<Vec<DeviceInfo>> {
    let config = config.clone();
    let devices = tokio::task::spawn_blocking(move || browse_blocking(&config))
        .await
        .map_err(|e| Error::Internal(format!("discovery task failed: {}", e)))??;
    info!(devices = devices.len(), "Discovery finished");
    Ok(devices)
}

/// Discover and return the device called `name`
pub async fn find_device(config: &DiscoveryConfig, name: &str) -> Result<DeviceInfo> {
    info!(device = name, "Creating controller");
    let devices = discover_devices(config).await?;
    select_device(&devices, name).ok_or_else(|| Error::DeviceNotFound(name.to_string()))
}
