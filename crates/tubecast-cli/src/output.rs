//! Output formatting for CLI

use tabled::{Table, Tabled};
use tubecast_core::{DeviceInfo, ResolvedPlaylist, VideoEntry};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Table,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Text,
        }
    }
}

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Model")]
    model: String,
    #[tabled(rename = "Address")]
    address: String,
    #[tabled(rename = "Port")]
    port: u16,
}

impl From<&DeviceInfo> for DeviceRow {
    fn from(device: &DeviceInfo) -> Self {
        Self {
            name: device.name.clone(),
            model: device.model.clone(),
            address: device.address.clone(),
            port: device.port,
        }
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
}

impl EntryRow {
    fn new(position: usize, entry: &VideoEntry) -> Self {
        Self {
            position,
            id: entry.id.clone(),
            title: entry.title.clone(),
        }
    }
}

/// Render discovered devices
pub fn render_devices(devices: &[DeviceInfo], format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(devices)?,
        OutputFormat::Table => Table::new(devices.iter().map(DeviceRow::from)).to_string(),
        OutputFormat::Text if devices.is_empty() => "No devices found".to_string(),
        OutputFormat::Text => devices
            .iter()
            .map(|d| {
                if d.model.is_empty() {
                    format!("{} - {}:{}", d.name, d.address, d.port)
                } else {
                    format!("{} - {} ({}:{})", d.name, d.model, d.address, d.port)
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

/// Render a resolved playlist
pub fn render_playlist(playlist: &ResolvedPlaylist, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string_pretty(playlist)?,
        OutputFormat::Table => {
            Table::new(playlist.iter().enumerate().map(|(i, e)| EntryRow::new(i + 1, e))).to_string()
        }
        OutputFormat::Text => playlist
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{:>3}. {}", i + 1, e))
            .collect::<Vec<_>>()
            .join("\n"),
    };
    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn devices() -> Vec<DeviceInfo> {
        vec![
            DeviceInfo {
                name: "Kitchen".into(),
                model: "Chromecast Audio".into(),
                address: "192.168.1.21".into(),
                port: 8009,
            },
            DeviceInfo {
                name: "Living Room".into(),
                model: String::new(),
                address: "192.168.1.20".into(),
                port: 8009,
            },
        ]
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!(OutputFormat::from("JSON"), OutputFormat::Json);
        assert_eq!(OutputFormat::from("table"), OutputFormat::Table);
        assert_eq!(OutputFormat::from("anything"), OutputFormat::Text);
    }

    #[test]
    fn test_devices_as_text() {
        let text = render_devices(&devices(), OutputFormat::Text).unwrap();
        assert_eq!(
            text,
            "Kitchen - Chromecast Audio (192.168.1.21:8009)\nLiving Room - 192.168.1.20:8009"
        );
        assert_eq!(render_devices(&[], OutputFormat::Text).unwrap(), "No devices found");
    }

    #[test]
    fn test_devices_as_json() {
        let json = render_devices(&devices(), OutputFormat::Json).unwrap();
        let parsed: Vec<DeviceInfo> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, devices());
    }

    #[test]
    fn test_devices_as_table() {
        let table = render_devices(&devices(), OutputFormat::Table).unwrap();
        assert!(table.contains("Address"));
        assert!(table.contains("Living Room"));
    }

    #[test]
    fn test_playlist_as_text() {
        let playlist = ResolvedPlaylist::new(vec![VideoEntry::new("a", "First"), VideoEntry::new("b", "Second")]);
        let text = render_playlist(&playlist, OutputFormat::Text).unwrap();
        assert_eq!(text, "  1. First [a]\n  2. Second [b]");
    }
}
