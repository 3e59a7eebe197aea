// Typed device payloads
//
// Mirrors the panel's PascalCase JSON. Every field is optional: panels of
// different generations omit whole sub-trees, and partial-update bodies are
// built from the same types with `None` fields skipped on serialization.

use serde::{Deserialize, Serialize};

// ── General ──────────────────────────────────────────────────────────

/// `/Device/DeviceInfo`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceInfo {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub puf_version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

// ── Capabilities ─────────────────────────────────────────────────────

/// `/Device/DeviceCapabilities`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceCapabilities {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_config_file_upload_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_log_file_upload_supported: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port_config: Option<PortConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PortConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_dm_inputs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_ethernet_adapters: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_hdmi_inputs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub number_of_hdmi_outputs: Option<i64>,
}

// ── System versions ──────────────────────────────────────────────────

/// One entry of `/Device/SystemVersions/Components`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SystemVersion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

// ── Network ──────────────────────────────────────────────────────────

/// `/Device/NetworkAdapters`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct NetworkAdapters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adapters: Option<Adapters>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_settings: Option<DnsSettings>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_name: Option<String>,
    #[serde(rename = "IPv6", skip_serializing_if = "Option::is_none")]
    pub ipv6: Option<Ipv6Support>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Adapters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ethernet_lan: Option<LanAdapter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wifi: Option<WifiAdapter>,
}

/// Wired adapter: the common link fields plus IPv4 configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LanAdapter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(rename = "IPv4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<Ipv4Config>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct WifiAdapter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link_status: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv4Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub addresses: Option<Vec<AddressConfig>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_gateway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_dhcp_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub static_dns: Option<Vec<String>>,
}

impl Ipv4Config {
    /// The first configured address, which the panel treats as primary.
    pub fn primary_address(&self) -> Option<&AddressConfig> {
        self.addresses.as_ref().and_then(|list| list.first())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AddressConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subnet_mask: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsSettings {
    #[serde(rename = "IPv4", skip_serializing_if = "Option::is_none")]
    pub ipv4: Option<DnsServers>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DnsServers {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_servers: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Ipv6Support {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_supported: Option<bool>,
}

// ── Display ──────────────────────────────────────────────────────────

/// `/Device/Display`. Also the body of display partial updates.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct DeviceDisplay {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio: Option<Audio>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_local_setup_access_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lcd: Option<Lcd>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub virtual_buttons: Option<VirtualButtons>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Audio {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beep_volume: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_beep_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_media_muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_muted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_volume: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub volume: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Lcd {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_brightness: Option<AutoBrightness>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub presets: Option<BrightnessPresets>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub standby_timeout_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AutoBrightness {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold_value: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct BrightnessPresets {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high_level: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub low_level: Option<i64>,
}

/// On-screen button toolbar settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct VirtualButtons {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_hide_time_out_seconds: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_edge: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_show_during_standby_enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_show_on_wake_enabled: Option<bool>,
}

/// Wrapper for display partial updates: `{"Device":{"Display":{...}}}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayUpdate {
    pub device: DisplayUpdateBody,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DisplayUpdateBody {
    pub display: DeviceDisplay,
}

impl From<DeviceDisplay> for DisplayUpdate {
    fn from(display: DeviceDisplay) -> Self {
        Self {
            device: DisplayUpdateBody { display },
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn display_parses_nested_pascal_case() {
        let display: DeviceDisplay = serde_json::from_value(json!({
            "Audio": { "IsMuted": true, "Volume": 40 },
            "CurrentState": "Awake",
            "Lcd": {
                "AutoBrightness": { "IsEnabled": false, "ThresholdValue": 20 },
                "Presets": { "HighLevel": 90, "LowLevel": 10 }
            },
            "VirtualButtons": { "DisplayEdge": "Left" },
            "UnknownField": 1
        }))
        .unwrap();

        let audio = display.audio.unwrap();
        assert_eq!(audio.is_muted, Some(true));
        assert_eq!(audio.volume, Some(40));
        assert_eq!(audio.beep_volume, None);
        let lcd = display.lcd.unwrap();
        assert_eq!(lcd.presets.unwrap().high_level, Some(90));
        assert_eq!(
            display.virtual_buttons.unwrap().display_edge.as_deref(),
            Some("Left")
        );
    }

    #[test]
    fn network_uses_ip_version_field_names() {
        let network: NetworkAdapters = serde_json::from_value(json!({
            "Adapters": {
                "EthernetLan": {
                    "LinkStatus": true,
                    "IPv4": {
                        "Addresses": [{ "Address": "10.0.0.5", "SubnetMask": "255.255.255.0" }],
                        "IsDhcpEnabled": true
                    }
                }
            },
            "DnsSettings": { "IPv4": { "DnsServers": ["1.1.1.1", "8.8.8.8"] } },
            "HostName": "TSW-1070",
            "IPv6": { "IsSupported": false }
        }))
        .unwrap();

        let lan = network.adapters.unwrap().ethernet_lan.unwrap();
        let ipv4 = lan.ipv4.unwrap();
        assert_eq!(
            ipv4.primary_address().unwrap().address.as_deref(),
            Some("10.0.0.5")
        );
        assert_eq!(network.ipv6.unwrap().is_supported, Some(false));
        assert_eq!(
            network.dns_settings.unwrap().ipv4.unwrap().dns_servers.unwrap().len(),
            2
        );
    }

    #[test]
    fn partial_update_serializes_only_set_fields() {
        let update = DisplayUpdate::from(DeviceDisplay {
            audio: Some(Audio {
                is_muted: Some(true),
                ..Audio::default()
            }),
            ..DeviceDisplay::default()
        });

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "Device": { "Display": { "Audio": { "IsMuted": true } } } })
        );
    }
}
