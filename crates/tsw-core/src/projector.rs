// ── Statistics / control projector ──
//
// Flattens the device snapshot into the `Group#Property → String` map and
// the list of controllable display properties.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Serialize;
use strum::{IntoEnumIterator, VariantNames};

use tsw_api::models::{
    Audio, AutoBrightness, BrightnessPresets, DeviceCapabilities, DeviceDisplay, DeviceInfo, Lcd,
    NetworkAdapters, PortConfig, SystemVersion, VirtualButtons,
};

use crate::command::ControlValue;
use crate::format::{
    component_prefix, flag, key, number, on_off, or_na, text, uptime, uptime_minutes, verbatim,
    yes_no,
};
use crate::groups::{GroupSelection, PropertyGroup};
use crate::properties::{
    CapabilitiesProperty, ControlShape, DisplayEdge, DisplayProperty, GeneralProperty,
    MetadataProperty, NetworkProperty,
};

/// Statistics keyed by `Group#Property` (bare property for General).
pub type Statistics = BTreeMap<String, String>;

/// Last-known device state, one slot per endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceSnapshot {
    pub device_info: Option<DeviceInfo>,
    pub capabilities: Option<DeviceCapabilities>,
    pub system_versions: Option<Vec<SystemVersion>>,
    pub network: Option<NetworkAdapters>,
    pub display: Option<DeviceDisplay>,
}

/// Adapter facts reported under `AdapterMetadata`.
#[derive(Debug, Clone)]
pub struct AdapterMetadata {
    pub version: &'static str,
    pub build_date: Option<&'static str>,
    pub uptime: Duration,
    pub active_groups: String,
}

// ── Controllable properties ──────────────────────────────────────────

/// UI hint for a controllable property.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlKind {
    Switch,
    Slider {
        range_start: u32,
        range_end: u32,
    },
    Dropdown {
        options: &'static [&'static str],
    },
    /// Inert entry published when nothing is controllable.
    Text,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllableProperty {
    pub name: String,
    #[serde(flatten)]
    pub kind: ControlKind,
    pub value: Option<ControlValue>,
}

impl ControllableProperty {
    /// Inert entry, substituted so the published list is never empty.
    pub fn placeholder() -> Self {
        Self {
            name: String::new(),
            kind: ControlKind::Text,
            value: None,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.kind == ControlKind::Text && self.name.is_empty()
    }
}

// ── Statistics ───────────────────────────────────────────────────────

/// Project every enabled group plus adapter metadata.
pub fn statistics(
    snapshot: &DeviceSnapshot,
    groups: &GroupSelection,
    metadata: &AdapterMetadata,
) -> Statistics {
    let mut stats = Statistics::new();

    if groups.is_enabled(PropertyGroup::General) {
        general(&mut stats, snapshot.device_info.as_ref());
    }
    if groups.is_enabled(PropertyGroup::Capabilities) {
        capabilities(&mut stats, snapshot.capabilities.as_ref());
    }
    if groups.is_enabled(PropertyGroup::SystemVersions) {
        system_versions(&mut stats, snapshot.system_versions.as_deref());
    }
    if groups.is_enabled(PropertyGroup::Network) {
        network(&mut stats, snapshot.network.as_ref());
    }
    if groups.is_enabled(PropertyGroup::Display) {
        display(&mut stats, snapshot.display.as_ref());
    }
    adapter_metadata(&mut stats, metadata);

    stats
}

fn general(stats: &mut Statistics, info: Option<&DeviceInfo>) {
    for property in GeneralProperty::iter() {
        let value = info.and_then(|info| match property {
            GeneralProperty::BuildDate => text(info.build_date.as_deref()),
            GeneralProperty::FirmwareVersion => text(info.device_version.as_deref()),
            GeneralProperty::Name => text(info.name.as_deref()),
            GeneralProperty::ProductId => text(info.model_id.as_deref()),
            GeneralProperty::PufVersion => text(info.puf_version.as_deref()),
            GeneralProperty::SerialNumber => text(info.serial_number.as_deref()),
        });
        stats.insert(key(None, property.name()), or_na(value));
    }
}

fn capabilities(stats: &mut Statistics, caps: Option<&DeviceCapabilities>) {
    let group = PropertyGroup::Capabilities.name();
    for property in CapabilitiesProperty::iter() {
        let value = caps.and_then(|caps| {
            let ports = caps.port_config.as_ref();
            let port = |f: fn(&PortConfig) -> Option<i64>| number(ports.and_then(f));
            match property {
                CapabilitiesProperty::ConfigFileUploadSupported => {
                    flag(caps.is_config_file_upload_supported)
                }
                CapabilitiesProperty::LogFileUploadSupported => {
                    flag(caps.is_log_file_upload_supported)
                }
                CapabilitiesProperty::PortDmInputCount => port(|p| p.number_of_dm_inputs),
                CapabilitiesProperty::PortEthernetAdapterCount => {
                    port(|p| p.number_of_ethernet_adapters)
                }
                CapabilitiesProperty::PortHdmiInputCount => port(|p| p.number_of_hdmi_inputs),
                CapabilitiesProperty::PortHdmiOutputCount => port(|p| p.number_of_hdmi_outputs),
            }
        });
        stats.insert(key(Some(group), property.name()), or_na(value));
    }
}

fn system_versions(stats: &mut Statistics, versions: Option<&[SystemVersion]>) {
    let group = PropertyGroup::SystemVersions.name();
    for component in versions.unwrap_or_default() {
        let prefix = component_prefix(component.name.as_deref().unwrap_or_default());
        stats.insert(
            key(Some(group), &format!("{prefix}Version")),
            or_na(text(component.version.as_deref())),
        );
    }
}

fn network(stats: &mut Statistics, adapters: Option<&NetworkAdapters>) {
    let group = PropertyGroup::Network.name();
    for property in NetworkProperty::iter() {
        let value = adapters.map_or_else(
            || match property {
                // Switch-style values fall back to their "off" word.
                NetworkProperty::Ipv6Enabled => Some(yes_no(None)),
                NetworkProperty::LanDhcpEnabled => Some(on_off(None)),
                _ => None,
            },
            |adapters| network_value(adapters, property),
        );
        stats.insert(key(Some(group), property.name()), or_na(value));
    }
}

fn network_value(adapters: &NetworkAdapters, property: NetworkProperty) -> Option<String> {
    let nics = adapters.adapters.as_ref();
    let lan = nics.and_then(|n| n.ethernet_lan.as_ref());
    let wifi = nics.and_then(|n| n.wifi.as_ref());
    let ipv4 = lan.and_then(|l| l.ipv4.as_ref());
    let primary = ipv4.and_then(|v4| v4.primary_address());

    match property {
        NetworkProperty::DnsServers => {
            let servers = adapters
                .dns_settings
                .as_ref()
                .and_then(|d| d.ipv4.as_ref())
                .and_then(|v4| v4.dns_servers.as_ref())
                .map(|list| list.join(","));
            text(servers.as_deref())
        }
        NetworkProperty::Hostname => text(adapters.host_name.as_deref()),
        NetworkProperty::Ipv6Enabled => Some(yes_no(
            adapters.ipv6.as_ref().and_then(|v6| v6.is_supported),
        )),
        NetworkProperty::LanDefaultGateway => {
            text(ipv4.and_then(|v4| v4.default_gateway.as_deref()))
        }
        NetworkProperty::LanDhcpEnabled => {
            Some(on_off(ipv4.and_then(|v4| v4.is_dhcp_enabled)))
        }
        NetworkProperty::LanDomainName => verbatim(lan.and_then(|l| l.domain_name.as_deref())),
        NetworkProperty::LanIpAddress => text(primary.and_then(|a| a.address.as_deref())),
        NetworkProperty::LanLinkActive => flag(lan.and_then(|l| l.link_status)),
        NetworkProperty::LanSubnetMask => text(primary.and_then(|a| a.subnet_mask.as_deref())),
        NetworkProperty::WifiDomainName => verbatim(wifi.and_then(|w| w.domain_name.as_deref())),
        NetworkProperty::WifiLinkActive => flag(wifi.and_then(|w| w.link_status)),
        NetworkProperty::WifiMacAddress => text(wifi.and_then(|w| w.mac_address.as_deref())),
    }
}

/// Borrowed view of the display's nested sections with empty defaults.
struct DisplayView<'a> {
    root: &'a DeviceDisplay,
    audio: &'a Audio,
    lcd: &'a Lcd,
    auto_brightness: &'a AutoBrightness,
    presets: &'a BrightnessPresets,
    toolbar: &'a VirtualButtons,
}

static EMPTY_AUDIO: Audio = Audio {
    beep_volume: None,
    is_beep_enabled: None,
    is_media_muted: None,
    is_muted: None,
    media_volume: None,
    volume: None,
};
static EMPTY_LCD: Lcd = Lcd {
    auto_brightness: None,
    brightness: None,
    presets: None,
    standby_timeout_minutes: None,
};
static EMPTY_AUTO_BRIGHTNESS: AutoBrightness = AutoBrightness {
    is_enabled: None,
    threshold_value: None,
};
static EMPTY_PRESETS: BrightnessPresets = BrightnessPresets {
    high_level: None,
    low_level: None,
};
static EMPTY_TOOLBAR: VirtualButtons = VirtualButtons {
    auto_hide_time_out_seconds: None,
    display_edge: None,
    is_show_during_standby_enabled: None,
    is_show_on_wake_enabled: None,
};

impl<'a> DisplayView<'a> {
    fn new(root: &'a DeviceDisplay) -> Self {
        let lcd = root.lcd.as_ref().unwrap_or(&EMPTY_LCD);
        Self {
            root,
            audio: root.audio.as_ref().unwrap_or(&EMPTY_AUDIO),
            lcd,
            auto_brightness: lcd.auto_brightness.as_ref().unwrap_or(&EMPTY_AUTO_BRIGHTNESS),
            presets: lcd.presets.as_ref().unwrap_or(&EMPTY_PRESETS),
            toolbar: root.virtual_buttons.as_ref().unwrap_or(&EMPTY_TOOLBAR),
        }
    }

    /// Conditional "current value" entries only exist in the matching mode.
    fn is_visible(&self, property: DisplayProperty) -> bool {
        match property {
            DisplayProperty::LcdAlsThresholdCurrent => self.auto_brightness.is_enabled == Some(true),
            DisplayProperty::LcdBrightnessCurrent => self.auto_brightness.is_enabled == Some(false),
            DisplayProperty::AudioPanelVolumeCurrent => self.audio.is_muted == Some(false),
            DisplayProperty::AudioMediaVolumeCurrent => self.audio.is_media_muted == Some(false),
            DisplayProperty::AudioBeepVolumeCurrent => self.audio.is_beep_enabled == Some(true),
            _ => true,
        }
    }

    fn value(&self, property: DisplayProperty) -> Option<String> {
        match property {
            DisplayProperty::Status => text(self.root.current_state.as_deref()),
            DisplayProperty::LocalSetupSequence => {
                Some(on_off(self.root.is_local_setup_access_enabled))
            }
            DisplayProperty::LcdAutoBrightness => Some(on_off(self.auto_brightness.is_enabled)),
            DisplayProperty::LcdAlsThreshold | DisplayProperty::LcdAlsThresholdCurrent => {
                number(self.auto_brightness.threshold_value)
            }
            DisplayProperty::LcdBrightness | DisplayProperty::LcdBrightnessCurrent => {
                number(self.lcd.brightness)
            }
            DisplayProperty::LcdBrightnessHighPreset
            | DisplayProperty::LcdBrightnessHighPresetCurrent => number(self.presets.high_level),
            DisplayProperty::LcdBrightnessLowPreset
            | DisplayProperty::LcdBrightnessLowPresetCurrent => number(self.presets.low_level),
            DisplayProperty::LcdStandbyTimeout | DisplayProperty::LcdStandbyTimeoutCurrent => {
                number(self.lcd.standby_timeout_minutes)
            }
            DisplayProperty::AudioPanelMute => Some(on_off(self.audio.is_muted)),
            DisplayProperty::AudioPanelVolume | DisplayProperty::AudioPanelVolumeCurrent => {
                number(self.audio.volume)
            }
            DisplayProperty::AudioMediaMute => Some(on_off(self.audio.is_media_muted)),
            DisplayProperty::AudioMediaVolume | DisplayProperty::AudioMediaVolumeCurrent => {
                number(self.audio.media_volume)
            }
            DisplayProperty::AudioBeepEnabled => Some(on_off(self.audio.is_beep_enabled)),
            DisplayProperty::AudioBeepVolume | DisplayProperty::AudioBeepVolumeCurrent => {
                number(self.audio.beep_volume)
            }
            DisplayProperty::ButtonToolbarShowOnWake => {
                Some(on_off(self.toolbar.is_show_on_wake_enabled))
            }
            DisplayProperty::ButtonToolbarShowDuringStandby => {
                Some(on_off(self.toolbar.is_show_during_standby_enabled))
            }
            DisplayProperty::ButtonToolbarDisplayEdge => {
                text(self.toolbar.display_edge.as_deref())
            }
            DisplayProperty::ButtonToolbarAutoHideTimeout
            | DisplayProperty::ButtonToolbarAutoHideTimeoutCurrent => {
                number(self.toolbar.auto_hide_time_out_seconds)
            }
        }
    }

    fn switch(&self, property: DisplayProperty) -> Option<bool> {
        match property {
            DisplayProperty::LocalSetupSequence => self.root.is_local_setup_access_enabled,
            DisplayProperty::LcdAutoBrightness => self.auto_brightness.is_enabled,
            DisplayProperty::AudioPanelMute => self.audio.is_muted,
            DisplayProperty::AudioMediaMute => self.audio.is_media_muted,
            DisplayProperty::AudioBeepEnabled => self.audio.is_beep_enabled,
            DisplayProperty::ButtonToolbarShowOnWake => self.toolbar.is_show_on_wake_enabled,
            DisplayProperty::ButtonToolbarShowDuringStandby => {
                self.toolbar.is_show_during_standby_enabled
            }
            _ => None,
        }
    }

    fn level(&self, property: DisplayProperty) -> Option<i64> {
        match property {
            DisplayProperty::LcdAlsThreshold => self.auto_brightness.threshold_value,
            DisplayProperty::LcdBrightness => self.lcd.brightness,
            DisplayProperty::LcdBrightnessHighPreset => self.presets.high_level,
            DisplayProperty::LcdBrightnessLowPreset => self.presets.low_level,
            DisplayProperty::LcdStandbyTimeout => self.lcd.standby_timeout_minutes,
            DisplayProperty::AudioPanelVolume => self.audio.volume,
            DisplayProperty::AudioMediaVolume => self.audio.media_volume,
            DisplayProperty::AudioBeepVolume => self.audio.beep_volume,
            DisplayProperty::ButtonToolbarAutoHideTimeout => self.toolbar.auto_hide_time_out_seconds,
            _ => None,
        }
    }

    /// Which controls are offered in the display's current mode.
    fn is_offered(&self, property: DisplayProperty) -> bool {
        let auto = self.auto_brightness.is_enabled == Some(true);
        match property {
            DisplayProperty::LcdAlsThreshold => auto,
            DisplayProperty::LcdBrightness => !auto,
            DisplayProperty::AudioPanelVolume => self.audio.is_muted == Some(false),
            DisplayProperty::AudioMediaVolume => self.audio.is_media_muted == Some(false),
            DisplayProperty::AudioBeepVolume => self.audio.is_beep_enabled == Some(true),
            _ => true,
        }
    }
}

fn display(stats: &mut Statistics, display: Option<&DeviceDisplay>) {
    let Some(display) = display else {
        return;
    };
    let view = DisplayView::new(display);
    let group = PropertyGroup::Display.name();

    for property in DisplayProperty::iter().filter(|p| view.is_visible(*p)) {
        stats.insert(key(Some(group), property.name()), or_na(view.value(property)));
    }
}

fn adapter_metadata(stats: &mut Statistics, metadata: &AdapterMetadata) {
    let group = PropertyGroup::AdapterMetadata.name();
    for property in MetadataProperty::iter() {
        let value = match property {
            MetadataProperty::AdapterBuildDate => text(metadata.build_date),
            MetadataProperty::AdapterUptime => Some(uptime(metadata.uptime)),
            MetadataProperty::AdapterUptimeMinutes => Some(uptime_minutes(metadata.uptime)),
            MetadataProperty::AdapterVersion => text(Some(metadata.version)),
            MetadataProperty::ActivePropertyGroups => verbatim(Some(&metadata.active_groups)),
        };
        stats.insert(key(Some(group), property.name()), or_na(value));
    }
}

// ── Controls ─────────────────────────────────────────────────────────

/// Controllable display properties in presentation order.
///
/// Never empty: an inert placeholder stands in when the display section is
/// unavailable.
pub fn controls(display: Option<&DeviceDisplay>) -> Vec<ControllableProperty> {
    let mut list = display.map_or_else(Vec::new, display_controls);
    if list.is_empty() {
        list.push(ControllableProperty::placeholder());
    }
    list
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn display_controls(display: &DeviceDisplay) -> Vec<ControllableProperty> {
    let view = DisplayView::new(display);
    let group = PropertyGroup::Display.name();

    DisplayProperty::iter()
        .filter(|p| view.is_offered(*p))
        .filter_map(|property| {
            let (kind, value) = match property.control()? {
                ControlShape::Switch => (
                    ControlKind::Switch,
                    Some(ControlValue::Number(if view.switch(property) == Some(true) {
                        1.0
                    } else {
                        0.0
                    })),
                ),
                ControlShape::Slider { range_end } => (
                    ControlKind::Slider {
                        range_start: 0,
                        range_end,
                    },
                    view.level(property).map(|v| ControlValue::Number(v as f64)),
                ),
                ControlShape::DisplayEdge => (
                    ControlKind::Dropdown {
                        options: DisplayEdge::VARIANTS,
                    },
                    view.toolbar.display_edge.clone().map(ControlValue::Text),
                ),
            };
            Some(ControllableProperty {
                name: key(Some(group), property.name()),
                kind,
                value,
            })
        })
        .collect()
}
