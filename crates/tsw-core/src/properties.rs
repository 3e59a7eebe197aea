// ── Property vocabularies ──
//
// Statistic names per group. Each enum's variant order is the order its
// statistics and controls are emitted in.

use strum::{EnumIter, EnumString, IntoStaticStr, VariantNames};

/// Ungrouped device identity statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum GeneralProperty {
    BuildDate,
    FirmwareVersion,
    Name,
    #[strum(serialize = "ProductID")]
    ProductId,
    #[strum(serialize = "PUFVersion")]
    PufVersion,
    SerialNumber,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum CapabilitiesProperty {
    ConfigFileUploadSupported,
    LogFileUploadSupported,
    #[strum(serialize = "PortDMInputCount")]
    PortDmInputCount,
    PortEthernetAdapterCount,
    #[strum(serialize = "PortHDMIInputCount")]
    PortHdmiInputCount,
    #[strum(serialize = "PortHDMIOutputCount")]
    PortHdmiOutputCount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum NetworkProperty {
    #[strum(serialize = "DNSServers")]
    DnsServers,
    Hostname,
    #[strum(serialize = "IPv6Enabled")]
    Ipv6Enabled,
    #[strum(serialize = "LANDefaultGateway")]
    LanDefaultGateway,
    #[strum(serialize = "LANDHCPEnabled")]
    LanDhcpEnabled,
    #[strum(serialize = "LANDomainName")]
    LanDomainName,
    #[strum(serialize = "LANIPAddress")]
    LanIpAddress,
    #[strum(serialize = "LANLinkActive")]
    LanLinkActive,
    #[strum(serialize = "LANSubnetMask")]
    LanSubnetMask,
    #[strum(serialize = "WiFiDomainName")]
    WifiDomainName,
    #[strum(serialize = "WiFiLinkActive")]
    WifiLinkActive,
    #[strum(serialize = "WiFiMACAddress")]
    WifiMacAddress,
}

/// Adapter self-description, always reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, IntoStaticStr)]
pub enum MetadataProperty {
    AdapterBuildDate,
    AdapterUptime,
    #[strum(serialize = "AdapterUptime(min)")]
    AdapterUptimeMinutes,
    AdapterVersion,
    ActivePropertyGroups,
}

/// Display, LCD, audio and button-toolbar state. The only controllable group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr)]
#[strum(ascii_case_insensitive)]
pub enum DisplayProperty {
    Status,
    LocalSetupSequence,
    #[strum(serialize = "LCDAutoBrightness")]
    LcdAutoBrightness,
    #[strum(serialize = "LCDALSThreshold(%)")]
    LcdAlsThreshold,
    #[strum(serialize = "LCDALSThresholdCurrentValue(%)")]
    LcdAlsThresholdCurrent,
    #[strum(serialize = "LCDBrightness(%)")]
    LcdBrightness,
    #[strum(serialize = "LCDBrightnessCurrentValue(%)")]
    LcdBrightnessCurrent,
    #[strum(serialize = "LCDBrightnessHighPreset(%)")]
    LcdBrightnessHighPreset,
    #[strum(serialize = "LCDBrightnessHighPresetCurrentValue(%)")]
    LcdBrightnessHighPresetCurrent,
    #[strum(serialize = "LCDBrightnessLowPreset(%)")]
    LcdBrightnessLowPreset,
    #[strum(serialize = "LCDBrightnessLowPresetCurrentValue(%)")]
    LcdBrightnessLowPresetCurrent,
    #[strum(serialize = "LCDStandbyTimeout(min)")]
    LcdStandbyTimeout,
    #[strum(serialize = "LCDStandbyTimeoutCurrentValue(min)")]
    LcdStandbyTimeoutCurrent,
    AudioPanelMute,
    #[strum(serialize = "AudioPanelVolume(%)")]
    AudioPanelVolume,
    #[strum(serialize = "AudioPanelVolumeCurrentValue(%)")]
    AudioPanelVolumeCurrent,
    AudioMediaMute,
    #[strum(serialize = "AudioMediaVolume(%)")]
    AudioMediaVolume,
    #[strum(serialize = "AudioMediaVolumeCurrentValue(%)")]
    AudioMediaVolumeCurrent,
    AudioBeepEnabled,
    #[strum(serialize = "AudioBeepVolume(%)")]
    AudioBeepVolume,
    #[strum(serialize = "AudioBeepVolumeCurrentValue(%)")]
    AudioBeepVolumeCurrent,
    ButtonToolbarShowOnWake,
    ButtonToolbarShowDuringStandby,
    ButtonToolbarDisplayEdge,
    #[strum(serialize = "ButtonToolbarAutoHideTimeout(s)")]
    ButtonToolbarAutoHideTimeout,
    #[strum(serialize = "ButtonToolbarAutoHideTimeoutCurrentValue(s)")]
    ButtonToolbarAutoHideTimeoutCurrent,
}

/// Which on-screen edge the button toolbar docks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, EnumString, IntoStaticStr, VariantNames)]
#[strum(ascii_case_insensitive)]
pub enum DisplayEdge {
    Top,
    Bottom,
    Left,
    Right,
}

/// How a controllable display property is driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlShape {
    /// Boolean toggle, `"1"` means on.
    Switch,
    /// Integer slider from 0 to `range_end`.
    Slider { range_end: u32 },
    /// One of [`DisplayEdge`]'s names.
    DisplayEdge,
}

macro_rules! impl_name {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $ty {
                /// Statistic name as reported to consumers.
                pub fn name(self) -> &'static str {
                    self.into()
                }
            }
        )+
    };
}

impl_name!(
    GeneralProperty,
    CapabilitiesProperty,
    NetworkProperty,
    MetadataProperty,
    DisplayProperty,
    DisplayEdge,
);

impl DisplayProperty {
    /// How the property is controlled, or `None` if it is read-only.
    pub fn control(self) -> Option<ControlShape> {
        use ControlShape::{Slider, Switch};

        match self {
            Self::LocalSetupSequence
            | Self::LcdAutoBrightness
            | Self::AudioPanelMute
            | Self::AudioMediaMute
            | Self::AudioBeepEnabled
            | Self::ButtonToolbarShowOnWake
            | Self::ButtonToolbarShowDuringStandby => Some(Switch),
            Self::LcdAlsThreshold
            | Self::LcdBrightness
            | Self::LcdBrightnessHighPreset
            | Self::LcdBrightnessLowPreset
            | Self::AudioPanelVolume
            | Self::AudioMediaVolume
            | Self::AudioBeepVolume => Some(Slider { range_end: 100 }),
            Self::LcdStandbyTimeout => Some(Slider { range_end: 120 }),
            Self::ButtonToolbarAutoHideTimeout => Some(Slider { range_end: 600 }),
            Self::ButtonToolbarDisplayEdge => Some(ControlShape::DisplayEdge),
            Self::Status
            | Self::LcdAlsThresholdCurrent
            | Self::LcdBrightnessCurrent
            | Self::LcdBrightnessHighPresetCurrent
            | Self::LcdBrightnessLowPresetCurrent
            | Self::LcdStandbyTimeoutCurrent
            | Self::AudioPanelVolumeCurrent
            | Self::AudioMediaVolumeCurrent
            | Self::AudioBeepVolumeCurrent
            | Self::ButtonToolbarAutoHideTimeoutCurrent => None,
        }
    }

    pub fn is_read_only(self) -> bool {
        self.control().is_none()
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::str::FromStr;

    use strum::{IntoEnumIterator, VariantNames};

    use super::{ControlShape, DisplayEdge, DisplayProperty, NetworkProperty};

    #[test]
    fn names_match_reported_keys() {
        assert_eq!(DisplayProperty::LcdAlsThreshold.name(), "LCDALSThreshold(%)");
        assert_eq!(NetworkProperty::WifiMacAddress.name(), "WiFiMACAddress");
        assert_eq!(DisplayEdge::VARIANTS, &["Top", "Bottom", "Left", "Right"]);
    }

    #[test]
    fn display_properties_resolve_case_insensitively() {
        assert_eq!(
            DisplayProperty::from_str("audiopanelmute").unwrap(),
            DisplayProperty::AudioPanelMute
        );
        assert_eq!(
            DisplayProperty::from_str("lcdstandbytimeout(MIN)").unwrap(),
            DisplayProperty::LcdStandbyTimeout
        );
        assert!(DisplayProperty::from_str("Hostname").is_err());
    }

    #[test]
    fn current_value_properties_are_read_only() {
        for property in DisplayProperty::iter() {
            if property.name().contains("CurrentValue") || property == DisplayProperty::Status {
                assert!(property.is_read_only(), "{property:?}");
            } else {
                assert!(!property.is_read_only(), "{property:?}");
            }
        }
        assert_eq!(
            DisplayProperty::LcdStandbyTimeout.control(),
            Some(ControlShape::Slider { range_end: 120 })
        );
    }
}
