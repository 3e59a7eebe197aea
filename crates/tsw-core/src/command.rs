// ── Command translation ──
//
// Turns a `Group#Property` control command into the minimal display
// partial-update body the panel accepts on `POST /Device/Display`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tsw_api::models::{
    Audio, AutoBrightness, BrightnessPresets, DeviceDisplay, DisplayUpdate, Lcd, VirtualButtons,
};

use crate::error::CoreError;
use crate::groups::PropertyGroup;
use crate::properties::{ControlShape, DisplayEdge, DisplayProperty};

/// A control value as delivered by the host: text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ControlValue {
    Number(f64),
    Text(String),
}

impl ControlValue {
    /// Switch semantics: only `"1"` (or the number 1) turns a switch on.
    pub fn is_on(&self) -> bool {
        match self {
            Self::Text(text) => text.trim() == "1",
            Self::Number(n) => (n - 1.0).abs() < f64::EPSILON,
        }
    }

    /// Slider semantics: parsed as a float, fractional part truncated.
    #[allow(clippy::cast_possible_truncation)]
    pub fn as_level(&self) -> Option<i64> {
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(text) => text.trim().parse::<f64>().ok()?,
        };
        value.is_finite().then(|| value.trunc() as i64)
    }
}

impl fmt::Display for ControlValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(text) => f.write_str(text),
        }
    }
}

impl From<&str> for ControlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<f64> for ControlValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// A single inbound control command.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Command {
    /// `Group#Property`, e.g. `Display#AudioPanelMute`.
    pub name: String,
    pub value: ControlValue,
}

impl Command {
    pub fn new(name: impl Into<String>, value: impl Into<ControlValue>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Resolve a command name to a writable display property.
pub fn resolve(name: &str) -> Result<DisplayProperty, CoreError> {
    let (group, property) = name
        .split_once('#')
        .ok_or_else(|| CoreError::validation(format!("Unsupported control property: {name}")))?;

    if group != PropertyGroup::Display.name() {
        return Err(CoreError::validation(format!(
            "Property group {group} is not controllable"
        )));
    }

    let property = DisplayProperty::from_str(property)
        .map_err(|_| CoreError::validation(format!("Unsupported control property: {name}")))?;
    if property.is_read_only() {
        return Err(CoreError::validation(format!("{name} is read-only")));
    }
    Ok(property)
}

/// Build the partial-update body for `name = value`.
pub fn translate(name: &str, value: &ControlValue) -> Result<DisplayUpdate, CoreError> {
    let property = resolve(name)?;

    let display = match property.control() {
        Some(ControlShape::Switch) => switch_update(property, value.is_on()),
        Some(ControlShape::Slider { .. }) => {
            let level = value.as_level().ok_or_else(|| {
                CoreError::validation(format!("{name} expects a number, got {value}"))
            })?;
            slider_update(property, level)
        }
        Some(ControlShape::DisplayEdge) => {
            let text = value.to_string();
            let edge = DisplayEdge::from_str(text.trim()).map_err(|_| {
                CoreError::validation(format!("Unsupported display edge: {text}"))
            })?;
            toolbar(VirtualButtons {
                display_edge: Some(edge.name().to_owned()),
                ..VirtualButtons::default()
            })
        }
        None => None,
    };

    display
        .map(DisplayUpdate::from)
        .ok_or_else(|| CoreError::validation(format!("{name} is read-only")))
}

fn switch_update(property: DisplayProperty, on: bool) -> Option<DeviceDisplay> {
    let value = Some(on);
    match property {
        DisplayProperty::LocalSetupSequence => Some(DeviceDisplay {
            is_local_setup_access_enabled: value,
            ..DeviceDisplay::default()
        }),
        DisplayProperty::LcdAutoBrightness => auto_brightness(AutoBrightness {
            is_enabled: value,
            ..AutoBrightness::default()
        }),
        DisplayProperty::AudioPanelMute => audio(Audio {
            is_muted: value,
            ..Audio::default()
        }),
        DisplayProperty::AudioMediaMute => audio(Audio {
            is_media_muted: value,
            ..Audio::default()
        }),
        DisplayProperty::AudioBeepEnabled => audio(Audio {
            is_beep_enabled: value,
            ..Audio::default()
        }),
        DisplayProperty::ButtonToolbarShowOnWake => toolbar(VirtualButtons {
            is_show_on_wake_enabled: value,
            ..VirtualButtons::default()
        }),
        DisplayProperty::ButtonToolbarShowDuringStandby => toolbar(VirtualButtons {
            is_show_during_standby_enabled: value,
            ..VirtualButtons::default()
        }),
        _ => None,
    }
}

fn slider_update(property: DisplayProperty, level: i64) -> Option<DeviceDisplay> {
    let value = Some(level);
    match property {
        DisplayProperty::LcdAlsThreshold => auto_brightness(AutoBrightness {
            threshold_value: value,
            ..AutoBrightness::default()
        }),
        DisplayProperty::LcdBrightness => lcd(Lcd {
            brightness: value,
            ..Lcd::default()
        }),
        DisplayProperty::LcdBrightnessHighPreset => presets(BrightnessPresets {
            high_level: value,
            ..BrightnessPresets::default()
        }),
        DisplayProperty::LcdBrightnessLowPreset => presets(BrightnessPresets {
            low_level: value,
            ..BrightnessPresets::default()
        }),
        DisplayProperty::LcdStandbyTimeout => lcd(Lcd {
            standby_timeout_minutes: value,
            ..Lcd::default()
        }),
        DisplayProperty::AudioPanelVolume => audio(Audio {
            volume: value,
            ..Audio::default()
        }),
        DisplayProperty::AudioMediaVolume => audio(Audio {
            media_volume: value,
            ..Audio::default()
        }),
        DisplayProperty::AudioBeepVolume => audio(Audio {
            beep_volume: value,
            ..Audio::default()
        }),
        DisplayProperty::ButtonToolbarAutoHideTimeout => toolbar(VirtualButtons {
            auto_hide_time_out_seconds: value,
            ..VirtualButtons::default()
        }),
        _ => None,
    }
}

// Wrappers placing a single populated section into an otherwise empty body.

#[allow(clippy::unnecessary_wraps)]
fn audio(audio: Audio) -> Option<DeviceDisplay> {
    Some(DeviceDisplay {
        audio: Some(audio),
        ..DeviceDisplay::default()
    })
}

#[allow(clippy::unnecessary_wraps)]
fn lcd(lcd: Lcd) -> Option<DeviceDisplay> {
    Some(DeviceDisplay {
        lcd: Some(lcd),
        ..DeviceDisplay::default()
    })
}

fn auto_brightness(auto: AutoBrightness) -> Option<DeviceDisplay> {
    lcd(Lcd {
        auto_brightness: Some(auto),
        ..Lcd::default()
    })
}

fn presets(presets: BrightnessPresets) -> Option<DeviceDisplay> {
    lcd(Lcd {
        presets: Some(presets),
        ..Lcd::default()
    })
}

#[allow(clippy::unnecessary_wraps)]
fn toolbar(buttons: VirtualButtons) -> Option<DeviceDisplay> {
    Some(DeviceDisplay {
        virtual_buttons: Some(buttons),
        ..DeviceDisplay::default()
    })
}
