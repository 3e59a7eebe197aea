// ── Property group gating ──
//
// Which device-state sections are fetched and reported. The metadata group
// is always on; the rest follow the configured selection.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};
use tracing::{debug, warn};

/// Wildcard token that enables every group.
pub const ALL_GROUPS: &str = "All";

/// A named section of device state.
///
/// Declaration order is the fetch order of a poll cycle.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum PropertyGroup {
    General,
    Capabilities,
    SystemVersions,
    Network,
    Display,
    AdapterMetadata,
}

impl PropertyGroup {
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Groups a user can select. `AdapterMetadata` is implicit.
    pub fn selectable() -> impl Iterator<Item = Self> {
        Self::iter().filter(|g| *g != Self::AdapterMetadata)
    }
}

impl fmt::Display for PropertyGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of enabled property groups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupSelection {
    groups: BTreeSet<PropertyGroup>,
}

impl Default for GroupSelection {
    fn default() -> Self {
        Self {
            groups: BTreeSet::from([PropertyGroup::General]),
        }
    }
}

impl GroupSelection {
    /// Every selectable group.
    pub fn all() -> Self {
        Self {
            groups: PropertyGroup::selectable().collect(),
        }
    }

    /// Parse a comma-separated list of group names.
    ///
    /// Tokens are trimmed and matched case-insensitively; unknown tokens are
    /// dropped with a warning. `All` anywhere selects every group. Returns
    /// `None` when no valid token remains.
    pub fn parse(input: &str) -> Option<Self> {
        let mut groups = BTreeSet::new();

        for token in input.split(',').map(str::trim).filter(|t| !t.is_empty()) {
            if token.eq_ignore_ascii_case(ALL_GROUPS) {
                return Some(Self::all());
            }
            match PropertyGroup::from_str(token) {
                Ok(PropertyGroup::AdapterMetadata) => {
                    debug!("{token} is always enabled, ignoring");
                }
                Ok(group) => {
                    groups.insert(group);
                }
                Err(_) => warn!(token, "unknown property group, ignoring"),
            }
        }

        if groups.is_empty() {
            None
        } else {
            Some(Self { groups })
        }
    }

    /// Replace the selection from `input`, keeping the current one if
    /// `input` holds no valid group.
    pub fn update(&mut self, input: &str) {
        match Self::parse(input) {
            Some(parsed) => *self = parsed,
            None => warn!(
                input,
                keeping = %self,
                "no valid property group in selection, keeping previous"
            ),
        }
    }

    /// `true` if `group` should be fetched and reported.
    pub fn is_enabled(&self, group: PropertyGroup) -> bool {
        group == PropertyGroup::AdapterMetadata || self.groups.contains(&group)
    }

    /// The selected groups in fetch order (metadata excluded).
    pub fn iter(&self) -> impl Iterator<Item = PropertyGroup> + '_ {
        self.groups.iter().copied()
    }
}

impl fmt::Display for GroupSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.groups.iter().map(|g| g.name()).collect();
        f.write_str(&names.join(","))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use pretty_assertions::assert_eq;

    use super::{GroupSelection, PropertyGroup};

    #[test]
    fn default_is_general_only() {
        let selection = GroupSelection::default();
        assert!(selection.is_enabled(PropertyGroup::General));
        assert!(!selection.is_enabled(PropertyGroup::Display));
        assert!(selection.is_enabled(PropertyGroup::AdapterMetadata));
    }

    #[test]
    fn parse_trims_dedupes_and_ignores_case() {
        let selection = GroupSelection::parse("General, Network, general").unwrap();
        assert_eq!(
            selection.iter().collect::<Vec<_>>(),
            vec![PropertyGroup::General, PropertyGroup::Network]
        );
        assert_eq!(selection.to_string(), "General,Network");
    }

    #[test]
    fn parse_all_enables_everything() {
        let selection = GroupSelection::parse("Network, all").unwrap();
        for group in PropertyGroup::selectable() {
            assert!(selection.is_enabled(group), "{group} should be enabled");
        }
        assert_eq!(selection, GroupSelection::all());
    }

    #[test]
    fn parse_drops_unknown_tokens() {
        let selection = GroupSelection::parse("Display, Bogus,, ").unwrap();
        assert_eq!(selection.iter().collect::<Vec<_>>(), vec![PropertyGroup::Display]);
        assert!(GroupSelection::parse("Bogus, ,").is_none());
    }

    #[test]
    fn update_keeps_previous_when_nothing_valid() {
        let mut selection = GroupSelection::parse("Display").unwrap();
        selection.update("nonsense");
        assert!(selection.is_enabled(PropertyGroup::Display));

        selection.update("Capabilities");
        assert!(!selection.is_enabled(PropertyGroup::Display));
        assert!(selection.is_enabled(PropertyGroup::Capabilities));
    }
}
