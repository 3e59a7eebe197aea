// ── Statistic value formatting ──

use std::time::Duration;

/// Sentinel for values the panel did not report.
pub const NOT_AVAILABLE: &str = "N/A";

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3_600;
const SECS_PER_DAY: u64 = 86_400;

/// `Group#Property`, or the bare property name for ungrouped statistics.
pub fn key(group: Option<&str>, property: &str) -> String {
    match group {
        Some(group) => format!("{group}#{property}"),
        None => property.to_owned(),
    }
}

/// Text with its first letter upper-cased. Boolean words are lower-cased.
pub fn text(value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    if let Some(word) = boolean_word(value) {
        return Some(word);
    }
    title_case(value)
}

/// Text passed through as-is (domain names). Boolean words are lower-cased.
pub fn verbatim(value: Option<&str>) -> Option<String> {
    let value = value.filter(|v| !v.is_empty())?;
    Some(boolean_word(value).unwrap_or_else(|| value.to_owned()))
}

pub fn flag(value: Option<bool>) -> Option<String> {
    value.map(|v| v.to_string())
}

pub fn number(value: Option<i64>) -> Option<String> {
    value.map(|v| v.to_string())
}

/// `On` only for an explicit `true`.
pub fn on_off(value: Option<bool>) -> String {
    if value == Some(true) { "On" } else { "Off" }.to_owned()
}

/// `Yes` only for an explicit `true`.
pub fn yes_no(value: Option<bool>) -> String {
    if value == Some(true) { "Yes" } else { "No" }.to_owned()
}

pub fn or_na(value: Option<String>) -> String {
    value.unwrap_or_else(|| NOT_AVAILABLE.to_owned())
}

/// Component name reduced to ASCII alphanumerics with a leading capital,
/// e.g. `"Android OS"` → `"AndroidOS"`.
pub fn component_prefix(name: &str) -> String {
    let sanitized: String = name.chars().filter(char::is_ascii_alphanumeric).collect();
    title_case(&sanitized).unwrap_or_default()
}

/// `N day(s) N hour(s) N minute(s) N second(s)`; zero leading units are
/// omitted, seconds are always shown.
pub fn uptime(elapsed: Duration) -> String {
    let total = elapsed.as_secs();
    let days = total / SECS_PER_DAY;
    let hours = total % SECS_PER_DAY / SECS_PER_HOUR;
    let minutes = total % SECS_PER_HOUR / SECS_PER_MINUTE;
    let seconds = total % SECS_PER_MINUTE;

    let mut parts = Vec::with_capacity(4);
    if days > 0 {
        parts.push(format!("{days} day(s)"));
    }
    if hours > 0 {
        parts.push(format!("{hours} hour(s)"));
    }
    if minutes > 0 {
        parts.push(format!("{minutes} minute(s)"));
    }
    parts.push(format!("{seconds} second(s)"));
    parts.join(" ")
}

pub fn uptime_minutes(elapsed: Duration) -> String {
    (elapsed.as_secs() / SECS_PER_MINUTE).to_string()
}

fn boolean_word(value: &str) -> Option<String> {
    (value.eq_ignore_ascii_case("true") || value.eq_ignore_ascii_case("false"))
        .then(|| value.to_ascii_lowercase())
}

fn title_case(value: &str) -> Option<String> {
    if value.is_empty() || value == "null" {
        return None;
    }
    let mut chars = value.chars();
    let first = chars.next()?;
    Some(first.to_uppercase().chain(chars).collect())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn text_title_cases_and_normalizes_booleans() {
        assert_eq!(text(Some("awake")).as_deref(), Some("Awake"));
        assert_eq!(text(Some("TRUE")).as_deref(), Some("true"));
        assert_eq!(text(Some("")), None);
        assert_eq!(text(None), None);
    }

    #[test]
    fn verbatim_keeps_case() {
        assert_eq!(verbatim(Some("corp.local")).as_deref(), Some("corp.local"));
        assert_eq!(verbatim(Some("False")).as_deref(), Some("false"));
    }

    #[test]
    fn switch_words() {
        assert_eq!(on_off(Some(true)), "On");
        assert_eq!(on_off(Some(false)), "Off");
        assert_eq!(on_off(None), "Off");
        assert_eq!(yes_no(None), "No");
    }

    #[test]
    fn component_prefix_strips_punctuation() {
        assert_eq!(component_prefix("Android OS"), "AndroidOS");
        assert_eq!(component_prefix("touch-panel_fw v2"), "Touchpanelfwv2");
        assert_eq!(component_prefix("--"), "");
    }

    #[test]
    fn uptime_omits_zero_leading_units() {
        assert_eq!(uptime(Duration::from_secs(5)), "5 second(s)");
        assert_eq!(uptime(Duration::from_secs(3_605)), "1 hour(s) 5 second(s)");
        assert_eq!(
            uptime(Duration::from_secs(90_061)),
            "1 day(s) 1 hour(s) 1 minute(s) 1 second(s)"
        );
        assert_eq!(uptime_minutes(Duration::from_secs(3_659)), "60");
    }

    #[test]
    fn keys() {
        assert_eq!(key(Some("Display"), "Status"), "Display#Status");
        assert_eq!(key(None, "Name"), "Name");
    }
}
