//! Domain entities: core data structures

use std::fmt;

use serde::Deserialize;

/// Raw `current` value meaning the hardware did not report a reading.
pub const CURRENT_NOT_REPORTED: i64 = i64::MIN;

const UNKNOWN: &str = "UNKNOWN";

/// Charging state as reported by the battery tool.
///
/// Strings outside the known set decode to `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(from = "String")]
pub enum ChargeState {
    Charging,
    Discharging,
    Full,
    NotCharging,
    #[default]
    Unknown,
}

impl ChargeState {
    /// Wire name, e.g. `NOT_CHARGING`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargeState::Charging => "CHARGING",
            ChargeState::Discharging => "DISCHARGING",
            ChargeState::Full => "FULL",
            ChargeState::NotCharging => "NOT_CHARGING",
            ChargeState::Unknown => UNKNOWN,
        }
    }
}

impl From<String> for ChargeState {
    fn from(value: String) -> Self {
        match value.as_str() {
            "CHARGING" => ChargeState::Charging,
            "DISCHARGING" => ChargeState::Discharging,
            "FULL" => ChargeState::Full,
            "NOT_CHARGING" => ChargeState::NotCharging,
            _ => ChargeState::Unknown,
        }
    }
}

impl fmt::Display for ChargeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Battery snapshot decoded from `termux-battery-status`.
///
/// Missing or `null` fields take the values of [`BatteryInfo::default`]:
/// `UNKNOWN` for the string fields, zero for the numbers and
/// [`CURRENT_NOT_REPORTED`] for `current`. Values are passed through as
/// reported; nothing is clamped.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawBatteryInfo")]
pub struct BatteryInfo {
    /// Opaque health string (GOOD, OVERHEAT, ...)
    pub health: String,
    /// Charge level, expected within 0..=100
    pub percentage: i64,
    /// Power source (AC, USB, WIRELESS, UNPLUGGED, ...)
    pub plugged: String,
    pub status: ChargeState,
    /// Degrees Celsius
    pub temperature: f64,
    /// Milliamps, or [`CURRENT_NOT_REPORTED`]
    pub current: i64,
}

impl Default for BatteryInfo {
    fn default() -> Self {
        Self {
            health: UNKNOWN.into(),
            percentage: 0,
            plugged: UNKNOWN.into(),
            status: ChargeState::Unknown,
            temperature: 0.0,
            current: CURRENT_NOT_REPORTED,
        }
    }
}

/// Wire shape of the battery payload; absent and `null` both arrive as `None`.
#[derive(Deserialize)]
struct RawBatteryInfo {
    health: Option<String>,
    percentage: Option<i64>,
    plugged: Option<String>,
    status: Option<ChargeState>,
    temperature: Option<f64>,
    current: Option<i64>,
}

impl From<RawBatteryInfo> for BatteryInfo {
    fn from(raw: RawBatteryInfo) -> Self {
        let defaults = BatteryInfo::default();
        Self {
            health: raw.health.unwrap_or(defaults.health),
            percentage: raw.percentage.unwrap_or(defaults.percentage),
            plugged: raw.plugged.unwrap_or(defaults.plugged),
            status: raw.status.unwrap_or(defaults.status),
            temperature: raw.temperature.unwrap_or(defaults.temperature),
            current: raw.current.unwrap_or(defaults.current),
        }
    }
}

impl BatteryInfo {
    /// The current reading, or `None` when the hardware did not report one.
    pub fn reported_current(&self) -> Option<i64> {
        (self.current != CURRENT_NOT_REPORTED).then_some(self.current)
    }
}

/// Process-level details shown in verbose system reports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeInfo {
    pub version: String,
    pub pid: u32,
}

/// Host snapshot assembled from the running system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemInfo {
    pub os: String,
    pub arch: String,
    pub cpus: usize,
    pub hostname: Option<String>,
    /// Allow-listed environment variables in allow-list order; unset ones are absent
    pub environment: Vec<(String, String)>,
    pub runtime: RuntimeInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_known_status_strings_when_converting_then_maps_each_state() {
        assert_eq!(ChargeState::from("CHARGING".to_string()), ChargeState::Charging);
        assert_eq!(ChargeState::from("DISCHARGING".to_string()), ChargeState::Discharging);
        assert_eq!(ChargeState::from("FULL".to_string()), ChargeState::Full);
        assert_eq!(ChargeState::from("NOT_CHARGING".to_string()), ChargeState::NotCharging);
    }

    #[test]
    fn given_unrecognised_status_when_converting_then_unknown() {
        assert_eq!(ChargeState::from("charging".to_string()), ChargeState::Unknown);
        assert_eq!(ChargeState::from(String::new()), ChargeState::Unknown);
    }

    #[test]
    fn given_sentinel_current_when_asking_reported_then_none() {
        let info = BatteryInfo {
            current: CURRENT_NOT_REPORTED,
            ..BatteryInfo::default()
        };
        assert_eq!(info.reported_current(), None);
    }

    #[test]
    fn given_real_current_when_asking_reported_then_some() {
        let info = BatteryInfo {
            current: -1200,
            ..BatteryInfo::default()
        };
        assert_eq!(info.reported_current(), Some(-1200));
    }
}
