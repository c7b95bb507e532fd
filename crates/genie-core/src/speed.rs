// ── Speed mapping ──
//
// The accessory speaks a 0-100 percentage, the device three levels.
// Forward and inverse maps agree only at 33/67/100; everything else is
// collapsed on the way in. `to_percent(to_level(50), On) == 67`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Percentage reported for [`SpeedLevel::Low`] (100/3, truncated).
pub const LOW_PERCENT: u8 = 33;
/// Percentage reported for [`SpeedLevel::Medium`] (200/3, rounded).
pub const MEDIUM_PERCENT: u8 = 67;
/// Percentage reported for [`SpeedLevel::High`].
pub const HIGH_PERCENT: u8 = 100;

/// Discrete fan speed as stored in the `speedc` attribute.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumIter,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SpeedLevel {
    Low,
    Medium,
    High,
}

impl SpeedLevel {
    /// Parse the raw attribute value. Anything but `"1"`..`"3"` is unknown.
    pub fn from_wire(raw: &str) -> Option<Self> {
        match raw {
            "1" => Some(Self::Low),
            "2" => Some(Self::Medium),
            "3" => Some(Self::High),
            _ => None,
        }
    }

    /// The raw attribute value.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Low => "1",
            Self::Medium => "2",
            Self::High => "3",
        }
    }

    /// Canonical percentage for this level.
    pub fn percent(self) -> u8 {
        match self {
            Self::Low => LOW_PERCENT,
            Self::Medium => MEDIUM_PERCENT,
            Self::High => HIGH_PERCENT,
        }
    }
}

/// Fan power as stored in the `fanc` attribute.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    #[default]
    Off,
    On,
}

impl PowerState {
    /// `"1"` is on; every other value reads as off.
    pub fn from_wire(raw: &str) -> Self {
        if raw == "1" { Self::On } else { Self::Off }
    }

    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Off => "0",
            Self::On => "1",
        }
    }

    pub fn is_on(self) -> bool {
        self == Self::On
    }
}

impl From<bool> for PowerState {
    fn from(on: bool) -> Self {
        if on { Self::On } else { Self::Off }
    }
}

/// Map an accessory percentage onto a device level.
///
/// `..=33` is low, `34..=67` medium, above that high. Values past 100 are
/// treated as 100.
pub fn to_level(percent: u8) -> SpeedLevel {
    match percent {
        0..=LOW_PERCENT => SpeedLevel::Low,
        34..=MEDIUM_PERCENT => SpeedLevel::Medium,
        _ => SpeedLevel::High,
    }
}

/// Map a device level back to an accessory percentage.
///
/// Power off always reads as 0, as does an unknown level.
pub fn to_percent(level: Option<SpeedLevel>, power: PowerState) -> u8 {
    match (power, level) {
        (PowerState::On, Some(level)) => level.percent(),
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn forward_boundaries() {
        assert_eq!(to_level(0), SpeedLevel::Low);
        assert_eq!(to_level(33), SpeedLevel::Low);
        assert_eq!(to_level(34), SpeedLevel::Medium);
        assert_eq!(to_level(67), SpeedLevel::Medium);
        assert_eq!(to_level(68), SpeedLevel::High);
        assert_eq!(to_level(100), SpeedLevel::High);
        assert_eq!(to_level(u8::MAX), SpeedLevel::High);
    }

    #[test]
    fn forward_is_monotonic() {
        let levels: Vec<SpeedLevel> = (0..=100).map(to_level).collect();
        assert!(levels.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn inverse_values() {
        assert_eq!(to_percent(Some(SpeedLevel::Low), PowerState::On), 33);
        assert_eq!(to_percent(Some(SpeedLevel::Medium), PowerState::On), 67);
        assert_eq!(to_percent(Some(SpeedLevel::High), PowerState::On), 100);
        assert_eq!(to_percent(None, PowerState::On), 0);
    }

    #[test]
    fn power_off_reads_zero() {
        for level in SpeedLevel::iter() {
            assert_eq!(to_percent(Some(level), PowerState::Off), 0);
        }
        assert_eq!(to_percent(None, PowerState::Off), 0);
    }

    #[test]
    fn round_trip_is_lossy_but_stable() {
        assert_eq!(to_percent(Some(to_level(50)), PowerState::On), 67);
        assert_eq!(to_percent(Some(to_level(10)), PowerState::On), 33);

        for p in 0..=100 {
            let once = to_percent(Some(to_level(p)), PowerState::On);
            let twice = to_percent(Some(to_level(once)), PowerState::On);
            assert_eq!(once, twice, "not stable at {p}");
        }
    }

    #[test]
    fn canonical_outputs_map_back_to_their_level() {
        for level in SpeedLevel::iter() {
            assert_eq!(to_level(level.percent()), level);
        }
    }

    #[test]
    fn wire_values() {
        for level in SpeedLevel::iter() {
            assert_eq!(SpeedLevel::from_wire(level.as_wire()), Some(level));
        }
        assert_eq!(SpeedLevel::from_wire("0"), None);
        assert_eq!(SpeedLevel::from_wire("4"), None);
        assert_eq!(SpeedLevel::from_wire(""), None);

        assert_eq!(PowerState::from_wire("1"), PowerState::On);
        assert_eq!(PowerState::from_wire("0"), PowerState::Off);
        assert_eq!(PowerState::from_wire("garbage"), PowerState::Off);
        assert_eq!(PowerState::from(true).as_wire(), "1");
    }

    #[test]
    fn display_names() {
        assert_eq!(SpeedLevel::Medium.to_string(), "medium");
        assert_eq!(PowerState::On.to_string(), "on");
    }
}
