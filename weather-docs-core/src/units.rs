//! Metric/imperial display strings.
//!
//! Values are rounded half-to-even before formatting, so `2.5` renders as `2`
//! and `3.5` as `4`.

use serde::{Deserialize, Serialize};

const MPS_TO_MPH: f64 = 2.236936;

/// Unit system a display string belongs to. Also names the Flare condition
/// (`Units.Metric`, `Units.Imperial`) that shows or hides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitSystem {
    Metric,
    Imperial,
}

impl UnitSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnitSystem::Metric => "Metric",
            UnitSystem::Imperial => "Imperial",
        }
    }

    pub fn condition(&self) -> String {
        format!("Units.{}", self.as_str())
    }
}

/// One source value rendered in both unit systems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualUnitValue {
    pub metric: String,
    pub imperial: String,
}

impl DualUnitValue {
    /// From degrees Celsius.
    pub fn temperature(celsius: f64) -> Self {
        Self {
            metric: format!("{} \u{b0}C", round(celsius)),
            imperial: format!("{} \u{b0}F", round(celsius * 1.8 + 32.0)),
        }
    }

    /// From metres per second.
    pub fn speed(mps: f64) -> Self {
        Self {
            metric: format!("{} m/s", round(mps)),
            imperial: format!("{} mph", round(mps * MPS_TO_MPH)),
        }
    }

    /// Metric first, then imperial.
    pub fn units(&self) -> [(UnitSystem, &str); 2] {
        [
            (UnitSystem::Metric, self.metric.as_str()),
            (UnitSystem::Imperial, self.imperial.as_str()),
        ]
    }
}

/// Probability of precipitation (0.0..=1.0) as a whole percentage, e.g. `"42%"`.
pub fn rain_chance(pop: f64) -> String {
    format!("{}%", round(pop * 100.0))
}

fn round(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn temperature_in_both_systems() {
        let t = DualUnitValue::temperature(20.0);
        assert_eq!(t.metric, "20 °C");
        assert_eq!(t.imperial, "68 °F");
    }

    #[test]
    fn temperature_follows_forward_formula() {
        for c in [-40.0, -17.8, -0.4, 0.0, 12.3, 21.7, 36.6, 45.0] {
            let t = DualUnitValue::temperature(c);
            let expected = (c * 1.8 + 32.0).round_ties_even() as i64;
            assert_eq!(t.imperial, format!("{expected} °F"), "for {c} °C");
        }
    }

    #[test]
    fn negative_values_round_to_plain_zero() {
        let t = DualUnitValue::temperature(-0.3);
        assert_eq!(t.metric, "0 °C");
    }

    #[test]
    fn speed_in_both_systems() {
        let s = DualUnitValue::speed(5.0);
        assert_eq!(s.metric, "5 m/s");
        assert_eq!(s.imperial, "11 mph");

        let s = DualUnitValue::speed(13.4);
        assert_eq!(s.metric, "13 m/s");
        assert_eq!(s.imperial, "30 mph");
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(DualUnitValue::speed(2.5).metric, "2 m/s");
        assert_eq!(DualUnitValue::speed(3.5).metric, "4 m/s");
    }

    #[test]
    fn rain_chance_is_whole_percent() {
        assert_eq!(rain_chance(0.42), "42%");
        assert_eq!(rain_chance(0.0), "0%");
        assert_eq!(rain_chance(1.0), "100%");
        assert_eq!(rain_chance(0.07), "7%");
    }

    #[test]
    fn units_are_ordered_metric_first() {
        let t = DualUnitValue::temperature(20.0);
        let units = t.units();
        assert_eq!(units[0], (UnitSystem::Metric, "20 °C"));
        assert_eq!(units[1], (UnitSystem::Imperial, "68 °F"));
        assert_eq!(UnitSystem::Imperial.condition(), "Units.Imperial");
    }
}
