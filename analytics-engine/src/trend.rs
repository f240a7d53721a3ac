//! Trend calculation
//!
//! A trend is the *relative* change of a current value against the value of
//! the comparison period: `(current - previous) / previous * 100`. Values
//! that are already percentages go through the same formula, so a conversion
//! rate moving from 40% to 50% reads as "▲ 25.0%".

use serde::{Deserialize, Serialize};

/// Direction of change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Up,
    Down,
    Neutral,
}

impl TrendDirection {
    pub fn glyph(&self) -> &'static str {
        match self {
            Self::Up => "▲",
            Self::Down => "▼",
            Self::Neutral => "◆",
        }
    }
}

/// Display-ready trend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendInfo {
    pub direction: TrendDirection,
    /// Absolute relative change, one decimal
    pub percentage: f64,
    pub label: String,
}

impl TrendInfo {
    fn no_change() -> Self {
        Self {
            direction: TrendDirection::Neutral,
            percentage: 0.0,
            label: "No change".to_string(),
        }
    }
}

/// Round half toward positive infinity at one decimal place.
pub(crate) fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

/// Compare `current` against `previous`.
///
/// A missing, zero or NaN `previous` yields a neutral "No change" trend; this
/// only guards the division and says nothing about whether the value moved.
pub fn calculate_trend(current: f64, previous: Option<f64>) -> TrendInfo {
    let previous = match previous {
        Some(p) if p != 0.0 && !p.is_nan() => p,
        _ => return TrendInfo::no_change(),
    };

    let change = (current - previous) / previous * 100.0;
    let direction = if change > 0.0 {
        TrendDirection::Up
    } else if change < 0.0 {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    };
    let percentage = round_one_decimal(change).abs();

    TrendInfo {
        direction,
        percentage,
        label: format!("{} {:.1}%", direction.glyph(), percentage),
    }
}

/// Format `value` with thousands separators, appending the trend against
/// `previous` when there is one: `"1,250 (▲ 25.0% vs. previous)"`.
pub fn format_trend_value(value: f64, previous: Option<f64>) -> String {
    match previous {
        Some(p) if p != 0.0 && !p.is_nan() => {
            let trend = calculate_trend(value, Some(p));
            format!("{} ({} vs. previous)", format_grouped(value), trend.label)
        }
        _ => format_grouped(value),
    }
}

/// en-US style number formatting: comma-grouped integer part and at most
/// three fraction digits with trailing zeros dropped.
pub fn format_grouped(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = (value.abs() * 1000.0).round() / 1000.0;
    let frac_part = ((rounded - rounded.trunc()) * 1000.0).round() as u64;

    // Decimal digits of the integer part, exact past u64::MAX
    let digits = format!("{:.0}", rounded.trunc());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if frac_part > 0 {
        let frac = format!("{frac_part:03}");
        grouped.push('.');
        grouped.push_str(frac.trim_end_matches('0'));
    }

    if value < 0.0 && (digits != "0" || frac_part > 0) {
        grouped.insert(0, '-');
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_or_zero_previous_is_neutral() {
        for current in [0.0, 5.0, 1234.5] {
            for previous in [None, Some(0.0), Some(f64::NAN)] {
                let trend = calculate_trend(current, previous);
                assert_eq!(trend.direction, TrendDirection::Neutral);
                assert_eq!(trend.percentage, 0.0);
                assert_eq!(trend.label, "No change");
            }
        }
    }

    #[test]
    fn test_increase() {
        let trend = calculate_trend(110.0, Some(100.0));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percentage, 10.0);
        assert_eq!(trend.label, "▲ 10.0%");
    }

    #[test]
    fn test_decrease() {
        let trend = calculate_trend(90.0, Some(100.0));
        assert_eq!(trend.direction, TrendDirection::Down);
        assert_eq!(trend.percentage, 10.0);
        assert_eq!(trend.label, "▼ 10.0%");
    }

    #[test]
    fn test_unchanged_value_is_neutral_with_glyph() {
        let trend = calculate_trend(42.0, Some(42.0));
        assert_eq!(trend.direction, TrendDirection::Neutral);
        assert_eq!(trend.label, "◆ 0.0%");
    }

    #[test]
    fn test_percentage_values_use_relative_change() {
        let trend = calculate_trend(50.0, Some(40.0));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.percentage, 25.0);
        assert_eq!(trend.label, "▲ 25.0%");
    }

    #[test]
    fn test_rounds_to_one_decimal() {
        // 1/3 increase
        let trend = calculate_trend(4.0, Some(3.0));
        assert_eq!(trend.percentage, 33.3);
        assert_eq!(trend.label, "▲ 33.3%");
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_one_decimal(2.25), 2.3);
        assert_eq!(round_one_decimal(-1.04), -1.0);
        assert_eq!(round_one_decimal(7.0), 7.0);
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(999.0), "999");
        assert_eq!(format_grouped(15423.0), "15,423");
        assert_eq!(format_grouped(1234567.0), "1,234,567");
        assert_eq!(format_grouped(1234.5), "1,234.5");
        assert_eq!(format_grouped(0.12345), "0.123");
        assert_eq!(format_grouped(-4500.0), "-4,500");
    }

    #[test]
    fn test_format_grouped_beyond_u64() {
        assert_eq!(format_grouped(1e20), "100,000,000,000,000,000,000");
        assert_eq!(format_grouped(3e19), "30,000,000,000,000,000,000");
        assert_eq!(format_grouped(-1e20), "-100,000,000,000,000,000,000");
        assert_eq!(format_grouped(-0.0001), "0");
    }

    #[test]
    fn test_format_trend_value() {
        assert_eq!(format_trend_value(15423.0, None), "15,423");
        assert_eq!(format_trend_value(15423.0, Some(0.0)), "15,423");
        assert_eq!(
            format_trend_value(1100.0, Some(1000.0)),
            "1,100 (▲ 10.0% vs. previous)"
        );
    }
}
