//! No-show recovery ROI calculator
//!
//! Projects the monthly revenue recovered by reminder and rebooking
//! automation, and how many months each investment tier takes to pay back.
//! The calculation is pure and total: odd inputs give odd numbers or an
//! infinite payback, never an error.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use tracing::debug;

/// Calculator inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiInputs {
    /// Missed appointments on an average day
    pub daily_no_shows: f64,
    /// Share of reminded clients who show up, 0-100
    pub show_rate_percent: f64,
    /// Share of no-shows who rebook, 0-100
    pub rebook_rate_percent: f64,
    /// Average ticket per appointment
    pub avg_ticket: f64,
    /// Open days per month
    pub days_per_month: f64,
}

impl Default for RoiInputs {
    fn default() -> Self {
        Self {
            daily_no_shows: 2.0,
            show_rate_percent: 60.0,
            rebook_rate_percent: 40.0,
            avg_ticket: 70.0,
            days_per_month: 26.0,
        }
    }
}

impl RoiInputs {
    /// Build inputs from raw form strings, treating malformed values as zero
    pub fn from_raw(
        daily_no_shows: &str,
        show_rate_percent: &str,
        rebook_rate_percent: &str,
        avg_ticket: &str,
        days_per_month: &str,
    ) -> Self {
        Self {
            daily_no_shows: parse_number(daily_no_shows),
            show_rate_percent: parse_number(show_rate_percent),
            rebook_rate_percent: parse_number(rebook_rate_percent),
            avg_ticket: parse_number(avg_ticket),
            days_per_month: parse_number(days_per_month),
        }
    }

    /// Copy with both percentages clamped to [0, 100]
    ///
    /// The calculator form applies this; [`calculate_roi`] itself does not.
    pub fn clamped(self) -> Self {
        Self {
            show_rate_percent: self.show_rate_percent.clamp(0.0, 100.0),
            rebook_rate_percent: self.rebook_rate_percent.clamp(0.0, 100.0),
            ..self
        }
    }
}

/// Parse a number from user input; anything unparseable or non-finite is zero
pub fn parse_number(raw: &str) -> f64 {
    let cleaned: String = raw.trim().chars().filter(|c| !matches!(c, ',' | '$' | '%' | '_')).collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => {
            if !raw.trim().is_empty() {
                debug!(%raw, "parse_number: malformed input, using zero");
            }
            0.0
        }
    }
}

/// A named fixed-cost investment package
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// One-time investment
    pub cost: f64,
}

impl Tier {
    pub fn new(id: impl Into<String>, name: impl Into<String>, cost: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cost,
        }
    }
}

/// The standard package line-up
pub fn default_tiers() -> Vec<Tier> {
    vec![
        Tier::new("starter", "Starter", 2_500.0),
        Tier::new("growth", "Growth", 5_500.0),
        Tier::new("full-suite", "Full Suite", 9_500.0),
    ]
}

/// Months until an investment pays for itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Payback {
    /// Whole number of months
    Months(u64),
    /// Never pays back (no recovered revenue)
    Infinite,
}

impl Payback {
    pub fn is_infinite(&self) -> bool {
        matches!(self, Self::Infinite)
    }

    /// Month count, if finite
    pub fn months(&self) -> Option<u64> {
        match self {
            Self::Months(m) => Some(*m),
            Self::Infinite => None,
        }
    }
}

impl fmt::Display for Payback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Months(1) => write!(f, "1 month"),
            Self::Months(m) => write!(f, "{} months", m),
            Self::Infinite => write!(f, "∞"),
        }
    }
}

// JSON has no infinity; emit the number of months or the string "Infinity"
impl Serialize for Payback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Months(m) => serializer.serialize_u64(*m),
            Self::Infinite => serializer.serialize_str("Infinity"),
        }
    }
}

/// Payback period for one tier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierPayback {
    pub tier_id: String,
    pub tier_name: String,
    pub cost: f64,
    pub months: Payback,
}

/// Calculator output
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoiResult {
    /// Missed appointments per month
    pub no_shows_per_month: i64,
    /// Recovered appointments per month, one decimal
    pub recovered_bookings: f64,
    /// Recovered revenue per month, whole units
    pub recovered_revenue: i64,
    /// Payback per tier, in tier order
    pub payback: Vec<TierPayback>,
}

impl RoiResult {
    /// Payback for a tier id
    pub fn payback_for(&self, tier_id: &str) -> Option<Payback> {
        self.payback.iter().find(|p| p.tier_id == tier_id).map(|p| p.months)
    }
}

fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Months for `cost` to be covered by `monthly_revenue`
///
/// Revenue of zero or below never pays back.
fn payback_months(cost: f64, monthly_revenue: f64) -> Payback {
    if !monthly_revenue.is_finite() || monthly_revenue <= 0.0 {
        return Payback::Infinite;
    }
    let months = (cost / monthly_revenue).round();
    if months.is_finite() {
        Payback::Months(months.max(0.0) as u64)
    } else {
        Payback::Infinite
    }
}

/// Project recovered revenue and per-tier payback
pub fn calculate_roi(inputs: &RoiInputs, tiers: &[Tier]) -> RoiResult {
    debug!(?inputs, tiers = tiers.len(), "calculate_roi: called");
    let no_shows = inputs.daily_no_shows * inputs.days_per_month;
    let bookings = no_shows * (inputs.show_rate_percent / 100.0) * (inputs.rebook_rate_percent / 100.0);
    // Revenue uses the unrounded booking count; payback uses the rounded revenue
    let revenue = (bookings * inputs.avg_ticket).round();

    let payback = tiers
        .iter()
        .map(|t| TierPayback {
            tier_id: t.id.clone(),
            tier_name: t.name.clone(),
            cost: t.cost,
            months: payback_months(t.cost, revenue),
        })
        .collect();

    let result = RoiResult {
        no_shows_per_month: no_shows.round() as i64,
        recovered_bookings: round_to_tenth(bookings),
        recovered_revenue: revenue as i64,
        payback,
    };
    debug!(revenue = result.recovered_revenue, "calculate_roi: done");
    result
}

/// Format whole currency units with thousands separators, e.g. `$12,480`
pub fn format_currency(amount: i64) -> String {
    let digits = amount.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if amount < 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn inputs(daily: f64, show: f64, rebook: f64, ticket: f64, days: f64) -> RoiInputs {
        RoiInputs {
            daily_no_shows: daily,
            show_rate_percent: show,
            rebook_rate_percent: rebook,
            avg_ticket: ticket,
            days_per_month: days,
        }
    }

    #[test]
    fn test_reference_projection() {
        let result = calculate_roi(&inputs(2.0, 60.0, 40.0, 70.0, 26.0), &default_tiers());

        assert_eq!(result.no_shows_per_month, 52);
        assert_eq!(result.recovered_bookings, 12.5);
        assert_eq!(result.recovered_revenue, 874);
        assert_eq!(result.payback_for("starter"), Some(Payback::Months(3)));
        assert_eq!(result.payback_for("growth"), Some(Payback::Months(6)));
        assert_eq!(result.payback_for("full-suite"), Some(Payback::Months(11)));
    }

    #[test]
    fn test_default_inputs_match_reference() {
        assert_eq!(RoiInputs::default(), inputs(2.0, 60.0, 40.0, 70.0, 26.0));
    }

    #[test]
    fn test_zero_no_shows_never_pays_back() {
        let result = calculate_roi(&inputs(0.0, 100.0, 100.0, 100.0, 30.0), &default_tiers());

        assert_eq!(result.recovered_revenue, 0);
        assert_eq!(result.recovered_bookings, 0.0);
        assert!(result.payback.iter().all(|p| p.months.is_infinite()));
    }

    #[test]
    fn test_revenue_rounding_to_zero_never_pays_back() {
        let result = calculate_roi(&inputs(0.01, 100.0, 100.0, 10.0, 1.0), &default_tiers());

        assert_eq!(result.recovered_revenue, 0);
        assert!(result.payback.iter().all(|p| p.months.is_infinite()));
    }

    #[test]
    fn test_negative_inputs_are_defined() {
        let result = calculate_roi(&inputs(-2.0, 60.0, 40.0, 70.0, 26.0), &default_tiers());
        assert_eq!(result.recovered_revenue, -874);
        assert!(result.payback.iter().all(|p| p.months.is_infinite()));
    }

    #[test]
    fn test_no_tiers_gives_empty_payback() {
        let result = calculate_roi(&RoiInputs::default(), &[]);
        assert!(result.payback.is_empty());
        assert_eq!(result.recovered_revenue, 874);
    }

    #[test]
    fn test_parse_number_is_lenient() {
        assert_eq!(parse_number("42"), 42.0);
        assert_eq!(parse_number(" 1,250.50 "), 1250.5);
        assert_eq!(parse_number("$70"), 70.0);
        assert_eq!(parse_number("60%"), 60.0);
        assert_eq!(parse_number(""), 0.0);
        assert_eq!(parse_number("abc"), 0.0);
        assert_eq!(parse_number("NaN"), 0.0);
        assert_eq!(parse_number("inf"), 0.0);
    }

    #[test]
    fn test_from_raw_and_clamp() {
        let raw = RoiInputs::from_raw("3", "140", "-5", "oops", "26");
        assert_eq!(raw.avg_ticket, 0.0);
        assert_eq!(raw.show_rate_percent, 140.0);

        let clamped = raw.clamped();
        assert_eq!(clamped.show_rate_percent, 100.0);
        assert_eq!(clamped.rebook_rate_percent, 0.0);
        assert_eq!(clamped.daily_no_shows, 3.0);
    }

    #[test]
    fn test_payback_serializes_infinity_as_string() {
        assert_eq!(serde_json::to_string(&Payback::Months(4)).unwrap(), "4");
        assert_eq!(serde_json::to_string(&Payback::Infinite).unwrap(), "\"Infinity\"");
    }

    #[test]
    fn test_result_json_field_names() {
        let result = calculate_roi(&RoiInputs::default(), &default_tiers());
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["recoveredRevenue"], 874);
        assert_eq!(json["noShowsPerMonth"], 52);
        assert_eq!(json["payback"][0]["tierId"], "starter");
        assert_eq!(json["payback"][0]["months"], 3);
    }

    #[test]
    fn test_payback_display() {
        assert_eq!(Payback::Months(1).to_string(), "1 month");
        assert_eq!(Payback::Months(6).to_string(), "6 months");
        assert_eq!(Payback::Infinite.to_string(), "∞");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0), "$0");
        assert_eq!(format_currency(874), "$874");
        assert_eq!(format_currency(12_480), "$12,480");
        assert_eq!(format_currency(1_234_567), "$1,234,567");
        assert_eq!(format_currency(-9_500), "-$9,500");
    }

    proptest! {
        #[test]
        fn prop_revenue_non_negative(
            daily in 0.0f64..50.0,
            show in 0.0f64..=100.0,
            rebook in 0.0f64..=100.0,
            ticket in 0.0f64..1_000.0,
            days in 1u32..31,
        ) {
            let result = calculate_roi(&inputs(daily, show, rebook, ticket, days as f64), &default_tiers());
            prop_assert!(result.recovered_revenue >= 0);
            prop_assert!(result.recovered_bookings >= 0.0);
        }

        #[test]
        fn prop_any_zero_factor_means_zero_revenue(
            which in 0usize..4,
            daily in 0.0f64..50.0,
            show in 0.0f64..=100.0,
            rebook in 0.0f64..=100.0,
            ticket in 0.0f64..1_000.0,
            days in 1u32..31,
        ) {
            let mut i = inputs(daily, show, rebook, ticket, days as f64);
            match which {
                0 => i.daily_no_shows = 0.0,
                1 => i.show_rate_percent = 0.0,
                2 => i.rebook_rate_percent = 0.0,
                _ => i.avg_ticket = 0.0,
            }
            let result = calculate_roi(&i, &default_tiers());
            prop_assert_eq!(result.recovered_revenue, 0);
            prop_assert!(result.payback.iter().all(|p| p.months.is_infinite()));
        }

        #[test]
        fn prop_positive_factors_mean_positive_revenue(
            daily in 1u32..20,
            show in 10u32..=100,
            rebook in 10u32..=100,
            ticket in 100u32..500,
            days in 1u32..31,
        ) {
            let i = inputs(daily as f64, show as f64, rebook as f64, ticket as f64, days as f64);
            let result = calculate_roi(&i, &default_tiers());
            prop_assert!(result.recovered_revenue > 0);
            prop_assert!(result.payback.iter().all(|p| !p.months.is_infinite()));
        }
    }
}
