//! Series building: filter, group, sort, style.
//!
//! This module is responsible for turning the raw record collection into a
//! clean set of plottable series for one commodity.
//!
//! Design goals:
//! - **Pure**: no I/O, no state; series are rebuilt from scratch on every
//!   commodity change.
//! - **Deterministic**: groups come out sorted by `(country, product_form)`,
//!   so identical inputs always produce identical output.
//! - **Lenient**: records missing a date or a USD price are data variation,
//!   not errors; they are dropped without signaling.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{LineStyle, PricePoint, PriceRecord, PriceSeries, Rgb, SeriesKey};

/// Group label substituted when a record carries no product form.
pub const UNKNOWN_FORM: &str = "unknown";

/// Fallback color for countries missing from the fixed table.
pub const NEUTRAL_GRAY: Rgb = Rgb::new(107, 114, 128);

/// Build plottable series for one commodity.
///
/// Records are filtered to the commodity, stripped of incomplete
/// observations, grouped by `(country, product_form)`, and sorted ascending
/// by date within each group. Styling is derived per group: dashed stroke
/// for "thigh" product forms, color from the country table.
pub fn build_series(records: &[PriceRecord], commodity: &str) -> Vec<PriceSeries> {
    let mut groups: BTreeMap<SeriesKey, Vec<PricePoint>> = BTreeMap::new();

    for record in records {
        if record.commodity != commodity {
            continue;
        }
        let Some(date) = record.date.as_deref().and_then(parse_date) else {
            continue;
        };
        let Some(usd_per_kg) = record.usd_per_kg.filter(|v| v.is_finite()) else {
            continue;
        };

        let key = SeriesKey {
            country: record.country.clone(),
            product_form: normalize_form(record.product_form.as_deref()),
        };

        groups.entry(key).or_default().push(PricePoint {
            date,
            usd_per_kg,
            inr_per_kg: record.inr_per_kg,
        });
    }

    groups
        .into_iter()
        .map(|(key, mut points)| {
            // Stable sort: equal dates keep input order.
            points.sort_by_key(|p| p.date);
            let style = if is_thigh(&key.product_form) {
                LineStyle::Dashed
            } else {
                LineStyle::Solid
            };
            let color = country_color(&key.country);
            PriceSeries {
                key,
                points,
                style,
                color,
            }
        })
        .collect()
}

/// Parse an ISO-like date string; a time suffix is ignored.
///
/// Unparsable dates count as missing; the record is dropped.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    raw.get(..10)
        .and_then(|head| NaiveDate::parse_from_str(head, "%Y-%m-%d").ok())
}

fn normalize_form(form: Option<&str>) -> String {
    match form.map(str::trim) {
        Some(form) if !form.is_empty() => form.to_string(),
        _ => UNKNOWN_FORM.to_string(),
    }
}

/// Dashed-stroke rule: any product form containing "thigh", case-insensitively.
pub fn is_thigh(product_form: &str) -> bool {
    product_form.to_lowercase().contains("thigh")
}

/// Fixed country→color table; consistent across every chart.
pub fn country_color(country: &str) -> Rgb {
    match country {
        "United States" => Rgb::new(59, 130, 246), // blue
        "European Union" | "EU" => Rgb::new(16, 185, 129), // green
        "Thailand" => Rgb::new(168, 85, 247),      // purple
        _ => NEUTRAL_GRAY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        commodity: &str,
        country: &str,
        form: Option<&str>,
        date: Option<&str>,
        usd: Option<f64>,
    ) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            country: country.to_string(),
            product_form: form.map(str::to_string),
            date: date.map(str::to_string),
            usd_per_kg: usd,
            inr_per_kg: None,
        }
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn thailand_thigh_example() {
        let records = vec![
            record(
                "chicken",
                "Thailand",
                Some("Thigh"),
                Some("2023-01-01"),
                Some(2.5),
            ),
            record(
                "chicken",
                "Thailand",
                Some("Thigh"),
                Some("2022-12-01"),
                Some(2.3),
            ),
        ];

        let series = build_series(&records, "chicken");
        assert_eq!(series.len(), 1);

        let s = &series[0];
        assert_eq!(s.key.country, "Thailand");
        assert_eq!(s.key.product_form, "Thigh");
        assert_eq!(s.label(), "Thailand • Thigh");
        assert_eq!(s.style, LineStyle::Dashed);
        assert_eq!(s.color, Rgb::new(168, 85, 247));
        assert_eq!(
            s.points
                .iter()
                .map(|p| (p.date, p.usd_per_kg))
                .collect::<Vec<_>>(),
            vec![(date("2022-12-01"), 2.3), (date("2023-01-01"), 2.5)]
        );
    }

    #[test]
    fn other_commodities_are_excluded() {
        let records = vec![
            record("beef", "Thailand", None, Some("2023-01-01"), Some(5.0)),
            record("chicken", "Thailand", None, Some("2023-01-01"), Some(2.5)),
        ];
        let series = build_series(&records, "chicken");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 1);
    }

    #[test]
    fn records_missing_date_or_price_are_dropped() {
        let records = vec![
            record("chicken", "Thailand", None, None, Some(2.5)),
            record("chicken", "Thailand", None, Some("2023-01-01"), None),
            record("chicken", "Thailand", None, Some("not a date"), Some(2.5)),
            record("chicken", "Thailand", None, Some("2023-02-01"), Some(2.6)),
        ];
        let series = build_series(&records, "chicken");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].points.len(), 1);
        assert_eq!(series[0].points[0].date, date("2023-02-01"));
    }

    #[test]
    fn missing_product_form_groups_as_unknown() {
        let records = vec![
            record("chicken", "Thailand", None, Some("2023-01-01"), Some(2.5)),
            record("chicken", "Thailand", Some("  "), Some("2023-02-01"), Some(2.6)),
        ];
        let series = build_series(&records, "chicken");
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].key.product_form, UNKNOWN_FORM);
        assert_eq!(series[0].points.len(), 2);
    }

    #[test]
    fn points_are_sorted_ascending_by_date() {
        let records = vec![
            record("chicken", "EU", Some("breast"), Some("2023-03-01"), Some(3.1)),
            record("chicken", "EU", Some("breast"), Some("2023-01-01"), Some(3.0)),
            record("chicken", "EU", Some("breast"), Some("2023-02-01"), Some(3.2)),
        ];
        let series = build_series(&records, "chicken");
        let dates: Vec<NaiveDate> = series[0].points.iter().map(|p| p.date).collect();
        let mut sorted = dates.clone();
        sorted.sort();
        assert_eq!(dates, sorted);
    }

    #[test]
    fn build_is_idempotent() {
        let records = vec![
            record("chicken", "Thailand", Some("Thigh"), Some("2023-01-01"), Some(2.5)),
            record("chicken", "EU", None, Some("2023-01-01"), Some(3.0)),
            record("chicken", "Brazil", Some("whole"), Some("2023-02-01"), Some(1.9)),
        ];
        assert_eq!(
            build_series(&records, "chicken"),
            build_series(&records, "chicken")
        );
    }

    #[test]
    fn thigh_rule_is_case_insensitive() {
        for form in ["Thigh", "THIGH", "thigh", "boneless thigh"] {
            assert!(is_thigh(form), "{form} should be dashed");
        }
        for form in ["breast", "whole", "unknown"] {
            assert!(!is_thigh(form), "{form} should be solid");
        }
    }

    #[test]
    fn unmapped_countries_get_the_neutral_color() {
        assert_eq!(country_color("Brazil"), NEUTRAL_GRAY);
        assert_eq!(country_color("EU"), country_color("European Union"));
    }

    #[test]
    fn date_parsing_ignores_time_suffix() {
        assert_eq!(parse_date("2023-01-01"), Some(date("2023-01-01")));
        assert_eq!(parse_date("2023-01-01T00:00:00Z"), Some(date("2023-01-01")));
        assert_eq!(parse_date("01/02/2023"), None);
        assert_eq!(parse_date(""), None);
    }
}
