//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory while building chart series
//! - exported to JSON/CSV
//! - reloaded later for comparisons or offline diagnosis

use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

/// A raw price observation as it appears in the input JSON (mostly optional).
///
/// The loader performs no schema validation beyond deserialization; records
/// with missing required fields are dropped when series are built, not at
/// load time.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PriceRecord {
    #[serde(default)]
    pub commodity: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub product_form: Option<String>,
    /// ISO-like date string (`YYYY-MM-DD`, optionally with a time suffix).
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub usd_per_kg: Option<f64>,
    #[serde(default)]
    pub inr_per_kg: Option<f64>,
}

/// One plotted observation: a date plus the USD price, with the INR price
/// carried along for tooltips when the input provides it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub usd_per_kg: f64,
    pub inr_per_kg: Option<f64>,
}

/// Identity of one plotted line within a build.
///
/// `product_form` is already normalized here ("unknown" when the record had
/// none), so the key is unique and directly usable as a group key.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct SeriesKey {
    pub country: String,
    pub product_form: String,
}

/// Stroke style of a plotted line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// An RGB color, serialized in CSS `rgb(r, g, b)` form so exported chart
/// configuration stays directly consumable by web renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn css(&self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.css())
    }
}

/// One plotted line: grouped points plus derived presentation attributes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    pub key: SeriesKey,
    /// Points sorted ascending by date; equal dates keep input order.
    pub points: Vec<PricePoint>,
    pub style: LineStyle,
    pub color: Rgb,
}

impl PriceSeries {
    /// Legend/tooltip label, e.g. `Thailand • Thigh`.
    pub fn label(&self) -> String {
        format!("{} • {}", self.key.country, self.key.product_form)
    }

    pub fn is_dashed(&self) -> bool {
        self.style == LineStyle::Dashed
    }
}

/// Commodity charted when the data carries it and nothing else was requested.
pub const DEFAULT_COMMODITY: &str = "chicken";

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct ChartConfig {
    /// Data source override (path or URL); resolution falls back to the
    /// `PW_DATA` environment variable, then the default relative path.
    pub data: Option<String>,
    /// Requested commodity; `None` lets the pipeline pick from the data.
    pub commodity: Option<String>,

    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// Process-wide mutable state: the loaded records plus the active commodity
/// selection.
///
/// Exactly two events write to it: load completion (`set_records`) and
/// selection changes (`select_next`/`select_prev`). The series builder is
/// its only reader, and the single-threaded event loop serializes both.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub records: Vec<PriceRecord>,
    /// Distinct commodities present in `records`, sorted.
    pub commodities: Vec<String>,
    /// Index into `commodities`; meaningless while `commodities` is empty.
    pub selected: usize,
}

impl AppState {
    /// Replace the record collection and rebuild the commodity list.
    ///
    /// Keeps the selection on `preferred` (or the previously selected
    /// commodity) when it still exists, otherwise falls back the same way the
    /// pipeline does: "chicken" when present, else the first entry.
    pub fn set_records(&mut self, records: Vec<PriceRecord>, preferred: Option<&str>) {
        let previous = self.selected_commodity().map(str::to_owned);
        self.records = records;
        self.commodities = commodities_in(&self.records);

        let wanted = preferred.or(previous.as_deref());
        self.selected = wanted
            .and_then(|c| self.commodities.iter().position(|have| have == c))
            .or_else(|| {
                self.commodities
                    .iter()
                    .position(|have| have == DEFAULT_COMMODITY)
            })
            .unwrap_or(0);
    }

    pub fn selected_commodity(&self) -> Option<&str> {
        self.commodities.get(self.selected).map(String::as_str)
    }

    pub fn select_next(&mut self) {
        if self.selected + 1 < self.commodities.len() {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }
}

/// Distinct non-empty commodity labels, sorted for a deterministic selector.
pub fn commodities_in(records: &[PriceRecord]) -> Vec<String> {
    let mut out: Vec<String> = records
        .iter()
        .map(|r| r.commodity.clone())
        .filter(|c| !c.is_empty())
        .collect();
    out.sort();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(commodity: &str) -> PriceRecord {
        PriceRecord {
            commodity: commodity.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn commodities_are_sorted_and_deduped() {
        let records = vec![record("pork"), record("chicken"), record("pork"), record("")];
        assert_eq!(commodities_in(&records), vec!["chicken", "pork"]);
    }

    #[test]
    fn set_records_prefers_requested_then_default() {
        let mut state = AppState::default();
        state.set_records(vec![record("beef"), record("chicken")], Some("beef"));
        assert_eq!(state.selected_commodity(), Some("beef"));

        state.set_records(vec![record("chicken"), record("pork")], None);
        // "beef" is gone; falls back to the default commodity.
        assert_eq!(state.selected_commodity(), Some("chicken"));
    }

    #[test]
    fn selection_is_clamped_at_the_ends() {
        let mut state = AppState::default();
        state.set_records(vec![record("beef"), record("chicken")], None);
        state.select_prev();
        state.select_prev();
        assert_eq!(state.selected_commodity(), Some("beef"));
        state.select_next();
        state.select_next();
        state.select_next();
        assert_eq!(state.selected_commodity(), Some("chicken"));
    }

    #[test]
    fn rgb_serializes_as_css_string() {
        let json = serde_json::to_string(&Rgb::new(59, 130, 246)).unwrap();
        assert_eq!(json, "\"rgb(59, 130, 246)\"");
    }
}
