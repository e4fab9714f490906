//! Domain entities. Pure data structures for the core business.
//!
//! No HTTP/jwxt wire types here — these are mapped from adapters.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One course as supplied by the scheduling backend: a display title plus the
/// raw meeting-time text (may contain `<br>` markers and `{...}` week fragments).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub title: String,
    pub meeting_text: String,
}

impl CourseRecord {
    pub fn new(title: impl Into<String>, meeting_text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            meeting_text: meeting_text.into(),
        }
    }
}

/// One (day, period) slot occupied by a course. Day is 1..=7 (Monday = 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOccupation {
    pub day: u8,
    pub period: u8,
}

/// Identifies one grid cell. Serialized as the derived key `"<day>-<period>"`
/// so annotated grids stay representable as plain JSON maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    pub day: u8,
    pub period: u8,
}

impl From<SlotOccupation> for CellId {
    fn from(slot: SlotOccupation) -> Self {
        Self {
            day: slot.day,
            period: slot.period,
        }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.day, self.period)
    }
}

impl std::str::FromStr for CellId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (day, period) = s
            .split_once('-')
            .ok_or_else(|| format!("cell id without '-': {s}"))?;
        Ok(Self {
            day: day.parse().map_err(|_| format!("bad day in cell id: {s}"))?,
            period: period
                .parse()
                .map_err(|_| format!("bad period in cell id: {s}"))?,
        })
    }
}

impl Serialize for CellId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CellId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Semantic bucket for a cell's combined week membership.
///
/// Serialized names match the color-preference keys the original grid UI used,
/// so persisted color files remain stable across versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeekCategory {
    #[serde(rename = "week-1-8")]
    Weeks1to8,
    #[serde(rename = "week-9-16")]
    Weeks9to16,
    #[serde(rename = "week-1-16")]
    FullTerm,
    #[serde(rename = "irregular")]
    Irregular,
    #[serde(rename = "default")]
    Unspecified,
}

impl WeekCategory {
    /// All categories, in legend/stats display order.
    pub const ALL: [WeekCategory; 5] = [
        WeekCategory::Weeks1to8,
        WeekCategory::Weeks9to16,
        WeekCategory::FullTerm,
        WeekCategory::Irregular,
        WeekCategory::Unspecified,
    ];

    /// Human-readable label for legends and stats.
    pub fn label(self) -> &'static str {
        match self {
            WeekCategory::Weeks1to8 => "weeks 1-8",
            WeekCategory::Weeks9to16 => "weeks 9-16",
            WeekCategory::FullTerm => "full term",
            WeekCategory::Irregular => "irregular",
            WeekCategory::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for WeekCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Category → color mapping. An explicit value owned by the caller and passed
/// down into annotation; the core never mutates it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ColorConfig {
    colors: HashMap<WeekCategory, String>,
}

/// Fallback when even the `default` entry is missing from a config value.
const FALLBACK_COLOR: &str = "#83fc0d";

impl Default for ColorConfig {
    fn default() -> Self {
        let mut colors = HashMap::new();
        colors.insert(WeekCategory::Weeks1to8, "#ff9966".to_string());
        colors.insert(WeekCategory::Weeks9to16, "#e0c61e".to_string());
        colors.insert(WeekCategory::FullTerm, "#e31212".to_string());
        colors.insert(WeekCategory::Irregular, "#195bd5".to_string());
        colors.insert(WeekCategory::Unspecified, FALLBACK_COLOR.to_string());
        Self { colors }
    }
}

impl ColorConfig {
    /// Resolve a category to its configured color. Missing entries degrade to
    /// the `Unspecified`/default entry; never fails.
    pub fn resolve(&self, category: WeekCategory) -> &str {
        self.colors
            .get(&category)
            .or_else(|| self.colors.get(&WeekCategory::Unspecified))
            .map(String::as_str)
            .unwrap_or(FALLBACK_COLOR)
    }

    /// Set one entry (color-editing UI).
    pub fn set(&mut self, category: WeekCategory, color: impl Into<String>) {
        self.colors.insert(category, color.into());
    }

    /// Overlay a (possibly partial) stored config onto the defaults, so older
    /// preference files with missing keys still resolve every category.
    pub fn merged_over_defaults(partial: ColorConfig) -> Self {
        let mut base = Self::default();
        base.colors.extend(partial.colors);
        base
    }
}

/// One annotated grid cell: the occupying courses (input order), the unioned
/// week membership they cover, the category resolved from it, and the
/// configured color.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellAnnotation {
    pub courses: Vec<CourseRecord>,
    pub weeks: crate::domain::weeks::WeekSet,
    pub category: WeekCategory,
    pub color: String,
}

/// Per-category cell counts plus the total number of annotated cells.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridStats {
    per_category: HashMap<WeekCategory, usize>,
    pub total: usize,
}

impl GridStats {
    pub fn record(&mut self, category: WeekCategory) {
        *self.per_category.entry(category).or_insert(0) += 1;
        self.total += 1;
    }

    pub fn count(&self, category: WeekCategory) -> usize {
        self.per_category.get(&category).copied().unwrap_or(0)
    }
}

/// Output of one classify-and-annotate pass. Iteration order of `cells` is
/// unspecified; consumers sort for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnnotatedGrid {
    pub cells: HashMap<CellId, CellAnnotation>,
    pub stats: GridStats,
}

impl AnnotatedGrid {
    /// Highest occupied period, for sizing the rendered grid. 0 when empty.
    pub fn max_period(&self) -> u8 {
        self.cells.keys().map(|c| c.period).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_serializes_with_legacy_keys() {
        let json = serde_json::to_string(&WeekCategory::Weeks1to8).unwrap();
        assert_eq!(json, "\"week-1-8\"");
        let back: WeekCategory = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(back, WeekCategory::Unspecified);
    }

    #[test]
    fn resolve_falls_back_to_default_entry() {
        let mut cfg = ColorConfig::default();
        cfg.colors.remove(&WeekCategory::Irregular);
        assert_eq!(cfg.resolve(WeekCategory::Irregular), "#83fc0d");
        assert_eq!(cfg.resolve(WeekCategory::FullTerm), "#e31212");
    }

    #[test]
    fn partial_config_merges_over_defaults() {
        let partial: ColorConfig =
            serde_json::from_str(r##"{"week-1-8": "#000000"}"##).unwrap();
        let cfg = ColorConfig::merged_over_defaults(partial);
        assert_eq!(cfg.resolve(WeekCategory::Weeks1to8), "#000000");
        assert_eq!(cfg.resolve(WeekCategory::Weeks9to16), "#e0c61e");
    }

    #[test]
    fn cell_id_display_matches_key_format() {
        let id = CellId { day: 3, period: 5 };
        assert_eq!(id.to_string(), "3-5");
        assert_eq!("3-5".parse::<CellId>().unwrap(), id);
    }

    #[test]
    fn annotated_grid_serializes_cells_as_string_keys() {
        let mut grid = AnnotatedGrid::default();
        grid.cells.insert(
            CellId { day: 1, period: 2 },
            CellAnnotation {
                courses: vec![],
                weeks: Default::default(),
                category: WeekCategory::Unspecified,
                color: "#83fc0d".to_string(),
            },
        );
        let json = serde_json::to_value(&grid).unwrap();
        assert!(json["cells"].get("1-2").is_some());
    }
}
