//! Week-range parser and week-pattern classifier.
//!
//! Meeting text carries `{...}` fragments describing which term weeks a block
//! meets, e.g. `{1-8周}`, `{9-16周}`, `{2周,6周,10周,14周}`. Fragments from
//! every course sharing a cell are unioned into one `WeekSet`, then classified
//! into a `WeekCategory`.

use crate::domain::entities::WeekCategory;
use regex::Regex;
use std::collections::BTreeSet;
use std::ops::RangeInclusive;
use std::sync::LazyLock;

/// Absolute term weeks a course (or cell) is active in. The classifier's
/// category bounds assume a 16-week term, but folding literal numbers does not.
pub type WeekSet = BTreeSet<u32>;

/// Bracket-delimited week fragment, non-greedy.
static FRAGMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(.+?)\}").expect("fragment pattern"));

/// Line-break markers, replaced by spaces before fragment extraction.
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

/// Any other markup tag, stripped before fragment extraction.
static MARKUP_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("markup tag pattern"));

/// General numeric week range inside a fragment: `<start>-<end>周`.
static NUMERIC_RANGE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)-(\d+)周").expect("numeric range pattern"));

/// Standalone integer token, for enumerated fragments like `2周,6周,10周`.
static INTEGER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("integer pattern"));

/// One form a week fragment can take. The table below is evaluated top to
/// bottom; the first form that matches consumes the fragment, even when it
/// contributes no weeks (a matched-but-reversed range must not fall through to
/// the enumeration form).
enum FragmentPattern {
    /// Fixed phrase mapped to a fixed week range (substring match, as the
    /// source data writes these verbatim).
    Phrase {
        needle: &'static str,
        weeks: RangeInclusive<u32>,
    },
    /// `<start>-<end>周` with arbitrary bounds. Reversed bounds are treated as
    /// unparseable: the fragment is consumed and contributes nothing.
    NumericRange,
    /// Every standalone integer is one week. Terminal catch-all.
    Enumeration,
}

/// Fragment forms in documented precedence order.
const PATTERN_TABLE: [FragmentPattern; 5] = [
    FragmentPattern::Phrase {
        needle: "1-8周",
        weeks: 1..=8,
    },
    FragmentPattern::Phrase {
        needle: "9-16周",
        weeks: 9..=16,
    },
    FragmentPattern::Phrase {
        needle: "1-16周",
        weeks: 1..=16,
    },
    FragmentPattern::NumericRange,
    FragmentPattern::Enumeration,
];

impl FragmentPattern {
    /// Try this form against a fragment's inner text. Returns true when the
    /// form matched (caller stops), adding any weeks it yields into `out`.
    fn apply(&self, fragment: &str, out: &mut WeekSet) -> bool {
        match self {
            FragmentPattern::Phrase { needle, weeks } => {
                if fragment.contains(needle) {
                    out.extend(weeks.clone());
                    true
                } else {
                    false
                }
            }
            FragmentPattern::NumericRange => {
                let Some(caps) = NUMERIC_RANGE.captures(fragment) else {
                    return false;
                };
                if let (Ok(start), Ok(end)) = (caps[1].parse::<u32>(), caps[2].parse::<u32>()) {
                    if start <= end {
                        out.extend(start..=end);
                    }
                }
                true
            }
            FragmentPattern::Enumeration => {
                for m in INTEGER.find_iter(fragment) {
                    if let Ok(week) = m.as_str().parse::<u32>() {
                        out.insert(week);
                    }
                }
                true
            }
        }
    }
}

/// Extract the unioned week membership from one course's raw meeting text.
///
/// Markup is stripped first, then every `{...}` fragment is classified against
/// the pattern table. Fragments without integer content contribute nothing;
/// the function never fails.
pub fn extract_weeks(meeting_text: &str) -> WeekSet {
    let cleaned = LINE_BREAK.replace_all(meeting_text, " ");
    let cleaned = MARKUP_TAG.replace_all(&cleaned, "");

    let mut weeks = WeekSet::new();
    for caps in FRAGMENT.captures_iter(&cleaned) {
        let inner = &caps[1];
        for pattern in &PATTERN_TABLE {
            if pattern.apply(inner, &mut weeks) {
                break;
            }
        }
    }
    weeks
}

/// Classify a cell-level unioned `WeekSet` into its semantic category.
///
/// Total, pure function. The loose `>= 8 members, all within range` rule (no
/// missing-week check) and the full-coverage fall-through mirror how the
/// source schedule data has always been bucketed; sparse sets spanning both
/// term halves intentionally read as `Irregular`.
pub fn classify(weeks: &WeekSet) -> WeekCategory {
    if weeks.is_empty() {
        return WeekCategory::Unspecified;
    }

    let has_first_half = weeks.iter().any(|w| (1..=8).contains(w));
    let has_second_half = weeks.iter().any(|w| (9..=16).contains(w));

    if has_first_half && has_second_half && (1..=16).all(|w| weeks.contains(&w)) {
        return WeekCategory::FullTerm;
    }

    if weeks.len() >= 8 && weeks.iter().all(|w| (1..=8).contains(w)) {
        return WeekCategory::Weeks1to8;
    }

    if weeks.len() >= 8 && weeks.iter().all(|w| (9..=16).contains(w)) {
        return WeekCategory::Weeks9to16;
    }

    WeekCategory::Irregular
}
