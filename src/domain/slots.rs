//! Time-slot parser: raw jwxt meeting text (`sksj`) -> (day, period) occupations.
//!
//! A meeting text holds one or more lines separated by `<br>` markers, each
//! describing one contiguous block, e.g. `星期一第3-4节{1-8周}`. Lines that do
//! not match are skipped; a malformed line must never abort the rest.

use crate::domain::entities::SlotOccupation;
use regex::Regex;
use std::sync::LazyLock;

/// Day vocabulary: jwxt day token -> ISO weekday number (Monday = 1).
pub const DAY_TOKENS: [(&str, u8); 7] = [
    ("一", 1),
    ("二", 2),
    ("三", 3),
    ("四", 4),
    ("五", 5),
    ("六", 6),
    ("日", 7),
];

/// One meeting line: `星期<day>第<start>-<end>节`.
static MEETING_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"星期([一二三四五六日])第(\d+)-(\d+)节").expect("meeting line pattern")
});

/// Line-break markers between meeting lines (`<br>` / `<br/>`, any case).
static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").expect("line break pattern"));

fn day_number(token: &str) -> Option<u8> {
    DAY_TOKENS
        .iter()
        .find(|(t, _)| *t == token)
        .map(|&(_, n)| n)
}

/// Parse a raw meeting text into a flat, non-deduplicated slot sequence.
///
/// Each recognized line contributes one `SlotOccupation` per period in its
/// inclusive start..=end range. Pure function; unrecognized lines contribute
/// nothing.
pub fn parse_slots(meeting_text: &str) -> Vec<SlotOccupation> {
    let mut slots = Vec::new();

    for line in LINE_BREAK.split(meeting_text) {
        let Some(caps) = MEETING_LINE.captures(line) else {
            continue;
        };
        let Some(day) = day_number(&caps[1]) else {
            continue;
        };
        // Periods wider than u8 are garbage input; skip the line like any
        // other malformed one.
        let (Ok(start), Ok(end)) = (caps[2].parse::<u8>(), caps[3].parse::<u8>()) else {
            continue;
        };
        if start == 0 {
            continue;
        }
        for period in start..=end {
            slots.push(SlotOccupation { day, period });
        }
    }

    slots
}
