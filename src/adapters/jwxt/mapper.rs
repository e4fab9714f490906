//! Map jwxt wire payloads to domain entities.
//!
//! The display endpoint answers with one of several envelope shapes depending
//! on deployment and page: a bare array, `{"rows": [...]}`, `{"data": [...]}`
//! or `{"kbList": [...]}` (timetable query page). Items are kept only when
//! both the course name (`kcmc`) and the meeting text (`sksj`) are present.

use crate::domain::CourseRecord;
use serde::Deserialize;
use serde_json::Value;

/// One course item as the backend sends it. Everything is optional; incomplete
/// items are dropped during mapping.
#[derive(Debug, Deserialize)]
pub struct WireCourse {
    /// Course name.
    #[serde(default)]
    pub kcmc: Option<String>,
    /// Raw meeting-time text (days, periods, `{...}` week fragments).
    #[serde(default)]
    pub sksj: Option<String>,
}

/// Envelope keys probed in order when the payload is not a bare array.
const ROW_KEYS: [&str; 3] = ["rows", "data", "kbList"];

/// Pull the course rows out of whichever envelope shape the backend used.
fn course_rows(payload: &Value) -> &[Value] {
    if let Some(rows) = payload.as_array() {
        return rows;
    }
    for key in ROW_KEYS {
        if let Some(rows) = payload.get(key).and_then(Value::as_array) {
            return rows;
        }
    }
    &[]
}

/// Map a full response payload to domain records, dropping incomplete items.
pub fn parse_course_payload(payload: &Value) -> Vec<CourseRecord> {
    course_rows(payload)
        .iter()
        .filter_map(|item| serde_json::from_value::<WireCourse>(item.clone()).ok())
        .filter_map(wire_to_domain)
        .collect()
}

/// Map one wire item to a domain record. Requires non-empty `kcmc` and `sksj`.
fn wire_to_domain(wire: WireCourse) -> Option<CourseRecord> {
    let title = wire.kcmc.filter(|s| !s.is_empty())?;
    let meeting_text = wire.sksj.filter(|s| !s.is_empty())?;
    Some(CourseRecord::new(title, meeting_text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(kcmc: &str, sksj: &str) -> Value {
        json!({ "kcmc": kcmc, "sksj": sksj, "jsxm": "某老师" })
    }

    #[test]
    fn parses_bare_array() {
        let payload = json!([item("高等数学", "星期一第1-2节{1-8周}")]);
        let courses = parse_course_payload(&payload);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "高等数学");
    }

    #[test]
    fn parses_rows_data_and_kblist_envelopes() {
        for key in ["rows", "data", "kbList"] {
            let payload = json!({ key: [item("大学英语", "星期二第3-4节{9-16周}")] });
            let courses = parse_course_payload(&payload);
            assert_eq!(courses.len(), 1, "envelope key {key}");
            assert_eq!(courses[0].meeting_text, "星期二第3-4节{9-16周}");
        }
    }

    #[test]
    fn drops_items_missing_name_or_meeting_text() {
        let payload = json!([
            item("完整课程", "星期一第1-2节{1-8周}"),
            json!({ "kcmc": "无时间" }),
            json!({ "sksj": "星期三第5-6节" }),
            json!({ "kcmc": "", "sksj": "星期四第1-2节" }),
            json!(null),
        ]);
        let courses = parse_course_payload(&payload);
        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].title, "完整课程");
    }

    #[test]
    fn unrecognized_payload_yields_nothing() {
        assert!(parse_course_payload(&json!({"flag": "-1", "msg": "未登录"})).is_empty());
        assert!(parse_course_payload(&json!("oops")).is_empty());
    }
}
