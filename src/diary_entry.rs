use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde::{Deserialize, Serialize};

pub type EntryId = i64;

/// Moods offered by the editor, in picker order. The empty label means "no mood".
pub const MOODS: [&str; 9] = [
    "",
    "happy",
    "calm",
    "neutral",
    "sad",
    "anxious",
    "tired",
    "energetic",
    "grateful",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: EntryId,
    #[serde(default)]
    pub title: Option<String>,
    pub content: String,
    #[serde(default)]
    pub mood: Option<String>,
    pub created_at: String,
}

impl DiaryEntry {
    pub fn display_title(&self) -> &str {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => title,
            _ => "Untitled Entry",
        }
    }

    pub fn created_local(&self) -> Option<DateTime<Local>> {
        parse_timestamp(&self.created_at)
    }

    /// `Jan 5, 2025, 03:04 PM`, or the raw server value if it cannot be parsed.
    pub fn display_date(&self) -> String {
        match self.created_local() {
            Some(ts) => ts.format("%b %-d, %Y, %I:%M %p").to_string(),
            None => self.created_at.clone(),
        }
    }
}

/// Body of POST /api/entries and PUT /api/entries/{id}.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryPayload {
    pub title: String,
    pub content: String,
    pub mood: String,
}

/// RFC 3339 timestamps keep their offset; naive ones are taken as local time.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Local>> {
    let raw = raw.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Local));
    }

    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .and_then(|naive| Local.from_local_datetime(&naive).earliest())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn entry(title: Option<&str>, created_at: &str) -> DiaryEntry {
        DiaryEntry {
            id: 1,
            title: title.map(str::to_string),
            content: "body".to_string(),
            mood: None,
            created_at: created_at.to_string(),
        }
    }

    #[test]
    fn blank_titles_fall_back() {
        assert_eq!(entry(None, "").display_title(), "Untitled Entry");
        assert_eq!(entry(Some("  "), "").display_title(), "Untitled Entry");
        assert_eq!(entry(Some("Walk"), "").display_title(), "Walk");
    }

    #[test]
    fn naive_timestamps_are_local() {
        let ts = parse_timestamp("2025-01-05 15:04:09").unwrap();
        assert_eq!((ts.year(), ts.month(), ts.day()), (2025, 1, 5));
        assert_eq!((ts.hour(), ts.minute()), (15, 4));

        let ts = parse_timestamp("2025-01-05T15:04:09.123456").unwrap();
        assert_eq!(ts.hour(), 15);
    }

    #[test]
    fn display_date_uses_twelve_hour_clock() {
        assert_eq!(entry(None, "2025-01-05T15:04:00").display_date(), "Jan 5, 2025, 03:04 PM");
        assert_eq!(entry(None, "2024-11-20 09:30:00").display_date(), "Nov 20, 2024, 09:30 AM");
    }

    #[test]
    fn rfc3339_keeps_the_instant() {
        let ts = parse_timestamp("2025-01-05T15:04:00Z").unwrap();
        assert_eq!(ts.timestamp(), 1_736_089_440);
    }

    #[test]
    fn unparsable_dates_are_shown_raw() {
        assert_eq!(entry(None, "yesterday").display_date(), "yesterday");
    }

    #[test]
    fn deserializes_server_json() {
        let entries: Vec<DiaryEntry> = serde_json::from_str(
            r#"[{"id": 3, "title": null, "content": "hi", "created_at": "2025-01-05 10:00:00", "sentiment_score": 0.8},
                {"id": 2, "title": "Two", "content": "x", "mood": "calm", "created_at": "2025-01-04 10:00:00"}]"#,
        )
        .unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].title, None);
        assert_eq!(entries[0].mood, None);
        assert_eq!(entries[1].mood.as_deref(), Some("calm"));
    }
}
