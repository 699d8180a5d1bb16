//! Turns an analysis payload into the text shown in the analysis panel.

use crate::api::AnalysisSummary;
use chrono::NaiveDate;

pub const EMPTY_PROMPT: &str = "Start writing entries to see your insights!";
pub const LOAD_FAILED: &str = "Failed to load analysis data.";
pub const TREND_HEADING: &str = "Recent Sentiment Trend (Last 7 Days)";
const UNKNOWN_DATE: &str = "Unknown date";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SentimentBand {
    VeryPositive,
    Positive,
    Neutral,
    NeedsSupport,
}

impl SentimentBand {
    /// Lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.7 {
            SentimentBand::VeryPositive
        } else if score >= 0.5 {
            SentimentBand::Positive
        } else if score >= 0.3 {
            SentimentBand::Neutral
        } else {
            SentimentBand::NeedsSupport
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SentimentBand::VeryPositive => "Very Positive 😊",
            SentimentBand::Positive => "Positive 😌",
            SentimentBand::Neutral => "Neutral 😐",
            SentimentBand::NeedsSupport => "Needs Support 💚",
        }
    }
}

pub fn sentiment_description(score: f64) -> &'static str {
    SentimentBand::from_score(score).description()
}

/// Defined for every input; unknown or missing moods get 💭.
pub fn mood_emoji(mood: Option<&str>) -> &'static str {
    match mood {
        Some("happy") => "😊",
        Some("calm") => "😌",
        Some("neutral") => "😐",
        Some("sad") => "😢",
        Some("anxious") => "😰",
        Some("tired") => "😴",
        Some("energetic") => "⚡",
        Some("grateful") => "🙏",
        _ => "💭",
    }
}

pub fn percentage(score: f64) -> i64 {
    (score * 100.0).round() as i64
}

/// `Jan 5`; anything unparsable is shown as received.
fn trend_date(raw: &str) -> String {
    let day = raw.get(..10).unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map(|d| d.format("%b %-d").to_string())
        .unwrap_or_else(|_| raw.to_string())
}

#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisView {
    Empty,
    Report(AnalysisReport),
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub total_entries: u64,
    pub sentiment_percent: i64,
    pub sentiment_description: &'static str,
    pub moods: Vec<String>,
    pub trends: Vec<String>,
}

impl AnalysisView {
    pub fn from_summary(summary: &AnalysisSummary) -> Self {
        // Only an explicit zero is the empty state; a missing count still shows the cards.
        if summary.total_entries == Some(0) {
            return AnalysisView::Empty;
        }
        let total_entries = summary.total_entries.unwrap_or(0);

        let moods = summary
            .mood_distribution
            .iter()
            .flatten()
            .map(|m| {
                format!(
                    "{} {}: {} entries",
                    mood_emoji(m.mood.as_deref()),
                    m.mood.as_deref().filter(|s| !s.is_empty()).unwrap_or("Not specified"),
                    m.count.unwrap_or(0)
                )
            })
            .collect();

        let trends = summary
            .sentiment_trends
            .iter()
            .flatten()
            .map(|t| {
                format!(
                    "{}: {}% ({} entries)",
                    t.entry_date.as_deref().map_or_else(|| UNKNOWN_DATE.to_string(), trend_date),
                    percentage(t.avg_sentiment.unwrap_or(0.0)),
                    t.entry_count.unwrap_or(0)
                )
            })
            .collect();

        AnalysisView::Report(AnalysisReport {
            total_entries,
            sentiment_percent: summary.avg_sentiment.map(percentage).unwrap_or(0),
            sentiment_description: sentiment_description(summary.avg_sentiment.unwrap_or(0.5)),
            moods,
            trends,
        })
    }
}
