//! Plain-text renderings shared by the terminal, the HTTP API and PDF exports.

use nr_core::{ArticleSummary, HistoryRecord, Sentiment};

pub const PER_ARTICLE_TITLE: &str = "Per-Article Summaries";
pub const OVERALL_TITLE: &str = "Overall Summary";
pub const HISTORY_TITLE: &str = "Query History";

pub const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn per_article_block(summary: &ArticleSummary) -> String {
    format!(
        "{}\n{}\nSentiment: {}\n\n",
        summary.title, summary.summary, summary.sentiment
    )
}

pub fn per_article_text(summaries: &[ArticleSummary]) -> String {
    summaries.iter().map(per_article_block).collect()
}

pub fn outlook_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "Positive Outlook",
        Sentiment::Negative => "Negative Outlook",
        Sentiment::Neutral => "Neutral Analysis",
    }
}

pub fn history_line(record: &HistoryRecord) -> String {
    format!(
        "{} - {} - {}\n\n",
        record.time.format(TIME_FORMAT),
        record.query,
        record.summary
    )
}

pub fn history_text(records: &[HistoryRecord]) -> String {
    records.iter().map(history_line).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_per_article_text() {
        let summaries = vec![
            ArticleSummary {
                title: "A".to_string(),
                url: "http://a".to_string(),
                summary: "Up. Positive".to_string(),
                sentiment: Sentiment::Positive,
            },
            ArticleSummary {
                title: "B".to_string(),
                url: "http://b".to_string(),
                summary: "Flat.".to_string(),
                sentiment: Sentiment::Neutral,
            },
        ];
        assert_eq!(
            per_article_text(&summaries),
            "A\nUp. Positive\nSentiment: Positive\n\nB\nFlat.\nSentiment: Neutral\n\n"
        );
        assert_eq!(per_article_text(&[]), "");
    }

    #[test]
    fn test_outlook_label() {
        assert_eq!(outlook_label(Sentiment::from_summary("NEGATIVE trend")), "Negative Outlook");
        assert_eq!(outlook_label(Sentiment::Neutral), "Neutral Analysis");
    }

    #[test]
    fn test_history_text() {
        let record = HistoryRecord {
            query: "rates".to_string(),
            summary: "Holding steady.".to_string(),
            time: Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap(),
        };
        assert_eq!(
            history_text(&[record.clone(), record]),
            "2024-05-01 09:30:00 - rates - Holding steady.\n\n".repeat(2)
        );
    }
}
