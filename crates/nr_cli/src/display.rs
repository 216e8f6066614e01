use nr_core::{Article, ArticleSummary, HistoryRecord, ResearchReport, Sentiment};
use nr_export::report as text;

fn sentiment_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "🟢",
        Sentiment::Negative => "🔴",
        Sentiment::Neutral => "🔵",
    }
}

fn outlook_marker(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "📈",
        Sentiment::Negative => "📉",
        Sentiment::Neutral => "⚖️",
    }
}

pub fn render_articles(articles: &[Article]) -> String {
    let mut out = String::from("📰 Latest Articles\n\n");
    for (i, article) in articles.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", i + 1, article.title));
        if !article.description.is_empty() {
            out.push_str(&format!("   {}\n", article.description));
        }
        if !article.url.is_empty() {
            out.push_str(&format!("   🔗 {}\n", article.url));
        }
        out.push('\n');
    }
    out
}

pub fn render_summaries(summaries: &[ArticleSummary]) -> String {
    let mut out = String::from("📝 AI Summaries for Each Article\n\n");
    for summary in summaries {
        out.push_str(sentiment_marker(summary.sentiment));
        out.push(' ');
        out.push_str(&text::per_article_block(summary));
    }
    out
}

pub fn render_overall(research: &ResearchReport) -> String {
    let sentiment = research.overall_sentiment();
    format!(
        "📌 AI Overall Research Summary\n\n{} {}\n\n{}\n",
        outlook_marker(sentiment),
        text::outlook_label(sentiment),
        research.overall_summary
    )
}

pub fn render_report(research: &ResearchReport) -> String {
    [
        render_articles(&research.articles),
        render_summaries(&research.summaries),
        render_overall(research),
    ]
    .join("")
}

pub fn render_history(records: &[HistoryRecord]) -> String {
    records.iter().map(text::history_line).collect()
}
