const TEMPLATE: &str = "You are an AI assistant helping an equity research analyst.
Summarize the following news article.

Query: {query}

Article:
{article}

Return summary in max 4 sentences and give a sentiment (Positive, Negative, Neutral).
";

/// Fills the summarization template. `article` is either one formatted
/// article or the joined per-article summaries.
pub fn summarize_prompt(query: &str, article: &str) -> String {
    // {query} precedes {article} in the template, so filling the article first
    // leaves the template's own {query} as the first match
    TEMPLATE.replacen("{article}", article, 1).replacen("{query}", query, 1)
}
