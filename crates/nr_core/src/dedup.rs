use std::collections::HashSet;

use crate::types::Article;

/// Drops articles whose trimmed title is empty or was already seen.
/// Keeps the first occurrence of every title, in input order.
pub fn dedup_articles(articles: Vec<Article>) -> Vec<Article> {
    let mut seen = HashSet::new();
    articles
        .into_iter()
        .filter(|article| {
            let title = article.title.trim();
            !title.is_empty() && seen.insert(title.to_string())
        })
        .collect()
}
