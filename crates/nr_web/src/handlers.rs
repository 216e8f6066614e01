use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use nr_core::{Error, HistoryRecord, NewsQuery, ResearchReport, Sentiment};
use nr_export::{report, render_pdf};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
    pub num_articles: Option<usize>,
    pub country: Option<String>,
    pub language: Option<String>,
}

impl ResearchRequest {
    pub fn to_news_query(&self) -> NewsQuery {
        let mut query = NewsQuery::new(self.query.clone());
        if let Some(n) = self.num_articles {
            query = query.with_max_results(n);
        }
        if let Some(country) = &self.country {
            query = query.with_country(country);
        }
        if let Some(language) = &self.language {
            query = query.with_language(language);
        }
        query
    }
}

#[derive(Debug, Serialize)]
pub struct ResearchResponse {
    #[serde(flatten)]
    pub report: ResearchReport,
    pub overall_sentiment: Sentiment,
    pub outlook: &'static str,
    /// Ready-made body for exporting the per-article summaries.
    pub per_article_text: String,
}

pub async fn research(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, ApiError> {
    let query = request.to_news_query();
    // Runs on its own task; dropping the request does not cancel it.
    let run = tokio::spawn(async move {
        let _run = state.run_lock.lock().await;
        state.pipeline.run(&query).await
    });
    let report = run
        .await
        .map_err(|e| Error::Task(format!("Research run failed: {}", e)))??;

    let overall_sentiment = report.overall_sentiment();
    Ok(Json(ResearchResponse {
        overall_sentiment,
        outlook: report::outlook_label(overall_sentiment),
        per_article_text: report::per_article_text(&report.summaries),
        report,
    }))
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub keyword: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub total: usize,
    pub records: Vec<HistoryRecord>,
}

pub async fn list_history(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HistoryParams>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let total = state.history.count().await?;
    let keyword = params.keyword.unwrap_or_default();
    let records = match params.limit {
        Some(limit) => state.history.recent_matching(&keyword, limit).await?,
        None => state.history.filter(&keyword).await?,
    };

    Ok(Json(HistoryResponse { total, records }))
}

pub async fn clear_history(State(state): State<Arc<AppState>>) -> Result<StatusCode, ApiError> {
    state.history.clear().await?;
    tracing::info!("🧹 History cleared");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn export_history(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let records = state.history.load_all().await?;
    let bytes = render_pdf(report::HISTORY_TITLE, &report::history_text(&records))?;
    Ok(pdf_response("query_history.pdf", bytes))
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub title: String,
    pub body: String,
    pub filename: Option<String>,
}

pub async fn export_pdf(Json(request): Json<ExportRequest>) -> Result<Response, ApiError> {
    let bytes = render_pdf(&request.title, &request.body)?;
    let filename = request.filename.unwrap_or_else(|| "summary.pdf".to_string());
    Ok(pdf_response(&filename, bytes))
}

fn pdf_response(filename: &str, bytes: Vec<u8>) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        filename.replace(['"', '\\', '\r', '\n'], "")
    );
    (
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}
