pub mod pdf;
pub mod report;

pub use pdf::render_pdf;
pub use report::{history_text, outlook_label, per_article_text};
