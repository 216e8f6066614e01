pub mod fixed;
pub mod google_news;
pub(crate) mod html;

pub use fixed::StaticNewsSource;
pub use google_news::GoogleNewsSource;
