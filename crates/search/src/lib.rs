mod engine;
mod lookup;

pub use engine::{ResultWindow, SearchEngine};
pub use lookup::{post_by_slug, recent_posts};
