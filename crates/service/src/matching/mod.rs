pub mod prompt;
pub mod ranking;

pub use prompt::build_prompt;
pub use ranking::{rank_matches, RankingError};
