pub mod embed;
pub mod utils;

pub use embed::{print_embed, print_outcome, render_embed};
pub use utils::{truncate, format_priority, format_relative_time, format_date, progress_percentage};
