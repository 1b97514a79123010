pub mod progress;
pub mod report;

pub use progress::{create_spinner, with_spinner};
pub use report::{render_preference_saved, render_provider_list};
