mod context;
mod roll;

pub use context::CommandEnv;
pub use roll::{OutputFormat, handle_roll};
