mod root;
mod transcript;

pub use root::{health_check, root, WELCOME_MESSAGE};
pub use transcript::fetch_transcript;
