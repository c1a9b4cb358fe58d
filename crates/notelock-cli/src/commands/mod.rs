mod edit;
mod init;
mod misc;

pub use edit::handle_edit;
pub use init::handle_init;
pub use misc::handle_completions;
