pub mod git;
pub mod selector;

pub use git::{GitError, GitStatus};
pub use selector::{DEFAULT_EXTENSIONS, DEFAULT_IGNORED_DIRS, FileSelector};
