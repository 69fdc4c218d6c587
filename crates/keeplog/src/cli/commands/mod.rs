//! CLI commands

mod add;
mod create;
mod github_release;
mod release;
mod to_json;
mod validate;
mod version;

pub use add::AddCommand;
pub use create::CreateCommand;
pub use github_release::GithubReleaseCommand;
pub use release::ReleaseCommand;
pub use to_json::ToJsonCommand;
pub use validate::ValidateCommand;
pub use version::VersionCommand;
