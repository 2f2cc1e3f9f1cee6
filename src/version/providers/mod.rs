//! Release provider implementations, one per kind of origin

pub mod command;
pub mod content;
pub mod git_tags;
pub mod http;

pub use command::CommandProvider;
pub use content::ContentQueryProvider;
pub use git_tags::GitTagsProvider;
pub use http::HttpQueryProvider;
