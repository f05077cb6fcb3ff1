//! GitHub API service implementations.

mod issues;
mod pull_requests;
mod releases;
mod repositories;
mod search;
mod users;

pub use issues::*;
pub use pull_requests::*;
pub use releases::*;
pub use repositories::*;
pub use search::*;
pub use users::*;
