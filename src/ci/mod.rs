//! Buildkite environment handling: the run/no-run gate and repository slug
//! resolution.

pub mod gate;
pub mod slug;

pub use gate::{CiContext, EnvError, Gate};
pub use slug::{SlugError, resolve_slug};
