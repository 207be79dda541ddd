// ABOUTME: Platform configuration injection into target repositories.
// ABOUTME: Exports the target registry and the file injector.

mod error;
mod injector;
pub mod registry;

pub use error::InjectError;
pub use injector::Injector;
pub use registry::{InjectionTarget, TemplateFile, lookup};
