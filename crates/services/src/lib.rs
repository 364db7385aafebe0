#![forbid(unsafe_code)]

pub mod app_services;
pub mod autosave;
pub mod content_view;
pub mod error;
mod flows;
pub mod store;

pub use vark_core::Clock;

pub use app_services::AppServices;
pub use autosave::{AutoSaveHandle, AutoSaver, SaveStatus};
pub use content_view::{ModuleCard, ModuleView, module_overview, module_view};
pub use error::AssessmentError;
pub use store::ProgressStore;
