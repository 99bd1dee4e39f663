//! Request builders for each kind of generated asset.
//!
//! Each generator is a lightweight wrapper that borrows a [`Provider`]
//! and a model id, builds one request, and interprets the response.
//! None of them hold state between calls.
//!
//! [`Provider`]: crate::provider::Provider

pub mod analysis;
pub mod broll;
pub mod lifestyle;
pub mod script;
pub mod video;

pub use analysis::Analyzer;
pub use broll::BRollIdeator;
pub use lifestyle::LifestyleImageGenerator;
pub use script::ScriptWriter;
pub use video::{VideoJob, VideoJobState, VideoOrchestrator};
