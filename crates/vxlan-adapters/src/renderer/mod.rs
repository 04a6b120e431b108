//! Template renderer adapters.

mod recording;
mod simple;

pub use recording::RecordingRenderer;
pub use simple::{SimpleRenderer, substitute};
