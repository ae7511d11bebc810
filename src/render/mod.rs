//! Region synthesis and output rendering.

mod json;
mod options;
mod selection;
mod synthesize;
mod text;

pub use json::{to_json, JsonFormat};
pub use options::RenderOptions;
pub use selection::{ScaleFactor, SelectionSet};
pub use synthesize::{synthesize, synthesize_with_options};
pub use text::to_text;
