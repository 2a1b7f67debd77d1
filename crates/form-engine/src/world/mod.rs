//! In-memory compilation environment.

mod fonts;
mod report_world;

pub use fonts::{global_font_cache, FontCache};
pub use report_world::ReportWorld;
