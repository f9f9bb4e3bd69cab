//! Canvas-free drawing: tools build a [`plan::DrawPlan`] and
//! [`plan::render_svg`] turns it into a document. Writing the file is the
//! caller's job.

pub mod barcode;
pub mod favicon;
pub mod placeholder;
pub mod plan;

pub use plan::{render_svg, DrawPlan, Shape};
