//! Bridge inspection PDF reports
//!
//! Rendering happens in two steps:
//! - `render::render_report` lays an inspection out into a [`ReportDocument`]:
//!   pages of positioned text, rectangles, images and placeholders. All page
//!   arithmetic lives in `layout` as pure functions.
//! - `writer::write_pdf` serializes that document with lopdf.
//!
//! Missing photos, undecodable images and empty sections degrade to
//! placeholders or omitted sections; only a failure to serialize the PDF is
//! reported as an error.

pub mod document;
pub mod error;
pub mod filename;
pub mod layout;
pub mod photo;
pub mod render;
pub mod text;
pub mod writer;

pub use document::{Element, Page, PlaceholderKind, ReportDocument, Rgb};
pub use error::{PhotoError, RenderError};
pub use filename::report_filename;
pub use layout::{
    layout_photos, layout_table_rows, GridSpec, PageGeometry, Placement, RowSegment, TableSpec,
};
pub use render::{render_report, ReportOptions};
pub use writer::write_pdf;

use inspection_types::Inspection;

/// A serialized report ready to be saved
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Render an inspection and serialize it to PDF bytes
pub fn generate_report(
    inspection: &Inspection,
    options: &ReportOptions,
) -> Result<RenderedReport, RenderError> {
    options.validate()?;
    let document = render_report(inspection, options);
    let bytes = write_pdf(&document)?;
    Ok(RenderedReport {
        bytes,
        page_count: document.page_count(),
    })
}
