//! Pure pagination arithmetic
//!
//! Nothing here touches a document backend: inputs are page dimensions and
//! element sizes, outputs are `(page, x, y)` placements with pages counted
//! from the start of the section being laid out.

use crate::error::RenderError;
use std::ops::Range;

/// Page size and the content box inside it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    /// ISO A4 in points
    pub const A4: PageGeometry = PageGeometry {
        width: 595.28,
        height: 841.89,
        margin: 40.0,
    };

    pub fn left(&self) -> f32 {
        self.margin
    }

    /// Right content edge; nothing may extend past it
    pub fn right(&self) -> f32 {
        self.width - self.margin
    }

    pub fn top(&self) -> f32 {
        self.margin
    }

    /// Bottom content edge; the footer sits below it
    pub fn bottom(&self) -> f32 {
        self.height - self.margin
    }

    pub fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    pub fn content_height(&self) -> f32 {
        self.bottom() - self.top()
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::A4
    }
}

/// Photo gallery cell dimensions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    pub photo_width: f32,
    pub photo_height: f32,
    /// Band under each photo reserved for its caption
    pub caption_height: f32,
    /// Spacing between cells, horizontally and vertically
    pub gap: f32,
}

impl GridSpec {
    /// Full vertical extent of one cell (photo plus caption)
    pub fn cell_height(&self) -> f32 {
        self.photo_height + self.caption_height
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            photo_width: 160.0,
            photo_height: 120.0,
            caption_height: 18.0,
            gap: 12.0,
        }
    }
}

/// Reject geometries where a single cell could never fit on a page
pub fn check_fits(geometry: &PageGeometry, grid: &GridSpec) -> Result<(), RenderError> {
    if geometry.content_width() <= 0.0 || geometry.content_height() <= 0.0 {
        return Err(RenderError::InvalidLayout(format!(
            "margin {} leaves no content area on a {}x{} page",
            geometry.margin, geometry.width, geometry.height
        )));
    }
    if grid.photo_width <= 0.0 || grid.photo_height <= 0.0 {
        return Err(RenderError::InvalidLayout(
            "photo dimensions must be positive".to_string(),
        ));
    }
    if grid.photo_width > geometry.content_width() {
        return Err(RenderError::InvalidLayout(format!(
            "photo width {} exceeds content width {}",
            grid.photo_width,
            geometry.content_width()
        )));
    }
    if grid.cell_height() > geometry.content_height() {
        return Err(RenderError::InvalidLayout(format!(
            "photo cell height {} exceeds content height {}",
            grid.cell_height(),
            geometry.content_height()
        )));
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub page: usize,
    pub x: f32,
    pub y: f32,
}

/// Place `count` photo cells left-to-right, top-to-bottom
///
/// The first cell goes at `(left, start_y)` on page 0. A cell wraps to a new
/// row when `x + photo_width > right`, and moves to the top of a new page
/// when `y + cell_height > bottom`. A row wrap alone never starts a page.
pub fn layout_photos(
    geometry: &PageGeometry,
    grid: &GridSpec,
    start_y: f32,
    count: usize,
) -> Vec<Placement> {
    let mut placements = Vec::with_capacity(count);
    let mut page = 0;
    let mut x = geometry.left();
    let mut y = start_y;

    for _ in 0..count {
        if x + grid.photo_width > geometry.right() {
            x = geometry.left();
            y += grid.cell_height() + grid.gap;
        }
        if y + grid.cell_height() > geometry.bottom() {
            page += 1;
            x = geometry.left();
            y = geometry.top();
        }
        placements.push(Placement { page, x, y });
        x += grid.photo_width + grid.gap;
    }

    placements
}

/// Vertical metrics of a text table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableSpec {
    pub header_height: f32,
    pub line_height: f32,
    /// Space above the first and below the last line of a row
    pub padding: f32,
}

impl TableSpec {
    fn row_height(&self, lines: usize) -> f32 {
        lines as f32 * self.line_height + 2.0 * self.padding
    }
}

/// The part of one table row drawn on one page
#[derive(Debug, Clone, PartialEq)]
pub struct RowSegment {
    pub row: usize,
    pub page: usize,
    pub y: f32,
    /// Wrapped line indices of the row drawn in this segment
    pub lines: Range<usize>,
    pub height: f32,
}

/// Place table rows, given as wrapped line counts, below a header row
///
/// The header sits at `start_y` on page 0 and at the top of every later page
/// that holds a segment; rows follow it. A row that would cross the bottom
/// edge moves whole to the next page when it fits there, otherwise it is split
/// between lines and continues below the next page's header. A page never
/// ends up with a header and no rows.
pub fn layout_table_rows(
    geometry: &PageGeometry,
    start_y: f32,
    spec: &TableSpec,
    row_lines: &[usize],
) -> Vec<RowSegment> {
    let mut segments = Vec::with_capacity(row_lines.len());
    let fresh_page_y = geometry.top() + spec.header_height;
    let mut page = 0;
    let mut y = start_y + spec.header_height;

    for (row, &count) in row_lines.iter().enumerate() {
        let count = count.max(1);
        let mut first = 0;
        while first < count {
            let remaining = count - first;
            let height = spec.row_height(remaining);
            if y + height <= geometry.bottom() {
                segments.push(RowSegment {
                    row,
                    page,
                    y,
                    lines: first..count,
                    height,
                });
                y += height;
                break;
            }

            let at_page_top = y <= fresh_page_y;
            if first == 0 && !at_page_top && fresh_page_y + height <= geometry.bottom() {
                page += 1;
                y = fresh_page_y;
                continue;
            }

            let room = (geometry.bottom() - y - 2.0 * spec.padding) / spec.line_height;
            let mut fit = room.floor().max(0.0) as usize;
            if fit == 0 {
                if !at_page_top {
                    page += 1;
                    y = fresh_page_y;
                    continue;
                }
                // Not even one line fits on an empty page; overflow rather than loop
                fit = 1;
            }
            let fit = fit.min(remaining);
            let height = spec.row_height(fit);
            segments.push(RowSegment {
                row,
                page,
                y,
                lines: first..first + fit,
                height,
            });
            first += fit;
            if first < count {
                page += 1;
                y = fresh_page_y;
            } else {
                y += height;
            }
        }
    }

    segments
}
