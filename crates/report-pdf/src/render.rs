//! Inspection report layout
//!
//! Sections, in order:
//! 1. Summary: title, metadata, issue counts by severity, notes and the
//!    preparer's details when present.
//! 2. Detailed findings: one table row per (item, comment) pair. Omitted
//!    when the inspection has no comments.
//! 3. Photo gallery: one captioned slot per item with a photo. Omitted when
//!    no item has one.
//!
//! Every page then gets a `"{title} - {bridge} - Page i of N"` footer.

use crate::document::{Element, Font, Page, PlaceholderKind, ReportDocument, Rgb};
use crate::error::RenderError;
use crate::layout::{
    check_fits, layout_photos, layout_table_rows, GridSpec, PageGeometry, TableSpec,
};
use crate::photo::{resolve_photo, PhotoContent};
use crate::text::{text_width, truncate_to_width, wrap_text};
use inspection_types::{Inspection, InspectorProfile, Severity};
use tracing::debug;

pub const DEFAULT_TITLE: &str = "Bridge Inspection Report";

const TITLE_SIZE: f32 = 20.0;
const HEADING_SIZE: f32 = 16.0;
const BODY_SIZE: f32 = 12.0;
const TABLE_SIZE: f32 = 9.0;
const FOOTER_SIZE: f32 = 9.0;
const LINE_SPACING: f32 = 1.6;
const SECTION_GAP: f32 = 18.0;

const CELL_PADDING: f32 = 4.0;
const TABLE_LINE_HEIGHT: f32 = 11.0;
const TABLE_HEADERS: [&str; 5] = ["Section", "Category", "Comment", "Severity", "Priority"];
const COLUMN_FRACTIONS: [f32; 5] = [0.20, 0.16, 0.36, 0.14, 0.14];

#[derive(Debug, Clone)]
pub struct ReportOptions {
    pub title: String,
    pub geometry: PageGeometry,
    pub grid: GridSpec,
    /// Preparer details printed on the summary page
    pub profile: Option<InspectorProfile>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            geometry: PageGeometry::default(),
            grid: GridSpec::default(),
            profile: None,
        }
    }
}

impl ReportOptions {
    pub fn validate(&self) -> Result<(), RenderError> {
        check_fits(&self.geometry, &self.grid)
    }
}

/// Sequential drawing surface that opens pages as content overflows
struct Canvas {
    geometry: PageGeometry,
    pages: Vec<Page>,
    y: f32,
}

impl Canvas {
    fn new(geometry: PageGeometry) -> Self {
        Self {
            geometry,
            pages: vec![Page::default()],
            y: geometry.top(),
        }
    }

    fn current_index(&self) -> usize {
        self.pages.len() - 1
    }

    fn new_page(&mut self) {
        self.pages.push(Page::default());
        self.y = self.geometry.top();
    }

    /// Push onto the page at `index`, opening pages up to it as needed
    fn push_at(&mut self, index: usize, element: Element) {
        while self.pages.len() <= index {
            self.pages.push(Page::default());
        }
        self.pages[index].push(element);
    }

    fn push(&mut self, element: Element) {
        let index = self.current_index();
        self.pages[index].push(element);
    }

    /// Break to a new page unless `height` still fits below the cursor
    fn reserve(&mut self, height: f32) {
        if self.y + height > self.geometry.bottom() && self.y > self.geometry.top() {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        self.y += height;
    }

    fn line(&mut self, text: &str, size: f32, font: Font, color: Rgb) {
        let height = size * LINE_SPACING;
        self.reserve(height);
        self.push(Element::Text {
            x: self.geometry.left(),
            y: self.y + size,
            text: text.to_string(),
            size,
            font,
            color,
        });
        self.y += height;
    }

    fn heading(&mut self, text: &str) {
        // Keep a heading together with at least one body line
        self.reserve(HEADING_SIZE * LINE_SPACING + BODY_SIZE * LINE_SPACING);
        self.line(text, HEADING_SIZE, Font::Bold, Rgb::BLACK);
    }

    fn paragraph(&mut self, text: &str) {
        let width = self.geometry.content_width();
        for line in wrap_text(text, width, BODY_SIZE, Font::Regular) {
            self.line(&line, BODY_SIZE, Font::Regular, Rgb::BLACK);
        }
    }
}

/// Lay out the full report for one inspection
pub fn render_report(inspection: &Inspection, options: &ReportOptions) -> ReportDocument {
    let mut canvas = Canvas::new(options.geometry);

    draw_summary(&mut canvas, inspection, options);
    draw_findings(&mut canvas, inspection);
    draw_gallery(&mut canvas, inspection, &options.grid);
    draw_footers(&mut canvas, &options.title, &inspection.bridge_name);

    debug!(
        id = %inspection.id,
        pages = canvas.pages.len(),
        "Rendered inspection report"
    );

    ReportDocument {
        title: options.title.clone(),
        width: options.geometry.width,
        height: options.geometry.height,
        pages: canvas.pages,
    }
}

fn draw_summary(canvas: &mut Canvas, inspection: &Inspection, options: &ReportOptions) {
    let g = canvas.geometry;
    let title_width = text_width(&options.title, TITLE_SIZE, Font::Bold);
    canvas.push(Element::Text {
        x: ((g.width - title_width) / 2.0).max(g.left()),
        y: canvas.y + TITLE_SIZE,
        text: options.title.clone(),
        size: TITLE_SIZE,
        font: Font::Bold,
        color: Rgb::BLACK,
    });
    canvas.gap(TITLE_SIZE * 2.0);

    for line in [
        format!("Bridge: {}", inspection.bridge_name),
        format!("Location: {}", inspection.location),
        format!("Inspector: {}", inspection.inspector_name),
        format!("Date: {}", inspection.date.format("%B %-d, %Y")),
    ] {
        canvas.line(&line, BODY_SIZE, Font::Regular, Rgb::BLACK);
    }

    canvas.gap(SECTION_GAP);
    canvas.heading("Inspection Summary");
    let counts = inspection.issue_counts();
    canvas.line(
        &format!("Total inspection items: {}", inspection.items.len()),
        BODY_SIZE,
        Font::Regular,
        Rgb::BLACK,
    );
    canvas.line(
        &format!("Issues found: {}", counts.total()),
        BODY_SIZE,
        Font::Regular,
        Rgb::BLACK,
    );
    for severity in [Severity::Critical, Severity::Moderate, Severity::Minor] {
        let count = match severity {
            Severity::Critical => counts.critical,
            Severity::Moderate => counts.moderate,
            Severity::Minor => counts.minor,
        };
        canvas.line(
            &format!("{} issues: {}", severity.label(), count),
            BODY_SIZE,
            Font::Regular,
            Rgb::from_tuple(severity.color()),
        );
    }

    if !inspection.notes.trim().is_empty() {
        canvas.gap(SECTION_GAP);
        canvas.heading("Notes");
        canvas.paragraph(&inspection.notes);
    }

    if let Some(profile) = options.profile.as_ref().filter(|p| !p.is_empty()) {
        draw_profile(canvas, profile);
    }
}

fn draw_profile(canvas: &mut Canvas, profile: &InspectorProfile) {
    canvas.gap(SECTION_GAP);
    canvas.heading("Prepared By");
    for (label, value) in [
        ("Name", &profile.name),
        ("Company", &profile.company),
        ("Email", &profile.email),
    ] {
        if !value.trim().is_empty() {
            canvas.line(
                &format!("{}: {}", label, value.trim()),
                BODY_SIZE,
                Font::Regular,
                Rgb::BLACK,
            );
        }
    }

    if !profile.signature.trim().is_empty() {
        canvas.gap(BODY_SIZE);
        canvas.reserve(BODY_SIZE * LINE_SPACING * 2.0);
        canvas.line(profile.signature.trim(), BODY_SIZE, Font::Regular, Rgb::BLACK);
        let left = canvas.geometry.left();
        canvas.push(Element::Line {
            x1: left,
            y1: canvas.y - BODY_SIZE * 0.2,
            x2: left + 200.0_f32.min(canvas.geometry.content_width()),
            y2: canvas.y - BODY_SIZE * 0.2,
            color: Rgb::GRAY,
        });
        canvas.line("Signature", TABLE_SIZE, Font::Regular, Rgb::GRAY);
    }
}

/// One findings table row: section, category, comment, severity, priority
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindingRow {
    pub section: String,
    pub category: String,
    pub comment: String,
    pub severity: Severity,
    pub priority_label: String,
}

impl FindingRow {
    fn cells(&self) -> [&str; 5] {
        [
            self.section.as_str(),
            self.category.as_str(),
            self.comment.as_str(),
            self.severity.label(),
            self.priority_label.as_str(),
        ]
    }
}

/// Flatten items by their comments, preserving order
pub fn finding_rows(inspection: &Inspection) -> Vec<FindingRow> {
    inspection
        .findings()
        .map(|(item, comment)| FindingRow {
            section: item.title.clone(),
            category: item.category.as_str().to_string(),
            comment: comment.text.clone(),
            severity: comment.severity,
            priority_label: comment.priority.label().to_string(),
        })
        .collect()
}

fn column_layout(content_width: f32) -> [f32; 5] {
    COLUMN_FRACTIONS.map(|f| f * content_width)
}

fn draw_findings(canvas: &mut Canvas, inspection: &Inspection) {
    let rows = finding_rows(inspection);
    if rows.is_empty() {
        return;
    }

    canvas.new_page();
    canvas.line("Detailed Findings", HEADING_SIZE, Font::Bold, Rgb::BLACK);
    canvas.gap(4.0);

    let g = canvas.geometry;
    let widths = column_layout(g.content_width());
    let wrapped: Vec<Vec<Vec<String>>> = rows
        .iter()
        .map(|row| {
            row.cells()
                .iter()
                .zip(widths)
                .map(|(cell, width)| {
                    wrap_text(cell, width - 2.0 * CELL_PADDING, TABLE_SIZE, Font::Regular)
                })
                .collect()
        })
        .collect();
    let row_lines: Vec<usize> = wrapped
        .iter()
        .map(|cells| cells.iter().map(Vec::len).max().unwrap_or(1))
        .collect();
    let spec = TableSpec {
        header_height: TABLE_LINE_HEIGHT + 2.0 * CELL_PADDING,
        line_height: TABLE_LINE_HEIGHT,
        padding: CELL_PADDING,
    };

    let first_page = canvas.current_index();
    let start_y = canvas.y;
    let segments = layout_table_rows(&g, start_y, &spec, &row_lines);
    let mut header_page = None;

    for segment in &segments {
        let page = first_page + segment.page;
        if header_page != Some(page) {
            let y = if segment.page == 0 { start_y } else { g.top() };
            draw_table_header(canvas, page, y, &widths, spec.header_height);
            header_page = Some(page);
        }
        let row = &rows[segment.row];
        let width = g.content_width();

        if segment.row % 2 == 1 {
            canvas.push_at(
                page,
                Element::FillRect {
                    x: g.left(),
                    y: segment.y,
                    width,
                    height: segment.height,
                    color: Rgb::LIGHT_GRAY,
                },
            );
        }
        canvas.push_at(
            page,
            Element::StrokeRect {
                x: g.left(),
                y: segment.y,
                width,
                height: segment.height,
                color: Rgb::BORDER,
            },
        );

        let mut x = g.left();
        for (column, (lines, col_width)) in wrapped[segment.row].iter().zip(widths).enumerate() {
            let color = if column == 3 {
                Rgb::from_tuple(row.severity.color())
            } else {
                Rgb::BLACK
            };
            let visible = lines
                .iter()
                .enumerate()
                .skip(segment.lines.start)
                .take(segment.lines.len());
            for (n, line) in visible {
                let offset = (n - segment.lines.start) as f32 * TABLE_LINE_HEIGHT;
                canvas.push_at(
                    page,
                    Element::Text {
                        x: x + CELL_PADDING,
                        y: segment.y + CELL_PADDING + TABLE_SIZE + offset,
                        text: line.clone(),
                        size: TABLE_SIZE,
                        font: Font::Regular,
                        color,
                    },
                );
            }
            x += col_width;
        }
    }

    if let Some(last) = segments.last() {
        canvas.y = last.y + last.height;
    }
}

fn draw_table_header(
    canvas: &mut Canvas,
    page: usize,
    y: f32,
    widths: &[f32; 5],
    height: f32,
) {
    let left = canvas.geometry.left();
    canvas.push_at(
        page,
        Element::FillRect {
            x: left,
            y,
            width: canvas.geometry.content_width(),
            height,
            color: Rgb::HEADER_BLUE,
        },
    );
    let mut x = left;
    for (label, width) in TABLE_HEADERS.iter().zip(widths) {
        canvas.push_at(
            page,
            Element::Text {
                x: x + CELL_PADDING,
                y: y + CELL_PADDING + TABLE_SIZE,
                text: label.to_string(),
                size: TABLE_SIZE,
                font: Font::Bold,
                color: Rgb::WHITE,
            },
        );
        x += width;
    }
}

fn draw_gallery(canvas: &mut Canvas, inspection: &Inspection, grid: &GridSpec) {
    let photos: Vec<_> = inspection
        .items
        .iter()
        .filter_map(|item| item.photo_url.as_ref().map(|photo| (item, photo)))
        .collect();
    if photos.is_empty() {
        return;
    }

    canvas.new_page();
    canvas.line("Photo Gallery", HEADING_SIZE, Font::Bold, Rgb::BLACK);
    canvas.gap(4.0);

    let g = canvas.geometry;
    let first_page = canvas.current_index();
    let placements = layout_photos(&g, grid, canvas.y, photos.len());

    for ((item, photo), placement) in photos.iter().zip(&placements) {
        let page = first_page + placement.page;
        let (x, y) = (placement.x, placement.y);

        match resolve_photo(photo) {
            PhotoContent::Image(image) => {
                // Fit inside the slot, keeping the aspect ratio, centered
                let scale = (grid.photo_width / image.width as f32)
                    .min(grid.photo_height / image.height as f32);
                let width = image.width as f32 * scale;
                let height = image.height as f32 * scale;
                canvas.push_at(
                    page,
                    Element::Image {
                        x: x + (grid.photo_width - width) / 2.0,
                        y: y + (grid.photo_height - height) / 2.0,
                        width,
                        height,
                        image,
                    },
                );
            }
            PhotoContent::Placeholder(kind) => {
                canvas.push_at(
                    page,
                    Element::Placeholder {
                        x,
                        y,
                        width: grid.photo_width,
                        height: grid.photo_height,
                        kind,
                    },
                );
            }
        }
        canvas.push_at(
            page,
            Element::StrokeRect {
                x,
                y,
                width: grid.photo_width,
                height: grid.photo_height,
                color: Rgb::BORDER,
            },
        );

        let caption = format!("{} ({})", item.title, item.category);
        canvas.push_at(
            page,
            Element::Text {
                x,
                y: y + grid.photo_height + (grid.caption_height * 0.7).min(TABLE_SIZE + 3.0),
                text: truncate_to_width(&caption, grid.photo_width, TABLE_SIZE, Font::Regular),
                size: TABLE_SIZE,
                font: Font::Regular,
                color: Rgb::BLACK,
            },
        );
    }

    canvas.y = placements
        .last()
        .map(|p| p.y + grid.cell_height())
        .unwrap_or(canvas.y);
}

fn draw_footers(canvas: &mut Canvas, title: &str, bridge_name: &str) {
    let g = canvas.geometry;
    let total = canvas.pages.len();
    for (i, page) in canvas.pages.iter_mut().enumerate() {
        let text = format!("{} - {} - Page {} of {}", title, bridge_name, i + 1, total);
        let width = text_width(&text, FOOTER_SIZE, Font::Regular);
        page.push(Element::Text {
            x: ((g.width - width) / 2.0).max(g.left()),
            y: g.height - g.margin / 2.0,
            text,
            size: FOOTER_SIZE,
            font: Font::Regular,
            color: Rgb::GRAY,
        });
    }
}

/// Placeholder slots on a page, for callers inspecting degraded photos
pub fn placeholders(page: &Page) -> impl Iterator<Item = PlaceholderKind> + '_ {
    page.elements.iter().filter_map(|e| match e {
        Element::Placeholder { kind, .. } => Some(*kind),
        _ => None,
    })
}
