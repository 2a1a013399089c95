//! Serialize a [`ReportDocument`] with lopdf
//!
//! Text uses the standard Helvetica fonts with WinAnsiEncoding, so no font
//! program is embedded. Each photo becomes an image XObject on the page that
//! shows it.

use crate::document::{Element, Font, Page, PlaceholderKind, ReportDocument, Rgb};
use crate::error::RenderError;
use crate::photo::EmbeddedImage;
use crate::text::{encode_win_ansi, text_width};
use chrono::Utc;
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::debug;

const PLACEHOLDER_FILL: Rgb = Rgb(235, 235, 235);
const PLACEHOLDER_LABEL_SIZE: f32 = 9.0;

fn font_resource(font: Font) -> &'static [u8] {
    match font {
        Font::Regular => b"F1",
        Font::Bold => b"F2",
    }
}

fn literal(bytes: Vec<u8>) -> Object {
    Object::String(bytes, StringFormat::Literal)
}

fn name(bytes: &[u8]) -> Object {
    Object::Name(bytes.to_vec())
}

fn reals(values: &[f32]) -> Vec<Object> {
    values.iter().map(|v| Object::Real(*v)).collect()
}

fn standard_font(doc: &mut Document, base_font: &[u8]) -> ObjectId {
    doc.add_object(Dictionary::from_iter(vec![
        ("Type", name(b"Font")),
        ("Subtype", name(b"Type1")),
        ("BaseFont", name(base_font)),
        ("Encoding", name(b"WinAnsiEncoding")),
    ]))
}

fn image_xobject(doc: &mut Document, image: &EmbeddedImage) -> ObjectId {
    let mut dict = Dictionary::from_iter(vec![
        ("Type", name(b"XObject")),
        ("Subtype", name(b"Image")),
        ("Width", Object::Integer(image.width as i64)),
        ("Height", Object::Integer(image.height as i64)),
        ("ColorSpace", name(image.color_space.pdf_name())),
        ("BitsPerComponent", Object::Integer(8)),
        ("Filter", name(image.filter.pdf_name())),
    ]);
    if image.inverted {
        let decode = [1.0, 0.0].repeat(image.color_space.components());
        dict.set("Decode", Object::Array(reals(&decode)));
    }
    doc.add_object(Stream::new(dict, image.data.clone()))
}

/// Content operations for one page, in PDF user space
struct PageOps {
    height: f32,
    ops: Vec<Operation>,
    images: Vec<(Vec<u8>, ObjectId)>,
}

impl PageOps {
    fn new(height: f32) -> Self {
        Self {
            height,
            ops: Vec::new(),
            images: Vec::new(),
        }
    }

    fn flip(&self, y: f32) -> f32 {
        self.height - y
    }

    fn fill_color(&mut self, color: Rgb) {
        self.ops.push(Operation::new("rg", reals(&color.to_unit())));
    }

    fn stroke_color(&mut self, color: Rgb) {
        self.ops.push(Operation::new("RG", reals(&color.to_unit())));
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let bottom = self.flip(y + height);
        self.ops
            .push(Operation::new("re", reals(&[x, bottom, width, height])));
    }

    fn text(&mut self, x: f32, y: f32, text: &str, size: f32, font: Font, color: Rgb) {
        self.fill_color(color);
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![name(font_resource(font)), Object::Real(size)],
        ));
        let baseline = self.flip(y);
        self.ops.push(Operation::new("Td", reals(&[x, baseline])));
        self.ops
            .push(Operation::new("Tj", vec![literal(encode_win_ansi(text))]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    fn line(&mut self, x1: f32, y1: f32, x2: f32, y2: f32) {
        let (start, end) = (self.flip(y1), self.flip(y2));
        self.ops.push(Operation::new("m", reals(&[x1, start])));
        self.ops.push(Operation::new("l", reals(&[x2, end])));
        self.ops.push(Operation::new("S", vec![]));
    }

    fn placeholder(&mut self, x: f32, y: f32, width: f32, height: f32, kind: PlaceholderKind) {
        self.fill_color(PLACEHOLDER_FILL);
        self.rect(x, y, width, height);
        self.ops.push(Operation::new("f", vec![]));

        self.stroke_color(Rgb::BORDER);
        self.ops.push(Operation::new("w", vec![Object::Real(0.5)]));
        self.line(x, y, x + width, y + height);
        self.line(x + width, y, x, y + height);

        let label = kind.label();
        let label_width = text_width(label, PLACEHOLDER_LABEL_SIZE, Font::Regular);
        // Band behind the label so the cross does not strike through it
        let band_y = y + height / 2.0 - PLACEHOLDER_LABEL_SIZE;
        self.fill_color(PLACEHOLDER_FILL);
        self.rect(
            x + (width - label_width) / 2.0 - 3.0,
            band_y,
            label_width + 6.0,
            PLACEHOLDER_LABEL_SIZE * 1.6,
        );
        self.ops.push(Operation::new("f", vec![]));
        self.text(
            x + (width - label_width) / 2.0,
            y + height / 2.0 + PLACEHOLDER_LABEL_SIZE / 3.0,
            label,
            PLACEHOLDER_LABEL_SIZE,
            Font::Regular,
            Rgb::GRAY,
        );
    }

    fn element(&mut self, doc: &mut Document, element: &Element) {
        match element {
            Element::Text {
                x,
                y,
                text,
                size,
                font,
                color,
            } => self.text(*x, *y, text, *size, *font, *color),
            Element::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                self.fill_color(*color);
                self.rect(*x, *y, *width, *height);
                self.ops.push(Operation::new("f", vec![]));
            }
            Element::StrokeRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                self.stroke_color(*color);
                self.ops.push(Operation::new("w", vec![Object::Real(0.5)]));
                self.rect(*x, *y, *width, *height);
                self.ops.push(Operation::new("S", vec![]));
            }
            Element::Line {
                x1,
                y1,
                x2,
                y2,
                color,
            } => {
                self.stroke_color(*color);
                self.ops.push(Operation::new("w", vec![Object::Real(0.75)]));
                self.line(*x1, *y1, *x2, *y2);
            }
            Element::Image {
                x,
                y,
                width,
                height,
                image,
            } => {
                let resource = format!("Im{}", self.images.len() + 1).into_bytes();
                let image_id = image_xobject(doc, image);
                let bottom = self.flip(*y + *height);
                self.ops.push(Operation::new("q", vec![]));
                self.ops.push(Operation::new(
                    "cm",
                    reals(&[*width, 0.0, 0.0, *height, *x, bottom]),
                ));
                self.ops
                    .push(Operation::new("Do", vec![name(&resource)]));
                self.ops.push(Operation::new("Q", vec![]));
                self.images.push((resource, image_id));
            }
            Element::Placeholder {
                x,
                y,
                width,
                height,
                kind,
            } => self.placeholder(*x, *y, *width, *height, *kind),
        }
    }
}

fn write_page(
    doc: &mut Document,
    page: &Page,
    report: &ReportDocument,
    pages_id: ObjectId,
    fonts: &Dictionary,
) -> Result<ObjectId, RenderError> {
    let mut page_ops = PageOps::new(report.height);
    for element in &page.elements {
        page_ops.element(doc, element);
    }

    let content = Content {
        operations: page_ops.ops,
    };
    let encoded = content
        .encode()
        .map_err(|e| RenderError::PdfError(format!("Content encoding failed: {}", e)))?;
    let content_id = doc.add_object(Stream::new(Dictionary::new(), encoded));

    let mut resources = Dictionary::new();
    resources.set("Font", Object::Dictionary(fonts.clone()));
    if !page_ops.images.is_empty() {
        let xobjects = Dictionary::from_iter(
            page_ops
                .images
                .into_iter()
                .map(|(resource, id)| (resource, Object::Reference(id))),
        );
        resources.set("XObject", Object::Dictionary(xobjects));
    }

    let page_dict = Dictionary::from_iter(vec![
        ("Type", name(b"Page")),
        ("Parent", Object::Reference(pages_id)),
        (
            "MediaBox",
            Object::Array(reals(&[0.0, 0.0, report.width, report.height])),
        ),
        ("Contents", Object::Reference(content_id)),
        ("Resources", Object::Dictionary(resources)),
    ]);
    Ok(doc.add_object(page_dict))
}

/// Serialize the laid-out report to PDF bytes
pub fn write_pdf(report: &ReportDocument) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let regular = standard_font(&mut doc, b"Helvetica");
    let bold = standard_font(&mut doc, b"Helvetica-Bold");
    let fonts = Dictionary::from_iter(vec![
        ("F1", Object::Reference(regular)),
        ("F2", Object::Reference(bold)),
    ]);

    let mut page_ids = Vec::with_capacity(report.pages.len());
    for page in &report.pages {
        page_ids.push(write_page(&mut doc, page, report, pages_id, &fonts)?);
    }

    let pages = Dictionary::from_iter(vec![
        ("Type", name(b"Pages")),
        ("Count", Object::Integer(page_ids.len() as i64)),
        (
            "Kids",
            Object::Array(page_ids.iter().map(|id| Object::Reference(*id)).collect()),
        ),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", name(b"Catalog")),
        ("Pages", Object::Reference(pages_id)),
    ]));
    doc.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = doc.add_object(Dictionary::from_iter(vec![
        ("Title", literal(encode_win_ansi(&report.title))),
        ("Producer", literal(b"report-pdf".to_vec())),
        (
            "CreationDate",
            literal(Utc::now().format("D:%Y%m%d%H%M%SZ").to_string().into_bytes()),
        ),
    ]));
    doc.trailer.set("Info", Object::Reference(info_id));

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| RenderError::PdfError(format!("Save failed: {}", e)))?;

    debug!(
        pages = page_ids.len(),
        bytes = buffer.len(),
        "Serialized report PDF"
    );
    Ok(buffer)
}
