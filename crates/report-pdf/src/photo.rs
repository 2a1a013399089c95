//! Inline photo decoding
//!
//! Only `data:image/png;base64,...` and `data:image/jpeg;base64,...` payloads
//! carry pixels we can embed. JPEG bytes are embedded as-is (DCTDecode) after
//! reading the frame header; PNG is decoded to 8-bit RGB or gray and
//! re-compressed with Flate. Anything else resolves to a placeholder.

use crate::document::PlaceholderKind;
use crate::error::PhotoError;
use base64::Engine;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use inspection_types::{PhotoRef, PhotoSource};
use std::io::Write;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceGray,
    DeviceRgb,
    DeviceCmyk,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static [u8] {
        match self {
            ColorSpace::DeviceGray => b"DeviceGray",
            ColorSpace::DeviceRgb => b"DeviceRGB",
            ColorSpace::DeviceCmyk => b"DeviceCMYK",
        }
    }

    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceGray => 1,
            ColorSpace::DeviceRgb => 3,
            ColorSpace::DeviceCmyk => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFilter {
    Dct,
    Flate,
}

impl ImageFilter {
    pub fn pdf_name(&self) -> &'static [u8] {
        match self {
            ImageFilter::Dct => b"DCTDecode",
            ImageFilter::Flate => b"FlateDecode",
        }
    }
}

/// Encoded image stream ready to become a PDF image XObject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbeddedImage {
    pub width: u32,
    pub height: u32,
    pub color_space: ColorSpace,
    pub filter: ImageFilter,
    /// Samples are stored inverted, as Adobe writes CMYK JPEGs
    pub inverted: bool,
    pub data: Vec<u8>,
}

/// What to draw in a photo slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotoContent {
    Image(EmbeddedImage),
    Placeholder(PlaceholderKind),
}

/// Resolve a photo reference to an embeddable image or a placeholder
///
/// Never fails: decode problems become [`PlaceholderKind::ImageError`].
pub fn resolve_photo(photo: &PhotoRef) -> PhotoContent {
    match photo.source() {
        PhotoSource::Session(reference) => {
            debug!(reference, "Photo has no inline data");
            PhotoContent::Placeholder(PlaceholderKind::NoPreview)
        }
        PhotoSource::Inline { mime, payload } => match mime.to_ascii_lowercase().as_str() {
            "image/png" | "image/jpeg" | "image/jpg" => match decode_inline(mime, payload) {
                Ok(image) => PhotoContent::Image(image),
                Err(e) => {
                    warn!(mime, error = %e, "Failed to decode inline photo");
                    PhotoContent::Placeholder(PlaceholderKind::ImageError)
                }
            },
            other => {
                debug!(mime = other, "Unsupported inline photo type");
                PhotoContent::Placeholder(PlaceholderKind::NoPreview)
            }
        },
    }
}

fn decode_inline(mime: &str, payload: &str) -> Result<EmbeddedImage, PhotoError> {
    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = base64::engine::general_purpose::STANDARD.decode(compact)?;
    if mime.eq_ignore_ascii_case("image/png") {
        decode_png(&bytes)
    } else {
        decode_jpeg(&bytes)
    }
}

/// Decode a PNG into an 8-bit Flate-compressed RGB or gray image
pub fn decode_png(bytes: &[u8]) -> Result<EmbeddedImage, PhotoError> {
    let mut decoder = png::Decoder::new(bytes);
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| PhotoError::Png(e.to_string()))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| PhotoError::Png(e.to_string()))?;
    let pixels = &buf[..frame.buffer_size()];

    // PDF image XObjects have no alpha channel; drop it
    let (color_space, samples) = match frame.color_type {
        png::ColorType::Rgb => (ColorSpace::DeviceRgb, pixels.to_vec()),
        png::ColorType::Rgba => (
            ColorSpace::DeviceRgb,
            pixels
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect(),
        ),
        png::ColorType::Grayscale => (ColorSpace::DeviceGray, pixels.to_vec()),
        png::ColorType::GrayscaleAlpha => (
            ColorSpace::DeviceGray,
            pixels.chunks_exact(2).map(|px| px[0]).collect(),
        ),
        png::ColorType::Indexed => {
            return Err(PhotoError::Png("palette was not expanded".to_string()))
        }
    };

    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(&samples)?;
    let data = encoder.finish()?;

    Ok(EmbeddedImage {
        width: frame.width,
        height: frame.height,
        color_space,
        filter: ImageFilter::Flate,
        inverted: false,
        data,
    })
}

/// Read the JPEG frame header and wrap the bytes for DCTDecode
pub fn decode_jpeg(bytes: &[u8]) -> Result<EmbeddedImage, PhotoError> {
    if bytes.len() < 4 || bytes[0] != 0xFF || bytes[1] != 0xD8 {
        return Err(PhotoError::Jpeg("missing SOI marker".to_string()));
    }

    let mut adobe = false;
    let mut pos = 2;
    while pos + 4 <= bytes.len() {
        if bytes[pos] != 0xFF {
            return Err(PhotoError::Jpeg(format!("expected marker at offset {}", pos)));
        }
        let marker = bytes[pos + 1];
        match marker {
            // Fill bytes
            0xFF => {
                pos += 1;
                continue;
            }
            // Standalone markers without a length
            0x01 | 0xD0..=0xD7 => {
                pos += 2;
                continue;
            }
            0xD9 | 0xDA => break,
            _ => {}
        }

        let length = u16::from_be_bytes([bytes[pos + 2], bytes[pos + 3]]) as usize;
        if length < 2 || pos + 2 + length > bytes.len() {
            return Err(PhotoError::Jpeg(format!(
                "segment at offset {} overruns the data",
                pos
            )));
        }

        // APP14 "Adobe" marks CMYK samples as stored inverted
        if marker == 0xEE && bytes[pos + 4..pos + 2 + length].starts_with(b"Adobe") {
            adobe = true;
        }

        let is_frame_header =
            matches!(marker, 0xC0..=0xCF) && !matches!(marker, 0xC4 | 0xC8 | 0xCC);
        if is_frame_header {
            let segment = &bytes[pos + 4..pos + 2 + length];
            if segment.len() < 6 {
                return Err(PhotoError::Jpeg("truncated frame header".to_string()));
            }
            let height = u16::from_be_bytes([segment[1], segment[2]]) as u32;
            let width = u16::from_be_bytes([segment[3], segment[4]]) as u32;
            let color_space = match segment[5] {
                1 => ColorSpace::DeviceGray,
                3 => ColorSpace::DeviceRgb,
                4 => ColorSpace::DeviceCmyk,
                n => return Err(PhotoError::Jpeg(format!("unsupported component count {}", n))),
            };
            if width == 0 || height == 0 {
                return Err(PhotoError::Jpeg("zero image dimension".to_string()));
            }
            return Ok(EmbeddedImage {
                width,
                height,
                color_space,
                filter: ImageFilter::Dct,
                inverted: adobe && color_space == ColorSpace::DeviceCmyk,
                data: bytes.to_vec(),
            });
        }

        pos += 2 + length;
    }

    Err(PhotoError::Jpeg("no frame header found".to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Encode a small solid-color PNG
    pub(crate) fn png_bytes(width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
        let channels = match color {
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Indexed => 1,
        };
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            let data = vec![128u8; (width * height) as usize * channels];
            writer.write_image_data(&data).unwrap();
        }
        out
    }

    /// Minimal JPEG prefix: SOI, an APP0 segment, then a baseline frame header
    pub(crate) fn jpeg_bytes(width: u16, height: u16) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        out.extend_from_slice(&[0xFF, 0xE0, 0x00, 0x06, b'J', b'F', b'I', b'F']);
        out.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x11, 0x08]);
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(&width.to_be_bytes());
        out.push(3);
        out.extend_from_slice(&[1, 0x22, 0, 2, 0x11, 1, 3, 0x11, 1]);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }

    /// Four-component JPEG prefix, optionally with an Adobe APP14 segment
    pub(crate) fn cmyk_jpeg_bytes(width: u16, height: u16, adobe: bool) -> Vec<u8> {
        let mut out = vec![0xFF, 0xD8];
        if adobe {
            out.extend_from_slice(&[0xFF, 0xEE, 0x00, 0x0E]);
            out.extend_from_slice(b"Adobe");
            out.extend_from_slice(&[0x00, 0x64, 0x00, 0x00, 0x00, 0x00, 0x02]);
        }
        out.extend_from_slice(&[0xFF, 0xC0, 0x00, 0x14, 0x08]);
        out.extend_from_slice(&height.to_be_bytes());
        out.extend_from_slice(&width.to_be_bytes());
        out.push(4);
        out.extend_from_slice(&[1, 0x11, 0, 2, 0x11, 0, 3, 0x11, 0, 4, 0x11, 0]);
        out.extend_from_slice(&[0xFF, 0xD9]);
        out
    }

    fn data_url(mime: &str, bytes: &[u8]) -> PhotoRef {
        PhotoRef::inline(mime, &base64::engine::general_purpose::STANDARD.encode(bytes))
    }

    #[test]
    fn test_png_rgba_drops_alpha() {
        let image = decode_png(&png_bytes(4, 3, png::ColorType::Rgba)).unwrap();
        assert_eq!((image.width, image.height), (4, 3));
        assert_eq!(image.color_space, ColorSpace::DeviceRgb);
        assert_eq!(image.filter, ImageFilter::Flate);

        let mut inflated = Vec::new();
        let mut decoder = flate2::read::ZlibDecoder::new(image.data.as_slice());
        std::io::Read::read_to_end(&mut decoder, &mut inflated).unwrap();
        assert_eq!(inflated.len(), 4 * 3 * 3);
    }

    #[test]
    fn test_png_gray() {
        let image = decode_png(&png_bytes(2, 2, png::ColorType::Grayscale)).unwrap();
        assert_eq!(image.color_space, ColorSpace::DeviceGray);
    }

    #[test]
    fn test_jpeg_header_parsed() {
        let image = decode_jpeg(&jpeg_bytes(640, 480)).unwrap();
        assert_eq!((image.width, image.height), (640, 480));
        assert_eq!(image.color_space, ColorSpace::DeviceRgb);
        assert_eq!(image.filter, ImageFilter::Dct);
    }

    #[test]
    fn test_adobe_cmyk_jpeg_is_inverted() {
        let image = decode_jpeg(&cmyk_jpeg_bytes(32, 16, true)).unwrap();
        assert_eq!((image.width, image.height), (32, 16));
        assert_eq!(image.color_space, ColorSpace::DeviceCmyk);
        assert!(image.inverted);

        let plain = decode_jpeg(&cmyk_jpeg_bytes(32, 16, false)).unwrap();
        assert_eq!(plain.color_space, ColorSpace::DeviceCmyk);
        assert!(!plain.inverted);
        assert!(!decode_jpeg(&jpeg_bytes(32, 16)).unwrap().inverted);
    }

    #[test]
    fn test_jpeg_without_frame_header_fails() {
        assert!(decode_jpeg(&[0xFF, 0xD8, 0xFF, 0xD9]).is_err());
        assert!(decode_jpeg(b"GIF89a").is_err());
    }

    #[test]
    fn test_resolve_inline_png() {
        let photo = data_url("image/png", &png_bytes(3, 3, png::ColorType::Rgb));
        assert!(matches!(resolve_photo(&photo), PhotoContent::Image(_)));
    }

    #[test]
    fn test_resolve_session_reference_is_placeholder() {
        let photo = PhotoRef::new("blob:http://localhost:8080/5f2c");
        assert_eq!(
            resolve_photo(&photo),
            PhotoContent::Placeholder(PlaceholderKind::NoPreview)
        );
    }

    #[test]
    fn test_resolve_unsupported_mime_is_placeholder() {
        let photo = data_url("image/gif", b"GIF89a");
        assert_eq!(
            resolve_photo(&photo),
            PhotoContent::Placeholder(PlaceholderKind::NoPreview)
        );
    }

    #[test]
    fn test_resolve_corrupt_data_is_image_error() {
        let bad_base64 = PhotoRef::inline("image/png", "!!!not base64!!!");
        assert_eq!(
            resolve_photo(&bad_base64),
            PhotoContent::Placeholder(PlaceholderKind::ImageError)
        );
        let bad_png = data_url("image/png", b"\x89PNG\r\n\x1a\ngarbage");
        assert_eq!(
            resolve_photo(&bad_png),
            PhotoContent::Placeholder(PlaceholderKind::ImageError)
        );
        let bad_jpeg = data_url("image/jpeg", b"\xFF\xD8\xFF\xE0\x7F\xFF");
        assert_eq!(
            resolve_photo(&bad_jpeg),
            PhotoContent::Placeholder(PlaceholderKind::ImageError)
        );
    }
}
