//! PDF rendering of laid-out worksheet pages with `printpdf`.

use printpdf::{
    Color, FontId, Line, LinePoint, Mm, Op, PaintMode, ParsedFont, PdfDocument, PdfPage,
    PdfSaveOptions, PdfWarnMsg, Point, Polygon, PolygonRing, Pt, RawImage, TextItem,
    WindingOrder, XObjectId, XObjectTransform,
};
use tracing::{info, warn};

use super::layout::{FontWeight, LayoutCommand, Page, Rgb, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::audit::PreviewImage;
use crate::error::AuditError;

/// Embedded TrueType faces. The builtin PDF fonts only cover WinAnsi, so
/// umlauts, "ß" and bullets need a real font program.
const REGULAR_TTF: &[u8] = include_bytes!("../../assets/fonts/Helvetica.ttf");
const BOLD_TTF: &[u8] = include_bytes!("../../assets/fonts/Helvetica-Bold.ttf");

/// Dash and gap length of dotted note lines.
const DOT_MM: f32 = 1.0;
const GAP_MM: f32 = 2.0;

const LINE_THICKNESS_MM: f32 = 0.2;

struct EmbeddedImage {
    id: XObjectId,
    width_px: u32,
    height_px: u32,
}

struct Fonts {
    regular: FontId,
    bold: FontId,
}

impl Fonts {
    fn get(&self, weight: FontWeight) -> &FontId {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }
}

/// Rendered worksheet bytes.
#[derive(Debug)]
pub struct RenderedPdf {
    pub bytes: Vec<u8>,
    /// The preview was decoded and placed on a page.
    pub image_embedded: bool,
}

fn parse_font(bytes: &[u8], name: &str, warnings: &mut Vec<PdfWarnMsg>) -> Result<ParsedFont, AuditError> {
    ParsedFont::from_bytes(bytes, 0, warnings)
        .ok_or_else(|| AuditError::Export(format!("Failed to load font {}", name)))
}

/// A PDF document with fonts and the preview image registered, ready to
/// receive pages.
///
/// The image is decoded up front so the layout can leave out the preview
/// box when decoding fails.
pub struct WorksheetDocument {
    doc: PdfDocument,
    fonts: Fonts,
    image: Option<EmbeddedImage>,
    warnings: Vec<PdfWarnMsg>,
}

impl WorksheetDocument {
    pub fn new(title: &str, preview: Option<&PreviewImage>) -> Result<Self, AuditError> {
        let mut doc = PdfDocument::new(title);
        let mut warnings = Vec::new();

        let regular = parse_font(REGULAR_TTF, "Helvetica", &mut warnings)?;
        let bold = parse_font(BOLD_TTF, "Helvetica-Bold", &mut warnings)?;
        let fonts = Fonts {
            regular: doc.add_font(&regular),
            bold: doc.add_font(&bold),
        };

        let image = preview.and_then(|p| match RawImage::decode_from_bytes(&p.jpeg, &mut warnings) {
            Ok(raw) => Some(EmbeddedImage {
                id: doc.add_image(&raw),
                width_px: p.width,
                height_px: p.height,
            }),
            Err(e) => {
                warn!("Preview image could not be embedded: {}", e);
                None
            }
        });

        Ok(Self {
            doc,
            fonts,
            image,
            warnings,
        })
    }

    /// Whether a preview image is available for placement.
    pub fn has_image(&self) -> bool {
        self.image.is_some()
    }

    /// Render `pages` into PDF bytes. Image placements are skipped when no
    /// image was decoded.
    pub fn render(self, pages: &[Page]) -> RenderedPdf {
        let Self {
            mut doc,
            fonts,
            image,
            mut warnings,
        } = self;

        let pdf_pages: Vec<PdfPage> = pages
            .iter()
            .map(|page| {
                PdfPage::new(
                    Mm(PAGE_WIDTH_MM),
                    Mm(PAGE_HEIGHT_MM),
                    page_ops(page, &fonts, image.as_ref()),
                )
            })
            .collect();
        let image_embedded = image.is_some() && pages.iter().any(Page::has_image);

        let bytes = doc
            .with_pages(pdf_pages)
            .save(&PdfSaveOptions::default(), &mut warnings);

        info!(
            "Rendered worksheet: {} pages, {} bytes, image embedded: {}, {} warnings",
            pages.len(),
            bytes.len(),
            image_embedded,
            warnings.len()
        );
        RenderedPdf {
            bytes,
            image_embedded,
        }
    }
}

fn page_ops(page: &Page, fonts: &Fonts, image: Option<&EmbeddedImage>) -> Vec<Op> {
    let mut ops = Vec::new();
    for command in &page.commands {
        match command {
            LayoutCommand::FillRect {
                x,
                y,
                width,
                height,
                color,
            } => {
                ops.push(Op::SetFillColor { col: pdf_color(*color) });
                ops.push(Op::DrawPolygon {
                    polygon: rect(*x, *y, *width, *height, PaintMode::Fill),
                });
            }
            LayoutCommand::StrokeRect {
                x,
                y,
                width,
                height,
                color,
                thickness_mm,
            } => {
                ops.push(Op::SetOutlineColor { col: pdf_color(*color) });
                ops.push(Op::SetOutlineThickness {
                    pt: Mm(*thickness_mm).into(),
                });
                ops.push(Op::DrawPolygon {
                    polygon: rect(*x, *y, *width, *height, PaintMode::Stroke),
                });
            }
            LayoutCommand::Text {
                x,
                y,
                text,
                size_pt,
                weight,
                color,
            } => {
                let font = fonts.get(*weight);
                ops.push(Op::SetFillColor { col: pdf_color(*color) });
                ops.push(Op::StartTextSection);
                ops.push(Op::SetTextCursor { pos: point(*x, *y) });
                ops.push(Op::SetFontSize {
                    size: Pt(*size_pt),
                    font: font.clone(),
                });
                ops.push(Op::WriteText {
                    items: vec![TextItem::Text(text.clone())],
                    font: font.clone(),
                });
                ops.push(Op::EndTextSection);
            }
            LayoutCommand::Line {
                x1,
                y1,
                x2,
                y2,
                color,
                dotted,
            } => {
                ops.push(Op::SetOutlineColor { col: pdf_color(*color) });
                ops.push(Op::SetOutlineThickness {
                    pt: Mm(LINE_THICKNESS_MM).into(),
                });
                let segments = if *dotted {
                    dotted_segments(*x1, *y1, *x2, *y2)
                } else {
                    vec![(*x1, *y1, *x2, *y2)]
                };
                for (ax, ay, bx, by) in segments {
                    ops.push(Op::DrawLine {
                        line: Line {
                            points: vec![line_point(ax, ay), line_point(bx, by)],
                            is_closed: false,
                        },
                    });
                }
            }
            LayoutCommand::Image {
                x,
                y,
                width,
                height,
            } => {
                let Some(image) = image else { continue };
                let target_w: Pt = Mm(*width).into();
                let target_h: Pt = Mm(*height).into();
                // At 72 dpi one pixel is one point.
                ops.push(Op::UseXobject {
                    id: image.id.clone(),
                    transform: XObjectTransform {
                        translate_x: Some(Mm(*x).into()),
                        translate_y: Some(Mm(PAGE_HEIGHT_MM - *y - *height).into()),
                        scale_x: Some(target_w.0 / image.width_px.max(1) as f32),
                        scale_y: Some(target_h.0 / image.height_px.max(1) as f32),
                        dpi: Some(72.0),
                        ..Default::default()
                    },
                });
            }
        }
    }
    ops
}

/// PDF space has its origin bottom-left; layout space top-left.
fn point(x: f32, y: f32) -> Point {
    Point::new(Mm(x), Mm(PAGE_HEIGHT_MM - y))
}

fn line_point(x: f32, y: f32) -> LinePoint {
    LinePoint {
        p: point(x, y),
        bezier: false,
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32, mode: PaintMode) -> Polygon {
    Polygon {
        rings: vec![PolygonRing {
            points: vec![
                line_point(x, y),
                line_point(x + width, y),
                line_point(x + width, y + height),
                line_point(x, y + height),
            ],
        }],
        mode,
        winding_order: WindingOrder::NonZero,
    }
}

fn pdf_color(c: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        c.r as f32 / 255.0,
        c.g as f32 / 255.0,
        c.b as f32 / 255.0,
        None,
    ))
}

/// Split a straight line into short dashes.
fn dotted_segments(x1: f32, y1: f32, x2: f32, y2: f32) -> Vec<(f32, f32, f32, f32)> {
    let (dx, dy) = (x2 - x1, y2 - y1);
    let length = (dx * dx + dy * dy).sqrt();
    if length <= f32::EPSILON {
        return Vec::new();
    }
    let (ux, uy) = (dx / length, dy / length);

    let mut segments = Vec::new();
    let mut offset = 0.0;
    while offset < length {
        let end = (offset + DOT_MM).min(length);
        segments.push((x1 + ux * offset, y1 + uy * offset, x1 + ux * end, y1 + uy * end));
        offset += DOT_MM + GAP_MM;
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::screenshot::prepare_preview;
    use crate::worksheet::layout::{Canvas, PageKind, BRAND_DARK};

    #[test]
    fn test_dotted_segments_cover_line() {
        let segments = dotted_segments(0.0, 10.0, 9.0, 10.0);
        // Dashes start at 0, 3 and 6 mm.
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], (0.0, 10.0, 1.0, 10.0));
        assert_eq!(segments[2].0, 6.0);
        assert!(dotted_segments(5.0, 5.0, 5.0, 5.0).is_empty());
    }

    #[test]
    fn test_point_flips_y_axis() {
        let p = point(0.0, 0.0);
        let top: Pt = Mm(PAGE_HEIGHT_MM).into();
        assert!((p.y.0 - top.0).abs() < 0.01);
    }

    fn cover_with(text: &str) -> Vec<Page> {
        let mut canvas = Canvas::new(PageKind::Cover);
        canvas.draw(LayoutCommand::Text {
            x: 20.0,
            y: 32.0,
            text: text.to_string(),
            size_pt: 12.0,
            weight: FontWeight::Regular,
            color: BRAND_DARK,
        });
        canvas.draw(LayoutCommand::Image {
            x: 20.0,
            y: 100.0,
            width: 170.0,
            height: 100.0,
        });
        canvas.into_pages()
    }

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::DynamicImage::new_rgb8(width, height);
        let mut buffer = std::io::Cursor::new(Vec::new());
        img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_render_produces_pdf_bytes() {
        let document = WorksheetDocument::new("SEO Worksheet", None).unwrap();
        assert!(!document.has_image());

        let rendered = document.render(&cover_with("SEO WORKSHEET"));
        assert!(rendered.bytes.starts_with(b"%PDF"));
        assert!(!rendered.image_embedded);
        assert!(!contains(&rendered.bytes, b"/Subtype/Image"));
    }

    #[test]
    fn test_german_text_is_written_with_embedded_font_glyphs() {
        let text = "\u{2022} Maßnahme für Übersicht";
        let rendered = WorksheetDocument::new("SEO Worksheet", None)
            .unwrap()
            .render(&cover_with(text));
        let bytes = &rendered.bytes;

        assert!(contains(bytes, b"/Type0"));
        assert!(contains(bytes, b"/Identity-H"));
        assert!(contains(bytes, b"/ToUnicode"));

        // Glyph ids of the regular face, two bytes each, as written by the Tj
        // operand. Unmapped characters would come out as 0000.
        let font = ParsedFont::from_bytes(REGULAR_TTF, 0, &mut Vec::new()).unwrap();
        let glyphs: String = text
            .chars()
            .map(|c| {
                let gid = font
                    .lookup_glyph_index(c as u32)
                    .unwrap_or_else(|| panic!("font has no glyph for {:?}", c));
                assert_ne!(gid, 0, "glyph for {:?}", c);
                format!("{:04X}", gid)
            })
            .collect();
        assert!(contains(bytes, format!("<{}>", glyphs).as_bytes()));

        // No raw UTF-8 text under a WinAnsi builtin font.
        assert!(!contains(bytes, "Maßnahme".as_bytes()));
        assert!(!contains(bytes, b"/WinAnsiEncoding"));
    }

    #[test]
    fn test_bold_text_uses_second_font() {
        let mut canvas = Canvas::new(PageKind::Cover);
        for weight in [FontWeight::Regular, FontWeight::Bold] {
            canvas.draw(LayoutCommand::Text {
                x: 20.0,
                y: 40.0,
                text: "Notizen".to_string(),
                size_pt: 10.0,
                weight,
                color: BRAND_DARK,
            });
        }
        let fonts = Fonts {
            regular: FontId("regular".to_string()),
            bold: FontId("bold".to_string()),
        };
        let used: Vec<FontId> = page_ops(&canvas.into_pages()[0], &fonts, None)
            .into_iter()
            .filter_map(|op| match op {
                Op::WriteText { font, .. } => Some(font),
                _ => None,
            })
            .collect();
        assert_eq!(used, vec![fonts.regular.clone(), fonts.bold.clone()]);
    }

    #[test]
    fn test_preview_image_is_embedded_and_drawn() {
        let preview = prepare_preview(&png_bytes(120, 80)).unwrap();
        let document = WorksheetDocument::new("SEO Worksheet", Some(&preview)).unwrap();
        assert!(document.has_image());

        let rendered = document.render(&cover_with("SEO WORKSHEET"));
        assert!(rendered.image_embedded);
        assert!(contains(&rendered.bytes, b"/Subtype/Image"));
        assert!(contains(&rendered.bytes, b" Do"));
    }

    #[test]
    fn test_undecodable_preview_is_not_embedded() {
        let preview = PreviewImage {
            jpeg: b"<html>not a picture</html>".to_vec(),
            width: 1200,
            height: 800,
        };
        let document = WorksheetDocument::new("SEO Worksheet", Some(&preview)).unwrap();
        assert!(!document.has_image());

        let rendered = document.render(&cover_with("SEO WORKSHEET"));
        assert!(!rendered.image_embedded);
        assert!(!contains(&rendered.bytes, b"/Subtype/Image"));
    }

    #[test]
    fn test_image_without_placement_is_not_reported() {
        let preview = prepare_preview(&png_bytes(60, 40)).unwrap();
        let document = WorksheetDocument::new("SEO Worksheet", Some(&preview)).unwrap();
        let pages = Canvas::new(PageKind::Cover).into_pages();

        assert!(!document.render(&pages).image_embedded);
    }
}
