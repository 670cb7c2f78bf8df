//! Worksheet page layout: a cover page, then one page per audit section with
//! findings and a checklist table that spills onto continuation pages.

use chrono::NaiveDate;

use super::layout::{
    wrap_text, Canvas, FontWeight, LayoutCommand, Page, PageKind, Rgb, BRAND_BLUE, BRAND_DARK,
    BRAND_GRAY, CONTENT_WIDTH_MM, MARGIN_MM, PAGE_WIDTH_MM, PRIORITY_RED, WHITE,
};
use crate::audit::{AuditData, AuditSection, ChecklistItem, Priority};

const COVER_BAND_HEIGHT_MM: f32 = 50.0;
const SECTION_BAND_HEIGHT_MM: f32 = 25.0;

const PREVIEW_WIDTH_MM: f32 = 170.0;
const PREVIEW_HEIGHT_MM: f32 = 100.0;

const BODY_LINE_HEIGHT_MM: f32 = 5.0;
const DESCRIPTION_LINE_HEIGHT_MM: f32 = 4.0;

const CHECKBOX_SIZE_MM: f32 = 6.0;
const TASK_INDENT_MM: f32 = 10.0;
/// Width kept free for the notes column right of the description.
const NOTES_RESERVE_MM: f32 = 60.0;
const NOTE_LINE_SPACING_MM: f32 = 6.0;
const NOTE_LINE_COUNT: usize = 3;
const MIN_ITEM_HEIGHT_MM: f32 = 20.0;

const HEADER_FILL: Rgb = Rgb::gray(240);
const CHECKBOX_STROKE: Rgb = Rgb::gray(100);
const NOTE_LINE: Rgb = Rgb::gray(200);
const SEPARATOR: Rgb = Rgb::gray(240);

/// Bullet prefix for executive summary lines on the cover.
pub const SUMMARY_BULLET: &str = "\u{2022} ";

/// Laid-out worksheet, ready for rendering.
#[derive(Debug, Clone)]
pub struct Worksheet {
    pub file_name: String,
    pub pages: Vec<Page>,
}

/// Lay out the worksheet for `data`.
///
/// `with_image` reserves the preview box on the cover; without it the
/// summary moves up.
pub fn build_worksheet(data: &AuditData, with_image: bool, generated_on: NaiveDate) -> Worksheet {
    let mut canvas = Canvas::new(PageKind::Cover);
    draw_cover(&mut canvas, data, with_image, generated_on);

    for section in &data.sections {
        draw_section(&mut canvas, section);
    }

    Worksheet {
        file_name: worksheet_file_name(&data.domain),
        pages: canvas.into_pages(),
    }
}

/// `SEO-Worksheet_{domain}.pdf`, with characters that are not valid in file
/// names replaced.
pub fn worksheet_file_name(domain: &str) -> String {
    let cleaned: String = domain
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim_matches(|c| c == '.' || c == '_');
    let stem = if cleaned.is_empty() { "audit" } else { cleaned };
    format!("SEO-Worksheet_{}.pdf", stem)
}

fn text(x: f32, y: f32, text: impl Into<String>, size_pt: f32, weight: FontWeight, color: Rgb) -> LayoutCommand {
    LayoutCommand::Text {
        x,
        y,
        text: text.into(),
        size_pt,
        weight,
        color,
    }
}

fn draw_cover(canvas: &mut Canvas, data: &AuditData, with_image: bool, generated_on: NaiveDate) {
    canvas.draw(LayoutCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH_MM,
        height: COVER_BAND_HEIGHT_MM,
        color: BRAND_BLUE,
    });
    canvas.draw(text(MARGIN_MM, 32.0, "SEO WORKSHEET", 24.0, FontWeight::Bold, WHITE));

    canvas.draw(text(
        MARGIN_MM,
        70.0,
        format!("Domain: {}", data.domain),
        14.0,
        FontWeight::Bold,
        BRAND_DARK,
    ));
    canvas.draw(text(
        MARGIN_MM,
        80.0,
        format!("Score: {}/100", data.overall_score),
        14.0,
        FontWeight::Bold,
        BRAND_DARK,
    ));
    canvas.draw(text(
        MARGIN_MM,
        90.0,
        format!("Erstellt am: {}", generated_on.format("%d.%m.%Y")),
        10.0,
        FontWeight::Bold,
        BRAND_GRAY,
    ));

    canvas.set_cursor(100.0);
    if with_image {
        canvas.draw(LayoutCommand::Image {
            x: MARGIN_MM,
            y: canvas.cursor(),
            width: PREVIEW_WIDTH_MM,
            height: PREVIEW_HEIGHT_MM,
        });
        canvas.advance(PREVIEW_HEIGHT_MM + 10.0);
    }

    canvas.draw(text(
        MARGIN_MM,
        canvas.cursor(),
        "Executive Summary",
        14.0,
        FontWeight::Bold,
        BRAND_BLUE,
    ));
    canvas.advance(10.0);

    for point in &data.executive_summary {
        let lines = wrap_text(&format!("{}{}", SUMMARY_BULLET, point), CONTENT_WIDTH_MM, 10.0);
        let y = canvas.cursor();
        canvas.text_lines(
            MARGIN_MM,
            y,
            &lines,
            10.0,
            FontWeight::Regular,
            BRAND_DARK,
            BODY_LINE_HEIGHT_MM,
        );
        canvas.advance(lines.len() as f32 * BODY_LINE_HEIGHT_MM);
    }
}

fn draw_section(canvas: &mut Canvas, section: &AuditSection) {
    canvas.start_page(
        PageKind::Section {
            section_id: section.id.clone(),
        },
        0.0,
    );

    canvas.draw(LayoutCommand::FillRect {
        x: 0.0,
        y: 0.0,
        width: PAGE_WIDTH_MM,
        height: SECTION_BAND_HEIGHT_MM,
        color: BRAND_DARK,
    });
    canvas.draw(text(
        MARGIN_MM,
        17.0,
        section.title.to_uppercase(),
        16.0,
        FontWeight::Bold,
        WHITE,
    ));
    canvas.draw(text(
        MARGIN_MM,
        33.0,
        format!("Status: {}  |  Score: {}/100", section.status.label(), section.score),
        10.0,
        FontWeight::Regular,
        BRAND_GRAY,
    ));

    canvas.set_cursor(40.0);
    canvas.draw(text(
        MARGIN_MM,
        canvas.cursor(),
        "Analyse-Ergebnis:",
        12.0,
        FontWeight::Bold,
        BRAND_DARK,
    ));
    canvas.advance(6.0);

    let findings = wrap_text(&section.findings, CONTENT_WIDTH_MM, 10.0);
    let y = canvas.cursor();
    canvas.text_lines(
        MARGIN_MM,
        y,
        &findings,
        10.0,
        FontWeight::Regular,
        BRAND_DARK,
        BODY_LINE_HEIGHT_MM,
    );
    canvas.advance(findings.len() as f32 * BODY_LINE_HEIGHT_MM + 15.0);

    draw_checklist_header(canvas);

    for item in &section.checklist {
        canvas.ensure_room();
        draw_checklist_item(canvas, item);
    }
}

fn draw_checklist_header(canvas: &mut Canvas) {
    let y = canvas.cursor();
    canvas.draw(LayoutCommand::FillRect {
        x: MARGIN_MM,
        y: y - 5.0,
        width: CONTENT_WIDTH_MM,
        height: 8.0,
        color: HEADER_FILL,
    });
    canvas.draw(text(
        MARGIN_MM + 2.0,
        y,
        "Maßnahme (Abhaken)",
        10.0,
        FontWeight::Bold,
        BRAND_DARK,
    ));
    canvas.draw(text(
        PAGE_WIDTH_MM - MARGIN_MM - 50.0,
        y,
        "Notizen",
        10.0,
        FontWeight::Bold,
        BRAND_DARK,
    ));
    canvas.advance(10.0);
}

fn draw_checklist_item(canvas: &mut Canvas, item: &ChecklistItem) {
    let text_x = MARGIN_MM + TASK_INDENT_MM;
    let text_width = CONTENT_WIDTH_MM - NOTES_RESERVE_MM;
    let y = canvas.cursor();

    canvas.draw(LayoutCommand::StrokeRect {
        x: MARGIN_MM,
        y,
        width: CHECKBOX_SIZE_MM,
        height: CHECKBOX_SIZE_MM,
        color: CHECKBOX_STROKE,
        thickness_mm: 0.5,
    });

    let task_lines = wrap_text(&item.task, text_width, 11.0);
    canvas.text_lines(
        text_x,
        y + 4.5,
        &task_lines,
        11.0,
        FontWeight::Bold,
        BRAND_DARK,
        BODY_LINE_HEIGHT_MM,
    );
    canvas.advance(CHECKBOX_SIZE_MM + (task_lines.len() - 1) as f32 * BODY_LINE_HEIGHT_MM);

    let y = canvas.cursor();
    let description = wrap_text(&item.description, text_width, 9.0);
    canvas.text_lines(
        text_x,
        y + 3.0,
        &description,
        9.0,
        FontWeight::Regular,
        BRAND_GRAY,
        DESCRIPTION_LINE_HEIGHT_MM,
    );

    let description_height = description.len() as f32 * DESCRIPTION_LINE_HEIGHT_MM;
    let tag_color = if item.priority == Priority::High {
        PRIORITY_RED
    } else {
        BRAND_BLUE
    };
    canvas.draw(text(
        text_x,
        y + description_height + 4.0,
        format!("PRIO: {}", item.priority.label().to_uppercase()),
        8.0,
        FontWeight::Regular,
        tag_color,
    ));

    let notes_x = PAGE_WIDTH_MM - MARGIN_MM - 55.0;
    for i in 0..NOTE_LINE_COUNT {
        let line_y = y + i as f32 * NOTE_LINE_SPACING_MM;
        canvas.draw(LayoutCommand::Line {
            x1: notes_x,
            y1: line_y,
            x2: PAGE_WIDTH_MM - MARGIN_MM,
            y2: line_y,
            color: NOTE_LINE,
            dotted: true,
        });
    }

    canvas.advance(MIN_ITEM_HEIGHT_MM.max(description_height + 12.0));

    let separator_y = canvas.cursor() - 5.0;
    canvas.draw(LayoutCommand::Line {
        x1: MARGIN_MM,
        y1: separator_y,
        x2: PAGE_WIDTH_MM - MARGIN_MM,
        y2: separator_y,
        color: SEPARATOR,
        dotted: false,
    });
}
