//! Page layout primitives for the worksheet.
//!
//! Layout is a list of drawing commands per page, positioned in millimetres
//! from the top-left corner (text `y` is the baseline). A `Canvas` tracks the
//! vertical cursor and starts new pages when the remaining space runs out.
//! Nothing here knows about PDF; see `render` for that.

/// A4 portrait.
pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;

/// A new page is started before a checklist item when less than this much
/// vertical space is left below the cursor. An item taller than this can
/// still run past the bottom margin; that overflow is a known gap.
pub const PAGE_BREAK_THRESHOLD_MM: f32 = 30.0;

/// Cursor position at the top of a continuation page.
pub const CONTINUATION_TOP_MM: f32 = 20.0;

const MM_PER_PT: f32 = 0.352_778;

/// Average Helvetica glyph width relative to the font size. Good enough for
/// line breaking without loading font metrics.
const AVG_GLYPH_WIDTH_EM: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

pub const BRAND_BLUE: Rgb = Rgb::new(0x25, 0x63, 0xEB);
pub const BRAND_DARK: Rgb = Rgb::new(0x1E, 0x29, 0x3B);
pub const BRAND_GRAY: Rgb = Rgb::new(0x64, 0x74, 0x8B);
pub const PRIORITY_RED: Rgb = Rgb::new(0xDC, 0x26, 0x26);
pub const WHITE: Rgb = Rgb::gray(255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Regular,
    Bold,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutCommand {
    FillRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
    },
    StrokeRect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        color: Rgb,
        thickness_mm: f32,
    },
    Text {
        x: f32,
        y: f32,
        text: String,
        size_pt: f32,
        weight: FontWeight,
        color: Rgb,
    },
    Line {
        x1: f32,
        y1: f32,
        x2: f32,
        y2: f32,
        color: Rgb,
        dotted: bool,
    },
    /// The worksheet's single preview image, scaled into the box.
    Image {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageKind {
    Cover,
    Section { section_id: String },
    /// Overflow of a section's checklist. Column headers are not repeated.
    Continuation { section_id: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub kind: PageKind,
    pub commands: Vec<LayoutCommand>,
}

impl Page {
    fn new(kind: PageKind) -> Self {
        Self {
            kind,
            commands: Vec::new(),
        }
    }

    /// All text drawn on the page, in drawing order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|c| match c {
            LayoutCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_image(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, LayoutCommand::Image { .. }))
    }
}

/// Cursor-and-page abstraction the worksheet builder draws into.
#[derive(Debug)]
pub struct Canvas {
    pages: Vec<Page>,
    cursor: f32,
}

impl Canvas {
    /// Start with one empty page of the given kind, cursor at the top edge.
    pub fn new(kind: PageKind) -> Self {
        Self {
            pages: vec![Page::new(kind)],
            cursor: 0.0,
        }
    }

    pub fn start_page(&mut self, kind: PageKind, cursor: f32) {
        self.pages.push(Page::new(kind));
        self.cursor = cursor;
    }

    pub fn draw(&mut self, command: LayoutCommand) {
        if let Some(page) = self.pages.last_mut() {
            page.commands.push(command);
        }
    }

    pub fn cursor(&self) -> f32 {
        self.cursor
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.cursor = y;
    }

    pub fn advance(&mut self, dy: f32) {
        self.cursor += dy;
    }

    /// Vertical space between the cursor and the bottom edge.
    pub fn remaining(&self) -> f32 {
        PAGE_HEIGHT_MM - self.cursor
    }

    /// Break to a continuation page if the remaining space is below the
    /// threshold. Returns whether a new page was started.
    pub fn ensure_room(&mut self) -> bool {
        if self.remaining() >= PAGE_BREAK_THRESHOLD_MM {
            return false;
        }
        let section_id = match self.pages.last().map(|p| &p.kind) {
            Some(PageKind::Section { section_id }) | Some(PageKind::Continuation { section_id }) => {
                section_id.clone()
            }
            _ => String::new(),
        };
        self.start_page(PageKind::Continuation { section_id }, CONTINUATION_TOP_MM);
        true
    }

    /// Draw one text command per line, `line_height` apart, starting at `y`.
    pub fn text_lines(
        &mut self,
        x: f32,
        y: f32,
        lines: &[String],
        size_pt: f32,
        weight: FontWeight,
        color: Rgb,
        line_height: f32,
    ) {
        for (i, line) in lines.iter().enumerate() {
            self.draw(LayoutCommand::Text {
                x,
                y: y + i as f32 * line_height,
                text: line.clone(),
                size_pt,
                weight,
                color,
            });
        }
    }

    pub fn into_pages(self) -> Vec<Page> {
        self.pages
    }
}

/// Approximate rendered width of `text` at `size_pt`.
pub fn text_width_mm(text: &str, size_pt: f32) -> f32 {
    text.chars().count() as f32 * size_pt * AVG_GLYPH_WIDTH_EM * MM_PER_PT
}

/// Greedy word wrap to `max_width_mm`. Explicit newlines are kept, words
/// longer than a line are split. Always returns at least one line.
pub fn wrap_text(text: &str, max_width_mm: f32, size_pt: f32) -> Vec<String> {
    let max_chars = ((max_width_mm / (size_pt * AVG_GLYPH_WIDTH_EM * MM_PER_PT)).floor() as usize).max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();

            while word.len() > max_chars {
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_chars);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let word: String = word.into_iter().collect();
            let needed = if current.is_empty() {
                word.chars().count()
            } else {
                current.chars().count() + 1 + word.chars().count()
            };

            if needed > max_chars && !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&word);
        }
        lines.push(current);
    }

    // Drop blank lines produced by trailing/duplicate newlines, keep one line minimum.
    let mut lines: Vec<String> = lines
        .into_iter()
        .enumerate()
        .filter(|(i, l)| *i == 0 || !l.is_empty())
        .map(|(_, l)| l)
        .collect();
    if lines.len() > 1 && lines[0].is_empty() {
        lines.remove(0);
    }
    lines
}
