//! Card layout: turns a [`CardState`] into an [`OffscreenSurface`].
//!
//! The surface is a fixed 400×500 logical-unit display list (background
//! gradient plus positioned text runs). It never touches the editing UI;
//! the [`Rasterizer`](crate::raster::Rasterizer) paints it later.

use crate::card::{Alignment, CardState, Face, Theme};

/// Surface width in logical units
pub const SURFACE_WIDTH: f32 = 400.0;
/// Surface height in logical units
pub const SURFACE_HEIGHT: f32 = 500.0;

/// Shown when the recipient is empty
pub const PLACEHOLDER_RECIPIENT: &str = "Someone Special";
/// Shown (in italics) when the message is empty
pub const PLACEHOLDER_MESSAGE: &str = "Your heartfelt message will appear here...";

const PADDING: f32 = 32.0;
const GRADIENT_ANGLE: f32 = 135.0;
const HEADING_SIZE: f32 = 20.0;
const SIGNATURE_SIZE: f32 = 16.0;
const CLOSING_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 1.5;
const BLOCK_GAP: f32 = 24.0;
/// Longer recipient names are cut after this many heading lines
const MAX_HEADING_LINES: usize = 3;
/// Marks text cut to fit; ASCII so every face has the glyphs
const ELLIPSIS: &str = "...";
/// Message sizes tried in order until the text fits
const MESSAGE_SIZES: [f32; 4] = [14.0, 12.0, 10.0, 8.0];

/// Opaque sRGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From a `0xRRGGBB` literal
    pub const fn hex(value: u32) -> Self {
        Self((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

/// Three-stop linear gradient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gradient {
    /// CSS-style angle in degrees (0 = upwards, clockwise)
    pub angle: f32,
    pub stops: [Rgb; 3],
}

impl Gradient {
    /// Start and end points of the gradient line for a `width`×`height` box,
    /// following the CSS `linear-gradient` geometry.
    pub fn endpoints(&self, width: f32, height: f32) -> ((f32, f32), (f32, f32)) {
        let radians = self.angle.to_radians();
        let (dx, dy) = (radians.sin(), -radians.cos());
        let half = (width * dx.abs() + height * dy.abs()) / 2.0;
        let (cx, cy) = (width / 2.0, height / 2.0);
        ((cx - dx * half, cy - dy * half), (cx + dx * half, cy + dy * half))
    }
}

/// Horizontal text alignment within a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Cross-axis anchor of the content box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoxAnchor {
    Start,
    Center,
    End,
}

/// Box anchor and text alignment, always derived together from one [`Alignment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub anchor: BoxAnchor,
    pub text_align: TextAlign,
}

impl Placement {
    pub fn for_alignment(alignment: Alignment) -> Self {
        let (anchor, text_align) = match alignment {
            Alignment::Left => (BoxAnchor::Start, TextAlign::Left),
            Alignment::Center => (BoxAnchor::Center, TextAlign::Center),
            Alignment::Right => (BoxAnchor::End, TextAlign::Right),
        };
        Self { anchor, text_align }
    }

    /// X coordinate text runs hang from
    fn anchor_x(&self) -> f32 {
        match self.anchor {
            BoxAnchor::Start => PADDING,
            BoxAnchor::Center => SURFACE_WIDTH / 2.0,
            BoxAnchor::End => SURFACE_WIDTH - PADDING,
        }
    }
}

/// Background gradient for a theme
pub fn theme_gradient(theme: Theme) -> Gradient {
    let stops = match theme {
        Theme::Romantic => [Rgb::hex(0xff758c), Rgb::hex(0xff7eb3), Rgb::hex(0xffb199)],
        Theme::Dark => [Rgb::hex(0x1a1a2e), Rgb::hex(0x4a1942), Rgb::hex(0x2c1320)],
        Theme::Pastel => [Rgb::hex(0xfbc2eb), Rgb::hex(0xe0c3fc), Rgb::hex(0xa6c1ee)],
    };
    Gradient {
        angle: GRADIENT_ANGLE,
        stops,
    }
}

/// Foreground colour for a theme
pub fn theme_text_color(theme: Theme) -> Rgb {
    match theme {
        Theme::Romantic => Rgb::hex(0x5a0f2e),
        Theme::Dark => Rgb::hex(0xffe4ec),
        Theme::Pastel => Rgb::hex(0x4a3b5c),
    }
}

/// Advance of one glyph as a fraction of the font size
pub fn advance_ratio(face: Face) -> f32 {
    match face {
        Face::Serif | Face::Script => 0.875,
        Face::Sans => 0.8125,
        Face::Mono | Face::Display => 1.0,
    }
}

/// One line of positioned text
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    /// Anchor x; meaning depends on `align`
    pub x: f32,
    /// Top of the line box
    pub y: f32,
    pub size: f32,
    pub face: Face,
    pub italic: bool,
    pub align: TextAlign,
}

impl TextRun {
    /// Rendered width in logical units
    pub fn width(&self) -> f32 {
        text_width(&self.text, self.size, self.face)
    }

    /// Left edge after applying alignment to the anchor
    pub fn start_x(&self) -> f32 {
        match self.align {
            TextAlign::Left => self.x,
            TextAlign::Center => self.x - self.width() / 2.0,
            TextAlign::Right => self.x - self.width(),
        }
    }
}

fn text_width(text: &str, size: f32, face: Face) -> f32 {
    text.chars().count() as f32 * size * advance_ratio(face)
}

/// Fully styled, detached card composition
#[derive(Debug, Clone, PartialEq)]
pub struct OffscreenSurface {
    pub width: f32,
    pub height: f32,
    pub background: Gradient,
    pub text_color: Rgb,
    pub placement: Placement,
    pub runs: Vec<TextRun>,
}

impl OffscreenSurface {
    /// All run texts joined by newlines
    pub fn text(&self) -> String {
        self.runs
            .iter()
            .map(|run| run.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Builds off-screen surfaces from card state.
pub struct CardRenderer;

impl CardRenderer {
    /// Lay out a card. Pure: the card is only read, placeholders live in the
    /// surface alone.
    pub fn render(card: &CardState) -> OffscreenSurface {
        let placement = Placement::for_alignment(card.alignment());
        let x = placement.anchor_x();
        let align = placement.text_align;
        let content_width = SURFACE_WIDTH - 2.0 * PADDING;
        let mut runs = Vec::new();

        let recipient = match card.recipient() {
            "" => PLACEHOLDER_RECIPIENT,
            name => name,
        };
        let heading = format!("Dear {},", recipient);
        let mut y = PADDING;
        let heading_max = chars_per_line(content_width, HEADING_SIZE, Face::Display);
        let heading_lines = clip_lines(wrap(&heading, heading_max), MAX_HEADING_LINES, heading_max);
        for line in heading_lines {
            runs.push(TextRun {
                text: line,
                x,
                y,
                size: HEADING_SIZE,
                face: Face::Display,
                italic: false,
                align,
            });
            y += HEADING_SIZE * LINE_HEIGHT;
        }

        let signature_top =
            SURFACE_HEIGHT - PADDING - (SIGNATURE_SIZE + CLOSING_SIZE) * LINE_HEIGHT;
        let message_top = y + BLOCK_GAP;
        let available = signature_top - BLOCK_GAP - message_top;

        let (text, face, italic) = match card.message() {
            "" => (PLACEHOLDER_MESSAGE, card.font().face(), true),
            message => (message, card.font().face(), false),
        };
        let (size, lines) = fit_message(text, face, content_width, available);
        let mut y = message_top;
        for line in lines {
            runs.push(TextRun {
                text: line,
                x,
                y,
                size,
                face,
                italic,
                align,
            });
            y += size * LINE_HEIGHT;
        }

        runs.push(TextRun {
            text: "With love,".to_string(),
            x,
            y: signature_top,
            size: SIGNATURE_SIZE,
            face: Face::Display,
            italic: false,
            align,
        });
        runs.push(TextRun {
            text: "Happy Valentine's Day".to_string(),
            x,
            y: signature_top + SIGNATURE_SIZE * LINE_HEIGHT,
            size: CLOSING_SIZE,
            face: Face::Display,
            italic: false,
            align,
        });

        OffscreenSurface {
            width: SURFACE_WIDTH,
            height: SURFACE_HEIGHT,
            background: theme_gradient(card.theme()),
            text_color: theme_text_color(card.theme()),
            placement,
            runs,
        }
    }
}

fn chars_per_line(width: f32, size: f32, face: Face) -> usize {
    ((width / (size * advance_ratio(face))).floor() as usize).max(1)
}

/// Largest message size whose wrapped lines fit the available height. At the
/// smallest size the text is cut to the lines that fit.
fn fit_message(text: &str, face: Face, width: f32, height: f32) -> (f32, Vec<String>) {
    for size in MESSAGE_SIZES {
        let lines = wrap(text, chars_per_line(width, size, face));
        if lines.len() as f32 * size * LINE_HEIGHT <= height {
            return (size, lines);
        }
    }

    let size = MESSAGE_SIZES[MESSAGE_SIZES.len() - 1];
    let max = chars_per_line(width, size, face);
    let max_lines = ((height / (size * LINE_HEIGHT)).floor() as usize).max(1);
    (size, clip_lines(wrap(text, max), max_lines, max))
}

/// Keep at most `max_lines`, marking a cut with an ellipsis on the last kept
/// line. `max_chars` is the line capacity.
fn clip_lines(mut lines: Vec<String>, max_lines: usize, max_chars: usize) -> Vec<String> {
    if lines.len() <= max_lines {
        return lines;
    }
    lines.truncate(max_lines);
    if let Some(last) = lines.last_mut() {
        let keep = max_chars.saturating_sub(ELLIPSIS.len());
        let mut cut: String = last.chars().take(keep).collect();
        cut.truncate(cut.trim_end().len());
        cut.push_str(ELLIPSIS);
        *last = cut;
    }
    lines
}

/// Greedy word wrap by character count. Keeps hard line breaks and splits
/// words longer than a line.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                let rest = word.split_off(max);
                lines.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }
            let needed = if line_len == 0 { word.len() } else { line_len + 1 + word.len() };
            if needed > max {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word.iter());
            line_len += word.len();
        }
        lines.push(line);
    }
    lines
}
