use std::sync::Arc;

use super::table::TableFragment;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    Normal,
    Bold,
}

/// Font size is in points, everything else on the page is in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub size: f32,
    pub weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    pub const fn normal(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Normal,
            color: Color::BLACK,
        }
    }

    pub const fn bold(size: f32) -> Self {
        Self {
            size,
            weight: FontWeight::Bold,
            color: Color::BLACK,
        }
    }

    pub const fn with_color(self, color: Color) -> Self {
        Self { color, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// A single line of text. `x` is the anchor for `align`, `y` is the baseline.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCommand {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: Align,
    pub style: TextStyle,
}

/// An encoded image (PNG or JPEG) placed by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageCommand {
    pub data: Arc<[u8]>,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Text(TextCommand),
    Image(ImageCommand),
    Table(TableFragment),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    pub const A4: PageSize = PageSize {
        width: 210.0,
        height: 297.0,
    };
}

/// Vertical position in the document: a page index and a y offset on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutCursor {
    pub page: usize,
    pub y: f32,
}

impl LayoutCursor {
    pub const fn new(page: usize, y: f32) -> Self {
        Self { page, y }
    }

    pub fn advance(self, dy: f32) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    pub fn next_page(self, top: f32) -> Self {
        Self {
            page: self.page + 1,
            y: top,
        }
    }
}

/// The ordered drawing instructions for every page of a quotation.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentScript {
    pub page_size: PageSize,
    pub pages: Vec<Vec<DrawCommand>>,
}

impl DocumentScript {
    pub fn new(page_size: PageSize) -> Self {
        Self {
            page_size,
            pages: vec![Vec::new()],
        }
    }

    pub fn push(&mut self, page: usize, command: DrawCommand) {
        if self.pages.len() <= page {
            self.pages.resize_with(page + 1, Vec::new);
        }
        self.pages[page].push(command);
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn last_page(&self) -> usize {
        self.pages.len() - 1
    }

    /// Text commands of one page in drawing order.
    pub fn texts(&self, page: usize) -> impl Iterator<Item = &TextCommand> {
        self.pages
            .get(page)
            .into_iter()
            .flatten()
            .filter_map(|command| match command {
                DrawCommand::Text(text) => Some(text),
                _ => None,
            })
    }

    pub fn tables(&self) -> impl Iterator<Item = (usize, &TableFragment)> {
        self.pages.iter().enumerate().flat_map(|(page, commands)| {
            commands.iter().filter_map(move |command| match command {
                DrawCommand::Table(table) => Some((page, table)),
                _ => None,
            })
        })
    }
}
