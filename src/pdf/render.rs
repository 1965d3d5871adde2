use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};

use super::metrics::text_width;
use super::PdfRenderer;
use crate::document::{
    Align, Color, DocumentScript, DrawCommand, FontWeight, ImageCommand, TableFragment,
    TextCommand, TextStyle,
};
use crate::error::{QuoteError, Result};

const PT_PER_MM: f32 = 72.0 / 25.4;
const REGULAR_FONT: &str = "F1";
const BOLD_FONT: &str = "F2";

fn pt(mm: f32) -> f32 {
    mm * PT_PER_MM
}

/// Renders a [`DocumentScript`] with `lopdf`, using the builtin Helvetica faces.
#[derive(Debug, Default, Clone)]
pub struct LopdfRenderer;

impl LopdfRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl PdfRenderer for LopdfRenderer {
    fn render(&self, script: &DocumentScript) -> Result<Vec<u8>> {
        let mut document = Document::with_version("1.7");
        let pages_id = document.new_object_id();

        let regular_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });
        let bold_id = document.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
            "Encoding" => "WinAnsiEncoding",
        });

        // Images are embedded once each, named in order of appearance.
        let mut xobjects = Dictionary::new();
        let mut image_names = Vec::new();
        for command in script.pages.iter().flatten() {
            if let DrawCommand::Image(image) = command {
                let name = format!("Im{}", image_names.len() + 1);
                let id = embed_image(&mut document, image)?;
                xobjects.set(name.as_bytes(), id);
                image_names.push(name);
            }
        }

        let resources_id = document.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR_FONT => regular_id,
                BOLD_FONT => bold_id,
            },
            "XObject" => xobjects,
        });

        let page_width = pt(script.page_size.width);
        let page_height = pt(script.page_size.height);
        let mut images = image_names.into_iter();
        let mut page_ids = Vec::with_capacity(script.pages.len());

        for commands in &script.pages {
            let mut page = PageContext::new(page_height);
            for command in commands {
                match command {
                    DrawCommand::Text(text) => page.draw_text(text),
                    DrawCommand::Table(table) => page.draw_table(table),
                    DrawCommand::Image(image) => {
                        let name = images
                            .next()
                            .ok_or_else(|| QuoteError::Render("image not embedded".into()))?;
                        page.draw_image(image, &name);
                    }
                }
            }

            let mut stream = Stream::new(Dictionary::new(), page.finish().encode()?);
            stream.compress()?;
            let content_id = document.add_object(stream);

            let page_id = document.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), page_width.into(), page_height.into()],
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            page_ids.push(page_id);
        }

        let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
        document.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => page_ids.len() as i64,
            }),
        );
        let catalog_id = document.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        document.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

fn embed_image(document: &mut Document, image: &ImageCommand) -> Result<ObjectId> {
    let decoded = image::load_from_memory(&image.data)?;
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
    };

    if decoded.color().has_alpha() {
        let alpha: Vec<u8> = decoded.to_rgba8().pixels().map(|p| p.0[3]).collect();
        let mut mask = Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => width as i64,
                "Height" => height as i64,
                "ColorSpace" => "DeviceGray",
                "BitsPerComponent" => 8,
            },
            alpha,
        );
        mask.compress()?;
        let mask_id = document.add_object(mask);
        dict.set("SMask", mask_id);
    }

    let mut stream = Stream::new(dict, rgb.into_raw());
    stream.compress()?;
    Ok(document.add_object(stream))
}

struct PageContext {
    page_height: f32,
    content: Content,
    state: PageRenderState,
}

#[derive(Default)]
struct PageRenderState {
    font: Option<(FontWeight, f32)>,
    fill: Option<Color>,
}

impl PageContext {
    fn new(page_height: f32) -> Self {
        Self {
            page_height,
            content: Content { operations: vec![] },
            state: PageRenderState::default(),
        }
    }

    fn finish(self) -> Content {
        self.content
    }

    fn push(&mut self, operator: &str, operands: Vec<Object>) {
        self.content.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, weight: FontWeight, size: f32) {
        if self.state.font != Some((weight, size)) {
            let name = match weight {
                FontWeight::Normal => REGULAR_FONT,
                FontWeight::Bold => BOLD_FONT,
            };
            self.push("Tf", vec![name.into(), size.into()]);
            self.state.font = Some((weight, size));
        }
    }

    fn set_fill_color(&mut self, color: Color) {
        if self.state.fill != Some(color) {
            self.push("rg", rgb_operands(color));
            self.state.fill = Some(color);
        }
    }

    fn draw_text(&mut self, text: &TextCommand) {
        self.show_text(&text.text, text.x, text.y, text.align, text.style);
    }

    fn show_text(&mut self, content: &str, x: f32, baseline: f32, align: Align, style: TextStyle) {
        if content.trim().is_empty() {
            return;
        }
        let width = text_width(content, style.size, style.weight);
        let left = match align {
            Align::Left => x,
            Align::Center => x - width / 2.0,
            Align::Right => x - width,
        };

        self.push("BT", vec![]);
        self.set_font(style.weight, style.size);
        self.set_fill_color(style.color);
        self.push("Td", vec![pt(left).into(), (self.page_height - pt(baseline)).into()]);
        self.push("Tj", vec![Object::String(to_win_ansi(content), StringFormat::Literal)]);
        self.push("ET", vec![]);
    }

    fn draw_image(&mut self, image: &ImageCommand, name: &str) {
        let bottom = self.page_height - pt(image.y + image.height);
        self.push("q", vec![]);
        self.push(
            "cm",
            vec![
                pt(image.width).into(),
                0.into(),
                0.into(),
                pt(image.height).into(),
                pt(image.x).into(),
                bottom.into(),
            ],
        );
        self.push("Do", vec![Object::Name(name.as_bytes().to_vec())]);
        self.push("Q", vec![]);
    }

    fn draw_table(&mut self, table: &TableFragment) {
        let style = table.style;
        let width = table.width();

        for row in &table.rows {
            let y = self.page_height - pt(row.bottom());
            if let Some(fill) = row.fill {
                self.set_fill_color(fill);
                self.push("re", vec![pt(table.x).into(), y.into(), pt(width).into(), pt(row.height).into()]);
                self.push("f", vec![]);
            }

            self.push("w", vec![pt(style.line_width).into()]);
            self.push("RG", rgb_operands(style.line_color));
            let mut cell_x = table.x;
            for (column_width, _) in &table.columns {
                self.push(
                    "re",
                    vec![pt(cell_x).into(), y.into(), pt(*column_width).into(), pt(row.height).into()],
                );
                cell_x += column_width;
            }
            self.push("S", vec![]);

            let text_style = if row.header {
                TextStyle::bold(style.font_size).with_color(style.head_text)
            } else {
                TextStyle::normal(style.font_size).with_color(style.body_text)
            };
            let mut cell_x = table.x;
            for ((column_width, align), lines) in table.columns.iter().zip(&row.cells) {
                let anchor = match align {
                    Align::Left => cell_x + style.cell_padding,
                    Align::Center => cell_x + column_width / 2.0,
                    Align::Right => cell_x + column_width - style.cell_padding,
                };
                for (i, line) in lines.iter().enumerate() {
                    self.show_text(line, anchor, row.baseline(i, &style), *align, text_style);
                }
                cell_x += column_width;
            }
        }
    }
}

fn rgb_operands(color: Color) -> Vec<Object> {
    vec![
        (color.r as f32 / 255.0).into(),
        (color.g as f32 / 255.0).into(),
        (color.b as f32 / 255.0).into(),
    ]
}

/// Builtin fonts use WinAnsi; a few common typographic characters have
/// single-byte codes there. Whitespace controls become spaces; other control
/// characters, the C1 range and anything outside Latin-1 become `?`.
fn to_win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| match c {
            '\t' | '\n' | '\r' => b' ',
            '\u{20AC}' => 0x80,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            c if c.is_control() => b'?',
            c if (c as u32) <= 0xFF => c as u8,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::to_win_ansi;

    #[test]
    fn test_latin1_passes_through() {
        assert_eq!(to_win_ansi("Caf\u{e9} 10%"), b"Caf\xe9 10%".to_vec());
    }

    #[test]
    fn test_typographic_characters_map_to_win_ansi() {
        assert_eq!(to_win_ansi("\u{20AC}\u{2013}\u{201C}"), vec![0x80, 0x96, 0x93]);
    }

    #[test]
    fn test_control_characters_never_pass_through() {
        assert_eq!(to_win_ansi("12 Mill Road\nSector 5"), b"12 Mill Road Sector 5".to_vec());
        assert_eq!(to_win_ansi("a\u{0}b\u{7f}"), b"a?b?".to_vec());
        assert_eq!(to_win_ansi("\u{80}\u{9f}"), b"??".to_vec());
        assert_eq!(to_win_ansi("\u{4e2d}"), b"?".to_vec());
    }
}
