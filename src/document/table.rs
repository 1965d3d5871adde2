use super::command::{Align, Color, FontWeight, LayoutCursor};
use crate::pdf::metrics::{pt_to_mm, wrap_text};

const LINE_HEIGHT_FACTOR: f32 = 1.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TableStyle {
    pub font_size: f32,
    pub cell_padding: f32,
    pub head_fill: Color,
    pub head_text: Color,
    pub body_text: Color,
    pub alternate_fill: Color,
    pub line_color: Color,
    pub line_width: f32,
}

impl Default for TableStyle {
    fn default() -> Self {
        Self {
            font_size: 10.0,
            cell_padding: 3.0,
            head_fill: Color::BLACK,
            head_text: Color::WHITE,
            body_text: Color::BLACK,
            alternate_fill: Color::rgb(240, 240, 240),
            line_color: Color::rgb(200, 200, 200),
            line_width: 0.1,
        }
    }
}

impl TableStyle {
    pub fn line_height(&self) -> f32 {
        pt_to_mm(self.font_size) * LINE_HEIGHT_FACTOR
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: f32,
    pub align: Align,
}

impl Column {
    pub fn new(header: &str, width: f32, align: Align) -> Self {
        Self {
            header: header.to_string(),
            width,
            align,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableSpec {
    pub x: f32,
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub style: TableStyle,
}

/// A row with its cells already wrapped to their column widths.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub y: f32,
    pub height: f32,
    pub header: bool,
    pub fill: Option<Color>,
    pub cells: Vec<Vec<String>>,
}

impl PlacedRow {
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Baseline of the `line`-th wrapped line inside this row.
    pub fn baseline(&self, line: usize, style: &TableStyle) -> f32 {
        self.y + style.cell_padding + pt_to_mm(style.font_size) * 0.9 + line as f32 * style.line_height()
    }
}

/// The part of a table that lands on a single page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableFragment {
    pub x: f32,
    pub columns: Vec<(f32, Align)>,
    pub rows: Vec<PlacedRow>,
    pub style: TableStyle,
}

impl TableFragment {
    pub fn width(&self) -> f32 {
        self.columns.iter().map(|(width, _)| width).sum()
    }

    pub fn bottom(&self) -> f32 {
        self.rows.last().map(PlacedRow::bottom).unwrap_or(0.0)
    }

    pub fn body_rows(&self) -> impl Iterator<Item = &PlacedRow> {
        self.rows.iter().filter(|row| !row.header)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    pub fragments: Vec<(usize, TableFragment)>,
    /// Where the table ends; blocks drawn after the table start from here.
    pub end: LayoutCursor,
}

/// Lay out `spec` starting at `start`, breaking onto new pages (with the
/// header repeated) whenever a row would cross `bottom`.
pub fn layout_table(spec: &TableSpec, start: LayoutCursor, top: f32, bottom: f32) -> TableLayout {
    let style = spec.style;
    let headers: Vec<String> = spec.columns.iter().map(|c| c.header.clone()).collect();
    let columns: Vec<(f32, Align)> = spec.columns.iter().map(|c| (c.width, c.align)).collect();
    let new_fragment = || TableFragment {
        x: spec.x,
        columns: columns.clone(),
        rows: Vec::new(),
        style,
    };

    let mut fragments = Vec::new();
    let mut cursor = start;
    let mut fragment = new_fragment();
    cursor = place_header(&mut fragment, spec, &headers, cursor);

    for (index, row) in spec.rows.iter().enumerate() {
        let fill = (index % 2 == 0).then_some(style.alternate_fill);
        let cells = wrap_cells(spec, row, FontWeight::Normal);
        let height = row_height(&cells, &style);
        let has_body = fragment.body_rows().next().is_some();
        if cursor.y + height > bottom && has_body {
            fragments.push((cursor.page, std::mem::replace(&mut fragment, new_fragment())));
            cursor = cursor.next_page(top);
            cursor = place_header(&mut fragment, spec, &headers, cursor);
        }
        fragment.rows.push(PlacedRow {
            y: cursor.y,
            height,
            header: false,
            fill,
            cells,
        });
        cursor = cursor.advance(height);
    }
    fragments.push((cursor.page, fragment));

    TableLayout {
        fragments,
        end: cursor,
    }
}

fn place_header(
    fragment: &mut TableFragment,
    spec: &TableSpec,
    headers: &[String],
    cursor: LayoutCursor,
) -> LayoutCursor {
    let cells = wrap_cells(spec, headers, FontWeight::Bold);
    let height = row_height(&cells, &spec.style);
    fragment.rows.push(PlacedRow {
        y: cursor.y,
        height,
        header: true,
        fill: Some(spec.style.head_fill),
        cells,
    });
    cursor.advance(height)
}

fn wrap_cells(spec: &TableSpec, row: &[String], weight: FontWeight) -> Vec<Vec<String>> {
    spec.columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            let text = row.get(i).map(String::as_str).unwrap_or("");
            let available = column.width - 2.0 * spec.style.cell_padding;
            wrap_text(text, available, spec.style.font_size, weight)
        })
        .collect()
}

fn row_height(cells: &[Vec<String>], style: &TableStyle) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    lines as f32 * style.line_height() + 2.0 * style.cell_padding
}
