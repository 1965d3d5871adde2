use std::sync::Arc;

use super::command::{
    Align, Color, DocumentScript, DrawCommand, ImageCommand, LayoutCursor, PageSize, TextCommand,
    TextStyle,
};
use super::table::{layout_table, Column, TableSpec, TableStyle};
use crate::config::Config;
use crate::form::{LineItem, QuotationDetails, Totals};

pub const PAGE_MARGIN: f32 = 14.0;
const TABLE_START_Y: f32 = 110.0;
const FOOTER_CLEARANCE: f32 = 35.0;
/// Depth of the totals/terms block below the table, down to its last line.
const CLOSING_BLOCK_DEPTH: f32 = 80.0;

const LOGO_X: f32 = 10.0;
const LOGO_Y: f32 = 10.0;
const LOGO_WIDTH: f32 = 50.0;
const LOGO_HEIGHT: f32 = 20.0;

pub const TABLE_HEADERS: [&str; 5] = [
    "MARK",
    "DESCRIPTION OF GOODS",
    "QUANTITY",
    "UNIT PRICE",
    "AMOUNTS",
];

/// Build the drawing script for one quotation.
pub fn assemble(
    details: &QuotationDetails,
    items: &[LineItem],
    totals: &Totals,
    config: &Config,
    logo: Option<Arc<[u8]>>,
) -> DocumentScript {
    let mut script = DocumentScript::new(PageSize::A4);

    draw_letterhead(&mut script, config, details);
    draw_title(&mut script);
    draw_client(&mut script, details);
    draw_subject(&mut script, config, details);
    let table_end = draw_items_table(&mut script, items, LayoutCursor::new(0, TABLE_START_Y));
    let anchor = closing_anchor(&script, table_end);
    let after_totals = draw_totals(&mut script, config, totals, anchor);
    draw_terms(&mut script, config, details, after_totals);
    draw_footer(&mut script, config);

    if let Some(data) = logo {
        script.push(
            0,
            DrawCommand::Image(ImageCommand {
                data,
                x: LOGO_X,
                y: LOGO_Y,
                width: LOGO_WIDTH,
                height: LOGO_HEIGHT,
            }),
        );
    }

    script
}

fn text(script: &mut DocumentScript, page: usize, x: f32, y: f32, content: String, style: TextStyle) {
    script.push(
        page,
        DrawCommand::Text(TextCommand {
            text: content,
            x,
            y,
            align: Align::Left,
            style,
        }),
    );
}

fn centered(script: &mut DocumentScript, page: usize, y: f32, content: String, style: TextStyle) {
    let x = script.page_size.width / 2.0;
    script.push(
        page,
        DrawCommand::Text(TextCommand {
            text: content,
            x,
            y,
            align: Align::Center,
            style,
        }),
    );
}

fn draw_letterhead(script: &mut DocumentScript, config: &Config, details: &QuotationDetails) {
    let letterhead = &config.letterhead;
    text(script, 0, 70.0, 15.0, letterhead.name.clone(), TextStyle::bold(12.0));
    for (i, line) in letterhead.lines.iter().enumerate() {
        let y = 20.0 + 5.0 * i as f32;
        text(script, 0, 70.0, y, line.clone(), TextStyle::normal(10.0));
    }

    text(
        script,
        0,
        150.0,
        15.0,
        format!("DATE: {}", details.date),
        TextStyle::normal(10.0),
    );
    text(script, 0, 150.0, 20.0, letterhead.reference.clone(), TextStyle::normal(10.0));
}

fn draw_title(script: &mut DocumentScript) {
    centered(script, 0, 50.0, "QUOTATION".to_string(), TextStyle::bold(14.0));
}

fn draw_client(script: &mut DocumentScript, details: &QuotationDetails) {
    let style = TextStyle::normal(12.0);
    text(script, 0, 10.0, 60.0, "To,".to_string(), style);
    text(script, 0, 10.0, 65.0, details.client_name.clone(), style);
    text(script, 0, 10.0, 70.0, details.client_address.clone(), style);
    text(script, 0, 10.0, 75.0, format!("G.S.T.: {}", details.client_gst), style);
}

fn draw_subject(script: &mut DocumentScript, config: &Config, details: &QuotationDetails) {
    text(
        script,
        0,
        10.0,
        85.0,
        format!("Subject: - {}", details.subject),
        TextStyle::bold(12.0),
    );
    let style = TextStyle::normal(12.0);
    text(script, 0, 10.0, 95.0, config.quotation.salutation.clone(), style);
    for (i, line) in config.quotation.introduction.iter().enumerate() {
        let y = 100.0 + 5.0 * i as f32;
        text(script, 0, 10.0, y, line.clone(), style);
    }
}

pub fn item_table_spec(items: &[LineItem]) -> TableSpec {
    let columns = vec![
        Column::new(TABLE_HEADERS[0], 18.0, Align::Center),
        Column::new(TABLE_HEADERS[1], 74.0, Align::Left),
        Column::new(TABLE_HEADERS[2], 26.0, Align::Right),
        Column::new(TABLE_HEADERS[3], 30.0, Align::Right),
        Column::new(TABLE_HEADERS[4], 34.0, Align::Right),
    ];
    let rows = items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            vec![
                (index + 1).to_string(),
                item.name().to_string(),
                display_quantity(item),
                display_unit_price(item),
                display_amount(item),
            ]
        })
        .collect();

    TableSpec {
        x: PAGE_MARGIN,
        columns,
        rows,
        style: TableStyle::default(),
    }
}

fn draw_items_table(script: &mut DocumentScript, items: &[LineItem], start: LayoutCursor) -> LayoutCursor {
    let spec = item_table_spec(items);
    let bottom = script.page_size.height - PAGE_MARGIN;
    let layout = layout_table(&spec, start, PAGE_MARGIN, bottom);
    for (page, fragment) in layout.fragments {
        script.push(page, DrawCommand::Table(fragment));
    }
    layout.end
}

/// Where the totals block hangs from: right under the table, or the top of a
/// fresh page when the block would run into the footer.
fn closing_anchor(script: &DocumentScript, table_end: LayoutCursor) -> LayoutCursor {
    let limit = script.page_size.height - FOOTER_CLEARANCE;
    if table_end.y + CLOSING_BLOCK_DEPTH > limit {
        table_end.next_page(PAGE_MARGIN)
    } else {
        table_end
    }
}

fn draw_totals(script: &mut DocumentScript, config: &Config, totals: &Totals, anchor: LayoutCursor) -> LayoutCursor {
    let style = TextStyle::bold(12.0);
    let lines = [
        format!("Total Amount: {}", format_money(totals.total_amount)),
        format!(
            "{} ({}%): {}",
            config.quotation.tax_label,
            format_percent(totals.tax_rate),
            format_money(totals.gst)
        ),
        format!("Grand Total: {}", format_money(totals.grand_total)),
    ];
    let mut cursor = anchor;
    for line in lines {
        cursor = cursor.advance(10.0);
        text(script, cursor.page, 10.0, cursor.y, line, style);
    }
    cursor
}

fn draw_terms(script: &mut DocumentScript, config: &Config, details: &QuotationDetails, start: LayoutCursor) {
    let bold = TextStyle::bold(12.0);
    let normal = TextStyle::normal(12.0);
    let page = start.page;

    let mut cursor = start.advance(10.0);
    text(
        script,
        page,
        10.0,
        cursor.y,
        format!(
            "1. TERMS OF PAYMENT: {}.",
            details.terms_of_payment.label().to_uppercase()
        ),
        bold,
    );
    cursor = cursor.advance(10.0);
    text(script, page, 10.0, cursor.y, "2. ACCOUNT DETAILS:".to_string(), bold);
    for line in config.bank.lines() {
        cursor = cursor.advance(5.0);
        text(script, page, 10.0, cursor.y, line, normal);
    }
    cursor = cursor.advance(5.0);
    text(
        script,
        page,
        10.0,
        cursor.y,
        format!("3. {}", config.quotation.validity),
        bold,
    );
}

fn draw_footer(script: &mut DocumentScript, config: &Config) {
    let page = script.last_page();
    let height = script.page_size.height;
    centered(
        script,
        page,
        height - 30.0,
        config.footer.warranty.clone(),
        TextStyle::bold(10.0).with_color(Color::RED),
    );
    for (i, line) in config.footer.contact.iter().enumerate() {
        let y = height - 20.0 + 10.0 * i as f32;
        centered(script, page, y, line.clone(), TextStyle::bold(10.0));
    }
}

/// Two fractional digits, never a negative zero.
pub fn format_money(value: f64) -> String {
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{value:.2}")
}

/// `0.18` -> `"18"`, `0.0825` -> `"8.25"`.
pub fn format_percent(rate: f64) -> String {
    let percent = rate * 100.0;
    let formatted = format!("{percent:.2}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

fn display_quantity(item: &LineItem) -> String {
    if item.quantity().trim().is_empty() {
        return String::new();
    }
    format!("{}", item.quantity_value())
}

fn display_unit_price(item: &LineItem) -> String {
    if item.unit_price().trim().is_empty() {
        return String::new();
    }
    format_money(item.unit_price_value())
}

fn display_amount(item: &LineItem) -> String {
    if item.quantity().trim().is_empty() && item.unit_price().trim().is_empty() {
        return String::new();
    }
    format_money(item.amount())
}
