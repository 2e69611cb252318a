//! Wardrobe catalog export as a multi-page A4 PDF.
//!
//! Positions are laid out top-down in millimetres, the way the catalog reads,
//! and flipped to PDF's bottom-left origin only when drawing.

use crate::device::FileSink;
use crate::errors::{Error, Result};
use crate::media::DataUrl;
use crate::models::Item;
use chrono::{Local, NaiveDate, Utc};
use printpdf::image_crate::{self, DynamicImage, imageops::FilterType};
use printpdf::{
    BuiltinFont, Color, Image, ImageTransform, IndirectFontRef, Line, Mm, PdfDocument,
    PdfLayerReference, Point, Rgb,
};
use std::path::PathBuf;
use tracing::{debug, info, instrument, warn};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 10.0;

const TITLE: &str = "My Wardrobe Catalog";
const TITLE_Y: f32 = 20.0;
const DATE_Y: f32 = 28.0;

/// Top of the first entry on page one
pub const FIRST_PAGE_TOP: f32 = 40.0;
/// Top of the first entry on every later page
pub const NEXT_PAGE_TOP: f32 = 20.0;
/// Vertical space taken by one entry
pub const ENTRY_HEIGHT: f32 = 60.0;
/// An entry whose bottom would pass this starts a new page
pub const PAGE_BOTTOM_LIMIT: f32 = 280.0;

const THUMB_X: f32 = MARGIN;
const THUMB_WIDTH: f32 = 40.0;
const THUMB_HEIGHT: f32 = 50.0;
// 40x50 mm at 300 dpi
const THUMB_PIXELS: (u32, u32) = (472, 591);
const TEXT_X: f32 = 60.0;
const NOTES_WRAP: usize = 70;
const NOTES_LINE_HEIGHT: f32 = 4.5;

/// One item and the top of its slot on the page
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatalogEntry<'a> {
    /// The item drawn in this slot
    pub item: &'a Item,
    /// Distance from the top of the page, in mm
    pub top: f32,
}

/// Entries that share a page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogPage<'a> {
    /// Entries in drawing order
    pub entries: Vec<CatalogEntry<'a>>,
}

/// Page-breaking rules for the catalog
pub struct CatalogLayout;

impl CatalogLayout {
    /// Splits `items` into pages. There is always at least one page, even
    /// when the wardrobe is empty, since page one carries the title.
    #[must_use]
    pub fn paginate(items: &[Item]) -> Vec<CatalogPage<'_>> {
        let mut pages = vec![CatalogPage::default()];
        let mut top = FIRST_PAGE_TOP;

        for item in items {
            if top + ENTRY_HEIGHT > PAGE_BOTTOM_LIMIT {
                pages.push(CatalogPage::default());
                top = NEXT_PAGE_TOP;
            }
            if let Some(page) = pages.last_mut() {
                page.entries.push(CatalogEntry { item, top });
            }
            top += ENTRY_HEIGHT;
        }

        pages
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn export_error(e: impl std::fmt::Display) -> Error {
    Error::Export {
        message: e.to_string(),
    }
}

fn rgb(r: u8, g: u8, b: u8) -> Color {
    Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    ))
}

// Top-down mm to PDF user space
fn pdf_y(top: f32) -> Mm {
    Mm(PAGE_HEIGHT - top)
}

fn horizontal_line(layer: &PdfLayerReference, top: f32, from_x: f32, to_x: f32) {
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(from_x), pdf_y(top)), false),
            (Point::new(Mm(to_x), pdf_y(top)), false),
        ],
        is_closed: false,
    });
}

fn placeholder_box(layer: &PdfLayerReference, top: f32) {
    let bottom = top + THUMB_HEIGHT;
    let right = THUMB_X + THUMB_WIDTH;
    layer.add_line(Line {
        points: vec![
            (Point::new(Mm(THUMB_X), pdf_y(top)), false),
            (Point::new(Mm(right), pdf_y(top)), false),
            (Point::new(Mm(right), pdf_y(bottom)), false),
            (Point::new(Mm(THUMB_X), pdf_y(bottom)), false),
        ],
        is_closed: true,
    });
}

fn thumbnail(image: &str) -> Option<DynamicImage> {
    let data = DataUrl::parse(image).ok()?;
    match image_crate::load_from_memory(&data.data) {
        Ok(decoded) => {
            let (w, h) = THUMB_PIXELS;
            let resized = decoded.resize_exact(w, h, FilterType::Triangle);
            Some(DynamicImage::ImageRgb8(resized.to_rgb8()))
        }
        Err(e) => {
            debug!(error = %e, "Item photo not decodable, drawing placeholder");
            None
        }
    }
}

/// Greedy word wrap at `width` characters. Words longer than a line are kept
/// whole.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn draw_entry(layer: &PdfLayerReference, fonts: &Fonts, entry: &CatalogEntry<'_>) {
    let CatalogEntry { item, top } = *entry;

    match thumbnail(&item.image) {
        Some(thumb) => {
            Image::from_dynamic_image(&thumb).add_to_layer(
                layer.clone(),
                ImageTransform {
                    translate_x: Some(Mm(THUMB_X)),
                    translate_y: Some(pdf_y(top + THUMB_HEIGHT)),
                    dpi: Some(300.0),
                    ..ImageTransform::default()
                },
            );
        }
        None => {
            layer.set_outline_color(rgb(0, 0, 0));
            placeholder_box(layer, top);
            layer.set_fill_color(rgb(100, 100, 100));
            layer.use_text("No Image", 11.0, Mm(15.0), pdf_y(top + 25.0), &fonts.regular);
        }
    }

    layer.set_fill_color(rgb(0, 0, 0));
    layer.use_text(
        item.category.as_str().to_uppercase(),
        14.0,
        Mm(TEXT_X),
        pdf_y(top + 10.0),
        &fonts.bold,
    );

    layer.set_fill_color(rgb(60, 60, 60));
    let details = [
        (20.0, format!("Color: {}", item.color)),
        (28.0, format!("Season: {}", item.season.as_str())),
        (36.0, format!("Occasion: {}", item.occasion.as_str())),
    ];
    for (offset, text) in details {
        layer.use_text(text, 11.0, Mm(TEXT_X), pdf_y(top + offset), &fonts.regular);
    }

    if let Some(notes) = &item.notes {
        let lines = wrap_text(&format!("Notes: {notes}"), NOTES_WRAP);
        let mut line_top = top + 46.0;
        for line in lines {
            layer.use_text(line, 11.0, Mm(TEXT_X), pdf_y(line_top), &fonts.regular);
            line_top += NOTES_LINE_HEIGHT;
        }
    }

    layer.set_outline_color(rgb(220, 220, 220));
    horizontal_line(layer, top + 55.0, MARGIN, PAGE_WIDTH - MARGIN);
}

/// Renders the catalog PDF and returns its bytes.
pub fn render_catalog(items: &[Item], generated_on: NaiveDate) -> Result<Vec<u8>> {
    let pages = CatalogLayout::paginate(items);

    let (doc, first_page, first_layer) =
        PdfDocument::new(TITLE, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Catalog");
    let fonts = Fonts {
        regular: doc.add_builtin_font(BuiltinFont::Helvetica).map_err(export_error)?,
        bold: doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(export_error)?,
    };

    let header = doc.get_page(first_page).get_layer(first_layer);
    header.set_fill_color(rgb(73, 100, 114));
    header.use_text(TITLE, 22.0, Mm(MARGIN), pdf_y(TITLE_Y), &fonts.bold);
    header.set_fill_color(rgb(100, 100, 100));
    header.use_text(
        format!("Generated on: {}", generated_on.format("%Y-%m-%d")),
        10.0,
        Mm(MARGIN),
        pdf_y(DATE_Y),
        &fonts.regular,
    );

    for (index, page) in pages.iter().enumerate() {
        let layer = if index == 0 {
            header.clone()
        } else {
            let (page_index, layer_index) = doc.add_page(
                Mm(PAGE_WIDTH),
                Mm(PAGE_HEIGHT),
                format!("Catalog page {}", index + 1),
            );
            doc.get_page(page_index).get_layer(layer_index)
        };

        for entry in &page.entries {
            draw_entry(&layer, &fonts, entry);
        }
    }

    let bytes = doc.save_to_bytes().map_err(export_error)?;
    debug!(pages = pages.len(), bytes = bytes.len(), "Catalog rendered");
    Ok(bytes)
}

/// Renders the catalog and writes it as `wardrobe_catalog_<unix millis>.pdf`.
#[instrument(skip_all, fields(items = items.len()))]
pub async fn export_catalog(items: &[Item], sink: &dyn FileSink) -> Result<PathBuf> {
    if items.is_empty() {
        warn!("Exporting an empty wardrobe");
    }

    let bytes = render_catalog(items, Local::now().date_naive())?;
    let file_name = format!("wardrobe_catalog_{}.pdf", Utc::now().timestamp_millis());
    let path = sink.write_file(&file_name, &bytes).await?;

    info!(path = %path.display(), "Catalog exported");
    Ok(path)
}
