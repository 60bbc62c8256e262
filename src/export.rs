//! PNG snapshots of the year grid or a single month.
//!
//! The grid is laid out as SVG first and then rasterised with `resvg`.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use chrono::Datelike;
use resvg::{tiny_skia, usvg};
use thiserror::Error;

use crate::calendar::dates::{self, WEEKDAY_NAMES};
use crate::document::Document;
use crate::ui::year_view::{self, BorderAccent, DayCell, MonthGrid};

const CELL: u32 = 24;
const GAP: u32 = 2;
const MONTH_COLUMNS: u32 = 4;
const LEGEND_HEIGHT: u32 = 34;
const EXPORT_SCALE: f32 = 2.0;

const OUTSIDE_FILL: &str = "#f3f4f6";
const PLAIN_STROKE: &str = "#d1d5db";
const MARKER_STROKE: &str = "#374151";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Invalid month: {0}")]
    InvalidMonth(u32),
    #[error("Failed to write snapshot {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to format snapshot")]
    Format(#[from] std::fmt::Error),
    #[error("Failed to parse snapshot: {0}")]
    Svg(#[from] usvg::Error),
    #[error("Failed to rasterise snapshot: {0}")]
    Raster(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportTarget {
    Year,
    Month(u32),
}

/// `2025.png` for a year, `March-2025.png` for a month.
pub fn file_name(target: ExportTarget, year: i32) -> String {
    match target {
        ExportTarget::Year => format!("{}.png", year),
        ExportTarget::Month(month) => format!("{}-{}.png", dates::month_name(month), year),
    }
}

pub fn render_svg(document: &Document, year: i32, target: ExportTarget) -> Result<String, ExportError> {
    let months: Vec<MonthGrid> = match target {
        ExportTarget::Year => year_view::calculate_layout(document, year).months,
        ExportTarget::Month(month) => vec![
            year_view::calculate_month(document, year, month).ok_or(ExportError::InvalidMonth(month))?,
        ],
    };

    let columns = (months.len() as u32).min(MONTH_COLUMNS);
    let rows = (months.len() as u32).div_ceil(MONTH_COLUMNS);
    let (block_w, block_h) = month_block_size();
    let width = columns * (block_w + GAP * 4) + GAP * 4;
    let height = LEGEND_HEIGHT + rows * (block_h + GAP * 4) + GAP * 4;

    let mut svg = String::new();
    writeln!(
        svg,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="sans-serif">"#,
        w = width,
        h = height
    )?;
    writeln!(svg, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
    write_legend(&mut svg, document)?;

    for (idx, month) in months.iter().enumerate() {
        let idx = idx as u32;
        let x = GAP * 4 + (idx % MONTH_COLUMNS) * (block_w + GAP * 4);
        let y = LEGEND_HEIGHT + GAP * 4 + (idx / MONTH_COLUMNS) * (block_h + GAP * 4);
        let title = match target {
            ExportTarget::Year => month.name.to_string(),
            ExportTarget::Month(_) => format!("{} {}", month.name, year),
        };
        write_month(&mut svg, month, &title, x, y, document)?;
    }

    writeln!(svg, "</svg>")?;
    Ok(svg)
}

/// Rasterises the snapshot into PNG bytes at `scale` times the layout size.
pub fn render_png(document: &Document, year: i32, target: ExportTarget, scale: f32) -> Result<Vec<u8>, ExportError> {
    let svg = render_svg(document, year, target)?;

    let mut options = usvg::Options::default();
    options.fontdb_mut().load_system_fonts();
    let tree = usvg::Tree::from_str(&svg, &options)?;

    let size = tree.size().to_int_size().scale_by(scale).ok_or_else(|| {
        ExportError::Raster(format!("invalid scale {}", scale))
    })?;
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Raster(format!("cannot allocate {}x{} image", size.width(), size.height())))?;
    resvg::render(&tree, tiny_skia::Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    pixmap.encode_png().map_err(|e| ExportError::Raster(e.to_string()))
}

/// Renders and writes the snapshot into `dir`, returning the written path.
pub fn write_snapshot(
    document: &Document,
    year: i32,
    target: ExportTarget,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let png = render_png(document, year, target, EXPORT_SCALE)?;
    let path = dir.join(file_name(target, year));

    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io { path: dir.to_path_buf(), source })?;
    std::fs::write(&path, png).map_err(|source| ExportError::Io { path: path.clone(), source })?;

    tracing::info!("Exported snapshot to {}", path.display());
    Ok(path)
}

fn month_block_size() -> (u32, u32) {
    let width = 8 * (CELL + GAP);
    // title + weekday header + six weeks
    let height = 8 * (CELL + GAP);
    (width, height)
}

fn write_legend(svg: &mut String, document: &Document) -> Result<(), ExportError> {
    let colors = &document.colors;
    let mut entries = vec![
        ("Vacation".to_string(), "white".to_string(), colors.vacation_border.hex()),
        ("Holiday".to_string(), "white".to_string(), colors.holiday_border.hex()),
        ("Attention".to_string(), "white".to_string(), colors.attention_border.hex()),
    ];
    entries.extend(
        document
            .persons()
            .iter()
            .map(|p| (p.name.clone(), p.color.hex(), PLAIN_STROKE.to_string())),
    );

    let mut x = GAP * 4;
    for (label, fill, stroke) in entries {
        writeln!(
            svg,
            r#"<rect x="{x}" y="8" width="18" height="18" rx="3" fill="{fill}" stroke="{stroke}" stroke-width="2"/>"#
        )?;
        writeln!(svg, r#"<text x="{}" y="22" font-size="13">{}</text>"#, x + 24, escape(&label))?;
        x += 24 + 8 * label.chars().count() as u32 + 16;
    }
    Ok(())
}

fn write_month(
    svg: &mut String,
    month: &MonthGrid,
    title: &str,
    x: u32,
    y: u32,
    document: &Document,
) -> Result<(), ExportError> {
    let (block_w, block_h) = month_block_size();
    writeln!(
        svg,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="4" fill="none" stroke="{}"/>"#,
        x - GAP,
        y - GAP,
        block_w + GAP,
        block_h + GAP,
        PLAIN_STROKE
    )?;
    writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="14" font-weight="bold" text-anchor="middle">{}</text>"#,
        x + block_w / 2,
        y + CELL - 7,
        escape(title)
    )?;

    let header_y = y + CELL + GAP;
    let labels = std::iter::once("KW").chain(WEEKDAY_NAMES.iter().copied());
    for (col, label) in labels.enumerate() {
        let cx = x + col as u32 * (CELL + GAP);
        writeln!(
            svg,
            r#"<rect x="{cx}" y="{header_y}" width="{CELL}" height="{CELL}" rx="3" fill="{OUTSIDE_FILL}" stroke="{PLAIN_STROKE}"/>"#
        )?;
        writeln!(
            svg,
            r#"<text x="{}" y="{}" font-size="10" text-anchor="middle">{}</text>"#,
            cx + CELL / 2,
            header_y + CELL - 8,
            label
        )?;
    }

    for (row, week) in month.weeks.iter().enumerate() {
        let ry = header_y + (row as u32 + 1) * (CELL + GAP);
        writeln!(
            svg,
            r##"<text x="{}" y="{}" font-size="10" text-anchor="middle" fill="#6b7280">{}</text>"##,
            x + CELL / 2,
            ry + CELL - 8,
            week.iso_week
        )?;
        for (col, cell) in week.days.iter().enumerate() {
            let cx = x + (col as u32 + 1) * (CELL + GAP);
            write_cell(svg, cell, cx, ry, document)?;
        }
    }
    Ok(())
}

fn write_cell(svg: &mut String, cell: &DayCell, x: u32, y: u32, document: &Document) -> Result<(), ExportError> {
    if !cell.in_month {
        writeln!(
            svg,
            r#"<rect x="{x}" y="{y}" width="{CELL}" height="{CELL}" rx="3" fill="{OUTSIDE_FILL}" stroke="{PLAIN_STROKE}"/>"#
        )?;
        return Ok(());
    }

    let fill = cell.fill_color.map(|c| c.hex()).unwrap_or_else(|| "white".to_string());
    let (stroke, stroke_width) = match cell.border {
        Some(BorderAccent::Holiday(token)) | Some(BorderAccent::Vacation(token)) => (token.hex(), 2),
        Some(BorderAccent::Assignment) => (MARKER_STROKE.to_string(), 2),
        None => (PLAIN_STROKE.to_string(), 1),
    };

    writeln!(svg, "<g>")?;
    if !cell.tooltip.is_empty() {
        writeln!(svg, "<title>{}</title>", escape(&cell.tooltip))?;
    }
    writeln!(
        svg,
        r#"<rect x="{x}" y="{y}" width="{CELL}" height="{CELL}" rx="3" fill="{fill}" stroke="{stroke}" stroke-width="{stroke_width}"/>"#
    )?;
    if cell.is_special {
        writeln!(
            svg,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="2" fill="none" stroke="{}" stroke-width="2"/>"#,
            x + 3,
            y + 3,
            CELL - 6,
            CELL - 6,
            document.colors.attention_border.hex()
        )?;
    }
    writeln!(
        svg,
        r#"<text x="{}" y="{}" font-size="10" font-weight="bold" text-anchor="end">{}</text>"#,
        x + CELL - 4,
        y + CELL - 5,
        cell.date.day()
    )?;
    writeln!(svg, "</g>")?;
    Ok(())
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{ColorToken, Hue, PersonDraft, Shade};
    use chrono::NaiveDate;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    fn sample_document() -> Document {
        let mut doc = Document::default();
        doc.upsert_person(PersonDraft::new("Dennis & Co", Some(ColorToken::new(Hue::Blue, Shade::S300))), None)
            .unwrap();
        doc.assign_date(NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(), Some(0)).unwrap();
        doc.toggle_special(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        doc
    }

    #[test]
    fn file_names_follow_year_and_month_pattern() {
        assert_eq!(file_name(ExportTarget::Year, 2025), "2025.png");
        assert_eq!(file_name(ExportTarget::Month(3), 2025), "March-2025.png");
    }

    #[test]
    fn year_snapshot_contains_all_months() {
        let svg = render_svg(&sample_document(), 2025, ExportTarget::Year).unwrap();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        for name in dates::MONTH_NAMES {
            assert!(svg.contains(&format!(">{}</text>", name)), "missing {name}");
        }
    }

    #[test]
    fn month_snapshot_shows_assignment_and_attention() {
        let doc = sample_document();
        let svg = render_svg(&doc, 2025, ExportTarget::Month(3)).unwrap();

        assert!(svg.contains("March 2025"));
        assert!(svg.contains(&ColorToken::new(Hue::Blue, Shade::S300).hex()));
        assert!(svg.contains(&doc.colors.attention_border.hex()));
        assert!(svg.contains("Dennis &amp; Co"));
        assert!(!svg.contains("January"));
    }

    #[test]
    fn holiday_names_become_tooltips() {
        let svg = render_svg(&Document::default(), 2025, ExportTarget::Month(1)).unwrap();
        assert!(svg.contains("<title>Neujahr</title>"));
    }

    #[test]
    fn invalid_month_is_rejected() {
        let result = render_svg(&Document::default(), 2025, ExportTarget::Month(13));
        assert!(matches!(result, Err(ExportError::InvalidMonth(13))));
    }

    #[test]
    fn snapshot_is_written_into_directory() {
        let dir = tempfile::tempdir().unwrap();

        let path = write_snapshot(&sample_document(), 2026, ExportTarget::Year, dir.path()).unwrap();

        assert_eq!(path, dir.path().join("2026.png"));
        let content = std::fs::read(path).unwrap();
        assert!(content.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn month_png_is_scaled_from_the_layout() {
        let doc = sample_document();
        let svg = render_svg(&doc, 2025, ExportTarget::Month(3)).unwrap();
        let tree = usvg::Tree::from_str(&svg, &usvg::Options::default()).unwrap();

        let png = render_png(&doc, 2025, ExportTarget::Month(3), 2.0).unwrap();

        assert!(png.starts_with(PNG_SIGNATURE));
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();
        assert_eq!(pixmap.width(), tree.size().to_int_size().width() * 2);
        assert_eq!(pixmap.height(), tree.size().to_int_size().height() * 2);
    }

    #[test]
    fn assignment_fill_reaches_the_pixels() {
        let doc = sample_document();
        let png = render_png(&doc, 2025, ExportTarget::Month(3), 1.0).unwrap();
        let pixmap = tiny_skia::Pixmap::decode_png(&png).unwrap();

        let (r, g, b) = ColorToken::new(Hue::Blue, Shade::S300).rgb();
        let found = pixmap
            .pixels()
            .iter()
            .any(|p| p.red() == r && p.green() == g && p.blue() == b && p.alpha() == 255);
        assert!(found);
    }

    #[test]
    fn rendering_is_deterministic() {
        let doc = sample_document();
        assert_eq!(
            render_svg(&doc, 2025, ExportTarget::Year).unwrap(),
            render_svg(&doc, 2025, ExportTarget::Year).unwrap()
        );
    }
}
