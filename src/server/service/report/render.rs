//! Report exports: HTML, CSV, XLSX and PDF.

use std::{fmt::Write as _, str::FromStr};

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::server::{
    error::report::ReportError,
    service::report::{Cell, Report, ReportRow},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Html,
    Csv,
    Xlsx,
    Pdf,
}

impl ReportFormat {
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Html => "text/html; charset=utf-8",
            Self::Csv => "text/csv; charset=utf-8",
            Self::Xlsx => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
            Self::Pdf => "application/pdf",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }

    /// Everything but HTML is served as an attachment
    pub fn is_download(&self) -> bool {
        !matches!(self, Self::Html)
    }
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "html" => Ok(Self::Html),
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            _ => Err(ReportError::UnknownFormat(s.to_string())),
        }
    }
}

#[derive(Debug)]
pub struct RenderedReport {
    pub content_type: &'static str,
    /// Set for downloads, `report_{type}.{ext}`
    pub filename: Option<String>,
    pub body: Vec<u8>,
    /// Data rows written, excluding headers
    pub rows: usize,
}

pub fn render(report: &Report, format: ReportFormat) -> Result<RenderedReport, ReportError> {
    let (body, rows) = match format {
        ReportFormat::Html => {
            let (html, rows) = render_html(report);
            (html.into_bytes(), rows)
        }
        ReportFormat::Csv => render_csv(report)?,
        ReportFormat::Xlsx => render_xlsx(report)?,
        ReportFormat::Pdf => render_pdf(report)?,
    };

    let filename = format.is_download().then(|| {
        format!(
            "report_{}.{}",
            report.report_type.as_str(),
            format.extension()
        )
    });

    Ok(RenderedReport {
        content_type: format.content_type(),
        filename,
        body,
        rows,
    })
}

fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    escaped
}

fn html_table(out: &mut String, columns: &[String], rows: &[&ReportRow]) {
    out.push_str("<table class=\"report\">\n<thead><tr>");
    for column in columns {
        let _ = write!(out, "<th>{}</th>", escape_html(column));
    }
    out.push_str("</tr></thead>\n<tbody>\n");

    for row in rows {
        out.push_str("<tr>");
        for cell in &row.cells {
            let _ = write!(out, "<td>{}</td>", escape_html(&cell.to_string()));
        }
        out.push_str("</tr>\n");
    }

    out.push_str("</tbody>\n</table>\n");
}

/// A table per group for grouped reports, a single table otherwise
fn render_html(report: &Report) -> (String, usize) {
    let mut out = String::new();
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(&report.title()));

    if report.rows.is_empty() {
        out.push_str("<p>No data</p>\n");
        return (out, 0);
    }

    let mut written = 0;
    for (group, rows) in report.groups() {
        if let Some(group) = group {
            let _ = writeln!(out, "<section>\n<h2>{}</h2>", escape_html(group));
            html_table(&mut out, &report.columns, &rows);
            out.push_str("</section>\n");
        } else {
            html_table(&mut out, &report.columns, &rows);
        }
        written += rows.len();
    }

    (out, written)
}

fn render_csv(report: &Report) -> Result<(Vec<u8>, usize), ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&report.columns)?;

    for row in &report.rows {
        writer.write_record(row.cells.iter().map(|cell| cell.to_string()))?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| ReportError::Csv(e.into_error().into()))?;

    Ok((body, report.rows.len()))
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &Cell,
) -> Result<(), ReportError> {
    match cell {
        Cell::Empty => {}
        Cell::Int(value) => {
            worksheet.write_number(row, col, *value as f64)?;
        }
        Cell::Float(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        Cell::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
        Cell::Text(_) | Cell::Date(_) => {
            worksheet.write_string(row, col, cell.to_string())?;
        }
    }

    Ok(())
}

/// One worksheet with a bold header row
fn render_xlsx(report: &Report) -> Result<(Vec<u8>, usize), ReportError> {
    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("Report")?;

        for (col, column) in report.columns.iter().enumerate() {
            sheet.write_string_with_format(0, col as u16, column, &bold)?;
        }

        for (index, row) in report.rows.iter().enumerate() {
            for (col, cell) in row.cells.iter().enumerate() {
                write_cell(sheet, index as u32 + 1, col as u16, cell)?;
            }
        }
    }

    Ok((workbook.save_to_buffer()?, report.rows.len()))
}

const PDF_MARGIN: f32 = 12.0;
const PDF_LINE: f32 = 6.0;
const PDF_FONT_SIZE: f32 = 8.0;
const PDF_TITLE_SIZE: f32 = 14.0;
const PDF_HEADING_SIZE: f32 = 11.0;
/// Approximate Helvetica glyph width at [`PDF_FONT_SIZE`]
const PDF_CHAR_WIDTH: f32 = 1.6;

/// Cursor over an A4 document that adds pages as rows run out
struct PdfPages {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    width: f32,
    height: f32,
    y: f32,
    pages: usize,
}

impl PdfPages {
    fn new(title: &str, landscape: bool) -> Result<Self, ReportError> {
        let (width, height) = if landscape {
            (297.0, 210.0)
        } else {
            (210.0, 297.0)
        };

        let (doc, page, layer) = PdfDocument::new(title, Mm(width), Mm(height), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(e.to_string()))?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            width,
            height,
            y: height - PDF_MARGIN,
            pages: 1,
        })
    }

    fn column_width(&self, columns: usize) -> f32 {
        (self.width - 2.0 * PDF_MARGIN) / columns.max(1) as f32
    }

    /// Starts a new page when fewer than `lines` fit on the current one
    fn ensure_room(&mut self, lines: usize) -> bool {
        if self.y - PDF_LINE * lines as f32 >= PDF_MARGIN {
            return false;
        }

        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(self.width),
            Mm(self.height),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.y = self.height - PDF_MARGIN;

        true
    }

    fn text(&mut self, text: &str, size: f32, bold: bool) {
        let font = if bold { &self.bold } else { &self.regular };
        self.layer
            .use_text(win_ansi(text), size, Mm(PDF_MARGIN), Mm(self.y), font);
        self.y -= PDF_LINE * (size / PDF_FONT_SIZE).max(1.0);
    }

    fn row(&mut self, cells: impl Iterator<Item = String>, columns: usize, bold: bool) {
        let column_width = self.column_width(columns);
        let max_chars = (column_width / PDF_CHAR_WIDTH).floor().max(3.0) as usize;
        let font = if bold { &self.bold } else { &self.regular };

        for (index, value) in cells.enumerate() {
            let x = PDF_MARGIN + column_width * index as f32;
            self.layer.use_text(
                win_ansi(&truncate(&value, max_chars)),
                PDF_FONT_SIZE,
                Mm(x),
                Mm(self.y),
                font,
            );
        }

        self.y -= PDF_LINE;
    }

    fn header(&mut self, columns: &[String]) {
        self.row(columns.iter().cloned(), columns.len(), true);
    }

    fn finish(self) -> Result<Vec<u8>, ReportError> {
        self.doc
            .save_to_bytes()
            .map_err(|e| ReportError::Pdf(e.to_string()))
    }
}

/// Characters of WinAnsiEncoding outside Latin-1
const WIN_ANSI_EXTRA: &str = "€‚ƒ„…†‡ˆ‰Š‹ŒŽ‘’“”•–—˜™š›œžŸ";

/// Replaces characters the builtin fonts cannot encode with `?`.
///
/// The builtin PDF fonts use WinAnsiEncoding, which would otherwise drop them silently.
fn win_ansi(value: &str) -> String {
    value
        .chars()
        .map(|c| match c {
            ' '..='~' | '\u{a0}'..='\u{ff}' => c,
            _ if WIN_ANSI_EXTRA.contains(c) => c,
            _ => '?',
        })
        .collect()
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(max_chars.saturating_sub(2)).collect();
    truncated.push_str("..");
    truncated
}

/// A4, landscape for riders reports, one heading per group, column header on every page
fn render_pdf(report: &Report) -> Result<(Vec<u8>, usize), ReportError> {
    let title = report.title();
    let mut pdf = PdfPages::new(&title, report.report_type.landscape())?;
    let columns = report.columns.len();

    pdf.text(&title, PDF_TITLE_SIZE, true);

    if report.rows.is_empty() {
        pdf.text("No data", PDF_FONT_SIZE, false);
        return Ok((pdf.finish()?, 0));
    }

    let mut written = 0;
    for (group, rows) in report.groups() {
        pdf.ensure_room(3);
        if let Some(group) = group {
            pdf.text(group, PDF_HEADING_SIZE, true);
        }
        pdf.header(&report.columns);

        for row in rows {
            if pdf.ensure_room(1) {
                pdf.header(&report.columns);
            }
            pdf.row(row.cells.iter().map(Cell::to_string), columns, false);
            written += 1;
        }
    }

    Ok((pdf.finish()?, written))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use crate::server::service::report::{
        render::{escape_html, render, win_ansi, ReportFormat},
        Cell, Report, ReportRow, ReportType,
    };

    fn lineup_report(rows_per_team: usize) -> Report {
        let date = NaiveDate::from_ymd_opt(2025, 11, 4).unwrap();
        let mut rows = Vec::new();

        for team in ["Alpha <A>", "Bravo"] {
            for n in 0..rows_per_team {
                rows.push(ReportRow {
                    group: Some(team.to_string()),
                    cells: vec![
                        Cell::from(team),
                        Cell::Int(n as i64 + 1),
                        Cell::from(format!("Rider {}", n)),
                        Cell::from("A"),
                        Cell::Date(date),
                    ],
                });
            }
        }

        Report {
            report_type: ReportType::Lineup,
            columns: ["team", "profile_id", "rider_name", "category", "race_date"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows,
            race_date: Some(date),
        }
    }

    /// Expected: every format writes the same number of data rows, paging the PDF
    #[test]
    fn formats_carry_same_rows() {
        let report = lineup_report(40);

        for format in [
            ReportFormat::Html,
            ReportFormat::Csv,
            ReportFormat::Xlsx,
            ReportFormat::Pdf,
        ] {
            let rendered = render(&report, format).unwrap();

            assert_eq!(rendered.rows, 80, "{:?}", format);
            assert!(!rendered.body.is_empty());
        }
    }

    /// Expected: CSV holds a header plus one record per row with the same totals
    #[test]
    fn csv_matches_report() {
        let report = lineup_report(3);
        let rendered = render(&report, ReportFormat::Csv).unwrap();

        let mut reader = csv::Reader::from_reader(rendered.body.as_slice());
        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        let total: f64 = records
            .iter()
            .map(|r| r[1].parse::<f64>().unwrap())
            .sum();

        assert_eq!(records.len(), report.rows.len());
        assert_eq!(total, report.total("profile_id"));
        assert_eq!(&records[0][4], "2025-11-04");
        assert_eq!(
            rendered.filename.as_deref(),
            Some("report_lineup.csv")
        );
    }

    /// Expected: a section per team, markup escaped, no attachment
    #[test]
    fn html_groups_and_escapes() {
        let report = lineup_report(2);
        let rendered = render(&report, ReportFormat::Html).unwrap();
        let html = String::from_utf8(rendered.body).unwrap();

        assert_eq!(html.matches("<section>").count(), 2);
        assert_eq!(html.matches("<tr>").count(), 2 * 2 + 2);
        assert!(html.contains("Alpha &lt;A&gt;"));
        assert!(!html.contains("<A>"));
        assert!(rendered.filename.is_none());
    }

    /// Expected: binary formats carry their magic bytes
    #[test]
    fn writes_binary_formats() {
        let report = lineup_report(1);

        let xlsx = render(&report, ReportFormat::Xlsx).unwrap();
        let pdf = render(&report, ReportFormat::Pdf).unwrap();

        assert!(xlsx.body.starts_with(b"PK"));
        assert!(pdf.body.starts_with(b"%PDF"));
        assert_eq!(pdf.filename.as_deref(), Some("report_lineup.pdf"));
    }

    #[test]
    fn parses_format_aliases() {
        assert_eq!("EXCEL".parse::<ReportFormat>().ok(), Some(ReportFormat::Xlsx));
        assert_eq!("".parse::<ReportFormat>().ok(), Some(ReportFormat::Html));
        assert!("docx".parse::<ReportFormat>().is_err());
    }

    #[test]
    fn escapes_quotes() {
        assert_eq!(escape_html(r#"a"b'c"#), "a&quot;b&#39;c");
    }

    /// Expected: Latin-1 and WinAnsi extras survive, everything else becomes `?`
    #[test]
    fn replaces_unencodable_pdf_text() {
        assert_eq!(win_ansi("Zoë Müller – Œuvre €5"), "Zoë Müller – Œuvre €5");
        assert_eq!(win_ansi("Łukasz Źdźbło 🚴"), "?ukasz ?d?b?o ?");
        assert_eq!(win_ansi("東京"), "??");
    }
}
