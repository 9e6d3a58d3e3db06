//! Weekly report document export.
//!
//! Renders a week's items as a `.docx` table: one header row, one row per
//! item, multi-line progress fields as bullets. Pure: callers hand in
//! already-resolved items.

use std::io::Cursor;

use chrono::{Datelike, Days, NaiveDate};
use docx_rs::{
    AbstractNumbering, AlignmentType, BreakType, Docx, IndentLevel, Level, LevelJc, LevelText,
    LineSpacing, NumberFormat, Numbering, NumberingId, PageMargin, Paragraph, Run, RunFonts,
    Shading, SpecialIndentType, Start, Table, TableBorder, TableBorderPosition, TableBorders,
    TableCell, TableRow, VAlignType, WidthType,
};

use crate::error::CoreError;
use crate::report::ReportItem;
use crate::week::{friday_of, monday_of, week_of_year};

/// MIME type of the exported document.
pub const DOCX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const FONT: &str = "맑은 고딕";
const HEADER_FILL: &str = "F3F4F6";
const BORDER_COLOR: &str = "BFDBFE";

const LABEL_DIVISION: &str = "본부 및 팀";
const LABEL_PROJECT: &str = "프로젝트";
const LABEL_PREV: &str = "전주 진행사항";
const LABEL_CURR: &str = "금주 진행사항";
const LABEL_REMARKS: &str = "비고";

// A4 portrait in twentieths of a point.
const PAGE_WIDTH: u32 = 11906;
const PAGE_HEIGHT: u32 = 16838;
const PAGE_MARGIN: i32 = 720;
const CONTENT_WIDTH: usize = (PAGE_WIDTH as usize) - 2 * (PAGE_MARGIN as usize);

const BULLET_NUMBERING: usize = 1;

/// Division, project, previous, current, remarks.
const COLUMN_SHARES: [usize; 5] = [14, 16, 30, 30, 10];

/// Document title for the week containing `reference`, e.g.
/// `2024 년 6 월 24 주차 6 월 10 일부터 6 월 14 일까지`.
pub fn report_title(reference: NaiveDate) -> String {
    let start = monday_of(reference);
    let friday = friday_of(reference);
    format!(
        "{} 년 {} 월 {} 주차 {}부터 {}까지",
        reference.year(),
        reference.month(),
        week_of_year(reference),
        korean_month_day(start),
        korean_month_day(friday),
    )
}

/// Download name for the week containing `reference`.
pub fn export_file_name(reference: NaiveDate) -> String {
    format!("weekly-report-{}.docx", monday_of(reference).format("%Y%m%d"))
}

/// Render the report for the week containing `reference`.
pub fn render_weekly_report(
    reference: NaiveDate,
    items: &[ReportItem],
) -> Result<Vec<u8>, CoreError> {
    let start = monday_of(reference);
    let widths = column_widths();

    let title = Paragraph::new()
        .add_run(Run::new().add_text(report_title(reference)).bold().size(32))
        .line_spacing(LineSpacing::new().after(300));

    let mut rows = vec![header_row(start, &widths)];
    rows.extend(items.iter().map(|item| {
        TableRow::new(vec![
            text_cell(&item.division, widths[0]),
            text_cell(&item.project, widths[1]),
            bullet_cell(&item.prev_progress, widths[2]),
            bullet_cell(&item.curr_progress, widths[3]),
            text_cell(&item.remarks, widths[4]),
        ])
    }));
    if items.is_empty() {
        rows.push(TableRow::new(
            widths.iter().map(|width| text_cell("", *width)).collect(),
        ));
    }

    let table = Table::new(rows)
        .set_grid(widths)
        .width(CONTENT_WIDTH, WidthType::Dxa)
        .set_borders(borders());

    let docx = Docx::new()
        .page_size(PAGE_WIDTH, PAGE_HEIGHT)
        .page_margin(
            PageMargin::new()
                .top(PAGE_MARGIN)
                .bottom(PAGE_MARGIN)
                .left(PAGE_MARGIN)
                .right(PAGE_MARGIN),
        )
        .add_abstract_numbering(bullet_numbering())
        .add_numbering(Numbering::new(BULLET_NUMBERING, BULLET_NUMBERING))
        .add_paragraph(title)
        .add_table(table);

    let mut buffer = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buffer)
        .map_err(|e| CoreError::Internal(format!("Failed to build document: {e}")))?;
    Ok(buffer.into_inner())
}

fn header_row(start: NaiveDate, widths: &[usize]) -> TableRow {
    let prev_start = start - Days::new(7);
    let prev_friday = start - Days::new(3);
    let friday = start + Days::new(4);

    let prev = format!(
        "{LABEL_PREV}\n({}~{})",
        prev_start.format("%m/%d"),
        prev_friday.format("%m/%d")
    );
    let curr = format!(
        "{LABEL_CURR}\n({}~{})",
        start.format("%m/%d"),
        friday.format("%m/%d")
    );

    let labels = [
        LABEL_DIVISION,
        LABEL_PROJECT,
        prev.as_str(),
        curr.as_str(),
        LABEL_REMARKS,
    ];
    TableRow::new(
        labels
            .into_iter()
            .zip(widths)
            .map(|(label, width)| {
                let run = label
                    .lines()
                    .enumerate()
                    .fold(styled_run().bold(), |run, (i, line)| {
                        let run = if i > 0 {
                            run.add_break(BreakType::TextWrapping)
                        } else {
                            run
                        };
                        run.add_text(line)
                    });
                TableCell::new()
                    .add_paragraph(Paragraph::new().add_run(run).align(AlignmentType::Center))
                    .shading(Shading::new().fill(HEADER_FILL))
                    .vertical_align(VAlignType::Center)
                    .width(*width, WidthType::Dxa)
            })
            .collect(),
    )
}

fn text_cell(text: &str, width: usize) -> TableCell {
    TableCell::new()
        .add_paragraph(
            Paragraph::new()
                .add_run(styled_run().add_text(text))
                .align(AlignmentType::Center),
        )
        .vertical_align(VAlignType::Center)
        .width(width, WidthType::Dxa)
}

fn bullet_cell(text: &str, width: usize) -> TableCell {
    let lines = bullet_lines(text);
    // A cell must hold at least one paragraph.
    if lines.is_empty() {
        return TableCell::new()
            .add_paragraph(Paragraph::new())
            .width(width, WidthType::Dxa);
    }
    lines
        .into_iter()
        .fold(TableCell::new(), |cell, line| {
            cell.add_paragraph(
                Paragraph::new()
                    .add_run(styled_run().add_text(line))
                    .numbering(NumberingId::new(BULLET_NUMBERING), IndentLevel::new(0)),
            )
        })
        .width(width, WidthType::Dxa)
}

fn styled_run() -> Run {
    Run::new()
        .size(22)
        .fonts(RunFonts::new().ascii(FONT).east_asia(FONT).hi_ansi(FONT))
}

fn bullet_numbering() -> AbstractNumbering {
    AbstractNumbering::new(BULLET_NUMBERING).add_level(
        Level::new(
            0,
            Start::new(1),
            NumberFormat::new("bullet"),
            LevelText::new("•"),
            LevelJc::new("left"),
        )
        .indent(Some(360), Some(SpecialIndentType::Hanging(240)), None, None),
    )
}

fn borders() -> TableBorders {
    [
        TableBorderPosition::Top,
        TableBorderPosition::Left,
        TableBorderPosition::Bottom,
        TableBorderPosition::Right,
        TableBorderPosition::InsideH,
        TableBorderPosition::InsideV,
    ]
    .into_iter()
    .fold(TableBorders::new(), |borders, position| {
        borders.set(TableBorder::new(position).color(BORDER_COLOR))
    })
}

/// Split a progress narrative into bullet lines, dropping blank ones.
pub fn bullet_lines(text: &str) -> Vec<&str> {
    text.lines().filter(|line| !line.trim().is_empty()).collect()
}

fn column_widths() -> Vec<usize> {
    let total: usize = COLUMN_SHARES.iter().sum();
    COLUMN_SHARES
        .iter()
        .map(|share| CONTENT_WIDTH * share / total)
        .collect()
}

fn korean_month_day(date: NaiveDate) -> String {
    format!("{} 월 {} 일", date.month(), date.day())
}
