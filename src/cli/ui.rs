use crate::core::metric::{MetricName, ScoredFund};
use crate::core::ranking::RankingTable;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    Success,
    Error,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::Success => style(text).green(),
        StyleType::Error => style(text).red(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right aligned number with two decimals.
pub fn number_cell(value: f64) -> Cell {
    Cell::new(format!("{value:.2}")).set_alignment(CellAlignment::Right)
}

/// Fund value over category average. A pair that was never found on the
/// page (both zero) is dimmed.
pub fn metric_cell(fund: &ScoredFund, metric: MetricName) -> Cell {
    let pair = fund.record.metrics.get(metric);
    let cell = Cell::new(format!("{:.2} / {:.2}", pair.fund, pair.avg))
        .set_alignment(CellAlignment::Right);
    if pair.fund == 0.0 && pair.avg == 0.0 {
        cell.fg(Color::DarkGrey)
    } else {
        cell
    }
}

/// Creates a bold cell for the composite score, colored by sign.
pub fn score_cell(score: f64) -> Cell {
    let color = if score >= 0.0 { Color::Green } else { Color::Red };
    Cell::new(format!("{score:.3}"))
        .fg(color)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Builds the terminal view of a ranking table.
pub fn ranking_table(ranking: &RankingTable) -> Table {
    let mut table = new_styled_table();

    let mut header = vec![
        header_cell("#"),
        header_cell("Fund"),
        header_cell("Score"),
        header_cell("Expense Ratio (%)"),
    ];
    header.extend(
        MetricName::ALL
            .iter()
            .map(|m| header_cell(&format!("{} (Fund / Avg)", m.label()))),
    );
    table.set_header(header);

    for (i, fund) in ranking.rows().iter().enumerate() {
        let mut row = vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(fund.name()),
            score_cell(fund.score),
            number_cell(fund.record.expense_ratio),
        ];
        row.extend(MetricName::ALL.iter().map(|m| metric_cell(fund, *m)));
        table.add_row(row);
    }
    table
}

/// Creates a new `indicatif::ProgressBar` with standard styling.
pub fn new_progress_bar(len: u64, with_message: bool) -> ProgressBar {
    let template = if with_message {
        "{spinner:.green} {msg} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    } else {
        "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})"
    };

    let pb = ProgressBar::new(len);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(template)
            .unwrap()
            .progress_chars("#>-"),
    );
    pb
}

/// Prints a separator line matching the terminal width.
pub fn print_separator() {
    let term_width = console::Term::stdout()
        .size_checked()
        .map(|(_, w)| w as usize)
        .unwrap_or(80);
    println!("\n{}", "─".repeat(term_width));
}
