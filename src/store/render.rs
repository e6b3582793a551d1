//! HTML rendering and parsing of ranking tables.
//!
//! The rendered document is a bordered table with a leading, header-less
//! index column. Parsing names header-less columns `Unnamed: <i>` and drops
//! every `Unnamed*` column before matching the rest against the schema.

use crate::core::error::StoreError;
use crate::core::metric::{
    EXPENSE_RATIO_COLUMN, FUND_NAME_COLUMN, FundRecord, MetricName, MetricPair, SCORE_COLUMN,
    ScoredFund, table_columns,
};
use crate::core::ranking::RankingTable;
use chrono::{DateTime, SecondsFormat, Utc};
use minijinja::{Environment, context};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::sync::LazyLock;

const TABLE_ID: &str = "T_ranking";
const UNNAMED_PREFIX: &str = "Unnamed";

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("th, td"));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

const TEMPLATE_NAME: &str = "ranking.html";
const TEMPLATE: &str = include_str!("ranking.html");

fn row_values(fund: &ScoredFund) -> Vec<String> {
    let record = &fund.record;
    let mut values = vec![record.name.clone(), record.expense_ratio.to_string()];
    for (_, pair) in record.metrics.iter() {
        values.push(pair.fund.to_string());
        values.push(pair.avg.to_string());
    }
    values.push(fund.score.to_string());
    values
}

fn environment() -> Result<Environment<'static>, minijinja::Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    // `.html` names get HTML auto-escaping.
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    Ok(env)
}

/// Renders `table` as a standalone styled HTML document.
pub fn render_table(
    table: &RankingTable,
    generated_at: DateTime<Utc>,
) -> Result<String, StoreError> {
    let env = environment()?;
    let rows: Vec<Vec<String>> = table.rows().iter().map(row_values).collect();
    let html = env.get_template(TEMPLATE_NAME)?.render(context! {
        generated_at => generated_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        table_id => TABLE_ID,
        columns => table_columns(),
        rows => rows,
    })?;
    Ok(html)
}

/// Cell texts exactly as written. Fund names may carry inner or edge
/// whitespace, so only headers and numbers are trimmed by their readers.
fn cell_texts(row: ElementRef<'_>) -> Vec<String> {
    row.select(&CELL)
        .map(|cell| cell.text().collect::<String>())
        .collect()
}

/// Parses a document produced by [`render_table`] back into a table.
///
/// `location` only labels errors.
pub fn parse_table(html: &str, location: &str) -> Result<RankingTable, StoreError> {
    let corrupt = |reason: String| StoreError::corrupt(location, reason);

    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .ok_or_else(|| corrupt("no table found".to_string()))?;

    let mut rows = table.select(&ROW);
    let headers: Vec<String> = rows
        .next()
        .map(cell_texts)
        .ok_or_else(|| corrupt("table has no header row".to_string()))?
        .into_iter()
        .enumerate()
        .map(|(i, h)| match h.trim() {
            "" => format!("{UNNAMED_PREFIX}: {i}"),
            header => header.to_string(),
        })
        .collect();

    let columns = reconcile_columns(&headers).map_err(corrupt)?;

    let mut funds = Vec::new();
    for (r, row) in rows.enumerate() {
        let cells = cell_texts(row);
        if cells.len() != headers.len() {
            return Err(corrupt(format!(
                "row {r} has {} cells, expected {}",
                cells.len(),
                headers.len()
            )));
        }
        let fields: HashMap<&str, &str> = columns
            .iter()
            .map(|(name, idx)| (name.as_str(), cells[*idx].as_str()))
            .collect();
        funds.push(fund_from_fields(&fields).map_err(|e| corrupt(format!("row {r}: {e}")))?);
    }

    Ok(RankingTable::from_rows(funds))
}

/// Maps each schema column to its cell index, after dropping `Unnamed`
/// columns. The remaining headers must be exactly the schema columns.
fn reconcile_columns(headers: &[String]) -> Result<HashMap<String, usize>, String> {
    let mut columns = HashMap::new();
    for (idx, header) in headers.iter().enumerate() {
        if header.starts_with(UNNAMED_PREFIX) {
            continue;
        }
        if columns.insert(header.clone(), idx).is_some() {
            return Err(format!("duplicate column '{header}'"));
        }
    }

    let expected = table_columns();
    if let Some(missing) = expected.iter().find(|c| !columns.contains_key(*c)) {
        return Err(format!("missing column '{missing}'"));
    }
    if let Some(unknown) = columns.keys().find(|c| !expected.contains(*c)) {
        return Err(format!("unexpected column '{unknown}'"));
    }
    Ok(columns)
}

fn field<'a>(fields: &HashMap<&str, &'a str>, column: &str) -> Result<&'a str, String> {
    fields
        .get(column)
        .copied()
        .ok_or_else(|| format!("missing '{column}'"))
}

fn number(fields: &HashMap<&str, &str>, column: &str) -> Result<f64, String> {
    let raw = field(fields, column)?;
    raw.trim()
        .parse()
        .map_err(|_| format!("'{column}' is not a number: '{raw}'"))
}

fn fund_from_fields(fields: &HashMap<&str, &str>) -> Result<ScoredFund, String> {
    let mut record = FundRecord::new(
        field(fields, FUND_NAME_COLUMN)?,
        number(fields, EXPENSE_RATIO_COLUMN)?,
    );
    for metric in MetricName::ALL {
        let pair = MetricPair::new(
            number(fields, &metric.fund_column())?,
            number(fields, &metric.avg_column())?,
        );
        record.metrics.set(metric, pair);
    }
    Ok(ScoredFund {
        record,
        score: number(fields, SCORE_COLUMN)?,
    })
}
