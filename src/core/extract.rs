//! Metric extraction from a parsed factsheet page

use super::error::ExtractionError;
use super::metric::{FundRecord, MetricName, MetricPair};
use scraper::{ElementRef, Html, Selector};
use serde::Deserialize;
use std::sync::LazyLock;
use tracing::{debug, warn};

const EXPENSE_RATIO_LABEL: &str = "Expense Ratio:";

/// Index of the JSON-LD block that describes the fund itself.
const FUND_LD_JSON_INDEX: usize = 1;

static LD_JSON: LazyLock<Selector> =
    LazyLock::new(|| selector(r#"script[type="application/ld+json"]"#));
static PARAGRAPH: LazyLock<Selector> = LazyLock::new(|| selector("p"));
static RATIO_NAME: LazyLock<Selector> = LazyLock::new(|| selector("h4.ratioName"));
static RATIO_VALUES: LazyLock<Selector> = LazyLock::new(|| selector("div.values"));
static SPAN: LazyLock<Selector> = LazyLock::new(|| selector("span"));

fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector must parse")
}

#[derive(Debug, Deserialize)]
struct StructuredName {
    name: String,
}

/// Builds a [`FundRecord`] from one factsheet page.
///
/// The fund name and expense ratio are required; without either the whole
/// fund is rejected. Each of the six ratio metrics is optional and falls back
/// to `0.00 / 0.00` on its own when its section is missing or malformed.
pub fn extract(document: &Html, url: &str) -> Result<FundRecord, ExtractionError> {
    let name = fund_name(document, url)?;
    let expense_ratio = expense_ratio(document, url)?;
    debug!(%name, expense_ratio, "Resolved fund identity");

    let mut record = FundRecord::new(name, expense_ratio);
    for metric in MetricName::ALL {
        match metric_pair(document, metric) {
            Ok(pair) => record.metrics.set(metric, pair),
            Err(reason) => warn!(
                url,
                metric = %metric,
                reason,
                "Metric section missing, defaulting to 0.00"
            ),
        }
    }
    Ok(record)
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn fund_name(document: &Html, url: &str) -> Result<String, ExtractionError> {
    let name_error = |reason: String| ExtractionError::NameParse {
        url: url.to_string(),
        reason,
    };

    let block = document
        .select(&LD_JSON)
        .nth(FUND_LD_JSON_INDEX)
        .ok_or_else(|| name_error("structured data block not found".to_string()))?;
    let raw: String = block.text().collect();

    let parsed: StructuredName =
        serde_json::from_str(&raw).map_err(|e| name_error(e.to_string()))?;
    Ok(parsed.name.trim().to_string())
}

/// Parses a page value. `NaN` and infinities are rejected like any other
/// non-numeric text so they never reach the score.
fn finite_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn expense_ratio(document: &Html, url: &str) -> Result<f64, ExtractionError> {
    let missing = || ExtractionError::ExpenseRatioMissing {
        url: url.to_string(),
    };

    let label = document
        .select(&PARAGRAPH)
        .find(|p| element_text(*p) == EXPENSE_RATIO_LABEL)
        .ok_or_else(missing)?;
    let value = label
        .next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|el| el.value().name() == "p")
        .ok_or_else(missing)?;

    let text = element_text(value);
    finite_number(text.trim_matches('%')).ok_or_else(|| ExtractionError::ExpenseRatioInvalid {
        url: url.to_string(),
        value: text.clone(),
    })
}

fn metric_pair(document: &Html, metric: MetricName) -> Result<MetricPair, &'static str> {
    let heading = document
        .select(&RATIO_NAME)
        .find(|h| element_text(*h) == metric.label())
        .ok_or("heading not found")?;
    let section = heading
        .parent()
        .and_then(ElementRef::wrap)
        .ok_or("heading has no parent element")?;
    let values = section
        .select(&RATIO_VALUES)
        .next()
        .ok_or("values block not found")?;

    let numbers: Vec<String> = values.select(&SPAN).map(element_text).collect();
    let [fund, avg] = numbers.as_slice() else {
        return Err("expected exactly two values");
    };
    let fund = finite_number(fund).ok_or("fund value is not numeric")?;
    let avg = finite_number(avg).ok_or("category average is not numeric")?;
    Ok(MetricPair::new(fund, avg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::fixtures::{FactsheetFixture, full_fixture};

    const URL: &str = "https://example.com/fund";

    fn parse(html: &str) -> Html {
        Html::parse_document(html)
    }

    #[test]
    fn test_extract_complete_page() {
        let doc = parse(&full_fixture("Kotak Nifty Next 50 Index Fund").render());
        let record = extract(&doc, URL).unwrap();

        assert_eq!(record.name, "Kotak Nifty Next 50 Index Fund");
        assert_eq!(record.expense_ratio, 0.35);
        assert_eq!(record.metrics.standard_deviation, MetricPair::new(18.2, 17.9));
        assert_eq!(record.metrics.beta, MetricPair::new(0.98, 1.0));
        assert_eq!(record.metrics.sharpe_ratio, MetricPair::new(1.12, 0.95));
        assert_eq!(record.metrics.treynors_ratio, MetricPair::new(21.4, 18.6));
        assert_eq!(record.metrics.jensens_alpha, MetricPair::new(1.8, 0.7));
        assert_eq!(record.metrics.mean_return, MetricPair::new(24.5, 22.1));
    }

    #[test]
    fn test_missing_metric_section_defaults_only_that_metric() {
        let fixture = full_fixture("No Alpha Fund").without_metric(MetricName::JensensAlpha);
        let record = extract(&parse(&fixture.render()), URL).unwrap();

        assert_eq!(record.metrics.jensens_alpha, MetricPair::new(0.0, 0.0));
        assert_eq!(record.metrics.standard_deviation, MetricPair::new(18.2, 17.9));
        assert_eq!(record.metrics.beta, MetricPair::new(0.98, 1.0));
        assert_eq!(record.metrics.sharpe_ratio, MetricPair::new(1.12, 0.95));
        assert_eq!(record.metrics.treynors_ratio, MetricPair::new(21.4, 18.6));
        assert_eq!(record.metrics.mean_return, MetricPair::new(24.5, 22.1));
    }

    #[test]
    fn test_malformed_metric_values_default_to_zero() {
        let mut fixture = full_fixture("Odd Fund");
        fixture.raw_metrics.push((
            "Beta".to_string(),
            vec!["0.9".to_string(), "1.0".to_string(), "1.1".to_string()],
        ));
        fixture.raw_metrics.push((
            "Mean Return".to_string(),
            vec!["--".to_string(), "22.1".to_string()],
        ));
        let fixture = fixture
            .without_metric(MetricName::Beta)
            .without_metric(MetricName::MeanReturn);

        let record = extract(&parse(&fixture.render()), URL).unwrap();
        assert_eq!(record.metrics.beta, MetricPair::default());
        assert_eq!(record.metrics.mean_return, MetricPair::default());
        assert_eq!(record.metrics.sharpe_ratio, MetricPair::new(1.12, 0.95));
    }

    #[test]
    fn test_name_block_missing_aborts() {
        let fixture = FactsheetFixture {
            ld_json_blocks: vec![r#"{"@type": "Organization"}"#.to_string()],
            ..full_fixture("ignored")
        };
        let err = extract(&parse(&fixture.render()), URL).unwrap_err();
        assert!(matches!(err, ExtractionError::NameParse { .. }));
    }

    #[test]
    fn test_name_block_invalid_json_aborts() {
        let fixture = FactsheetFixture {
            ld_json_blocks: vec![
                r#"{"@type": "Organization"}"#.to_string(),
                "{ not json".to_string(),
            ],
            ..full_fixture("ignored")
        };
        let err = extract(&parse(&fixture.render()), URL).unwrap_err();
        assert!(matches!(err, ExtractionError::NameParse { .. }));
    }

    #[test]
    fn test_expense_ratio_missing_aborts() {
        let fixture = FactsheetFixture {
            expense_ratio: None,
            ..full_fixture("No Expense Fund")
        };
        let err = extract(&parse(&fixture.render()), URL).unwrap_err();
        assert!(matches!(err, ExtractionError::ExpenseRatioMissing { .. }));
    }

    #[test]
    fn test_expense_ratio_not_numeric_aborts() {
        let fixture = FactsheetFixture {
            expense_ratio: Some("N.A.".to_string()),
            ..full_fixture("Odd Expense Fund")
        };
        let err = extract(&parse(&fixture.render()), URL).unwrap_err();
        assert!(matches!(
            err,
            ExtractionError::ExpenseRatioInvalid { ref value, .. } if value == "N.A."
        ));
    }

    #[test]
    fn test_expense_ratio_without_percent_sign() {
        let fixture = FactsheetFixture {
            expense_ratio: Some(" 1.02 ".to_string()),
            ..full_fixture("Plain Expense Fund")
        };
        let record = extract(&parse(&fixture.render()), URL).unwrap();
        assert_eq!(record.expense_ratio, 1.02);
    }

    #[test]
    fn test_non_finite_expense_ratio_is_invalid() {
        for raw in ["NaN%", "inf", "-Infinity%"] {
            let fixture = FactsheetFixture {
                expense_ratio: Some(raw.to_string()),
                ..full_fixture("Garbage Fund")
            };
            let err = extract(&parse(&fixture.render()), URL).unwrap_err();
            assert!(
                matches!(err, ExtractionError::ExpenseRatioInvalid { .. }),
                "{raw}: {err}"
            );
        }
    }

    #[test]
    fn test_non_finite_metric_values_default_to_zero() {
        let mut fixture = full_fixture("Glitchy Fund")
            .without_metric(MetricName::SharpeRatio)
            .without_metric(MetricName::StandardDeviation);
        fixture.raw_metrics.push((
            "Sharpe Ratio".to_string(),
            vec!["NaN".to_string(), "0.95".to_string()],
        ));
        fixture.raw_metrics.push((
            "Standard Deviation".to_string(),
            vec!["18.2".to_string(), "inf".to_string()],
        ));

        let record = extract(&parse(&fixture.render()), URL).unwrap();
        assert_eq!(record.metrics.sharpe_ratio, MetricPair::default());
        assert_eq!(record.metrics.standard_deviation, MetricPair::default());
        assert_eq!(record.metrics.beta, MetricPair::new(0.98, 1.0));
    }

    #[test]
    fn test_fund_name_is_trimmed() {
        let doc = parse(&full_fixture("  Padded  Fund ").render());
        let record = extract(&doc, URL).unwrap();
        assert_eq!(record.name, "Padded  Fund");
    }
}
