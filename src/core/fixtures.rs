//! Factsheet page builder for unit tests

use super::metric::MetricName;

#[derive(Debug, Clone)]
pub(crate) struct FactsheetFixture {
    pub ld_json_blocks: Vec<String>,
    pub expense_ratio: Option<String>,
    pub metrics: Vec<(MetricName, f64, f64)>,
    /// Extra ratio sections rendered verbatim: heading label and span texts.
    pub raw_metrics: Vec<(String, Vec<String>)>,
}

pub(crate) fn full_fixture(name: &str) -> FactsheetFixture {
    FactsheetFixture {
        ld_json_blocks: vec![
            r#"{"@context": "https://schema.org", "@type": "Organization", "name": "Publisher"}"#
                .to_string(),
            format!(r#"{{"@context": "https://schema.org", "@type": "Product", "name": "{name}"}}"#),
        ],
        expense_ratio: Some("0.35%".to_string()),
        metrics: vec![
            (MetricName::StandardDeviation, 18.2, 17.9),
            (MetricName::Beta, 0.98, 1.0),
            (MetricName::SharpeRatio, 1.12, 0.95),
            (MetricName::TreynorsRatio, 21.4, 18.6),
            (MetricName::JensensAlpha, 1.8, 0.7),
            (MetricName::MeanReturn, 24.5, 22.1),
        ],
        raw_metrics: Vec::new(),
    }
}

impl FactsheetFixture {
    pub fn without_metric(mut self, metric: MetricName) -> Self {
        self.metrics.retain(|(m, _, _)| *m != metric);
        self
    }

    pub fn render(&self) -> String {
        let mut html = String::from("<!DOCTYPE html><html><head>");
        for block in &self.ld_json_blocks {
            html.push_str(&format!(
                r#"<script type="application/ld+json">{block}</script>"#
            ));
        }
        html.push_str("</head><body>");

        if let Some(expense) = &self.expense_ratio {
            html.push_str(&format!(
                r#"<div class="expRatio"><p class="fs13 bold">Expense Ratio:</p><p class="fs13">{expense}</p></div>"#
            ));
        }

        let sections = self
            .metrics
            .iter()
            .map(|(m, fund, avg)| (m.label().to_string(), vec![fund.to_string(), avg.to_string()]))
            .chain(self.raw_metrics.iter().cloned());
        for (label, values) in sections {
            let spans: String = values
                .iter()
                .map(|v| format!("<span>{v}</span>"))
                .collect();
            html.push_str(&format!(
                r#"<div class="ratioBox"><h4 class="ratioName">{label}</h4><div class="values">{spans}</div></div>"#
            ));
        }

        html.push_str("</body></html>");
        html
    }
}
