//! Fund metric types and the fixed column schema of a ranking table

use std::fmt::Display;

pub const FUND_NAME_COLUMN: &str = "Fund name";
pub const EXPENSE_RATIO_COLUMN: &str = "Expense Ratio";
pub const SCORE_COLUMN: &str = "Score";

/// How a metric's fund value compares against its category average.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioDirection {
    /// Lower fund value is better: contribution is `avg / fund`.
    AvgOverFund,
    /// Higher fund value is better: contribution is `fund / avg`.
    FundOverAvg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum MetricName {
    StandardDeviation,
    Beta,
    SharpeRatio,
    TreynorsRatio,
    JensensAlpha,
    MeanReturn,
}

impl MetricName {
    /// All metrics in table column order.
    pub const ALL: [MetricName; 6] = [
        MetricName::StandardDeviation,
        MetricName::Beta,
        MetricName::SharpeRatio,
        MetricName::TreynorsRatio,
        MetricName::JensensAlpha,
        MetricName::MeanReturn,
    ];

    /// Label as printed on the factsheet page.
    pub fn label(&self) -> &'static str {
        match self {
            MetricName::StandardDeviation => "Standard Deviation",
            MetricName::Beta => "Beta",
            MetricName::SharpeRatio => "Sharpe Ratio",
            MetricName::TreynorsRatio => "Treynor's Ratio",
            MetricName::JensensAlpha => "Jensen's Alpha",
            MetricName::MeanReturn => "Mean Return",
        }
    }

    pub fn direction(&self) -> RatioDirection {
        match self {
            MetricName::StandardDeviation | MetricName::Beta => RatioDirection::AvgOverFund,
            MetricName::SharpeRatio
            | MetricName::TreynorsRatio
            | MetricName::JensensAlpha
            | MetricName::MeanReturn => RatioDirection::FundOverAvg,
        }
    }

    pub fn fund_column(&self) -> String {
        format!("{} Fund", self.label())
    }

    pub fn avg_column(&self) -> String {
        format!("{} Avg", self.label())
    }
}

impl Display for MetricName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Fund value and category average for a single metric.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricPair {
    pub fund: f64,
    pub avg: f64,
}

impl MetricPair {
    pub fn new(fund: f64, avg: f64) -> Self {
        Self { fund, avg }
    }
}

/// One pair per [`MetricName`]. Every field is always present; a metric that
/// could not be read from the page stays at `0.00 / 0.00`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MetricValues {
    pub standard_deviation: MetricPair,
    pub beta: MetricPair,
    pub sharpe_ratio: MetricPair,
    pub treynors_ratio: MetricPair,
    pub jensens_alpha: MetricPair,
    pub mean_return: MetricPair,
}

impl MetricValues {
    pub fn get(&self, metric: MetricName) -> MetricPair {
        match metric {
            MetricName::StandardDeviation => self.standard_deviation,
            MetricName::Beta => self.beta,
            MetricName::SharpeRatio => self.sharpe_ratio,
            MetricName::TreynorsRatio => self.treynors_ratio,
            MetricName::JensensAlpha => self.jensens_alpha,
            MetricName::MeanReturn => self.mean_return,
        }
    }

    pub fn set(&mut self, metric: MetricName, pair: MetricPair) {
        let slot = match metric {
            MetricName::StandardDeviation => &mut self.standard_deviation,
            MetricName::Beta => &mut self.beta,
            MetricName::SharpeRatio => &mut self.sharpe_ratio,
            MetricName::TreynorsRatio => &mut self.treynors_ratio,
            MetricName::JensensAlpha => &mut self.jensens_alpha,
            MetricName::MeanReturn => &mut self.mean_return,
        };
        *slot = pair;
    }

    pub fn iter(&self) -> impl Iterator<Item = (MetricName, MetricPair)> + '_ {
        MetricName::ALL.into_iter().map(|m| (m, self.get(m)))
    }
}

/// Metrics extracted for one fund, not yet scored.
#[derive(Debug, Clone, PartialEq)]
pub struct FundRecord {
    pub name: String,
    pub expense_ratio: f64,
    pub metrics: MetricValues,
}

impl FundRecord {
    pub fn new(name: impl Into<String>, expense_ratio: f64) -> Self {
        Self {
            name: name.into(),
            expense_ratio,
            metrics: MetricValues::default(),
        }
    }

    pub fn with_metric(mut self, metric: MetricName, fund: f64, avg: f64) -> Self {
        self.metrics.set(metric, MetricPair::new(fund, avg));
        self
    }
}

/// A fund record together with its composite score; the row type of a
/// ranking table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredFund {
    pub record: FundRecord,
    pub score: f64,
}

impl ScoredFund {
    pub fn name(&self) -> &str {
        &self.record.name
    }
}

/// Column headers of a ranking table, in order.
pub fn table_columns() -> Vec<String> {
    let mut columns = vec![
        FUND_NAME_COLUMN.to_string(),
        EXPENSE_RATIO_COLUMN.to_string(),
    ];
    for metric in MetricName::ALL {
        columns.push(metric.fund_column());
        columns.push(metric.avg_column());
    }
    columns.push(SCORE_COLUMN.to_string());
    columns
}
