//! Weights applied to each metric contribution of the composite score.

use super::metric::MetricName;

/// Fixed weight per scored quantity. Built once at startup and handed to the
/// scorer by reference; there are no setters.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightTable {
    beta: f64,
    standard_deviation: f64,
    sharpe_ratio: f64,
    treynors_ratio: f64,
    jensens_alpha: f64,
    mean_return: f64,
    expense_ratio: f64,
}

impl Default for WeightTable {
    fn default() -> Self {
        Self {
            beta: 0.10,
            standard_deviation: 0.10,
            sharpe_ratio: 0.25,
            treynors_ratio: 0.15,
            jensens_alpha: 0.15,
            mean_return: 0.20,
            expense_ratio: 0.05,
        }
    }
}

impl WeightTable {
    pub fn metric(&self, metric: MetricName) -> f64 {
        match metric {
            MetricName::StandardDeviation => self.standard_deviation,
            MetricName::Beta => self.beta,
            MetricName::SharpeRatio => self.sharpe_ratio,
            MetricName::TreynorsRatio => self.treynors_ratio,
            MetricName::JensensAlpha => self.jensens_alpha,
            MetricName::MeanReturn => self.mean_return,
        }
    }

    pub fn expense_ratio(&self) -> f64 {
        self.expense_ratio
    }

    pub fn total(&self) -> f64 {
        MetricName::ALL
            .iter()
            .map(|m| self.metric(*m))
            .sum::<f64>()
            + self.expense_ratio
    }
}
