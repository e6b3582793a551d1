//! Composite scoring of extracted fund metrics

use super::metric::{FundRecord, MetricName, MetricPair, RatioDirection, ScoredFund};
use super::weights::WeightTable;

/// Weighted, direction-adjusted contribution of one metric.
///
/// A zero denominator yields `0.0`: the metric carries no signal rather
/// than an infinite one.
pub fn metric_contribution(metric: MetricName, pair: MetricPair, weights: &WeightTable) -> f64 {
    let (numerator, denominator) = match metric.direction() {
        RatioDirection::AvgOverFund => (pair.avg, pair.fund),
        RatioDirection::FundOverAvg => (pair.fund, pair.avg),
    };
    if denominator == 0.0 {
        return 0.0;
    }
    numerator / denominator * weights.metric(metric)
}

/// The raw expense ratio scaled by its weight. Not inverted, so a higher
/// expense ratio adds more to the score.
pub fn expense_contribution(expense_ratio: f64, weights: &WeightTable) -> f64 {
    expense_ratio * weights.expense_ratio()
}

/// Sum of all six metric contributions and the expense contribution,
/// without clamping.
pub fn composite_score(record: &FundRecord, weights: &WeightTable) -> f64 {
    let metrics: f64 = record
        .metrics
        .iter()
        .map(|(metric, pair)| metric_contribution(metric, pair, weights))
        .sum();
    metrics + expense_contribution(record.expense_ratio, weights)
}

pub fn score(record: FundRecord, weights: &WeightTable) -> ScoredFund {
    let score = composite_score(&record, weights);
    ScoredFund { record, score }
}
