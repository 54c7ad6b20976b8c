//! # Scoring and Aggregation
//!
//! Deterministic arithmetic over the flat list of rated items belonging to
//! one task:
//!
//! ```text
//! item score        = rating weight × item max score
//! compliance rate   = compliant / applicable × 100          (applicable: rating ≠ not_applicable)
//! dimension percent = Σ score / Σ max × 100                  (per template dimension)
//! weighted score    = Σ (weight × dimension percent) / Σ weight
//! ```
//!
//! Percentages are rounded to two decimals. Every function is pure.

use serde::{Deserialize, Serialize};

use crate::rating::Rating;
use crate::template::Template;

/// One rated item, as seen by the aggregation routines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem<'a> {
    /// Id of the dimension the item belongs to.
    pub dimension: &'a str,
    pub rating: Rating,
    pub score: f64,
    pub max_score: f64,
}

impl<'a> ScoredItem<'a> {
    /// An item whose score is derived from its rating.
    pub fn rated(dimension: &'a str, rating: Rating, max_score: f64) -> Self {
        Self {
            dimension,
            rating,
            score: item_score(rating, max_score),
            max_score,
        }
    }
}

/// Aggregate score of one template dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionScore {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub item_count: usize,
    pub score: f64,
    pub max_score: f64,
    /// `score / max_score × 100`, two decimals.
    pub percentage: f64,
}

/// Number of items in each rating.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingDistribution {
    pub compliant: usize,
    pub partial: usize,
    pub non_compliant: usize,
    pub not_applicable: usize,
    pub not_started: usize,
}

impl RatingDistribution {
    fn record(&mut self, rating: Rating) {
        match rating {
            Rating::Compliant => self.compliant += 1,
            Rating::Partial => self.partial += 1,
            Rating::NonCompliant => self.non_compliant += 1,
            Rating::NotApplicable => self.not_applicable += 1,
            Rating::NotStarted => self.not_started += 1,
        }
    }
}

/// Full result of evaluating a task's items against its template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub total_items: usize,
    /// Items rated compliant, partial or non-compliant.
    pub completed_items: usize,
    pub total_score: f64,
    pub max_score: f64,
    pub compliance_rate: f64,
    pub weighted_score: f64,
    pub dimension_scores: Vec<DimensionScore>,
    pub rating_distribution: RatingDistribution,
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Score awarded to an item rated `rating` with maximum `max_score`.
pub fn item_score(rating: Rating, max_score: f64) -> f64 {
    rating.score(max_score)
}

/// Percentage of applicable items rated compliant.
///
/// Not-applicable items are left out of the denominator; not-started items
/// stay in it. Returns 0 when no item is applicable.
pub fn compliance_rate(items: &[ScoredItem<'_>]) -> f64 {
    let applicable = items.iter().filter(|i| i.rating.is_applicable()).count();
    if applicable == 0 {
        return 0.0;
    }
    let compliant = items
        .iter()
        .filter(|i| i.rating == Rating::Compliant)
        .count();
    round2(compliant as f64 / applicable as f64 * 100.0)
}

/// Sum of item scores.
pub fn total_score(items: &[ScoredItem<'_>]) -> f64 {
    items.iter().map(|i| i.score).sum()
}

/// Sum of item maxima.
pub fn max_total(items: &[ScoredItem<'_>]) -> f64 {
    items.iter().map(|i| i.max_score).sum()
}

/// Items that have a definite compliant/partial/non-compliant outcome.
pub fn completed_count(items: &[ScoredItem<'_>]) -> usize {
    items
        .iter()
        .filter(|i| i.rating.is_assessed() && i.rating.is_applicable())
        .count()
}

/// Count items per rating.
pub fn rating_distribution(items: &[ScoredItem<'_>]) -> RatingDistribution {
    let mut dist = RatingDistribution::default();
    for item in items {
        dist.record(item.rating);
    }
    dist
}

/// Per-dimension aggregates, in template order.
///
/// Dimensions without items are omitted. Items whose dimension the template
/// does not declare are ignored.
pub fn dimension_scores(template: &Template, items: &[ScoredItem<'_>]) -> Vec<DimensionScore> {
    template
        .dimensions
        .iter()
        .filter_map(|dim| {
            let (count, score, max) = items
                .iter()
                .filter(|i| i.dimension == dim.id)
                .fold((0usize, 0.0f64, 0.0f64), |(n, s, m), i| {
                    (n + 1, s + i.score, m + i.max_score)
                });
            if count == 0 {
                return None;
            }
            let percentage = if max > 0.0 {
                round2(score / max * 100.0)
            } else {
                0.0
            };
            Some(DimensionScore {
                id: dim.id.clone(),
                name: dim.name.clone(),
                weight: dim.weight,
                item_count: count,
                score,
                max_score: max,
                percentage,
            })
        })
        .collect()
}

/// Weighted mean of dimension percentages, using the dimension weights.
pub fn weighted_score(dimensions: &[DimensionScore]) -> f64 {
    let total_weight: f64 = dimensions.iter().map(|d| d.weight).sum();
    if total_weight <= 0.0 {
        return 0.0;
    }
    let weighted: f64 = dimensions.iter().map(|d| d.weight * d.percentage).sum();
    round2(weighted / total_weight)
}

/// Evaluate a task's items against its template.
pub fn evaluate(template: &Template, items: &[ScoredItem<'_>]) -> AssessmentResult {
    let dimension_scores = dimension_scores(template, items);
    AssessmentResult {
        total_items: items.len(),
        completed_items: completed_count(items),
        total_score: total_score(items),
        max_score: max_total(items),
        compliance_rate: compliance_rate(items),
        weighted_score: weighted_score(&dimension_scores),
        dimension_scores,
        rating_distribution: rating_distribution(items),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::djcp;

    fn rated(dim: &str, rating: Rating) -> ScoredItem<'_> {
        ScoredItem::rated(dim, rating, 5.0)
    }

    #[test]
    fn compliance_rate_excludes_not_applicable() {
        let items = vec![
            rated("tech", Rating::Compliant),
            rated("tech", Rating::NonCompliant),
            rated("tech", Rating::NotApplicable),
            rated("tech", Rating::NotApplicable),
        ];
        assert_eq!(compliance_rate(&items), 50.0);
    }

    #[test]
    fn compliance_rate_counts_not_started_as_applicable() {
        let items = vec![
            rated("tech", Rating::Compliant),
            rated("tech", Rating::NotStarted),
            rated("tech", Rating::NotStarted),
        ];
        assert_eq!(compliance_rate(&items), 33.33);
    }

    #[test]
    fn compliance_rate_zero_when_nothing_applicable() {
        assert_eq!(compliance_rate(&[]), 0.0);
        assert_eq!(compliance_rate(&[rated("tech", Rating::NotApplicable)]), 0.0);
    }

    #[test]
    fn partial_scores_half() {
        let items = vec![rated("tech", Rating::Partial), rated("tech", Rating::Compliant)];
        assert_eq!(total_score(&items), 7.5);
        assert_eq!(max_total(&items), 10.0);
        // Partial does not count as compliant.
        assert_eq!(compliance_rate(&items), 50.0);
    }

    #[test]
    fn completed_excludes_not_started_and_not_applicable() {
        let items = vec![
            rated("tech", Rating::Compliant),
            rated("tech", Rating::Partial),
            rated("tech", Rating::NonCompliant),
            rated("tech", Rating::NotApplicable),
            rated("tech", Rating::NotStarted),
        ];
        assert_eq!(completed_count(&items), 3);
        let dist = rating_distribution(&items);
        assert_eq!(
            dist,
            RatingDistribution {
                compliant: 1,
                partial: 1,
                non_compliant: 1,
                not_applicable: 1,
                not_started: 1,
            }
        );
    }

    #[test]
    fn dimension_scores_follow_template_order() {
        let template = djcp::template();
        let items = vec![
            rated("manage", Rating::Compliant),
            rated("tech", Rating::Partial),
            rated("tech", Rating::Compliant),
        ];
        let dims = dimension_scores(&template, &items);
        assert_eq!(dims.len(), 2);
        assert_eq!(dims[0].id, "tech");
        assert_eq!(dims[0].item_count, 2);
        assert_eq!(dims[0].percentage, 75.0);
        assert_eq!(dims[1].id, "manage");
        assert_eq!(dims[1].percentage, 100.0);
    }

    #[test]
    fn dimensions_without_items_are_omitted() {
        let template = djcp::template();
        let items = vec![rated("manage", Rating::NonCompliant)];
        let dims = dimension_scores(&template, &items);
        assert_eq!(dims.len(), 1);
        assert_eq!(dims[0].percentage, 0.0);
    }

    #[test]
    fn unknown_dimension_ignored() {
        let template = djcp::template();
        let items = vec![rated("physical", Rating::Compliant)];
        assert!(dimension_scores(&template, &items).is_empty());
    }

    #[test]
    fn weighted_score_uses_dimension_weights() {
        let template = djcp::template();
        // tech (0.6) at 100%, manage (0.4) at 0%.
        let items = vec![rated("tech", Rating::Compliant), rated("manage", Rating::NonCompliant)];
        let dims = dimension_scores(&template, &items);
        assert_eq!(weighted_score(&dims), 60.0);
    }

    #[test]
    fn weighted_score_renormalizes_missing_dimensions() {
        let template = djcp::template();
        let items = vec![rated("manage", Rating::Partial)];
        let dims = dimension_scores(&template, &items);
        assert_eq!(weighted_score(&dims), 50.0);
        assert_eq!(weighted_score(&[]), 0.0);
    }

    #[test]
    fn evaluate_bundles_all_aggregates() {
        let template = djcp::template();
        let items: Vec<_> = template
            .items
            .iter()
            .map(|i| ScoredItem::rated(&i.dimension, Rating::Compliant, i.max_score as f64))
            .collect();
        let result = evaluate(&template, &items);
        assert_eq!(result.total_items, 22);
        assert_eq!(result.completed_items, 22);
        assert_eq!(result.total_score, 110.0);
        assert_eq!(result.max_score, 110.0);
        assert_eq!(result.compliance_rate, 100.0);
        assert_eq!(result.weighted_score, 100.0);
        assert_eq!(result.rating_distribution.compliant, 22);
    }

    #[test]
    fn round2_rounds_half_away_from_zero() {
        assert_eq!(round2(66.666_666), 66.67);
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(0.0), 0.0);
    }
}
