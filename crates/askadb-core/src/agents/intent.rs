use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agents::lexicon::{self, QuestionCues, Synonyms};

/// Rank size used when a ranking question names no number.
pub const DEFAULT_RANK_LIMIT: u32 = 5;
/// Upper bound the query builder clamps any rank limit to.
pub const MAX_RANK_LIMIT: u32 = 100;
/// Numbers written as digits that are read as a rank size.
pub const RANK_SIZES: &[u32] = &[5, 10];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionRole {
    Time,
    Product,
    Region,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasureRole {
    /// Money-like totals (`sales_amount`)
    Amount,
    /// Unit counts (`quantity`)
    Count,
}

/// Structured reading of a question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    /// Always in canonical order: time, product, region.
    pub dimensions: Vec<DimensionRole>,
    pub measure: MeasureRole,
    pub wants_ranking: bool,
    /// Set only when `wants_ranking`.
    pub rank_limit: Option<u32>,
    pub is_trend: bool,
}

// Evaluated top to bottom; the first match wins.
const MEASURE_RULES: &[(&Synonyms, MeasureRole)] = &[(&lexicon::QUANTITY, MeasureRole::Count)];

// Canonical emission order, independent of word order in the question.
const DIMENSION_RULES: &[(DimensionRole, &Synonyms)] = &[
    (DimensionRole::Time, &lexicon::TIME),
    (DimensionRole::Product, &lexicon::PRODUCT),
    (DimensionRole::Region, &lexicon::REGION),
];

const TREND_CUES: &[&Synonyms] = &[&lexicon::TIME, &lexicon::TREND];

const RANKING_CUES: &[&Synonyms] = &[&lexicon::RANKING];

/// Classify a question into dimensions, measure, ranking and trend flags.
/// Pure: the same text always yields the same intent.
pub fn classify(question: &str) -> Intent {
    let cues = QuestionCues::scan(question);

    let measure = MEASURE_RULES
        .iter()
        .find(|(syn, _)| cues.mentions(syn))
        .map(|(_, role)| *role)
        .unwrap_or(MeasureRole::Amount);

    let mut dimensions: Vec<DimensionRole> = DIMENSION_RULES
        .iter()
        .filter(|(_, syn)| cues.mentions(syn))
        .map(|(role, _)| *role)
        .collect();
    if dimensions.is_empty() {
        dimensions.push(DimensionRole::Product);
    }

    let is_trend = TREND_CUES.iter().any(|syn| cues.mentions(syn));

    let wants_ranking = RANKING_CUES.iter().any(|syn| cues.mentions(syn));
    let rank_limit = wants_ranking.then(|| rank_limit(&cues));

    let intent = Intent {
        dimensions,
        measure,
        wants_ranking,
        rank_limit,
        is_trend,
    };
    debug!(?intent, cues = ?cues.matched_roles(), "classified question");
    intent
}

fn rank_limit(cues: &QuestionCues) -> u32 {
    cues.first_integer_in(RANK_SIZES)
        .or_else(|| cues.first_number_word())
        .unwrap_or(DEFAULT_RANK_LIMIT)
}
