//! Chart and follow-up suggestions derived from the question alone.
//!
//! Visualizations use the additive variant: every rule in
//! `VISUALIZATION_RULES` that matches contributes its chart, in table order,
//! deduplicated and capped at `MAX_SUGGESTIONS`. `table` is returned only
//! when no rule matched. Follow-ups use the first matching rule.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::agents::lexicon::{self, QuestionCues};

pub const MAX_SUGGESTIONS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Visualization {
    BarChart,
    LineChart,
    PieChart,
    Table,
}

impl Visualization {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visualization::BarChart => "bar_chart",
            Visualization::LineChart => "line_chart",
            Visualization::PieChart => "pie_chart",
            Visualization::Table => "table",
        }
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionBundle {
    pub visualizations: Vec<Visualization>,
    pub follow_ups: Vec<String>,
}

type CuePredicate = fn(&QuestionCues) -> bool;

const VISUALIZATION_RULES: &[(CuePredicate, Visualization)] = &[
    (compares_categories as CuePredicate, Visualization::BarChart),
    (follows_time as CuePredicate, Visualization::LineChart),
    (sales_without_breakdown as CuePredicate, Visualization::PieChart),
];

const FOLLOW_UP_RULES: &[(CuePredicate, &[&str])] = &[
    (mentions_region as CuePredicate, REGION_FOLLOW_UPS),
    (mentions_product as CuePredicate, PRODUCT_FOLLOW_UPS),
];

const REGION_FOLLOW_UPS: &[&str] = &[
    "Qual região teve o maior crescimento de vendas?",
    "Como as vendas de cada região variaram mês a mês?",
];

const PRODUCT_FOLLOW_UPS: &[&str] = &[
    "Quais produtos tiveram a maior quantidade vendida?",
    "Como as vendas de cada produto evoluíram ao longo dos meses?",
];

const GENERIC_FOLLOW_UPS: &[&str] = &[
    "Quais foram as vendas totais por região?",
    "Quais são os 5 produtos mais vendidos?",
];

fn mentions_region(c: &QuestionCues) -> bool {
    c.mentions(&lexicon::REGION)
}

fn mentions_product(c: &QuestionCues) -> bool {
    c.mentions(&lexicon::PRODUCT)
}

fn mentions_measure(c: &QuestionCues) -> bool {
    c.mentions(&lexicon::SALES) || c.mentions(&lexicon::QUANTITY)
}

fn compares_categories(c: &QuestionCues) -> bool {
    mentions_measure(c) && (mentions_region(c) || mentions_product(c))
}

fn follows_time(c: &QuestionCues) -> bool {
    c.mentions(&lexicon::TIME) || c.mentions(&lexicon::TREND)
}

fn sales_without_breakdown(c: &QuestionCues) -> bool {
    c.mentions(&lexicon::SALES) && !mentions_region(c) && !mentions_product(c)
}

pub fn suggest(question: &str) -> SuggestionBundle {
    let cues = QuestionCues::scan(question);

    let mut visualizations: Vec<Visualization> = Vec::new();
    for (matches, chart) in VISUALIZATION_RULES {
        if visualizations.len() == MAX_SUGGESTIONS {
            break;
        }
        if matches(&cues) && !visualizations.contains(chart) {
            visualizations.push(*chart);
        }
    }
    if visualizations.is_empty() {
        visualizations.push(Visualization::Table);
    }

    let follow_ups = FOLLOW_UP_RULES
        .iter()
        .find(|(matches, _)| matches(&cues))
        .map(|(_, questions)| *questions)
        .unwrap_or(GENERIC_FOLLOW_UPS)
        .iter()
        .take(MAX_SUGGESTIONS)
        .map(|q| q.to_string())
        .collect();

    SuggestionBundle {
        visualizations,
        follow_ups,
    }
}
