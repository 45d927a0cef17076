//! Keyword vocabulary shared by the intent classifier and the suggestion engine.
//!
//! Every semantic role owns one synonym set holding all supported languages
//! (Portuguese and English) side by side. Supporting another language means
//! extending the sets, not adding branches. Terms are matched against whole,
//! lower-cased tokens, so inflections are listed explicitly.

/// Synonyms for one semantic role.
#[derive(Debug, Clone, Copy)]
pub struct Synonyms {
    pub role: &'static str,
    pub terms: &'static [&'static str],
}

pub const SALES: Synonyms = Synonyms {
    role: "sales",
    terms: &[
        "venda", "vendas", "vendido", "vendida", "vendidos", "vendidas", "vender",
        "faturamento", "receita",
        "sale", "sales", "sold", "selling", "revenue",
    ],
};

pub const QUANTITY: Synonyms = Synonyms {
    role: "quantity",
    terms: &[
        "quantidade", "quantidades", "qtd", "qtde", "unidade", "unidades", "volume",
        "quantity", "quantities", "unit", "units",
    ],
};

pub const TIME: Synonyms = Synonyms {
    role: "time",
    terms: &[
        "mês", "mes", "meses", "mensal", "mensais", "mensalmente",
        "month", "months", "monthly",
    ],
};

pub const PRODUCT: Synonyms = Synonyms {
    role: "product",
    terms: &[
        "produto", "produtos", "item", "itens",
        "product", "products", "items",
    ],
};

pub const REGION: Synonyms = Synonyms {
    role: "region",
    terms: &[
        "região", "regiao", "regiões", "regioes", "regional", "regionais",
        "region", "regions",
    ],
};

pub const TREND: Synonyms = Synonyms {
    role: "trend",
    terms: &[
        "tendência", "tendencia", "tendências", "tendencias",
        "crescimento", "variação", "variacao", "evolução", "evolucao",
        "trend", "trends", "growth", "variation", "evolution",
    ],
};

pub const RANKING: Synonyms = Synonyms {
    role: "ranking",
    terms: &[
        "top", "ranking", "rank", "maiores", "melhores",
        "best", "biggest", "largest", "highest",
    ],
};

/// Spelled-out rank sizes.
/// Every synonym set, in the order cue traces list them.
pub const ALL: &[&Synonyms] = &[&SALES, &QUANTITY, &TIME, &PRODUCT, &REGION, &TREND, &RANKING];

pub const NUMBER_WORDS: &[(&str, u32)] = &[
    ("cinco", 5),
    ("five", 5),
    ("dez", 10),
    ("ten", 10),
];

/// Calendar position of every month, with the names a `month` column may hold.
pub const MONTHS: [(u8, &[&str]); 12] = [
    (1, &["january", "janeiro"]),
    (2, &["february", "fevereiro"]),
    (3, &["march", "março", "marco"]),
    (4, &["april", "abril"]),
    (5, &["may", "maio"]),
    (6, &["june", "junho"]),
    (7, &["july", "julho"]),
    (8, &["august", "agosto"]),
    (9, &["september", "setembro"]),
    (10, &["october", "outubro"]),
    (11, &["november", "novembro"]),
    (12, &["december", "dezembro"]),
];

/// Position given to month values outside the table.
pub const UNKNOWN_MONTH_POSITION: u8 = 99;

/// Lower-cased word tokens of a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCues {
    pub tokens: Vec<String>,
}

impl QuestionCues {
    pub fn scan(question: &str) -> Self {
        let tokens = question
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        Self { tokens }
    }

    pub fn mentions(&self, synonyms: &Synonyms) -> bool {
        self.tokens
            .iter()
            .any(|t| synonyms.terms.contains(&t.as_str()))
    }

    /// First integer token inside `range`.
    /// First numeric token whose value is one of `accepted`.
    pub fn first_integer_in(&self, accepted: &[u32]) -> Option<u32> {
        self.tokens
            .iter()
            .find_map(|t| t.parse::<u32>().ok().filter(|n| accepted.contains(n)))
    }

    /// Roles of the synonym sets the question mentions.
    pub fn matched_roles(&self) -> Vec<&'static str> {
        ALL.iter()
            .filter(|syn| self.mentions(syn))
            .map(|syn| syn.role)
            .collect()
    }

    pub fn first_number_word(&self) -> Option<u32> {
        self.tokens.iter().find_map(|t| {
            NUMBER_WORDS
                .iter()
                .find(|(word, _)| *word == t.as_str())
                .map(|(_, n)| *n)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_lowercased_and_split_on_punctuation() {
        let cues = QuestionCues::scan("Vendas por REGIÃO, mês-a-mês?");
        assert_eq!(cues.tokens, vec!["vendas", "por", "região", "mês", "a", "mês"]);
    }

    #[test]
    fn matching_is_whole_word() {
        assert!(!QuestionCues::scan("laptop stock").mentions(&RANKING));
        assert!(QuestionCues::scan("the top sellers").mentions(&RANKING));
        assert!(!QuestionCues::scan("no mesmo dia").mentions(&TIME));
    }

    #[test]
    fn matched_roles_follow_set_order() {
        let cues = QuestionCues::scan("top regiões por vendas mensais");
        assert_eq!(cues.matched_roles(), vec!["sales", "time", "region", "ranking"]);
    }

    #[test]
    fn synonym_sets_hold_both_languages() {
        assert!(QuestionCues::scan("sales by region").mentions(&REGION));
        assert!(QuestionCues::scan("vendas por região").mentions(&REGION));
        assert!(QuestionCues::scan("vendas por regiao").mentions(&REGION));
    }
}
