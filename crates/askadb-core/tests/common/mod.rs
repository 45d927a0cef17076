#![allow(dead_code)]

use std::path::PathBuf;

use askadb_core::schema::{parse_schema_text, Schema};

pub fn fixture_path(rel: &str) -> String {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(rel)
        .to_string_lossy()
        .to_string()
}

pub fn retail_schema() -> Schema {
    parse_schema_text(include_str!("../fixtures/schemas/retail.json")).expect("parse retail schema")
}

/// Questions used across tests; Portuguese and English, with and without cues.
pub const QUESTIONS: &[&str] = &[
    "Quero vendas por região no mês de maio",
    "Mostre os top 5 produtos por quantidade vendida",
    "asdf",
    "",
    "Como as vendas evoluíram mês a mês?",
    "sales by product and region",
    "top ten regions by revenue",
    "Qual o faturamento total?",
    "How many users signed up last week?",
    "ranking dos 10 melhores produtos por região e mês",
];
