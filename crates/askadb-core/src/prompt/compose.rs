use serde::{Deserialize, Serialize};

/// A question/SQL pair shown to the model as an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FewShotExample {
    pub question: String,
    pub sql: String,
}

const SYSTEM_GUIDANCE: &str = "\
You are a data analyst that translates business questions, written in \
Portuguese or English, into a single SQL query over the schema below.";

const GUIDELINES: &[&str] = &[
    "Generate only SELECT statements; never modify data.",
    "Prefer aggregations (SUM, COUNT, AVG) grouped by the dimensions the question mentions.",
    "Do not compute growth, variation or percentages in SQL; return the aggregated values and let the client derive them.",
    "Never use SELECT *; list the columns explicitly.",
    "Use table and column names exactly as they appear in the schema.",
    "Answer with the SQL only, without explanations or markdown.",
];

const BUILTIN_EXAMPLES: &[(&str, &str)] = &[
    (
        "Quais foram as vendas totais por região?",
        "SELECT region, SUM(sales_amount) AS total_sales_amount FROM sales GROUP BY region ORDER BY total_sales_amount DESC",
    ),
    (
        "Show the top 5 products by quantity sold",
        "SELECT product, SUM(quantity) AS total_quantity FROM sales GROUP BY product ORDER BY total_quantity DESC LIMIT 5",
    ),
    (
        "Como as vendas evoluíram mês a mês?",
        "SELECT month, SUM(sales_amount) AS total_sales_amount FROM sales GROUP BY month",
    ),
];

/// Instruction text for the language model. Caller examples replace the
/// built-in ones when present.
pub fn compose(question: &str, schema_text: &str, examples: &[FewShotExample]) -> String {
    let examples_block = if examples.is_empty() {
        BUILTIN_EXAMPLES
            .iter()
            .map(|(q, sql)| render_example(q, sql))
            .collect::<Vec<_>>()
            .join("\n\n")
    } else {
        examples
            .iter()
            .map(|ex| render_example(&ex.question, &ex.sql))
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    let guidelines = GUIDELINES
        .iter()
        .map(|g| format!("- {}", g))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "{guidance}\n\nSchema:\n{schema}\n\nExamples:\n{examples}\n\nGuidelines:\n{guidelines}\n\nQuestion: {question}\nSQL:",
        guidance = SYSTEM_GUIDANCE,
        schema = schema_text,
        examples = examples_block,
        guidelines = guidelines,
        question = question.trim(),
    )
}

fn render_example(question: &str, sql: &str) -> String {
    format!("Question: {}\nSQL: {}", question, sql)
}
