use std::sync::LazyLock;

use regex::Regex;

use crate::error::{require_input, Result};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?s)'(?:[^']|'')*'|"[^"]*"|`[^`]*`|--[^\n]*|/\*.*?\*/|[A-Za-z_][A-Za-z0-9_$.]*|\d+(?:\.\d+)?|<>|<=|>=|!=|\|\||::|\s+|."#,
    )
    .expect("sql token regex")
});

const KEYWORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BY", "CASE", "CHECK", "CONSTRAINT",
    "CREATE", "CROSS", "DEFAULT", "DELETE", "DESC", "DISTINCT", "DROP", "ELSE", "END", "EXISTS",
    "FALSE", "FOREIGN", "FROM", "FULL", "GROUP", "HAVING", "IN", "INDEX", "INNER", "INSERT", "INTO",
    "IS", "JOIN", "KEY", "LEFT", "LIKE", "LIMIT", "NOT", "NULL", "OFFSET", "ON", "OR", "ORDER",
    "OUTER", "PRIMARY", "REFERENCES", "RETURNING", "RIGHT", "SELECT", "SET", "TABLE", "THEN",
    "TRUE", "UNION", "UNIQUE", "UPDATE", "VALUES", "VIEW", "WHEN", "WHERE", "WITH",
];

const FUNCTIONS: &[&str] = &[
    "AVG", "COALESCE", "COUNT", "LOWER", "MAX", "MIN", "NOW", "ROUND", "SUM", "UPPER",
];

/// Clauses that start on their own line. Longest phrases first so that
/// `LEFT OUTER JOIN` wins over `LEFT JOIN`.
const CLAUSES: &[&[&str]] = &[
    &["LEFT", "OUTER", "JOIN"],
    &["RIGHT", "OUTER", "JOIN"],
    &["FULL", "OUTER", "JOIN"],
    &["GROUP", "BY"],
    &["ORDER", "BY"],
    &["INNER", "JOIN"],
    &["LEFT", "JOIN"],
    &["RIGHT", "JOIN"],
    &["FULL", "JOIN"],
    &["CROSS", "JOIN"],
    &["UNION", "ALL"],
    &["INSERT", "INTO"],
    &["DELETE", "FROM"],
    &["SELECT"],
    &["FROM"],
    &["WHERE"],
    &["HAVING"],
    &["LIMIT"],
    &["OFFSET"],
    &["JOIN"],
    &["UNION"],
    &["VALUES"],
    &["UPDATE"],
    &["SET"],
];

/// Clauses whose comma-separated bodies get one item per line.
const LIST_CLAUSES: &[&str] = &["SELECT", "GROUP BY", "ORDER BY", "SET", "VALUES"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Word(String),
    Keyword(String),
    Clause(String),
    Literal(String),
    Comment(String),
    Punct(String),
}

impl Token {
    fn text(&self) -> &str {
        match self {
            Token::Word(s)
            | Token::Keyword(s)
            | Token::Clause(s)
            | Token::Literal(s)
            | Token::Comment(s)
            | Token::Punct(s) => s,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SqlFormatOptions {
    pub indent: usize,
    pub uppercase_keywords: bool,
}

impl Default for SqlFormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            uppercase_keywords: true,
        }
    }
}

fn tokenize(input: &str, uppercase: bool) -> Vec<Token> {
    let raw: Vec<Token> = TOKEN_RE
        .find_iter(input)
        .filter_map(|m| {
            let text = m.as_str();
            let first = text.chars().next()?;
            if first.is_whitespace() {
                return None;
            }
            let token = if text.starts_with("--") || text.starts_with("/*") {
                Token::Comment(text.trim_end().to_string())
            } else if matches!(first, '\'' | '"' | '`') || first.is_ascii_digit() {
                Token::Literal(text.to_string())
            } else if first.is_ascii_alphabetic() || first == '_' {
                let upper = text.to_ascii_uppercase();
                if KEYWORDS.contains(&upper.as_str()) || FUNCTIONS.contains(&upper.as_str()) {
                    Token::Keyword(if uppercase { upper } else { text.to_string() })
                } else {
                    Token::Word(text.to_string())
                }
            } else {
                Token::Punct(text.to_string())
            };
            Some(token)
        })
        .collect();

    merge_clauses(raw)
}

fn merge_clauses(tokens: Vec<Token>) -> Vec<Token> {
    let mut out = Vec::with_capacity(tokens.len());
    let mut i = 0;

    'outer: while i < tokens.len() {
        for phrase in CLAUSES {
            let end = i + phrase.len();
            if end > tokens.len() {
                continue;
            }
            let matches = tokens[i..end].iter().zip(phrase.iter()).all(|(t, p)| {
                matches!(t, Token::Keyword(k) if k.eq_ignore_ascii_case(p))
            });
            if matches {
                let text = tokens[i..end]
                    .iter()
                    .map(Token::text)
                    .collect::<Vec<_>>()
                    .join(" ");
                out.push(Token::Clause(text));
                i = end;
                continue 'outer;
            }
        }
        out.push(tokens[i].clone());
        i += 1;
    }

    out
}

fn needs_space(before_prev: Option<&Token>, prev: Option<&Token>, current: &Token) -> bool {
    let Some(prev) = prev else {
        return false;
    };
    if matches!(current.text(), "," | ")" | ";" | ".") {
        return false;
    }
    if matches!(prev.text(), "(" | ".") {
        return false;
    }
    if current.text() == "(" {
        return match prev {
            // `INSERT INTO t (a, b)` is a column list, not a call.
            Token::Word(_) => matches!(before_prev, Some(Token::Clause(c)) if c.eq_ignore_ascii_case("INSERT INTO")),
            Token::Keyword(k) => !FUNCTIONS.contains(&k.to_ascii_uppercase().as_str()),
            _ => true,
        };
    }
    true
}

struct Writer {
    out: String,
    unit: String,
    at_line_start: bool,
    level: usize,
}

impl Writer {
    fn new(indent: usize) -> Self {
        Self {
            out: String::new(),
            unit: " ".repeat(indent),
            at_line_start: true,
            level: 0,
        }
    }

    fn newline(&mut self, level: usize) {
        let trimmed = self.out.trim_end_matches(' ').len();
        self.out.truncate(trimmed);
        if !self.out.is_empty() && !self.at_line_start {
            self.out.push('\n');
        }
        self.level = level;
        self.at_line_start = true;
    }

    fn push(&mut self, text: &str, space: bool) {
        if self.at_line_start {
            self.out.push_str(&self.unit.repeat(self.level));
            self.at_line_start = false;
        } else if space {
            self.out.push(' ');
        }
        self.out.push_str(text);
    }

    fn finish(self) -> String {
        self.out.trim_end().to_string()
    }
}

/// Reflow a SQL statement: one clause per line, clause bodies indented,
/// list items and `AND`/`OR` conditions broken onto their own lines.
///
/// Parenthesized groups stay on one line. String literals and identifiers are
/// never re-cased.
pub fn format_sql(input: &str, options: SqlFormatOptions) -> Result<String> {
    let input = require_input(input)?;
    let tokens = tokenize(input, options.uppercase_keywords);
    let mut writer = Writer::new(options.indent);
    let mut depth = 0usize;
    let mut list_clause = false;
    let mut prev: Option<&Token> = None;
    let mut before_prev: Option<&Token> = None;

    for token in &tokens {
        match token {
            Token::Clause(clause) if depth == 0 => {
                let clause_upper = clause.to_ascii_uppercase();
                writer.newline(0);
                writer.push(clause, false);
                list_clause = LIST_CLAUSES.contains(&clause_upper.as_str());
                if !clause_upper.starts_with("UNION") {
                    writer.newline(1);
                } else {
                    writer.newline(0);
                }
            }
            Token::Keyword(k)
                if depth == 0 && (k.eq_ignore_ascii_case("AND") || k.eq_ignore_ascii_case("OR")) =>
            {
                writer.newline(1);
                writer.push(k, false);
            }
            Token::Punct(p) if p == "," => {
                writer.push(p, false);
                if depth == 0 && list_clause {
                    writer.newline(1);
                }
            }
            Token::Punct(p) if p == "(" => {
                writer.push(p, needs_space(before_prev, prev, token));
                depth += 1;
            }
            Token::Punct(p) if p == ")" => {
                depth = depth.saturating_sub(1);
                writer.push(p, false);
            }
            Token::Punct(p) if p == ";" => {
                writer.push(p, false);
                writer.newline(0);
                list_clause = false;
            }
            Token::Comment(c) => {
                writer.push(c, prev.is_some());
                if c.starts_with("--") {
                    let level = writer.level;
                    writer.newline(level);
                }
            }
            _ => writer.push(token.text(), needs_space(before_prev, prev, token)),
        }
        before_prev = prev;
        prev = Some(token);
    }

    Ok(writer.finish())
}

/// Collapse a statement onto one line and drop comments. Case is preserved.
pub fn minify_sql(input: &str) -> Result<String> {
    let input = require_input(input)?;
    let tokens: Vec<Token> = tokenize(input, false)
        .into_iter()
        .filter(|t| !matches!(t, Token::Comment(_)))
        .collect();

    let mut out = String::new();
    let mut prev: Option<&Token> = None;
    let mut before_prev: Option<&Token> = None;
    for token in &tokens {
        if needs_space(before_prev, prev, token) {
            out.push(' ');
        }
        out.push_str(token.text());
        before_prev = prev;
        prev = Some(token);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn fmt(sql: &str) -> String {
        format_sql(sql, SqlFormatOptions::default()).unwrap()
    }

    fn arb_query() -> impl Strategy<Value = String> {
        let ident = "c_[a-z]{1,5}";
        let column = prop_oneof![
            ident,
            ident.prop_map(|c| format!("count({c})")),
            ident.prop_map(|c| format!("t.{c}")),
        ];
        let literal = prop_oneof!["[0-9]{1,4}", "'[a-z ]{0,8}'"];
        let condition = (ident, prop_oneof![Just("="), Just("<>"), Just(">=")], literal)
            .prop_map(|(column, op, value)| format!("{column} {op} {value}"));
        (
            prop::collection::vec(column, 1..4),
            ident,
            prop::collection::vec(condition, 0..3),
            prop::option::of(ident),
        )
            .prop_map(|(columns, table, conditions, order)| {
                let mut sql = format!("select {} from {table}", columns.join(", "));
                for (i, condition) in conditions.iter().enumerate() {
                    sql.push_str(if i == 0 { " where " } else { " and " });
                    sql.push_str(condition);
                }
                if let Some(order) = order {
                    sql.push_str(&format!(" order by {order}"));
                }
                sql
            })
    }

    proptest! {
        #[test]
        fn prop_format_is_idempotent(sql in arb_query()) {
            let once = fmt(&sql);
            prop_assert_eq!(fmt(&once), once);
        }

        #[test]
        fn prop_minify_is_idempotent(sql in arb_query()) {
            let once = minify_sql(&sql).unwrap();
            prop_assert_eq!(minify_sql(&once).unwrap(), once);
        }

        #[test]
        fn prop_format_keeps_every_token(sql in arb_query()) {
            let options = SqlFormatOptions {
                indent: 4,
                uppercase_keywords: false,
            };
            let formatted = format_sql(&sql, options).unwrap();
            prop_assert_eq!(minify_sql(&formatted).unwrap(), minify_sql(&sql).unwrap());
        }
    }

    #[test]
    fn test_format_sql_select() {
        let out = fmt("select id, name from users where active = 1 and age > 18 order by name");
        assert_eq!(
            out,
            "SELECT\n  id,\n  name\nFROM\n  users\nWHERE\n  active = 1\n  AND age > 18\nORDER BY\n  name"
        );
    }

    #[test]
    fn test_format_sql_keeps_string_literals() {
        let out = fmt("select * from t where name = 'select from where'");
        assert!(out.contains("'select from where'"));
    }

    #[test]
    fn test_format_sql_function_calls() {
        let out = fmt("select count(*) from t where id in (1,2)");
        assert!(out.contains("COUNT(*)"));
        assert!(out.contains("IN (1, 2)"));
    }

    #[test]
    fn test_format_sql_joins() {
        let out = fmt("select a.id from a left outer join b on a.id = b.a_id");
        assert!(out.contains("\nLEFT OUTER JOIN\n  b ON a.id = b.a_id"));
    }

    #[test]
    fn test_format_sql_is_idempotent() {
        let sql = "select a, b from t -- trailing\nwhere x = 'y' or z is null group by a;";
        let once = fmt(sql);
        assert_eq!(fmt(&once), once);
    }

    #[test]
    fn test_format_sql_lowercase_option() {
        let out = format_sql(
            "select id from t",
            SqlFormatOptions {
                indent: 4,
                uppercase_keywords: false,
            },
        )
        .unwrap();
        assert_eq!(out, "select\n    id\nfrom\n    t");
    }

    #[test]
    fn test_format_sql_insert() {
        let out = fmt("insert into t (a, b) values (1, 'x'), (2, 'y')");
        assert_eq!(out, "INSERT INTO\n  t (a, b)\nVALUES\n  (1, 'x'),\n  (2, 'y')");
    }

    #[test]
    fn test_format_sql_empty() {
        assert!(format_sql("   ", SqlFormatOptions::default())
            .unwrap_err()
            .is_empty_input());
    }

    #[test]
    fn test_minify_sql() {
        let out = minify_sql("SELECT  id ,\n name -- c\nFROM   users ;").unwrap();
        assert_eq!(out, "SELECT id, name FROM users;");
    }

    #[test]
    fn test_minify_sql_idempotent() {
        let once = minify_sql("select a,\n b from t where (x = 1)").unwrap();
        assert_eq!(minify_sql(&once).unwrap(), once);
    }
}
