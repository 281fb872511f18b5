//! 插值修饰器与分类类型（对齐 sql-template-strings 对插值的运行时分派，
//! Rust 版在转换期一次性归类成封闭枚举）。

use crate::statement::Statement;
use crate::value::SqlValue;

/// 受限 raw 构造器的校验错误。
///
/// raw 片段绕过占位符/参数表直接拼入 SQL 文本，校验失败必须显式报错，
/// 不允许静默放行。
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InvalidValue {
    #[error("statement keyword not in allow list: {0}")]
    KeywordNotAllowed(String),
    #[error("statement invalid identifier: {0}")]
    InvalidIdent(String),
}

/// Raw：原样拼入 SQL 的文本片段（不产生占位符，也不进入参数表）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFragment {
    pub(crate) expr: String,
}

impl RawFragment {
    /// 片段文本。
    pub fn as_str(&self) -> &str {
        &self.expr
    }
}

/// Raw：把 `expr` 标记为原样拼入（不校验，调用方自行保证安全）。
pub fn raw(expr: impl Into<String>) -> RawFragment {
    RawFragment { expr: expr.into() }
}

/// Keyword：校验 `word` 在 `allowed` 允许列表内（ASCII 大小写不敏感），
/// 通过后按原样拼入。典型用法是动态的 `ASC`/`DESC` 等关键字。
pub fn keyword(word: impl Into<String>, allowed: &[&str]) -> Result<RawFragment, InvalidValue> {
    let word = word.into();
    if allowed.iter().any(|k| k.eq_ignore_ascii_case(&word)) {
        Ok(RawFragment { expr: word })
    } else {
        Err(InvalidValue::KeywordNotAllowed(word))
    }
}

/// Ident：校验 `name` 是合法标识符后按原样拼入。
///
/// 规则：`[A-Za-z_][A-Za-z0-9_]*`，允许 `schema.table.column` 式的点号限定，
/// 每一段都不能为空。
pub fn ident(name: impl Into<String>) -> Result<RawFragment, InvalidValue> {
    let name = name.into();
    let valid_part = |part: &str| {
        let mut chars = part.chars();
        match chars.next() {
            Some(c) if c.is_ascii_alphabetic() || c == '_' => {
                chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
            }
            _ => false,
        }
    };
    if !name.is_empty() && name.split('.').all(valid_part) {
        Ok(RawFragment { expr: name })
    } else {
        Err(InvalidValue::InvalidIdent(name))
    }
}

/// 模板插值的分类结果：构建时逐个归类，之后全部走 `match` 分派。
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    /// 文本直接拼到当前末尾 segment（不产生占位符）。
    Literal(String),
    /// 嵌套语句：整条语句按结构拼接进外层。
    Nested(Statement),
    /// Raw 片段：原样拼入。
    Raw(RawFragment),
    /// 普通绑定值：产生一个占位符和一个参数表条目。
    Scalar(SqlValue),
}

impl From<SqlValue> for Part {
    fn from(v: SqlValue) -> Self {
        Self::Scalar(v)
    }
}

impl From<Statement> for Part {
    fn from(v: Statement) -> Self {
        Self::Nested(v)
    }
}

impl From<RawFragment> for Part {
    fn from(v: RawFragment) -> Self {
        Self::Raw(v)
    }
}

impl From<bool> for Part {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v).into()
    }
}
impl From<i32> for Part {
    fn from(v: i32) -> Self {
        SqlValue::I64(v as i64).into()
    }
}
impl From<i64> for Part {
    fn from(v: i64) -> Self {
        SqlValue::I64(v).into()
    }
}
impl From<u32> for Part {
    fn from(v: u32) -> Self {
        SqlValue::U64(v as u64).into()
    }
}
impl From<u64> for Part {
    fn from(v: u64) -> Self {
        SqlValue::U64(v).into()
    }
}
impl From<f64> for Part {
    fn from(v: f64) -> Self {
        SqlValue::F64(v).into()
    }
}
impl From<&'static str> for Part {
    fn from(v: &'static str) -> Self {
        SqlValue::from(v).into()
    }
}
impl From<String> for Part {
    fn from(v: String) -> Self {
        SqlValue::from(v).into()
    }
}
impl From<Vec<u8>> for Part {
    fn from(v: Vec<u8>) -> Self {
        SqlValue::Bytes(v).into()
    }
}
impl From<time::OffsetDateTime> for Part {
    fn from(v: time::OffsetDateTime) -> Self {
        SqlValue::DateTime(v).into()
    }
}

impl<T> From<Option<T>> for Part
where
    T: Into<SqlValue>,
{
    fn from(v: Option<T>) -> Self {
        SqlValue::from_option(v).into()
    }
}

/// `append` / `append_all` 的入参：另一条语句，或原样文本。
///
/// 对齐 sql-template-strings 的 `append(statement|string|number)`：
/// 字符串与数字拼为文本，语句做结构化合并。
#[derive(Debug, Clone, PartialEq)]
pub enum Appendable {
    Statement(Statement),
    Text(String),
}

impl From<Statement> for Appendable {
    fn from(v: Statement) -> Self {
        Self::Statement(v)
    }
}

impl From<&str> for Appendable {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for Appendable {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<RawFragment> for Appendable {
    fn from(v: RawFragment) -> Self {
        Self::Text(v.expr)
    }
}

impl From<i64> for Appendable {
    fn from(v: i64) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<u64> for Appendable {
    fn from(v: u64) -> Self {
        Self::Text(v.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn raw_is_unchecked() {
        assert_eq!(raw("ORDER BY rating").as_str(), "ORDER BY rating");
        assert_eq!(raw("; DROP TABLE books").as_str(), "; DROP TABLE books");
    }

    #[test]
    fn keyword_accepts_allowed_case_insensitive() {
        let allowed = ["ASC", "DESC"];
        assert_eq!(keyword("DESC", &allowed).unwrap().as_str(), "DESC");
        assert_eq!(keyword("asc", &allowed).unwrap().as_str(), "asc");
    }

    #[test]
    fn keyword_rejects_unlisted() {
        let allowed = ["ASC", "DESC"];
        assert_eq!(
            keyword("DESC; --", &allowed),
            Err(InvalidValue::KeywordNotAllowed("DESC; --".to_string()))
        );
    }

    #[test]
    fn ident_accepts_plain_and_qualified() {
        assert_eq!(ident("books").unwrap().as_str(), "books");
        assert_eq!(ident("_tmp1").unwrap().as_str(), "_tmp1");
        assert_eq!(ident("public.books.id").unwrap().as_str(), "public.books.id");
    }

    #[test]
    fn ident_rejects_bad_syntax() {
        for bad in ["", "1abc", "a-b", "a..b", "books.", "a b", "a;b"] {
            assert_eq!(
                ident(bad),
                Err(InvalidValue::InvalidIdent(bad.to_string())),
                "expected rejection for {bad:?}"
            );
        }
    }

    #[test]
    fn part_classification_from_impls() {
        assert_eq!(Part::from(false), Part::Scalar(SqlValue::Bool(false)));
        assert_eq!(Part::from(0_i64), Part::Scalar(SqlValue::I64(0)));
        assert_eq!(Part::from(""), Part::Scalar(SqlValue::String("".into())));
        assert_eq!(
            Part::from(Option::<i64>::None),
            Part::Scalar(SqlValue::Null)
        );
        assert_eq!(
            Part::from(raw("now()")),
            Part::Raw(RawFragment {
                expr: "now()".to_string()
            })
        );
    }

    #[test]
    fn appendable_from_number_is_text() {
        assert_eq!(Appendable::from(10_i64), Appendable::Text("10".to_string()));
        assert_eq!(Appendable::from(10_u64), Appendable::Text("10".to_string()));
    }
}
