//! 宏集合：模板字面量风格的构建入口。
//! JS 的 `` SQL`...${v}...` `` 标签在 Rust 里没有对应语法，
//! 这里用 `sql!("..." {v} "...")` 的交替写法还原同样的边界不变量。

/// SQL 模板标签：交替书写字符串字面量与 `{ 表达式 }` 插值。
///
/// 插值按 [`crate::Part`] 归类：普通值变成占位符，[`crate::raw`] 片段原样
/// 拼入，另一条 [`crate::Statement`] 按结构拼入。字面量与插值的排列不限：
/// 开头/结尾是插值、插值连续出现时，宏会补上模板省略的空 segment，
/// 保证 `segments == 插值 + 1` 后交给 [`crate::build`]。
///
/// ```
/// use halo_statement::sql;
///
/// let book = "harry potter";
/// let query = sql!("SELECT author FROM books WHERE name = " {book});
/// assert_eq!(query.text(), "SELECT author FROM books WHERE name = $1");
/// ```
#[macro_export]
macro_rules! sql {
    () => {
        $crate::Statement::default()
    };
    ($($tt:tt)+) => {{
        let mut segments = ::std::vec::Vec::<::std::string::String>::new();
        let mut parts = ::std::vec::Vec::<$crate::Part>::new();
        $crate::__sql_tag!(segments, parts, $($tt)+);
        if segments.len() == parts.len() {
            segments.push(::std::string::String::new());
        }
        $crate::build(segments, parts)
    }};
}
pub use crate::sql;

#[doc(hidden)]
#[macro_export]
macro_rules! __sql_tag {
    ($segs:ident, $parts:ident,) => {};
    ($segs:ident, $parts:ident, $lit:literal $($rest:tt)*) => {
        if $segs.len() > $parts.len() {
            if let ::std::option::Option::Some(last) = $segs.last_mut() {
                last.push_str($lit);
            }
        } else {
            $segs.push(::std::string::String::from($lit));
        }
        $crate::__sql_tag!($segs, $parts, $($rest)*);
    };
    ($segs:ident, $parts:ident, { $part:expr } $($rest:tt)*) => {
        if $segs.len() == $parts.len() {
            $segs.push(::std::string::String::new());
        }
        $parts.push($crate::Part::from($part));
        $crate::__sql_tag!($segs, $parts, $($rest)*);
    };
}

/// 为 `Statement::append_all` 提供不定长参数调用，条目可以混合
/// 语句、字符串与 raw 片段。
///
/// ```
/// use halo_statement::{append_all, sql};
///
/// let mut query = sql!("SELECT * FROM books WHERE id IN (");
/// append_all!(query, ", ", sql!("" {1_i64}), sql!("" {2_i64}));
/// query.append(")");
/// assert_eq!(query.sql(), "SELECT * FROM books WHERE id IN (?, ?)");
/// ```
#[macro_export]
macro_rules! append_all {
    ($stmt:expr, $delim:expr $(,)?) => {
        $stmt.append_all(::std::iter::empty::<$crate::Appendable>(), $delim)
    };
    ($stmt:expr, $delim:expr $(, $item:expr)+ $(,)?) => {
        $stmt.append_all([$($crate::Appendable::from($item)),+], $delim)
    };
}
pub use crate::append_all;
