//! Statement：模板字面量风格的 SQL 语句（对齐 sql-template-strings `SQLStatement`）。
//!
//! 一条语句持有按顺序交替的字面量 segments 与绑定值，渲染时才把
//! 占位符（`?` 或 `$n`）插在相邻 segment 之间，因此任何追加/合并之后
//! 读到的 SQL 都反映最新状态。

use crate::dialect::Dialect;
use crate::modifiers::{Appendable, Part};
use crate::value::SqlValue;
use std::fmt;

/// 参数表所处的模式：二者有且只有一个存在。
///
/// JS 版用 `delete this.values` / `this.bind = ...` 的字段存在性表达模式，
/// Rust 版收敛成带数据的枚举，"恰好一个被填充"由类型保证。
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// 普通模式：参数经 `values` 暴露，`query` 渲染 `?` 占位符。
    Values(Vec<SqlValue>),
    /// 绑定模式：参数经 `bind` 暴露，`query` 渲染 `$n` 占位符。
    Bind(Vec<SqlValue>),
}

impl Mode {
    fn list(&self) -> &[SqlValue] {
        match self {
            Self::Values(list) | Self::Bind(list) => list,
        }
    }

    fn list_mut(&mut self) -> &mut Vec<SqlValue> {
        match self {
            Self::Values(list) | Self::Bind(list) => list,
        }
    }

    fn into_list(self) -> Vec<SqlValue> {
        match self {
            Self::Values(list) | Self::Bind(list) => list,
        }
    }

    fn is_bind(&self) -> bool {
        matches!(self, Self::Bind(_))
    }
}

/// 模板字面量构建出的 SQL 语句。
///
/// 不变量：`segments.len() == 参数个数 + 1`（占位符个数等于参数个数，
/// 每个占位符两侧各有一个 segment）。
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub(crate) segments: Vec<String>,
    pub(crate) mode: Mode,
    name: String,
}

impl Default for Statement {
    fn default() -> Self {
        Self {
            segments: vec![String::new()],
            mode: Mode::Values(Vec::new()),
            name: String::new(),
        }
    }
}

/// Build：从模板字面量对（segments + 插值）构建一条语句。
///
/// 调用方保证 `segments.len() == parts.len() + 1`；`sql!` 宏展开总是满足。
/// 插值按 [`Part`] 分类逐个折叠：Scalar 产生一个占位符边界，
/// Raw/Literal 直接拼文本并收拢边界，Nested 把整条子语句按结构拼入。
pub fn build(
    segments: impl IntoIterator<Item = impl Into<String>>,
    parts: impl IntoIterator<Item = impl Into<Part>>,
) -> Statement {
    let lits: Vec<String> = segments.into_iter().map(Into::into).collect();
    let parts: Vec<Part> = parts.into_iter().map(Into::into).collect();
    debug_assert_eq!(
        lits.len(),
        parts.len() + 1,
        "template invariant violated: want one more segment than interpolations"
    );

    let mut lits = lits.into_iter();
    let mut stmt = Statement {
        segments: vec![lits.next().unwrap_or_default()],
        mode: Mode::Values(Vec::new()),
        name: String::new(),
    };

    for part in parts {
        let lit = lits.next().unwrap_or_default();
        match part {
            Part::Literal(text) => {
                let trailing = stmt.trailing_mut();
                trailing.push_str(&text);
                trailing.push_str(&lit);
            }
            Part::Raw(fragment) => {
                let trailing = stmt.trailing_mut();
                trailing.push_str(&fragment.expr);
                trailing.push_str(&lit);
            }
            Part::Nested(nested) => {
                stmt.splice(nested);
                stmt.trailing_mut().push_str(&lit);
            }
            Part::Scalar(value) => {
                stmt.mode.list_mut().push(value);
                stmt.segments.push(lit);
            }
        }
    }

    stmt
}

impl Statement {
    /// 末尾 segment 的可变引用。
    fn trailing_mut(&mut self) -> &mut String {
        if self.segments.is_empty() {
            self.segments.push(String::new());
        }
        let idx = self.segments.len() - 1;
        &mut self.segments[idx]
    }

    /// 把 `nested` 整条拼到末尾：首个 segment 与当前末尾 segment 收拢，
    /// 其余 segment 依次成为新 segment，参数保持从左到右的文本顺序，
    /// 追加进*外层*当前模式的参数表（跨模式静默合并）。
    fn splice(&mut self, nested: Statement) {
        let Statement { segments, mode, .. } = nested;
        let mut segments = segments.into_iter();
        if let Some(first) = segments.next() {
            self.trailing_mut().push_str(&first);
        }
        self.segments.extend(segments);
        self.mode.list_mut().extend(mode.into_list());
    }

    /// Append：追加另一条语句或原样文本，返回自身以支持链式调用。
    ///
    /// ```
    /// use halo_statement::sql;
    ///
    /// let mut query = sql!("SELECT * FROM books WHERE author = " {"J. K. Rowling"});
    /// query.append(sql!(" AND genre = " {"Fantasy"})).append(" ORDER BY rating");
    /// assert_eq!(
    ///     query.sql(),
    ///     "SELECT * FROM books WHERE author = ? AND genre = ? ORDER BY rating"
    /// );
    /// ```
    pub fn append(&mut self, item: impl Into<Appendable>) -> &mut Self {
        match item.into() {
            Appendable::Text(text) => {
                self.trailing_mut().push_str(&text);
            }
            Appendable::Statement(stmt) => self.splice(stmt),
        }
        self
    }

    /// AppendAll：依次追加 `items`，相邻元素之间把 `delimiter` 拼为原样文本。
    /// 空列表是 no-op。
    pub fn append_all<I>(&mut self, items: I, delimiter: &str) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<Appendable>,
    {
        let mut first = true;
        for item in items {
            if !first {
                self.append(delimiter);
            }
            first = false;
            self.append(item);
        }
        self
    }

    /// SetName：设置 prepared statement 名称（PostgreSQL 具名预编译语句用）。
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }

    /// 当前的 prepared statement 名称；未设置时为空字符串。
    pub fn name(&self) -> &str {
        &self.name
    }

    /// UseBind：切换绑定模式（对齐 sql-template-strings `useBind`）。
    ///
    /// 开启后参数表整体搬到 `bind`、`values` 不复存在；关闭则原样搬回，
    /// 不丢值、不动 segments。重复同向调用是 no-op。
    pub fn use_bind(&mut self, bound: bool) -> &mut Self {
        let mode = std::mem::replace(&mut self.mode, Mode::Values(Vec::new()));
        self.mode = match (mode, bound) {
            (Mode::Values(list), true) => Mode::Bind(list),
            (Mode::Bind(list), false) => Mode::Values(list),
            (other, _) => other,
        };
        self
    }

    /// 是否处于绑定模式。
    pub fn is_bound(&self) -> bool {
        self.mode.is_bind()
    }

    /// 当前模式及其参数表。
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// mysql 风格 SQL：segments 之间以 `?` 连接。每次读取即时计算。
    pub fn sql(&self) -> String {
        self.render(Dialect::QuestionMark)
    }

    /// node-postgres 风格 SQL：segments 之间以 `$1..$n` 连接（从 1 开始，
    /// 每个边界自增一次，与嵌套深度无关）。
    pub fn text(&self) -> String {
        self.render(Dialect::DollarNumbered)
    }

    /// Sequelize 风格的统一入口：绑定模式下返回 `text()`，否则返回 `sql()`。
    pub fn query(&self) -> String {
        if self.mode.is_bind() {
            self.text()
        } else {
            self.sql()
        }
    }

    /// 普通模式下的参数表；绑定模式下为 `None`。
    pub fn values(&self) -> Option<&[SqlValue]> {
        match &self.mode {
            Mode::Values(list) => Some(list),
            Mode::Bind(_) => None,
        }
    }

    /// 绑定模式下的参数表；普通模式下为 `None`。
    pub fn bind(&self) -> Option<&[SqlValue]> {
        match &self.mode {
            Mode::Bind(list) => Some(list),
            Mode::Values(_) => None,
        }
    }

    /// 与 `query()` 配对的参数表：返回当前被填充的那一份。
    pub fn query_values(&self) -> &[SqlValue] {
        self.mode.list()
    }

    /// 占位符个数（等于参数个数）。
    pub fn placeholder_count(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    fn render(&self, dialect: Dialect) -> String {
        let cap =
            self.segments.iter().map(String::len).sum::<usize>() + self.segments.len() * 3;
        let mut out = String::with_capacity(cap);
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                dialect.write_placeholder(i, &mut out);
            }
            out.push_str(segment);
        }
        out
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.query())
    }
}
