//! halo-sql-statement：模板字面量风格的 SQL 语句构建与参数收集库
//! （参考 sql-template-strings 的设计）。

pub mod dialect;
pub mod macros;
pub use crate::macros::*;
pub mod modifiers;
pub mod statement;
pub mod value;

pub use crate::dialect::Dialect;
pub use crate::modifiers::{Appendable, InvalidValue, Part, RawFragment, ident, keyword, raw};
pub use crate::statement::{Mode, Statement, build};
pub use crate::value::SqlValue;

/// 推荐的便捷命名空间：允许 `use halo_statement::sqlstatement::{...}` 形式导入。
pub mod sqlstatement {
    pub use crate::*;
}
