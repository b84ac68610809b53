//! # Script 模块
//!
//! 标签式算术表达式的前端：扫描、解析、表达式树与求值。
//!
//! ## 模块结构
//!
//! - [`token`]：词法单元定义
//! - [`scanner`]：扫描器
//! - [`parser`]：递归下降解析器
//! - [`ast`]：表达式树
//! - [`eval`]：求值器

pub mod ast;
pub mod eval;
pub mod parser;
pub mod scanner;
pub mod token;

pub use ast::{Node, Operation, OperationKind, format_number};
pub use eval::evaluate;
pub use parser::{ParseOutput, Parser, parse};
pub use scanner::{ScanOutput, scan};
pub use token::{Token, TokenKind};
