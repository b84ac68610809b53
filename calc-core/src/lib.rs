//! # Calc Core
//!
//! 标签式算术表达式语言的核心库。
//!
//! ## 架构概述
//!
//! `calc-core` 是纯逻辑核心，不依赖任何 IO 或界面。数据单向流动：
//!
//! ```text
//! 文本 ──scan──► Token + 词法错误 ──parse──► 表达式树 + 语法错误 ──evaluate──► f64 / 中缀字符串
//! ```
//!
//! 输入示例：
//!
//! ```text
//! <OPERACION=SUMA>
//!     <NUMERO>2</NUMERO>
//!     <NUMERO>3</NUMERO>
//! </OPERACION>
//! ```
//!
//! ## 核心类型
//!
//! - [`Token`]：词法单元
//! - [`ErrorReport`]：词法/语法错误的统一记录
//! - [`Node`]：表达式树节点
//! - [`Analysis`]：一次分析的完整结果
//! - [`Report`]：面向展示层的报告
//!
//! ## 使用示例
//!
//! ```ignore
//! use calc_core::{AnalyzerConfig, Report, analyze};
//!
//! let analysis = analyze(text, &AnalyzerConfig::default());
//! let report = Report::build(&analysis);
//! print!("{}", report.render_results());
//! ```
//!
//! ## 模块结构
//!
//! - [`script`]：扫描器、解析器、表达式树与求值器
//! - [`analysis`]：分析流水线
//! - [`report`]：报告模型
//! - [`diagnostic`]：诊断 API
//! - [`config`]：分析器配置
//! - [`error`]：错误类型定义

pub mod analysis;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod report;
pub mod script;

// 重导出核心类型
pub use analysis::{Analysis, Analyzer, analyze};
pub use config::{AnalyzerConfig, MAX_DEPTH_LIMIT};
pub use diagnostic::{Diagnostic, DiagnosticLevel, DiagnosticResult, diagnose};
pub use error::{
    CalcError, CalcResult, ConfigError, ErrorReport, EvalError, LexicalError, ParseError,
    ReportKind,
};
pub use report::{ExpressionReport, Outcome, Report, Summary};
pub use script::{
    Node, Operation, OperationKind, ParseOutput, Parser, ScanOutput, Token, TokenKind, evaluate,
    parse, scan,
};
