//! # 诊断模块
//!
//! 提供输入文件的静态检查 API，不依赖 IO。
//!
//! ## 设计原则
//!
//! - 纯函数 API，可在无 IO 环境下运行
//! - 诊断分级：Error（词法/语法错误）、Warn（能解析但无法求值）、Info（信息提示）
//! - 复用分析流水线，不重复解析逻辑

use crate::analysis::Analysis;
use crate::error::ErrorReport;
use crate::script::evaluate;

/// 诊断级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticLevel {
    /// 信息提示
    Info,
    /// 警告（建议修复）
    Warn,
    /// 错误（必须修复）
    Error,
}

impl std::fmt::Display for DiagnosticLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "INFO"),
            Self::Warn => write!(f, "WARN"),
            Self::Error => write!(f, "ERROR"),
        }
    }
}

/// 诊断条目
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 诊断级别
    pub level: DiagnosticLevel,
    /// 来源标识（通常是文件路径）
    pub source_id: String,
    /// 位置（行, 列），如果可定位
    pub position: Option<(usize, usize)>,
    /// 诊断消息
    pub message: String,
    /// 诊断详情（可选）
    pub detail: Option<String>,
}

impl Diagnostic {
    fn new(level: DiagnosticLevel, source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            source_id: source_id.into(),
            position: None,
            message: message.into(),
            detail: None,
        }
    }

    /// 创建错误诊断
    pub fn error(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Error, source_id, message)
    }

    /// 创建警告诊断
    pub fn warn(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Warn, source_id, message)
    }

    /// 创建信息诊断
    pub fn info(source_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(DiagnosticLevel::Info, source_id, message)
    }

    /// 由错误报告创建错误诊断
    pub fn from_report(source_id: impl Into<String>, report: &ErrorReport) -> Self {
        let diag = Self::error(source_id, report.message.clone())
            .with_detail(format!("{}: '{}'", report.kind, report.lexeme));
        // 0:0 是输入结束哨兵，没有可用位置
        if report.row == 0 {
            diag
        } else {
            diag.with_position(report.row, report.col)
        }
    }

    /// 设置位置
    pub fn with_position(mut self, row: usize, col: usize) -> Self {
        self.position = Some((row, col));
        self
    }

    /// 设置详情
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.level, self.source_id)?;
        if let Some((row, col)) = self.position {
            write!(f, ":{}:{}", row, col)?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(detail) = &self.detail {
            write!(f, "\n  | {}", detail)?;
        }
        Ok(())
    }
}

/// 诊断结果
#[derive(Debug, Clone, Default)]
pub struct DiagnosticResult {
    /// 诊断条目列表
    pub diagnostics: Vec<Diagnostic>,
}

impl DiagnosticResult {
    /// 创建空结果
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加诊断
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// 合并另一个结果
    pub fn merge(&mut self, other: DiagnosticResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// 获取错误数量
    pub fn error_count(&self) -> usize {
        self.count(DiagnosticLevel::Error)
    }

    /// 获取警告数量
    pub fn warn_count(&self) -> usize {
        self.count(DiagnosticLevel::Warn)
    }

    /// 是否有错误
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    fn count(&self, level: DiagnosticLevel) -> usize {
        self.diagnostics.iter().filter(|d| d.level == level).count()
    }
}

/// 诊断一次分析结果
///
/// - 每条错误报告 → Error
/// - 能解析但求值失败的表达式 → Warn
/// - 既没有表达式也没有错误 → Info
pub fn diagnose(source_id: &str, analysis: &Analysis) -> DiagnosticResult {
    let mut result = DiagnosticResult::new();

    for report in &analysis.errors {
        result.push(Diagnostic::from_report(source_id, report));
    }

    for (i, node) in analysis.expressions.iter().enumerate() {
        if let Err(e) = evaluate(node) {
            result.push(
                Diagnostic::warn(source_id, format!("第 {} 个表达式无法求值：{}", i + 1, e))
                    .with_detail(node.to_infix()),
            );
        }
    }

    if analysis.expressions.is_empty() && analysis.errors.is_empty() {
        result.push(Diagnostic::info(source_id, "未找到任何运算"));
    }

    result
}
