//! # Error 模块
//!
//! 定义 calc-core 中使用的错误类型。
//!
//! 词法错误与语法错误最终都会被转换为统一的 [`ErrorReport`]，
//! 按出现顺序收集到同一个列表中；求值错误则以 [`EvalError`] 返回给调用方。

use serde::Serialize;
use thiserror::Error;

/// 错误报告类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ReportKind {
    /// 扫描阶段产生
    Lexical,
    /// 解析阶段产生
    Syntax,
}

impl std::fmt::Display for ReportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexical => write!(f, "词法错误"),
            Self::Syntax => write!(f, "语法错误"),
        }
    }
}

/// 错误报告
///
/// 词法与语法失败共用的记录，`row`/`col` 从 1 开始；
/// 输入意外结束时使用 0:0 哨兵位置。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorReport {
    /// 出错的词素
    pub lexeme: String,
    /// 行号
    pub row: usize,
    /// 列号
    pub col: usize,
    /// 错误类别
    pub kind: ReportKind,
    /// 可读的错误描述
    pub message: String,
}

impl std::fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}] {}:{} '{}' - {}",
            self.kind, self.row, self.col, self.lexeme, self.message
        )
    }
}

/// 词法错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LexicalError {
    /// 无法识别的单个字符
    #[error("第 {row} 行第 {col} 列：无法识别的字符 '{ch}'")]
    UnknownCharacter { ch: char, row: usize, col: usize },

    /// 数字字面量格式错误（如 `3..5`、`7.`）
    #[error("第 {row} 行第 {col} 列：无效的数字字面量 '{text}'")]
    MalformedNumber { text: String, row: usize, col: usize },
}

impl LexicalError {
    /// 转换为统一的错误报告
    pub fn to_report(&self) -> ErrorReport {
        let (lexeme, row, col) = match self {
            Self::UnknownCharacter { ch, row, col } => (ch.to_string(), *row, *col),
            Self::MalformedNumber { text, row, col } => (text.clone(), *row, *col),
        };
        ErrorReport {
            lexeme,
            row,
            col,
            kind: ReportKind::Lexical,
            message: self.to_string(),
        }
    }
}

/// 语法错误
///
/// 所有变体都携带报告位置处的词素，输入耗尽时为 `EOF`（位置 0:0）。
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// 期望的词法单元或标识符不匹配
    #[error("第 {row} 行第 {col} 列：期望 {expected}，实际为 '{found}'")]
    UnexpectedToken {
        expected: String,
        found: String,
        row: usize,
        col: usize,
    },

    /// 未知的运算类型标识符
    #[error("第 {row} 行第 {col} 列：未知的运算类型 '{name}'")]
    UnknownOperation { name: String, row: usize, col: usize },

    /// 需要子节点（`<NUMERO>` 或 `<OPERACION>`）的位置出现了其他内容
    #[error("第 {row} 行第 {col} 列：期望 <NUMERO> 或 <OPERACION>，实际为 '{found}'")]
    ExpectedChild { found: String, row: usize, col: usize },

    /// 运算标签内没有任何操作数
    #[error("第 {row} 行第 {col} 列：运算 {operation} 至少需要一个操作数")]
    EmptyOperation {
        operation: String,
        found: String,
        row: usize,
        col: usize,
    },

    /// 数字无法表示为有限的双精度浮点数
    #[error("第 {row} 行第 {col} 列：无效的数字 '{text}'")]
    InvalidNumber { text: String, row: usize, col: usize },

    /// 嵌套层数超过配置上限
    #[error("第 {row} 行第 {col} 列：运算嵌套超过 {max_depth} 层")]
    TooDeep {
        max_depth: usize,
        found: String,
        row: usize,
        col: usize,
    },
}

impl ParseError {
    /// 转换为统一的错误报告
    pub fn to_report(&self) -> ErrorReport {
        let (lexeme, row, col) = match self {
            Self::UnexpectedToken { found, row, col, .. }
            | Self::ExpectedChild { found, row, col }
            | Self::EmptyOperation { found, row, col, .. }
            | Self::TooDeep { found, row, col, .. } => (found.clone(), *row, *col),
            Self::UnknownOperation { name, row, col } => (name.clone(), *row, *col),
            Self::InvalidNumber { text, row, col } => (text.clone(), *row, *col),
        };
        ErrorReport {
            lexeme,
            row,
            col,
            kind: ReportKind::Syntax,
            message: self.to_string(),
        }
    }
}

/// 求值错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvalError {
    /// 除数、模数或倒数的操作数为 0
    #[error("除数为零")]
    DivisionByZero,

    /// 结果不在实数范围内（如负数开平方）
    #[error("定义域错误：{message}")]
    DomainError { message: String },

    /// 不应出现的树结构（解析器保证不会产生）
    #[error("无效的运算：{message}")]
    InvalidOperation { message: String },
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 验证失败
    #[error("配置验证失败：{0}")]
    ValidationFailed(String),
}

/// calc-core 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    /// 配置错误
    #[error("{0}")]
    Config(#[from] ConfigError),

    /// 求值错误
    #[error("求值错误：{0}")]
    Eval(#[from] EvalError),
}

/// Result 类型别名
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexical_error_report() {
        let err = LexicalError::MalformedNumber {
            text: "3..5".to_string(),
            row: 2,
            col: 7,
        };
        let report = err.to_report();
        assert_eq!(report.lexeme, "3..5");
        assert_eq!((report.row, report.col), (2, 7));
        assert_eq!(report.kind, ReportKind::Lexical);
        assert!(report.message.contains("3..5"));
    }

    #[test]
    fn test_parse_error_report_uses_found_lexeme() {
        let err = ParseError::UnexpectedToken {
            expected: "'>'".to_string(),
            found: "EOF".to_string(),
            row: 0,
            col: 0,
        };
        let report = err.to_report();
        assert_eq!(report.lexeme, "EOF");
        assert_eq!((report.row, report.col), (0, 0));
        assert_eq!(report.kind, ReportKind::Syntax);
    }

    #[test]
    fn test_unknown_operation_report() {
        let err = ParseError::UnknownOperation {
            name: "LOG".to_string(),
            row: 1,
            col: 12,
        };
        let report = err.to_report();
        assert_eq!(report.lexeme, "LOG");
        assert!(report.to_string().contains("语法错误"));
    }

    #[test]
    fn test_calc_error_from() {
        let err: CalcError = EvalError::DivisionByZero.into();
        assert!(matches!(err, CalcError::Eval(EvalError::DivisionByZero)));
        assert!(err.to_string().contains("除数为零"));
    }
}
