//! # Token 模块
//!
//! 扫描器输出的词法单元定义。

use serde::Serialize;

/// 词法单元类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `/`
    Slash,
    /// `=`
    Equal,
    /// 标识符（已转为大写）
    Identifier,
    /// 数字字面量
    Number,
    /// 仅用于输入结束哨兵
    Error,
}

impl TokenKind {
    /// 用于错误信息的描述
    pub fn describe(self) -> &'static str {
        match self {
            Self::Less => "'<'",
            Self::Greater => "'>'",
            Self::Slash => "'/'",
            Self::Equal => "'='",
            Self::Identifier => "标识符",
            Self::Number => "数字",
            Self::Error => "错误",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.describe())
    }
}

/// 词法单元
///
/// `row`/`col` 从 1 开始，指向词素的第一个字符。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub row: usize,
    pub col: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, row: usize, col: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            row,
            col,
        }
    }

    /// 输入结束哨兵，位置固定为 0:0
    pub fn eof() -> Self {
        Self::new(TokenKind::Error, "EOF", 0, 0)
    }

    /// 是否为指定的（大写）标识符
    pub fn is_identifier(&self, text: &str) -> bool {
        self.kind == TokenKind::Identifier && self.lexeme == text.to_uppercase()
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token({:?}, '{}', {}:{})",
            self.kind, self.lexeme, self.row, self.col
        )
    }
}
