//! # Parser 模块
//!
//! 手写递归下降解析器，校验标签配对并构建表达式树。
//!
//! ## 文法
//!
//! ```text
//! Program   := Operation*
//! Operation := '<' OPERACION '=' OpKind '>' Child+ '<' '/' OPERACION '>'
//! Child     := Number | Operation
//! Number    := '<' NUMERO '>' NUMBER '<' '/' NUMERO '>'
//! ```
//!
//! ## 错误恢复
//!
//! 只在顶层恢复：任何语法错误都会从所有外层运算中返回，
//! 随后丢弃词法单元直到输入结束或下一个 `< OPERACION` 处。
//! 出错的顶层表达式整体丢弃，不保留部分子树。
//!
//! ## 模块结构
//!
//! - `helpers`: 词法单元游标与 `expect` 系列函数

mod helpers;


use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{ErrorReport, ParseError};
use crate::script::ast::{Node, OperationKind};
use crate::script::token::{Token, TokenKind};

pub use helpers::{NUMBER_TAG, OPERATION_TAG, TokenCursor};

/// 解析结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseOutput {
    /// 成功解析的顶层表达式
    pub expressions: Vec<Node>,
    /// 传入的错误列表，追加了本阶段的语法错误
    pub errors: Vec<ErrorReport>,
}

/// 解析词法单元序列
///
/// `errors` 是上一阶段的错误累加器，语法错误按出现顺序追加到其后并随结果返回。
pub fn parse(tokens: &[Token], errors: Vec<ErrorReport>, config: &AnalyzerConfig) -> ParseOutput {
    let mut parser = Parser::new(tokens).with_max_depth(config.max_depth);
    let expressions = parser.parse_program();
    let mut errors = errors;
    errors.extend(parser.errors);
    ParseOutput {
        expressions,
        errors,
    }
}

/// 表达式解析器
pub struct Parser<'a> {
    cursor: TokenCursor<'a>,
    max_depth: usize,
    errors: Vec<ErrorReport>,
}

impl<'a> Parser<'a> {
    /// 创建新的解析器
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            cursor: TokenCursor::new(tokens),
            max_depth: AnalyzerConfig::default().max_depth,
            errors: Vec::new(),
        }
    }

    /// 设置最大嵌套层数
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 解析过程中产生的语法错误
    pub fn errors(&self) -> &[ErrorReport] {
        &self.errors
    }

    /// 解析全部顶层运算
    pub fn parse_program(&mut self) -> Vec<Node> {
        let mut expressions = Vec::new();

        while !self.cursor.is_at_end() {
            match self.parse_operation(1) {
                Ok(node) => expressions.push(node),
                Err(err) => {
                    let report = err.to_report();
                    self.cursor.synchronize();
                    debug!(
                        error = %err,
                        resume_at = self.cursor.position(),
                        "语法错误，跳到下一个顶层运算"
                    );
                    self.errors.push(report);
                }
            }
        }

        expressions
    }

    /// 解析 `<OPERACION=KIND> Child+ </OPERACION>`
    fn parse_operation(&mut self, depth: usize) -> Result<Node, ParseError> {
        self.cursor.expect(TokenKind::Less)?;
        let tag = self.cursor.expect_identifier(OPERATION_TAG)?;
        if depth > self.max_depth {
            return Err(ParseError::TooDeep {
                max_depth: self.max_depth,
                found: tag.lexeme.clone(),
                row: tag.row,
                col: tag.col,
            });
        }
        self.cursor.expect(TokenKind::Equal)?;

        let kind_token = self.cursor.expect(TokenKind::Identifier)?;
        let kind = OperationKind::from_keyword(&kind_token.lexeme).ok_or_else(|| {
            ParseError::UnknownOperation {
                name: kind_token.lexeme.clone(),
                row: kind_token.row,
                col: kind_token.col,
            }
        })?;
        self.cursor.expect(TokenKind::Greater)?;

        let mut children = Vec::new();
        while !self.cursor.is_closing_tag(OPERATION_TAG) {
            if self.cursor.at_tag_start(NUMBER_TAG) {
                children.push(self.parse_number()?);
            } else if self.cursor.at_tag_start(OPERATION_TAG) {
                children.push(self.parse_operation(depth + 1)?);
            } else {
                let found = self.cursor.current();
                return Err(ParseError::ExpectedChild {
                    found: found.lexeme.clone(),
                    row: found.row,
                    col: found.col,
                });
            }
        }

        if children.is_empty() {
            let found = self.cursor.current();
            return Err(ParseError::EmptyOperation {
                operation: kind.keyword().to_string(),
                found: found.lexeme.clone(),
                row: found.row,
                col: found.col,
            });
        }

        self.expect_closing_tag(OPERATION_TAG)?;
        Ok(Node::operation(kind, children))
    }

    /// 解析 `<NUMERO> NUMBER </NUMERO>`
    fn parse_number(&mut self) -> Result<Node, ParseError> {
        self.cursor.expect(TokenKind::Less)?;
        self.cursor.expect_identifier(NUMBER_TAG)?;
        self.cursor.expect(TokenKind::Greater)?;
        let number = self.cursor.expect(TokenKind::Number)?;
        self.expect_closing_tag(NUMBER_TAG)?;

        number
            .lexeme
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite())
            .map(Node::number)
            .ok_or_else(|| ParseError::InvalidNumber {
                text: number.lexeme.clone(),
                row: number.row,
                col: number.col,
            })
    }

    fn expect_closing_tag(&mut self, tag: &str) -> Result<(), ParseError> {
        self.cursor.expect(TokenKind::Less)?;
        self.cursor.expect(TokenKind::Slash)?;
        self.cursor.expect_identifier(tag)?;
        self.cursor.expect(TokenKind::Greater)?;
        Ok(())
    }
}
