//! # 辅助解析函数
//!
//! 词法单元游标：前瞻、`expect` 与错误位置（输入耗尽时使用 EOF 哨兵）。

use crate::error::ParseError;
use crate::script::token::{Token, TokenKind};

/// `<OPERACION=...>` 标签名
pub const OPERATION_TAG: &str = "OPERACION";

/// `<NUMERO>` 标签名
pub const NUMBER_TAG: &str = "NUMERO";

/// 词法单元游标
pub struct TokenCursor<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
}

impl<'a> TokenCursor<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            eof: Token::eof(),
        }
    }

    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// 当前词法单元，输入耗尽时为 EOF 哨兵
    pub fn current(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or(&self.eof)
    }

    fn peek(&self, offset: usize) -> Option<&'a Token> {
        self.tokens.get(self.pos + offset)
    }

    /// 当前词法单元是否为指定类型
    pub fn check(&self, kind: TokenKind) -> bool {
        self.peek(0).is_some_and(|t| t.kind == kind)
    }

    /// 下一个词法单元是否为指定标识符
    pub fn check_next_identifier(&self, text: &str) -> bool {
        self.peek(1).is_some_and(|t| t.is_identifier(text))
    }

    /// 是否位于 `< TAG` 开头
    pub fn at_tag_start(&self, tag: &str) -> bool {
        self.check(TokenKind::Less) && self.check_next_identifier(tag)
    }

    /// 前瞻 4 个词法单元，判断是否为 `< / TAG >` 闭合标签
    pub fn is_closing_tag(&self, tag: &str) -> bool {
        match (self.peek(0), self.peek(1), self.peek(2), self.peek(3)) {
            (Some(less), Some(slash), Some(name), Some(greater)) => {
                less.kind == TokenKind::Less
                    && slash.kind == TokenKind::Slash
                    && name.is_identifier(tag)
                    && greater.kind == TokenKind::Greater
            }
            _ => false,
        }
    }

    /// 消费并返回指定类型的词法单元
    pub fn expect(&mut self, kind: TokenKind) -> Result<&'a Token, ParseError> {
        match self.peek(0) {
            Some(token) if token.kind == kind => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(kind.describe().to_string())),
        }
    }

    /// 消费并返回指定的标识符（比较时使用大写形式）
    pub fn expect_identifier(&mut self, text: &str) -> Result<&'a Token, ParseError> {
        match self.peek(0) {
            Some(token) if token.is_identifier(text) => {
                self.pos += 1;
                Ok(token)
            }
            _ => Err(self.unexpected(format!("标识符 {}", text.to_uppercase()))),
        }
    }

    /// 跳过词法单元，直到输入结束或下一个 `< OPERACION` 处
    pub fn synchronize(&mut self) {
        while !self.is_at_end() && !self.at_tag_start(OPERATION_TAG) {
            self.pos += 1;
        }
    }

    fn unexpected(&self, expected: String) -> ParseError {
        let found = self.current();
        ParseError::UnexpectedToken {
            expected,
            found: found.lexeme.clone(),
            row: found.row,
            col: found.col,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::scanner::scan;

    #[test]
    fn test_expect_consumes_on_match() {
        let tokens = scan("<>").tokens;
        let mut cursor = TokenCursor::new(&tokens);
        assert_eq!(cursor.expect(TokenKind::Less).unwrap().lexeme, "<");
        assert_eq!(cursor.position(), 1);
        assert!(cursor.expect(TokenKind::Slash).is_err());
        assert_eq!(cursor.position(), 1);
    }

    #[test]
    fn test_expect_at_end_reports_eof() {
        let tokens = Vec::new();
        let mut cursor = TokenCursor::new(&tokens);
        let err = cursor.expect(TokenKind::Greater).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedToken {
                expected: "'>'".to_string(),
                found: "EOF".to_string(),
                row: 0,
                col: 0,
            }
        );
    }

    #[test]
    fn test_expect_identifier_is_case_insensitive() {
        let tokens = scan("numero").tokens;
        let mut cursor = TokenCursor::new(&tokens);
        assert!(cursor.expect_identifier("Numero").is_ok());
    }

    #[test]
    fn test_closing_tag_needs_four_tokens() {
        let tokens = scan("</OPERACION>").tokens;
        assert!(TokenCursor::new(&tokens).is_closing_tag(OPERATION_TAG));

        let tokens = scan("</OPERACION").tokens;
        assert!(!TokenCursor::new(&tokens).is_closing_tag(OPERATION_TAG));

        let tokens = scan("</NUMERO>").tokens;
        assert!(!TokenCursor::new(&tokens).is_closing_tag(OPERATION_TAG));
    }

    #[test]
    fn test_synchronize_stops_at_operation_start() {
        let tokens = scan("x = 1 < numero < operacion").tokens;
        let mut cursor = TokenCursor::new(&tokens);
        cursor.synchronize();
        assert_eq!(cursor.position(), 5);
        assert!(cursor.at_tag_start(OPERATION_TAG));
    }

    #[test]
    fn test_synchronize_runs_to_end() {
        let tokens = scan("> > 3").tokens;
        let mut cursor = TokenCursor::new(&tokens);
        cursor.synchronize();
        assert!(cursor.is_at_end());
        assert_eq!(cursor.current().lexeme, "EOF");
    }
}
