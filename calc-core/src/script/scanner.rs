//! # 扫描器
//!
//! 将原始文本逐行、逐字符地转换为词法单元序列，单遍、无回溯。
//!
//! 词法错误不会中断扫描：无法识别的字符与格式错误的数字会被记录为
//! [`ErrorReport`]，随后继续处理下一个字符。

use crate::error::{ErrorReport, LexicalError};

use super::token::{Token, TokenKind};

/// 扫描结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanOutput {
    /// 词法单元序列
    pub tokens: Vec<Token>,
    /// 词法错误（按出现顺序）
    pub errors: Vec<ErrorReport>,
}

/// 扫描文本
pub fn scan(text: &str) -> ScanOutput {
    let mut output = ScanOutput::default();

    for (line_idx, line) in text.split('\n').enumerate() {
        scan_line(line, line_idx + 1, &mut output);
    }

    output
}

fn scan_line(line: &str, row: usize, output: &mut ScanOutput) {
    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let col = i + 1;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if let Some(kind) = structural_kind(c) {
            output.tokens.push(Token::new(kind, c.to_string(), row, col));
            i += 1;
            continue;
        }

        if c.is_alphabetic() {
            let start = i;
            i += 1;
            while i < chars.len() && chars[i].is_alphanumeric() {
                i += 1;
            }
            let word: String = chars[start..i].iter().collect();
            output
                .tokens
                .push(Token::new(TokenKind::Identifier, word.to_uppercase(), row, col));
            continue;
        }

        let starts_number = c.is_ascii_digit()
            || (c == '.' && chars.get(i + 1).is_some_and(|next| next.is_ascii_digit()));
        if starts_number {
            let start = i;
            i += 1;
            while i < chars.len() && (chars[i].is_ascii_digit() || chars[i] == '.') {
                i += 1;
            }
            let text: String = chars[start..i].iter().collect();
            if is_valid_number(&text) {
                output
                    .tokens
                    .push(Token::new(TokenKind::Number, text, row, col));
            } else {
                let err = LexicalError::MalformedNumber { text, row, col };
                output.errors.push(err.to_report());
            }
            continue;
        }

        let err = LexicalError::UnknownCharacter { ch: c, row, col };
        output.errors.push(err.to_report());
        i += 1;
    }
}

fn structural_kind(c: char) -> Option<TokenKind> {
    match c {
        '<' => Some(TokenKind::Less),
        '>' => Some(TokenKind::Greater),
        '/' => Some(TokenKind::Slash),
        '=' => Some(TokenKind::Equal),
        _ => None,
    }
}

/// 检查数字字面量格式
///
/// 合法形式：`\d+`、`\d+\.\d+`、`\.\d+`
pub fn is_valid_number(text: &str) -> bool {
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text, None),
    };

    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

    match frac_part {
        None => all_digits(int_part),
        Some(frac) => (int_part.is_empty() || all_digits(int_part)) && all_digits(frac),
    }
}
