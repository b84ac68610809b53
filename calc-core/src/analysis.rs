//! # 分析流水线
//!
//! 文本 → 词法单元/词法错误 → 表达式树/语法错误，数据单向流动。
//! 两个阶段的错误按顺序合并为一个列表（先词法，后语法）。

use serde::Serialize;
use tracing::debug;

use crate::config::AnalyzerConfig;
use crate::error::{CalcResult, ErrorReport, EvalError, ReportKind};
use crate::script::{Node, Token, evaluate, parse, scan};

/// 一次分析的完整结果
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Analysis {
    /// 词法单元序列
    pub tokens: Vec<Token>,
    /// 成功解析的顶层表达式
    pub expressions: Vec<Node>,
    /// 合并后的错误列表
    pub errors: Vec<ErrorReport>,
}

impl Analysis {
    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// 指定类别的错误
    pub fn errors_of(&self, kind: ReportKind) -> impl Iterator<Item = &ErrorReport> {
        self.errors.iter().filter(move |e| e.kind == kind)
    }

    /// 对每个表达式求值，失败不影响其他表达式
    pub fn evaluate_all(&self) -> Vec<Result<f64, EvalError>> {
        self.expressions.iter().map(evaluate).collect()
    }
}

/// 分析文本
pub fn analyze(text: &str, config: &AnalyzerConfig) -> Analysis {
    let scanned = scan(text);
    let parsed = parse(&scanned.tokens, scanned.errors, config);

    debug!(
        tokens = scanned.tokens.len(),
        expressions = parsed.expressions.len(),
        errors = parsed.errors.len(),
        "分析完成"
    );

    Analysis {
        tokens: scanned.tokens,
        expressions: parsed.expressions,
        errors: parsed.errors,
    }
}

/// 持有已验证配置的分析器
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: AnalyzerConfig,
}

impl Analyzer {
    /// 创建分析器，配置无效时返回错误
    pub fn new(config: AnalyzerConfig) -> CalcResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn analyze(&self, text: &str) -> Analysis {
        analyze(text, &self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CalcError;

    #[test]
    fn test_analyze_merges_errors_in_stage_order() {
        let analysis = analyze("@ <OPERACION=X>", &AnalyzerConfig::default());

        let kinds: Vec<ReportKind> = analysis.errors.iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![ReportKind::Lexical, ReportKind::Syntax]);
        assert_eq!(analysis.errors_of(ReportKind::Lexical).count(), 1);
        assert_eq!(analysis.token_count(), 5);
    }

    #[test]
    fn test_evaluate_all_keeps_failures_per_expression() {
        let text = "<OPERACION=INVERSO><NUMERO>0</NUMERO></OPERACION>\
                    <OPERACION=SUMA><NUMERO>1</NUMERO><NUMERO>2</NUMERO></OPERACION>";
        let analysis = Analyzer::default().analyze(text);

        assert!(!analysis.has_errors());
        assert_eq!(
            analysis.evaluate_all(),
            vec![Err(EvalError::DivisionByZero), Ok(3.0)]
        );
    }

    #[test]
    fn test_analyzer_rejects_invalid_config() {
        let result = Analyzer::new(AnalyzerConfig::default().with_max_depth(0));
        assert!(matches!(result, Err(CalcError::Config(_))));

        let result = Analyzer::new(AnalyzerConfig::default().with_max_depth(usize::MAX));
        assert!(matches!(result, Err(CalcError::Config(_))));

        let analyzer = Analyzer::new(AnalyzerConfig::default().with_max_depth(2)).unwrap();
        assert_eq!(analyzer.config().max_depth, 2);
    }
}
