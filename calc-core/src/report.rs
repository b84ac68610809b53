//! # 报告模块
//!
//! 将分析结果整理为面向展示层的数据：每个表达式的标题、中缀形式与结果，
//! 错误表，以及词法单元/错误数量汇总。
//!
//! ## 标题规则
//!
//! - 含嵌套运算的表达式共用一个计数器：`复合运算 N`
//! - 其余按运算类型分别计数：`运算 SUMA N`

use std::collections::HashMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::analysis::Analysis;
use crate::error::{ErrorReport, EvalError};
use crate::script::{Node, OperationKind, evaluate, format_number};

/// 单个表达式的求值结果
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "lowercase")]
pub enum Outcome {
    /// 求值成功
    Value(f64),
    /// 求值失败，保存错误描述
    Failed(String),
}

impl From<Result<f64, EvalError>> for Outcome {
    fn from(result: Result<f64, EvalError>) -> Self {
        match result {
            Ok(value) => Self::Value(value),
            Err(e) => Self::Failed(e.to_string()),
        }
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Value(value) => f.write_str(&format_number(*value)),
            Self::Failed(message) => write!(f, "求值错误：{}", message),
        }
    }
}

/// 表达式报告条目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExpressionReport {
    /// 序号（从 1 开始）
    pub index: usize,
    pub title: String,
    /// 中缀形式
    pub infix: String,
    pub outcome: Outcome,
}

/// 汇总信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub token_count: usize,
    pub expression_count: usize,
    pub error_count: usize,
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "词法单元: {}, 表达式: {}, 错误: {}",
            self.token_count, self.expression_count, self.error_count
        )
    }
}

/// 分析报告
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub expressions: Vec<ExpressionReport>,
    pub errors: Vec<ErrorReport>,
    pub summary: Summary,
}

impl Report {
    /// 从分析结果构建报告（会对每个表达式求值）
    pub fn build(analysis: &Analysis) -> Self {
        let mut titles = TitleCounter::default();
        let expressions = analysis
            .expressions
            .iter()
            .enumerate()
            .map(|(i, node)| ExpressionReport {
                index: i + 1,
                title: titles.next_title(node),
                infix: node.to_infix(),
                outcome: evaluate(node).into(),
            })
            .collect();

        Self {
            expressions,
            errors: analysis.errors.clone(),
            summary: Summary {
                token_count: analysis.token_count(),
                expression_count: analysis.expressions.len(),
                error_count: analysis.error_count(),
            },
        }
    }

    /// 渲染表达式结果
    pub fn render_results(&self) -> String {
        let mut out = String::new();
        for entry in &self.expressions {
            let _ = writeln!(out, "{}", entry.title);
            let _ = writeln!(out, "  {} = {}", entry.infix, entry.outcome);
        }
        out
    }

    /// 渲染错误表
    pub fn render_errors(&self) -> String {
        let mut out = String::from("序号 | 词素 | 类型 | 列 | 行\n");
        for (i, err) in self.errors.iter().enumerate() {
            let _ = writeln!(
                out,
                "{} | {} | {} | {} | {}",
                i + 1,
                err.lexeme,
                err.kind,
                err.col,
                err.row
            );
        }
        out
    }

    /// 序列化为 JSON
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// 标题计数器
#[derive(Default)]
struct TitleCounter {
    compound: usize,
    simple: HashMap<OperationKind, usize>,
}

impl TitleCounter {
    fn next_title(&mut self, node: &Node) -> String {
        match node.as_operation() {
            Some(op) if op.is_compound() => {
                self.compound += 1;
                format!("复合运算 {}", self.compound)
            }
            Some(op) => {
                let count = self.simple.entry(op.kind()).or_insert(0);
                *count += 1;
                format!("运算 {} {}", op.kind(), count)
            }
            None => format!("数字 {}", node.label()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyze;
    use crate::config::AnalyzerConfig;

    const SAMPLE: &str = "\
<OPERACION=SUMA><NUMERO>2</NUMERO><NUMERO>3</NUMERO></OPERACION>
<OPERACION=RESTA><NUMERO>10</NUMERO><OPERACION=RAIZ><NUMERO>16</NUMERO></OPERACION></OPERACION>
<OPERACION=SUMA><NUMERO>.5</NUMERO><NUMERO>1.25</NUMERO></OPERACION>
<OPERACION=DIVISION><NUMERO>1</NUMERO><NUMERO>0</NUMERO></OPERACION>
";

    fn sample_report() -> Report {
        Report::build(&analyze(SAMPLE, &AnalyzerConfig::default()))
    }

    #[test]
    fn test_titles_count_per_kind_and_compound() {
        let report = sample_report();
        let titles: Vec<&str> = report.expressions.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["运算 SUMA 1", "复合运算 1", "运算 SUMA 2", "运算 DIVISION 1"]
        );
    }

    #[test]
    fn test_render_results() {
        let report = sample_report();
        insta::assert_snapshot!(report.render_results(), @r"
        运算 SUMA 1
          2.0 + 3.0 = 5.0
        复合运算 1
          10.0 - (√16.0) = 6.0
        运算 SUMA 2
          0.5 + 1.25 = 1.75
        运算 DIVISION 1
          1.0 / 0.0 = 求值错误：除数为零
        ");
    }

    #[test]
    fn test_render_errors() {
        let analysis = analyze("<OPERACION=SUMA>\n  ?", &AnalyzerConfig::default());
        let report = Report::build(&analysis);

        assert!(report.expressions.is_empty());
        assert_eq!(report.summary.error_count, 2);
        insta::assert_snapshot!(report.render_errors(), @r"
        序号 | 词素 | 类型 | 列 | 行
        1 | ? | 词法错误 | 3 | 2
        2 | EOF | 语法错误 | 0 | 0
        ");
    }

    #[test]
    fn test_summary_display() {
        let report = sample_report();
        assert_eq!(
            report.summary.to_string(),
            "词法单元: 109, 表达式: 4, 错误: 0"
        );
    }

    #[test]
    fn test_outcome_json_shape() {
        let value = serde_json::to_value(Outcome::Value(1.5)).unwrap();
        assert_eq!(value, serde_json::json!({"status": "value", "value": 1.5}));

        let failed = serde_json::to_value(Outcome::Failed("x".to_string())).unwrap();
        assert_eq!(failed, serde_json::json!({"status": "failed", "value": "x"}));
    }

    #[test]
    fn test_report_to_json() {
        let json = sample_report().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["summary"]["expression_count"], 4);
        assert_eq!(value["expressions"][1]["title"], "复合运算 1");
    }
}
