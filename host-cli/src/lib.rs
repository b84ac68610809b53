//! # Host CLI
//!
//! `calc-core` 的命令行宿主：负责读取输入、加载配置、输出结果与错误。
//! 分析本身全部由 `calc-core` 完成。

pub mod cli;
pub mod config;

use std::fmt::Write as _;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use calc_core::{Analysis, Analyzer, Report, ScanOutput};
use serde::Serialize;
use tracing::info;

use config::{AppConfig, OutputFormat};

/// 读取输入文本，`-` 表示标准输入
pub fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("无法读取标准输入")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("无法读取输入文件 {}", path.display()))
}

/// 按配置分析文本
pub fn run_analysis(text: &str, config: &AppConfig) -> anyhow::Result<Analysis> {
    let analyzer = Analyzer::new(config.analyzer.clone())?;
    let analysis = analyzer.analyze(text);
    info!(
        max_depth = analyzer.config().max_depth,
        tokens = analysis.token_count(),
        expressions = analysis.expressions.len(),
        errors = analysis.error_count(),
        "分析完成"
    );
    Ok(analysis)
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    report: &'a Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    tokens: Option<&'a [calc_core::Token]>,
}

/// 渲染分析输出
pub fn render_analysis(analysis: &Analysis, config: &AppConfig) -> anyhow::Result<String> {
    let report = Report::build(analysis);

    match config.output.format {
        OutputFormat::Json => {
            let output = JsonOutput {
                report: &report,
                tokens: config.output.show_tokens.then_some(analysis.tokens.as_slice()),
            };
            Ok(serde_json::to_string_pretty(&output)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            if config.output.show_tokens {
                out.push_str(&render_token_list(&analysis.tokens));
                out.push('\n');
            }
            out.push_str("== 结果 ==\n");
            out.push_str(&report.render_results());
            if !report.errors.is_empty() {
                out.push_str("\n== 错误 ==\n");
                out.push_str(&report.render_errors());
            }
            let _ = writeln!(out, "\n{}", report.summary);
            Ok(out)
        }
    }
}

/// 渲染扫描输出
pub fn render_scan(scanned: &ScanOutput) -> String {
    let mut out = render_token_list(&scanned.tokens);
    for err in &scanned.errors {
        let _ = writeln!(out, "{}", err);
    }
    out
}

fn render_token_list(tokens: &[calc_core::Token]) -> String {
    let mut out = String::new();
    for token in tokens {
        let _ = writeln!(out, "{}", token);
    }
    out
}
