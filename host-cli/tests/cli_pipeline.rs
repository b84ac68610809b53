//! # 命令行流水线集成测试
//!
//! 测试 配置 → 分析 → 渲染 的链路，不启动子进程。

use std::path::PathBuf;

use host_cli::config::{AppConfig, ConfigSource, OutputFormat};
use host_cli::{read_input, render_analysis, render_scan, run_analysis};

const INPUT: &str = "\
<OPERACION=SUMA>
    <NUMERO>2</NUMERO>
    <NUMERO>3</NUMERO>
</OPERACION>
<OPERACION=RESTA>
    <NUMERO>1</NUMERO>
";

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("tagcalc-{}-{}", std::process::id(), name))
}

#[test]
fn test_text_output_contains_results_and_errors() {
    let config = AppConfig::default();
    let analysis = run_analysis(INPUT, &config).unwrap();
    let output = render_analysis(&analysis, &config).unwrap();

    assert_eq!(analysis.expressions.len(), 1);
    insta::assert_snapshot!(output, @r"
    == 结果 ==
    运算 SUMA 1
      2.0 + 3.0 = 5.0

    == 错误 ==
    序号 | 词素 | 类型 | 列 | 行
    1 | EOF | 语法错误 | 0 | 0

    词法单元: 38, 表达式: 1, 错误: 1
    ");
}

#[test]
fn test_json_output_with_tokens() {
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Json;
    config.output.show_tokens = true;

    let analysis = run_analysis(INPUT, &config).unwrap();
    let output = render_analysis(&analysis, &config).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["report"]["expressions"][0]["infix"], "2.0 + 3.0");
    assert_eq!(value["report"]["expressions"][0]["outcome"]["value"], 5.0);
    assert_eq!(value["report"]["errors"][0]["lexeme"], "EOF");
    assert_eq!(value["tokens"].as_array().map(Vec::len), Some(38));
}

#[test]
fn test_json_output_omits_tokens_by_default() {
    let mut config = AppConfig::default();
    config.output.format = OutputFormat::Json;

    let analysis = run_analysis(INPUT, &config).unwrap();
    let value: serde_json::Value =
        serde_json::from_str(&render_analysis(&analysis, &config).unwrap()).unwrap();
    assert!(value.get("tokens").is_none());
}

#[test]
fn test_invalid_config_is_rejected() {
    let mut config = AppConfig::default();
    config.analyzer.max_depth = 0;
    assert!(run_analysis(INPUT, &config).is_err());
}

#[test]
fn test_depth_above_limit_is_rejected() {
    let mut config = AppConfig::default();
    config.analyzer.max_depth = calc_core::MAX_DEPTH_LIMIT + 1;
    assert!(config.validate().is_err());
    assert!(run_analysis(INPUT, &config).is_err());
}

#[test]
fn test_config_file_roundtrip() {
    let path = temp_path("config.json");
    let mut config = AppConfig::default();
    config.analyzer.max_depth = 4;
    config.output.format = OutputFormat::Json;
    config.save(&path).unwrap();

    let loaded = AppConfig::load(&path).unwrap();
    let (_, source) = AppConfig::load_with_source(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(loaded, config);
    assert_eq!(source, ConfigSource::File);
}

#[test]
fn test_malformed_config_file_is_error() {
    let path = temp_path("broken.json");
    std::fs::write(&path, "{ not json").unwrap();

    let result = AppConfig::load(&path);
    std::fs::remove_file(&path).unwrap();
    assert!(result.is_err());
}

#[test]
fn test_read_input_file() {
    let path = temp_path("input.txt");
    std::fs::write(&path, INPUT).unwrap();

    let text = read_input(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(text, INPUT);

    assert!(read_input(&temp_path("missing.txt")).is_err());
}

#[test]
fn test_render_scan_lists_tokens_and_errors() {
    let output = render_scan(&calc_core::scan("<x ?"));
    insta::assert_snapshot!(output, @r"
    Token(Less, '<', 1:1)
    Token(Identifier, 'X', 1:2)
    [词法错误] 1:4 '?' - 第 1 行第 4 列：无法识别的字符 '?'
    ");
}
