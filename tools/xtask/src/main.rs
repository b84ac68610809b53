//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 calc-core 覆盖率
//! - `expr-check`: 检查表达式输入文件（词法、语法、求值）

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use calc_core::{AnalyzerConfig, DiagnosticResult, analyze, diagnose};
use walkdir::WalkDir;
use xshell::{Shell, cmd};

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let sh = Shell::new()?;

            eprintln!("\n==> cargo fmt --all -- --check");
            cmd!(sh, "cargo fmt --all -- --check").run()?;

            eprintln!("\n==> cargo clippy --workspace --all-targets");
            cmd!(sh, "cargo clippy --workspace --all-targets").run()?;

            eprintln!("\n==> cargo test --workspace");
            cmd!(sh, "cargo test --workspace").run()?;
        }
        "cov-core" => {
            let sh = Shell::new()?;
            ensure_cargo_llvm_cov_available(&sh)?;

            eprintln!("\n==> cargo llvm-cov -p calc-core --html");
            cmd!(sh, "cargo llvm-cov -p calc-core --html").run()?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "expr-check" => {
            let path = args.next();
            expr_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn ensure_cargo_llvm_cov_available(sh: &Shell) -> anyhow::Result<()> {
    if cmd!(sh, "cargo llvm-cov --version").quiet().run().is_err() {
        anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        );
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-core        运行 calc-core 覆盖率报告
  expr-check      检查表达式输入文件

EXPR-CHECK:
  cargo xtask expr-check [path]

  不带参数：检查 inputs/ 下所有 .txt 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - 词法错误（无法识别的字符、格式错误的数字）
    - 语法错误（标签不匹配、未知运算类型、缺少操作数）
    - 求值失败（除零、负数开方）

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo expr-check    -> cargo xtask expr-check
"#
    );
}

//=============================================================================
// expr-check 命令实现
//=============================================================================

/// 默认输入目录（相对于 workspace root）
const DEFAULT_INPUTS_DIR: &str = "inputs";

/// 检查结果
struct ExprCheckResult {
    /// 检查的文件数量
    files_checked: usize,
    /// 读取失败数量
    read_errors: usize,
    /// 表达式总数
    expressions: usize,
    /// 诊断结果
    diagnostics: DiagnosticResult,
}

/// 执行表达式文件检查
fn expr_check(path: Option<&str>) -> anyhow::Result<()> {
    let files = match path {
        Some(p) => {
            let path = PathBuf::from(p);
            if path.is_file() {
                vec![path]
            } else if path.is_dir() {
                collect_input_files(&path)
            } else {
                anyhow::bail!("路径不存在: {}", p);
            }
        }
        None => {
            let dir = Path::new(DEFAULT_INPUTS_DIR);
            if !dir.exists() {
                anyhow::bail!(
                    "默认输入目录不存在: {}\n请在 workspace 根目录运行，或指定文件路径",
                    dir.display()
                );
            }
            collect_input_files(dir)
        }
    };

    if files.is_empty() {
        eprintln!("未找到输入文件（.txt）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个输入文件...\n", files.len());

    let config = AnalyzerConfig::default();
    let mut result = ExprCheckResult {
        files_checked: 0,
        read_errors: 0,
        expressions: 0,
        diagnostics: DiagnosticResult::new(),
    };

    for file in &files {
        check_input_file(file, &config, &mut result);
    }

    print_check_result(&result);

    if result.read_errors > 0 || result.diagnostics.has_errors() {
        anyhow::bail!("表达式检查发现错误");
    }

    Ok(())
}

/// 收集目录下的所有 .txt 文件
fn collect_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "txt"))
        .collect();
    files.sort();
    files
}

/// 检查单个输入文件
fn check_input_file(file: &Path, config: &AnalyzerConfig, result: &mut ExprCheckResult) {
    let source_id = file.display().to_string();
    result.files_checked += 1;

    let content = match std::fs::read_to_string(file) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("[ERROR] {}: 无法读取文件 - {}", source_id, e);
            result.read_errors += 1;
            return;
        }
    };

    let analysis = analyze(&content, config);
    result.expressions += analysis.expressions.len();
    result.diagnostics.merge(diagnose(&source_id, &analysis));
}

/// 输出检查结果
fn print_check_result(result: &ExprCheckResult) {
    eprintln!("─────────────────────────────────────────────────────");
    eprintln!(
        "检查完成: {} 个文件, {} 个表达式",
        result.files_checked, result.expressions
    );
    eprintln!();

    for diag in &result.diagnostics.diagnostics {
        eprintln!("{}", diag);
    }

    let error_count = result.read_errors + result.diagnostics.error_count();
    let warn_count = result.diagnostics.warn_count();

    eprintln!();
    if error_count > 0 {
        eprintln!("❌ {} 个错误, {} 个警告", error_count, warn_count);
    } else if warn_count > 0 {
        eprintln!("⚠️  0 个错误, {} 个警告", warn_count);
    } else {
        eprintln!("✅ 检查通过，无错误");
    }
}
