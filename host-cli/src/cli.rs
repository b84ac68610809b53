//! 命令行参数定义

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::{AppConfig, LogLevel, OutputFormat};

#[derive(Parser, Debug)]
#[command(name = "tagcalc")]
#[command(about = "标签式算术表达式分析器 - 扫描、解析并计算 <OPERACION> 表达式")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 配置文件路径
    #[arg(short, long, default_value = "tagcalc.json", global = true)]
    pub config: PathBuf,

    /// 日志详细程度（-v: info, -vv: debug）
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 分析输入文件，输出结果与错误
    Analyze {
        /// 输入文件（`-` 表示标准输入）
        input: PathBuf,

        /// 最大嵌套层数，1 到 1024（覆盖配置文件）
        #[arg(long)]
        max_depth: Option<usize>,

        /// 输出格式（覆盖配置文件）
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// 同时输出词法单元列表
        #[arg(long)]
        tokens: bool,
    },

    /// 仅扫描，输出词法单元与词法错误
    Tokens {
        /// 输入文件（`-` 表示标准输入）
        input: PathBuf,
    },
}

impl Cli {
    /// 日志级别：未指定 `-v` 时使用配置文件中的级别
    pub fn log_level(&self, configured: LogLevel) -> tracing::Level {
        match self.verbose {
            0 => configured.into(),
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    }
}

/// 用命令行参数覆盖配置
pub fn apply_overrides(
    mut config: AppConfig,
    max_depth: Option<usize>,
    format: Option<OutputFormat>,
    tokens: bool,
) -> AppConfig {
    if let Some(max_depth) = max_depth {
        config.analyzer.max_depth = max_depth;
    }
    if let Some(format) = format {
        config.output.format = format;
    }
    if tokens {
        config.output.show_tokens = true;
    }
    config
}
