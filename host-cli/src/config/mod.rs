//! # Config 模块
//!
//! 命令行前端的配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (tagcalc.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use anyhow::Context;
use calc_core::{AnalyzerConfig, ConfigError};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 输出格式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// 纯文本
    #[default]
    Text,
    /// JSON
    Json,
}

/// 日志级别
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for tracing::Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => tracing::Level::ERROR,
            LogLevel::Warn => tracing::Level::WARN,
            LogLevel::Info => tracing::Level::INFO,
            LogLevel::Debug => tracing::Level::DEBUG,
            LogLevel::Trace => tracing::Level::TRACE,
        }
    }
}

/// 配置来源
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// 从配置文件读取
    File,
    /// 文件不存在，使用默认值
    Default,
}

impl ConfigSource {
    pub fn log(self, path: &Path) {
        match self {
            Self::File => info!(path = %path.display(), "配置文件加载成功"),
            Self::Default => warn!(path = %path.display(), "配置文件不存在，使用默认配置"),
        }
    }
}

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    /// 分析器配置
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// 输出配置
    #[serde(default)]
    pub output: OutputConfig,

    /// 日志级别（命令行 `-v` 优先）
    #[serde(default)]
    pub log_level: LogLevel,
}

/// 输出配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct OutputConfig {
    /// 输出格式（text/json）
    #[serde(default)]
    pub format: OutputFormat,

    /// 是否同时输出词法单元列表
    #[serde(default)]
    pub show_tokens: bool,
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 文件不存在时返回默认配置；文件存在但无法解析视为错误。
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let (config, source) = Self::load_with_source(path)?;
        source.log(path);
        Ok(config)
    }

    /// 加载配置文件并返回其来源，不输出日志
    ///
    /// 用于日志系统尚未初始化的阶段，调用方在初始化后自行调用 [`ConfigSource::log`]。
    pub fn load_with_source(path: impl AsRef<Path>) -> anyhow::Result<(Self, ConfigSource)> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok((Self::default(), ConfigSource::Default));
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("无法读取配置文件 {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("配置文件解析失败 {}", path.display()))?;

        Ok((config, ConfigSource::File))
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.analyzer.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.analyzer.max_depth, 256);
        assert_eq!(config.output.format, OutputFormat::Text);
        assert!(!config.output.show_tokens);
        assert_eq!(config.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_partial_config() {
        let config: AppConfig =
            serde_json::from_str(r#"{"output": {"format": "json"}}"#).unwrap();
        assert_eq!(config.output.format, OutputFormat::Json);
        assert_eq!(config.analyzer, AnalyzerConfig::default());
    }

    #[test]
    fn test_log_level_from_config() {
        let config: AppConfig = serde_json::from_str(r#"{"log_level": "debug"}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(tracing::Level::from(config.log_level), tracing::Level::DEBUG);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = AppConfig::default();
        config.analyzer.max_depth = 12;
        let json = serde_json::to_string_pretty(&config).unwrap();

        let loaded: AppConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_config_validation() {
        let mut config = AppConfig::default();
        config.analyzer.max_depth = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = AppConfig::load("does/not/exist/tagcalc.json").unwrap();
        assert_eq!(config, AppConfig::default());

        let (_, source) = AppConfig::load_with_source("does/not/exist/tagcalc.json").unwrap();
        assert_eq!(source, ConfigSource::Default);
    }
}
