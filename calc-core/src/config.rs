//! # Config 模块
//!
//! 分析器配置。宿主层从 JSON 文件加载后传入。

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// 分析器配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// 运算标签最大嵌套层数
    ///
    /// 超出时报告语法错误，而不是让递归无限增长。
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

/// `max_depth` 的上限
///
/// 解析、求值与渲染都按嵌套层数递归，超过该值可能耗尽线程栈。
pub const MAX_DEPTH_LIMIT: usize = 1024;

fn default_max_depth() -> usize {
    256
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}

impl AnalyzerConfig {
    /// 设置最大嵌套层数
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ValidationFailed(
                "max_depth 必须大于 0".to_string(),
            ));
        }
        if self.max_depth > MAX_DEPTH_LIMIT {
            return Err(ConfigError::ValidationFailed(format!(
                "max_depth 不能超过 {MAX_DEPTH_LIMIT}，当前为 {}",
                self.max_depth
            )));
        }
        Ok(())
    }
}
