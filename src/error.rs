use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单操作错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),
    /// 提交通道错误
    #[error("提交错误: {0}")]
    Transport(#[from] TransportError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 表单操作错误
///
/// 只描述调用方的误用（越界、非法评分），不包含校验消息；
/// 校验结果统一放在 `ErrorMap` 中。
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    /// 题目索引越界
    #[error("题目索引 {index} 超出范围 [0, {len})")]
    IndexOutOfRange { index: usize, len: usize },
    /// 评分不在 1..=5 内
    #[error("评分 {value} 不在 1..=5 范围内")]
    ScoreOutOfRange { value: u8 },
    /// 构建 payload 时仍有题目未评分
    #[error("题目 {question_id} 尚未评分")]
    MissingScore { question_id: u32 },
}

/// 提交通道错误
///
/// 对控制器而言所有变体一视同仁，只用于日志诊断。
#[derive(Debug, Error)]
pub enum TransportError {
    /// 网络请求失败（连接失败、超时等）
    #[error("请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 服务端返回非 2xx
    #[error("服务端返回错误响应 ({endpoint}): status={status}, detail={detail:?}")]
    BadResponse {
        endpoint: String,
        status: u16,
        detail: Option<String>,
    },
    /// payload 序列化失败
    #[error("payload 序列化失败: {0}")]
    Encode(#[from] serde_json::Error),
    /// 其他原因（测试替身或自定义通道使用）
    #[error("{0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML 解析失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
    /// 配置值非法
    #[error("配置项 {key} 非法: {reason}")]
    InvalidValue { key: String, reason: String },
    /// HTTP 客户端构建失败
    #[error("HTTP 客户端构建失败: {0}")]
    ClientBuildFailed(#[from] reqwest::Error),
}

// ========== 便捷构造函数 ==========

impl TransportError {
    /// 创建请求失败错误
    pub fn request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        TransportError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        }
    }

    /// 创建其他原因的错误
    pub fn other(msg: impl Into<String>) -> Self {
        TransportError::Other(msg.into())
    }
}

impl ConfigError {
    /// 创建配置值非法错误
    pub fn invalid_value(key: impl Into<String>, reason: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
