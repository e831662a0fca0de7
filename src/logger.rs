/// 日志工具模块
///
/// 基于 tracing-subscriber 的 fmt 输出，`RUST_LOG` 优先于默认级别
use tracing_subscriber::EnvFilter;

/// 初始化日志，重复调用无副作用
///
/// # 参数
/// - `verbose`: 为 true 时默认级别为 debug，否则为 info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
