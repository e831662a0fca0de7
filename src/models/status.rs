/// 提交状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    /// 初始状态
    #[default]
    Idle,
    /// 提交中（最多一个在途请求）
    Submitting,
    /// 上次提交成功
    Success,
    /// 上次提交失败
    Error,
}

/// 提交成功提示
pub const SUCCESS_NOTICE: &str = "Your responses have been submitted. Thank you for taking part.";
/// 提交失败提示（不包含具体原因）
pub const FAILURE_NOTICE: &str = "Something went wrong while submitting the form. Please try again.";

impl Status {
    /// 面向用户的提示文本
    pub fn notice(self) -> Option<&'static str> {
        match self {
            Status::Success => Some(SUCCESS_NOTICE),
            Status::Error => Some(FAILURE_NOTICE),
            Status::Idle | Status::Submitting => None,
        }
    }

    pub fn is_submitting(self) -> bool {
        self == Status::Submitting
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Status::Idle => "Idle",
            Status::Submitting => "Submitting",
            Status::Success => "Success",
            Status::Error => "Error",
        };
        f.write_str(name)
    }
}
