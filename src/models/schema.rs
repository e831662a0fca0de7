//! 问卷结构定义
//!
//! 题目列表与评分刻度都是编译期常量，进程内只读。

use serde::{Deserialize, Serialize};

use crate::error::FormError;

/// 题目描述
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionDescriptor {
    /// 题目ID（稳定、连续、有序）
    pub id: u32,
    /// 题干
    pub prompt: &'static str,
}

// 第 6 与第 12 题、第 3 与第 9 题题干重复，属于问卷内容配置，保持原样
static QUESTIONS: [QuestionDescriptor; 12] = [
    QuestionDescriptor {
        id: 1,
        prompt: "The course objectives were clearly explained at the start of the term.",
    },
    QuestionDescriptor {
        id: 2,
        prompt: "The course content matched the stated objectives.",
    },
    QuestionDescriptor {
        id: 3,
        prompt: "The instructor explained the material clearly.",
    },
    QuestionDescriptor {
        id: 4,
        prompt: "The instructor encouraged questions and discussion.",
    },
    QuestionDescriptor {
        id: 5,
        prompt: "Lectures started and ended on time.",
    },
    QuestionDescriptor {
        id: 6,
        prompt: "The course references and materials were useful.",
    },
    QuestionDescriptor {
        id: 7,
        prompt: "Assignments helped me understand the material.",
    },
    QuestionDescriptor {
        id: 8,
        prompt: "Exams reflected the content that was taught.",
    },
    QuestionDescriptor {
        id: 9,
        prompt: "The instructor explained the material clearly.",
    },
    QuestionDescriptor {
        id: 10,
        prompt: "The teaching assistant was helpful in tutorials and labs.",
    },
    QuestionDescriptor {
        id: 11,
        prompt: "Grading was fair and feedback was timely.",
    },
    QuestionDescriptor {
        id: 12,
        prompt: "The course references and materials were useful.",
    },
];

/// 获取全部题目（有序）
pub fn questions() -> &'static [QuestionDescriptor] {
    &QUESTIONS
}

/// 评分枚举（1..=5）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Rating {
    /// 弱
    Weak = 1,
    /// 及格
    Acceptable = 2,
    /// 良
    Good = 3,
    /// 很好
    VeryGood = 4,
    /// 优秀
    Excellent = 5,
}

/// 评分刻度，按展示顺序（5 → 1）
static RATING_SCALE: [Rating; 5] = [
    Rating::Excellent,
    Rating::VeryGood,
    Rating::Good,
    Rating::Acceptable,
    Rating::Weak,
];

/// 获取评分刻度
pub fn rating_scale() -> &'static [Rating] {
    &RATING_SCALE
}

impl Rating {
    /// 获取分值
    pub fn value(self) -> u8 {
        self as u8
    }

    /// 获取展示标签
    pub fn label(self) -> &'static str {
        match self {
            Rating::Excellent => "Excellent",
            Rating::VeryGood => "Very good",
            Rating::Good => "Good",
            Rating::Acceptable => "Acceptable",
            Rating::Weak => "Weak",
        }
    }

    /// 从分值解析评分
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Rating::Weak),
            2 => Some(Rating::Acceptable),
            3 => Some(Rating::Good),
            4 => Some(Rating::VeryGood),
            5 => Some(Rating::Excellent),
            _ => None,
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = FormError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::from_value(value).ok_or(FormError::ScoreOutOfRange { value })
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.value()
    }
}

impl std::fmt::Display for Rating {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.value(), self.label())
    }
}
