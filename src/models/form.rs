use serde::{Deserialize, Serialize};

use crate::models::schema::{questions, Rating};

/// 课程信息字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseField {
    AcademicYear,
    Semester,
    CourseName,
    CourseCode,
    Instructor,
    TeachingAssistant,
}

impl CourseField {
    /// 全部字段（按表单顺序）
    pub const ALL: [CourseField; 6] = [
        CourseField::AcademicYear,
        CourseField::Semester,
        CourseField::CourseName,
        CourseField::CourseCode,
        CourseField::Instructor,
        CourseField::TeachingAssistant,
    ];

    /// wire 格式中的字段名
    pub fn key(self) -> &'static str {
        match self {
            CourseField::AcademicYear => "academic_year",
            CourseField::Semester => "semester",
            CourseField::CourseName => "course_name",
            CourseField::CourseCode => "course_code",
            CourseField::Instructor => "instructor",
            CourseField::TeachingAssistant => "teaching_assistant",
        }
    }

    /// 面向用户的字段名
    pub fn label(self) -> &'static str {
        match self {
            CourseField::AcademicYear => "academic year",
            CourseField::Semester => "semester",
            CourseField::CourseName => "course name",
            CourseField::CourseCode => "course code",
            CourseField::Instructor => "instructor",
            CourseField::TeachingAssistant => "teaching assistant",
        }
    }
}

/// 课程信息（六个必填字段）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseInfo {
    pub academic_year: String,
    pub semester: String,
    pub course_name: String,
    pub course_code: String,
    pub instructor: String,
    pub teaching_assistant: String,
}

impl CourseInfo {
    pub fn get(&self, field: CourseField) -> &str {
        match field {
            CourseField::AcademicYear => &self.academic_year,
            CourseField::Semester => &self.semester,
            CourseField::CourseName => &self.course_name,
            CourseField::CourseCode => &self.course_code,
            CourseField::Instructor => &self.instructor,
            CourseField::TeachingAssistant => &self.teaching_assistant,
        }
    }

    pub fn get_mut(&mut self, field: CourseField) -> &mut String {
        match field {
            CourseField::AcademicYear => &mut self.academic_year,
            CourseField::Semester => &mut self.semester,
            CourseField::CourseName => &mut self.course_name,
            CourseField::CourseCode => &mut self.course_code,
            CourseField::Instructor => &mut self.instructor,
            CourseField::TeachingAssistant => &mut self.teaching_assistant,
        }
    }
}

/// 单题作答
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionResponse {
    /// 与题目ID一一对应
    pub id: u32,
    /// 评分，未选择时为 None
    pub score: Option<Rating>,
    /// 备注
    pub comment: Option<String>,
}

impl QuestionResponse {
    fn empty(id: u32) -> Self {
        Self {
            id,
            score: None,
            comment: None,
        }
    }
}

/// 表单当前值
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub course_info: CourseInfo,
    responses: Vec<QuestionResponse>,
    pub improvement_suggestions: String,
    pub other_suggestions: String,
}

impl FormValues {
    /// 创建空表单，每道题一个空作答
    pub fn empty() -> Self {
        Self {
            course_info: CourseInfo::default(),
            responses: questions()
                .iter()
                .map(|q| QuestionResponse::empty(q.id))
                .collect(),
            improvement_suggestions: String::new(),
            other_suggestions: String::new(),
        }
    }

    /// 作答列表（长度与题目列表一致，不可增删）
    pub fn responses(&self) -> &[QuestionResponse] {
        &self.responses
    }

    pub(crate) fn response_mut(&mut self, index: usize) -> Option<&mut QuestionResponse> {
        self.responses.get_mut(index)
    }

    /// 已评分的题目数
    pub fn answered_count(&self) -> usize {
        self.responses.iter().filter(|r| r.score.is_some()).count()
    }

    /// 读取某个文本字段
    pub fn text(&self, field: TextField) -> &str {
        match field {
            TextField::Course(f) => self.course_info.get(f),
            TextField::ImprovementSuggestions => &self.improvement_suggestions,
            TextField::OtherSuggestions => &self.other_suggestions,
        }
    }
}

impl Default for FormValues {
    fn default() -> Self {
        Self::empty()
    }
}

/// 文本类叶子字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextField {
    Course(CourseField),
    ImprovementSuggestions,
    OtherSuggestions,
}

/// 表单叶子字段路径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Text(TextField),
    Score(usize),
    Comment(usize),
}

impl std::fmt::Display for FieldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldPath::Text(TextField::Course(field)) => write!(f, "course_info.{}", field.key()),
            FieldPath::Text(TextField::ImprovementSuggestions) => {
                write!(f, "improvement_suggestions")
            }
            FieldPath::Text(TextField::OtherSuggestions) => write!(f, "other_suggestions"),
            FieldPath::Score(i) => write!(f, "responses[{}].score", i),
            FieldPath::Comment(i) => write!(f, "responses[{}].comment", i),
        }
    }
}

/// 单个叶子字段的更新
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate {
    /// 课程信息字段
    Course(CourseField, String),
    /// 第 index 题评分（原始分值，写入前校验范围）
    Score { index: usize, value: u8 },
    /// 第 index 题备注
    Comment { index: usize, text: String },
    /// 改进建议
    ImprovementSuggestions(String),
    /// 其他建议
    OtherSuggestions(String),
}

impl FieldUpdate {
    /// 更新目标路径
    pub fn path(&self) -> FieldPath {
        match self {
            FieldUpdate::Course(field, _) => FieldPath::Text(TextField::Course(*field)),
            FieldUpdate::Score { index, .. } => FieldPath::Score(*index),
            FieldUpdate::Comment { index, .. } => FieldPath::Comment(*index),
            FieldUpdate::ImprovementSuggestions(_) => {
                FieldPath::Text(TextField::ImprovementSuggestions)
            }
            FieldUpdate::OtherSuggestions(_) => FieldPath::Text(TextField::OtherSuggestions),
        }
    }
}
