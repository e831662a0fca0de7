//! 校验引擎 - 业务能力层
//!
//! 纯函数：输入当前表单值，输出与表单结构对应的错误表。
//! 不知道网络，也不知道提交状态。

use crate::models::form::{CourseField, FieldPath, FormValues, TextField};
use crate::models::schema::questions;

/// 评分缺失提示
pub const RATING_REQUIRED: &str = "rating required";

/// 文本字段规则：字段路径 → 判定 → 提示
struct TextRule {
    field: TextField,
    violated: fn(&str) -> bool,
    message: &'static str,
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

static TEXT_RULES: [TextRule; 8] = [
    TextRule {
        field: TextField::Course(CourseField::AcademicYear),
        violated: is_blank,
        message: "academic year required",
    },
    TextRule {
        field: TextField::Course(CourseField::Semester),
        violated: is_blank,
        message: "semester required",
    },
    TextRule {
        field: TextField::Course(CourseField::CourseName),
        violated: is_blank,
        message: "course name required",
    },
    TextRule {
        field: TextField::Course(CourseField::CourseCode),
        violated: is_blank,
        message: "course code required",
    },
    TextRule {
        field: TextField::Course(CourseField::Instructor),
        violated: is_blank,
        message: "instructor required",
    },
    TextRule {
        field: TextField::Course(CourseField::TeachingAssistant),
        violated: is_blank,
        message: "teaching assistant required",
    },
    TextRule {
        field: TextField::ImprovementSuggestions,
        violated: is_blank,
        message: "improvement suggestions required",
    },
    TextRule {
        field: TextField::OtherSuggestions,
        violated: is_blank,
        message: "other suggestions required",
    },
];

/// 课程信息字段错误
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseInfoErrors {
    pub academic_year: Option<String>,
    pub semester: Option<String>,
    pub course_name: Option<String>,
    pub course_code: Option<String>,
    pub instructor: Option<String>,
    pub teaching_assistant: Option<String>,
}

impl CourseInfoErrors {
    pub fn get(&self, field: CourseField) -> Option<&str> {
        let slot = match field {
            CourseField::AcademicYear => &self.academic_year,
            CourseField::Semester => &self.semester,
            CourseField::CourseName => &self.course_name,
            CourseField::CourseCode => &self.course_code,
            CourseField::Instructor => &self.instructor,
            CourseField::TeachingAssistant => &self.teaching_assistant,
        };
        slot.as_deref()
    }

    fn slot_mut(&mut self, field: CourseField) -> &mut Option<String> {
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

/// 错误表，结构与表单值一一对应，每个叶子最多一条提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMap {
    pub course_info: CourseInfoErrors,
    /// 与作答列表等长，只记录评分错误；通过 `get`/`iter` 读取
    responses: Vec<Option<String>>,
    pub improvement_suggestions: Option<String>,
    pub other_suggestions: Option<String>,
}

impl ErrorMap {
    /// 无错误
    pub fn empty() -> Self {
        Self {
            course_info: CourseInfoErrors::default(),
            responses: vec![None; questions().len()],
            improvement_suggestions: None,
            other_suggestions: None,
        }
    }

    /// 按字段路径读取提示
    pub fn get(&self, path: FieldPath) -> Option<&str> {
        match path {
            FieldPath::Text(TextField::Course(field)) => self.course_info.get(field),
            FieldPath::Text(TextField::ImprovementSuggestions) => {
                self.improvement_suggestions.as_deref()
            }
            FieldPath::Text(TextField::OtherSuggestions) => self.other_suggestions.as_deref(),
            FieldPath::Score(index) => self.responses.get(index).and_then(|m| m.as_deref()),
            FieldPath::Comment(_) => None,
        }
    }

    /// 按表单顺序列出全部提示
    pub fn iter(&self) -> impl Iterator<Item = (FieldPath, &str)> + '_ {
        let course = CourseField::ALL.into_iter().filter_map(move |field| {
            self.course_info
                .get(field)
                .map(|m| (FieldPath::Text(TextField::Course(field)), m))
        });
        let responses = self
            .responses
            .iter()
            .enumerate()
            .filter_map(|(i, m)| m.as_deref().map(|m| (FieldPath::Score(i), m)));
        let improvement = self
            .improvement_suggestions
            .as_deref()
            .map(|m| (FieldPath::Text(TextField::ImprovementSuggestions), m));
        let other = self
            .other_suggestions
            .as_deref()
            .map(|m| (FieldPath::Text(TextField::OtherSuggestions), m));

        course
            .chain(responses)
            .chain(improvement)
            .chain(other)
    }

    /// 提示条数
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    fn text_slot_mut(&mut self, field: TextField) -> &mut Option<String> {
        match field {
            TextField::Course(f) => self.course_info.slot_mut(f),
            TextField::ImprovementSuggestions => &mut self.improvement_suggestions,
            TextField::OtherSuggestions => &mut self.other_suggestions,
        }
    }
}

impl Default for ErrorMap {
    fn default() -> Self {
        Self::empty()
    }
}

/// 校验表单
///
/// 所有规则都会执行一遍，不提前返回。返回空表即允许提交。
pub fn validate(values: &FormValues) -> ErrorMap {
    let mut errors = ErrorMap::empty();

    for rule in TEXT_RULES.iter() {
        if (rule.violated)(values.text(rule.field)) {
            *errors.text_slot_mut(rule.field) = Some(rule.message.to_string());
        }
    }

    for (slot, response) in errors.responses.iter_mut().zip(values.responses()) {
        if response.score.is_none() {
            *slot = Some(RATING_REQUIRED.to_string());
        }
    }

    errors
}
