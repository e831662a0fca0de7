use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::FormError;
use crate::models::form::{CourseInfo, FormValues};
use crate::models::schema::Rating;

/// 单题提交数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseEntry {
    pub question_id: u32,
    pub score: Rating,
    /// 未填写备注时为空字符串
    pub comment: String,
}

/// 提交给服务端的问卷数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurveyPayload {
    pub course_info: CourseInfo,
    pub responses: Vec<ResponseEntry>,
    pub improvement_suggestions: String,
    pub other_suggestions: String,
    pub submitted_at: DateTime<Utc>,
}

impl SurveyPayload {
    /// 从当前表单值构建 payload（深拷贝）
    ///
    /// 任意题目未评分时返回 [`FormError::MissingScore`]。
    pub fn build(values: &FormValues, submitted_at: DateTime<Utc>) -> Result<Self, FormError> {
        let responses = values
            .responses()
            .iter()
            .map(|r| {
                let score = r
                    .score
                    .ok_or(FormError::MissingScore { question_id: r.id })?;
                Ok(ResponseEntry {
                    question_id: r.id,
                    score,
                    comment: r.comment.clone().unwrap_or_default(),
                })
            })
            .collect::<Result<Vec<_>, FormError>>()?;

        Ok(Self {
            course_info: values.course_info.clone(),
            responses,
            improvement_suggestions: values.improvement_suggestions.clone(),
            other_suggestions: values.other_suggestions.clone(),
            submitted_at,
        })
    }
}
