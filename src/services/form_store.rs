//! 表单状态存储
//!
//! 持有当前表单值、错误表和提交状态。
//! 状态由提交控制器驱动，存储本身只负责字段更新与重置。

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::FormError;
use crate::models::form::{FieldUpdate, FormValues};
use crate::models::schema::Rating;
use crate::models::status::Status;
use crate::services::validation::ErrorMap;

/// 单个表单实例的状态
#[derive(Debug, Clone)]
pub struct FormStore {
    values: FormValues,
    errors: ErrorMap,
    status: Status,
    mounted_at: DateTime<Utc>,
}

impl FormStore {
    /// 挂载一个空表单
    pub fn mount() -> Self {
        Self {
            values: FormValues::empty(),
            errors: ErrorMap::empty(),
            status: Status::Idle,
            mounted_at: Utc::now(),
        }
    }

    pub fn values(&self) -> &FormValues {
        &self.values
    }

    pub fn errors(&self) -> &ErrorMap {
        &self.errors
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// 表单挂载时间
    pub fn mounted_at(&self) -> DateTime<Utc> {
        self.mounted_at
    }

    /// 更新一个叶子字段，不触发校验
    ///
    /// 作答类更新必须指向已存在的题目；评分必须在 1..=5 内。
    /// 出错时表单保持不变。
    pub fn set_field(&mut self, update: FieldUpdate) -> Result<(), FormError> {
        let path = update.path();
        let len = self.values.responses().len();

        match update {
            FieldUpdate::Course(field, value) => {
                *self.values.course_info.get_mut(field) = value;
            }
            FieldUpdate::Score { index, value } => {
                let response = self
                    .values
                    .response_mut(index)
                    .ok_or(FormError::IndexOutOfRange { index, len })?;
                response.score = Some(Rating::try_from(value)?);
            }
            FieldUpdate::Comment { index, text } => {
                let response = self
                    .values
                    .response_mut(index)
                    .ok_or(FormError::IndexOutOfRange { index, len })?;
                response.comment = if text.is_empty() { None } else { Some(text) };
            }
            FieldUpdate::ImprovementSuggestions(value) => {
                self.values.improvement_suggestions = value;
            }
            FieldUpdate::OtherSuggestions(value) => {
                self.values.other_suggestions = value;
            }
        }

        debug!("字段已更新: {}", path);
        Ok(())
    }

    /// 恢复所有值为初始空值并清空错误，不修改状态
    pub fn reset(&mut self) {
        self.values = FormValues::empty();
        self.errors = ErrorMap::empty();
    }

    pub(crate) fn set_errors(&mut self, errors: ErrorMap) {
        self.errors = errors;
    }

    pub(crate) fn set_status(&mut self, status: Status) {
        self.status = status;
    }
}

impl Default for FormStore {
    fn default() -> Self {
        Self::mount()
    }
}
