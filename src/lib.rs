//! # Course Survey
//!
//! 课程评价问卷的表单核心：数据模型、校验引擎与提交状态机
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models）
//! - `models/` - 题目结构、表单值、提交 payload、提交状态
//! - `schema` - 固定的 12 道题与 1..=5 评分刻度
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，不关心提交流程
//! - `validate` - 纯函数校验，输出错误表
//! - `FormStore` - 单个表单实例的字段更新与重置
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次提交"的完整流程
//! - `SubmissionController` - 守卫 → 校验 → 构建 payload → 提交 → 应用结果
//!
//! ### ④ 通道层（Clients）
//! - `clients/` - `Transport` 抽象与基于 reqwest 的 `HttpTransport`
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod workflow;

// 重新导出常用类型
pub use clients::{HttpTransport, Transport};
pub use config::Config;
pub use error::{AppError, AppResult, ConfigError, FormError, TransportError};
pub use models::{FieldUpdate, FormValues, Status, SurveyPayload};
pub use services::{validate, ErrorMap, FormStore};
pub use workflow::{SubmissionController, SubmitOutcome};
