//! 问卷提交流程 - 流程层
//!
//! 核心职责：定义"一次提交"的完整流程
//!
//! 流程顺序：
//! 1. 守卫：提交中直接忽略
//! 2. 校验：有错误则发布错误表并停止
//! 3. 构建 payload（深拷贝 + 时间戳）
//! 4. 调用提交通道
//! 5. 成功 → Success + 重置表单；失败 → Error，保留表单
//!
//! 等待提交通道期间若 future 被丢弃（外部超时、`select!`、卸载），
//! 状态回到 Error，表单保留，可以再次提交。
//!
//! 状态迁移由同步的 reducer 函数（`submit` / `resolve` / `reject` / `abandon`）完成，
//! `SubmissionController` 只负责在它们之间等待提交通道。

use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info, warn};

use crate::clients::Transport;
use crate::error::{FormError, TransportError};
use crate::models::form::{FieldUpdate, FormValues};
use crate::models::payload::SurveyPayload;
use crate::models::status::Status;
use crate::services::form_store::FormStore;
use crate::services::validation::{validate, ErrorMap};

/// 提交请求的守卫结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitDecision {
    /// 已进入 Submitting，需要把 payload 交给提交通道
    Start(SurveyPayload),
    /// 校验未通过，错误表已发布
    Invalid,
    /// 已有在途提交，本次请求被忽略
    AlreadySubmitting,
}

/// 一次提交请求的最终结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 提交成功，表单已重置
    Submitted,
    /// 提交通道失败，表单保留
    Failed,
    /// 校验未通过，没有发起请求
    Invalid,
    /// 已有在途提交，没有发起请求
    AlreadySubmitting,
}

/// 处理提交请求
///
/// 只有在守卫与校验都通过后才调用 `clock` 取提交时间。
pub fn submit(
    store: &mut FormStore,
    clock: impl FnOnce() -> DateTime<Utc>,
) -> SubmitDecision {
    if store.status().is_submitting() {
        warn!("⚠️ 已有提交正在进行，忽略本次提交请求");
        return SubmitDecision::AlreadySubmitting;
    }

    let errors = validate(store.values());
    if !errors.is_empty() {
        warn!("⚠️ 表单校验未通过: {} 处错误", errors.len());
        store.set_errors(errors);
        store.set_status(Status::Idle);
        return SubmitDecision::Invalid;
    }

    match SurveyPayload::build(store.values(), clock()) {
        Ok(payload) => {
            store.set_errors(ErrorMap::empty());
            store.set_status(Status::Submitting);
            info!(
                "📤 开始提交问卷: {} ({}), 共 {} 题",
                payload.course_info.course_name,
                payload.course_info.course_code,
                payload.responses.len()
            );
            SubmitDecision::Start(payload)
        }
        Err(e) => {
            error!("构建 payload 失败: {}", e);
            store.set_errors(validate(store.values()));
            store.set_status(Status::Idle);
            SubmitDecision::Invalid
        }
    }
}

/// 提交通道成功：Submitting → Success，并重置表单
///
/// 不在 Submitting 时返回 false，不做任何修改。
pub fn resolve(store: &mut FormStore) -> bool {
    if !store.status().is_submitting() {
        warn!("⚠️ 当前状态为 {}，忽略提交成功回调", store.status());
        return false;
    }
    store.reset();
    store.set_status(Status::Success);
    info!("✓ 问卷提交成功，表单已重置");
    true
}

/// 提交通道失败：Submitting → Error，保留表单
///
/// 失败原因只写日志，不展示给用户。
pub fn reject(store: &mut FormStore, cause: &TransportError) -> bool {
    if !store.status().is_submitting() {
        warn!("⚠️ 当前状态为 {}，忽略提交失败回调", store.status());
        return false;
    }
    store.set_status(Status::Error);
    error!("❌ 问卷提交失败: {}", cause);
    true
}

/// 在途提交被中断：Submitting → Error，保留表单
///
/// 不在 Submitting 时返回 false，不做任何修改。
pub fn abandon(store: &mut FormStore) -> bool {
    if !store.status().is_submitting() {
        return false;
    }
    store.set_status(Status::Error);
    warn!("⚠️ 在途提交在完成前被中断，表单已保留");
    true
}

/// 在途提交守卫
///
/// 进入 Submitting 后创建；结果正常应用后解除。
/// 未解除即被丢弃时执行 `abandon`，拿不到锁则留给下一次加锁处理。
struct InFlightGuard<'a> {
    store: &'a Mutex<FormStore>,
    abandoned: &'a AtomicBool,
    armed: bool,
}

impl InFlightGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        match self.store.try_lock() {
            Ok(mut store) => {
                abandon(&mut store);
            }
            Err(_) => self.abandoned.store(true, Ordering::SeqCst),
        }
    }
}

/// 提交控制器
///
/// 持有一个表单实例和一个提交通道。表单锁不会跨越网络等待，
/// 因此提交过程中仍可编辑字段。
pub struct SubmissionController<T> {
    store: Mutex<FormStore>,
    abandoned: AtomicBool,
    transport: T,
}

impl<T: Transport> SubmissionController<T> {
    /// 挂载新表单
    pub fn new(transport: T) -> Self {
        Self::with_store(transport, FormStore::mount())
    }

    pub fn with_store(transport: T, store: FormStore) -> Self {
        Self {
            store: Mutex::new(store),
            abandoned: AtomicBool::new(false),
            transport,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// 加锁，并补上守卫未能及时应用的中断
    async fn lock_store(&self) -> MutexGuard<'_, FormStore> {
        let mut store = self.store.lock().await;
        if self.abandoned.swap(false, Ordering::SeqCst) {
            abandon(&mut store);
        }
        store
    }

    /// 更新一个字段
    pub async fn set_field(&self, update: FieldUpdate) -> Result<(), FormError> {
        self.lock_store().await.set_field(update)
    }

    /// 重置表单
    pub async fn reset(&self) {
        self.lock_store().await.reset();
    }

    pub async fn values(&self) -> FormValues {
        self.lock_store().await.values().clone()
    }

    pub async fn errors(&self) -> ErrorMap {
        self.lock_store().await.errors().clone()
    }

    pub async fn status(&self) -> Status {
        self.lock_store().await.status()
    }

    /// 当前应展示给用户的提示
    pub async fn notice(&self) -> Option<&'static str> {
        self.status().await.notice()
    }

    pub async fn mounted_at(&self) -> DateTime<Utc> {
        self.lock_store().await.mounted_at()
    }

    /// 发起一次提交
    ///
    /// 提交中再次调用会立即返回 [`SubmitOutcome::AlreadySubmitting`]。
    pub async fn submit(&self) -> SubmitOutcome {
        let payload = {
            let mut store = self.lock_store().await;
            match submit(&mut store, Utc::now) {
                SubmitDecision::Start(payload) => payload,
                SubmitDecision::Invalid => return SubmitOutcome::Invalid,
                SubmitDecision::AlreadySubmitting => return SubmitOutcome::AlreadySubmitting,
            }
        };
        let guard = InFlightGuard {
            store: &self.store,
            abandoned: &self.abandoned,
            armed: true,
        };

        let result = self.transport.submit(&payload).await;

        let mut store = self.lock_store().await;
        let outcome = match result {
            Ok(()) => {
                resolve(&mut store);
                SubmitOutcome::Submitted
            }
            Err(cause) => {
                reject(&mut store, &cause);
                SubmitOutcome::Failed
            }
        };
        drop(store);
        guard.disarm();
        outcome
    }
}
