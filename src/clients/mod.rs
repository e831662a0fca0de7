pub mod http_transport;

pub use http_transport::HttpTransport;

use futures::future::BoxFuture;

use crate::error::TransportError;
use crate::models::SurveyPayload;

/// 问卷提交通道
///
/// 只暴露一次提交调用；成功值不透明，失败原因对控制器也不透明。
pub trait Transport: Send + Sync {
    fn submit<'a>(&'a self, payload: &'a SurveyPayload) -> BoxFuture<'a, Result<(), TransportError>>;
}

impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    fn submit<'a>(&'a self, payload: &'a SurveyPayload) -> BoxFuture<'a, Result<(), TransportError>> {
        (**self).submit(payload)
    }
}
