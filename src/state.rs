use crate::storage::Store;

/// 应用程序上下文
///
/// [`AppState`] 持有存储实现，各请求处理器从中取得所需的仓储。
#[derive(Clone)]
pub struct AppState<S> {
    store: S,
}

impl<S: Store> AppState<S> {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// 获取存储对象
    pub fn store(&self) -> &S {
        &self.store
    }
}
