/// 分类 ID
pub type CategoryId = i64;

/// 文章分类
///
/// 分类只在启动时按配置写入，请求处理过程中不会被修改。
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
}
