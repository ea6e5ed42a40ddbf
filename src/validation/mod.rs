//! 表单校验
//!
//! 校验失败不是错误：按字段收集提示信息放入 [`FieldErrors`]，由调用方决定如何重新展示表单。

mod article;
mod comment;

use std::collections::BTreeMap;

pub use self::{article::ArticleForm, comment::CommentForm};

/// 必填字段缺失或为空白
pub const REQUIRED: &str = "This field is required.";

/// 引用字段无法解析为已存在的记录
pub const INVALID_CHOICE: &str =
    "Select a valid choice. That choice is not one of the available choices.";

/// 校验结果：成功时为带类型的记录，失败时为各字段的错误信息
pub type Validated<T> = core::result::Result<T, FieldErrors>;

/// 以字段名为键的错误信息
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录字段错误，同一字段只保留第一条
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 检查必填文本字段，返回去除首尾空白后的值
    fn required(&mut self, field: &'static str, value: &str) -> Option<String> {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, REQUIRED);
            None
        } else {
            Some(value.to_string())
        }
    }

    /// 解析引用字段的 ID
    ///
    /// 空白记为必填错误，非整数记为无效选项；两种情况都返回 `None`。
    fn reference(&mut self, field: &'static str, value: &str) -> Option<i64> {
        let value = value.trim();
        if value.is_empty() {
            self.add(field, REQUIRED);
            return None;
        }
        match value.parse() {
            Ok(id) => Some(id),
            Err(_) => {
                self.add(field, INVALID_CHOICE);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_trims_value() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.required("title", "  hello "), Some("hello".to_string()));
        assert!(errors.is_empty());

        assert_eq!(errors.required("title", "   "), None);
        assert_eq!(errors.get("title"), Some(REQUIRED));
    }

    #[test]
    fn test_reference_parsing() {
        let mut errors = FieldErrors::new();
        assert_eq!(errors.reference("category", " 7 "), Some(7));
        assert_eq!(errors.reference("category", "seven"), None);
        assert_eq!(errors.get("category"), Some(INVALID_CHOICE));

        let mut errors = FieldErrors::new();
        assert_eq!(errors.reference("article", ""), None);
        assert_eq!(errors.get("article"), Some(REQUIRED));
    }

    #[test]
    fn test_first_error_wins() {
        let mut errors = FieldErrors::new();
        errors.add("text", "first");
        errors.add("text", "second");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("text"), Some("first"));
    }
}
