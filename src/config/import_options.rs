// ==========================================
// 商品批量导入 - 导入选项
// ==========================================
// 来源: 任务提交时用户填写的选项
// 缺省: addedTags = [], defaultPublishedStatus = false, defaultStatus = DRAFT
// ==========================================

use crate::domain::types::ProductStatus;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImportOptions {
    /// 无条件追加到每个商品的标签
    pub added_tags: Vec<String>,
    /// published 列缺失、为空或非法时使用
    pub default_published_status: bool,
    /// status 列缺失、为空或非法时使用
    pub default_status: ProductStatus,
}

impl ImportOptions {
    pub fn with_added_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.added_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default_published(mut self, published: bool) -> Self {
        self.default_published_status = published;
        self
    }

    pub fn with_default_status(mut self, status: ProductStatus) -> Self {
        self.default_status = status;
        self
    }
}
