//! FAQ category model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Node of the admin-authored FAQ tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FaqCategory {
    pub id: i64,
    pub title: Option<String>,
    pub parent_id: Option<i64>,
    /// Nullable on purpose: root listing only shows rows where it is set
    pub leaf_category: Option<bool>,
    pub category_answer: Option<String>,
}

impl FaqCategory {
    pub fn is_leaf(&self) -> bool {
        self.leaf_category == Some(true)
    }

    /// Root listing filter: no parent and an explicit leaf flag
    pub fn is_root_listed(&self) -> bool {
        self.parent_id.is_none() && self.leaf_category.is_some()
    }

    pub fn label(&self) -> String {
        self.title.clone().unwrap_or_else(|| format!("#{}", self.id))
    }
}

/// Editable FAQ columns used by the admin panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqCategoryForm {
    pub title: Option<String>,
    pub parent_id: Option<i64>,
    pub leaf_category: Option<bool>,
    pub category_answer: Option<String>,
}

impl FaqCategoryForm {
    pub fn into_category(self, id: i64) -> FaqCategory {
        FaqCategory {
            id,
            title: self.title,
            parent_id: self.parent_id,
            leaf_category: self.leaf_category,
            category_answer: self.category_answer,
        }
    }
}
