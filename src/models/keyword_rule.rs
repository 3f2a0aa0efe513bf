use super::Category;

#[derive(Debug, Clone)]
pub struct KeywordRule {
    pub pattern: String,
    pub category: Category,
    pub is_regex: bool,
}

impl KeywordRule {
    pub fn new_contains(pattern: String, category: Category) -> Self {
        Self {
            pattern,
            category,
            is_regex: false,
        }
    }

    pub fn new_regex(pattern: String, category: Category) -> Self {
        Self {
            pattern,
            category,
            is_regex: true,
        }
    }
}
