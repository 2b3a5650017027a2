use crate::hooks::Operation;

/// Fixed page size for index listings.
pub const PAGE_LIMIT: u32 = 25;

/// Process-wide default template locations, keyed by operation.
///
/// Used whenever the active type configures no override for an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewDefaults {
    pub index: String,
    pub view: String,
    pub add: String,
    pub edit: String,
}

impl Default for ViewDefaults {
    fn default() -> Self {
        Self {
            index: "Types/index".to_string(),
            view: "Types/view".to_string(),
            add: "Types/add".to_string(),
            edit: "Types/edit".to_string(),
        }
    }
}

impl ViewDefaults {
    /// The default template for `operation`. Delete always redirects, so
    /// its entry doubles onto the index location and is never rendered.
    #[must_use]
    pub fn for_operation(&self, operation: Operation) -> &str {
        match operation {
            Operation::Index | Operation::Delete => &self.index,
            Operation::View => &self.view,
            Operation::Add => &self.add,
            Operation::Edit => &self.edit,
        }
    }
}

/// Dispatcher-wide configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchConfig {
    pub views: ViewDefaults,
    /// Columns excluded when form fields are derived from the backing
    /// model's column list.
    pub filtered_columns: Vec<String>,
    pub page_limit: u32,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            views: ViewDefaults::default(),
            filtered_columns: vec![
                "id".to_string(),
                "created".to_string(),
                "modified".to_string(),
            ],
            page_limit: PAGE_LIMIT,
        }
    }
}
