use super::offering::{Catalog, ClassType, ServiceOffering};

/// Filter selection over the catalog. `None` means "All" for the two
/// choice filters; an empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    pub category: Option<String>,
    pub class_type: Option<ClassType>,
    pub query: String,
}

impl CatalogFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_class_type(mut self, class_type: ClassType) -> Self {
        self.class_type = Some(class_type);
        self
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    /// Whether a single offering passes all three predicates.
    pub fn matches(&self, offering: &ServiceOffering) -> bool {
        let category_ok = self
            .category
            .as_ref()
            .map_or(true, |c| offering.category == *c);

        let class_ok = self.class_type.map_or(true, |c| offering.class_type == c);

        let query = self.query.trim().to_lowercase();
        let query_ok = query.is_empty()
            || offering.title.to_lowercase().contains(&query)
            || offering.description.to_lowercase().contains(&query);

        category_ok && class_ok && query_ok
    }

    /// Apply the filter, preserving catalog declaration order.
    pub fn apply<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ServiceOffering> {
        catalog
            .offerings()
            .iter()
            .filter(|o| self.matches(o))
            .collect()
    }
}
