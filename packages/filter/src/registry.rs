use crate::filter::Filter;

/// Named filters available to a pipeline, in registration order
pub struct FilterRegistry {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Register a filter. A later filter with the same name replaces the
    /// earlier one in place.
    pub fn register(&mut self, filter: Box<dyn Filter>) {
        match self.filters.iter().position(|f| f.name() == filter.name()) {
            Some(index) => self.filters[index] = filter,
            None => self.filters.push(filter),
        }
    }

    /// Get all registered filters
    pub fn filters(&self) -> &[Box<dyn Filter>] {
        &self.filters
    }

    pub fn get(&self, name: &str) -> Option<&dyn Filter> {
        for filter in &self.filters {
            if filter.name() == name {
                return Some(&**filter);
            }
        }
        None
    }

    /// Remove and return a filter by name
    pub fn take(&mut self, name: &str) -> Option<Box<dyn Filter>> {
        let index = self.filters.iter().position(|f| f.name() == name)?;
        Some(self.filters.remove(index))
    }

    /// Names in registration order
    pub fn names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    pub fn into_filters(self) -> Vec<Box<dyn Filter>> {
        self.filters
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterRegistry")
            .field("filters", &self.names())
            .finish()
    }
}
