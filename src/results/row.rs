use std::collections::HashMap;
use std::sync::Arc;

use crate::types::RowValues;

/// Column labels shared by every row of one result set, with a label → index lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl Columns {
    #[must_use]
    pub fn new(labels: Vec<String>) -> Self {
        // Later duplicates win, matching what a dict built from the same labels would hold.
        let index = labels
            .iter()
            .enumerate()
            .map(|(i, label)| (label.clone(), i))
            .collect();
        Self { labels, index }
    }

    #[must_use]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }
}

/// One decoded row: the dict a `DictCursor` would have returned.
///
/// Keys iterate in column-metadata order; lookup is by label.
#[derive(Debug, Clone, PartialEq)]
pub struct CustomDbRow {
    columns: Arc<Columns>,
    values: Vec<RowValues>,
}

impl CustomDbRow {
    #[must_use]
    pub fn new(columns: Arc<Columns>, values: Vec<RowValues>) -> Self {
        Self { columns, values }
    }

    /// Get a value from the row by column label
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&RowValues> {
        self.columns
            .position(label)
            .and_then(|idx| self.values.get(idx))
    }

    /// Get a value from the row by column index
    #[must_use]
    pub fn get_by_index(&self, index: usize) -> Option<&RowValues> {
        self.values.get(index)
    }

    #[must_use]
    pub fn column_names(&self) -> &[String] {
        self.columns.labels()
    }

    #[must_use]
    pub fn values(&self) -> &[RowValues] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `(label, value)` pairs in column order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RowValues)> {
        self.columns
            .labels()
            .iter()
            .map(String::as_str)
            .zip(self.values.iter())
    }

    /// Consume the row into an owned label → value map.
    #[must_use]
    pub fn into_map(self) -> HashMap<String, RowValues> {
        self.columns
            .labels()
            .iter()
            .cloned()
            .zip(self.values)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> CustomDbRow {
        let columns = Arc::new(Columns::new(vec!["id".into(), "name".into()]));
        CustomDbRow::new(columns, vec![RowValues::Int(1), RowValues::Text("Ann".into())])
    }

    #[test]
    fn lookup_by_label_and_index() {
        let row = row();
        assert_eq!(row.get("name").and_then(RowValues::as_text), Some("Ann"));
        assert_eq!(row.get_by_index(0), Some(&RowValues::Int(1)));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn iterates_in_metadata_order() {
        let labels: Vec<_> = row().iter().map(|(label, _)| label.to_string()).collect();
        assert_eq!(labels, ["id", "name"]);
        let map = row().into_map();
        assert_eq!(map.get("id"), Some(&RowValues::Int(1)));
    }

    #[test]
    fn duplicate_labels_resolve_to_the_last_column() {
        let columns = Columns::new(vec!["id".into(), "id".into()]);
        assert_eq!(columns.len(), 2);
        assert!(!columns.is_empty());
        assert!(Columns::new(Vec::new()).is_empty());

        let row = CustomDbRow::new(Arc::new(columns), vec![RowValues::Int(1), RowValues::Int(2)]);
        assert_eq!(row.get("id"), Some(&RowValues::Int(2)));
    }
}
