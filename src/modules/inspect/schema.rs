use serde::Serialize;

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CollectionSummary {
    pub name: String,
    pub documents: u64,
}
