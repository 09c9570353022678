use bson::Document;

use crate::error::Result;
use crate::modules::inspect::schema::CollectionSummary;
use crate::AppState;

/// Collections in the database with their estimated document counts,
/// sorted by name.
pub async fn list_collections(state: &AppState) -> Result<Vec<CollectionSummary>> {
    let mut names = state.db.list_collection_names().await?;
    names.sort();

    let mut summaries = Vec::with_capacity(names.len());
    for name in names {
        let documents = state
            .db
            .collection::<Document>(&name)
            .estimated_document_count()
            .await?;
        summaries.push(CollectionSummary { name, documents });
    }

    Ok(summaries)
}
