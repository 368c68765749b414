//! ListResponsesHandler - Admin listing with paging.

use std::sync::Arc;

use serde::Serialize;

use crate::domain::foundation::DomainError;
use crate::domain::response::ResponseRecord;
use crate::ports::ResponseRepository;

const DEFAULT_LIMIT: u64 = 20;
const MAX_LIMIT: u64 = 100;

/// Paged listing query. Page numbering is 1-based.
#[derive(Debug, Clone, Copy)]
pub struct ListResponsesQuery {
    pub page: u64,
    pub limit: u64,
}

impl Default for ListResponsesQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// One page of response records plus paging metadata.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseListing {
    pub records: Vec<ResponseRecord>,
    pub total: u64,
    pub page: u64,
    pub total_pages: u64,
}

/// Handler for the admin response listing.
pub struct ListResponsesHandler {
    repository: Arc<dyn ResponseRepository>,
}

impl ListResponsesHandler {
    pub fn new(repository: Arc<dyn ResponseRepository>) -> Self {
        Self { repository }
    }

    pub async fn handle(&self, query: ListResponsesQuery) -> Result<ResponseListing, DomainError> {
        let page = query.page.max(1);
        let limit = query.limit.clamp(1, MAX_LIMIT);
        let offset = (page - 1) * limit;

        let paged = self.repository.list_page(offset, limit).await?;
        let total_pages = (paged.total + limit - 1) / limit;

        Ok(ResponseListing {
            records: paged.records,
            total: paged.total,
            page,
            total_pages,
        })
    }
}
