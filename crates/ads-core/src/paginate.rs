//! Page-by-page retrieval of resource collections.
//!
//! Pagination is best-effort: a failing page ends the walk for that
//! collection and everything gathered so far is kept. The failure is reported
//! as a [`FetchWarning`] instead of an error so one broken resource kind never
//! aborts a whole harvest.

use tracing::{debug, warn};

use crate::error::TransportError;
use crate::record::Record;
use crate::transport::{ApiVersion, Filter, Page, Resource, ResourceQuery, Transport};

/// Records requested per page.
pub const PAGE_SIZE: u32 = 100;

/// Upper bound on identifiers carried by one filtered request.
pub const MAX_IDS_PER_REQUEST: usize = 100;

/// A swallowed page failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchWarning {
    pub version: ApiVersion,
    pub resource: Resource,
    pub page: u32,
    pub message: String,
}

/// Records gathered from a collection plus any page failures along the way.
#[derive(Debug, Clone, Default)]
pub struct Fetched {
    pub records: Vec<Record>,
    pub warnings: Vec<FetchWarning>,
}

impl Fetched {
    /// True when every page was retrieved.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn merge(&mut self, other: Fetched) {
        self.records.extend(other.records);
        self.warnings.extend(other.warnings);
    }
}

/// Which collection to walk and how.
#[derive(Debug, Clone)]
pub struct Collection {
    pub version: ApiVersion,
    pub resource: Resource,
    pub fields: &'static [&'static str],
    pub filter: Option<Filter>,
}

impl Collection {
    pub fn new(version: ApiVersion, resource: Resource, fields: &'static [&'static str]) -> Self {
        Self {
            version,
            resource,
            fields,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    fn query(&self, page: u32, page_size: u32) -> ResourceQuery {
        ResourceQuery {
            version: self.version,
            resource: self.resource,
            page,
            page_size,
            filter: self.filter.clone(),
            fields: self.fields,
        }
    }
}

/// Drives collections to exhaustion through a [`Transport`].
#[derive(Clone, Copy)]
pub struct Paginator<'t> {
    transport: &'t dyn Transport,
    page_size: u32,
}

impl<'t> Paginator<'t> {
    pub fn new(transport: &'t dyn Transport) -> Self {
        Self {
            transport,
            page_size: PAGE_SIZE,
        }
    }

    /// Fetches page 1 and propagates its failure.
    pub async fn first_page(&self, collection: &Collection) -> Result<Page, TransportError> {
        self.transport
            .get(&collection.query(1, self.page_size))
            .await
    }

    /// Walks the whole collection starting at page 1.
    pub async fn fetch_all(&self, collection: &Collection) -> Fetched {
        self.walk(collection, 1, Fetched::default()).await
    }

    /// Continues a walk whose first page was already retrieved.
    pub async fn resume(&self, collection: &Collection, first: Page) -> Fetched {
        let total = first.total;
        let received = first.records.len();
        let fetched = Fetched {
            records: first.records,
            warnings: Vec::new(),
        };
        if received == 0 || received as u64 >= total {
            return fetched;
        }
        self.walk(collection, 2, fetched).await
    }

    /// Fetches the records named by `ids`, chunked under [`MAX_IDS_PER_REQUEST`].
    ///
    /// An empty id list fetches the entire collection. Each chunk is paginated
    /// on its own; a failing chunk does not stop the remaining ones.
    pub async fn fetch_by_ids(
        &self,
        collection: &Collection,
        id_field: &'static str,
        ids: &[String],
    ) -> Fetched {
        if ids.is_empty() {
            return self.fetch_all(collection).await;
        }

        let mut fetched = Fetched::default();
        for chunk in ids.chunks(MAX_IDS_PER_REQUEST) {
            let filtered = collection.clone().with_filter(Filter::In {
                field: id_field,
                values: chunk.to_vec(),
            });
            fetched.merge(self.fetch_all(&filtered).await);
        }
        fetched
    }

    async fn walk(&self, collection: &Collection, start: u32, mut fetched: Fetched) -> Fetched {
        let mut page = start;
        loop {
            match self
                .transport
                .get(&collection.query(page, self.page_size))
                .await
            {
                Ok(Page { records, total }) => {
                    let received = records.len();
                    fetched.records.extend(records);
                    debug!(
                        version = %collection.version,
                        resource = %collection.resource,
                        page,
                        received,
                        total,
                        "fetched page"
                    );
                    if received == 0 || fetched.records.len() as u64 >= total {
                        return fetched;
                    }
                    page += 1;
                }
                Err(err) => {
                    warn!(
                        version = %collection.version,
                        resource = %collection.resource,
                        page,
                        kept = fetched.records.len(),
                        error = %err,
                        "page fetch failed; keeping partial results"
                    );
                    fetched.warnings.push(FetchWarning {
                        version: collection.version,
                        resource: collection.resource,
                        page,
                        message: err.to_string(),
                    });
                    return fetched;
                }
            }
        }
    }
}
