//! Inquiry store backed by `inquiries.json`.
//!
//! The store owns the inquiry collection exclusively: handlers never touch
//! the file. All operations take the store-wide mutex for their full
//! read-modify-write span, which rules out lost updates inside one process.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::instrument;

use amberleaf_core::{Inquiry, InquiryId, InquiryStatus, NewInquiry};

use super::StoreError;

/// File name of the persisted inquiry document.
const INQUIRIES_FILE: &str = "inquiries.json";

/// CSV export header row.
const CSV_HEADER: &str = "Date,Name,Email,Phone,Product,Status,Message";

/// The persisted document: `{"inquiries": [...]}`.
#[derive(Debug, Default, Serialize, Deserialize)]
struct InquiryDocument {
    inquiries: Vec<Inquiry>,
}

/// Listing filter for the admin inquiry view.
#[derive(Debug, Clone)]
pub struct InquiryFilter {
    /// Case-insensitive substring matched against name/email/product/message.
    pub search: Option<String>,
    /// Exact status filter; `None` or `"all"` disables it.
    pub status: Option<String>,
    /// 1-based page number.
    pub page: u32,
    /// Page size.
    pub limit: u32,
}

impl Default for InquiryFilter {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            limit: 10,
        }
    }
}

/// One page of the filtered, newest-first inquiry listing.
#[derive(Debug, Serialize)]
pub struct InquiryPage {
    pub inquiries: Vec<Inquiry>,
    pub total: usize,
    pub page: u32,
    #[serde(rename = "totalPages")]
    pub total_pages: u32,
}

/// Store for the inquiry collection.
pub struct InquiryStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl InquiryStore {
    /// Create a store over `<data_dir>/inquiries.json`.
    #[must_use]
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(INQUIRIES_FILE),
            lock: Mutex::new(()),
        }
    }

    /// Create the data directory and an empty document if absent. Idempotent.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Io` if the directory or file cannot be created.
    pub async fn ensure_initialized(&self) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;

        if let Some(dir) = self.path.parent() {
            tokio::fs::create_dir_all(dir).await?;
        }
        if !tokio::fs::try_exists(&self.path).await? {
            self.persist(&InquiryDocument::default()).await?;
            tracing::info!(path = %self.path.display(), "Created empty inquiry document");
        }
        Ok(())
    }

    /// Append a new inquiry and return the stored record.
    ///
    /// Assigns the id and creation timestamp, sets the status to `pending`,
    /// and persists the full collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if a required field is empty, or an
    /// I/O error if the document cannot be read or written.
    #[instrument(skip(self, input), fields(product = %input.product))]
    pub async fn append(&self, input: NewInquiry) -> Result<Inquiry, StoreError> {
        input.validate()?;

        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let date = Utc::now();
        let id = next_id(&doc.inquiries, date.timestamp_millis());
        let inquiry = Inquiry {
            id,
            name: input.name,
            email: input.email,
            phone: input.phone,
            product: input.product,
            message: input.message,
            date,
            status: InquiryStatus::Pending,
        };

        doc.inquiries.push(inquiry.clone());
        self.persist(&doc).await?;

        tracing::info!(id = %inquiry.id, "Inquiry stored");
        Ok(inquiry)
    }

    /// List inquiries newest-first, filtered and paginated.
    ///
    /// Out-of-range pages return an empty slice with the correct totals.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error if the document cannot be loaded.
    pub async fn list(&self, filter: &InquiryFilter) -> Result<InquiryPage, StoreError> {
        let _guard = self.lock.lock().await;
        let doc = self.load().await?;

        let mut matches: Vec<Inquiry> = doc
            .inquiries
            .into_iter()
            .filter(|inquiry| matches_filter(inquiry, filter))
            .collect();
        matches.sort_by(|a, b| b.date.cmp(&a.date));

        let total = matches.len();
        let page = filter.page.max(1);
        let limit = filter.limit.max(1);
        let total_pages = u32::try_from(total.div_ceil(limit as usize)).unwrap_or(u32::MAX);

        let start = (page as usize - 1).saturating_mul(limit as usize);
        let inquiries = if start < total {
            matches
                .into_iter()
                .skip(start)
                .take(limit as usize)
                .collect()
        } else {
            Vec::new()
        };

        Ok(InquiryPage {
            inquiries,
            total,
            page,
            total_pages,
        })
    }

    /// Set the status of the inquiry with the given id.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no inquiry has that id.
    #[instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: &str,
        status: InquiryStatus,
    ) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;

        let inquiry = doc
            .inquiries
            .iter_mut()
            .find(|inquiry| inquiry.id.as_str() == id)
            .ok_or_else(|| StoreError::NotFound(format!("inquiry {id}")))?;

        inquiry.status = status;
        self.persist(&doc).await?;

        tracing::info!(id = %id, status = %status, "Inquiry status updated");
        Ok(())
    }

    /// Render the full collection as CSV, newest-first.
    ///
    /// Every field is quoted; embedded quotes are doubled.
    ///
    /// # Errors
    ///
    /// Returns an I/O or parse error if the document cannot be loaded.
    pub async fn export_csv(&self) -> Result<String, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.load().await?;
        doc.inquiries.sort_by(|a, b| b.date.cmp(&a.date));

        let mut lines = Vec::with_capacity(doc.inquiries.len() + 1);
        lines.push(CSV_HEADER.to_owned());
        for inquiry in &doc.inquiries {
            lines.push(csv_row(inquiry));
        }

        Ok(lines.join("\n"))
    }

    /// Load the document, treating a missing or empty file as an empty
    /// collection.
    async fn load(&self) -> Result<InquiryDocument, StoreError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) if bytes.is_empty() => Ok(InquiryDocument::default()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(InquiryDocument::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Write the full document back to disk.
    async fn persist(&self, doc: &InquiryDocument) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(doc)?;
        tokio::fs::write(&self.path, bytes).await?;
        Ok(())
    }
}

/// Whether an inquiry passes the search and status filters.
fn matches_filter(inquiry: &Inquiry, filter: &InquiryFilter) -> bool {
    if let Some(search) = filter.search.as_deref() {
        let term = search.to_lowercase();
        let hit = inquiry.name.to_lowercase().contains(&term)
            || inquiry.email.as_str().to_lowercase().contains(&term)
            || inquiry.product.to_lowercase().contains(&term)
            || inquiry.message.to_lowercase().contains(&term);
        if !hit {
            return false;
        }
    }

    if let Some(status) = filter.status.as_deref() {
        if status != "all" && inquiry.status.as_str() != status {
            return false;
        }
    }

    true
}

/// Pick the next inquiry id, bumping past any millisecond collision.
fn next_id(existing: &[Inquiry], now_millis: i64) -> InquiryId {
    let taken: HashSet<&str> = existing.iter().map(|inquiry| inquiry.id.as_str()).collect();

    let mut candidate = now_millis;
    loop {
        let id = candidate.to_string();
        if !taken.contains(id.as_str()) {
            return InquiryId::new(id);
        }
        candidate += 1;
    }
}

/// Quote a CSV field, doubling embedded quote characters.
fn csv_field(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Render one inquiry as a CSV row.
fn csv_row(inquiry: &Inquiry) -> String {
    let date = inquiry.date.format("%Y-%m-%d %H:%M:%S UTC").to_string();
    [
        csv_field(&date),
        csv_field(&inquiry.name),
        csv_field(inquiry.email.as_str()),
        csv_field(inquiry.phone.as_deref().unwrap_or("")),
        csv_field(&inquiry.product),
        csv_field(inquiry.status.as_str()),
        csv_field(&inquiry.message),
    ]
    .join(",")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use amberleaf_core::Email;

    use super::super::test_support::scratch_dir;
    use super::*;

    fn input(name: &str, email: &str, product: &str, message: &str) -> NewInquiry {
        NewInquiry {
            name: name.to_owned(),
            email: Email::parse(email).unwrap(),
            phone: None,
            product: product.to_owned(),
            message: message.to_owned(),
        }
    }

    async fn store() -> InquiryStore {
        let store = InquiryStore::new(&scratch_dir());
        store.ensure_initialized().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_append_assigns_id_date_and_pending_status() {
        let store = store().await;

        let stored = store
            .append(input("Alice", "a@x.com", "Turmeric", "Need 5 tons"))
            .await
            .unwrap();

        assert_eq!(stored.status, InquiryStatus::Pending);
        assert!(!stored.id.as_str().is_empty());

        let page = store.list(&InquiryFilter::default()).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.inquiries.first().unwrap(), &stored);
    }

    #[tokio::test]
    async fn test_append_rejects_empty_required_field() {
        let store = store().await;

        let result = store.append(input("", "a@x.com", "Turmeric", "hi")).await;
        assert!(matches!(result, Err(StoreError::Validation(_))));

        // Collection unchanged
        let page = store.list(&InquiryFilter::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_append_ids_are_unique() {
        let store = store().await;

        let mut ids = HashSet::new();
        for i in 0..5 {
            let stored = store
                .append(input("Bob", "b@x.com", "Cardamom", &format!("order {i}")))
                .await
                .unwrap();
            assert!(ids.insert(stored.id.into_inner()));
        }
    }

    #[tokio::test]
    async fn test_list_search_is_case_insensitive() {
        let store = store().await;
        store
            .append(input("Alice", "a@x.com", "Turmeric Powder", "bulk order"))
            .await
            .unwrap();
        store
            .append(input("Bob", "b@x.com", "Cardamom", "sample please"))
            .await
            .unwrap();

        let page = store
            .list(&InquiryFilter {
                search: Some("TURMERIC".to_owned()),
                ..InquiryFilter::default()
            })
            .await
            .unwrap();

        assert_eq!(page.total, 1);
        assert_eq!(page.inquiries.first().unwrap().name, "Alice");
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let store = store().await;
        let first = store
            .append(input("Alice", "a@x.com", "Turmeric", "bulk"))
            .await
            .unwrap();
        store
            .append(input("Bob", "b@x.com", "Cardamom", "sample"))
            .await
            .unwrap();

        store
            .update_status(first.id.as_str(), InquiryStatus::Processed)
            .await
            .unwrap();

        let processed = store
            .list(&InquiryFilter {
                status: Some("processed".to_owned()),
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(processed.total, 1);
        assert_eq!(processed.inquiries.first().unwrap().id, first.id);

        let pending = store
            .list(&InquiryFilter {
                status: Some("pending".to_owned()),
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(pending.total, 1);
        assert_ne!(pending.inquiries.first().unwrap().id, first.id);

        // "all" disables the filter
        let all = store
            .list(&InquiryFilter {
                status: Some("all".to_owned()),
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(all.total, 2);
    }

    #[tokio::test]
    async fn test_list_sorts_newest_first_and_paginates() {
        let store = store().await;
        for i in 0..15 {
            store
                .append(input("Alice", "a@x.com", "Turmeric", &format!("order {i}")))
                .await
                .unwrap();
        }

        let first = store
            .list(&InquiryFilter {
                page: 1,
                limit: 10,
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(first.inquiries.len(), 10);
        assert_eq!(first.total, 15);
        assert_eq!(first.total_pages, 2);
        // Newest first: the last appended inquiry leads the listing
        assert_eq!(first.inquiries.first().unwrap().message, "order 14");

        let second = store
            .list(&InquiryFilter {
                page: 2,
                limit: 10,
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(second.inquiries.len(), 5);
        assert_eq!(second.inquiries.last().unwrap().message, "order 0");

        let beyond = store
            .list(&InquiryFilter {
                page: 3,
                limit: 10,
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert!(beyond.inquiries.is_empty());
        assert_eq!(beyond.total, 15);
        assert_eq!(beyond.total_pages, 2);
    }

    #[tokio::test]
    async fn test_list_empty_collection_has_zero_pages() {
        let store = store().await;
        let page = store
            .list(&InquiryFilter {
                page: 1,
                limit: 10,
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.inquiries.is_empty());
    }

    #[tokio::test]
    async fn test_update_status_unknown_id_is_not_found() {
        let store = store().await;
        store
            .append(input("Alice", "a@x.com", "Turmeric", "bulk"))
            .await
            .unwrap();

        let result = store.update_status("999", InquiryStatus::Processed).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));

        // Nothing mutated
        let page = store
            .list(&InquiryFilter {
                status: Some("processed".to_owned()),
                ..InquiryFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(page.total, 0);
    }

    #[tokio::test]
    async fn test_export_csv_escapes_quotes() {
        let store = store().await;
        store
            .append(input(
                "Alice",
                "a@x.com",
                "Turmeric",
                "Need \"premium\" grade",
            ))
            .await
            .unwrap();

        let csv = store.export_csv().await.unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next().unwrap(), CSV_HEADER);

        let row = lines.next().unwrap();
        assert!(row.contains("\"Alice\""));
        assert!(row.contains("\"a@x.com\""));
        assert!(row.contains("\"pending\""));
        assert!(row.contains("\"Need \"\"premium\"\" grade\""));
        assert!(lines.next().is_none());
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty_collection() {
        // No ensure_initialized: the file does not exist
        let store = InquiryStore::new(&scratch_dir());
        let page = store.list(&InquiryFilter::default()).await.unwrap();
        assert_eq!(page.total, 0);
    }

    #[test]
    fn test_next_id_bumps_past_collisions() {
        let existing = vec![Inquiry {
            id: InquiryId::from_timestamp_millis(1000),
            name: "Alice".to_owned(),
            email: Email::parse("a@x.com").unwrap(),
            phone: None,
            product: "Turmeric".to_owned(),
            message: "bulk".to_owned(),
            date: Utc::now(),
            status: InquiryStatus::Pending,
        }];

        assert_eq!(next_id(&existing, 1000).as_str(), "1001");
        assert_eq!(next_id(&existing, 999).as_str(), "999");
        assert_eq!(next_id(&[], 1000).as_str(), "1000");
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "\"plain\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field(""), "\"\"");
    }
}
