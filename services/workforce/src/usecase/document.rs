use chrono::{Days, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};

use crate::domain::document::Document;
use crate::domain::is_http_url;
use crate::domain::repository::{DocumentRepository, StaffRepository};
use crate::error::WorkforceServiceError;

pub struct CreateDocumentInput {
    pub owner_id: Uuid,
    pub title: String,
    pub document_type: String,
    pub file_url: String,
    pub expires_on: Option<NaiveDate>,
}

pub struct CreateDocumentUseCase<D: DocumentRepository, S: StaffRepository> {
    pub documents: D,
    pub staff: S,
}

impl<D: DocumentRepository, S: StaffRepository> CreateDocumentUseCase<D, S> {
    pub async fn execute(
        &self,
        input: CreateDocumentInput,
        uploaded_by: Uuid,
    ) -> Result<Document, WorkforceServiceError> {
        let title = input.title.trim();
        let document_type = input.document_type.trim();
        if title.is_empty() || document_type.is_empty() {
            return Err(WorkforceServiceError::InvalidInput(
                "title and document type are required",
            ));
        }
        if !is_http_url(&input.file_url) {
            return Err(WorkforceServiceError::InvalidInput(
                "file url must be http(s)",
            ));
        }
        if self.staff.find(input.owner_id).await?.is_none() {
            return Err(WorkforceServiceError::UserNotFound);
        }
        let document = Document {
            id: Uuid::now_v7(),
            owner_id: input.owner_id,
            title: title.to_owned(),
            document_type: document_type.to_owned(),
            file_url: input.file_url,
            expires_on: input.expires_on,
            uploaded_by,
            created_at: Utc::now(),
        };
        self.documents.create(&document).await?;
        info!(document_id = %document.id, owner_id = %document.owner_id, "document recorded");
        Ok(document)
    }
}

pub struct ListDocumentsUseCase<D: DocumentRepository> {
    pub documents: D,
}

impl<D: DocumentRepository> ListDocumentsUseCase<D> {
    pub async fn execute(
        &self,
        owner_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Document>, WorkforceServiceError> {
        self.documents.list(owner_id, page).await
    }
}

/// Expired documents and those expiring within `within_days` (default: the
/// configured warning window).
pub struct ListExpiringDocumentsUseCase<D: DocumentRepository> {
    pub documents: D,
    pub warning_days: u32,
}

impl<D: DocumentRepository> ListExpiringDocumentsUseCase<D> {
    pub async fn execute(
        &self,
        within_days: Option<u32>,
        today: NaiveDate,
    ) -> Result<Vec<Document>, WorkforceServiceError> {
        let window = within_days.unwrap_or(self.warning_days);
        let until = today
            .checked_add_days(Days::new(u64::from(window)))
            .ok_or(WorkforceServiceError::InvalidInput("within-days is out of range"))?;
        self.documents.list_expiring(until).await
    }
}

pub struct DeleteDocumentUseCase<D: DocumentRepository> {
    pub documents: D,
}

impl<D: DocumentRepository> DeleteDocumentUseCase<D> {
    pub async fn execute(&self, id: Uuid, deleted_by: Uuid) -> Result<(), WorkforceServiceError> {
        if !self.documents.delete(id).await? {
            return Err(WorkforceServiceError::DocumentNotFound);
        }
        info!(document_id = %id, deleted_by = %deleted_by, "document deleted");
        Ok(())
    }
}
