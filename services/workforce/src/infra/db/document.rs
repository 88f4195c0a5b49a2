use anyhow::Context as _;
use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use guardpost_domain::pagination::{Page, PageRequest};
use guardpost_workforce_schema::documents;

use crate::domain::document::Document;
use crate::domain::repository::DocumentRepository;
use crate::error::WorkforceServiceError;

#[derive(Clone)]
pub struct DbDocumentRepository {
    pub db: DatabaseConnection,
}

impl DocumentRepository for DbDocumentRepository {
    async fn create(&self, document: &Document) -> Result<(), WorkforceServiceError> {
        documents::ActiveModel {
            id: Set(document.id),
            owner_id: Set(document.owner_id),
            title: Set(document.title.clone()),
            document_type: Set(document.document_type.clone()),
            file_url: Set(document.file_url.clone()),
            expires_on: Set(document.expires_on),
            uploaded_by: Set(document.uploaded_by),
            created_at: Set(document.created_at),
        }
        .insert(&self.db)
        .await
        .context("create document")?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Document>, WorkforceServiceError> {
        let model = documents::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find document by id")?;
        Ok(model.map(document_from_model))
    }

    async fn list(
        &self,
        owner_id: Option<Uuid>,
        page: PageRequest,
    ) -> Result<Page<Document>, WorkforceServiceError> {
        let mut query = documents::Entity::find();
        if let Some(owner_id) = owner_id {
            query = query.filter(documents::Column::OwnerId.eq(owner_id));
        }
        let total = query
            .clone()
            .count(&self.db)
            .await
            .context("count documents")?;
        let models = query
            .order_by_desc(documents::Column::CreatedAt)
            .offset(page.offset())
            .limit(page.limit())
            .all(&self.db)
            .await
            .context("list documents")?;
        Ok(Page::new(
            models.into_iter().map(document_from_model).collect(),
            page,
            total,
        ))
    }

    async fn list_expiring(&self, until: NaiveDate) -> Result<Vec<Document>, WorkforceServiceError> {
        let models = documents::Entity::find()
            .filter(documents::Column::ExpiresOn.is_not_null())
            .filter(documents::Column::ExpiresOn.lte(until))
            .order_by_asc(documents::Column::ExpiresOn)
            .all(&self.db)
            .await
            .context("list expiring documents")?;
        Ok(models.into_iter().map(document_from_model).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<bool, WorkforceServiceError> {
        let result = documents::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete document")?;
        Ok(result.rows_affected > 0)
    }
}

fn document_from_model(model: documents::Model) -> Document {
    Document {
        id: model.id,
        owner_id: model.owner_id,
        title: model.title,
        document_type: model.document_type,
        file_url: model.file_url,
        expires_on: model.expires_on,
        uploaded_by: model.uploaded_by,
        created_at: model.created_at,
    }
}
