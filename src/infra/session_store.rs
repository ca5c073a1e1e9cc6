//! Server-side session store on top of the application database.
//!
//! Implements `tower_sessions::SessionStore` over the `sessions` table so that
//! the cookie only carries a signed session id while the claim itself lives
//! next to the users it refers to.

use std::time::Duration;

use async_trait::async_trait;
use sea_orm::{
    sea_query::OnConflict, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
};
use time::OffsetDateTime;
use tower_sessions::{
    session::{Id, Record},
    session_store::{self, ExpiredDeletion, SessionStore},
};

use super::repositories::entities::session::{self, ActiveModel, Entity as SessionEntity};

/// Session store persisting records as JSON blobs.
#[derive(Clone, Debug)]
pub struct DbSessionStore {
    db: DatabaseConnection,
}

impl DbSessionStore {
    /// Create new store instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Periodically delete expired sessions until the task is dropped.
    ///
    /// A failed sweep is logged and the deletion task restarted.
    pub async fn sweep_expired(self, period: Duration) {
        loop {
            if let Err(e) = self.clone().continuously_delete_expired(period).await {
                tracing::error!(error = %e, "Failed to sweep expired sessions");
            }
        }
    }

    async fn id_exists(&self, id: &Id) -> session_store::Result<bool> {
        let row = SessionEntity::find_by_id(id.to_string())
            .one(&self.db)
            .await
            .map_err(backend)?;
        Ok(row.is_some())
    }

    fn to_active_model(record: &Record) -> session_store::Result<ActiveModel> {
        let data = serde_json::to_vec(record)
            .map_err(|e| session_store::Error::Encode(e.to_string()))?;

        Ok(ActiveModel {
            id: Set(record.id.to_string()),
            data: Set(data),
            expiry_date: Set(record.expiry_date.unix_timestamp()),
        })
    }
}

#[async_trait]
impl SessionStore for DbSessionStore {
    async fn create(&self, record: &mut Record) -> session_store::Result<()> {
        while self.id_exists(&record.id).await? {
            record.id = Id::default();
        }

        let model = Self::to_active_model(record)?;
        SessionEntity::insert(model)
            .exec_without_returning(&self.db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn save(&self, record: &Record) -> session_store::Result<()> {
        let model = Self::to_active_model(record)?;
        SessionEntity::insert(model)
            .on_conflict(
                OnConflict::column(session::Column::Id)
                    .update_columns([session::Column::Data, session::Column::ExpiryDate])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await
            .map_err(backend)?;
        Ok(())
    }

    async fn load(&self, id: &Id) -> session_store::Result<Option<Record>> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let row = SessionEntity::find_by_id(id.to_string())
            .filter(session::Column::ExpiryDate.gt(now))
            .one(&self.db)
            .await
            .map_err(backend)?;

        row.map(|row| {
            serde_json::from_slice(&row.data)
                .map_err(|e| session_store::Error::Decode(e.to_string()))
        })
        .transpose()
    }

    async fn delete(&self, id: &Id) -> session_store::Result<()> {
        SessionEntity::delete_by_id(id.to_string())
            .exec(&self.db)
            .await
            .map_err(backend)?;
        Ok(())
    }
}

#[async_trait]
impl ExpiredDeletion for DbSessionStore {
    async fn delete_expired(&self) -> session_store::Result<()> {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        let result = SessionEntity::delete_many()
            .filter(session::Column::ExpiryDate.lte(now))
            .exec(&self.db)
            .await
            .map_err(backend)?;

        if result.rows_affected > 0 {
            tracing::info!(count = result.rows_affected, "Deleted expired sessions");
        }
        Ok(())
    }
}

fn backend(err: DbErr) -> session_store::Error {
    session_store::Error::Backend(err.to_string())
}
