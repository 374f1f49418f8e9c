use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};
use uuid::Uuid;

use super::{DaoBase, DaoLayerError, DaoResult};
use crate::db::entities::prelude::Video;
use crate::db::entities::video;

#[derive(Clone)]
pub struct VideoDao {
    db: DatabaseConnection,
}

impl DaoBase for VideoDao {
    type Entity = Video;

    fn new(db: &DatabaseConnection) -> Self {
        Self { db: db.clone() }
    }

    fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

impl VideoDao {
    pub async fn find_by_ids(&self, ids: &[Uuid]) -> DaoResult<Vec<video::Model>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Video::find()
            .filter(video::Column::Id.is_in(ids.to_vec()))
            .all(&self.db)
            .await
            .map_err(DaoLayerError::Db)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{FixedOffset, TimeZone};
    use sea_orm::{DatabaseBackend, DbErr, MockDatabase};
    use uuid::Uuid;

    use crate::db::entities::video;

    use super::VideoDao;
    use crate::db::dao::{DaoBase, DaoLayerError};

    fn ts() -> chrono::DateTime<chrono::FixedOffset> {
        FixedOffset::east_opt(0)
            .expect("offset should be valid")
            .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
            .single()
            .expect("timestamp should be valid")
    }

    fn video_model(id: Uuid, owner_id: Uuid, title: &str) -> video::Model {
        let now = ts();
        video::Model {
            id,
            created_at: now,
            updated_at: now,
            title: title.to_string(),
            description: String::new(),
            video_url: "https://media.example.com/clip.mp4".to_string(),
            thumbnail_url: "https://media.example.com/clip.png".to_string(),
            duration_secs: 120,
            views: 0,
            is_published: true,
            owner_id,
        }
    }

    #[tokio::test]
    async fn find_by_ids_short_circuits_on_empty_input() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();
        let dao = VideoDao::new(&db);

        let videos = dao.find_by_ids(&[]).await.expect("lookup should succeed");
        assert!(videos.is_empty());
    }

    #[tokio::test]
    async fn find_by_ids_returns_matching_rows() {
        let owner = Uuid::new_v4();
        let id_a = Uuid::new_v4();
        let id_b = Uuid::new_v4();
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![
                video_model(id_a, owner, "first"),
                video_model(id_b, owner, "second"),
            ]])
            .into_connection();
        let dao = VideoDao::new(&db);

        let videos = dao
            .find_by_ids(&[id_a, id_b])
            .await
            .expect("lookup should succeed");
        assert_eq!(videos.len(), 2);
    }

    #[tokio::test]
    async fn find_by_ids_maps_database_errors() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_errors([DbErr::Custom("query failed".to_string())])
            .into_connection();
        let dao = VideoDao::new(&db);

        let err = dao
            .find_by_ids(&[Uuid::new_v4()])
            .await
            .expect_err("lookup should fail");
        assert!(matches!(err, DaoLayerError::Db(_)));
    }
}
