//! Media queries.

use chirp_common::AppResult;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};

use super::db_err;
use crate::entities::{Media, media};

/// Insert a media row and return it.
pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    file_name: &str,
    link: &str,
    uploader_id: i32,
) -> AppResult<media::Model> {
    let model = media::ActiveModel {
        file_name: Set(file_name.to_owned()),
        link: Set(link.to_owned()),
        uploader_id: Set(uploader_id),
        ..Default::default()
    };
    Media::insert(model)
        .exec_with_returning(conn)
        .await
        .map_err(db_err)
}

/// Resolve media IDs to their stored links.
///
/// Unknown IDs are silently skipped; the returned links keep the request
/// order of the IDs that did resolve.
pub async fn links_by_ids<C: ConnectionTrait>(conn: &C, ids: &[i32]) -> AppResult<Vec<String>> {
    let mut links = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(media) = Media::find_by_id(*id).one(conn).await.map_err(db_err)? {
            links.push(media.link);
        }
    }
    Ok(links)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn test_media(id: i32, file_name: &str) -> media::Model {
        media::Model {
            id,
            file_name: file_name.to_string(),
            link: format!("http://localhost:8000/api/images/{file_name}"),
            uploader_id: 1,
        }
    }

    #[tokio::test]
    async fn test_links_by_ids_skips_missing_and_keeps_order() {
        let first = test_media(1, "a.png");
        let third = test_media(3, "c.png");

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([[first.clone()]])
            .append_query_results([Vec::<media::Model>::new()])
            .append_query_results([[third.clone()]])
            .into_connection();

        let links = links_by_ids(&db, &[1, 2, 3]).await.unwrap();

        assert_eq!(links, vec![first.link, third.link]);
    }

    #[tokio::test]
    async fn test_links_by_ids_empty() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let links = links_by_ids(&db, &[]).await.unwrap();

        assert!(links.is_empty());
    }
}
