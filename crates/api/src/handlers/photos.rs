//! Photo upload handler.
//!
//! The file goes to the object store first; a `photos` row is written only
//! after the store accepts it. A failed upload is logged and the visitor is
//! sent back to the cat page as if nothing happened.

use axum::extract::{Multipart, Path, State};
use axum::response::Redirect;
use catcollector_core::error::CoreError;
use catcollector_core::photos::{new_photo_key, public_url, MAX_URL_LENGTH};
use catcollector_core::types::DbId;
use catcollector_db::models::photo::CreatePhoto;
use catcollector_db::repositories::PhotoRepo;

use crate::error::{AppError, AppResult};
use crate::handlers::cats::owned_cat;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Multipart field carrying the image.
pub const PHOTO_FIELD: &str = "photo-file";

struct Upload {
    filename: String,
    content_type: Option<String>,
    data: Vec<u8>,
}

/// POST /cats/{id}/add_photo
pub async fn add_photo(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let cat = owned_cat(&state, id, user.user_id).await?;
    let redirect = Redirect::to(&cat.absolute_url());

    let Some(upload) = read_photo_field(multipart).await? else {
        tracing::debug!(cat_id = cat.id, "No photo submitted");
        return Ok(redirect);
    };

    let storage = &state.config.storage;
    let key = new_photo_key(&storage.key_prefix, &upload.filename);
    let url = public_url(&storage.base_url, &storage.bucket, &key);
    if url.len() > MAX_URL_LENGTH {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Photo URL exceeds {MAX_URL_LENGTH} characters"
        ))));
    }

    let size = upload.data.len();
    match state
        .store
        .put_object(
            &storage.bucket,
            &key,
            upload.data,
            upload.content_type.as_deref(),
        )
        .await
    {
        Ok(()) => {
            let photo = PhotoRepo::create(&state.pool, &CreatePhoto { url, cat_id: cat.id }).await?;
            tracing::info!(cat_id = cat.id, photo_id = photo.id, %key, size, "Photo uploaded");
        }
        Err(e) => {
            tracing::error!(cat_id = cat.id, %key, error = %e, "Photo upload failed");
        }
    }

    Ok(redirect)
}

/// Pull the first non-empty `photo-file` field out of the body.
async fn read_photo_field(mut multipart: Multipart) -> AppResult<Option<Upload>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some(PHOTO_FIELD) {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        if filename.is_empty() && data.is_empty() {
            return Ok(None);
        }
        return Ok(Some(Upload {
            filename,
            content_type,
            data: data.to_vec(),
        }));
    }
    Ok(None)
}
