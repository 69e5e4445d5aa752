use std::path::Path as FsPath;

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use super::AppState;
use crate::error::AppError;

const UPLOAD_FOLDERS: [&str; 3] = ["images", "pdfs", "processed"];
const MAX_FILES: usize = 10;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UploadedFile {
    original_name: String,
    saved_name: String,
    path: String,
    size: usize,
    mimetype: String,
}

#[derive(Debug, Serialize)]
struct UploadEntry {
    name: String,
    path: String,
    size: u64,
    uploaded: DateTime<Utc>,
}

/// PDFs go to their own folder; every accepted image type shares one.
fn folder_for(mimetype: &str) -> Option<&'static str> {
    match mimetype {
        "application/pdf" => Some("pdfs"),
        "image/jpeg" | "image/png" | "image/gif" | "image/webp" => Some("images"),
        _ => None,
    }
}

/// Strip any path components and keep a conservative character set, so the
/// saved name cannot escape the upload folder.
fn sanitize_stem(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let stem: String = base
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
        .collect();
    let stem = stem.trim_matches(|c| c == '.' || c == ' ').to_string();
    if stem.is_empty() {
        "upload".to_string()
    } else {
        stem
    }
}

async fn save_field(
    state: &AppState,
    field: axum::extract::multipart::Field<'_>,
) -> Result<UploadedFile, AppError> {
    let original_name = field.file_name().unwrap_or("upload").to_string();
    let mimetype = field.content_type().unwrap_or_default().to_string();
    let folder = folder_for(&mimetype).ok_or_else(|| {
        AppError::InvalidInput(
            "Invalid file type. Only images (JPEG, PNG, GIF, WebP) and PDFs are allowed."
                .to_string(),
        )
    })?;

    let bytes = field.bytes().await?;
    if bytes.len() > state.config.max_upload_bytes {
        return Err(AppError::InvalidInput(
            "File too large. Maximum size is 10MB.".to_string(),
        ));
    }

    // Keep original filename, add timestamp to avoid conflicts
    let sanitized = sanitize_stem(&original_name);
    let path = FsPath::new(&sanitized);
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("upload");
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e))
        .unwrap_or_default();
    let saved_name = format!("{}-{}{}", stem, Utc::now().timestamp_millis(), ext);

    let target = state
        .store
        .data_dir()
        .join("uploads")
        .join(folder)
        .join(&saved_name);
    let size = bytes.len();
    tokio::fs::write(&target, &bytes).await?;
    log::info!("Stored upload {}", target.display());

    Ok(UploadedFile {
        original_name,
        saved_name: saved_name.clone(),
        path: format!("data/uploads/{}/{}", folder, saved_name),
        size,
        mimetype,
    })
}

pub async fn single(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file = save_field(&state, field).await?;
        return Ok(Json(json!({
            "success": true,
            "message": "File uploaded successfully",
            "file": file,
        })));
    }
    Err(AppError::InvalidInput("No file uploaded".to_string()))
}

pub async fn multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Value>, AppError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("files") {
            continue;
        }
        files.push(save_field(&state, field).await?);
        if files.len() == MAX_FILES {
            break;
        }
    }

    if files.is_empty() {
        return Err(AppError::InvalidInput("No files uploaded".to_string()));
    }

    Ok(Json(json!({
        "success": true,
        "message": format!("{} file(s) uploaded successfully", files.len()),
        "files": files,
    })))
}

async fn list_folder(state: &AppState, folder: &str) -> Result<Vec<UploadEntry>, AppError> {
    let dir = state.store.data_dir().join("uploads").join(folder);
    let mut entries = Vec::new();

    let mut reader = match tokio::fs::read_dir(&dir).await {
        Ok(reader) => reader,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(entries),
        Err(e) => return Err(e.into()),
    };

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }
        let uploaded = metadata
            .modified()
            .map(DateTime::<Utc>::from)
            .unwrap_or_else(|_| Utc::now());
        entries.push(UploadEntry {
            path: format!("data/uploads/{}/{}", folder, name),
            name,
            size: metadata.len(),
            uploaded,
        });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

pub async fn list(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let images = list_folder(&state, "images").await?;
    let pdfs = list_folder(&state, "pdfs").await?;
    Ok(Json(json!({ "images": images, "pdfs": pdfs })))
}

pub async fn remove(
    State(state): State<AppState>,
    Path((folder, filename)): Path<(String, String)>,
) -> Result<Json<Value>, AppError> {
    if !UPLOAD_FOLDERS.contains(&folder.as_str()) {
        return Err(AppError::InvalidInput("Invalid folder".to_string()));
    }
    if filename.contains('/') || filename.contains('\\') || filename == ".." {
        return Err(AppError::InvalidInput("Invalid filename".to_string()));
    }

    let path = state
        .store
        .data_dir()
        .join("uploads")
        .join(&folder)
        .join(&filename);
    match tokio::fs::remove_file(&path).await {
        Ok(()) => Ok(Json(json!({ "success": true, "message": "File deleted" }))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound("File not found".to_string()))
        }
        Err(e) => Err(e.into()),
    }
}
