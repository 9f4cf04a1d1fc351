#![warn(missing_docs)]
use crate::helpers::{extract_boundary, parse_multipart_form, MultipartFilePart};
use crate::req::body::FormData;
use crate::{context::HttpResponse, req::HttpRequest, types::FutMiddleware};
use serde::Serialize;
use tokio::fs::{create_dir_all, remove_file, File};
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

/// Configuration for the file upload middleware.
#[derive(Clone)]
pub struct FileUploadConfiguration {
    /// Directory uploaded files are saved to; created automatically if missing.
    pub upload_dir: String,
    /// Maximum size allowed for an individual file, in bytes.
    pub max_file_size: u64,
    /// Maximum number of files allowed per request.
    pub max_files: u64,
    /// Allowed file extensions (without dots). Empty means all types are allowed.
    pub allowed_file_types: Vec<String>,
    /// Whole-request ceiling on bytes read into memory while parsing the multipart body.
    pub max_memory: u64,
    /// Ceiling on bytes written to disk across every file in one request.
    pub max_disk_usage: u64,
}

impl Default for FileUploadConfiguration {
    fn default() -> Self {
        Self {
            upload_dir: "uploads".to_string(),
            max_file_size: 1024 * 1024 * 10,
            max_files: 100,
            allowed_file_types: Vec::new(),
            max_memory: 1024 * 1024 * 50,
            max_disk_usage: 1024 * 1024 * 200,
        }
    }
}

/// A file saved by the [`file_upload`] middleware, handed to the route handler.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedFile {
    /// The multipart field name the file was submitted under.
    pub field_name: String,
    /// The filename the client sent, sanitized of path-traversal characters.
    pub provided_filename: String,
    /// Absolute or relative path the file was written to under `upload_dir`.
    pub stored_path: String,
    /// Size of the file on disk, in bytes.
    pub size: u64,
    /// Content-Type declared by the client for this part, if any.
    pub content_type: Option<String>,
}

/// Why an upload was rejected. Maps to 413 or 415 per the error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileUploadError {
    /// More files were submitted than `max_files` allows.
    TooManyFiles {
        /// The configured `max_files` ceiling that was exceeded.
        limit: u64,
    },
    /// A single file exceeded `max_file_size`.
    FileTooLarge {
        /// The multipart field name the oversized file was submitted under.
        field: String,
        /// The configured `max_file_size` ceiling that was exceeded.
        limit: u64,
    },
    /// Cumulative bytes written to disk for this request exceeded `max_disk_usage`.
    FileQuotaExceeded {
        /// The configured `max_disk_usage` ceiling that was exceeded.
        limit: u64,
    },
    /// The whole multipart body exceeded `max_memory`.
    MemoryLimitExceeded {
        /// The configured `max_memory` ceiling that was exceeded.
        limit: u64,
    },
    /// The file's extension is missing or not on the allow-list.
    FileExtensionNotAllowed {
        /// The extension that was rejected, or empty if none could be determined.
        extension: String,
    },
}

impl FileUploadError {
    /// The status code this error maps to, per the engine's error taxonomy.
    pub fn status_code(&self) -> u16 {
        match self {
            FileUploadError::TooManyFiles { .. }
            | FileUploadError::FileTooLarge { .. }
            | FileUploadError::FileQuotaExceeded { .. }
            | FileUploadError::MemoryLimitExceeded { .. } => 413,
            FileUploadError::FileExtensionNotAllowed { .. } => 415,
        }
    }
}

impl std::fmt::Display for FileUploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FileUploadError::TooManyFiles { limit } => {
                write!(f, "too many files in request (limit {limit})")
            }
            FileUploadError::FileTooLarge { field, limit } => {
                write!(f, "file for field '{field}' exceeds max_file_size ({limit} bytes)")
            }
            FileUploadError::FileQuotaExceeded { limit } => {
                write!(f, "request exceeded max_disk_usage ({limit} bytes)")
            }
            FileUploadError::MemoryLimitExceeded { limit } => {
                write!(f, "request body exceeds max_memory ({limit} bytes)")
            }
            FileUploadError::FileExtensionNotAllowed { extension } => {
                write!(f, "file extension '{extension}' is not allowed")
            }
        }
    }
}

impl std::error::Error for FileUploadError {}

fn error_response(res: HttpResponse, err: &FileUploadError) -> HttpResponse {
    res.status(err.status_code()).text(err.to_string())
}

/// Tracks bytes written to disk across every file in one request, enforcing `max_disk_usage`.
///
/// Created fresh per parse; the middleware discards it once the request's files are
/// written (or once cleanup after a failure releases everything back to zero).
struct UploadQuotaTracker {
    used: u64,
    max: u64,
}

impl UploadQuotaTracker {
    fn new(max: u64) -> Self {
        Self { used: 0, max }
    }

    fn try_admit(&mut self, n: u64) -> Result<(), FileUploadError> {
        if self.used.saturating_add(n) > self.max {
            return Err(FileUploadError::FileQuotaExceeded { limit: self.max });
        }
        self.used += n;
        Ok(())
    }

    fn release(&mut self, n: u64) {
        self.used = self.used.saturating_sub(n);
    }
}

/// Replaces path-traversal and reserved characters in a client-provided filename.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| if "\\/:*?\"<>|".contains(c) { '_' } else { c })
        .collect()
}

fn file_extension(sanitized_name: &str) -> Option<String> {
    sanitized_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

fn normalize_extension(ext: &str) -> String {
    let ext = ext.to_ascii_lowercase();
    if ext == "jpg" {
        "jpeg".to_string()
    } else {
        ext
    }
}

fn extension_allowed(extension: &Option<String>, allow_list: &[String]) -> bool {
    if allow_list.is_empty() {
        return true;
    }
    let Some(extension) = extension else {
        return false;
    };
    let normalized = normalize_extension(extension);
    allow_list.iter().any(|allowed| {
        let allowed = normalize_extension(allowed);
        allowed == normalized
    })
}

/// Writes `bytes` to `path` in fixed-size chunks, checking `max_file_size` and the shared
/// disk quota before each write so an oversized upload is caught mid-stream rather than
/// after the whole file has already hit the disk.
async fn write_file_streamed(
    path: &str,
    bytes: &[u8],
    field: &str,
    max_file_size: u64,
    quota: &mut UploadQuotaTracker,
) -> Result<(), FileUploadError> {
    const CHUNK_SIZE: usize = 64 * 1024;

    if bytes.len() as u64 > max_file_size {
        return Err(FileUploadError::FileTooLarge {
            field: field.to_string(),
            limit: max_file_size,
        });
    }

    let mut written: u64 = 0;
    let mut file = match File::create(path).await {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!(path, error = %e, "file upload: failed to create destination file");
            return Err(FileUploadError::FileQuotaExceeded { limit: quota.max });
        }
    };

    for chunk in bytes.chunks(CHUNK_SIZE) {
        if let Err(e) = quota.try_admit(chunk.len() as u64) {
            drop(file);
            let _ = remove_file(path).await;
            quota.release(written);
            return Err(e);
        }
        if let Err(e) = file.write_all(chunk).await {
            tracing::warn!(path, error = %e, "file upload: write failed mid-stream");
            drop(file);
            let _ = remove_file(path).await;
            quota.release(written + chunk.len() as u64);
            return Err(FileUploadError::FileQuotaExceeded { limit: quota.max });
        }
        written += chunk.len() as u64;
    }

    Ok(())
}

/// Builtin file upload middleware.
///
/// Handles raw binary uploads and `multipart/form-data` bodies, saving each file under a
/// UUID-derived name and recording an [`UploadedFile`] per upload. Files are written in
/// fixed-size chunks, checked against `max_file_size`/`max_disk_usage` as they stream to
/// disk; a failure mid-write deletes the partial file and releases its quota. Uploads that
/// violate a limit or the extension allow-list short-circuit the request with 413/415
/// instead of silently dropping the file.
///
/// ## Example
///
/// ```
/// use routen::{app::App, middlewares::file_upload::{FileUploadConfiguration, file_upload}};
///
/// let mut app = App::new();
/// app.use_middleware("/upload", file_upload(Some(FileUploadConfiguration::default())));
/// ```
pub fn file_upload(
    config: Option<FileUploadConfiguration>,
) -> impl Fn(HttpRequest, HttpResponse) -> FutMiddleware + Send + Sync + Clone + 'static {
    let config = config.unwrap_or_default();
    move |mut req, res| {
        let config = config.clone();
        let upload_path = config.upload_dir.clone();
        Box::pin(async move {
            let content_type = req.headers.get("content-type").unwrap_or("").to_string();
            let is_multipart = content_type.to_lowercase().contains("multipart/form-data");
            let boundary = if is_multipart {
                extract_boundary(&content_type)
            } else {
                None
            };

            let bytes_vec = match req.bytes() {
                Ok(bytes) => bytes.to_vec(),
                Err(_) if !is_multipart => match req.form_data() {
                    Ok(form_data) => {
                        let form_string = form_data_to_string(form_data);
                        if form_string.is_empty() {
                            return (req, None);
                        }
                        form_string.into_bytes()
                    }
                    Err(_) => return (req, None),
                },
                Err(e) => {
                    tracing::warn!(error = %e, "file upload: req.bytes() failed for multipart body");
                    return (req, None);
                }
            };

            if bytes_vec.len() as u64 > config.max_memory {
                let err = FileUploadError::MemoryLimitExceeded { limit: config.max_memory };
                return (req, Some(error_response(res, &err)));
            }

            let (fields, file_parts) = if let Some(ref boundary_str) = boundary {
                parse_multipart_form(&bytes_vec, boundary_str)
            } else {
                (Vec::new(), Vec::new())
            };

            for (k, v) in fields {
                req.insert_form_field(k, v);
            }

            let file_parts: Vec<MultipartFilePart> = if !file_parts.is_empty() {
                file_parts
            } else if boundary.is_some() {
                Vec::new()
            } else {
                vec![MultipartFilePart {
                    field_name: Some("file"),
                    filename: None,
                    content_type: Some(content_type.as_str()),
                    bytes: bytes_vec,
                }]
            };

            if file_parts.len() as u64 > config.max_files {
                let err = FileUploadError::TooManyFiles { limit: config.max_files };
                return (req, Some(error_response(res, &err)));
            }

            if let Err(e) = create_dir_all(&upload_path).await {
                tracing::warn!(dir = %upload_path, error = %e, "file upload: failed to create upload directory");
                return (req, None);
            }

            let mut quota = UploadQuotaTracker::new(config.max_disk_usage);
            let mut uploaded: Vec<UploadedFile> = Vec::new();

            for part in file_parts {
                let field_name = part.field_name.unwrap_or("file").to_string();
                let provided_filename = sanitize_filename(part.filename.unwrap_or("upload.bin"));
                let extension = file_extension(&provided_filename);

                if !extension_allowed(&extension, &config.allowed_file_types) {
                    let err = FileUploadError::FileExtensionNotAllowed {
                        extension: extension.unwrap_or_default(),
                    };
                    cleanup_uploaded(&uploaded).await;
                    return (req, Some(error_response(res, &err)));
                }

                if let Some(sniffed) = infer::get(&part.bytes).map(|info| info.extension()) {
                    let sniffed_norm = normalize_extension(sniffed);
                    if extension.as_deref().map(normalize_extension).as_deref() != Some(sniffed_norm.as_str()) {
                        tracing::warn!(
                            declared = extension.as_deref().unwrap_or(""),
                            sniffed,
                            field = %field_name,
                            "file upload: declared extension does not match sniffed content type"
                        );
                    }
                }

                let id = Uuid::new_v4();
                let filename = format!("upload_{id}_{provided_filename}");
                let filename_with_path = format!("{}/{}", upload_path, filename);

                if let Err(e) = write_file_streamed(
                    &filename_with_path,
                    &part.bytes,
                    &field_name,
                    config.max_file_size,
                    &mut quota,
                )
                .await
                {
                    cleanup_uploaded(&uploaded).await;
                    return (req, Some(error_response(res, &e)));
                }

                req.insert_form_field(&field_name, &filename);
                uploaded.push(UploadedFile {
                    field_name,
                    provided_filename,
                    stored_path: filename_with_path,
                    size: part.bytes.len() as u64,
                    content_type: part.content_type.map(str::to_string),
                });
            }

            if let Some(first) = uploaded.first() {
                let basename = first
                    .stored_path
                    .rsplit('/')
                    .next()
                    .unwrap_or(first.stored_path.as_str());
                req.set_data("uploaded_file", basename);
                req.set_data("uploaded_file_path", first.stored_path.as_str());
            }
            if !uploaded.is_empty() {
                req.set_data("uploaded_file_count", uploaded.len().to_string().as_str());
                if let Ok(json) = serde_json::to_string(&uploaded) {
                    req.set_data("uploaded_files", json.as_str());
                }
            }

            (req, None)
        })
    }
}

/// Deletes every file already written before a later part in the same request failed.
async fn cleanup_uploaded(uploaded: &[UploadedFile]) {
    for file in uploaded.iter().rev() {
        let _ = remove_file(&file.stored_path).await;
    }
}

fn form_data_to_string(form_data: &FormData) -> String {
    if form_data.is_empty() {
        return String::new();
    }

    form_data
        .iter()
        .map(|(key, value)| format!("{}={}", urlencoding::encode(key), urlencoding::encode(value.first())))
        .collect::<Vec<_>>()
        .join("&")
}
