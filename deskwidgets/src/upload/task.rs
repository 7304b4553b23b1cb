use gateway_lib::{GatewayClient, UploadError, UploadFile, UploadOptions};
use log::{error, info};

use super::ProgressIndicator;

/// Upload `file` and reflect the outcome on `progress`.
///
/// The gateway call reports no intermediate progress, so the indicator goes
/// from its current value straight to completion. A failure shows the error
/// message and is also returned for the caller to handle.
pub async fn upload_with_progress(
    client: &GatewayClient,
    file: &UploadFile,
    options: &UploadOptions,
    progress: &ProgressIndicator,
) -> Result<serde_json::Value, UploadError> {
    let result = client.upload_file(file, options).await;
    match &result {
        Ok(_) => {
            info!("uploaded {}", file.name);
            progress.complete(true, None);
        }
        Err(e) => {
            error!("upload of {} failed: {e}", file.name);
            progress.complete(false, Some(&e.to_string()));
        }
    }
    result
}
