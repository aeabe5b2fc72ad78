use std::path::Path;

use serde_json::Value;

/// Writes a raw WTRL payload to `dir/name` for debugging; failures are only logged
pub async fn write_snapshot(dir: &Path, name: &str, body: &Value) {
    let path = dir.join(name);

    let bytes = match serde_json::to_vec_pretty(body) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!("Failed to serialize snapshot {:?}: {}", path, e);
            return;
        }
    };

    if let Err(e) = tokio::fs::create_dir_all(dir).await {
        tracing::warn!("Failed to create snapshot directory {:?}: {}", dir, e);
        return;
    }

    match tokio::fs::write(&path, bytes).await {
        Ok(()) => tracing::debug!("Wrote snapshot {:?}", path),
        Err(e) => tracing::warn!("Failed to write snapshot {:?}: {}", path, e),
    }
}
