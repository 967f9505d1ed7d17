//! Endpoint configuration files

use std::path::Path;

use crate::agents::providers::EndpointsConfig;

/// Load an endpoint configuration map from a JSON, YAML or TOML file.
///
/// The format is picked from the extension; key order is preserved.
pub async fn load_endpoints_file(path: impl AsRef<Path>) -> Result<EndpointsConfig, anyhow::Error> {
    let path = path.as_ref();
    let content = tokio::fs::read_to_string(path).await?;

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let endpoints: EndpointsConfig = match extension.as_str() {
        "json" => serde_json::from_str(&content)?,
        "yaml" | "yml" => serde_yaml::from_str(&content)?,
        "toml" => toml::from_str(&content)?,
        other => anyhow::bail!("Unsupported endpoints file format: '{}'", other),
    };

    tracing::debug!(path = %path.display(), count = endpoints.len(), "Loaded endpoints");
    Ok(endpoints)
}
