//! OpenAPI command - Writes the API document as pretty JSON.

use utoipa::OpenApi;

use crate::api::ApiDoc;
use crate::cli::args::OpenapiArgs;
use crate::errors::{AppError, AppResult};

/// Execute the openapi command
pub async fn execute(args: OpenapiArgs) -> AppResult<()> {
    let document = render()?;

    match args.output {
        Some(path) => {
            tokio::fs::write(&path, document)
                .await
                .map_err(|e| AppError::internal(format!("Failed to write {}: {}", path.display(), e)))?;
            tracing::info!("OpenAPI document written to {}", path.display());
        }
        None => println!("{}", document),
    }

    Ok(())
}

/// Render the OpenAPI document.
pub fn render() -> AppResult<String> {
    ApiDoc::openapi()
        .to_pretty_json()
        .map_err(|e| AppError::internal(format!("Failed to serialize OpenAPI document: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_is_valid_json() {
        let document = render().unwrap();
        let value: serde_json::Value = serde_json::from_str(&document).unwrap();

        assert_eq!(value["info"]["title"], "Inventory API");
        assert!(value["paths"]["/api/products/{id}"].is_object());
    }
}
