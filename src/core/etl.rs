use crate::core::{Pipeline, RenderSummary};
use crate::utils::error::Result;

pub struct RenderEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> RenderEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RenderSummary> {
        tracing::info!("Starting render process...");

        // Extract
        tracing::info!("Reading pattern documents...");
        let documents = self.pipeline.extract().await?;
        tracing::info!("Parsed {} pattern documents", documents.documents.len());

        // Transform
        tracing::info!("Rendering templates...");
        let rendered = self.pipeline.transform(documents).await?;
        tracing::info!(
            "Rendered {} patterns ({} without a Template section)",
            rendered.rendered.len(),
            rendered.skipped_no_template
        );

        // Load
        tracing::info!("Writing renderings...");
        let summary = self.pipeline.load(rendered).await?;
        tracing::info!("Output saved to: {}", summary.output_path);

        Ok(summary)
    }
}
