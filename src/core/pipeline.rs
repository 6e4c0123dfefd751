use crate::core::mapper::{SelectionPolicy, TermMapper};
use crate::core::{
    ConfigProvider, ExtractResult, PatternDocument, Pipeline, RenderSummary, RenderedPattern,
    Storage, TransformResult,
};
use crate::domain::model::Domain;
use crate::utils::error::{MapperError, Result};
use serde::Serialize;
use std::collections::HashSet;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const INDEX_FILE: &str = "index.csv";
pub const BUNDLE_FILE: &str = "renderings.zip";

#[derive(Debug, Serialize)]
struct IndexRow<'a> {
    id: &'a str,
    name: &'a str,
    domain: &'a str,
    file: String,
}

/// Renders every pattern in the input storage into each configured domain.
pub struct RenderPipeline<S: Storage, C: ConfigProvider> {
    input: S,
    output: S,
    config: C,
    mapper: TermMapper,
}

impl<S: Storage, C: ConfigProvider> RenderPipeline<S, C> {
    pub fn new(input: S, output: S, config: C, mapper: TermMapper) -> Self {
        Self {
            input,
            output,
            config,
            mapper,
        }
    }
}

/// Markdown for one pattern in one domain's vocabulary.
pub fn render_pattern(
    document: &PatternDocument,
    template: &str,
    domain: Domain,
    mapper: &TermMapper,
    policy: SelectionPolicy,
) -> RenderedPattern {
    let rendered = mapper.transform_in(template, domain, policy);

    let mut markdown = format!(
        "# {} - {} ({})\n\n## {} Rendering\n\n{}\n\n",
        document.id, document.name, domain, domain, rendered
    );

    // 目錄中已有該領域的原文時一併附上，方便對照
    if let Some(catalog_text) = document.domain_section(domain) {
        markdown.push_str(&format!("## Catalog {} Text\n\n{}\n\n", domain, catalog_text));
    }

    markdown.push_str(&format!(
        "## Original Template\n\n{}\n\n---\n*Rendered from pattern {}*\n",
        template, document.id
    ));

    RenderedPattern {
        id: document.id.clone(),
        name: document.name.clone(),
        domain,
        markdown,
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for RenderPipeline<S, C> {
    async fn extract(&self) -> Result<ExtractResult> {
        let files = self.input.list_files("md").await?;
        tracing::debug!("Found {} markdown files in {}", files.len(), self.config.input_path());

        let mut result = ExtractResult::default();
        let mut seen_ids = HashSet::new();

        for file in files {
            let bytes = self.input.read_file(&file).await?;
            let content = String::from_utf8(bytes).map_err(|e| MapperError::ProcessingError {
                message: format!("{} is not valid UTF-8: {}", file, e),
            })?;

            match PatternDocument::parse(&content) {
                // 同一個 id 只保留第一份，避免輸出檔互相覆蓋
                Some(document) if !seen_ids.insert(document.id.clone()) => {
                    tracing::warn!(
                        "Skipping {}: pattern id {} already read from an earlier file",
                        file,
                        document.id
                    );
                    result.skipped_duplicate += 1;
                }
                Some(document) => result.documents.push(document),
                None => {
                    tracing::warn!("Skipping {}: no '# <id> - <name>' title line", file);
                    result.skipped_untitled += 1;
                }
            }
        }

        Ok(result)
    }

    async fn transform(&self, data: ExtractResult) -> Result<TransformResult> {
        let domains = self.config.domains();
        let policy = self.config.selection_policy();

        let mut result = TransformResult {
            skipped_untitled: data.skipped_untitled,
            skipped_duplicate: data.skipped_duplicate,
            ..TransformResult::default()
        };

        for document in &data.documents {
            let Some(template) = document.template() else {
                tracing::debug!(
                    "Skipped (no Template section): {} - {}",
                    document.id,
                    document.name
                );
                result.skipped_no_template += 1;
                continue;
            };

            for domain in &domains {
                result
                    .rendered
                    .push(render_pattern(document, template, *domain, &self.mapper, policy));
            }
        }

        Ok(result)
    }

    async fn load(&self, result: TransformResult) -> Result<RenderSummary> {
        let mut index = csv::Writer::from_writer(Vec::new());

        for rendered in &result.rendered {
            let path = rendered.relative_path();
            self.output
                .write_file(&path, rendered.markdown.as_bytes())
                .await?;
            index.serialize(IndexRow {
                id: &rendered.id,
                name: &rendered.name,
                domain: rendered.domain.key(),
                file: path,
            })?;
        }

        let index_data = index
            .into_inner()
            .map_err(|e| MapperError::ProcessingError {
                message: format!("Failed to finish index: {}", e),
            })?;
        self.output.write_file(INDEX_FILE, &index_data).await?;

        if self.config.bundle() {
            tracing::debug!("Creating ZIP bundle with {} renderings", result.rendered.len());

            let zip_data = {
                let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

                for rendered in &result.rendered {
                    zip.start_file::<_, ()>(rendered.relative_path(), FileOptions::default())?;
                    zip.write_all(rendered.markdown.as_bytes())?;
                }

                zip.start_file::<_, ()>(INDEX_FILE, FileOptions::default())?;
                zip.write_all(&index_data)?;

                let cursor = zip.finish()?;
                cursor.into_inner()
            };

            tracing::debug!("Writing ZIP bundle ({} bytes) to storage", zip_data.len());
            self.output.write_file(BUNDLE_FILE, &zip_data).await?;
        }

        Ok(RenderSummary {
            rendered: result.rendered.len(),
            skipped_no_template: result.skipped_no_template,
            skipped_untitled: result.skipped_untitled,
            skipped_duplicate: result.skipped_duplicate,
            output_path: self.config.output_path().to_string(),
        })
    }
}
