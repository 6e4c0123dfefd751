use crate::core::mapper::SelectionPolicy;
use crate::domain::model::{Domain, ExtractResult, RenderSummary, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Relative names of the files directly under the storage root with the given extension, sorted.
    fn list_files(
        &self,
        extension: &str,
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn domains(&self) -> Vec<Domain>;
    fn selection_policy(&self) -> SelectionPolicy;
    fn bundle(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<ExtractResult>;
    async fn transform(&self, data: ExtractResult) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<RenderSummary>;
}
