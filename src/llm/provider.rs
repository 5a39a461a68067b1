use async_trait::async_trait;

use crate::error::Result;
use crate::models::Classification;

#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, readme: &str, description: &str) -> Result<Classification>;
    fn name(&self) -> &str;
}
