//! `LlmProvider`: the external language model collaborator (§6). Prompting
//! strategy for any particular LLM is a Non-goal.

use async_trait::async_trait;

use crate::errors::CortexResult;

#[async_trait]
pub trait LlmProvider: Send + Sync {
    async fn reason(&self, query: &str, context: &str) -> CortexResult<String>;
    async fn refine(&self, content: &str) -> CortexResult<String>;
    async fn compress(&self, text: &str, context: &str) -> CortexResult<String>;
    /// Returns a value in `[0.5, 2.0]`, matching `Engram::salience`'s range.
    async fn rate_salience(&self, text: &str) -> CortexResult<f64>;
    async fn expand_query(&self, query: &str) -> CortexResult<Vec<String>>;
    async fn connect_concepts(&self, a: &str, b: &str) -> CortexResult<String>;
}
