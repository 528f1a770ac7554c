//! Type-erased provider handle.
//!
//! [`LlmProvider`] returns `impl Future`, so it cannot be a trait object.
//! The private [`ErasedProvider`] boxes the future instead, and every
//! `LlmProvider` gets it for free.

use std::future::Future;
use std::pin::Pin;

use agentforge_types::llm::{CompletionRequest, CompletionResponse, LlmError};

use super::provider::LlmProvider;

type CompletionFuture<'a> =
    Pin<Box<dyn Future<Output = Result<CompletionResponse, LlmError>> + Send + 'a>>;

trait ErasedProvider: Send + Sync {
    fn erased_name(&self) -> &str;
    fn erased_complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a>;
}

impl<P: LlmProvider> ErasedProvider for P {
    fn erased_name(&self) -> &str {
        self.name()
    }

    fn erased_complete<'a>(&'a self, request: &'a CompletionRequest) -> CompletionFuture<'a> {
        Box::pin(self.complete(request))
    }
}

/// A provider picked at runtime from the caller's settings.
pub struct BoxLlmProvider(Box<dyn ErasedProvider>);

impl BoxLlmProvider {
    pub fn new<P: LlmProvider + 'static>(provider: P) -> Self {
        Self(Box::new(provider))
    }

    pub fn name(&self) -> &str {
        self.0.erased_name()
    }

    pub async fn complete(
        &self,
        request: &CompletionRequest,
    ) -> Result<CompletionResponse, LlmError> {
        self.0.erased_complete(request).await
    }
}
