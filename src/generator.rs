use crate::error::Result;
use futures::future::BoxFuture;

/// Anything that can turn a prompt into plan text.
///
/// Implementations report transport and service failures as errors; callers
/// do not retry.
pub trait PlanGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>>;
}

impl<G: PlanGenerator + ?Sized> PlanGenerator for &G {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        (**self).generate(prompt)
    }
}

impl<G: PlanGenerator + ?Sized> PlanGenerator for Box<G> {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String>> {
        (**self).generate(prompt)
    }
}
