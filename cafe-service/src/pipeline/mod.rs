use std::{pin::Pin, sync::Arc, time::SystemTime};

use futures::{Stream, StreamExt};

use crate::error::ServiceError;

#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub payload: T,
    /// 1-based line in the uploaded file the payload came from.
    pub line: u64,
    pub received_at: SystemTime,
}

impl<T> Envelope<T> {
    pub fn new(payload: T, line: u64) -> Self {
        Self {
            payload,
            line,
            received_at: SystemTime::now(),
        }
    }
}

pub type EnvelopeStream<T> = Pin<Box<dyn Stream<Item = Result<Envelope<T>, ServiceError>> + Send>>;

#[async_trait::async_trait]
pub trait Source<T>: Send + Sync {
    async fn stream(&self) -> EnvelopeStream<T>;
}

#[async_trait::async_trait]
pub trait Transform<I, O>: Send + Sync {
    async fn apply(&self, input: Envelope<I>) -> Result<Envelope<O>, ServiceError>;
}

/// Terminal stage. A sink sees every item, errors included, and decides
/// what the run produces.
#[async_trait::async_trait]
pub trait Sink<T>: Send + Sync {
    type Output: Send;

    async fn run<S>(&self, input: S) -> Result<Self::Output, ServiceError>
    where
        S: Stream<Item = Result<Envelope<T>, ServiceError>> + Send + Unpin + 'static;
}

pub struct Pipeline<S, T, K> {
    pub source: S,
    pub transforms: Vec<Arc<dyn Transform<T, T> + Send + Sync>>, // same-type transforms chain
    pub sink: K,
}

impl<T, S, K> Pipeline<S, T, K>
where
    T: Send + 'static,
    S: Source<T> + Send + Sync + 'static,
    K: Sink<T> + Send + Sync + 'static,
{
    pub async fn run(self) -> Result<K::Output, ServiceError> {
        let mut stream = self.source.stream().await;

        for t in self.transforms {
            let t_arc = t.clone();
            stream = Box::pin(stream.then(move |item| {
                let t_inner = t_arc.clone();
                async move {
                    match item {
                        Ok(env) => t_inner.apply(env).await,
                        Err(e) => Err(e),
                    }
                }
            }));
        }

        self.sink.run(stream).await
    }
}
