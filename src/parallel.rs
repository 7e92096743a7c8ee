use std::future::Future;
use std::sync::Arc;

use log::warn;
use tokio::sync::Semaphore;

use crate::error::PortfolioError;

/// Fans independent async tasks out with a concurrency limit and settles
/// every task, successful or not.
///
/// This is the shared shape for "run per-item work, tolerate per-item
/// failure": callers decide whether to inspect individual errors
/// ([`FanOut::settle`]) or keep only the fulfilled results
/// ([`FanOut::collect_successes`]).
pub struct FanOut {
    semaphore: Arc<Semaphore>,
}

impl FanOut {
    /// Creates a fan-out helper with the specified concurrency limit
    pub fn new(max_concurrent: usize) -> Self {
        Self {
            semaphore: Arc::new(Semaphore::new(max_concurrent.max(1))),
        }
    }

    /// Runs all tasks concurrently and returns their results in input
    /// order. A panicked task settles as an error; it never poisons the
    /// batch.
    pub async fn settle<F, T>(&self, tasks: Vec<F>) -> Vec<Result<T, PortfolioError>>
    where
        F: Future<Output = Result<T, PortfolioError>> + Send + 'static,
        T: Send + 'static,
    {
        let mut handles = Vec::with_capacity(tasks.len());

        for task in tasks {
            let permit = self
                .semaphore
                .clone()
                .acquire_owned()
                .await
                .expect("fan-out semaphore is never closed");
            handles.push(tokio::spawn(async move {
                let result = task.await;
                drop(permit);
                result
            }));
        }

        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(match handle.await {
                Ok(result) => result,
                Err(join_error) => Err(PortfolioError::Enrichment(format!(
                    "task panicked: {}",
                    join_error
                ))),
            });
        }
        results
    }

    /// Runs all tasks and keeps only the successful results, logging each
    /// dropped failure under the given label.
    pub async fn collect_successes<F, T>(&self, label: &str, tasks: Vec<F>) -> Vec<T>
    where
        F: Future<Output = Result<T, PortfolioError>> + Send + 'static,
        T: Send + 'static,
    {
        self.settle(tasks)
            .await
            .into_iter()
            .filter_map(|result| match result {
                Ok(value) => Some(value),
                Err(error) => {
                    warn!("{}: dropping failed item: {}", label, error);
                    None
                }
            })
            .collect()
    }
}
