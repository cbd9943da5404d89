//! Batch insertion for the Lanai Trie.
//!
//! Words are processed in chunks, with progress reported after each chunk.
//! Large batches may be handed to the tokio blocking pool: a worker builds a
//! scratch trie for its chunk and hands back the distinct words, which are
//! merged into the primary trie through ordinary [`LanaiTrie::insert`] calls.
//! Any worker failure or timeout falls back to inserting that chunk inline, so
//! the final trie is always the one sequential inserts would have produced.
//!
//! The timeout is enforced by the worker itself against a deadline taken when
//! the chunk is handed off. This keeps delegation independent of the caller's
//! timer driver, so runtimes built without `enable_time` work too.
//!
//! Batches are not atomic. Chunks merged before a failure stay committed.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::stream::{self, StreamExt};
use serde::Serialize;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::{LanaiTrie, LanaiTrieError, LanaiTrieResult};
use crate::config::{self, bulk::BulkConfig};

/// Words a worker inserts between deadline checks.
const DEADLINE_CHECK_INTERVAL: usize = 1024;

/// Receives progress notifications while a batch is inserted.
///
/// Any `Fn(processed, total, percentage)` closure is an observer.
#[cfg_attr(test, mockall::automock)]
pub trait ProgressObserver: Send + Sync {
    /// Called once after each chunk has been committed to the trie.
    fn on_progress(&self, processed: usize, total: usize, percentage: f64);
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize, f64) + Send + Sync,
{
    fn on_progress(&self, processed: usize, total: usize, percentage: f64) {
        self(processed, total, percentage)
    }
}

/// Options for batch insertion.
#[derive(Clone)]
pub struct BulkInsertOptions {
    use_worker: bool,
    chunk_size: usize,
    worker_threshold: usize,
    worker_timeout: Duration,
    max_workers: usize,
    max_batch_words: Option<usize>,
    on_progress: Option<Arc<dyn ProgressObserver>>,
}

impl BulkInsertOptions {
    /// Create options from the `[bulk]` section of the global configuration.
    ///
    /// Without an installed global configuration the defaults apply:
    /// - use_worker: false
    /// - chunk_size: 100,000
    /// - worker_threshold: 100,000
    /// - worker_timeout: 30 seconds
    /// - max_workers: number of CPUs
    /// - max_batch_words: None (unbounded)
    pub fn new() -> Self {
        Self::from_config(&config::get_global_config().get().bulk)
    }

    /// Build options from the `[bulk]` configuration section.
    pub fn from_config(config: &BulkConfig) -> Self {
        Self {
            use_worker: config.use_worker,
            chunk_size: config.chunk_size,
            worker_threshold: config.worker_threshold,
            worker_timeout: Duration::from_millis(config.worker_timeout_ms),
            max_workers: config.max_workers,
            max_batch_words: config.max_batch_words,
            on_progress: None,
        }
    }

    /// Force chunks onto background workers regardless of batch size.
    pub fn with_worker(mut self, use_worker: bool) -> Self {
        self.use_worker = use_worker;
        self
    }

    /// Set how many words make up one chunk.
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Batches larger than this are delegated even without [`Self::with_worker`].
    pub fn with_worker_threshold(mut self, threshold: usize) -> Self {
        self.worker_threshold = threshold;
        self
    }

    /// Set how long to wait for one worker before falling back.
    pub fn with_worker_timeout(mut self, timeout: Duration) -> Self {
        self.worker_timeout = timeout;
        self
    }

    /// Set how many chunks may be in flight at once.
    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers;
        self
    }

    /// Reject batches with more than `limit` words.
    pub fn with_max_batch_words(mut self, limit: usize) -> Self {
        self.max_batch_words = Some(limit);
        self
    }

    /// Register a progress observer.
    pub fn with_progress<P>(mut self, observer: P) -> Self
    where
        P: ProgressObserver + 'static,
    {
        self.on_progress = Some(Arc::new(observer));
        self
    }

    /// Get the chunk size
    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Get the worker timeout
    pub fn worker_timeout(&self) -> Duration {
        self.worker_timeout
    }

    /// Get the batch size limit, if any
    pub fn max_batch_words(&self) -> Option<usize> {
        self.max_batch_words
    }

    fn validate(&self, total: usize) -> LanaiTrieResult<()> {
        if self.chunk_size == 0 {
            return Err(LanaiTrieError::InvalidOptions(
                "chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.max_workers == 0 {
            return Err(LanaiTrieError::InvalidOptions(
                "max_workers must be greater than 0".to_string(),
            ));
        }
        match self.max_batch_words {
            Some(limit) if total > limit => {
                Err(LanaiTrieError::BatchTooLarge { size: total, limit })
            }
            _ => Ok(()),
        }
    }

    fn should_delegate(&self, total: usize) -> bool {
        self.use_worker || total > self.worker_threshold
    }
}

impl Default for BulkInsertOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BulkInsertOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BulkInsertOptions")
            .field("use_worker", &self.use_worker)
            .field("chunk_size", &self.chunk_size)
            .field("worker_threshold", &self.worker_threshold)
            .field("worker_timeout", &self.worker_timeout)
            .field("max_workers", &self.max_workers)
            .field("max_batch_words", &self.max_batch_words)
            .field("on_progress", &self.on_progress.is_some())
            .finish()
    }
}

/// What a completed batch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkInsertSummary {
    /// Items consumed from the batch, including skipped ones.
    pub processed: usize,
    /// Empty strings that were skipped.
    pub skipped: usize,
    /// Size of the batch.
    pub total: usize,
    /// Chunks whose words came back from a background worker.
    pub delegated_chunks: usize,
    /// Chunks inserted inline after a worker could not be used.
    pub fallback_chunks: usize,
}

/// Accumulates the summary and forwards progress to the observer.
struct Tracker<'a> {
    summary: BulkInsertSummary,
    observer: Option<&'a dyn ProgressObserver>,
}

impl<'a> Tracker<'a> {
    fn new(total: usize, options: &'a BulkInsertOptions) -> Self {
        Self {
            summary: BulkInsertSummary {
                total,
                ..BulkInsertSummary::default()
            },
            observer: options.on_progress.as_deref(),
        }
    }

    fn chunk_done(&mut self, len: usize, skipped: usize) {
        self.summary.processed += len;
        self.summary.skipped += skipped;

        if let Some(observer) = self.observer {
            let BulkInsertSummary { processed, total, .. } = self.summary;
            observer.on_progress(processed, total, percentage(processed, total));
        }
    }

    /// Reports completion of a batch that had no chunks at all.
    fn finish(self) -> BulkInsertSummary {
        if self.summary.total == 0 {
            if let Some(observer) = self.observer {
                observer.on_progress(0, 0, percentage(0, 0));
            }
        }
        self.summary
    }
}

fn percentage(processed: usize, total: usize) -> f64 {
    if total == 0 {
        100.0
    } else {
        processed as f64 / total as f64 * 100.0
    }
}

impl LanaiTrie {
    /// Inserts every word of a batch synchronously, in chunks.
    ///
    /// Empty strings are skipped. The observer, if any, is called after each
    /// chunk.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkInsertSummary)` - What was processed.
    /// * `Err(LanaiTrieError)` - If the options are invalid or the batch is over the limit.
    pub fn insert_all<I, S>(
        &mut self,
        words: I,
        options: &BulkInsertOptions,
    ) -> LanaiTrieResult<BulkInsertSummary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words: Vec<S> = words.into_iter().collect();
        options.validate(words.len())?;

        let mut tracker = Tracker::new(words.len(), options);
        for chunk in words.chunks(options.chunk_size) {
            let skipped = self.insert_chunk(chunk);
            tracker.chunk_done(chunk.len(), skipped);
        }
        Ok(tracker.finish())
    }

    /// Inserts every word of a batch, delegating chunks to background
    /// workers when the options call for it.
    ///
    /// The resulting trie is identical to the one [`Self::insert_all`] would
    /// produce. Without a tokio runtime every chunk is inserted inline.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkInsertSummary)` - What was processed and how.
    /// * `Err(LanaiTrieError)` - If the options are invalid or the batch is over the limit.
    pub async fn insert_batch<I, S>(
        &mut self,
        words: I,
        options: &BulkInsertOptions,
    ) -> LanaiTrieResult<BulkInsertSummary>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        let total = words.len();
        options.validate(total)?;

        if !options.should_delegate(total) {
            debug!(total, "inserting batch inline");
            return self.insert_all(words, options);
        }

        let chunks = split_chunks(words, options.chunk_size);
        let mut tracker = Tracker::new(total, options);

        let handle = match Handle::try_current() {
            Ok(handle) => handle,
            Err(e) => {
                warn!(error = %e, "no tokio runtime available, inserting batch inline");
                for chunk in &chunks {
                    let skipped = self.insert_chunk(chunk.as_slice());
                    tracker.summary.fallback_chunks += 1;
                    tracker.chunk_done(chunk.len(), skipped);
                }
                return Ok(tracker.finish());
            }
        };

        debug!(
            total,
            chunks = chunks.len(),
            max_workers = options.max_workers,
            "delegating batch to background workers"
        );

        let timeout = options.worker_timeout;
        let mut outcomes = stream::iter(chunks.into_iter().map(|chunk| {
            let handle = handle.clone();
            async move {
                let outcome = delegate(&handle, Arc::clone(&chunk), timeout).await;
                (chunk, outcome)
            }
        }))
        .buffered(options.max_workers);

        while let Some((chunk, outcome)) = outcomes.next().await {
            let skipped = chunk.iter().filter(|word| word.is_empty()).count();
            match outcome {
                Ok(words) => {
                    for word in &words {
                        self.insert(word);
                    }
                    tracker.summary.delegated_chunks += 1;
                }
                Err(e) => {
                    warn!(
                        error = %e,
                        chunk_len = chunk.len(),
                        "worker failed, inserting chunk inline"
                    );
                    self.insert_chunk(chunk.as_slice());
                    tracker.summary.fallback_chunks += 1;
                }
            }
            tracker.chunk_done(chunk.len(), skipped);
        }

        Ok(tracker.finish())
    }

    /// Inserts the non-empty words of `chunk` and returns how many were skipped.
    fn insert_chunk<S: AsRef<str>>(&mut self, chunk: &[S]) -> usize {
        let mut skipped = 0;
        for word in chunk {
            let word = word.as_ref();
            if word.is_empty() {
                skipped += 1;
            } else {
                self.insert(word);
            }
        }
        skipped
    }
}

fn split_chunks(words: Vec<String>, chunk_size: usize) -> Vec<Arc<Vec<String>>> {
    let mut chunks = Vec::with_capacity(words.len().div_ceil(chunk_size));
    let mut words = words.into_iter();
    loop {
        let chunk: Vec<String> = words.by_ref().take(chunk_size).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(Arc::new(chunk));
    }
    chunks
}

/// Runs the ordinary insert algorithm for one chunk on the blocking pool.
async fn delegate(
    handle: &Handle,
    chunk: Arc<Vec<String>>,
    timeout: Duration,
) -> LanaiTrieResult<Vec<String>> {
    // A timeout too large to represent as an instant means no deadline
    let deadline = Instant::now().checked_add(timeout);
    let task = handle.spawn_blocking(move || build_scratch(chunk.as_slice(), deadline, timeout));
    join_worker(task).await
}

/// Builds a scratch trie for `chunk`, giving up once `deadline` has passed.
fn build_scratch(
    chunk: &[String],
    deadline: Option<Instant>,
    timeout: Duration,
) -> LanaiTrieResult<Vec<String>> {
    let mut scratch = LanaiTrie::new();
    for (i, word) in chunk.iter().enumerate() {
        if i % DEADLINE_CHECK_INTERVAL == 0 && deadline.is_some_and(|d| Instant::now() >= d) {
            return Err(LanaiTrieError::WorkerTimeout(timeout));
        }
        if !word.is_empty() {
            scratch.insert(word);
        }
    }
    Ok(scratch.list_words())
}

async fn join_worker(
    task: JoinHandle<LanaiTrieResult<Vec<String>>>,
) -> LanaiTrieResult<Vec<String>> {
    task.await
        .map_err(|join_error| LanaiTrieError::WorkerFailed(join_error.to_string()))?
}
