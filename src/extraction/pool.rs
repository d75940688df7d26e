//! Bounded worker pool with per-file fault isolation.
//!
//! Every discovered file becomes one task on the rayon pool. Tasks run
//! behind a `catch_unwind` boundary so a panicking extractor fails only its
//! own file, and everything a task reports back crosses the boundary as
//! plain data over a channel, in completion order.
//!
//! The join is all-or-nothing: the orchestrator blocks once on the whole
//! batch, and the first per-file failure fails the run, discarding the
//! results other files already produced. There is no mid-run cancellation;
//! submitted tasks run to completion either way.

use std::fs;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::sync::{Condvar, Mutex};
use std::thread;

use crate::error::ExtractError;
use crate::extraction::extractor::Extract;
use crate::extraction::keys::{ExtractedKey, ExtractionResult};

/// Ceiling on concurrent extractions when no explicit limit is given.
/// Bounds memory and file-descriptor use on very wide machines.
const MAX_WORKERS: usize = 16;

fn default_worker_limit() -> usize {
    thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .min(MAX_WORKERS)
}

/// Concurrency-slot counter: acquired before each submission, released when
/// the task settles. The only shared resource in the pipeline.
struct Slots {
    available: Mutex<usize>,
    freed: Condvar,
}

impl Slots {
    fn new(count: usize) -> Self {
        Self {
            available: Mutex::new(count),
            freed: Condvar::new(),
        }
    }

    fn acquire(&self) {
        let mut available = self
            .available
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        while *available == 0 {
            available = self
                .freed
                .wait(available)
                .unwrap_or_else(|poisoned| poisoned.into_inner());
        }
        *available -= 1;
    }

    fn release(&self) {
        let mut available = self
            .available
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *available += 1;
        self.freed.notify_one();
    }
}

/// Run the extractor against every file, at most `limit` at a time.
///
/// Returns per-file results in completion order, which is unconstrained
/// across files; callers that care about collision semantics fold the
/// returned order as-is. On the first per-file failure the whole batch is
/// reported failed and completed results are dropped.
pub fn run_batch<E>(
    files: &[PathBuf],
    extractor: &E,
    limit: Option<usize>,
) -> Result<Vec<ExtractionResult>, ExtractError>
where
    E: Extract + Sync,
{
    let slots = Slots::new(limit.unwrap_or_else(default_worker_limit).max(1));
    let (tx, rx) = mpsc::channel();

    rayon::scope(|scope| {
        for file in files {
            slots.acquire();
            let tx = tx.clone();
            let slots = &slots;
            scope.spawn(move |_| {
                let outcome = run_one(file, extractor);
                slots.release();
                // The receiver outlives the scope; a send failure would mean
                // the orchestrator is gone, and there is nobody to tell.
                let _ = tx.send((file.clone(), outcome));
            });
        }
    });
    drop(tx);

    let mut results = Vec::with_capacity(files.len());
    let mut failure: Option<ExtractError> = None;
    for (file, outcome) in rx {
        match outcome {
            Ok(keys) => results.push(ExtractionResult::new(file, keys)),
            Err(message) => {
                if failure.is_none() {
                    failure = Some(ExtractError::extraction(file, message));
                }
            }
        }
    }

    match failure {
        Some(err) => Err(err),
        None => Ok(results),
    }
}

/// One isolated task: read the file, run the extractor, validate the
/// output. Panics are converted into this file's error instead of
/// unwinding into the pool.
fn run_one<E: Extract>(file: &Path, extractor: &E) -> Result<Vec<ExtractedKey>, String> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        let source =
            fs::read_to_string(file).map_err(|e| format!("failed to read file: {}", e))?;
        let keys = extractor
            .extract(file, &source)
            .map_err(|e| format!("{:#}", e))?;
        validate(&keys)?;
        Ok(keys)
    }));

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(panic_message(payload)),
    }
}

fn validate(keys: &[ExtractedKey]) -> Result<(), String> {
    if keys.iter().any(|k| k.key_name.is_empty()) {
        return Err("extractor returned a key with an empty name".to_string());
    }
    Ok(())
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("extractor panicked: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("extractor panicked: {}", s)
    } else {
        "extractor panicked".to_string()
    }
}
