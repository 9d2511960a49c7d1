use std::num::NonZeroUsize;

use crate::types::{Batch, RawRecord};

/// Splits records into consecutive batches of `batch_size`, the last one
/// holding the remainder. Empty input yields no batches.
pub fn create_batches(records: Vec<RawRecord>, batch_size: NonZeroUsize) -> Vec<Batch> {
    let batch_size = batch_size.get();
    let mut batches = Vec::with_capacity(records.len().div_ceil(batch_size));
    let mut records = records.into_iter().peekable();

    while records.peek().is_some() {
        batches.push(records.by_ref().take(batch_size).collect());
    }

    batches
}
