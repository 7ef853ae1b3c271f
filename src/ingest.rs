//! Feeding input data into a frontier in fixed-size chunks

use crate::frontier::Frontier;
use crate::merkle::HashAlgorithm;
use crate::Result;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// How each chunk becomes an exclusion
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChunkMode {
    /// Exclude the chunk bytes as they are
    Raw,
    /// Exclude the chunk's leaf hash under the given primitive
    LeafHash(HashAlgorithm),
}

/// Exclude every `chunk_size` chunk read from `reader`
///
/// The final chunk may be short; an empty reader excludes nothing. Returns
/// the number of chunks excluded.
pub fn exclude_chunks<R: Read>(
    frontier: &mut Frontier,
    mut reader: R,
    chunk_size: usize,
    mode: ChunkMode,
) -> Result<usize> {
    let chunk_size = chunk_size.max(1);
    let mut buf = Vec::with_capacity(chunk_size);
    let mut count = 0;
    loop {
        buf.clear();
        let n = reader
            .by_ref()
            .take(chunk_size as u64)
            .read_to_end(&mut buf)?;
        if n == 0 {
            break;
        }
        match mode {
            ChunkMode::Raw => frontier.exclude(&buf),
            ChunkMode::LeafHash(algorithm) => {
                frontier.exclude(algorithm.leaf_hash(&buf).as_bytes())
            }
        }
        count += 1;
        if n < chunk_size {
            break;
        }
    }
    tracing::trace!(chunks = count, "excluded chunks");
    Ok(count)
}

/// Exclude the chunks of the file at `path`
pub fn exclude_file(
    frontier: &mut Frontier,
    path: &Path,
    chunk_size: usize,
    mode: ChunkMode,
) -> Result<usize> {
    let file = File::open(path)?;
    let count = exclude_chunks(frontier, BufReader::new(file), chunk_size, mode)?;
    tracing::debug!(path = %path.display(), chunks = count, "excluded file");
    Ok(count)
}
