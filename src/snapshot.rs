//! Snapshot Module
//!
//! Binary export and import of a whole store.
//!
//! ## File Format
//! ```text
//! ┌───────────┬─────────┬─────────┬──────────────────────────┐
//! │ Magic (4) │ CRC (4) │ Len (4) │ bincode(index, columns)  │
//! └───────────┴─────────┴─────────┴──────────────────────────┘
//! ```
//! CRC32 covers the payload only. Integers are big-endian.
//!
//! Decoding re-checks the store invariants, so a snapshot that passes the
//! checksum but holds unsorted or ragged columns is still rejected.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::store::ColumnStore;
use crate::value::Value;

/// Leading bytes of every snapshot
pub const MAGIC: [u8; 4] = *b"TSC1";

/// Header size: magic (4) + crc (4) + payload length (4)
pub const HEADER_SIZE: usize = 12;

#[derive(Serialize)]
struct SnapshotRef<'a> {
    index_name: &'a str,
    columns: &'a BTreeMap<String, Vec<Value>>,
}

#[derive(Deserialize)]
struct SnapshotOwned {
    index_name: String,
    columns: BTreeMap<String, Vec<Value>>,
}

/// Encode a store into snapshot bytes
pub fn encode(store: &ColumnStore) -> Result<Vec<u8>> {
    let payload = bincode::serialize(&SnapshotRef {
        index_name: store.index_name(),
        columns: store.raw_columns(),
    })?;

    let payload_len = u32::try_from(payload.len()).map_err(|_| {
        StoreError::Serialization(format!("snapshot payload too large: {} bytes", payload.len()))
    })?;
    let crc = crc32fast::hash(&payload);

    let mut bytes = Vec::with_capacity(HEADER_SIZE + payload.len());
    bytes.extend_from_slice(&MAGIC);
    bytes.extend_from_slice(&crc.to_be_bytes());
    bytes.extend_from_slice(&payload_len.to_be_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decode snapshot bytes into a store
pub fn decode(bytes: &[u8]) -> Result<ColumnStore> {
    if bytes.len() < HEADER_SIZE {
        return Err(StoreError::Corruption(format!(
            "incomplete header: expected {} bytes, got {}",
            HEADER_SIZE,
            bytes.len()
        )));
    }

    if bytes[0..4] != MAGIC {
        return Err(StoreError::Corruption("bad magic bytes".to_string()));
    }

    let crc = u32::from_be_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    let payload_len = u32::from_be_bytes([bytes[8], bytes[9], bytes[10], bytes[11]]) as usize;

    let payload = &bytes[HEADER_SIZE..];
    if payload.len() != payload_len {
        return Err(StoreError::Corruption(format!(
            "payload length mismatch: header says {}, found {}",
            payload_len,
            payload.len()
        )));
    }

    let actual = crc32fast::hash(payload);
    if actual != crc {
        return Err(StoreError::Corruption(format!(
            "checksum mismatch: expected {:08x}, computed {:08x}",
            crc, actual
        )));
    }

    let body: SnapshotOwned = bincode::deserialize(payload)?;
    let store = ColumnStore::from_parts(body.index_name, body.columns);
    store
        .validate()
        .map_err(|e| StoreError::Corruption(e.to_string()))?;
    Ok(store)
}

/// Write a snapshot file, replacing any existing one
pub fn write_to(store: &ColumnStore, path: &Path) -> Result<()> {
    let bytes = encode(store)?;
    fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), rows = store.len(), "wrote snapshot");
    Ok(())
}

/// Read a snapshot file
pub fn read_from(path: &Path) -> Result<ColumnStore> {
    let bytes = fs::read(path)?;
    let store = decode(&bytes)?;
    tracing::debug!(path = %path.display(), rows = store.len(), "read snapshot");
    Ok(store)
}
