use std::io;
use std::path::PathBuf;
use thiserror::Error;

use crate::ze::ffi::ZeResult;

/// Problems with the `-n` element count.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CountError {
    #[error("Invalid input '{0}' (-n requires a number or number with k or m, e.g., 256, 2k, 4m)")]
    InvalidDigits(String),
    #[error("Element count must be greater than zero")]
    Zero,
    #[error("Element count '{0}' is too large")]
    Overflow(String),
}

/// Failures reported by the Level Zero loader or driver.
#[derive(Error, Debug)]
pub enum ZeError {
    #[error("Failed to load Level Zero loader (tried {tried:?}): {source}")]
    LoaderNotFound {
        tried: Vec<&'static str>,
        #[source]
        source: libloading::Error,
    },
    #[error("Level Zero loader is missing symbol {symbol}: {source}")]
    MissingSymbol {
        symbol: &'static str,
        #[source]
        source: libloading::Error,
    },
    #[error("{call} failed with {code}")]
    Call { call: &'static str, code: ZeResult },
    #[error("No Level Zero GPU driver found")]
    NoDriver,
}

#[derive(Error, Debug)]
pub enum P2pError {
    #[error("Level Zero error: {0}")]
    Ze(#[from] ZeError),
    #[error("GPU {ordinal} not found ({available} device(s) available)")]
    DeviceNotFound { ordinal: u32, available: u32 },
    #[error("IO error reading kernel module {path}: {source}")]
    ModuleIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Kernel module {path} is empty")]
    EmptyModule { path: PathBuf },
    #[error("Failed to build kernel module {path}: {source}\n{build_log}")]
    ModuleBuild {
        path: PathBuf,
        build_log: String,
        #[source]
        source: ZeError,
    },
    #[error("Kernel name '{0}' contains an interior NUL byte")]
    InvalidKernelName(String),
    #[error("Buffer of {count} i32 elements does not fit in host address space")]
    BufferTooLarge { count: u32 },
    #[error("Buffer length mismatch: local has {local} elements, remote has {remote}")]
    LengthMismatch { local: usize, remote: usize },
    #[error("Suggested group size {group_size} does not divide element count {count}")]
    GroupSize { group_size: u32, count: u32 },
    #[error("Verification of {kernel} failed: {mismatches} mismatch(es), first at index {index} (expected {expected}, got {actual})")]
    VerificationFailed {
        kernel: String,
        mismatches: usize,
        index: usize,
        expected: i32,
        actual: i32,
    },
    #[error("Failed to write report {path}: {source}")]
    ReportIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[from] serde_json::Error),
}
