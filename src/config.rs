use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::buffer::element_bytes;
use crate::errors::CountError;

pub const DEFAULT_LOCAL_GPU: u32 = 0;
pub const DEFAULT_REMOTE_GPU: u32 = 1;
pub const DEFAULT_DATA_COUNT: u32 = 1024;
pub const DEFAULT_KERNEL_PATH: &str = "../../lz_p2p/test_kernel_dg2.spv";

/// Validated run configuration. Built once from the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub local_gpu: u32,
    pub remote_gpu: u32,
    pub data_count: u32,
    pub kernel_path: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            local_gpu: DEFAULT_LOCAL_GPU,
            remote_gpu: DEFAULT_REMOTE_GPU,
            data_count: DEFAULT_DATA_COUNT,
            kernel_path: PathBuf::from(DEFAULT_KERNEL_PATH),
            report_path: None,
        }
    }
}

impl Config {
    /// Size in bytes of one test buffer, `None` if it does not fit in `usize`.
    pub fn buffer_bytes(&self) -> Option<usize> {
        element_bytes(self.data_count)
    }
}

/// Parse an element count such as `256`, `2k` or `4M`.
///
/// A trailing `k`/`m` (any case) scales by 1024 or 1024 * 1024. Everything
/// before it must be decimal digits.
pub fn parse_count(input: &str) -> Result<u32, CountError> {
    let (digits, multiplier) = match input.chars().last().map(|c| c.to_ascii_lowercase()) {
        Some('k') => (&input[..input.len() - 1], 1024u64),
        Some('m') => (&input[..input.len() - 1], 1024 * 1024),
        _ => (input, 1),
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CountError::InvalidDigits(input.to_string()));
    }

    let number: u64 = digits
        .parse()
        .map_err(|_| CountError::Overflow(input.to_string()))?;
    let count = number
        .checked_mul(multiplier)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| CountError::Overflow(input.to_string()))?;

    if count == 0 {
        return Err(CountError::Zero);
    }
    Ok(count)
}

/// Parse a `-l`/`-r` device index. Only GPUs 0 and 1 are accepted.
pub fn parse_gpu_index(input: &str) -> Result<u32, String> {
    match input.trim() {
        "0" => Ok(0),
        "1" => Ok(1),
        _ => Err("must be 0 or 1".to_string()),
    }
}
