use clap::Parser;
use std::path::PathBuf;

use crate::config::{self, Config};

#[derive(Parser, Debug)]
#[command(name = "lz_p2p")]
#[command(about = "Level Zero peer-to-peer smoke test between two GPUs", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Args {
    /// Local GPU index (0 or 1)
    #[arg(short = 'l', long = "local", default_value = "0", value_parser = config::parse_gpu_index)]
    pub local: u32,

    /// Remote GPU index (0 or 1)
    #[arg(short = 'r', long = "remote", default_value = "1", value_parser = config::parse_gpu_index)]
    pub remote: u32,

    /// Element count, optionally suffixed with k or m (e.g. 256, 2k, 4m)
    #[arg(short = 'n', long = "count", default_value = "1024", value_parser = parse_count_arg)]
    pub count: u32,

    /// Precompiled SPIR-V module holding the P2P test kernels.
    ///
    /// Verification expects the plain-copy semantics of kernels/p2p_kernels.cl.
    #[arg(long, env = "LZ_P2P_KERNEL", default_value = config::DEFAULT_KERNEL_PATH)]
    pub kernel: PathBuf,

    /// Write a JSON run report to this path
    #[arg(long)]
    pub report: Option<PathBuf>,
}

fn parse_count_arg(input: &str) -> Result<u32, String> {
    config::parse_count(input).map_err(|e| e.to_string())
}

impl Args {
    pub fn into_config(self) -> Config {
        Config {
            local_gpu: self.local,
            remote_gpu: self.remote,
            data_count: self.count,
            kernel_path: self.kernel,
            report_path: self.report,
        }
    }
}
