//! The smoke test itself: two devices, two buffers, one read and one write
//! across the P2P link.
//!
//! Kernel arguments are `(remote, local)`. `local_read_from_remote` copies
//! remote into local, `local_write_to_remote` copies local into remote. Both
//! run on the local device.

use tracing::{info, warn};

use crate::config::Config;
use crate::context::DeviceContext;
use crate::errors::P2pError;
use crate::kernel::KernelModule;
use crate::p2p::query_p2p;
use crate::report::RunReport;
use crate::verify::{check_copy, check_fill};
use crate::ze::ZeRuntime;

pub const READ_KERNEL: &str = "local_read_from_remote";
pub const WRITE_KERNEL: &str = "local_write_to_remote";

pub const LOCAL_FILL: i32 = 0;
pub const REMOTE_FILL: i32 = 1;
/// Written into the local buffer before the write phase so the copy is visible.
pub const WRITE_FILL: i32 = 2;

/// Run the whole sequence against real hardware.
///
/// Driver errors abort the run. Verification results are collected in the
/// report and left for the caller to judge.
pub fn run(config: &Config) -> Result<RunReport, P2pError> {
    println!(
        "#### Input parameters: local_gpu idx = {}, remote_gpu idx = {}, data_count = {}",
        config.local_gpu, config.remote_gpu, config.data_count
    );
    if config.local_gpu == config.remote_gpu {
        warn!(
            "Local and remote GPU are both {}; this exercises local access only",
            config.local_gpu
        );
    }

    let bytes = config.buffer_bytes().ok_or(P2pError::BufferTooLarge {
        count: config.data_count,
    })?;
    info!("Each test buffer is {} bytes", bytes);

    let mut report = RunReport::new(config.clone());

    let rt = ZeRuntime::init()?;
    let local = DeviceContext::open(&rt, config.local_gpu)?;
    let remote = DeviceContext::open(&rt, config.remote_gpu)?;
    report.devices.push(local.info().clone());
    report.devices.push(remote.info().clone());

    let to_remote = query_p2p(&local, &remote)?;
    let to_local = query_p2p(&remote, &local)?;
    println!("{}", to_remote);
    println!("{}", to_local);
    if !to_remote.can_access {
        warn!(
            "GPU {} reports no P2P access to GPU {}; kernels may fail or fault",
            config.local_gpu, config.remote_gpu
        );
    }
    report.p2p.push(to_remote);
    report.p2p.push(to_local);

    let local_buf = local.create_buffer(config.data_count, LOCAL_FILL)?;
    let remote_buf = remote.create_buffer(config.data_count, REMOTE_FILL)?;
    println!("buf0 = {:p}, buf1 = {:p}", local_buf.as_ptr(), remote_buf.as_ptr());

    local.print_buffer(&local_buf)?;
    let remote_before = remote.print_buffer(&remote_buf)?;

    let module = KernelModule::load(&local, &config.kernel_path)?;
    if to_remote.can_access {
        local.make_resident(&remote_buf)?;
    }

    local.run_kernel(&module, READ_KERNEL, &remote_buf, &local_buf)?;
    let local_after = local.print_buffer(&local_buf)?;
    let read_check = check_copy(READ_KERNEL, &remote_before, &local_after);
    log_check(&read_check);
    report.checks.push(read_check);

    local.fill_buffer(&local_buf, WRITE_FILL)?;
    local.run_kernel(&module, WRITE_KERNEL, &remote_buf, &local_buf)?;
    let remote_after = remote.print_buffer(&remote_buf)?;
    let write_check = check_fill(WRITE_KERNEL, WRITE_FILL, &remote_after);
    log_check(&write_check);
    report.checks.push(write_check);

    println!("done");
    Ok(report)
}

fn log_check(check: &crate::verify::CopyCheck) {
    if check.passed() {
        info!("{}: {} element(s) verified", check.kernel, check.checked);
    } else {
        warn!(
            "{}: {} of {} element(s) wrong",
            check.kernel, check.mismatches, check.checked
        );
    }
}
