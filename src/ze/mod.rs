//! Minimal Level Zero binding: loader, driver selection and the shared context.

pub mod api;
pub mod ffi;

use std::ptr;
use std::rc::Rc;

use tracing::{debug, info, warn};

pub use api::{check, ZeApi};
use ffi::*;

use crate::errors::ZeError;

/// Loader, driver and the one Level Zero context every device shares.
///
/// Device memory is only addressable inside the context that allocated it,
/// so both peers must live in the same context for P2P to work.
pub struct ZeRuntime {
    pub api: ZeApi,
    pub driver: ze_driver_handle_t,
    pub context: ze_context_handle_t,
}

impl ZeRuntime {
    pub fn init() -> Result<Rc<Self>, ZeError> {
        let api = ZeApi::load()?;

        unsafe {
            check("zeInit", (api.zeInit)(ZE_INIT_FLAG_GPU_ONLY))?;
        }

        let mut count = 0u32;
        unsafe {
            check("zeDriverGet", (api.zeDriverGet)(&mut count, ptr::null_mut()))?;
        }
        if count == 0 {
            return Err(ZeError::NoDriver);
        }
        let mut drivers = vec![ptr::null_mut(); count as usize];
        unsafe {
            check("zeDriverGet", (api.zeDriverGet)(&mut count, drivers.as_mut_ptr()))?;
        }
        if count > 1 {
            info!("Found {} Level Zero drivers, using the first", count);
        }
        let driver = drivers[0];

        let desc = ze_context_desc_t {
            stype: ZE_STRUCTURE_TYPE_CONTEXT_DESC,
            pNext: ptr::null(),
            flags: 0,
        };
        let mut context = ptr::null_mut();
        unsafe {
            check("zeContextCreate", (api.zeContextCreate)(driver, &desc, &mut context))?;
        }
        debug!("Created Level Zero context {:p}", context);

        Ok(Rc::new(Self { api, driver, context }))
    }

    /// All device handles exposed by the selected driver, in ordinal order.
    pub fn devices(&self) -> Result<Vec<ze_device_handle_t>, ZeError> {
        let mut count = 0u32;
        unsafe {
            check(
                "zeDeviceGet",
                (self.api.zeDeviceGet)(self.driver, &mut count, ptr::null_mut()),
            )?;
        }
        let mut devices = vec![ptr::null_mut(); count as usize];
        if count > 0 {
            unsafe {
                check(
                    "zeDeviceGet",
                    (self.api.zeDeviceGet)(self.driver, &mut count, devices.as_mut_ptr()),
                )?;
            }
        }
        devices.truncate(count as usize);
        Ok(devices)
    }
}

impl Drop for ZeRuntime {
    fn drop(&mut self) {
        let code = unsafe { (self.api.zeContextDestroy)(self.context) };
        if let Err(e) = check("zeContextDestroy", code) {
            warn!("{}", e);
        }
    }
}
