use std::ffi::CString;
use std::os::raw::{c_char, c_void};
use std::path::{Path, PathBuf};
use std::ptr;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::context::DeviceContext;
use crate::errors::{P2pError, ZeError};
use crate::ze::ffi::*;
use crate::ze::{check, ZeRuntime};

/// SPIR-V module built for one device.
pub struct KernelModule {
    rt: Rc<ZeRuntime>,
    handle: ze_module_handle_t,
    path: PathBuf,
}

impl KernelModule {
    /// Read a SPIR-V binary from `path` and build it for `ctx`'s device.
    pub fn load(ctx: &DeviceContext, path: &Path) -> Result<Self, P2pError> {
        let spirv = std::fs::read(path).map_err(|source| P2pError::ModuleIo {
            path: path.to_path_buf(),
            source,
        })?;
        if spirv.is_empty() {
            return Err(P2pError::EmptyModule {
                path: path.to_path_buf(),
            });
        }

        let rt = Rc::clone(ctx.runtime());
        let desc = ze_module_desc_t {
            stype: ZE_STRUCTURE_TYPE_MODULE_DESC,
            pNext: ptr::null(),
            format: ZE_MODULE_FORMAT_IL_SPIRV,
            inputSize: spirv.len(),
            pInputModule: spirv.as_ptr(),
            pBuildFlags: ptr::null(),
            pConstants: ptr::null(),
        };
        let mut handle = ptr::null_mut();
        let mut build_log = ptr::null_mut();
        let code = unsafe {
            (rt.api.zeModuleCreate)(rt.context, ctx.device(), &desc, &mut handle, &mut build_log)
        };
        let log = take_build_log(&rt, build_log);

        if let Err(source) = check("zeModuleCreate", code) {
            return Err(P2pError::ModuleBuild {
                path: path.to_path_buf(),
                build_log: log,
                source,
            });
        }
        if !log.trim().is_empty() {
            debug!("Build log for {}:\n{}", path.display(), log);
        }
        info!(
            "Loaded kernel module {} ({} bytes) on GPU {}",
            path.display(),
            spirv.len(),
            ctx.ordinal()
        );

        Ok(Self {
            rt,
            handle,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for KernelModule {
    fn drop(&mut self) {
        let code = unsafe { (self.rt.api.zeModuleDestroy)(self.handle) };
        if let Err(e) = check("zeModuleDestroy", code) {
            warn!("{}", e);
        }
    }
}

/// Read and destroy a module build log. Returns an empty string when the
/// driver produced none.
fn take_build_log(rt: &ZeRuntime, log: ze_module_build_log_handle_t) -> String {
    if log.is_null() {
        return String::new();
    }

    let mut size = 0usize;
    let mut text = String::new();
    unsafe {
        let sized = (rt.api.zeModuleBuildLogGetString)(log, &mut size, ptr::null_mut());
        if sized.is_success() && size > 0 {
            let mut buf = vec![0u8; size];
            let read = (rt.api.zeModuleBuildLogGetString)(
                log,
                &mut size,
                buf.as_mut_ptr() as *mut c_char,
            );
            if read.is_success() {
                let end = buf.iter().position(|&b| b == 0).unwrap_or(buf.len());
                text = String::from_utf8_lossy(&buf[..end]).into_owned();
            }
        }
        if let Err(e) = check("zeModuleBuildLogDestroy", (rt.api.zeModuleBuildLogDestroy)(log)) {
            warn!("{}", e);
        }
    }
    text
}

/// A kernel instance created from a module. Arguments and group size are
/// per-instance state, so each launch creates its own.
pub struct Kernel {
    rt: Rc<ZeRuntime>,
    handle: ze_kernel_handle_t,
    name: String,
}

impl Kernel {
    pub fn create(module: &KernelModule, name: &str) -> Result<Self, P2pError> {
        let c_name =
            CString::new(name).map_err(|_| P2pError::InvalidKernelName(name.to_string()))?;
        let desc = ze_kernel_desc_t {
            stype: ZE_STRUCTURE_TYPE_KERNEL_DESC,
            pNext: ptr::null(),
            flags: 0,
            pKernelName: c_name.as_ptr(),
        };
        let mut handle = ptr::null_mut();
        unsafe {
            check(
                "zeKernelCreate",
                (module.rt.api.zeKernelCreate)(module.handle, &desc, &mut handle),
            )?;
        }

        Ok(Self {
            rt: Rc::clone(&module.rt),
            handle,
            name: name.to_string(),
        })
    }

    pub fn handle(&self) -> ze_kernel_handle_t {
        self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Largest group size the driver suggests that evenly divides `global`.
    pub fn suggest_group_size(&self, global: u32) -> Result<u32, ZeError> {
        let (mut x, mut y, mut z) = (0u32, 0u32, 0u32);
        unsafe {
            check(
                "zeKernelSuggestGroupSize",
                (self.rt.api.zeKernelSuggestGroupSize)(
                    self.handle,
                    global,
                    1,
                    1,
                    &mut x,
                    &mut y,
                    &mut z,
                ),
            )?;
        }
        Ok(x)
    }

    pub fn set_group_size(&self, x: u32) -> Result<(), ZeError> {
        unsafe {
            check(
                "zeKernelSetGroupSize",
                (self.rt.api.zeKernelSetGroupSize)(self.handle, x, 1, 1),
            )
        }
    }

    /// Bind a device pointer to argument `index`.
    pub fn set_pointer_arg(&self, index: u32, value: *mut c_void) -> Result<(), ZeError> {
        unsafe {
            check(
                "zeKernelSetArgumentValue",
                (self.rt.api.zeKernelSetArgumentValue)(
                    self.handle,
                    index,
                    std::mem::size_of::<*mut c_void>(),
                    &value as *const *mut c_void as *const c_void,
                ),
            )
        }
    }
}

impl Drop for Kernel {
    fn drop(&mut self) {
        let code = unsafe { (self.rt.api.zeKernelDestroy)(self.handle) };
        if let Err(e) = check("zeKernelDestroy", code) {
            warn!("{} ({})", e, self.name);
        }
    }
}
