use libloading::Library;
use tracing::debug;

use super::ffi::*;
use crate::errors::ZeError;

#[cfg(target_os = "windows")]
const LOADER_NAMES: &[&str] = &["ze_loader.dll"];
#[cfg(not(target_os = "windows"))]
const LOADER_NAMES: &[&str] = &["libze_loader.so.1", "libze_loader.so"];

/// Function table resolved from the Level Zero loader.
///
/// The `Library` is kept alive for as long as the table exists, so the
/// function pointers never dangle.
#[allow(non_snake_case)]
pub struct ZeApi {
    pub zeInit: PFN_zeInit,
    pub zeDriverGet: PFN_zeDriverGet,
    pub zeDeviceGet: PFN_zeDeviceGet,
    pub zeDeviceGetProperties: PFN_zeDeviceGetProperties,
    pub zeDeviceCanAccessPeer: PFN_zeDeviceCanAccessPeer,
    pub zeDeviceGetP2PProperties: PFN_zeDeviceGetP2PProperties,
    pub zeContextCreate: PFN_zeContextCreate,
    pub zeContextDestroy: PFN_zeContextDestroy,
    pub zeContextMakeMemoryResident: PFN_zeContextMakeMemoryResident,
    pub zeCommandQueueCreate: PFN_zeCommandQueueCreate,
    pub zeCommandQueueDestroy: PFN_zeCommandQueueDestroy,
    pub zeCommandQueueExecuteCommandLists: PFN_zeCommandQueueExecuteCommandLists,
    pub zeCommandQueueSynchronize: PFN_zeCommandQueueSynchronize,
    pub zeCommandListCreate: PFN_zeCommandListCreate,
    pub zeCommandListDestroy: PFN_zeCommandListDestroy,
    pub zeCommandListClose: PFN_zeCommandListClose,
    pub zeCommandListReset: PFN_zeCommandListReset,
    pub zeCommandListAppendMemoryCopy: PFN_zeCommandListAppendMemoryCopy,
    pub zeCommandListAppendMemoryFill: PFN_zeCommandListAppendMemoryFill,
    pub zeCommandListAppendLaunchKernel: PFN_zeCommandListAppendLaunchKernel,
    pub zeMemAllocDevice: PFN_zeMemAllocDevice,
    pub zeMemFree: PFN_zeMemFree,
    pub zeModuleCreate: PFN_zeModuleCreate,
    pub zeModuleDestroy: PFN_zeModuleDestroy,
    pub zeModuleBuildLogGetString: PFN_zeModuleBuildLogGetString,
    pub zeModuleBuildLogDestroy: PFN_zeModuleBuildLogDestroy,
    pub zeKernelCreate: PFN_zeKernelCreate,
    pub zeKernelDestroy: PFN_zeKernelDestroy,
    pub zeKernelSetArgumentValue: PFN_zeKernelSetArgumentValue,
    pub zeKernelSetGroupSize: PFN_zeKernelSetGroupSize,
    pub zeKernelSuggestGroupSize: PFN_zeKernelSuggestGroupSize,
    _lib: Library,
}

/// Resolve one entry point. `name` must be NUL-terminated.
unsafe fn symbol<T: Copy>(lib: &Library, name: &'static str) -> Result<T, ZeError> {
    let sym = lib
        .get::<T>(name.as_bytes())
        .map_err(|source| ZeError::MissingSymbol {
            symbol: name.trim_end_matches('\0'),
            source,
        })?;
    Ok(*sym)
}

impl ZeApi {
    /// Open the loader library and resolve every entry point this tool uses.
    pub fn load() -> Result<Self, ZeError> {
        let mut last_err = None;
        for name in LOADER_NAMES {
            // Loading runs the loader's initializers; nothing else is touched.
            match unsafe { Library::new(name) } {
                Ok(lib) => {
                    debug!("Loaded Level Zero loader {}", name);
                    return unsafe { Self::from_library(lib) };
                }
                Err(e) => {
                    debug!("Could not load {}: {}", name, e);
                    last_err = Some(e);
                }
            }
        }

        match last_err {
            Some(source) => Err(ZeError::LoaderNotFound {
                tried: LOADER_NAMES.to_vec(),
                source,
            }),
            None => Err(ZeError::NoDriver),
        }
    }

    unsafe fn from_library(lib: Library) -> Result<Self, ZeError> {
        Ok(Self {
            zeInit: symbol(&lib, "zeInit\0")?,
            zeDriverGet: symbol(&lib, "zeDriverGet\0")?,
            zeDeviceGet: symbol(&lib, "zeDeviceGet\0")?,
            zeDeviceGetProperties: symbol(&lib, "zeDeviceGetProperties\0")?,
            zeDeviceCanAccessPeer: symbol(&lib, "zeDeviceCanAccessPeer\0")?,
            zeDeviceGetP2PProperties: symbol(&lib, "zeDeviceGetP2PProperties\0")?,
            zeContextCreate: symbol(&lib, "zeContextCreate\0")?,
            zeContextDestroy: symbol(&lib, "zeContextDestroy\0")?,
            zeContextMakeMemoryResident: symbol(&lib, "zeContextMakeMemoryResident\0")?,
            zeCommandQueueCreate: symbol(&lib, "zeCommandQueueCreate\0")?,
            zeCommandQueueDestroy: symbol(&lib, "zeCommandQueueDestroy\0")?,
            zeCommandQueueExecuteCommandLists: symbol(
                &lib,
                "zeCommandQueueExecuteCommandLists\0",
            )?,
            zeCommandQueueSynchronize: symbol(&lib, "zeCommandQueueSynchronize\0")?,
            zeCommandListCreate: symbol(&lib, "zeCommandListCreate\0")?,
            zeCommandListDestroy: symbol(&lib, "zeCommandListDestroy\0")?,
            zeCommandListClose: symbol(&lib, "zeCommandListClose\0")?,
            zeCommandListReset: symbol(&lib, "zeCommandListReset\0")?,
            zeCommandListAppendMemoryCopy: symbol(&lib, "zeCommandListAppendMemoryCopy\0")?,
            zeCommandListAppendMemoryFill: symbol(&lib, "zeCommandListAppendMemoryFill\0")?,
            zeCommandListAppendLaunchKernel: symbol(&lib, "zeCommandListAppendLaunchKernel\0")?,
            zeMemAllocDevice: symbol(&lib, "zeMemAllocDevice\0")?,
            zeMemFree: symbol(&lib, "zeMemFree\0")?,
            zeModuleCreate: symbol(&lib, "zeModuleCreate\0")?,
            zeModuleDestroy: symbol(&lib, "zeModuleDestroy\0")?,
            zeModuleBuildLogGetString: symbol(&lib, "zeModuleBuildLogGetString\0")?,
            zeModuleBuildLogDestroy: symbol(&lib, "zeModuleBuildLogDestroy\0")?,
            zeKernelCreate: symbol(&lib, "zeKernelCreate\0")?,
            zeKernelDestroy: symbol(&lib, "zeKernelDestroy\0")?,
            zeKernelSetArgumentValue: symbol(&lib, "zeKernelSetArgumentValue\0")?,
            zeKernelSetGroupSize: symbol(&lib, "zeKernelSetGroupSize\0")?,
            zeKernelSuggestGroupSize: symbol(&lib, "zeKernelSuggestGroupSize\0")?,
            _lib: lib,
        })
    }
}

/// Turn a raw result into `Ok(())` or a `ZeError::Call` naming the entry point.
pub fn check(call: &'static str, code: ZeResult) -> Result<(), ZeError> {
    if code.is_success() {
        Ok(())
    } else {
        Err(ZeError::Call { call, code })
    }
}
