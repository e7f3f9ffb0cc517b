//! Raw Level Zero types for the subset of `ze_api.h` this tool calls.
//!
//! Layouts mirror the C headers (Level Zero 1.x). Handles are opaque
//! pointers owned by the driver.
#![allow(non_camel_case_types, non_snake_case)]

use std::fmt;
use std::os::raw::{c_char, c_void};

pub type ze_driver_handle_t = *mut c_void;
pub type ze_device_handle_t = *mut c_void;
pub type ze_context_handle_t = *mut c_void;
pub type ze_command_queue_handle_t = *mut c_void;
pub type ze_command_list_handle_t = *mut c_void;
pub type ze_fence_handle_t = *mut c_void;
pub type ze_event_handle_t = *mut c_void;
pub type ze_module_handle_t = *mut c_void;
pub type ze_module_build_log_handle_t = *mut c_void;
pub type ze_kernel_handle_t = *mut c_void;

pub type ze_bool_t = u8;
pub type ze_init_flags_t = u32;
pub type ze_structure_type_t = u32;

pub const ZE_INIT_FLAG_GPU_ONLY: ze_init_flags_t = 1;

pub const ZE_STRUCTURE_TYPE_DEVICE_PROPERTIES: ze_structure_type_t = 0x3;
pub const ZE_STRUCTURE_TYPE_DEVICE_P2P_PROPERTIES: ze_structure_type_t = 0xb;
pub const ZE_STRUCTURE_TYPE_CONTEXT_DESC: ze_structure_type_t = 0xd;
pub const ZE_STRUCTURE_TYPE_COMMAND_QUEUE_DESC: ze_structure_type_t = 0xe;
pub const ZE_STRUCTURE_TYPE_COMMAND_LIST_DESC: ze_structure_type_t = 0xf;
pub const ZE_STRUCTURE_TYPE_DEVICE_MEM_ALLOC_DESC: ze_structure_type_t = 0x15;
pub const ZE_STRUCTURE_TYPE_MODULE_DESC: ze_structure_type_t = 0x1b;
pub const ZE_STRUCTURE_TYPE_KERNEL_DESC: ze_structure_type_t = 0x1d;

pub const ZE_DEVICE_P2P_PROPERTY_FLAG_ACCESS: u32 = 1 << 0;
pub const ZE_DEVICE_P2P_PROPERTY_FLAG_ATOMICS: u32 = 1 << 1;

pub const ZE_COMMAND_QUEUE_MODE_DEFAULT: u32 = 0;
pub const ZE_COMMAND_QUEUE_PRIORITY_NORMAL: u32 = 0;

pub const ZE_MODULE_FORMAT_IL_SPIRV: u32 = 0;

pub const ZE_MAX_DEVICE_NAME: usize = 256;
pub const ZE_MAX_DEVICE_UUID_SIZE: usize = 16;

/// Raw `ze_result_t`.
#[repr(transparent)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeResult(pub u32);

impl ZeResult {
    pub const SUCCESS: ZeResult = ZeResult(0);

    pub fn is_success(self) -> bool {
        self == Self::SUCCESS
    }

    /// Symbolic name from `ze_api.h`, if the code is one we know.
    pub fn name(self) -> Option<&'static str> {
        let name = match self.0 {
            0x0 => "ZE_RESULT_SUCCESS",
            0x1 => "ZE_RESULT_NOT_READY",
            0x7000_0001 => "ZE_RESULT_ERROR_DEVICE_LOST",
            0x7000_0002 => "ZE_RESULT_ERROR_OUT_OF_HOST_MEMORY",
            0x7000_0003 => "ZE_RESULT_ERROR_OUT_OF_DEVICE_MEMORY",
            0x7000_0004 => "ZE_RESULT_ERROR_MODULE_BUILD_FAILURE",
            0x7000_0005 => "ZE_RESULT_ERROR_MODULE_LINK_FAILURE",
            0x7000_0006 => "ZE_RESULT_ERROR_DEVICE_REQUIRES_RESET",
            0x7000_0007 => "ZE_RESULT_ERROR_DEVICE_IN_LOW_POWER_STATE",
            0x7001_0000 => "ZE_RESULT_ERROR_INSUFFICIENT_PERMISSIONS",
            0x7001_0001 => "ZE_RESULT_ERROR_NOT_AVAILABLE",
            0x7002_0000 => "ZE_RESULT_ERROR_DEPENDENCY_UNAVAILABLE",
            0x7800_0001 => "ZE_RESULT_ERROR_UNINITIALIZED",
            0x7800_0002 => "ZE_RESULT_ERROR_UNSUPPORTED_VERSION",
            0x7800_0003 => "ZE_RESULT_ERROR_UNSUPPORTED_FEATURE",
            0x7800_0004 => "ZE_RESULT_ERROR_INVALID_ARGUMENT",
            0x7800_0005 => "ZE_RESULT_ERROR_INVALID_NULL_HANDLE",
            0x7800_0006 => "ZE_RESULT_ERROR_HANDLE_OBJECT_IN_USE",
            0x7800_0007 => "ZE_RESULT_ERROR_INVALID_NULL_POINTER",
            0x7800_0008 => "ZE_RESULT_ERROR_INVALID_SIZE",
            0x7800_0009 => "ZE_RESULT_ERROR_UNSUPPORTED_SIZE",
            0x7800_000a => "ZE_RESULT_ERROR_UNSUPPORTED_ALIGNMENT",
            0x7800_000b => "ZE_RESULT_ERROR_INVALID_SYNCHRONIZATION_OBJECT",
            0x7800_000c => "ZE_RESULT_ERROR_INVALID_ENUMERATION",
            0x7800_000d => "ZE_RESULT_ERROR_UNSUPPORTED_ENUMERATION",
            0x7800_000e => "ZE_RESULT_ERROR_UNSUPPORTED_IMAGE_FORMAT",
            0x7800_000f => "ZE_RESULT_ERROR_INVALID_NATIVE_BINARY",
            0x7800_0010 => "ZE_RESULT_ERROR_INVALID_GLOBAL_NAME",
            0x7800_0011 => "ZE_RESULT_ERROR_INVALID_KERNEL_NAME",
            0x7800_0012 => "ZE_RESULT_ERROR_INVALID_FUNCTION_NAME",
            0x7800_0013 => "ZE_RESULT_ERROR_INVALID_GROUP_SIZE_DIMENSION",
            0x7800_0014 => "ZE_RESULT_ERROR_INVALID_GLOBAL_WIDTH_DIMENSION",
            0x7800_0015 => "ZE_RESULT_ERROR_INVALID_KERNEL_ARGUMENT_INDEX",
            0x7800_0016 => "ZE_RESULT_ERROR_INVALID_KERNEL_ARGUMENT_SIZE",
            0x7800_0017 => "ZE_RESULT_ERROR_INVALID_KERNEL_ATTRIBUTE_VALUE",
            0x7800_0018 => "ZE_RESULT_ERROR_INVALID_MODULE_UNLINKED",
            0x7800_0019 => "ZE_RESULT_ERROR_INVALID_COMMAND_LIST_TYPE",
            0x7800_001a => "ZE_RESULT_ERROR_OVERLAPPING_REGIONS",
            0x7fff_fffe => "ZE_RESULT_ERROR_UNKNOWN",
            _ => return None,
        };
        Some(name)
    }
}

impl fmt::Display for ZeResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{} (0x{:x})", name, self.0),
            None => write!(f, "unknown result 0x{:x}", self.0),
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_device_uuid_t {
    pub id: [u8; ZE_MAX_DEVICE_UUID_SIZE],
}

#[repr(C)]
#[derive(Clone, Copy)]
pub struct ze_device_properties_t {
    pub stype: ze_structure_type_t,
    pub pNext: *mut c_void,
    pub type_: u32,
    pub vendorId: u32,
    pub deviceId: u32,
    pub flags: u32,
    pub subdeviceId: u32,
    pub coreClockRate: u32,
    pub maxMemAllocSize: u64,
    pub maxHardwareContexts: u32,
    pub maxCommandQueuePriority: u32,
    pub numThreadsPerEU: u32,
    pub physicalEUSimdWidth: u32,
    pub numEUsPerSubslice: u32,
    pub numSubslicesPerSlice: u32,
    pub numSlices: u32,
    pub timerResolution: u64,
    pub timestampValidBits: u32,
    pub kernelTimestampValidBits: u32,
    pub uuid: ze_device_uuid_t,
    pub name: [c_char; ZE_MAX_DEVICE_NAME],
}

impl Default for ze_device_properties_t {
    fn default() -> Self {
        Self {
            stype: ZE_STRUCTURE_TYPE_DEVICE_PROPERTIES,
            pNext: std::ptr::null_mut(),
            type_: 0,
            vendorId: 0,
            deviceId: 0,
            flags: 0,
            subdeviceId: 0,
            coreClockRate: 0,
            maxMemAllocSize: 0,
            maxHardwareContexts: 0,
            maxCommandQueuePriority: 0,
            numThreadsPerEU: 0,
            physicalEUSimdWidth: 0,
            numEUsPerSubslice: 0,
            numSubslicesPerSlice: 0,
            numSlices: 0,
            timerResolution: 0,
            timestampValidBits: 0,
            kernelTimestampValidBits: 0,
            uuid: ze_device_uuid_t { id: [0; ZE_MAX_DEVICE_UUID_SIZE] },
            name: [0; ZE_MAX_DEVICE_NAME],
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_device_p2p_properties_t {
    pub stype: ze_structure_type_t,
    pub pNext: *mut c_void,
    pub flags: u32,
}

impl Default for ze_device_p2p_properties_t {
    fn default() -> Self {
        Self {
            stype: ZE_STRUCTURE_TYPE_DEVICE_P2P_PROPERTIES,
            pNext: std::ptr::null_mut(),
            flags: 0,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_context_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_command_queue_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub ordinal: u32,
    pub index: u32,
    pub flags: u32,
    pub mode: u32,
    pub priority: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_command_list_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub commandQueueGroupOrdinal: u32,
    pub flags: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_device_mem_alloc_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub flags: u32,
    pub ordinal: u32,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_module_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub format: u32,
    pub inputSize: usize,
    pub pInputModule: *const u8,
    pub pBuildFlags: *const c_char,
    pub pConstants: *const c_void,
}

#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct ze_kernel_desc_t {
    pub stype: ze_structure_type_t,
    pub pNext: *const c_void,
    pub flags: u32,
    pub pKernelName: *const c_char,
}

#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ze_group_count_t {
    pub groupCountX: u32,
    pub groupCountY: u32,
    pub groupCountZ: u32,
}

pub type PFN_zeInit = unsafe extern "C" fn(ze_init_flags_t) -> ZeResult;
pub type PFN_zeDriverGet = unsafe extern "C" fn(*mut u32, *mut ze_driver_handle_t) -> ZeResult;
pub type PFN_zeDeviceGet =
    unsafe extern "C" fn(ze_driver_handle_t, *mut u32, *mut ze_device_handle_t) -> ZeResult;
pub type PFN_zeDeviceGetProperties =
    unsafe extern "C" fn(ze_device_handle_t, *mut ze_device_properties_t) -> ZeResult;
pub type PFN_zeDeviceCanAccessPeer =
    unsafe extern "C" fn(ze_device_handle_t, ze_device_handle_t, *mut ze_bool_t) -> ZeResult;
pub type PFN_zeDeviceGetP2PProperties = unsafe extern "C" fn(
    ze_device_handle_t,
    ze_device_handle_t,
    *mut ze_device_p2p_properties_t,
) -> ZeResult;
pub type PFN_zeContextCreate = unsafe extern "C" fn(
    ze_driver_handle_t,
    *const ze_context_desc_t,
    *mut ze_context_handle_t,
) -> ZeResult;
pub type PFN_zeContextDestroy = unsafe extern "C" fn(ze_context_handle_t) -> ZeResult;
pub type PFN_zeContextMakeMemoryResident =
    unsafe extern "C" fn(ze_context_handle_t, ze_device_handle_t, *mut c_void, usize) -> ZeResult;
pub type PFN_zeCommandQueueCreate = unsafe extern "C" fn(
    ze_context_handle_t,
    ze_device_handle_t,
    *const ze_command_queue_desc_t,
    *mut ze_command_queue_handle_t,
) -> ZeResult;
pub type PFN_zeCommandQueueDestroy = unsafe extern "C" fn(ze_command_queue_handle_t) -> ZeResult;
pub type PFN_zeCommandQueueExecuteCommandLists = unsafe extern "C" fn(
    ze_command_queue_handle_t,
    u32,
    *mut ze_command_list_handle_t,
    ze_fence_handle_t,
) -> ZeResult;
pub type PFN_zeCommandQueueSynchronize =
    unsafe extern "C" fn(ze_command_queue_handle_t, u64) -> ZeResult;
pub type PFN_zeCommandListCreate = unsafe extern "C" fn(
    ze_context_handle_t,
    ze_device_handle_t,
    *const ze_command_list_desc_t,
    *mut ze_command_list_handle_t,
) -> ZeResult;
pub type PFN_zeCommandListDestroy = unsafe extern "C" fn(ze_command_list_handle_t) -> ZeResult;
pub type PFN_zeCommandListClose = unsafe extern "C" fn(ze_command_list_handle_t) -> ZeResult;
pub type PFN_zeCommandListReset = unsafe extern "C" fn(ze_command_list_handle_t) -> ZeResult;
pub type PFN_zeCommandListAppendMemoryCopy = unsafe extern "C" fn(
    ze_command_list_handle_t,
    *mut c_void,
    *const c_void,
    usize,
    ze_event_handle_t,
    u32,
    *mut ze_event_handle_t,
) -> ZeResult;
pub type PFN_zeCommandListAppendMemoryFill = unsafe extern "C" fn(
    ze_command_list_handle_t,
    *mut c_void,
    *const c_void,
    usize,
    usize,
    ze_event_handle_t,
    u32,
    *mut ze_event_handle_t,
) -> ZeResult;
pub type PFN_zeCommandListAppendLaunchKernel = unsafe extern "C" fn(
    ze_command_list_handle_t,
    ze_kernel_handle_t,
    *const ze_group_count_t,
    ze_event_handle_t,
    u32,
    *mut ze_event_handle_t,
) -> ZeResult;
pub type PFN_zeMemAllocDevice = unsafe extern "C" fn(
    ze_context_handle_t,
    *const ze_device_mem_alloc_desc_t,
    usize,
    usize,
    ze_device_handle_t,
    *mut *mut c_void,
) -> ZeResult;
pub type PFN_zeMemFree = unsafe extern "C" fn(ze_context_handle_t, *mut c_void) -> ZeResult;
pub type PFN_zeModuleCreate = unsafe extern "C" fn(
    ze_context_handle_t,
    ze_device_handle_t,
    *const ze_module_desc_t,
    *mut ze_module_handle_t,
    *mut ze_module_build_log_handle_t,
) -> ZeResult;
pub type PFN_zeModuleDestroy = unsafe extern "C" fn(ze_module_handle_t) -> ZeResult;
pub type PFN_zeModuleBuildLogGetString =
    unsafe extern "C" fn(ze_module_build_log_handle_t, *mut usize, *mut c_char) -> ZeResult;
pub type PFN_zeModuleBuildLogDestroy =
    unsafe extern "C" fn(ze_module_build_log_handle_t) -> ZeResult;
pub type PFN_zeKernelCreate = unsafe extern "C" fn(
    ze_module_handle_t,
    *const ze_kernel_desc_t,
    *mut ze_kernel_handle_t,
) -> ZeResult;
pub type PFN_zeKernelDestroy = unsafe extern "C" fn(ze_kernel_handle_t) -> ZeResult;
pub type PFN_zeKernelSetArgumentValue =
    unsafe extern "C" fn(ze_kernel_handle_t, u32, usize, *const c_void) -> ZeResult;
pub type PFN_zeKernelSetGroupSize =
    unsafe extern "C" fn(ze_kernel_handle_t, u32, u32, u32) -> ZeResult;
pub type PFN_zeKernelSuggestGroupSize = unsafe extern "C" fn(
    ze_kernel_handle_t,
    u32,
    u32,
    u32,
    *mut u32,
    *mut u32,
    *mut u32,
) -> ZeResult;
