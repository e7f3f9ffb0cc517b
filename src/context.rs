use serde::Serialize;
use std::ffi::CStr;
use std::os::raw::c_void;
use std::ptr;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::buffer::{element_bytes, format_preview, DeviceBuffer, PREVIEW_EDGE};
use crate::errors::{P2pError, ZeError};
use crate::kernel::{Kernel, KernelModule};
use crate::ze::ffi::*;
use crate::ze::{check, ZeApi, ZeRuntime};

const BUFFER_ALIGNMENT: usize = 64;

/// Static description of a device, as reported by the driver.
#[derive(Debug, Clone, Serialize)]
pub struct DeviceInfo {
    pub ordinal: u32,
    pub name: String,
    pub vendor_id: u32,
    pub device_id: u32,
    pub uuid: String,
    pub max_mem_alloc_size: u64,
}

impl DeviceInfo {
    fn from_properties(ordinal: u32, props: &ze_device_properties_t) -> Self {
        // The driver NUL-terminates the name; fall back to empty if it doesn't.
        let name_bytes: Vec<u8> = props.name.iter().map(|&c| c as u8).collect();
        let name = CStr::from_bytes_until_nul(&name_bytes)
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        let uuid = props.uuid.id.iter().map(|b| format!("{:02x}", b)).collect();

        Self {
            ordinal,
            name,
            vendor_id: props.vendorId,
            device_id: props.deviceId,
            uuid,
            max_mem_alloc_size: props.maxMemAllocSize,
        }
    }
}

/// One device plus the queue and command list used to drive it.
///
/// Every submission is synchronous: commands are recorded, executed and
/// waited on before the call returns.
pub struct DeviceContext {
    rt: Rc<ZeRuntime>,
    device: ze_device_handle_t,
    info: DeviceInfo,
    queue: ze_command_queue_handle_t,
    list: ze_command_list_handle_t,
}

impl DeviceContext {
    pub fn open(rt: &Rc<ZeRuntime>, ordinal: u32) -> Result<Self, P2pError> {
        let devices = rt.devices()?;
        let device = *devices
            .get(ordinal as usize)
            .ok_or(P2pError::DeviceNotFound {
                ordinal,
                available: devices.len() as u32,
            })?;
        let api = &rt.api;

        let mut props = ze_device_properties_t::default();
        unsafe {
            check("zeDeviceGetProperties", (api.zeDeviceGetProperties)(device, &mut props))?;
        }
        let info = DeviceInfo::from_properties(ordinal, &props);

        let queue_desc = ze_command_queue_desc_t {
            stype: ZE_STRUCTURE_TYPE_COMMAND_QUEUE_DESC,
            pNext: ptr::null(),
            ordinal: 0,
            index: 0,
            flags: 0,
            mode: ZE_COMMAND_QUEUE_MODE_DEFAULT,
            priority: ZE_COMMAND_QUEUE_PRIORITY_NORMAL,
        };
        let mut queue = ptr::null_mut();
        unsafe {
            check(
                "zeCommandQueueCreate",
                (api.zeCommandQueueCreate)(rt.context, device, &queue_desc, &mut queue),
            )?;
        }

        let list_desc = ze_command_list_desc_t {
            stype: ZE_STRUCTURE_TYPE_COMMAND_LIST_DESC,
            pNext: ptr::null(),
            commandQueueGroupOrdinal: 0,
            flags: 0,
        };
        let mut list = ptr::null_mut();
        let created = unsafe {
            check(
                "zeCommandListCreate",
                (api.zeCommandListCreate)(rt.context, device, &list_desc, &mut list),
            )
        };
        if let Err(e) = created {
            unsafe {
                (api.zeCommandQueueDestroy)(queue);
            }
            return Err(e.into());
        }

        info!(
            "Opened GPU {}: {} (vendor 0x{:04x}, device 0x{:04x})",
            ordinal, info.name, info.vendor_id, info.device_id
        );

        Ok(Self {
            rt: Rc::clone(rt),
            device,
            info,
            queue,
            list,
        })
    }

    pub fn device(&self) -> ze_device_handle_t {
        self.device
    }

    pub fn info(&self) -> &DeviceInfo {
        &self.info
    }

    pub fn ordinal(&self) -> u32 {
        self.info.ordinal
    }

    pub fn runtime(&self) -> &Rc<ZeRuntime> {
        &self.rt
    }

    /// Record commands with `record`, then execute them and wait.
    ///
    /// The list is reset afterwards whether or not recording succeeded.
    fn submit<F>(&self, record: F) -> Result<(), ZeError>
    where
        F: FnOnce(&ZeApi, ze_command_list_handle_t) -> Result<(), ZeError>,
    {
        let api = &self.rt.api;
        let result = record(api, self.list).and_then(|()| unsafe {
            check("zeCommandListClose", (api.zeCommandListClose)(self.list))?;
            let mut lists = [self.list];
            check(
                "zeCommandQueueExecuteCommandLists",
                (api.zeCommandQueueExecuteCommandLists)(
                    self.queue,
                    1,
                    lists.as_mut_ptr(),
                    ptr::null_mut(),
                ),
            )?;
            check(
                "zeCommandQueueSynchronize",
                (api.zeCommandQueueSynchronize)(self.queue, u64::MAX),
            )
        });
        let reset = unsafe { check("zeCommandListReset", (api.zeCommandListReset)(self.list)) };
        result.and(reset)
    }

    /// Allocate `count` i32 elements of device memory, all set to `fill`.
    pub fn create_buffer(&self, count: u32, fill: i32) -> Result<DeviceBuffer, P2pError> {
        let bytes = element_bytes(count).ok_or(P2pError::BufferTooLarge { count })?;
        let len = count as usize;
        let desc = ze_device_mem_alloc_desc_t {
            stype: ZE_STRUCTURE_TYPE_DEVICE_MEM_ALLOC_DESC,
            pNext: ptr::null(),
            flags: 0,
            ordinal: 0,
        };
        let mut raw: *mut c_void = ptr::null_mut();
        unsafe {
            check(
                "zeMemAllocDevice",
                (self.rt.api.zeMemAllocDevice)(
                    self.rt.context,
                    &desc,
                    bytes,
                    BUFFER_ALIGNMENT,
                    self.device,
                    &mut raw,
                ),
            )?;
        }
        let buffer = DeviceBuffer::from_raw(Rc::clone(&self.rt), raw, len, self.ordinal());
        debug!("Allocated {} bytes on GPU {} at {:p}", bytes, self.ordinal(), raw);

        self.fill_buffer(&buffer, fill)?;
        Ok(buffer)
    }

    /// Set every element of `buffer` to `value`.
    pub fn fill_buffer(&self, buffer: &DeviceBuffer, value: i32) -> Result<(), ZeError> {
        self.submit(|api, list| unsafe {
            check(
                "zeCommandListAppendMemoryFill",
                (api.zeCommandListAppendMemoryFill)(
                    list,
                    buffer.as_ptr(),
                    &value as *const i32 as *const c_void,
                    std::mem::size_of::<i32>(),
                    buffer.size_bytes(),
                    ptr::null_mut(),
                    0,
                    ptr::null_mut(),
                ),
            )
        })
    }

    /// Copy `buffer` back to the host.
    pub fn read_buffer(&self, buffer: &DeviceBuffer) -> Result<Vec<i32>, ZeError> {
        let mut host = vec![0i32; buffer.len()];
        self.submit(|api, list| unsafe {
            check(
                "zeCommandListAppendMemoryCopy",
                (api.zeCommandListAppendMemoryCopy)(
                    list,
                    host.as_mut_ptr() as *mut c_void,
                    buffer.as_ptr() as *const c_void,
                    buffer.size_bytes(),
                    ptr::null_mut(),
                    0,
                    ptr::null_mut(),
                ),
            )
        })?;
        Ok(host)
    }

    /// Read `buffer` back, print a preview and return the contents.
    pub fn print_buffer(&self, buffer: &DeviceBuffer) -> Result<Vec<i32>, ZeError> {
        let values = self.read_buffer(buffer)?;
        println!(
            "buffer {:p} on GPU {} [{} x i32]: {}",
            buffer.as_ptr(),
            buffer.ordinal(),
            values.len(),
            format_preview(&values, PREVIEW_EDGE)
        );
        Ok(values)
    }

    /// Make a buffer (typically one owned by the peer) resident on this device.
    pub fn make_resident(&self, buffer: &DeviceBuffer) -> Result<(), ZeError> {
        unsafe {
            check(
                "zeContextMakeMemoryResident",
                (self.rt.api.zeContextMakeMemoryResident)(
                    self.rt.context,
                    self.device,
                    buffer.as_ptr(),
                    buffer.size_bytes(),
                ),
            )
        }
    }

    /// Launch `name` from `module` on this device with `(remote, local)` as
    /// arguments, one work-item per element, and wait for it to finish.
    pub fn run_kernel(
        &self,
        module: &KernelModule,
        name: &str,
        remote: &DeviceBuffer,
        local: &DeviceBuffer,
    ) -> Result<(), P2pError> {
        if remote.len() != local.len() {
            return Err(P2pError::LengthMismatch {
                local: local.len(),
                remote: remote.len(),
            });
        }
        let count = local.len() as u32;

        let kernel = Kernel::create(module, name)?;
        let group_size = kernel.suggest_group_size(count)?;
        if group_size == 0 || count % group_size != 0 {
            return Err(P2pError::GroupSize { group_size, count });
        }
        kernel.set_group_size(group_size)?;
        kernel.set_pointer_arg(0, remote.as_ptr())?;
        kernel.set_pointer_arg(1, local.as_ptr())?;

        let groups = ze_group_count_t {
            groupCountX: count / group_size,
            groupCountY: 1,
            groupCountZ: 1,
        };
        debug!(
            "Launching {} from {} on GPU {}: {} group(s) of {}",
            kernel.name(),
            module.path().display(),
            self.ordinal(),
            groups.groupCountX,
            group_size
        );

        self.submit(|api, list| unsafe {
            check(
                "zeCommandListAppendLaunchKernel",
                (api.zeCommandListAppendLaunchKernel)(
                    list,
                    kernel.handle(),
                    &groups,
                    ptr::null_mut(),
                    0,
                    ptr::null_mut(),
                ),
            )
        })?;
        Ok(())
    }
}

impl Drop for DeviceContext {
    fn drop(&mut self) {
        let api = &self.rt.api;
        let list = unsafe { (api.zeCommandListDestroy)(self.list) };
        if let Err(e) = check("zeCommandListDestroy", list) {
            warn!("{}", e);
        }
        let queue = unsafe { (api.zeCommandQueueDestroy)(self.queue) };
        if let Err(e) = check("zeCommandQueueDestroy", queue) {
            warn!("{}", e);
        }
        debug!("Closed GPU {}", self.info.ordinal);
    }
}
