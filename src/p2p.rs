use serde::Serialize;
use std::fmt;

use crate::context::DeviceContext;
use crate::errors::ZeError;
use crate::ze::check;
use crate::ze::ffi::*;

/// What one device reports about reaching another over P2P.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct P2pCapability {
    pub from: u32,
    pub to: u32,
    pub can_access: bool,
    pub access: bool,
    pub atomics: bool,
}

impl P2pCapability {
    pub fn from_flags(from: u32, to: u32, can_access: bool, flags: u32) -> Self {
        Self {
            from,
            to,
            can_access,
            access: flags & ZE_DEVICE_P2P_PROPERTY_FLAG_ACCESS != 0,
            atomics: flags & ZE_DEVICE_P2P_PROPERTY_FLAG_ATOMICS != 0,
        }
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

impl fmt::Display for P2pCapability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "GPU {} -> GPU {}: can access peer = {}, P2P access = {}, P2P atomics = {}",
            self.from,
            self.to,
            yes_no(self.can_access),
            yes_no(self.access),
            yes_no(self.atomics)
        )
    }
}

/// Ask the driver whether `device` can reach `peer`'s memory.
pub fn query_p2p(device: &DeviceContext, peer: &DeviceContext) -> Result<P2pCapability, ZeError> {
    let api = &device.runtime().api;

    let mut can_access: ze_bool_t = 0;
    unsafe {
        check(
            "zeDeviceCanAccessPeer",
            (api.zeDeviceCanAccessPeer)(device.device(), peer.device(), &mut can_access),
        )?;
    }

    let mut props = ze_device_p2p_properties_t::default();
    unsafe {
        check(
            "zeDeviceGetP2PProperties",
            (api.zeDeviceGetP2PProperties)(device.device(), peer.device(), &mut props),
        )?;
    }

    Ok(P2pCapability::from_flags(
        device.ordinal(),
        peer.ordinal(),
        can_access != 0,
        props.flags,
    ))
}
