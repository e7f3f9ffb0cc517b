use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use tracing::info;

use crate::config::Config;
use crate::context::DeviceInfo;
use crate::errors::P2pError;
use crate::p2p::P2pCapability;
use crate::verify::CopyCheck;

/// Everything a run observed, in a form that can be archived as JSON.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub generated_at: DateTime<Utc>,
    pub config: Config,
    pub devices: Vec<DeviceInfo>,
    pub p2p: Vec<P2pCapability>,
    pub checks: Vec<CopyCheck>,
}

impl RunReport {
    pub fn new(config: Config) -> Self {
        Self {
            generated_at: Utc::now(),
            config,
            devices: Vec::new(),
            p2p: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn passed(&self) -> bool {
        self.checks.iter().all(CopyCheck::passed)
    }

    /// Turn the first failed check into an error.
    pub fn into_result(self) -> Result<Self, P2pError> {
        if let Some(failed) = self.checks.iter().find(|c| !c.passed()) {
            failed.clone().into_result()?;
        }
        Ok(self)
    }

    pub fn to_json(&self) -> Result<String, P2pError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write(&self, path: &Path) -> Result<(), P2pError> {
        let json = self.to_json()?;
        std::fs::write(path, json).map_err(|source| P2pError::ReportIo {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Wrote run report to {}", path.display());
        Ok(())
    }
}
