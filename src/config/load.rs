use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Result, TlsError};
use crate::protocol::constants::MAX_RECORD_PAYLOAD;
use crate::protocol::record::RecordCheck;

use super::types::*;

// ============= Main Config =============

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FrontConfig {
    #[serde(default)]
    pub general: GeneralConfig,

    #[serde(default)]
    pub handshake: HandshakeConfig,
}

impl FrontConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| TlsError::Config(e.to_string()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: FrontConfig =
            toml::from_str(content).map_err(|e| TlsError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let max = self.handshake.max_record_len;
        if max == 0 || max > MAX_RECORD_PAYLOAD {
            return Err(TlsError::Config(format!(
                "handshake.max_record_len must be in 1..={}, got {}",
                MAX_RECORD_PAYLOAD, max
            )));
        }

        if self.handshake.record_check == RecordCheck::Permissive {
            warn!("handshake.record_check = permissive; truncated or padded records will reach the decoder");
        }

        Ok(())
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| TlsError::Config(e.to_string()))
    }
}
