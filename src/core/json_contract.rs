use serde::{Deserialize, Serialize};

use crate::core::trace::{BoxTrace, FunnelTrace};
use crate::error::{CalcError, CalcResult};

pub const TRACE_SPEC_JSON_SCHEMA_V1: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelTraceJsonContractV1 {
    pub schema_version: u32,
    pub trace: FunnelTrace,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxTraceJsonContractV1 {
    pub schema_version: u32,
    pub trace: BoxTrace,
}

impl FunnelTrace {
    pub fn to_json_contract_v1_pretty(&self) -> CalcResult<String> {
        let payload = FunnelTraceJsonContractV1 {
            schema_version: TRACE_SPEC_JSON_SCHEMA_V1,
            trace: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CalcError::InvalidConfig(format!("failed to serialize funnel trace contract v1: {e}"))
        })
    }

    /// Parses either a versioned contract payload or a bare trace object.
    ///
    /// The versioned form is tried first: every field of a bare trace is
    /// optional, so a bare parse would accept a contract payload and drop
    /// its contents.
    pub fn from_json_compat_str(input: &str) -> CalcResult<Self> {
        if let Ok(payload) = serde_json::from_str::<FunnelTraceJsonContractV1>(input) {
            if payload.schema_version != TRACE_SPEC_JSON_SCHEMA_V1 {
                return Err(CalcError::InvalidConfig(format!(
                    "unsupported funnel trace schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.trace);
        }
        serde_json::from_str(input).map_err(|e| {
            CalcError::InvalidConfig(format!("failed to parse funnel trace json payload: {e}"))
        })
    }
}

impl BoxTrace {
    pub fn to_json_contract_v1_pretty(&self) -> CalcResult<String> {
        let payload = BoxTraceJsonContractV1 {
            schema_version: TRACE_SPEC_JSON_SCHEMA_V1,
            trace: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            CalcError::InvalidConfig(format!("failed to serialize box trace contract v1: {e}"))
        })
    }

    /// Parses either a versioned contract payload or a bare trace object.
    pub fn from_json_compat_str(input: &str) -> CalcResult<Self> {
        if let Ok(payload) = serde_json::from_str::<BoxTraceJsonContractV1>(input) {
            if payload.schema_version != TRACE_SPEC_JSON_SCHEMA_V1 {
                return Err(CalcError::InvalidConfig(format!(
                    "unsupported box trace schema version: {}",
                    payload.schema_version
                )));
            }
            return Ok(payload.trace);
        }
        serde_json::from_str(input).map_err(|e| {
            CalcError::InvalidConfig(format!("failed to parse box trace json payload: {e}"))
        })
    }
}
