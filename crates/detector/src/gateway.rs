//! Status emission gateway
//!
//! Turns the aggregator state into outgoing records and hands them to the
//! transport. Every evaluation produces a system record followed by the
//! record of the subsystem that was evaluated, whether or not any bit moved.

use serde::{Deserialize, Serialize};

use crate::error::DetectorResult;
use crate::flags::{ComponentFaultCode, FaultCategory, SystemFaultFlags};

/// Topic carrying the system fault word
pub const SYSTEM_FAULTS_TOPIC: &str = "/faults/system_faults_status";

/// Header shared by every status record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordHeader {
    /// Emission time (ns since epoch)
    pub timestamp_ns: u64,
    /// Reference frame label
    pub frame_id: String,
}

/// System-wide fault word
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemFaultsRecord {
    pub header: RecordHeader,
    /// Encoded system fault word
    pub value: u64,
}

impl SystemFaultsRecord {
    /// Decoded fault word; unknown bits are dropped
    pub fn flags(&self) -> SystemFaultFlags {
        SystemFaultFlags::from_bits_truncate(self.value as u16)
    }
}

/// Fault status of a single subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentFaultsRecord {
    pub header: RecordHeader,
    pub subsystem: FaultCategory,
    /// Encoded component fault code
    pub value: u32,
}

impl ComponentFaultsRecord {
    pub fn code(&self) -> Option<ComponentFaultCode> {
        ComponentFaultCode::from_value(self.value)
    }
}

/// Any outgoing record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StatusRecord {
    SystemFaults(SystemFaultsRecord),
    ComponentFaults(ComponentFaultsRecord),
}

impl StatusRecord {
    /// Topic the record belongs on
    pub fn topic(&self) -> &'static str {
        match self {
            StatusRecord::SystemFaults(_) => SYSTEM_FAULTS_TOPIC,
            StatusRecord::ComponentFaults(record) => record.subsystem.topic(),
        }
    }

    pub fn header(&self) -> &RecordHeader {
        match self {
            StatusRecord::SystemFaults(record) => &record.header,
            StatusRecord::ComponentFaults(record) => &record.header,
        }
    }
}

/// Outbound transport seam
pub trait StatusSink {
    /// Hand one record to the transport
    fn publish(&mut self, record: StatusRecord) -> DetectorResult<()>;
}

/// Sink that keeps every record in memory
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    records: Vec<StatusRecord>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[StatusRecord] {
        &self.records
    }

    /// Take all buffered records
    pub fn drain(&mut self) -> Vec<StatusRecord> {
        std::mem::take(&mut self.records)
    }

    /// Most recent system fault word, if any was published
    pub fn last_system_flags(&self) -> Option<SystemFaultFlags> {
        self.records.iter().rev().find_map(|record| match record {
            StatusRecord::SystemFaults(r) => Some(r.flags()),
            _ => None,
        })
    }

    /// Most recent record published for `category`
    pub fn last_component(&self, category: FaultCategory) -> Option<&ComponentFaultsRecord> {
        self.records.iter().rev().find_map(|record| match record {
            StatusRecord::ComponentFaults(r) if r.subsystem == category => Some(r),
            _ => None,
        })
    }
}

impl StatusSink for MemorySink {
    fn publish(&mut self, record: StatusRecord) -> DetectorResult<()> {
        self.records.push(record);
        Ok(())
    }
}

/// Builds status records and forwards them to a sink
#[derive(Debug)]
pub struct StatusGateway<S> {
    sink: S,
    frame_id: String,
}

impl<S: StatusSink> StatusGateway<S> {
    pub fn new(sink: S, frame_id: impl Into<String>) -> Self {
        Self {
            sink,
            frame_id: frame_id.into(),
        }
    }

    fn header(&self, timestamp_ns: u64) -> RecordHeader {
        RecordHeader {
            timestamp_ns,
            frame_id: self.frame_id.clone(),
        }
    }

    /// Publish the system word, then the record for `category`.
    pub fn emit(
        &mut self,
        timestamp_ns: u64,
        mask: SystemFaultFlags,
        category: FaultCategory,
        code: ComponentFaultCode,
    ) -> DetectorResult<()> {
        let system = StatusRecord::SystemFaults(SystemFaultsRecord {
            header: self.header(timestamp_ns),
            value: u64::from(mask.bits()),
        });
        let component = StatusRecord::ComponentFaults(ComponentFaultsRecord {
            header: self.header(timestamp_ns),
            subsystem: category,
            value: code.value(),
        });

        self.sink.publish(system)?;
        self.sink.publish(component)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
