//! Fault detector
//!
//! Event-driven facade over the tracker, evaluators, aggregator and gateway.
//! Each handler runs to completion: it updates cached inputs, re-evaluates
//! the affected subsystem, updates the fault word and emits the system and
//! subsystem records. Handlers take `&mut self`; hosts that deliver events
//! from several threads must serialize access (e.g. behind a `Mutex`).

use std::time::Duration;

use faultwatch_core::{DetectorConfig, Thresholds};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::aggregator::{FaultAggregator, Transition};
use crate::clock::{Clock, SystemClock};
use crate::error::DetectorResult;
use crate::evaluators::{AntennaAxisState, ArmEvaluator, CameraTriggerState, PowerState};
use crate::events::{AntennaAxis, ArmControllerState, ArmJointStates, TelemetryEvent};
use crate::flags::{ComponentFaultCode, FaultCategory, PowerFaultFlags};
use crate::gateway::{StatusGateway, StatusSink};
use crate::tracker::JointTelemetryTracker;

/// Point-in-time view of the fault words
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FaultSnapshot {
    /// Encoded system fault word
    pub system: u16,
    /// Encoded power detail word
    pub power: u8,
    pub arm: ComponentFaultCode,
    pub pan_tilt: ComponentFaultCode,
    pub camera: ComponentFaultCode,
    pub power_system: ComponentFaultCode,
}

/// Continuous fault detector for the arm, antenna, camera and power subsystems
pub struct FaultDetector<S, C = SystemClock> {
    thresholds: Thresholds,
    camera_check_interval: Duration,
    arm: ArmEvaluator,
    tracker: JointTelemetryTracker,
    pan: AntennaAxisState,
    tilt: AntennaAxisState,
    camera: CameraTriggerState,
    power: PowerState,
    aggregator: FaultAggregator,
    gateway: StatusGateway<S>,
    clock: C,
}

impl<S: StatusSink> FaultDetector<S, SystemClock> {
    /// Create a detector stamping records with the wall clock
    pub fn new(config: &DetectorConfig, sink: S) -> DetectorResult<Self> {
        Self::with_clock(config, sink, SystemClock)
    }
}

impl<S: StatusSink, C: Clock> FaultDetector<S, C> {
    /// Create a detector with an explicit time source
    pub fn with_clock(config: &DetectorConfig, sink: S, clock: C) -> DetectorResult<Self> {
        let arm = ArmEvaluator::from_names(&config.watched_joints)?;
        debug!(
            watched = ?arm.watched(),
            frame_id = %config.frame_id,
            "fault detector configured"
        );

        Ok(Self {
            thresholds: config.thresholds,
            camera_check_interval: Duration::from_millis(config.camera_check_interval_ms),
            arm,
            tracker: JointTelemetryTracker::new(),
            pan: AntennaAxisState::default(),
            tilt: AntennaAxisState::default(),
            camera: CameraTriggerState::default(),
            power: PowerState::default(),
            aggregator: FaultAggregator::new(),
            gateway: StatusGateway::new(sink, config.frame_id.clone()),
            clock,
        })
    }

    /// Dispatch one inbound event
    pub fn handle(&mut self, event: TelemetryEvent) -> DetectorResult<()> {
        match event {
            TelemetryEvent::ArmJointStates(msg) => self.on_arm_joint_states(&msg),
            TelemetryEvent::ArmControllerState(msg) => self.on_arm_controller_state(&msg),
            TelemetryEvent::AntennaPanCommand { value } => {
                self.on_antenna_command(AntennaAxis::Pan, value)
            }
            TelemetryEvent::AntennaTiltCommand { value } => {
                self.on_antenna_command(AntennaAxis::Tilt, value)
            }
            TelemetryEvent::AntennaPanState { set_point } => {
                self.on_antenna_state(AntennaAxis::Pan, set_point);
                Ok(())
            }
            TelemetryEvent::AntennaTiltState { set_point } => {
                self.on_antenna_state(AntennaAxis::Tilt, set_point);
                Ok(())
            }
            TelemetryEvent::CameraTriggerOriginal { stamp_ns } => {
                self.on_camera_trigger_original(stamp_ns);
                Ok(())
            }
            TelemetryEvent::CameraTrigger { stamp_ns } => {
                self.on_camera_trigger(stamp_ns);
                Ok(())
            }
            TelemetryEvent::PowerStateOfCharge { value } => self.on_power_soc(value),
            TelemetryEvent::PowerTemperature { value } => self.on_power_temperature(value),
        }
    }

    /// Joint state telemetry: resolve indices once, then evaluate the arm.
    ///
    /// Records with mismatched sequence lengths are rejected before any state
    /// changes and nothing is emitted for them.
    pub fn on_arm_joint_states(&mut self, msg: &ArmJointStates) -> DetectorResult<()> {
        if let Err(err) = msg.validate() {
            warn!(error = %err, "rejecting joint state record");
            return Err(err);
        }

        if self.tracker.resolve_indices(&msg.name) {
            debug!(joints = msg.name.len(), "joint indices resolved");
        }
        self.tracker.observe(&msg.name, &msg.position, &msg.effort);

        let faulted = self.arm.evaluate(&self.tracker, msg, &self.thresholds);
        self.publish(FaultCategory::Arm, faulted)
    }

    /// Arm controller feedback. Kept as context only; no fault decision
    /// depends on it and nothing is emitted.
    pub fn on_arm_controller_state(&mut self, msg: &ArmControllerState) -> DetectorResult<()> {
        self.tracker
            .update_commanded(&msg.joint_names, &msg.actual_positions)
            .inspect_err(|err| warn!(error = %err, "rejecting arm controller record"))
    }

    /// Antenna command: evaluate the axis against its set-point.
    pub fn on_antenna_command(&mut self, axis: AntennaAxis, command: f64) -> DetectorResult<()> {
        let faulted = self.axis_mut(axis).record_command(command);
        debug!(?axis, command, faulted, "antenna command evaluated");
        self.publish(FaultCategory::PanTilt, faulted)
    }

    /// Antenna controller state: cache the set-point for the next command.
    pub fn on_antenna_state(&mut self, axis: AntennaAxis, set_point: f64) {
        self.axis_mut(axis).record_set_point(set_point);
    }

    /// Reference camera trigger, stamped on receipt when no stamp is given
    pub fn on_camera_trigger_original(&mut self, stamp_ns: Option<u64>) {
        let stamp = stamp_ns.unwrap_or_else(|| self.clock.now_ns());
        self.camera.record_original(stamp);
    }

    /// Delivered camera trigger, stamped on receipt when no stamp is given
    pub fn on_camera_trigger(&mut self, stamp_ns: Option<u64>) {
        let stamp = stamp_ns.unwrap_or_else(|| self.clock.now_ns());
        self.camera.record_actual(stamp);
    }

    /// Periodic camera check: compare the two latest trigger stamps.
    pub fn on_camera_check(&mut self) -> DetectorResult<()> {
        let faulted = self.camera.is_faulted();
        self.publish(FaultCategory::Camera, faulted)
    }

    /// Battery state of charge sample
    pub fn on_power_soc(&mut self, soc: f64) -> DetectorResult<()> {
        self.power.record_soc(soc, &self.thresholds);
        debug!(soc, soc_fault = self.power.soc_fault, "state of charge evaluated");
        self.publish_power()
    }

    /// Battery temperature sample
    pub fn on_power_temperature(&mut self, temperature: f64) -> DetectorResult<()> {
        self.power.record_temperature(temperature, &self.thresholds);
        debug!(
            temperature,
            temperature_fault = self.power.temperature_fault,
            "battery temperature evaluated"
        );
        self.publish_power()
    }

    fn publish_power(&mut self) -> DetectorResult<()> {
        self.aggregator
            .apply_power_detail(PowerFaultFlags::THERMAL, self.power.temperature_fault);
        self.publish(FaultCategory::Power, self.power.is_faulted())
    }

    fn publish(&mut self, category: FaultCategory, faulted: bool) -> DetectorResult<()> {
        let transition = self.aggregator.apply_result(category, faulted);
        let mask = self.aggregator.current_mask();

        match transition {
            Transition::Raised => warn!(
                category = category.as_str(),
                mask = mask.bits(),
                "subsystem fault raised"
            ),
            Transition::Cleared => info!(
                category = category.as_str(),
                mask = mask.bits(),
                "subsystem fault cleared"
            ),
            Transition::Unchanged => debug!(
                category = category.as_str(),
                faulted,
                mask = mask.bits(),
                "subsystem evaluated"
            ),
        }

        let now = self.clock.now_ns();
        self.gateway
            .emit(now, mask, category, ComponentFaultCode::from_faulted(faulted))
    }

    fn axis_mut(&mut self, axis: AntennaAxis) -> &mut AntennaAxisState {
        match axis {
            AntennaAxis::Pan => &mut self.pan,
            AntennaAxis::Tilt => &mut self.tilt,
        }
    }

    /// Current fault words and component codes
    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            system: self.aggregator.current_mask().bits(),
            power: self.aggregator.power_mask().bits(),
            arm: self.aggregator.component_code(FaultCategory::Arm),
            pan_tilt: self.aggregator.component_code(FaultCategory::PanTilt),
            camera: self.aggregator.component_code(FaultCategory::Camera),
            power_system: self.aggregator.component_code(FaultCategory::Power),
        }
    }

    pub fn aggregator(&self) -> &FaultAggregator {
        &self.aggregator
    }

    pub fn tracker(&self) -> &JointTelemetryTracker {
        &self.tracker
    }

    pub fn power_state(&self) -> &PowerState {
        &self.power
    }

    pub fn antenna_state(&self, axis: AntennaAxis) -> &AntennaAxisState {
        match axis {
            AntennaAxis::Pan => &self.pan,
            AntennaAxis::Tilt => &self.tilt,
        }
    }

    pub fn camera_state(&self) -> &CameraTriggerState {
        &self.camera
    }

    /// Cadence the host must call [`Self::on_camera_check`] at
    pub fn camera_check_interval(&self) -> Duration {
        self.camera_check_interval
    }

    pub fn sink(&self) -> &S {
        self.gateway.sink()
    }

    pub fn sink_mut(&mut self) -> &mut S {
        self.gateway.sink_mut()
    }

    pub fn into_sink(self) -> S {
        self.gateway.into_sink()
    }
}
