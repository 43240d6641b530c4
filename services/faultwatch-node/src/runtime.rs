//! Single-threaded event loop
//!
//! Reads telemetry events as JSON lines, feeds them to the detector, runs the
//! periodic camera check and writes every published status record to the
//! output as one JSON line.

use std::future::Future;
use std::io;

use faultwatch_detector::{Clock, FaultDetector, MemorySink, StatusRecord, TelemetryEvent};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Counters reported when the loop stops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunStats {
    /// Events accepted by the detector
    pub events: u64,
    /// Lines that failed to parse or were rejected by the detector
    pub rejected: u64,
    /// Camera checks performed
    pub camera_checks: u64,
    /// Status records written to the output
    pub records: u64,
}

/// Outbound line: the record plus the topic it belongs on
#[derive(Serialize)]
struct OutboundRecord<'a> {
    topic: &'static str,
    #[serde(flatten)]
    record: &'a StatusRecord,
}

/// Drive `detector` until the input closes or `shutdown` resolves.
pub async fn run<C, R, W, F>(
    mut detector: FaultDetector<MemorySink, C>,
    input: R,
    mut output: W,
    shutdown: F,
) -> anyhow::Result<RunStats>
where
    C: Clock,
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
    F: Future<Output = ()>,
{
    let mut stats = RunStats::default();
    let mut lines = BufReader::new(input).lines();

    let period = detector.camera_check_interval();
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tokio::pin!(shutdown);
    info!(camera_check_ms = period.as_millis() as u64, "fault detector running");

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("shutdown requested");
                break;
            }
            _ = ticker.tick() => {
                stats.camera_checks += 1;
                if let Err(err) = detector.on_camera_check() {
                    warn!(error = %err, "camera check failed");
                }
            }
            line = lines.next_line() => {
                match line {
                    Ok(Some(line)) => handle_line(&mut detector, &line, &mut stats),
                    Ok(None) => {
                        info!("input closed");
                        break;
                    }
                    Err(err) if err.kind() == io::ErrorKind::InvalidData => {
                        warn!(error = %err, "skipping input line that is not valid UTF-8");
                        stats.rejected += 1;
                    }
                    Err(err) => return Err(err.into()),
                }
            }
        }

        stats.records += write_records(detector.sink_mut(), &mut output).await?;
    }

    stats.records += write_records(detector.sink_mut(), &mut output).await?;
    info!(
        events = stats.events,
        rejected = stats.rejected,
        camera_checks = stats.camera_checks,
        records = stats.records,
        "fault detector stopped"
    );
    Ok(stats)
}

fn handle_line<C: Clock>(
    detector: &mut FaultDetector<MemorySink, C>,
    line: &str,
    stats: &mut RunStats,
) {
    let line = line.trim();
    if line.is_empty() {
        return;
    }

    let event: TelemetryEvent = match serde_json::from_str(line) {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "skipping malformed input line");
            stats.rejected += 1;
            return;
        }
    };

    let kind = event.kind();
    match detector.handle(event) {
        Ok(()) => {
            debug!(kind, "event handled");
            stats.events += 1;
        }
        Err(err) => {
            warn!(kind, error = %err, "event rejected");
            stats.rejected += 1;
        }
    }
}

async fn write_records<W: AsyncWrite + Unpin>(
    sink: &mut MemorySink,
    output: &mut W,
) -> anyhow::Result<u64> {
    let records = sink.drain();
    if records.is_empty() {
        return Ok(0);
    }

    for record in &records {
        let line = serde_json::to_string(&OutboundRecord {
            topic: record.topic(),
            record,
        })?;
        output.write_all(line.as_bytes()).await?;
        output.write_all(b"\n").await?;
    }
    output.flush().await?;
    Ok(records.len() as u64)
}
