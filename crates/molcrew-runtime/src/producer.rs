//! The cancellable producer task behind one run.
//!
//! Emits the scripted events in order with fixed pacing. The cancel signal
//! is observed at every suspension point, so a superseded producer stops at
//! the next delay without emitting further events. Log appends are guarded
//! by run id: a cancelled producer can never write into a successor's log.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};
use uuid::Uuid;

use molcrew_common::error::{MolcrewError, Result};
use molcrew_common::stream::{MonitorEvent, RunEvent};

use crate::run::{RunLog, StreamPacing};
use crate::script::RunScript;

pub(crate) struct ProducerCtx {
    pub run_id: Uuid,
    pub event_tx: broadcast::Sender<RunEvent>,
    pub log: Arc<RwLock<RunLog>>,
    pub cancel: watch::Receiver<bool>,
    pub pacing: StreamPacing,
}

enum Exit {
    Completed,
    Cancelled,
}

pub(crate) async fn drive(script: RunScript, mut ctx: ProducerCtx) {
    let mut seq: u64 = 0;
    match drive_inner(script, &mut ctx, &mut seq).await {
        Ok(Exit::Completed) => info!("run {} completed after {} events", ctx.run_id, seq),
        Ok(Exit::Cancelled) => debug!("run {} cancelled at seq {}", ctx.run_id, seq),
        Err(err) => {
            warn!("run {} failed: {}", ctx.run_id, err);
            let _ = emit(
                &ctx,
                &mut seq,
                MonitorEvent::Notification {
                    level: "error".to_string(),
                    message: "Research crew failed. Please try again.".to_string(),
                },
            );
            let _ = mark_finished(&ctx);
        }
    }
}

async fn drive_inner(
    script: RunScript,
    ctx: &mut ProducerCtx,
    seq: &mut u64,
) -> Result<Exit> {
    emit(ctx, seq, MonitorEvent::RunStarted { goal: script.goal_label.clone() })?;

    for snapshot in script.snapshots {
        if !pause(&mut ctx.cancel, ctx.pacing.snapshot_delay).await {
            return Ok(Exit::Cancelled);
        }
        emit(ctx, seq, MonitorEvent::PropertySnapshot { snapshot })?;
    }

    for message in script.messages {
        if !pause(&mut ctx.cancel, ctx.pacing.message_delay).await {
            return Ok(Exit::Cancelled);
        }
        emit(ctx, seq, stamp(message))?;
    }

    mark_finished(ctx)?;
    emit(ctx, seq, MonitorEvent::RunFinished {})?;
    Ok(Exit::Completed)
}

/// Sleep for `delay`, returning false if the run was cancelled first.
async fn pause(cancel: &mut watch::Receiver<bool>, delay: Duration) -> bool {
    if *cancel.borrow() {
        return false;
    }
    tokio::select! {
        biased;
        // A value change or a dropped sender both mean this run is over.
        _ = cancel.changed() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}

/// Fill in the emission timestamp on thought messages.
fn stamp(message: MonitorEvent) -> MonitorEvent {
    match message {
        MonitorEvent::AgentThought { agent, message, timestamp: None } => {
            MonitorEvent::AgentThought {
                agent,
                message,
                timestamp: Some(Utc::now().timestamp_millis()),
            }
        }
        other => other,
    }
}

fn emit(ctx: &ProducerCtx, seq: &mut u64, event: MonitorEvent) -> Result<()> {
    let run_event = RunEvent {
        run_id: ctx.run_id,
        seq: *seq,
        event,
    };
    *seq += 1;

    {
        let mut log = ctx
            .log
            .write()
            .map_err(|_| MolcrewError::Stream("run log lock poisoned".to_string()))?;
        if log.run_id == Some(ctx.run_id) {
            log.events.push(run_event.clone());
        }
    }

    // No receivers connected is not an error for a broadcast.
    let _ = ctx.event_tx.send(run_event);
    Ok(())
}

fn mark_finished(ctx: &ProducerCtx) -> Result<()> {
    let mut log = ctx
        .log
        .write()
        .map_err(|_| MolcrewError::Stream("run log lock poisoned".to_string()))?;
    if log.run_id == Some(ctx.run_id) {
        log.running = false;
    }
    Ok(())
}
