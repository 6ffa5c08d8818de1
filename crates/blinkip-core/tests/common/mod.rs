//! Test doubles and common utilities for blink contract tests
//!
//! The doubles record what happened and when, using tokio's clock so tests
//! running with a paused clock see exact virtual timestamps.

#![allow(dead_code)]

use blinkip_core::error::{Error, Result};
use blinkip_core::traits::{AddressProbe, OutputSink, SignalLevel};
use std::collections::VecDeque;
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::Instant;

/// Something the sink was asked to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkAction {
    Write(SignalLevel),
    Handoff(String),
}

/// A sink action with the virtual time it happened at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkEvent {
    pub at: Duration,
    pub action: SinkAction,
}

/// Shared log of everything a [`RecordingSink`] saw
#[derive(Debug, Clone)]
pub struct SinkLog {
    start: Instant,
    events: Arc<Mutex<Vec<SinkEvent>>>,
}

impl SinkLog {
    pub fn events(&self) -> Vec<SinkEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Levels written, in order
    pub fn levels(&self) -> Vec<SignalLevel> {
        self.events()
            .into_iter()
            .filter_map(|e| match e.action {
                SinkAction::Write(level) => Some(level),
                SinkAction::Handoff(_) => None,
            })
            .collect()
    }

    /// Trigger modes handed off, in order
    pub fn handoffs(&self) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e.action {
                SinkAction::Handoff(mode) => Some(mode),
                SinkAction::Write(_) => None,
            })
            .collect()
    }

    fn push(&self, action: SinkAction) {
        self.events.lock().unwrap().push(SinkEvent {
            at: self.start.elapsed(),
            action,
        });
    }
}

/// A sink that records writes and handoffs
pub struct RecordingSink {
    log: SinkLog,
}

impl RecordingSink {
    pub fn new() -> (Self, SinkLog) {
        let log = SinkLog {
            start: Instant::now(),
            events: Arc::new(Mutex::new(Vec::new())),
        };
        (Self { log: log.clone() }, log)
    }
}

#[async_trait::async_trait]
impl OutputSink for RecordingSink {
    async fn write_level(&mut self, level: SignalLevel) -> Result<()> {
        self.log.push(SinkAction::Write(level));
        Ok(())
    }

    async fn hand_off_trigger(&mut self, mode: &str) -> Result<()> {
        self.log.push(SinkAction::Handoff(mode.to_string()));
        Ok(())
    }
}

/// A recording sink whose writes start failing after `ok_writes` writes
pub struct FailingSink {
    inner: RecordingSink,
    ok_writes: usize,
    writes: usize,
}

impl FailingSink {
    pub fn new(ok_writes: usize) -> (Self, SinkLog) {
        let (inner, log) = RecordingSink::new();
        (
            Self {
                inner,
                ok_writes,
                writes: 0,
            },
            log,
        )
    }
}

#[async_trait::async_trait]
impl OutputSink for FailingSink {
    async fn write_level(&mut self, level: SignalLevel) -> Result<()> {
        self.writes += 1;
        if self.writes > self.ok_writes {
            return Err(Error::DeviceWrite(std::io::Error::other("LED went away")));
        }
        self.inner.write_level(level).await
    }

    async fn hand_off_trigger(&mut self, mode: &str) -> Result<()> {
        self.inner.hand_off_trigger(mode).await
    }
}

/// A probe that replays a fixed script of samples
///
/// `None` entries fail with `RoutingUnavailable`. Once the script is
/// exhausted the last entry repeats.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Option<Ipv4Addr>>>,
    last: Mutex<Option<Ipv4Addr>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedProbe {
    pub fn new(script: impl IntoIterator<Item = Option<Ipv4Addr>>) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let probe = Self {
            script: Mutex::new(script.into_iter().collect()),
            last: Mutex::new(None),
            calls: Arc::clone(&calls),
        };
        (probe, calls)
    }
}

#[async_trait::async_trait]
impl AddressProbe for ScriptedProbe {
    async fn local_address(&self) -> Result<Ipv4Addr> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let next = match self.script.lock().unwrap().pop_front() {
            Some(sample) => {
                *self.last.lock().unwrap() = sample;
                sample
            }
            None => *self.last.lock().unwrap(),
        };

        next.ok_or_else(|| Error::routing("Network is unreachable"))
    }
}

pub fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}
