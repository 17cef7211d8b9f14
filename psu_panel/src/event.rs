//! Presentation boundary.
//!
//! The panel consumes [`PanelEvent`]s from an [`EventSource`] and hands a
//! [`PanelSnapshot`] to a [`Presenter`] whenever displayed state changes.

use psu_common::panel::ids::{ControlId, IndicatorId, KnobId};
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::mpsc::{Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::debug;

/// Operator or timer input, handled strictly in arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    /// Wheel turned over a knob; `dz` raw units, positive is clockwise.
    Rotate {
        /// Knob under the pointer.
        knob: KnobId,
        /// Raw wheel delta.
        dz: i32,
    },
    /// Button released over a control.
    Release {
        /// Control under the pointer.
        control: ControlId,
    },
    /// Periodic indicator sampling.
    Tick,
    /// Leave the event loop.
    Shutdown,
}

/// Blocking source of panel events.
pub trait EventSource {
    /// Wait for the next event.
    fn next_event(&mut self) -> PanelEvent;
}

impl EventSource for Receiver<PanelEvent> {
    /// Every sender gone means nobody can ask for anything again.
    fn next_event(&mut self) -> PanelEvent {
        self.recv().unwrap_or(PanelEvent::Shutdown)
    }
}

impl EventSource for VecDeque<PanelEvent> {
    fn next_event(&mut self) -> PanelEvent {
        self.pop_front().unwrap_or(PanelEvent::Shutdown)
    }
}

/// Consumer of redraw snapshots.
pub trait Presenter {
    /// Show `snapshot`.
    fn redraw(&mut self, snapshot: &PanelSnapshot);
}

/// Everything a presentation layer needs to draw the panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    /// Panel title.
    pub title: String,
    /// Knobs in configuration order.
    pub knobs: Vec<KnobView>,
    /// Controls in configuration order.
    pub controls: Vec<ControlView>,
    /// Indicators in configuration order.
    pub indicators: Vec<IndicatorView>,
}

/// Displayed state of one knob.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KnobView {
    /// Logical id.
    pub id: KnobId,
    /// Title.
    pub title: String,
    /// Pointer angle [rad].
    pub angle: f64,
    /// Voltage setting [V].
    pub voltage: f64,
}

/// Displayed state of one control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlView {
    /// Logical id.
    pub id: ControlId,
    /// Title.
    pub title: String,
    /// Confirmed state.
    pub on: bool,
}

/// Displayed state of one indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorView {
    /// Logical id.
    pub id: IndicatorId,
    /// Title.
    pub title: String,
    /// Lamp lit.
    pub on: bool,
}

/// Send [`PanelEvent::Tick`] every `period` until the receiver is dropped.
pub fn spawn_ticker(tx: Sender<PanelEvent>, period: Duration) -> JoinHandle<()> {
    thread::spawn(move || {
        loop {
            thread::sleep(period);
            if tx.send(PanelEvent::Tick).is_err() {
                debug!("Ticker stopped: panel gone");
                break;
            }
        }
    })
}
