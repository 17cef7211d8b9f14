//! Line-oriented console front end.
//!
//! Commands, one per line:
//!
//! | Command          | Event |
//! |------------------|-------|
//! | `r <knob> <dz>`  | rotate knob by `dz` wheel units |
//! | `p <control>`    | press and release control |
//! | `t`              | poll indicators now |
//! | `q`              | shut down |

use crate::event::{PanelEvent, PanelSnapshot, Presenter};
use psu_common::panel::ids::{ControlId, KnobId};
use std::fmt::Write as _;
use std::io::{self, BufRead, Write};
use std::sync::mpsc::Sender;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

fn number<T: std::str::FromStr>(token: Option<&str>, what: &str) -> Result<T, String> {
    let token = token.ok_or_else(|| format!("missing {what}"))?;
    token
        .parse()
        .map_err(|_| format!("invalid {what} {token:?}"))
}

/// Parse one console line. Blank lines yield `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<PanelEvent>, String> {
    let mut tokens = line.split_whitespace();
    let Some(command) = tokens.next() else {
        return Ok(None);
    };

    let event = match command {
        "r" | "rotate" => PanelEvent::Rotate {
            knob: KnobId(number(tokens.next(), "knob id")?),
            dz: number(tokens.next(), "delta")?,
        },
        "p" | "press" => PanelEvent::Release {
            control: ControlId(number(tokens.next(), "control id")?),
        },
        "t" | "tick" => PanelEvent::Tick,
        "q" | "quit" => PanelEvent::Shutdown,
        other => return Err(format!("unknown command {other:?}")),
    };

    if let Some(extra) = tokens.next() {
        return Err(format!("unexpected argument {extra:?}"));
    }
    Ok(Some(event))
}

/// Forward parsed commands from `input` to `tx` until end of input,
/// a `q` command, or the panel goes away.
pub fn read_commands<R: BufRead>(input: R, tx: &Sender<PanelEvent>) {
    for line in input.lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                warn!("Console read failed: {}", e);
                break;
            }
        };
        match parse_command(&line) {
            Ok(Some(event)) => {
                if tx.send(event).is_err() {
                    break;
                }
                if event == PanelEvent::Shutdown {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => warn!("Console: {}", e),
        }
    }
    debug!("Console reader finished");
}

/// Read commands from stdin on a background thread.
pub fn spawn_stdin_reader(tx: Sender<PanelEvent>) -> JoinHandle<()> {
    thread::spawn(move || read_commands(io::stdin().lock(), &tx))
}

/// One-line text rendering of a snapshot.
pub fn format_snapshot(snapshot: &PanelSnapshot) -> String {
    let mut line = snapshot.title.clone();
    for knob in &snapshot.knobs {
        let _ = write!(
            line,
            " | {}: {:6.2} V @ {:.3} rad",
            knob.title, knob.voltage, knob.angle
        );
    }
    line.push_str(" |");
    for control in &snapshot.controls {
        let _ = write!(
            line,
            " [{}:{}]",
            control.title,
            if control.on { "on" } else { "off" }
        );
    }
    line.push_str(" |");
    for lamp in &snapshot.indicators {
        let _ = write!(line, " {}{}", if lamp.on { '*' } else { '.' }, lamp.title);
    }
    line
}

/// Prints one line per redraw, text or JSON.
pub struct ConsolePresenter<W: Write> {
    out: W,
    json: bool,
}

impl<W: Write> ConsolePresenter<W> {
    /// Presenter writing to `out`.
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    /// Recover the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn redraw(&mut self, snapshot: &PanelSnapshot) {
        let line = if self.json {
            match serde_json::to_string(snapshot) {
                Ok(line) => line,
                Err(e) => {
                    warn!("Snapshot serialization failed: {}", e);
                    return;
                }
            }
        } else {
            format_snapshot(snapshot)
        };

        if let Err(e) = writeln!(self.out, "{line}").and_then(|()| self.out.flush()) {
            warn!("Console write failed: {}", e);
        }
    }
}

// ── Tests ──
