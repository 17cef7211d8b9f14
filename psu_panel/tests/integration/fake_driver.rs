//! Recording fake driver and configuration fixtures.

use psu_common::config::ConfigLoader;
use psu_common::io::capabilities::DeviceCapabilities;
use psu_common::io::channel_map::ChannelMap;
use psu_common::io::driver::{ChannelKind, DriverError, DriverFeatures, IoDriver, Level};
use psu_common::panel::config::PanelConfig;
use psu_hal::drivers::wiring::{CAPABILITIES, CHANNEL_MAP};
use psu_panel::event::{PanelSnapshot, Presenter};
use psu_panel::panel::Panel;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

/// One driver invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    ReadAnalog(u32),
    WriteAnalog {
        channel: u32,
        value: f64,
        v_max: f64,
        v_min: f64,
    },
    WriteDigital(u32, Level),
}

/// Shared, inspectable driver state.
#[derive(Debug, Default)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub samples: HashMap<u32, f64>,
    pub failing_reads: HashSet<u32>,
    pub pinned_reads: HashSet<u32>,
    pub fail_analog_writes: bool,
    pub fail_digital_writes: bool,
}

#[derive(Clone, Default)]
pub struct FakeHandle(Arc<Mutex<FakeState>>);

impl FakeHandle {
    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.0.lock().unwrap()
    }

    pub fn set_sample(&self, channel: u32, value: f64) {
        self.state().samples.insert(channel, value);
    }

    pub fn fail_read(&self, channel: u32, fail: bool) {
        let mut state = self.state();
        if fail {
            state.failing_reads.insert(channel);
        } else {
            state.failing_reads.remove(&channel);
        }
    }

    /// Report `channel` as stuck at a rail of the input range.
    pub fn pin_read(&self, channel: u32, pinned: bool) {
        let mut state = self.state();
        if pinned {
            state.pinned_reads.insert(channel);
        } else {
            state.pinned_reads.remove(&channel);
        }
    }

    pub fn analog_writes(&self) -> Vec<(u32, f64, f64, f64)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match *c {
                Call::WriteAnalog {
                    channel,
                    value,
                    v_max,
                    v_min,
                } => Some((channel, value, v_max, v_min)),
                _ => None,
            })
            .collect()
    }

    pub fn digital_writes(&self) -> Vec<(u32, Level)> {
        self.state()
            .calls
            .iter()
            .filter_map(|c| match *c {
                Call::WriteDigital(ch, level) => Some((ch, level)),
                _ => None,
            })
            .collect()
    }
}

pub struct FakeDriver {
    handle: FakeHandle,
}

impl IoDriver for FakeDriver {
    fn name(&self) -> &'static str {
        "fake"
    }

    fn version(&self) -> &'static str {
        "0.0.0"
    }

    fn features(&self) -> DriverFeatures {
        DriverFeatures::REQUIRED
    }

    fn capabilities(&self) -> &DeviceCapabilities {
        &CAPABILITIES
    }

    fn channel_map(&self) -> &ChannelMap {
        &CHANNEL_MAP
    }

    fn init(&mut self, _config: &PanelConfig) -> Result<(), DriverError> {
        Ok(())
    }

    fn ready(&self) -> bool {
        true
    }

    fn read_analog(&mut self, channel: u32) -> Result<f64, DriverError> {
        let mut state = self.handle.state();
        state.calls.push(Call::ReadAnalog(channel));
        CAPABILITIES.check_channel(ChannelKind::AnalogInput, channel)?;
        if state.failing_reads.contains(&channel) {
            return Err(DriverError::Io {
                kind: ChannelKind::AnalogInput,
                channel,
                message: "EIO".to_string(),
            });
        }
        if state.pinned_reads.contains(&channel) {
            return Err(DriverError::SampleOutOfRange {
                channel,
                min: CAPABILITIES.analog_input_range.min,
                max: CAPABILITIES.analog_input_range.max,
            });
        }
        Ok(state.samples.get(&channel).copied().unwrap_or(0.0))
    }

    fn write_analog(
        &mut self,
        channel: u32,
        value: f64,
        v_max: f64,
        v_min: f64,
    ) -> Result<(), DriverError> {
        let mut state = self.handle.state();
        state.calls.push(Call::WriteAnalog {
            channel,
            value,
            v_max,
            v_min,
        });
        CAPABILITIES.check_channel(ChannelKind::AnalogOutput, channel)?;
        CAPABILITIES.check_output(value, v_max, v_min)?;
        if state.fail_analog_writes {
            return Err(DriverError::Io {
                kind: ChannelKind::AnalogOutput,
                channel,
                message: "EIO".to_string(),
            });
        }
        Ok(())
    }

    fn write_digital(&mut self, channel: u32, level: Level) -> Result<(), DriverError> {
        let mut state = self.handle.state();
        state.calls.push(Call::WriteDigital(channel, level));
        CAPABILITIES.check_channel(ChannelKind::Digital, channel)?;
        if state.fail_digital_writes {
            return Err(DriverError::Io {
                kind: ChannelKind::Digital,
                channel,
                message: "EIO".to_string(),
            });
        }
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), DriverError> {
        Ok(())
    }
}

/// Panel with the standard elements: one knob travelling `[0, π]` over
/// 24 V, the three controls off, and all six lamps dark.
pub const STANDARD: &str = r#"
driver = "fake"

[power_supply]
title = "ALE 102"
voltage_full_output = 24.0
v_program_max = 10.0
v_program_min = 0.0

[[knobs]]
id = 0
title = "Output voltage"
angle = 0.0
clock_wise_limit = 3.141592653589793
counter_clock_wise_limit = 0.0
voltage_setting = 0.0

[[controls]]
id = 0
title = "Enable"

[[controls]]
id = 1
title = "Inhibit"

[[controls]]
id = 2
title = "Interlock"

[[indicators]]
id = 0
title = "Overload"

[[indicators]]
id = 1
title = "Thermal overload"

[[indicators]]
id = 2
title = "Interlock"

[[indicators]]
id = 3
title = "Overvoltage"

[[indicators]]
id = 4
title = "End of charge"

[[indicators]]
id = 5
title = "Inhibit"
"#;

pub fn config(content: &str) -> PanelConfig {
    PanelConfig::from_toml(content).expect("fixture should parse")
}

pub fn fake_panel(content: &str) -> (Panel, FakeHandle) {
    let handle = FakeHandle::default();
    let driver = Box::new(FakeDriver {
        handle: handle.clone(),
    });
    let panel = Panel::new(config(content), driver).expect("panel should build");
    (panel, handle)
}

/// Presenter keeping every snapshot.
#[derive(Default)]
pub struct RecordingPresenter {
    pub frames: Vec<PanelSnapshot>,
}

impl Presenter for RecordingPresenter {
    fn redraw(&mut self, snapshot: &PanelSnapshot) {
        self.frames.push(snapshot.clone());
    }
}
