//! Minimal comedi kernel interface.
//!
//! Issues `COMEDI_INSN` instructions on an open `/dev/comediN` node. Only the
//! synchronous single-sample instructions the panel needs are covered.

use libc::c_uint;
use psu_common::bounds::VoltageRange;
use static_assertions::const_assert_eq;
use std::fs::{File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::path::{Path, PathBuf};

const INSN_MASK_WRITE: c_uint = 0x0800_0000;
const INSN_MASK_READ: c_uint = 0x0400_0000;

const INSN_READ: c_uint = INSN_MASK_READ;
const INSN_WRITE: c_uint = 1 | INSN_MASK_WRITE;
const INSN_CONFIG: c_uint = 3 | INSN_MASK_READ | INSN_MASK_WRITE;

const INSN_CONFIG_DIO_OUTPUT: c_uint = 1;

/// Analog reference: single-ended against ground.
pub const AREF_GROUND: u32 = 0;

/// Largest sample of the card's 16-bit converters.
pub const MAXDATA: u32 = 0xFFFF;

/// `struct comedi_insn` from `<linux/comedi.h>`.
#[repr(C)]
pub struct ComediInsn {
    insn: c_uint,
    n: c_uint,
    data: *mut c_uint,
    subdev: c_uint,
    chanspec: c_uint,
    unused: [c_uint; 3],
}

#[cfg(target_pointer_width = "64")]
const_assert_eq!(std::mem::size_of::<ComediInsn>(), 40);

nix::ioctl_read!(comedi_insn, b'd', 12, ComediInsn);

/// Pack channel, range index and analog reference into a chanspec.
pub const fn cr_pack(chan: u32, range: u32, aref: u32) -> u32 {
    ((aref & 0x3) << 24) | ((range & 0xff) << 16) | chan
}

/// Convert a raw sample to volts.
///
/// Samples pinned at either end of the converter are out of range and
/// yield `None`.
pub fn to_phys(raw: u32, range: &VoltageRange, maxdata: u32) -> Option<f64> {
    if raw == 0 || raw >= maxdata {
        return None;
    }
    Some(range.min + range.span() * f64::from(raw) / f64::from(maxdata))
}

/// Convert volts to the nearest raw sample, clamped to the converter.
pub fn from_phys(value: f64, range: &VoltageRange, maxdata: u32) -> u32 {
    let raw = ((value - range.min) / range.span() * f64::from(maxdata)).round();
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= f64::from(maxdata) {
        maxdata
    } else {
        raw as u32
    }
}

/// An open comedi device node.
pub struct ComediDevice {
    file: File,
    path: PathBuf,
}

impl ComediDevice {
    /// Open a comedi device node for reading and writing.
    pub fn open(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().read(true).write(true).open(path)?;
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    /// Device node path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn execute(
        &self,
        insn: c_uint,
        subdev: u32,
        chanspec: u32,
        data: &mut [c_uint],
    ) -> nix::Result<()> {
        let mut request = ComediInsn {
            insn,
            n: data.len() as c_uint,
            data: data.as_mut_ptr(),
            subdev,
            chanspec,
            unused: [0; 3],
        };
        // SAFETY: `request.data` points at `data`, which outlives the call
        // and holds exactly `request.n` samples.
        unsafe { comedi_insn(self.file.as_raw_fd(), &mut request) }?;
        Ok(())
    }

    /// Read one sample.
    pub fn data_read(&self, subdev: u32, chan: u32, range: u32, aref: u32) -> nix::Result<u32> {
        let mut data = [0; 1];
        self.execute(INSN_READ, subdev, cr_pack(chan, range, aref), &mut data)?;
        Ok(data[0])
    }

    /// Write one sample.
    pub fn data_write(
        &self,
        subdev: u32,
        chan: u32,
        range: u32,
        aref: u32,
        raw: u32,
    ) -> nix::Result<()> {
        let mut data = [raw];
        self.execute(INSN_WRITE, subdev, cr_pack(chan, range, aref), &mut data)
    }

    /// Configure a digital line as output.
    pub fn dio_config_output(&self, subdev: u32, chan: u32) -> nix::Result<()> {
        let mut data = [INSN_CONFIG_DIO_OUTPUT];
        self.execute(INSN_CONFIG, subdev, cr_pack(chan, 0, 0), &mut data)
    }

    /// Drive a digital line.
    pub fn dio_write(&self, subdev: u32, chan: u32, bit: bool) -> nix::Result<()> {
        let mut data = [c_uint::from(bit)];
        self.execute(INSN_WRITE, subdev, cr_pack(chan, 0, 0), &mut data)
    }
}
