//! Test doubles shared by the driver tests

use std::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use embedded_hal_async::delay::DelayNs;
use hygro_hal::{Backlight, I2cBus, InputPin, Monotonic, PanelBus};

/// Error returned by the fakes when told to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fault;

/// One blit recorded by [`RecordingPanel`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Blit {
    pub x0: u16,
    pub y0: u16,
    pub x1: u16,
    pub y1: u16,
    pub pixels: Vec<u16>,
}

impl Blit {
    pub fn rect(&self) -> (u16, u16, u16, u16) {
        (self.x0, self.y0, self.x1, self.y1)
    }
}

/// Panel that records every call
#[derive(Debug, Default)]
pub struct RecordingPanel {
    pub blits: Vec<Blit>,
    pub initialized: bool,
    pub orientation: Option<(bool, bool, bool)>,
    pub gap: Option<(u16, u16)>,
    pub inverted: bool,
    pub display_on: bool,
    /// Fail the blit with this index (0-based, counted across the test)
    pub fail_blit_at: Option<usize>,
    pub fail_init: bool,
    pub fail_gap: bool,
    blit_calls: usize,
}

impl RecordingPanel {
    pub fn failing_at(index: usize) -> Self {
        Self {
            fail_blit_at: Some(index),
            ..Self::default()
        }
    }

    pub fn failing_init() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    pub fn rects(&self) -> Vec<(u16, u16, u16, u16)> {
        self.blits.iter().map(Blit::rect).collect()
    }
}

impl PanelBus for RecordingPanel {
    type Error = Fault;

    fn init(&mut self) -> Result<(), Fault> {
        if self.fail_init {
            return Err(Fault);
        }
        self.initialized = true;
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u16],
    ) -> Result<(), Fault> {
        let call = self.blit_calls;
        self.blit_calls += 1;
        if self.fail_blit_at == Some(call) {
            return Err(Fault);
        }
        let count = usize::from(x1 - x0) * usize::from(y1 - y0);
        assert!(pixels.len() >= count, "short pixel slice");
        self.blits.push(Blit {
            x0,
            y0,
            x1,
            y1,
            pixels: pixels[..count].to_vec(),
        });
        Ok(())
    }

    fn set_orientation(&mut self, swap_xy: bool, mirror_x: bool, mirror_y: bool) -> Result<(), Fault> {
        self.orientation = Some((swap_xy, mirror_x, mirror_y));
        Ok(())
    }

    fn set_gap(&mut self, x: u16, y: u16) -> Result<(), Fault> {
        if self.fail_gap {
            return Err(Fault);
        }
        self.gap = Some((x, y));
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Fault> {
        self.inverted = inverted;
        Ok(())
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), Fault> {
        self.display_on = on;
        Ok(())
    }
}

/// Backlight that remembers the last duty
#[derive(Debug)]
pub struct FakeBacklight {
    pub max: u32,
    pub duty: u32,
}

impl Default for FakeBacklight {
    fn default() -> Self {
        Self { max: 1000, duty: 0 }
    }
}

impl Backlight for FakeBacklight {
    type Error = Fault;

    fn max_duty(&self) -> u32 {
        self.max
    }

    fn set_duty(&mut self, duty: u32) -> Result<(), Fault> {
        self.duty = duty;
        Ok(())
    }
}

/// Manual clock; sleeping through it advances time instantly
#[derive(Debug, Default)]
pub struct FakeTime {
    now_ns: Cell<u64>,
}

impl FakeTime {
    pub fn advance_ms(&self, ms: u64) {
        self.now_ns.set(self.now_ns.get() + ms * 1_000_000);
    }
}

impl Monotonic for FakeTime {
    fn now_us(&self) -> u64 {
        self.now_ns.get() / 1000
    }
}

impl DelayNs for &FakeTime {
    async fn delay_ns(&mut self, ns: u32) {
        self.now_ns.set(self.now_ns.get() + u64::from(ns));
    }
}

/// I2C bus replaying scripted read responses
#[derive(Debug, Default)]
pub struct ScriptedI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    /// Responses for successive reads; `None` fails the read
    pub reads: VecDeque<Option<Vec<u8>>>,
    /// Response used once `reads` is exhausted
    pub fallback: Option<Vec<u8>>,
    pub read_count: usize,
    pub fail_writes: bool,
    /// Reads never complete
    pub hang_reads: bool,
}

impl ScriptedI2c {
    pub fn with_reads<I: IntoIterator<Item = Vec<u8>>>(reads: I) -> Self {
        Self {
            reads: reads.into_iter().map(Some).collect(),
            ..Self::default()
        }
    }

    pub fn written_commands(&self) -> Vec<Vec<u8>> {
        self.writes.iter().map(|(_, bytes)| bytes.clone()).collect()
    }
}

impl I2cBus for ScriptedI2c {
    type Error = Fault;

    async fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Fault> {
        if self.fail_writes {
            return Err(Fault);
        }
        self.writes.push((address, data.to_vec()));
        Ok(())
    }

    async fn read(&mut self, _address: u8, buf: &mut [u8]) -> Result<(), Fault> {
        self.read_count += 1;
        if self.hang_reads {
            core::future::pending::<()>().await;
        }
        let response = match self.reads.pop_front() {
            Some(scripted) => scripted,
            None => self.fallback.clone(),
        };
        let bytes = response.ok_or(Fault)?;
        let n = buf.len().min(bytes.len());
        buf[..n].copy_from_slice(&bytes[..n]);
        Ok(())
    }
}

/// Input pin whose level the test sets
#[derive(Debug, Default)]
pub struct FakePin {
    high: Cell<bool>,
}

impl FakePin {
    pub fn new(high: bool) -> Self {
        Self {
            high: Cell::new(high),
        }
    }

    pub fn set(&self, high: bool) {
        self.high.set(high);
    }
}

impl InputPin for FakePin {
    fn is_high(&self) -> bool {
        self.high.get()
    }
}
