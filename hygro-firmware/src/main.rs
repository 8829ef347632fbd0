//! Hygro - desk hygrometer firmware
//!
//! Reads a DHT20 continuously, averages the readings over a fixed window
//! and shows the averages on an ST7789 panel. A rotary knob sets the
//! backlight and its button toggles EMA smoothing.

#![no_std]
#![no_main]

extern crate alloc;

mod config;

use core::fmt::Write;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C1, SPI0};
use embassy_rp::pwm::{self, Pwm};
use embassy_rp::spi::{self, Blocking, Spi};
use embassy_time::{Delay, Timer};
use embedded_alloc::LlffHeap as Heap;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use heapless::String;
use {defmt_rtt as _, panic_probe as _};

use hygro_core::{EmaFilter, Rgb565, SampleWindow, WindowSummary};
use hygro_drivers::{Dht20, Dht20State, Display, Knob, KnobEvent, St7789};
use hygro_hal::Monotonic;
use hygro_hal_rp2040::pwm::DEFAULT_TOP;
use hygro_hal_rp2040::{EmbassyClock, I2cBridge, KnobInput, PwmBacklight};

use crate::config::*;

bind_interrupts!(struct Irqs {
    I2C1_IRQ => i2c::InterruptHandler<I2C1>;
});

// Heap for the streamed test pattern
#[global_allocator]
static HEAP: Heap = Heap::empty();

/// One 20-row, 320-pixel test pattern block (12.8 KB) plus allocator overhead
const HEAP_SIZE: usize = 16 * 1024;

type SpiBus = ExclusiveDevice<Spi<'static, SPI0, Blocking>, Output<'static>, NoDelay>;
type Panel = St7789<SpiBus, Output<'static>, Output<'static>, Delay>;
type Screen = Display<Panel, PwmBacklight<'static>>;
type Sensor = Dht20<I2cBridge<I2c<'static, I2C1, i2c::Async>>, EmbassyClock, Delay>;
type Dial = Knob<KnobInput<'static>, KnobInput<'static>, KnobInput<'static>, EmbassyClock>;

/// Settings the knob changes at run time
struct Controls {
    backlight: u8,
    filter: EmaFilter,
    filter_on: bool,
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    init_heap();

    info!("Hygro firmware starting...");

    let p = embassy_rp::init(Default::default());

    match check_pin_map(&BOARD_PINS) {
        Ok(pins) => info!("Pin map OK, {} pins claimed", pins.allocated_count()),
        Err(e) => {
            error!("Pin map invalid: {}", e);
            park().await;
        }
    }

    // Display
    let panel_config = panel_config();
    let mut spi_config = spi::Config::default();
    spi_config.frequency = panel_config.spi_clock_hz;
    let spi = Spi::new_blocking_txonly(p.SPI0, p.PIN_2, p.PIN_3, spi_config);
    let cs = Output::new(p.PIN_10, Level::High);
    let spi = match ExclusiveDevice::new_no_delay(spi, cs) {
        Ok(device) => device,
        Err(never) => match never {},
    };
    let dc = Output::new(p.PIN_11, Level::Low);
    let rst = Output::new(p.PIN_5, Level::High);
    let panel = St7789::new(spi, dc, rst, Delay);
    let backlight = PwmBacklight::new(
        Pwm::new_output_a(p.PWM_SLICE2, p.PIN_4, pwm::Config::default()),
        DEFAULT_TOP,
    );

    let mut display: Option<Screen> = match Display::new(panel, backlight, panel_config) {
        Ok(display) => Some(display),
        Err(e) => {
            error!("Display init failed: {}, continuing without display", e);
            None
        }
    };
    if let Some(screen) = display.as_mut() {
        if let Err(e) = bring_up_display(screen).await {
            warn!("Display bring-up incomplete: {}", e);
        }
    }

    // Sensor
    let sensor_config = sensor_config();
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = SENSOR_I2C.frequency;
    let i2c = I2c::new_async(p.I2C1, p.PIN_7, p.PIN_6, Irqs, i2c_config);
    let mut sensor: Sensor = match Dht20::new(I2cBridge::new(i2c), EmbassyClock, Delay, sensor_config) {
        Ok(sensor) => sensor,
        Err(e) => {
            error!("Sensor config rejected: {}", e);
            park().await;
        }
    };
    if let Err(e) = trigger(&mut sensor).await {
        error!("DHT20 start failed: {}, will retry", e);
    }
    info!("DHT20 state: {}", sensor.state());

    // Knob
    let knob_config = knob_config();
    let mut knob: Dial = Knob::new(
        KnobInput::new(p.PIN_21, knob_config.enable_pullup),
        KnobInput::new(p.PIN_9, knob_config.enable_pullup),
        KnobInput::new(p.PIN_20, knob_config.enable_pullup),
        EmbassyClock,
        knob_config,
    );

    let mut controls = Controls {
        backlight: INITIAL_BACKLIGHT,
        filter: match EmaFilter::new(FILTER_ALPHA) {
            Ok(filter) => filter,
            Err(e) => {
                error!("Filter alpha rejected: {}", e);
                park().await;
            }
        },
        filter_on: FILTER_AT_BOOT,
    };
    knob.set_position(i32::from(controls.backlight));
    if let Some(screen) = display.as_mut() {
        if let Err(e) = screen.set_backlight(controls.backlight) {
            warn!("Backlight update failed: {}", e);
        }
    }

    let mut window = SampleWindow::new(PRINT_PERIOD_MS, EmbassyClock.now_ms() as u32);

    info!("Hygro running");

    loop {
        match sensor
            .read_measurement_with_timeout(sensor_config.ready_timeout_ms, sensor_config.poll_interval_ms)
            .await
        {
            Ok(sample) => {
                let sample = sample.with_offset(
                    sensor_config.temperature_offset_c,
                    sensor_config.humidity_offset_rh,
                );
                let sample = if controls.filter_on {
                    controls.filter.apply(&sample)
                } else {
                    sample
                };
                window.push(&sample);
            }
            Err(e) => {
                if e.is_transient() {
                    debug!("DHT20 not ready: {}", e);
                } else {
                    warn!("DHT20 read failed: {}", e);
                }
                window.record_error();
            }
        }

        if let Err(e) = trigger(&mut sensor).await {
            error!("Start measurement failed: {}", e);
            Timer::after_millis(RETRY_BACKOFF_MS).await;
        }

        if let Some(summary) = window.take(EmbassyClock.now_ms() as u32) {
            report(&summary, display.as_mut());
        }

        handle_knob(knob.poll(), &mut knob, &mut controls, display.as_mut());

        Timer::after_millis(LOOP_DELAY_MS).await;
    }
}

/// Rotation, self-test, colour bars, then the empty readout
async fn bring_up_display(screen: &mut Screen) -> Result<(), hygro_core::DisplayError> {
    screen.set_rotation(TFT_ROTATION)?;
    screen.set_backlight(INITIAL_BACKLIGHT)?;
    screen.self_test(&mut Delay).await?;
    screen.draw_test_pattern(TEST_PATTERN_ROWS)?;
    screen.fill(Rgb565::BLACK)?;
    show_lines(screen, "TEMP: --.- C", "RH: --.- %")?;

    info!(
        "Display ready: {}x{} at {} deg",
        screen.width(),
        screen.height(),
        screen.rotation().degrees()
    );
    Ok(())
}

/// Re-trigger a conversion, re-initializing the sensor if it never came up
async fn trigger(sensor: &mut Sensor) -> Result<(), hygro_core::SensorError> {
    if sensor.state() == Dht20State::Uninitialized {
        sensor.init().await?;
        info!("DHT20 initialized");
    }
    sensor.start_measurement().await
}

/// Log a closed window and refresh the readout
fn report(summary: &WindowSummary, display: Option<&mut Screen>) {
    let (Some(temperature), Some(humidity)) = (summary.temperature_c, summary.humidity_rh) else {
        warn!("Window avg: no valid sample, errors={}", summary.errors);
        return;
    };

    info!(
        "Window avg: T={} C RH={} % valid={} errors={}",
        temperature, humidity, summary.valid, summary.errors
    );

    let Some(screen) = display else {
        return;
    };
    let mut temp_line: String<32> = String::new();
    let mut rh_line: String<32> = String::new();
    if write!(temp_line, "TEMP: {:.1} C", temperature).is_err() || write!(rh_line, "RH: {:.1} %", humidity).is_err() {
        warn!("Readout line too long");
        return;
    }
    if let Err(e) = show_lines(screen, &temp_line, &rh_line) {
        warn!("Readout update failed: {}", e);
    }
}

fn show_lines(screen: &mut Screen, temp_line: &str, rh_line: &str) -> Result<(), hygro_core::DisplayError> {
    let width = i32::from(screen.width());
    screen.draw_rect(0, 0, width, HEADER_HEIGHT, Rgb565::BLACK)?;
    screen.draw_text(TEXT_X, TEMP_Y, temp_line, Rgb565::WHITE)?;
    screen.draw_text(TEXT_X, HUMIDITY_Y, rh_line, Rgb565::WHITE)
}

/// Knob turns step the backlight, a click toggles smoothing
fn handle_knob(event: KnobEvent, knob: &mut Dial, controls: &mut Controls, display: Option<&mut Screen>) {
    if event.delta != 0 {
        let step = i32::from(event.delta) * i32::from(KNOB_BACKLIGHT_STEP);
        // Clamped to 0..=100
        let value = (i32::from(controls.backlight) + step).clamp(0, 100) as u8;
        if value != controls.backlight {
            controls.backlight = value;
            knob.set_position(i32::from(value));
            if let Some(screen) = display {
                if let Err(e) = screen.set_backlight(value) {
                    warn!("Backlight update failed: {}", e);
                }
            }
            info!("Backlight {}%", value);
        }
    }

    if event.clicked {
        controls.filter_on = !controls.filter_on;
        if controls.filter_on {
            controls.filter.reset();
        }
        info!(
            "EMA filter {} (alpha {})",
            if controls.filter_on { "on" } else { "off" },
            controls.filter.alpha()
        );
    }
}

async fn park() -> ! {
    loop {
        Timer::after_secs(60).await;
    }
}

fn init_heap() {
    use core::mem::MaybeUninit;
    static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];
    #[allow(static_mut_refs)]
    unsafe {
        HEAP.init(HEAP_MEM.as_ptr() as usize, HEAP_SIZE)
    }
}
