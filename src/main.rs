//! Cistern Pump Firmware: Main Entry Point
//!
//! Hexagonal architecture driven by a cooperative cadence scheduler.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  HardwareAdapter   LogEventSink   At24c32       SystemClock    │
//! │  (Sensor+Actuator) (EventSink)    (NvramPort)   (ClockPort)    │
//! │  LogDisplay                                                    │
//! │  (DisplayPort)                                                 │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              AppService (pure logic)                   │    │
//! │  │  ModeSelector · Strategies · Safety · CycleStore       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  Scheduler (delegate-driven, three cadences)                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

// ── Imports ───────────────────────────────────────────────────
use anyhow::Result;
use esp_idf_hal::delay::{Delay, FreeRtos};
use esp_idf_hal::gpio::{AnyInputPin, AnyOutputPin, Input, InputPin, Output, OutputPin, PinDriver};
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::units::Hertz;
use log::info;

use cistern_pump::adapters::hardware::{HardwareAdapter, Outputs};
use cistern_pump::adapters::log_display::LogDisplay;
use cistern_pump::adapters::log_sink::LogEventSink;
use cistern_pump::adapters::time::SystemClock;
use cistern_pump::app::ports::CadenceTask;
use cistern_pump::app::service::AppService;
use cistern_pump::config::SystemConfig;
use cistern_pump::control::ControlMode;
use cistern_pump::cycle_store::CycleStore;
use cistern_pump::drivers::eeprom::At24c32;
use cistern_pump::drivers::output::DigitalOutput;
use cistern_pump::pins;
use cistern_pump::scheduler::Scheduler;
use cistern_pump::sensors::{InputHub, InputPins};

/// Idle time between scheduler checks.  Well below the fastest cadence.
const LOOP_SLEEP_MS: u32 = 10;

type InPin = PinDriver<'static, AnyInputPin, Input>;
type OutPin = PinDriver<'static, AnyOutputPin, Output>;

fn input(pin: impl InputPin, gpio: i32) -> Result<(InPin, i32)> {
    Ok((PinDriver::input(pin.downgrade_input())?, gpio))
}

fn output(pin: impl OutputPin, gpio: i32) -> Result<DigitalOutput<OutPin>> {
    let mut driver = PinDriver::output(pin.downgrade_output())?;
    driver.set_low()?;
    Ok(DigitalOutput::new(driver, gpio))
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Cistern Pump v{}                  ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    let config = SystemConfig::default();
    config.validate()?;

    // ── 2. Peripherals ────────────────────────────────────────
    let peripherals = Peripherals::take()?;
    let p = peripherals.pins;

    // Pumps first, so they are driven low as early as possible.
    let outputs = Outputs {
        pump1: output(p.gpio16, pins::PUMP_1_GPIO)?,
        pump2: output(p.gpio17, pins::PUMP_2_GPIO)?,
        led_auto: output(p.gpio14, pins::LED_AUTO_GPIO)?,
        led_manual: output(p.gpio15, pins::LED_MANUAL_GPIO)?,
    };
    let inputs = InputHub::new(
        InputPins {
            mode_button: input(p.gpio8, pins::MODE_BUTTON_GPIO)?,
            select_button: input(p.gpio9, pins::PUMP_SELECT_BUTTON_GPIO)?,
            well_sensor: input(p.gpio10, pins::WELL_SENSOR_GPIO)?,
            cistern_sensor: input(p.gpio11, pins::CISTERN_SENSOR_GPIO)?,
        },
        config.debounce_window_ms,
    );
    let mut hw = HardwareAdapter::new(inputs, outputs);

    let i2c = I2cDriver::new(
        peripherals.i2c0,
        p.gpio38,
        p.gpio39,
        &I2cConfig::new().baudrate(Hertz(pins::I2C_BAUDRATE_HZ)),
    )?;
    let mut store = CycleStore::new(At24c32::new(i2c, Delay::new_default()));

    // ── 3. Application core ───────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut clock = SystemClock::new();
    let mut display = LogDisplay::new();
    let mut app = AppService::new(ControlMode::AutoBySensors);
    app.start(&mut store, &mut sink);

    let mut scheduler = Scheduler::new(&config);
    info!("System ready. Entering control loop.");

    // ── 4. Cooperative loop ───────────────────────────────────
    loop {
        let now_ms = clock.uptime_ms();
        scheduler.tick(now_ms, &mut |task: CadenceTask| match task {
            CadenceTask::PollInputs => app.poll_inputs(&mut hw, now_ms),
            CadenceTask::Control => app.control_tick(&mut hw, &mut clock, &mut store, &mut sink),
            CadenceTask::RefreshDisplay => {
                app.refresh_display(&mut display, &mut store, &mut sink)
            }
        });

        FreeRtos::delay_ms(LOOP_SLEEP_MS);
    }
}
