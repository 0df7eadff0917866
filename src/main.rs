//! colorsense firmware - handheld surface color detector.
//!
//! nRF52840 + TCS3200 color sensor + SSD1306 128x32 OLED + one button.
//! Press to sample, hold 2 s to finalize and publish the averaged color
//! over BLE, hold 5 s to toggle the sensor LED, triple tap to start over.
//!
//! Tasks:
//! - `main` - polls the button and runs the interaction controller every
//!   `TICK_MS`; owns the sensor and the display.
//! - `softdevice_task` - SoftDevice event pump.
//! - `ble_task` - advertising + GATT server, forwards finalized payloads.

#![no_std]
#![no_main]

mod ble;
mod sensor;
mod ui;

use colorsense::config::{Timings, SPLASH_MS, TICK_MS, WELCOME_MS};
use colorsense::Controller;
use defmt::{debug, error, info};
use embassy_executor::Spawner;
use embassy_nrf::gpio::{Input, Level, Output, OutputDrive, Pin, Pull};
use embassy_nrf::interrupt::{self, InterruptExt, Priority};
use embassy_nrf::timer::Timer as HwTimer;
use embassy_nrf::{bind_interrupts, peripherals, twim};
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Instant, Ticker, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use crate::ble::notifier::BleNotifier;
use crate::ble::server::{self, Server};
use crate::ble::{LinkState, Outbox};
use crate::sensor::Tcs3200;
use crate::ui::button::Button;
use crate::ui::display::OledStatus;

bind_interrupts!(struct Irqs {
    SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0 => twim::InterruptHandler<peripherals::TWISPI0>;
});

static OUTBOX: Outbox = Channel::new();
static LINK: LinkState = LinkState::new();
static SERVER: StaticCell<Server> = StaticCell::new();

fn now_ms() -> u64 {
    Instant::now().as_millis()
}

/// Park the main task after an unrecoverable startup failure.
async fn halt() -> ! {
    loop {
        Timer::after_secs(3600).await;
    }
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    // Priorities 0, 1 and 4 belong to the SoftDevice.
    let mut config = embassy_nrf::config::Config::default();
    config.gpiote_interrupt_priority = Priority::P2;
    config.time_interrupt_priority = Priority::P2;
    let p = embassy_nrf::init(config);

    info!("colorsense starting");

    // - Display -------------------------------------------------------
    interrupt::SPIM0_SPIS0_TWIM0_TWIS0_SPI0_TWI0.set_priority(Priority::P3);
    let i2c = twim::Twim::new(p.TWISPI0, Irqs, p.P0_26, p.P0_27, twim::Config::default());
    let mut oled = match OledStatus::init(i2c).await {
        Ok(oled) => oled,
        Err(e) => {
            error!("display unavailable ({}), check SDA P0.26 / SCL P0.27", e);
            halt().await
        }
    };

    oled.show_splash();
    Timer::after_millis(SPLASH_MS).await;
    oled.show_welcome();
    Timer::after_millis(WELCOME_MS).await;

    // - Sensor & button -------------------------------------------------
    let sensor = Tcs3200::new(
        Output::new(p.P0_03, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_04, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_28, Level::Low, OutputDrive::Standard),
        Output::new(p.P0_29, Level::Low, OutputDrive::Standard),
        Input::new(p.P0_30, Pull::None),
        Output::new(p.P0_31, Level::Low, OutputDrive::Standard),
        HwTimer::new(p.TIMER1),
    );
    let button = Button::new(p.P0_11.degrade());

    // - BLE -----------------------------------------------------------
    let sd = ble::enable_softdevice();
    let server = match Server::register(sd) {
        Ok(server) => SERVER.init(server),
        Err(e) => {
            error!("GATT server registration failed: {}", e);
            halt().await
        }
    };
    let sd = &*sd;

    if let Err(e) = spawner.spawn(ble::softdevice_task(sd)) {
        error!("failed to spawn softdevice task: {}", e);
        halt().await;
    }
    if let Err(e) = spawner.spawn(server::ble_task(sd, server, &OUTBOX, &LINK)) {
        error!("failed to spawn BLE task: {}", e);
        halt().await;
    }

    // - Controller loop -------------------------------------------------
    let notifier = BleNotifier::new(&OUTBOX, &LINK);
    let mut controller = Controller::new(sensor, oled, notifier, Timings::default());
    controller.begin(now_ms());

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut last_state = controller.state();
    loop {
        let state = controller.tick(button.is_pressed(), now_ms());
        if state != last_state {
            debug!("state {} -> {}", last_state, state);
            last_state = state;
        }
        ticker.next().await;
    }
}
