//! WiFi and network stack bring-up
//!
//! Shared by the networked demo nodes: initializes the CYW43439 WiFi
//! chip over PIO SPI, spawns the driver and network tasks, joins the
//! configured WPA2 network and waits for a DHCP lease. Credentials are
//! compile-time configuration (`WIFI_SSID`/`WIFI_PSK` environment
//! variables at build time).
//!
//! The on-board LED hangs off the WiFi chip, so the returned [`Control`]
//! handle doubles as the LED driver (`control.gpio_set(0, ..)`).

#![no_std]

pub use cyw43::Control;

use cyw43::JoinOptions;
use cyw43_pio::{PioSpi, DEFAULT_CLOCK_DIVIDER};
use embassy_executor::Spawner;
use embassy_net::{Config as NetConfig, Stack, StackResources};
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::{DMA_CH0, PIN_23, PIN_24, PIN_25, PIN_29, PIO0};
use embassy_rp::pio::{InterruptHandler as PioInterruptHandler, Pio};
use embassy_time::{Duration, Instant, Timer};
use static_cell::StaticCell;

/// Join attempts before giving up.
const MAX_JOIN_RETRIES: u8 = 5;

/// Base delay for join retry backoff.
const JOIN_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How long to wait for a DHCP lease.
const DHCP_TIMEOUT: Duration = Duration::from_secs(30);

/// Sockets plus DHCP need a handful of stack slots.
const STACK_SOCKETS: usize = 4;

const WIFI_SSID: &str = match option_env!("WIFI_SSID") {
    Some(ssid) => ssid,
    None => "luke-demos",
};
const WIFI_PSK: &str = match option_env!("WIFI_PSK") {
    Some(psk) => psk,
    None => "lukedemos",
};

bind_interrupts!(struct Irqs {
    PIO0_IRQ_0 => PioInterruptHandler<PIO0>;
});

/// Peripherals claimed by the WiFi chip on the Pico 2 W.
pub struct WifiPeripherals {
    pub pwr_pin: PIN_23,
    pub cs_pin: PIN_25,
    pub dio_pin: PIN_24,
    pub clk_pin: PIN_29,
    pub pio: PIO0,
    pub dma: DMA_CH0,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum WifiError {
    /// Join failed after all retries.
    JoinFailed,
    /// No DHCP lease within the timeout.
    DhcpTimeout,
}

#[embassy_executor::task]
async fn wifi_task(
    runner: cyw43::Runner<'static, Output<'static>, PioSpi<'static, PIO0, 0, DMA_CH0>>,
) -> ! {
    runner.run().await
}

#[embassy_executor::task]
async fn net_task(mut runner: embassy_net::Runner<'static, cyw43::NetDriver<'static>>) -> ! {
    runner.run().await
}

/// Bring up WiFi and the network stack, returning both handles.
///
/// `seed` feeds the network stack's TCP/UDP randomness; the callers draw
/// it from the TRNG.
pub async fn bring_up(
    spawner: Spawner,
    wifi: WifiPeripherals,
    seed: u64,
) -> Result<(Stack<'static>, Control<'static>), WifiError> {
    let fw = include_bytes!("../../cyw43-firmware/43439A0.bin");
    let clm = include_bytes!("../../cyw43-firmware/43439A0_clm.bin");

    let pwr = Output::new(wifi.pwr_pin, Level::Low);
    let cs = Output::new(wifi.cs_pin, Level::High);
    let mut pio = Pio::new(wifi.pio, Irqs);
    let spi = PioSpi::new(
        &mut pio.common,
        pio.sm0,
        DEFAULT_CLOCK_DIVIDER,
        pio.irq0,
        cs,
        wifi.dio_pin,
        wifi.clk_pin,
        wifi.dma,
    );

    static STATE: StaticCell<cyw43::State> = StaticCell::new();
    let state = STATE.init(cyw43::State::new());
    let (net_device, mut control, runner) = cyw43::new(state, pwr, spi, fw).await;
    spawner.spawn(wifi_task(runner)).unwrap();

    control.init(clm).await;
    control
        .set_power_management(cyw43::PowerManagementMode::PowerSave)
        .await;

    static RESOURCES: StaticCell<StackResources<STACK_SOCKETS>> = StaticCell::new();
    let (stack, runner) = embassy_net::new(
        net_device,
        NetConfig::dhcpv4(Default::default()),
        RESOURCES.init(StackResources::new()),
        seed,
    );
    spawner.spawn(net_task(runner)).unwrap();

    let mut retries = 0;
    loop {
        defmt::info!(
            "joining '{}' (attempt {}/{})",
            WIFI_SSID,
            retries + 1,
            MAX_JOIN_RETRIES
        );
        match control
            .join(WIFI_SSID, JoinOptions::new(WIFI_PSK.as_bytes()))
            .await
        {
            Ok(()) => break,
            Err(err) => {
                defmt::warn!("join failed with status {}", err.status);
                retries += 1;
                if retries >= MAX_JOIN_RETRIES {
                    return Err(WifiError::JoinFailed);
                }
                Timer::after(JOIN_RETRY_DELAY * u32::from(retries)).await;
            }
        }
    }

    defmt::info!("waiting for DHCP");
    let start = Instant::now();
    while !stack.is_config_up() {
        if Instant::now().duration_since(start) > DHCP_TIMEOUT {
            return Err(WifiError::DhcpTimeout);
        }
        Timer::after_millis(100).await;
    }
    if let Some(config) = stack.config_v4() {
        defmt::info!("address {}", config.address);
    }

    Ok((stack, control))
}
