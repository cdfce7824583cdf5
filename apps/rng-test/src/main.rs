//! Hardware RNG smoke test
//!
//! Pulls blocks of random bytes from the TRNG and dumps them as hex,
//! for eyeballing and piping into dieharder on the host.

#![no_std]
#![no_main]

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::trng::{Config as TrngConfig, InterruptHandler, Trng};
use embassy_rp::{bind_interrupts, block::ImageDef, config::Config, peripherals::TRNG};
use embassy_time::Timer;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    TRNG_IRQ => InterruptHandler<TRNG>;
});

/// Bytes per dumped block
const BLOCK_SIZE: usize = 32;

/// Firmware entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    let mut trng = Trng::new(p.TRNG, Irqs, TrngConfig::default());

    let mut block = [0u8; BLOCK_SIZE];
    loop {
        trng.fill_bytes(&mut block).await;
        info!("> {=[u8]:02x}", block[..]);
        Timer::after_secs(1).await;
    }
}
