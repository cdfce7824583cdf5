//! Point display node firmware entry point
//!
//! Brings up WiFi, then runs the point game: a CoAP server for
//! `/luke/points` and `/luke/vic`, a decay loop that bleeds points away,
//! and a WS2812 strip that shows the current score.

#![no_std]
#![no_main]

extern crate alloc;

use core::mem::MaybeUninit;
use core::ptr::addr_of_mut;

use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use embassy_rp::trng::{Config as TrngConfig, Trng};
use embedded_alloc::LlffHeap as Heap;
use netup::WifiPeripherals;
use system::resources::{AssignedResources, Irqs, StripResources};

use crate::task::{coap_server::coap_server, decay::decay, strip::strip_render};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Heap for CoAP message assembly.
const HEAP_SIZE: usize = 16 * 1024;

#[global_allocator]
static HEAP: Heap = Heap::empty();

static mut HEAP_MEM: [MaybeUninit<u8>; HEAP_SIZE] = [MaybeUninit::uninit(); HEAP_SIZE];

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    unsafe { HEAP.init(addr_of_mut!(HEAP_MEM) as usize, HEAP_SIZE) }

    // Seed the network stack from the hardware TRNG.
    let mut trng = Trng::new(p.TRNG, Irqs, TrngConfig::default());
    let mut seed = [0u8; 8];
    trng.fill_bytes(&mut seed).await;

    let wifi = WifiPeripherals {
        pwr_pin: p.PIN_23,
        cs_pin: p.PIN_25,
        dio_pin: p.PIN_24,
        clk_pin: p.PIN_29,
        pio: p.PIO0,
        dma: p.DMA_CH0,
    };
    let r = split_resources!(p);

    let (stack, control) =
        defmt::unwrap!(netup::bring_up(spawner, wifi, u64::from_le_bytes(seed)).await);

    // Spawn the strip first so the initial full bar is drawn before the
    // decay loop starts taking points away.
    spawner.spawn(strip_render(r.strip)).unwrap();
    spawner.spawn(decay(control)).unwrap();
    spawner.spawn(coap_server(stack)).unwrap();
}
