//! Magic wand firmware entry point
//!
//! A two-button novelty: the light button casts a light spell (and,
//! held, a battery power bar), the time button shows the time on eight
//! LEDs; held long enough it enters set-time mode.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_rp::block::ImageDef;
use embassy_rp::config::Config;
use system::resources::{AssignedResources, WandResources};

use crate::task::control::wand_control;
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// System core modules
mod system;
/// Task implementations
mod task;

/// Firmware entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Config::default());
    let r = split_resources!(p);
    spawner.spawn(wand_control(r.wand)).unwrap();
}
