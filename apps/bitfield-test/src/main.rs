//! Packing experiment output
//!
//! Fills one packed (flag-word) and one plain neighbor entry with the
//! same values and prints sizes and field round-trips, to compare the
//! two layouts on real hardware.

#![no_std]
#![no_main]

use core::mem::size_of;

use defmt::info;
use embassy_executor::Spawner;
use embassy_rp::{block::ImageDef, config::Config};
use embassy_time::Timer;
use luke_core::nib::{ArState, NibEntryFlags, NibEntryWide, NudState};
use {defmt_rtt as _, panic_probe as _};

/// Firmware image type for bootloader
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = ImageDef::secure_exe();

/// Firmware entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    let _p = embassy_rp::init(Config::default());

    info!("sizeof(NibEntryFlags) = {}", size_of::<NibEntryFlags>());
    info!("sizeof(NibEntryWide) = {}", size_of::<NibEntryWide>());

    let mut packed = NibEntryFlags::default();
    packed.set_pfx_len(45);
    packed.set_l2addr_len(3);
    packed.set_nud_state(NudState::Stale);
    packed.set_is_router(true);
    packed.set_iface(5);
    packed.set_ar_state(ArState::Tentative);
    packed.set_use_for_comp(true);
    packed.set_cid(0x6);

    let wide = NibEntryWide {
        pfx_len: 45,
        l2addr_len: 3,
        nud_state: NudState::Stale as u8,
        is_router: true,
        iface: 5,
        ar_state: ArState::Tentative as u8,
        use_for_comp: true,
        cid: 0x6,
        ..NibEntryWide::default()
    };

    info!("pfx_len: {} / {}", packed.pfx_len(), wide.pfx_len);
    info!("l2addr_len: {} / {}", packed.l2addr_len(), wide.l2addr_len);
    info!("nud_state: {} / {}", packed.nud_state(), wide.nud_state);
    info!("is_router: {} / {}", packed.is_router(), wide.is_router);
    info!("iface: {} / {}", packed.iface(), wide.iface);
    info!("ar_state: {} / {}", packed.ar_state(), wide.ar_state);
    info!(
        "use_for_comp: {} / {}",
        packed.use_for_comp(),
        wide.use_for_comp
    );
    info!("cid: {:#x} / {:#x}", packed.cid(), wide.cid);

    loop {
        Timer::after_secs(60).await;
    }
}
