//! Wand control
//!
//! One task owns both buttons, all LEDs, the ADC and the clock, and
//! walks the wand through its modes with `select` over button edges
//! and timers.
//!
//! Normal mode:
//! - light button: toggle the light spell; held for a second, show the
//!   battery power bar on the time LEDs instead (light as it was)
//! - time button: show the time while held; held for three seconds,
//!   enter set-time mode
//!
//! Set-time mode: hours first, then half-quarters. The group being set
//! blinks, light button decrements, time button increments. Holding the
//! time button advances (and finally commits); holding the light button
//! abandons the whole edit.

use defmt::info;
use embassy_futures::select::{select, select3, Either, Either3};
use embassy_rp::adc::{Adc, Channel as AdcChannel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_time::{Duration, Timer};
use luke_core::wand::{power_bar, time_encode, HOUR_MAX, QUARTER_MAX};
use moving_median::MovingMedian;

use crate::system::clock::SoftClock;
use crate::system::leds::{Group, TimeLeds};
use crate::system::resources::{Irqs, WandResources};

/// Hold time before the light button shows the power bar.
const POWER_BAR_TIMEOUT: Duration = Duration::from_secs(1);

/// Hold time before the time button enters (or advances) set-time mode.
const SET_TIME_TIMEOUT: Duration = Duration::from_secs(3);

/// Blink half-period in set-time mode.
const BLINK_TIMEOUT: Duration = Duration::from_millis(500);

/// ADC reference (mV).
const REF_MILLIVOLTS: u32 = 3300;

/// VSYS voltage divider ratio on the Pico.
const V_DIVIDER_RATIO: u32 = 3;

/// ADC resolution (12-bit).
const ADC_RANGE: u32 = 4096;

/// Median filter window for the battery reading.
const MEDIAN_WINDOW_SIZE: usize = 9;

#[embassy_executor::task]
pub async fn wand_control(r: WandResources) {
    let mut adc = Adc::new(r.adc, Irqs, AdcConfig::default());
    let mut battery = AdcChannel::new_pin(r.vsys_pin, Pull::None);
    let mut leds = TimeLeds::new([
        Output::new(r.quarter_yellow, Level::Low),
        Output::new(r.quarter_green, Level::Low),
        Output::new(r.quarter_blue, Level::Low),
        Output::new(r.quarter_gray, Level::Low),
        Output::new(r.hour_brown, Level::Low),
        Output::new(r.hour_purple, Level::Low),
        Output::new(r.hour_red, Level::Low),
        Output::new(r.hour_orange, Level::Low),
    ]);
    let mut light = Output::new(r.light_pin, Level::Low);
    let mut btn_light = Input::new(r.btn_light, Pull::Up);
    let mut btn_time = Input::new(r.btn_time, Pull::Up);
    let mut clock = SoftClock::new();
    let mut lights_on = false;

    loop {
        match select(
            btn_light.wait_for_falling_edge(),
            btn_time.wait_for_falling_edge(),
        )
        .await
        {
            Either::First(()) => {
                lights_on = !lights_on;
                light.set_level(level(lights_on));
                if let Either::Second(()) = select(
                    btn_light.wait_for_rising_edge(),
                    Timer::after(POWER_BAR_TIMEOUT),
                )
                .await
                {
                    // power bar spell: light kept as it was
                    lights_on = !lights_on;
                    light.set_level(level(lights_on));
                    let mv = battery_millivolts(&mut adc, &mut battery).await;
                    info!("battery at {} mV", mv);
                    leds.show(power_bar(mv), None, true);
                    btn_light.wait_for_rising_edge().await;
                    leds.clear();
                }
            }
            Either::Second(()) => {
                let (hour, quarter) = clock.now();
                leds.show(time_encode(hour, quarter), None, true);
                match select(
                    btn_time.wait_for_rising_edge(),
                    Timer::after(SET_TIME_TIMEOUT),
                )
                .await
                {
                    Either::First(()) => leds.clear(),
                    Either::Second(()) => {
                        set_time(&mut clock, &mut leds, &mut btn_light, &mut btn_time).await;
                    }
                }
            }
        }
    }
}

fn level(on: bool) -> Level {
    if on {
        Level::High
    } else {
        Level::Low
    }
}

async fn battery_millivolts(
    adc: &mut Adc<'static, embassy_rp::adc::Async>,
    battery: &mut AdcChannel<'static>,
) -> u32 {
    let mut filter = MovingMedian::<f32, MEDIAN_WINDOW_SIZE>::new();
    for _ in 0..MEDIAN_WINDOW_SIZE {
        let raw = adc.read(battery).await.unwrap_or(0);
        filter.add_value(raw as f32);
        Timer::after_millis(2).await;
    }
    filter.median() as u32 * REF_MILLIVOLTS * V_DIVIDER_RATIO / ADC_RANGE
}

async fn set_time(
    clock: &mut SoftClock,
    leds: &mut TimeLeds,
    btn_light: &mut Input<'static>,
    btn_time: &mut Input<'static>,
) {
    // entered with the time button still held
    btn_time.wait_for_rising_edge().await;

    let (mut hour, mut quarter) = clock.now();
    let mut group = Group::Hours;
    let mut phase = true;
    info!("setting time, starting from {}:{}", hour, quarter);

    loop {
        leds.show(time_encode(hour, quarter), Some(group), phase);
        match select3(
            Timer::after(BLINK_TIMEOUT),
            btn_light.wait_for_falling_edge(),
            btn_time.wait_for_falling_edge(),
        )
        .await
        {
            Either3::First(()) => phase = !phase,
            Either3::Second(()) => {
                // steady display while a button is held
                leds.show(time_encode(hour, quarter), None, true);
                match select(
                    btn_light.wait_for_rising_edge(),
                    Timer::after(SET_TIME_TIMEOUT),
                )
                .await
                {
                    Either::First(()) => match group {
                        Group::Hours => {
                            hour = if hour == 0 { HOUR_MAX - 1 } else { hour - 1 };
                        }
                        Group::Quarters => {
                            quarter = if quarter == 0 {
                                QUARTER_MAX - 1
                            } else {
                                quarter - 1
                            };
                        }
                    },
                    Either::Second(()) => {
                        info!("abandoning time set");
                        leds.clear();
                        btn_light.wait_for_rising_edge().await;
                        return;
                    }
                }
            }
            Either3::Third(()) => {
                leds.show(time_encode(hour, quarter), None, true);
                match select(
                    btn_time.wait_for_rising_edge(),
                    Timer::after(SET_TIME_TIMEOUT),
                )
                .await
                {
                    Either::First(()) => match group {
                        Group::Hours => hour = (hour + 1) % HOUR_MAX,
                        Group::Quarters => quarter = (quarter + 1) % QUARTER_MAX,
                    },
                    Either::Second(()) => match group {
                        Group::Hours => {
                            group = Group::Quarters;
                            btn_time.wait_for_rising_edge().await;
                        }
                        Group::Quarters => {
                            clock.set(hour, quarter);
                            info!("time set to {}:{}", hour, quarter);
                            leds.clear();
                            btn_time.wait_for_rising_edge().await;
                            return;
                        }
                    },
                }
            }
        }
    }
}
