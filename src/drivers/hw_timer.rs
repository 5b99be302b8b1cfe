//! Clock tick source.
//!
//! On ESP-IDF a periodic `esp_timer` fires every `tick_interval_us` and
//! advances the shared [`ClockTicker`](crate::clock::ClockTicker).  On
//! simulation targets a plain thread sleeps between ticks.
//!
//! Timer callbacks execute in the ESP timer task context (not ISR); the
//! tick itself is two relaxed atomic updates.

use crate::error::{HwInitError, Result};
use crate::shared::SharedState;

#[cfg(target_os = "espidf")]
use esp_idf_svc::sys::*;

#[cfg(target_os = "espidf")]
use log::info;

#[cfg(target_os = "espidf")]
static mut CLOCK_TIMER: esp_timer_handle_t = core::ptr::null_mut();

#[cfg(target_os = "espidf")]
unsafe extern "C" fn clock_tick_cb(arg: *mut core::ffi::c_void) {
    // SAFETY: `arg` is the `&'static SharedState` registered in
    // `start_clock()`; it outlives the timer.
    let shared = unsafe { &*(arg as *const SharedState) };
    shared.clock().tick();
}

/// Start the periodic clock tick.
#[cfg(target_os = "espidf")]
pub fn start_clock(shared: &'static SharedState, tick_interval_us: u32) -> Result<()> {
    // SAFETY: CLOCK_TIMER is written here once at boot from the main task
    // before the callback can fire.  The callback only reads `arg`.
    unsafe {
        let args = esp_timer_create_args_t {
            callback: Some(clock_tick_cb),
            arg: core::ptr::from_ref(shared).cast_mut().cast(),
            dispatch_method: esp_timer_dispatch_t_ESP_TIMER_TASK,
            name: c"clock".as_ptr(),
            skip_unhandled_events: false,
        };
        let ret = esp_timer_create(&args, &raw mut CLOCK_TIMER);
        if ret != ESP_OK {
            return Err(HwInitError::TimerStartFailed(ret).into());
        }
        let ret = esp_timer_start_periodic(CLOCK_TIMER, u64::from(tick_interval_us));
        if ret != ESP_OK {
            return Err(HwInitError::TimerStartFailed(ret).into());
        }
    }
    info!("hw_timer: clock tick every {tick_interval_us} us");
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
pub fn start_clock(shared: &'static SharedState, tick_interval_us: u32) -> Result<()> {
    let period = std::time::Duration::from_micros(u64::from(tick_interval_us.max(1)));
    std::thread::Builder::new()
        .name("clock".into())
        .spawn(move || {
            loop {
                std::thread::sleep(period);
                shared.clock().tick();
            }
        })
        .map_err(|_| HwInitError::TimerStartFailed(-1))?;
    log::info!("hw_timer(sim): clock thread ticking every {tick_interval_us} us");
    Ok(())
}
