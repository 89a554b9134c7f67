//! RustFmBeacon - firmware entry point.
//!
//! One-time setup, then everything happens in the timer callback:
//! 1. Build the modulation table (fatal on config error, before any
//!    hardware is touched).
//! 2. Configure the DDS pins and reset the chip into parallel-load mode.
//! 3. Arm a periodic esp_timer at 64x the tone frequency; its callback
//!    owns the streamer and pushes one tuning word per firing.
//! 4. Idle, draining the log ring to the console.
//!
//! The main thread never reads streamer state after arming the timer.

use core::ffi::c_void;
use core::ptr;

use esp_idf_svc::sys::{
    self as esp_idf_sys, esp, esp_timer_create, esp_timer_create_args_t,
    esp_timer_dispatch_t_ESP_TIMER_ISR, esp_timer_get_time, esp_timer_handle_t,
    esp_timer_start_periodic,
};

use rust_fm_beacon::hal::{DdsPins, EspDdsBus};
use rust_fm_beacon::logging::{format_entry, LogRing};
use rust_fm_beacon::{enter_parallel_load, BeaconConfig, ModulationTable, Streamer};

static LOG_RING: LogRing = LogRing::new();

/// Everything the timer callback touches. Leaked once at startup; the
/// callback is the only code that sees it afterwards.
struct TickContext {
    streamer: Streamer<'static>,
    bus: EspDdsBus,
}

/// Periodic timer callback: exactly one table entry per firing.
///
/// ISR-dispatched (requires CONFIG_ESP_TIMER_SUPPORTS_ISR_DISPATCH_METHOD)
/// so there is no task-scheduling jitter between firings. Must complete
/// well inside the tick period.
unsafe extern "C" fn dds_tick(arg: *mut c_void) {
    let ctx = &mut *(arg as *mut TickContext);
    ctx.streamer.tick(&mut ctx.bus);
}

fn main() {
    // Required for ESP-IDF runtime patches before anything else runs.
    esp_idf_sys::link_patches();

    let config = BeaconConfig::DEFAULT;
    println!(
        "beacon: carrier {} Hz, clock {} Hz, deviation {} Hz, tone {} Hz",
        config.carrier_hz, config.clock_hz, config.deviation_hz, config.tone_hz
    );

    // Table build is the only fallible phase. Refuse to arm anything on
    // a bad configuration.
    let table: &'static ModulationTable = match ModulationTable::build(&config) {
        Ok(table) => Box::leak(Box::new(table)),
        Err(err) => {
            println!("beacon: fatal config error: {}", err);
            return;
        }
    };
    println!("beacon: base tuning word {}", table.base().raw());

    let mut bus = match EspDdsBus::new(DdsPins::default_wiring()) {
        Ok(bus) => bus,
        Err(err) => {
            println!("beacon: gpio init failed: {}", err);
            return;
        }
    };

    // Chip init: reset into parallel-load mode before the first tick.
    enter_parallel_load(&mut bus);

    let ctx: &'static mut TickContext = Box::leak(Box::new(TickContext {
        streamer: Streamer::new(table),
        bus,
    }));

    // Last push from the startup thread: once the timer is armed the
    // tick context owns the producer side of the ring.
    let now = unsafe { esp_timer_get_time() };
    rust_fm_beacon::rt_info!(
        LOG_RING,
        now,
        "streaming at {} Hz tick rate",
        config.tick_rate_hz()
    );

    let timer_args = esp_timer_create_args_t {
        callback: Some(dds_tick),
        arg: ctx as *mut TickContext as *mut c_void,
        dispatch_method: esp_timer_dispatch_t_ESP_TIMER_ISR,
        name: b"dds-tick\0".as_ptr().cast(),
        skip_unhandled_events: true,
    };

    let mut timer: esp_timer_handle_t = ptr::null_mut();
    let armed = unsafe {
        esp!(esp_timer_create(&timer_args, &mut timer))
            .and_then(|_| esp!(esp_timer_start_periodic(timer, config.tick_period_us())))
    };
    if let Err(err) = armed {
        println!("beacon: timer setup failed: {}", err);
        return;
    }

    // Idle forever; the tick callback does all the work.
    let mut buf = [0u8; 160];
    loop {
        while let Some(entry) = LOG_RING.drain() {
            let len = format_entry(&entry, &mut buf);
            if let Ok(text) = core::str::from_utf8(&buf[..len]) {
                print!("{}", text);
            }
        }

        let dropped = LOG_RING.dropped();
        if dropped > 0 {
            println!("beacon: {} log messages dropped", dropped);
            LOG_RING.reset_dropped();
        }

        unsafe {
            esp_idf_sys::vTaskDelay(10);
        }
    }
}
