//! ESP-IDF GPIO implementation of the DDS bus.
//!
//! One GPIO write per bus operation. The ESP32 GPIO matrix has no
//! hardware toggle register, so FQ_UD and W_CLK levels are shadowed in
//! software and a toggle is a shadowed-flip plus one level write.

use esp_idf_svc::sys::{
    esp, gpio_mode_t_GPIO_MODE_OUTPUT, gpio_set_direction, gpio_set_level, EspError,
};

use crate::dds::bus::DdsBus;

/// Pin assignment for the parallel-load wiring.
///
/// Each transferred byte is split across two groups: `data` carries bits
/// 0-5, `data_high` carries bits 6-7. `mod_disable` mirrors the reserved
/// modulation-disable line of the reference wiring; it is listed so the
/// pin stays claimed but no logic drives it.
#[derive(Clone, Copy, Debug)]
pub struct DdsPins {
    pub reset: i32,
    pub fq_ud: i32,
    pub w_clk: i32,
    pub trigger: i32,
    pub mod_disable: i32,
    /// D0..D5 of each transferred byte, LSB first.
    pub data: [i32; 6],
    /// D6 and D7 of each transferred byte.
    pub data_high: [i32; 2],
}

impl DdsPins {
    /// Default wiring for the dev board layout.
    pub const fn default_wiring() -> Self {
        Self {
            reset: 4,
            fq_ud: 5,
            w_clk: 6,
            trigger: 7,
            mod_disable: 15,
            data: [8, 9, 10, 11, 12, 13],
            data_high: [14, 16],
        }
    }
}

/// [`DdsBus`] over ESP-IDF GPIO.
pub struct EspDdsBus {
    pins: DdsPins,
    update_level: bool,
    clock_level: bool,
}

impl EspDdsBus {
    /// Configure every driven line as an output, all low.
    ///
    /// The reserved `mod_disable` pin is left unconfigured.
    pub fn new(pins: DdsPins) -> Result<Self, EspError> {
        let mut outputs = [0i32; 12];
        outputs[0] = pins.reset;
        outputs[1] = pins.fq_ud;
        outputs[2] = pins.w_clk;
        outputs[3] = pins.trigger;
        outputs[4..10].copy_from_slice(&pins.data);
        outputs[10..12].copy_from_slice(&pins.data_high);

        for pin in outputs {
            unsafe {
                esp!(gpio_set_direction(pin, gpio_mode_t_GPIO_MODE_OUTPUT))?;
                esp!(gpio_set_level(pin, 0))?;
            }
        }

        Ok(Self {
            pins,
            update_level: false,
            clock_level: false,
        })
    }

    #[inline]
    fn write(pin: i32, high: bool) {
        // Open-loop: level writes on a configured output cannot fail.
        unsafe {
            gpio_set_level(pin, high as u32);
        }
    }
}

impl DdsBus for EspDdsBus {
    #[inline]
    fn set_reset(&mut self, high: bool) {
        Self::write(self.pins.reset, high);
    }

    #[inline]
    fn set_update(&mut self, high: bool) {
        self.update_level = high;
        Self::write(self.pins.fq_ud, high);
    }

    #[inline]
    fn set_trigger(&mut self, high: bool) {
        Self::write(self.pins.trigger, high);
    }

    #[inline]
    fn toggle_update(&mut self) {
        self.update_level = !self.update_level;
        Self::write(self.pins.fq_ud, self.update_level);
    }

    #[inline]
    fn toggle_clock(&mut self) {
        self.clock_level = !self.clock_level;
        Self::write(self.pins.w_clk, self.clock_level);
    }

    #[inline]
    fn write_low6(&mut self, bits: u8) {
        for (i, &pin) in self.pins.data.iter().enumerate() {
            Self::write(pin, (bits >> i) & 1 != 0);
        }
    }

    #[inline]
    fn write_high2(&mut self, bits: u8) {
        Self::write(self.pins.data_high[0], bits & 0x40 != 0);
        Self::write(self.pins.data_high[1], bits & 0x80 != 0);
    }
}
