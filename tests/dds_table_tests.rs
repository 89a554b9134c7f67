//! Modulation table construction tests

use rust_fm_beacon::{
    BeaconConfig, ConfigError, Cursor, ModulationTable, SINE_1KHZ_HALF, TABLE_LEN,
};

fn reference_table() -> ModulationTable {
    ModulationTable::build(&BeaconConfig::DEFAULT).unwrap()
}

#[test]
fn test_symmetry_invariant() {
    let table = reference_table();
    let base = table.base().raw() as u64;
    let words = table.words();

    for i in 0..TABLE_LEN / 2 {
        let sum = words[i].raw() as u64 + words[i + 32].raw() as u64;
        assert_eq!(sum, 2 * base, "symmetry broken at index {}", i);
    }
}

#[test]
fn test_end_to_end_reference_scenario() {
    // deviation 2.5 kHz: offset at index 8 is round(24296 * 2.5) = 60740.
    let table = reference_table();
    let base = table.base().raw();
    let words = table.words();

    assert_eq!(base, 687_194_767);
    assert_eq!(words[0].raw(), base);
    assert_eq!(words[8].raw(), base + 60_740);
    assert_eq!(words[40].raw(), base - 60_740);
}

#[test]
fn test_peak_deviation_at_quarter_turn() {
    let table = reference_table();
    let base = table.base().raw();
    let words = table.words();

    // Peak reference sample 34360 scaled by 2.5 -> 85900.
    assert_eq!(words[16].raw(), base + 85_900);
    assert_eq!(words[48].raw(), base - 85_900);

    let max = words.iter().map(|w| w.raw()).max().unwrap();
    let min = words.iter().map(|w| w.raw()).min().unwrap();
    assert_eq!(max, words[16].raw());
    assert_eq!(min, words[48].raw());
}

#[test]
fn test_first_quarter_monotonic() {
    let table = reference_table();
    let words = table.words();
    for i in 0..16 {
        assert!(
            words[i].raw() < words[i + 1].raw(),
            "rising quarter not monotonic at {}",
            i
        );
    }
}

#[test]
fn test_zero_deviation_is_flat_carrier() {
    let config = BeaconConfig {
        deviation_hz: 0,
        ..BeaconConfig::DEFAULT
    };
    let table = ModulationTable::build(&config).unwrap();
    for word in table.words() {
        assert_eq!(*word, table.base());
    }
}

#[test]
fn test_overflowing_deviation_rejected() {
    // Absurd deviation: first nonzero sample already leaves u32 range.
    let config = BeaconConfig {
        deviation_hz: u32::MAX,
        ..BeaconConfig::DEFAULT
    };
    assert!(matches!(
        ModulationTable::build(&config),
        Err(ConfigError::TuningWordOverflow { .. })
    ));
}

#[test]
fn test_invalid_config_rejected_before_build() {
    let config = BeaconConfig {
        clock_hz: 0,
        ..BeaconConfig::DEFAULT
    };
    assert!(matches!(
        ModulationTable::build(&config),
        Err(ConfigError::ZeroClock)
    ));
}

#[test]
fn test_cursor_visits_every_entry_once() {
    let mut cursor = Cursor::at(17);
    let mut visited = [false; TABLE_LEN];

    for _ in 0..TABLE_LEN {
        assert!(!visited[cursor.index()]);
        visited[cursor.index()] = true;
        cursor.advance();
    }

    assert_eq!(cursor, Cursor::at(17));
    assert!(visited.iter().all(|&v| v));
}

#[test]
fn test_reference_samples_are_sine_lobe() {
    assert_eq!(SINE_1KHZ_HALF.len(), TABLE_LEN / 2);
    assert_eq!(SINE_1KHZ_HALF[0], 0);
    assert_eq!(SINE_1KHZ_HALF[8], 24_296);
    // Mirror symmetry of the half cycle around the peak.
    for i in 1..16 {
        assert_eq!(SINE_1KHZ_HALF[i], SINE_1KHZ_HALF[32 - i]);
    }
}
