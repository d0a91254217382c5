//! Integration tests for the predefined level table.
//!
//! These tests verify the strict ordering of the predefined levels, the
//! sentinel values, and name/number lookups used when parsing configuration.

use logging::{Level, PREDEFINED_LEVELS};

// ============================================================================
// Ordering Tests
// ============================================================================

/// Verifies the full severity chain from OFF down to ALL.
#[test]
fn predefined_levels_form_strict_total_order() {
    let chain = [
        Level::OFF,
        Level::SHOUT,
        Level::SEVERE,
        Level::WARNING,
        Level::INFO,
        Level::CONFIG,
        Level::FINE,
        Level::FINER,
        Level::FINEST,
        Level::ALL,
    ];

    for pair in chain.windows(2) {
        assert!(pair[0].value() > pair[1].value());
        assert!(pair[0] > pair[1]);
    }
}

/// Verifies the exported table matches the chain in the same order.
#[test]
fn predefined_table_is_ordered_most_severe_first() {
    let names: Vec<&str> = PREDEFINED_LEVELS.iter().map(Level::name).collect();
    assert_eq!(
        names,
        [
            "OFF", "SHOUT", "SEVERE", "WARNING", "INFO", "CONFIG", "FINE", "FINER", "FINEST",
            "ALL"
        ]
    );
}

/// Verifies the documented weights of the predefined levels.
#[test]
fn predefined_weights() {
    assert_eq!(Level::SHOUT.value(), 1200);
    assert_eq!(Level::SEVERE.value(), 1000);
    assert_eq!(Level::WARNING.value(), 900);
    assert_eq!(Level::INFO.value(), 800);
    assert_eq!(Level::CONFIG.value(), 700);
    assert_eq!(Level::FINE.value(), 500);
    assert_eq!(Level::FINER.value(), 400);
    assert_eq!(Level::FINEST.value(), 300);
}

// ============================================================================
// Sentinel Tests
// ============================================================================

/// Verifies ALL is zero and OFF is the largest representable weight.
#[test]
fn sentinel_values() {
    assert_eq!(Level::ALL.value(), 0);
    assert_eq!(Level::OFF.value(), u32::MAX);
    assert!(PREDEFINED_LEVELS.iter().all(|level| *level <= Level::OFF));
    assert!(PREDEFINED_LEVELS.iter().all(|level| *level >= Level::ALL));
}

// ============================================================================
// Lookup Tests
// ============================================================================

/// Verifies every predefined level can be found by its own name.
#[test]
fn every_predefined_level_round_trips_through_its_name() {
    for level in &PREDEFINED_LEVELS {
        assert_eq!(Level::predefined(level.name()).as_ref(), Some(level));
        assert_eq!(level.to_string().parse::<Level>().as_ref(), Ok(level));
    }
}

/// Verifies custom levels are accepted without validation.
#[test]
fn custom_levels_are_unvalidated() {
    let duplicate = Level::new("INFO", 800);
    assert_eq!(duplicate, Level::INFO);

    let owned = Level::new(String::from("VERBOSE"), 450);
    assert!(owned > Level::FINER && owned < Level::FINE);
    assert_eq!(Level::predefined("VERBOSE"), None);
}
