//! Machine timer unit tests.
//!
//! Verifies the disabled state, prescaler phase, re-arming, and that the driver
//! publishes `mtime` to the device in lock-step with the clock.

use crate::common::harness::TestContext;
use edfic_vip::Dut;
use edfic_vip::timer::{MachineTimer, Prescaler};
use proptest::prelude::*;

#[test]
fn timer_starts_disabled() {
    let timer = MachineTimer::new();
    assert!(!timer.is_running());
    assert_eq!(timer.mtime(), 0);
    assert_eq!(timer.prescaler(), Prescaler::default());
}

#[test]
fn disabled_timer_does_not_advance() {
    let mut timer = MachineTimer::new();
    for _ in 0..100 {
        assert!(!timer.tick(), "disabled timer must not tick");
    }
    assert_eq!(timer.mtime(), 0);
    assert_eq!(timer.prescaler().count, 0);
}

#[test]
fn prescaler_zero_ticks_every_cycle() {
    let mut timer = MachineTimer::new();
    timer.arm(0);
    assert!(timer.tick());
    assert!(timer.tick());
    assert_eq!(timer.mtime(), 2);
}

#[test]
fn prescaler_three_ticks_every_fourth_cycle() {
    let mut timer = MachineTimer::new();
    timer.arm(3);
    for expected_count in 1..=3 {
        assert!(!timer.tick());
        assert_eq!(timer.prescaler().count, expected_count);
    }
    assert!(timer.tick(), "fourth cycle increments mtime");
    assert_eq!(timer.mtime(), 1);
    assert_eq!(timer.prescaler().count, 0);
}

#[test]
fn rearm_keeps_mtime_and_restarts_phase() {
    let mut timer = MachineTimer::new();
    timer.arm(1);
    for _ in 0..5 {
        let _ = timer.tick();
    }
    assert_eq!(timer.mtime(), 2);
    assert_eq!(timer.prescaler().count, 1);

    timer.arm(0);
    assert_eq!(timer.mtime(), 2);
    assert_eq!(timer.prescaler(), Prescaler { count: 0, limit: 0 });
    assert!(timer.tick());
    assert_eq!(timer.mtime(), 3);
}

#[test]
fn driver_timer_prescale_three_after_twelve_cycles() {
    let mut ctx = TestContext::new();
    ctx.vip.arm_timer(3);
    ctx.vip.delay(12).unwrap();
    assert_eq!(ctx.vip.mtime(), 3);
    assert_eq!(ctx.dut().inputs().mtime, 3);
}

#[test]
fn driver_timer_is_idle_before_arming() {
    let mut ctx = TestContext::new();
    ctx.vip.delay(40).unwrap();
    assert!(!ctx.vip.timer().is_running());
    assert_eq!(ctx.dut().inputs().mtime, 0);
}

#[test]
fn mtime_is_driven_before_the_rising_edge() {
    let mut ctx = TestContext::new();
    ctx.vip.arm_timer(0);
    ctx.vip.delay(3).unwrap();
    let seen: Vec<u64> = ctx.dut().edges.iter().map(|e| e.inputs.mtime).collect();
    assert_eq!(seen, vec![1, 2, 3]);
}

#[test]
fn raise_reset_arms_with_configured_prescaler() {
    let ctx = TestContext::new().out_of_reset();
    let config = ctx.vip.config().clone();

    assert!(ctx.vip.timer().is_running());
    assert_eq!(ctx.vip.timer().prescaler().limit, config.mtime_prescaler);
    assert!(ctx.dut().inputs().rst_n);
    assert_eq!(
        ctx.vip.elapsed_cycles(),
        u64::from(config.reset_hold_cycles + config.reset_settle_cycles)
    );
    // 12 settle cycles at prescale 3.
    assert_eq!(ctx.vip.mtime(), 3);

    let held = config.reset_hold_cycles as usize;
    assert!(ctx.dut().edges[..held].iter().all(|e| !e.inputs.rst_n));
    assert!(ctx.dut().edges[held..].iter().all(|e| e.inputs.rst_n));
}

proptest! {
    #[test]
    fn mtime_is_cycles_over_prescale(prescale in any::<u8>(), cycles in 0u32..2048) {
        let mut timer = MachineTimer::new();
        timer.arm(prescale);
        for _ in 0..cycles {
            let _ = timer.tick();
            prop_assert!(timer.prescaler().count <= timer.prescaler().limit);
        }
        prop_assert_eq!(timer.mtime(), u64::from(cycles) / (u64::from(prescale) + 1));
    }

    #[test]
    fn driver_mtime_tracks_elapsed_cycles(prescale in 0u8..8, cycles in 0u32..96) {
        let mut ctx = TestContext::new();
        ctx.vip.arm_timer(prescale);
        ctx.vip.delay(cycles).unwrap();
        let expected = u64::from(cycles) / (u64::from(prescale) + 1);
        prop_assert_eq!(ctx.vip.mtime(), expected);
        prop_assert_eq!(ctx.dut().inputs().mtime, expected);
    }
}
