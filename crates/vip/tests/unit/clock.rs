//! Clock harness tests.
//!
//! Verifies edge sequencing, waveform timestamps, tracer lifecycle, and that a failing
//! tracer aborts the run.

use crate::common::harness::{TestContext, init_tracing};
use crate::common::mocks::decisions::ScriptedDecisions;
use crate::common::mocks::device::RegFileDut;
use crate::common::mocks::tracer::FailingTracer;
use edfic_vip::clock::EdgeTimes;
use edfic_vip::config::VipConfig;
use edfic_vip::{EdfIcVip, NoTrace, VipError};
use pretty_assertions::assert_eq;
use rstest::rstest;
use std::sync::Arc;
use std::sync::atomic::Ordering;

#[rstest]
#[case(10_000, 2, EdgeTimes { pre_rise: 18_000, rise: 20_000, fall: 25_000 })]
#[case(10_000, 4, EdgeTimes { pre_rise: 38_000, rise: 40_000, fall: 45_000 })]
#[case(1_000, 8, EdgeTimes { pre_rise: 7_800, rise: 8_000, fall: 8_500 })]
#[case(10_000, u64::MAX, EdgeTimes { pre_rise: u64::MAX - 2_000, rise: u64::MAX, fall: u64::MAX })]
fn edge_times_of_tick(#[case] period: u64, #[case] tick: u64, #[case] expected: EdgeTimes) {
    assert_eq!(EdgeTimes::of_cycle(period, tick), expected);
}

#[test]
fn first_cycle_lands_on_the_second_tick() {
    let mut ctx = TestContext::new();
    ctx.vip.delay(1).unwrap();

    let stamps: Vec<u64> = ctx.samples().iter().map(|s| s.time_ps).collect();
    assert_eq!(stamps, vec![18_000, 20_000, 25_000]);
    assert_eq!(ctx.vip.elapsed_cycles(), 1);
}

#[test]
fn construction_evaluates_once_with_clock_low() {
    let ctx = TestContext::new();
    assert_eq!(ctx.dut().evals, 1);
    assert!(ctx.dut().edges.is_empty());
    assert!(ctx.samples().is_empty());
    assert_eq!(ctx.vip.elapsed_cycles(), 0);
}

#[test]
fn each_cycle_is_three_evaluations() {
    let mut ctx = TestContext::new();
    ctx.vip.delay(5).unwrap();
    assert_eq!(ctx.dut().evals, 1 + 3 * 5);
    assert_eq!(ctx.dut().edges.len(), 5);
    assert_eq!(ctx.vip.elapsed_cycles(), 5);
    assert_eq!(ctx.vip.stats().cycles, 5);
}

#[test]
fn samples_land_on_edge_offsets() {
    let mut ctx = TestContext::new();
    ctx.vip.delay(2).unwrap();

    let stamps: Vec<(u64, bool)> = ctx
        .samples()
        .iter()
        .map(|s| (s.time_ps, s.inputs.clk))
        .collect();
    assert_eq!(
        stamps,
        vec![
            (18_000, false),
            (20_000, true),
            (25_000, false),
            (28_000, false),
            (30_000, true),
            (35_000, false),
        ]
    );
    assert_eq!(ctx.trace.lock().unwrap().flushes, 2);
}

#[test]
fn timestamps_follow_configured_period() {
    let config = VipConfig {
        clock_period_ps: 2_000,
        ..VipConfig::default()
    };
    let mut ctx = TestContext::with_config(ScriptedDecisions::new(), config);
    ctx.vip.delay(1).unwrap();

    let stamps: Vec<u64> = ctx.samples().iter().map(|s| s.time_ps).collect();
    assert_eq!(stamps, vec![3_600, 4_000, 5_000]);
}

#[test]
fn timestamps_are_strictly_increasing() {
    let mut ctx = TestContext::new().out_of_reset();
    ctx.vip.delay(10).unwrap();
    let stamps: Vec<u64> = ctx.samples().iter().map(|s| s.time_ps).collect();
    assert!(stamps.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn close_closes_tracer_once() {
    let mut ctx = TestContext::new();
    ctx.vip.delay(1).unwrap();
    ctx.vip.close().unwrap();
    ctx.vip.close().unwrap();
    assert!(ctx.vip.tracer().is_none());
    assert_eq!(ctx.trace.lock().unwrap().closes, 1);

    ctx.vip.delay(3).unwrap();
    assert_eq!(ctx.samples().len(), 3, "cycles after close run untraced");
    assert_eq!(ctx.vip.elapsed_cycles(), 4);
}

#[test]
fn drop_closes_tracer() {
    let ctx = TestContext::new();
    let log = ctx.trace.clone();
    drop(ctx);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[test]
fn drop_after_close_does_not_close_again() {
    let mut ctx = TestContext::new();
    let log = ctx.trace.clone();
    ctx.vip.close().unwrap();
    drop(ctx);
    assert_eq!(log.lock().unwrap().closes, 1);
}

#[test]
fn tracer_failure_aborts_the_run() {
    let mut vip = EdfIcVip::with_decisions(
        RegFileDut::new(),
        FailingTracer::after(4),
        ScriptedDecisions::new(),
        VipConfig::default(),
    )
    .unwrap();

    vip.delay(1).unwrap();
    let err = vip.delay(1).unwrap_err();
    assert!(matches!(err, VipError::Trace(_)), "got {err:?}");
}

fn failing_close_driver() -> EdfIcVip<RegFileDut, FailingTracer, ScriptedDecisions> {
    EdfIcVip::with_decisions(
        RegFileDut::new(),
        FailingTracer::on_close(),
        ScriptedDecisions::new(),
        VipConfig::default(),
    )
    .unwrap()
}

#[test]
fn close_failure_is_reported_once() {
    let mut vip = failing_close_driver();
    let attempts = Arc::clone(&vip.tracer().unwrap().close_attempts);
    vip.delay(2).unwrap();

    let err = vip.close().unwrap_err();
    assert!(matches!(err, VipError::Trace(_)), "got {err:?}");
    assert!(vip.tracer().is_none());
    vip.close().unwrap();
    drop(vip);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn drop_with_failing_close_does_not_panic() {
    init_tracing();
    let mut vip = failing_close_driver();
    let attempts = Arc::clone(&vip.tracer().unwrap().close_attempts);
    vip.delay(2).unwrap();

    drop(vip);
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[test]
fn driver_runs_untraced() {
    let mut vip =
        EdfIcVip::with_decisions(RegFileDut::new(), NoTrace, ScriptedDecisions::new(), VipConfig::default())
            .unwrap();
    vip.delay(5).unwrap();
    assert_eq!(vip.elapsed_cycles(), 5);
    assert_eq!(vip.dut().edges.len(), 5);
}
