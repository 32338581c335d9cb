//! Scheduler tests.
//!
//! The scheduler replaces the physical clock: every registered unit
//! advances exactly one phase per tick, units never interact, and callers
//! observe the same handshake they would driving a unit directly.

use pretty_assertions::assert_eq;

use fpsim_core::common::constants::{ADD_LATENCY, DIV_LATENCY};
use fpsim_core::format::{float_to_signed, signed_to_float};
use fpsim_core::units::FpUnit;
use fpsim_core::units::adder::Adder;
use fpsim_core::units::divider::Divider;
use fpsim_core::units::multiplier::Multiplier;
use fpsim_core::{FloatValue, Scheduler};

use crate::common::fv;
use crate::common::stub::StubUnit;

#[test]
fn execute_runs_a_full_handshake() {
    let mut sched = Scheduler::new();
    let adder = sched.add_unit(Box::new(Adder::new()));

    let result = sched.execute(adder, fv(false, 1, 0), fv(false, 1, 0x400000));
    assert_eq!(result, fv(false, 2, 0x200000)); // 2 + 3 = 5
    assert!(sched.unit(adder).is_idle());
    // Request ticks plus the release tick.
    assert_eq!(sched.cycles(), ADD_LATENCY + 1);
}

#[test]
fn units_progress_concurrently_at_their_own_pace() {
    let mut sched = Scheduler::new();
    let adder = sched.add_unit(Box::new(Adder::new()));
    let divider = sched.add_unit(Box::new(Divider::new()));

    // Start both operations on the same tick through the raw ports.
    let one = fv(false, 0, 0);
    let three = fv(false, 1, 0x400000);
    {
        let unit = sched.unit_mut(adder);
        unit.set_operands(one, one);
        unit.set_request(true);
    }
    {
        let unit = sched.unit_mut(divider);
        unit.set_operands(one, three);
        unit.set_request(true);
    }

    // The adder finishes while the divider is still iterating.
    for _ in 0..ADD_LATENCY {
        sched.tick();
    }
    assert!(sched.unit(adder).done());
    assert!(!sched.unit(divider).done());
    assert_eq!(sched.unit(adder).result(), fv(false, 1, 0)); // 1 + 1 = 2

    // Release the adder; the divider keeps going unaffected.
    sched.unit_mut(adder).set_request(false);
    for _ in 0..(DIV_LATENCY - ADD_LATENCY) {
        sched.tick();
    }
    assert!(sched.unit(adder).is_idle());
    assert!(sched.unit(divider).done());
    let third = sched.unit(divider).result();
    assert_eq!(third.exponent(), 126);
    assert_eq!(third.mantissa(), 0x2AAAAA);
}

#[test]
fn recursive_difference_equation_caller() {
    // y[n] = 0.5 * y[n-1] + x[n], driven the way the example filter chains
    // units: one multiplier and one adder, a full handshake each per sample.
    let mut sched = Scheduler::new();
    let multiplier = sched.add_unit(Box::new(Multiplier::new()));
    let adder = sched.add_unit(Box::new(Adder::new()));

    let half = fv(false, -1, 0);
    let x = fv(false, 0, 0); // constant input of 1.0
    let mut y = FloatValue::zero();
    for _ in 0..4 {
        let scaled = sched.execute(multiplier, half, y);
        y = sched.execute(adder, scaled, x);
    }
    // 1.0, 1.5, 1.75, 1.875
    assert_eq!(y, fv(false, 0, 0x700000));
}

#[test]
fn fixed_point_pipeline_round_trip() {
    // Integer in, integer out: encode, accumulate, decode.
    let mut sched = Scheduler::new();
    let adder = sched.add_unit(Box::new(Adder::new()));

    let a = signed_to_float(1234, 16);
    let b = signed_to_float(-234, 16);
    let sum = sched.execute(adder, a, b);
    assert_eq!(float_to_signed(sum, 16), 1000);
}

#[test]
fn report_aggregates_unit_counters() {
    let mut sched = Scheduler::new();
    let adder = sched.add_unit(Box::new(Adder::new()));
    let multiplier = sched.add_unit(Box::new(Multiplier::new()));

    let two = fv(false, 1, 0);
    let _ = sched.execute(adder, two, two);
    let _ = sched.execute(multiplier, two, two);
    let _ = sched.execute(multiplier, two, two);

    let report = sched.report();
    assert_eq!(report.cycles, sched.cycles());
    assert_eq!(report.units.len(), 2);
    assert_eq!(report.units[0].stats.ops_completed, 1);
    assert_eq!(report.units[1].stats.ops_completed, 2);
    let busy = report.units[0].stats.utilization(report.cycles);
    assert!(busy > 0.0 && busy < 1.0);

    let Ok(json) = report.to_json() else {
        panic!("report did not serialize");
    };
    assert!(json.contains("\"cycles\""));
    assert!(json.contains("\"ops_completed\""));
}

#[test]
fn stub_unit_honors_configured_latency() {
    let mut sched = Scheduler::new();
    let stub = sched.add_unit(Box::new(StubUnit::new(7)));

    let v = fv(false, 3, 0x123456);
    {
        let unit = sched.unit_mut(stub);
        unit.set_operands(v, FloatValue::zero());
        unit.set_request(true);
    }
    for _ in 0..6 {
        sched.tick();
        assert!(!sched.unit(stub).done());
    }
    sched.tick();
    assert!(sched.unit(stub).done());
    assert_eq!(sched.unit(stub).result(), v);
}
