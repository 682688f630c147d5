// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Behavioural laws of filter intersection, checked over randomly
//! generated filters with a fixed seed.
//!
//! For any two filters `a`, `b` on the same column and any probe `v`:
//!
//! - conjunction: `a.merge_with(b)` accepts `v` iff both `a` and `b` do,
//! - null law: the merge accepts null iff both sides do,
//! - commutativity: `a.merge_with(b)` and `b.merge_with(a)` accept the
//!   same inputs,
//! - idempotence: `a.merge_with(a)` behaves like `a`.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use scan_filter::{
    create_bigint_values, BigintMultiRange, BigintRange, Filter, FloatRange,
    MultiRange,
};

const SEED: u64 = 0x5eed;

/// Probe values covering the generator's domain, its edges, and far
/// outliers.
fn int_probes() -> Vec<i64> {
    let mut probes: Vec<i64> = (-30..=70).collect();
    probes.extend([
        500, 1_000_000, 1_000_007, 5_000_000, i64::MIN, i64::MAX,
    ]);
    probes
}

fn random_int_filter(rng: &mut StdRng) -> Filter {
    let null_allowed = rng.gen_bool(0.5);
    match rng.gen_range(0..10) {
        0 => Filter::AlwaysTrue,
        1 => Filter::AlwaysFalse,
        2 => Filter::IsNull,
        3 => Filter::IsNotNull,
        4 | 5 => {
            let lower = rng.gen_range(-25..50);
            let upper = rng.gen_range(lower..=60);
            BigintRange::try_new(lower, upper, null_allowed)
                .unwrap()
                .into()
        }
        6 | 7 | 8 => {
            // Distinct values, occasionally with far outliers so every
            // value-set representation shows up.
            let mut values = BTreeSet::new();
            for _ in 0..rng.gen_range(0..12) {
                values.insert(rng.gen_range(-25i64..60));
            }
            if rng.gen_bool(0.3) {
                values.insert(rng.gen_range(1_000_000i64..1_000_010));
                values.insert(5_000_000);
            }
            let values: Vec<i64> = values.into_iter().collect();
            create_bigint_values(&values, null_allowed).unwrap()
        }
        _ => {
            // Disjoint sorted ranges built from distinct cut points.
            let mut cuts = BTreeSet::new();
            while cuts.len() < 6 {
                cuts.insert(rng.gen_range(-25i64..60));
            }
            let cuts: Vec<i64> = cuts.into_iter().collect();
            let ranges = vec![
                BigintRange::try_new(cuts[0], cuts[1], null_allowed).unwrap(),
                BigintRange::try_new(cuts[2], cuts[3], null_allowed).unwrap(),
                BigintRange::try_new(cuts[4], cuts[5], null_allowed).unwrap(),
            ];
            BigintMultiRange::try_new(ranges, null_allowed)
                .unwrap()
                .into()
        }
    }
}

#[test]
fn int_merge_laws() {
    let mut rng = StdRng::seed_from_u64(SEED);
    let probes = int_probes();

    for round in 0..300 {
        let a = random_int_filter(&mut rng);
        let b = random_int_filter(&mut rng);

        let ab = a
            .merge_with(&b)
            .unwrap_or_else(|e| panic!("round {round}: {a} AND {b}: {e}"));
        let ba = b.merge_with(&a).unwrap();

        assert_eq!(
            ab.test_null(),
            a.test_null() && b.test_null(),
            "round {round}: null law for {a} AND {b}"
        );
        assert_eq!(ab.test_null(), ba.test_null(), "round {round}");

        for &v in &probes {
            let expected = a.test_int64(v) && b.test_int64(v);
            assert_eq!(
                ab.test_int64(v),
                expected,
                "round {round}: {a} AND {b} at {v}, merged to {ab}"
            );
            assert_eq!(
                ba.test_int64(v),
                expected,
                "round {round}: commutated {b} AND {a} at {v}"
            );
        }
    }
}

#[test]
fn int_merge_idempotence() {
    let mut rng = StdRng::seed_from_u64(SEED + 1);
    let probes = int_probes();

    for _ in 0..100 {
        let a = random_int_filter(&mut rng);
        let merged = a.merge_with(&a.clone_with(None)).unwrap();
        assert_eq!(merged.test_null(), a.test_null(), "{a}");
        for &v in &probes {
            assert_eq!(merged.test_int64(v), a.test_int64(v), "{a} at {v}");
        }
    }
}

#[test]
fn int_range_prune_soundness() {
    let mut rng = StdRng::seed_from_u64(SEED + 2);

    for _ in 0..200 {
        let filter = random_int_filter(&mut rng);
        for _ in 0..50 {
            let min = rng.gen_range(-30i64..70);
            let max = rng.gen_range(min..=70);
            let has_null = rng.gen_bool(0.5);
            let any_match = (min..=max).any(|v| filter.test_int64(v))
                || (has_null && filter.test_null());
            if any_match {
                assert!(
                    filter.test_int64_range(min, max, has_null),
                    "{filter} must keep page [{min}, {max}] has_null={has_null}"
                );
            }
        }
    }
}

fn random_float_filter(rng: &mut StdRng) -> Filter {
    let null_allowed = rng.gen_bool(0.5);
    let nan_allowed = rng.gen_bool(0.3);
    let range = |rng: &mut StdRng| {
        let lower = (rng.gen_range(-40i32..40) as f32) / 4.0;
        let upper = lower + (rng.gen_range(0i32..40) as f32) / 4.0;
        FloatRange::try_new(
            rng.gen_bool(0.9).then_some(lower),
            rng.gen_bool(0.3),
            rng.gen_bool(0.9).then_some(upper),
            rng.gen_bool(0.3),
            nan_allowed,
            null_allowed,
        )
        .unwrap()
    };
    match rng.gen_range(0..4) {
        0 => Filter::AlwaysTrue,
        1 => Filter::IsNotNull,
        2 => range(rng).into(),
        _ => {
            let children: Vec<Filter> =
                (0..rng.gen_range(1..4)).map(|_| range(rng).into()).collect();
            MultiRange::new(children, null_allowed, nan_allowed).into()
        }
    }
}

#[test]
fn float_merge_laws() {
    let mut rng = StdRng::seed_from_u64(SEED + 3);
    let mut probes: Vec<f32> = (-48..48).map(|v| v as f32 / 4.0).collect();
    probes.extend([f32::NAN, f32::INFINITY, f32::NEG_INFINITY]);

    for round in 0..300 {
        let a = random_float_filter(&mut rng);
        let b = random_float_filter(&mut rng);

        let ab = a
            .merge_with(&b)
            .unwrap_or_else(|e| panic!("round {round}: {a} AND {b}: {e}"));

        assert_eq!(
            ab.test_null(),
            a.test_null() && b.test_null(),
            "round {round}: null law for {a} AND {b}"
        );
        for &v in &probes {
            let expected = a.test_float(v) && b.test_float(v);
            assert_eq!(
                ab.test_float(v),
                expected,
                "round {round}: {a} AND {b} at {v}, merged to {ab}"
            );
        }
    }
}
