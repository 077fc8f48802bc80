// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use bpc::SolveConfig;
use criterion::{Criterion, criterion_group, criterion_main};

const LED_DRIVER: &str = "V1 VCC 0 DC 5
R1 VCC N1 330
D1 N1 0 DLED
R2 VCC N2 470
D2 N2 0 DLED
.model DLED D ( IS=1e-14 )
.end
";

pub fn led_driver(c: &mut Criterion) {
    c.bench_function("place and route two LED drivers", |b| {
        b.iter(|| {
            let solved = bpc::solve(LED_DRIVER, &SolveConfig::default()).expect("solves");
            assert!(solved.solution.ok);
        });
    });
}

criterion_group!(benches, led_driver);
criterion_main!(benches);
