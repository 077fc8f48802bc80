// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{MachineConfig, fmt_mm};

#[test]
fn plain_columns_step_by_pitch() {
    let m = MachineConfig::default();
    assert_eq!(fmt_mm(m.column_to_x(0)), "0");
    assert_eq!(fmt_mm(m.column_to_x(1)), "2.54");
    assert_eq!(fmt_mm(m.column_to_x(10)), "25.4");
}

#[test]
fn rail_spans_use_the_calibrated_width() {
    let m = MachineConfig::default();
    // Columns -3..0 cover 6.7mm total instead of 3 * 2.54.
    assert_eq!(fmt_mm(m.column_to_x(-3)), "-6.7");
    assert_eq!(fmt_mm(m.column_to_x(-4)), "-9.24");
    // Columns 11..14 likewise.
    assert_eq!(fmt_mm(m.column_to_x(11)), "27.94");
    assert_eq!(fmt_mm(m.column_to_x(14)), "34.64");
    assert_eq!(fmt_mm(m.column_to_x(15)), "37.18");
}

#[test]
fn rows_are_uniform() {
    let m = MachineConfig::default();
    assert_eq!(fmt_mm(m.row_to_y(0)), "0");
    assert_eq!(fmt_mm(m.row_to_y(3)), "7.62");
}

#[test]
fn millimeters_print_with_up_to_three_decimals() {
    assert_eq!(fmt_mm(23.7), "23.7");
    assert_eq!(fmt_mm(25.0), "25");
    assert_eq!(fmt_mm(1.2345), "1.234");
    assert_eq!(fmt_mm(1.2346), "1.235");
    assert_eq!(fmt_mm(-0.0001), "0");
    assert_eq!(fmt_mm(186.89999999999998), "186.9");
}
