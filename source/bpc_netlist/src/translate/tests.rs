// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{FamilyDefaults, translate, translate_with};
use crate::error::Error;
use crate::parse::parse;
use bpc_board::Orientation;
use indoc::indoc;

#[test]
fn single_resistor_across_rails() {
    let netlist = parse(indoc! {"
        * one resistor
        V1 VIN 0 DC 5
        R1 VIN 0 1k
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");

    assert_eq!(t.components.len(), 1);
    let r1 = &t.components[0];
    assert_eq!(r1.name, "R1");
    assert_eq!(r1.length, 3);
    assert_eq!(r1.orientation, Orientation::Vertical);
    assert_eq!(t.bindings["R1"], ("V+".to_string(), "GND".to_string()));
    // Rails are not internal nets; the nets map stays empty.
    assert!(t.nets.is_empty());
}

#[test]
fn led_instances_are_relabeled_and_nets_compacted() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        R1 VCC MID 330
        D1 MID 0 DLED
        .model DLED D ( IS=1e-14 )
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");

    let names: Vec<&str> = t.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["R1", "LED"]);
    assert_eq!(t.bindings["R1"], ("V+".to_string(), "N1".to_string()));
    assert_eq!(t.bindings["LED"], ("N1".to_string(), "GND".to_string()));
    assert_eq!(t.nets.keys().collect::<Vec<_>>(), ["N1"]);
}

#[test]
fn duplicate_base_names_get_suffixes() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        D1 VCC 0 DLED
        D2 VCC 0 DLED
        D3 VCC 0 DLED
        .model DLED D ( IS=1e-14 )
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");
    let names: Vec<&str> = t.components.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["LED", "LED1", "LED2"]);
}

#[test]
fn plain_diodes_keep_their_reference() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        D1 VCC 0 D1N4148
        .model D1N4148 D ( IS=1e-14 )
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");
    assert_eq!(t.components[0].name, "D1");
}

#[test]
fn ground_aliases_are_case_insensitive() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        R1 VCC gnd 1k
        R2 VCC GND 1k
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");
    assert_eq!(t.bindings["R1"], ("V+".to_string(), "GND".to_string()));
    assert_eq!(t.bindings["R2"], ("V+".to_string(), "GND".to_string()));
}

#[test]
fn internal_nets_number_in_first_seen_order() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        R1 VCC A 1k
        R2 A B 1k
        R3 B 0 1k
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");
    assert_eq!(t.bindings["R1"], ("V+".to_string(), "N1".to_string()));
    assert_eq!(t.bindings["R2"], ("N1".to_string(), "N2".to_string()));
    assert_eq!(t.bindings["R3"], ("N2".to_string(), "GND".to_string()));
    assert_eq!(t.nets.keys().collect::<Vec<_>>(), ["N1", "N2"]);
}

#[test]
fn supply_required_when_vplus_is_referenced() {
    // No V* source has its negative terminal grounded, so nothing maps to
    // V+; referencing it literally is an error.
    let netlist = parse(indoc! {"
        V1 VCC VEE DC 5
        R1 V+ 0 1k
        .end
    "})
    .expect("parses");
    assert!(matches!(translate(&netlist), Err(Error::MissingSupply)));
}

#[test]
fn netlist_without_rails_translates_without_supply() {
    let netlist = parse(indoc! {"
        R1 A B 1k
        .end
    "})
    .expect("parses");
    let t = translate(&netlist).expect("translates");
    assert_eq!(t.bindings["R1"], ("N1".to_string(), "N2".to_string()));
}

#[test]
fn family_defaults_are_overridable() {
    let netlist = parse(indoc! {"
        V1 VCC 0 DC 5
        L1 VCC 0 10u
        .end
    "})
    .expect("parses");
    let mut defaults = FamilyDefaults::default();
    defaults.set("L", 5, Orientation::Horizontal);
    let t = translate_with(&netlist, &defaults).expect("translates");
    assert_eq!(t.components[0].length, 5);
    assert_eq!(t.components[0].orientation, Orientation::Horizontal);
}
