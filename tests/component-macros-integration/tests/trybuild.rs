//! trybuild compile-time tests for hexy_macros

#[test]
fn ui_layer_macros() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/layer_ok.rs");
    t.pass("tests/trybuild/stacked_ok.rs");
    t.pass("tests/trybuild/trait_object_ok.rs");
    t.compile_fail("tests/trybuild/layer_args_fail.rs");
    t.compile_fail("tests/trybuild/generic_fail.rs");
}

#[test]
fn ui_injectable_fields() {
    let t = trybuild::TestCases::new();
    t.compile_fail("tests/trybuild/duplicate_inject_fail.rs");
    t.compile_fail("tests/trybuild/enum_derive_fail.rs");
}
