//! Computed, restricted-setter and late-initialized properties.

mod common;

use common::{assert_converts, assert_converts_spaces, assert_unchanged};
use swiftkotlin::{Config, Stage, transpile_report};

// -----------------------------------------------------------
// Computed properties.
// -----------------------------------------------------------

#[test]
fn implicit_getter_becomes_val() {
    assert_converts(
        "var area: Double {\n\treturn width * height\n}\n",
        "val area: Double get() {\n\treturn width * height\n}\n",
    );
}

#[test]
fn optional_type() {
    assert_converts(
        "var first: Item? {\n\treturn items.first\n}\n",
        "val first: Item? get() {\n\treturn items.first\n}\n",
    );
}

#[test]
fn explicit_getter_only() {
    assert_converts_spaces(
        "var total: Int {\n    get {\n        return a + b\n    }\n}\n",
        "val total: Int\n    get() {\n        return a + b\n    }\n",
    );
}

#[test]
fn getter_and_setter_in_class() {
    assert_converts_spaces(
        "class A {\n    var name: String {\n        get { return _name }\n        set { _name = newValue }\n    }\n}\n",
        "class A {\n    var name: String\n        get() { return _name }\n        set(newValue) { _name = newValue }\n}\n",
    );
}

#[test]
fn call_inside_getter_body() {
    assert_converts(
        "var label: String {\n\treturn self.format(value: count)\n}\n",
        "val label: String get() {\n\treturn self.format(value = count)\n}\n",
    );
}

#[test]
fn observers_kept() {
    assert_unchanged("var score: Int {\n\twillSet { log(newValue) }\n}\n");
}

#[test]
fn protocol_requirements_kept() {
    assert_unchanged(
        "protocol Shape {\n\tvar area: Double { get }\n\tvar name: String { get set }\n}\n",
    );
}

#[test]
fn stored_properties_kept() {
    assert_unchanged("var a: Int = 1\nlet b: String\nvar c: [Int] = []\n");
}

#[test]
fn counts_each_property() {
    let (output, report) = transpile_report(
        "var a: Int { return 1 }\nvar b: Int { return 2 }\n",
        &Config::default(),
    )
    .expect("transpile");
    assert_eq!(
        output,
        "val a: Int get() { return 1 }\nval b: Int get() { return 2 }\n"
    );
    let stage = report.stage(Stage::ComputedProperties).expect("ran");
    assert_eq!(stage.rewrites, 2);
}

// -----------------------------------------------------------
// Restricted setters.
// -----------------------------------------------------------

#[test]
fn setter_modifier_after_access_level() {
    assert_converts(
        "public private(set) var count = 0\n",
        "public var count = 0\n\tprivate set\n",
    );
}

#[test]
fn setter_modifier_nested_indentation() {
    assert_converts_spaces(
        "struct S {\n    fileprivate(set) var items: [Item] = []\n}\n",
        "struct S {\n    var items: [Item] = []\n        fileprivate set\n}\n",
    );
}

#[test]
fn setter_modifier_tab_unit() {
    assert_converts(
        "class A {\n\tinternal(set) var id: Int\n}\n",
        "class A {\n\tvar id: Int\n\t\tinternal set\n}\n",
    );
}

// -----------------------------------------------------------
// Late-initialized properties.
// -----------------------------------------------------------

#[test]
fn implicitly_unwrapped_becomes_lateinit() {
    assert_converts(
        "class VC {\n\tvar tableView: UITableView!\n\tvar delegate: Delegate?\n}\n",
        "class VC {\n\tlateinit var tableView: UITableView\n\tvar delegate: Delegate?\n}\n",
    );
}

#[test]
fn restricted_setter_and_lateinit_together() {
    assert_converts(
        "private(set) var name: String!\n",
        "lateinit var name: String\n\tprivate set\n",
    );
}

#[test]
fn force_unwrap_in_initializer_kept() {
    assert_unchanged("var a: String = b!\n");
}
