// Embedded assets for the `fixtures` module.
// @generated by embedgen. Do not edit.

use embedgen::Registry;

/// Register every embedded asset with `registry`.
pub fn init(registry: &mut Registry) {
    registry.add_template("broken/bad.hbs", "{{#if x}}a{{/each}}").expect("invalid embedded template");
}
