// Embedded assets for the `fixtures` module.
// @generated by embedgen. Do not edit.

use embedgen::Registry;

/// Register every embedded asset with `registry`.
pub fn init(registry: &mut Registry) {
    registry.add_template("templates/greeting.hbs", "Héllo, \"{{name}}\"!\n\tC:\\temp\u{1}\n").expect("invalid embedded template");
}
