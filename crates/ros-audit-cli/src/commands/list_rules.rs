//! List rules command implementation.

use ros_audit_rules::default_rules;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!(
        "{:<8} {:<26} {:<32} {:<14} Description",
        "Code", "Name", "Section", "Kind"
    );
    println!("{}", "-".repeat(120));

    for rule in default_rules() {
        println!(
            "{:<8} {:<26} {:<32} {:<14} {}",
            rule.code(),
            rule.id(),
            rule.section(),
            rule.kind().to_string(),
            rule.description()
        );
    }

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  ros-audit check router.rsc --rules upnp,socks");
    println!("  ros-audit check router.rsc --rules RA006,RA008");
}
