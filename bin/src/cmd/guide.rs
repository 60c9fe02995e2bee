//! Guide command implementation.

/// Print the interpretation guide.
pub(crate) fn print_guide() {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                      Intrinsic Guide                         ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");
    print!("{}", intrinsic::report::GUIDE);
}
