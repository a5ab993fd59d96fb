/// Display version information
pub fn execute() {
    println!("agora {}", env!("CARGO_PKG_VERSION"));
    println!("Governance proposal registry and voting ledger");
}
