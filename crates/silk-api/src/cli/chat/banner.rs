//! Welcome banner for the chat client.

use console::style;

pub fn print_welcome_banner(server_url: &str) {
    println!();
    println!(
        "  {} {}",
        style("🏦").bold(),
        style("SILK Finance").cyan().bold()
    );
    println!(
        "  {}",
        style("AI Relationship Manager · personal loans · EMI quotes · sanction letters").dim()
    );
    println!("  {}", style(format!("connected to {server_url}")).dim());
    println!(
        "  {}",
        style("Ctrl+D to exit · Ctrl+C during a reply stops it and keeps the partial text").dim()
    );
    println!();
}
