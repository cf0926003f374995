/// Example program to print the loaded configuration
///
/// Run with: cargo run -p rune-config --example print_config

fn main() {
    // Load configuration from rune.toml
    let config = rune_config::RuneConfig::load();

    println!("=== Rune Popup Configuration ===\n");

    println!("Demo Settings:");
    println!(
        "  Viewport: {}x{}",
        config.demo.viewport_width, config.demo.viewport_height
    );
    println!("  Title: {:?}", config.demo.title);
    println!();

    let popup = &config.popup;
    println!("Popup Settings:");
    println!("  Modal: {}", popup.modal);
    println!("  Placement: top={:?} left={:?}", popup.top, popup.left);
    println!("  Content: {:?}x{:?}", popup.width, popup.height);
    println!("  Title Height: {}", popup.title_height);
    println!("  Shadow Ring: {}", popup.border_shadow_ring);
    println!("  Residency: {}ms", popup.age_ms);
    println!("  Fill Mode: {}", popup.fill_mode);
    println!();

    // Try to serialize to TOML for verification
    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
