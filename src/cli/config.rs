use crate::error::{PettyError, Result};
use crate::settings::{load_settings, save_settings, settings_path, shellexpand_path};
use crate::vendors::load_vendor_file;

pub fn show() -> Result<()> {
    let settings = load_settings();
    println!("Settings:   {}", settings_path().display());
    println!("Threshold:  {}", settings.threshold);
    println!(
        "Vendors:    {}",
        settings.vendors_file.as_deref().unwrap_or("(built-in list)")
    );
    if settings.aliases.is_empty() {
        println!("Aliases:    (none)");
    } else {
        println!("Aliases:");
        for (token, vendor) in &settings.aliases {
            println!("  {token} \u{2192} {vendor}");
        }
    }
    Ok(())
}

pub fn threshold(value: u8) -> Result<()> {
    let mut settings = load_settings();
    settings.threshold = value;
    save_settings(&settings)?;
    println!("Default match threshold set to {value}");
    Ok(())
}

pub fn vendors(path: Option<&str>) -> Result<()> {
    let mut settings = load_settings();
    match path {
        Some(p) => {
            let expanded = shellexpand_path(p);
            let names = load_vendor_file(std::path::Path::new(&expanded))?;
            settings.vendors_file = Some(expanded.clone());
            println!("Vendor list set to {expanded} ({} vendors)", names.len());
        }
        None => {
            settings.vendors_file = None;
            println!("Using the built-in vendor list");
        }
    }
    save_settings(&settings)
}

pub fn alias(token: &str, vendor: &str) -> Result<()> {
    let mut settings = load_settings();
    let directory = settings.vendor_directory(None)?;
    if !directory.vendors().iter().any(|v| v.name == vendor) {
        return Err(PettyError::Other(format!("Unknown vendor: {vendor}")));
    }
    let token = token.trim().to_lowercase();
    if token.is_empty() || token.contains(char::is_whitespace) {
        return Err(PettyError::Other("Alias must be a single word".to_string()));
    }
    settings.aliases.insert(token.clone(), vendor.to_string());
    save_settings(&settings)?;
    println!("Added alias: '{token}' \u{2192} {vendor}");
    Ok(())
}
