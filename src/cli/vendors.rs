use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::settings::load_settings;

pub fn list(vendors: Option<&str>) -> Result<()> {
    let directory = load_settings().vendor_directory(vendors)?;

    let mut table = Table::new();
    table.set_header(vec!["Vendor", "Match form"]);
    for vendor in directory.vendors() {
        table.add_row(vec![Cell::new(&vendor.name), Cell::new(&vendor.stripped)]);
    }
    println!("Vendors ({})\n{table}", directory.vendors().len());
    Ok(())
}

pub fn aliases(vendors: Option<&str>) -> Result<()> {
    let directory = load_settings().vendor_directory(vendors)?;
    let aliases = directory.aliases();

    let mut table = Table::new();
    table.set_header(vec!["Token", "Vendor", "Source"]);
    for (token, vendor, source) in &aliases {
        table.add_row(vec![
            Cell::new(token),
            Cell::new(vendor),
            Cell::new(source.as_str()),
        ]);
    }
    println!("Aliases ({})\n{table}", aliases.len());
    Ok(())
}
