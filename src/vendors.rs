use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::error::{PettyError, Result};
use crate::normalize::{strip_stopwords, tokenize};

/// Vendor master list used when no vendor file is configured.
pub const DEFAULT_VENDORS: &[&str] = &[
    "254 Brewing Company", "A.S.W Enterprises Limited", "A.W Water Boozer Services",
    "AAA Growers LTD", "Alyemda Enterprise Ltd", "Araali Limited",
    "Assmazab General Stores", "Baraka Israel Enterprises Limited",
    "Benchmark Distributors Limited", "Best Buy Distributors",
    "Beyond Fruits Limited", "Bio Food Products Limited", "Boos Ventures",
    "Bowip Agencies Ltd", "Branded Fine Foods Ltd", "Brookside Dairy Ltd",
    "Brown Bags", "Cafesserie Bread Store", "Casks And Barrels Ltd",
    "Chandaria Industries Ltd", "CHIRAG AFRICA LIMITED",
    "Coastal Bottlers Limited", "Crystal Frozen & Chilled Foods Ltd",
    "De Vries Africa Ventures", "Debenham & Fear Ltd", "Dekow Wholesale",
    "Deliveries", "Diamond Trust Bank", "Dilawers",
    "Dion Wine And Spirits East Africa Limited", "Disney Wines & Spirits",
    "Domaine Kenya Ltd", "Dormans Coffee Ltd", "Eco-Essentials Limited",
    "Ewca Marketing (Kenya) Limited", "Exotics Africa Ltd", "Express Shop Bofa",
    "Ezzi Traders Limited", "Farmers Choice Limited", "Fayaz Bakers Ltd",
    "Finsbury Trading Ltd", "Fratres Malindi", "FRAWAROSE LIMITED",
    "Galina Agencies", "Gilani's Distributors LTD", "Glacier Products Ltd",
    "Global  Slacker Enterprises Ltd", "Handas Juice Ltd", "Hasbah Kenya Limited",
    "Healthy U Two Thousand Ltd", "HOME BEST HEALTH FOOD LIMITED",
    "House of Booch Ltd", "Ice Hub Limited", "Isinya Feeds Limited",
    "Jetlak Limited", "Kalon Foods Limited", "Karen Fork", "Kenchic Limited",
    "Kenya Commercial Bank", "Kenya Nut Company",
    "Kenya Power and Lighting Company", "Kenya Revenue Authority",
    "Khosal Wholesale Kilifi", "Kioko Enterprises",
    "Lakhani General Suppliers Lilmited", "Laki Laki Ltd", "Landlord",
    "LEXO ENERGY KENYA LIMITED", "Lindas Nut Butter",
    "Linkbizz E-Hub Commerce Ltd", "Loki Ventures Limited", "Malachite Limited",
    "Malindi Industries Limited", "Mill Bakers", "Mini Bakeries (NRB) ltd",
    "Mjengo Limited", "Mnarani Pens", "Mnarani Water Refil",
    "MohanS Oysterbay Drinks K Ltd", "Moonsun Picture International Limited",
    "Mudee Concepts Limited", "Mwanza Kambi Tsuma", "Mzuri Sweets Limited",
    "Naaman Muses & Co. Ltd", "Nairobi Java House Limited", "Naji Superstores",
    "National Social Security Fund", "Neema Stores Kilifi", "Njugu Supplier",
    "Nyali Air Conditioning & Refrigeration Se", "Pasagot Limited", "Plastic Cups",
    "Pride Industries Ltd", "Radbone-Clark Kenya limited",
    "Raisons Distributors Ltd", "Rehema Jumwa Muli", "RK'S Products",
    "S.H.I.F Payable", "Safaricom", "Savannah Brands Company Ltd",
    "SEA HARVEST (K) LTD", "Shiva Mombasa Limited", "SIDR Distributors Limited",
    "Slater", "Sliquor Limited", "Social Health Insurance Fund",
    "Soko (Market)", "Sol O Vino Limited", "South Lemon LTD", "Soy's Limited",
    "Sun Power Products Limited", "Supreme Filing Station", "Takataka",
    "Tandaa Networks Limited", "Taraji", "Tawakal Store Company Ltd",
    "The Happy Lamb Butchery", "The Standard Group Plc",
    "Thomas Mwachongo Mwangala", "Three Spears Limited", "TOP IT UP DISTRIBUTOR",
    "Towfiq Kenya Limited", "Traderoots Limited",
    "Under the Influence East Africa", "UvA Wines", "VEGAN WORLD LIMITED",
    "Vyema Eggs", "Water Refil", "Wine and More Limited", "Wingu Box Ltd",
    "Zabach", "Zabach Enterprises Limited", "Zen Mahitaji Ltd",
    "Zenko Kenya Limited", "Zuri Central",
];

/// Hand-assigned short aliases (acronyms, brand shorthands) seen in till notes.
///
/// Merged after the derived aliases, so an entry here replaces a derived
/// alias for the same token and bypasses the one-vendor-per-token rule.
/// Entries apply even when their vendor is absent from the active list.
pub const CURATED_ALIASES: &[(&str, &str)] = &[
    ("brookside", "Brookside Dairy Ltd"),
    ("fayaz", "Fayaz Bakers Ltd"),
    ("benchmark", "Benchmark Distributors Limited"),
    ("takataka", "Takataka"),
    ("zuri", "Zuri Central"),
    ("lexo", "LEXO ENERGY KENYA LIMITED"),
    ("safaricom", "Safaricom"),
    ("kcb", "Kenya Commercial Bank"),
    ("dtb", "Diamond Trust Bank"),
    ("kenchic", "Kenchic Limited"),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasSource {
    Derived,
    Curated,
    Settings,
}

impl AliasSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Derived => "derived",
            Self::Curated => "curated",
            Self::Settings => "settings",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Alias {
    /// Target display name. Need not be in the directory's vendor list.
    pub vendor: String,
    pub source: AliasSource,
}

#[derive(Debug, Clone)]
pub struct Vendor {
    pub name: String,
    pub tokens: HashSet<String>,
    /// Normalized name without stopwords, the form the fuzzy stage scores against.
    pub stripped: String,
}

impl Vendor {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tokens: tokenize(name).into_iter().collect(),
            stripped: strip_stopwords(name),
        }
    }
}

/// Read-only vendor master list plus its alias index. Built once per run.
#[derive(Debug, Clone)]
pub struct VendorDirectory {
    vendors: Vec<Vendor>,
    aliases: HashMap<String, Alias>,
}

impl VendorDirectory {
    /// Directory over `names` with the curated alias table applied.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Self {
        Self::with_aliases(names, CURATED_ALIASES)
    }

    pub fn with_aliases<S: AsRef<str>>(names: &[S], curated: &[(&str, &str)]) -> Self {
        let vendors: Vec<Vendor> = names.iter().map(|n| Vendor::new(n.as_ref())).collect();
        let mut dir = Self {
            aliases: build_alias_index(&vendors),
            vendors,
        };
        for (token, vendor) in curated {
            dir.add_alias(token, vendor, AliasSource::Curated);
        }
        dir
    }

    pub fn builtin() -> Self {
        Self::new(DEFAULT_VENDORS)
    }

    /// Layer user-configured aliases on top of the curated table.
    pub fn extend_aliases(&mut self, extra: &BTreeMap<String, String>) {
        for (token, vendor) in extra {
            self.add_alias(token, vendor, AliasSource::Settings);
        }
    }

    fn add_alias(&mut self, token: &str, vendor: &str, source: AliasSource) {
        if !self.vendors.iter().any(|v| v.name == vendor) {
            debug!(token, vendor, "alias target not in vendor list");
        }
        self.aliases.insert(
            token.trim().to_lowercase(),
            Alias {
                vendor: vendor.to_string(),
                source,
            },
        );
    }

    pub fn vendors(&self) -> &[Vendor] {
        &self.vendors
    }

    /// Vendor name an alias token resolves to.
    pub fn lookup_alias(&self, token: &str) -> Option<&str> {
        self.aliases.get(token).map(|a| a.vendor.as_str())
    }

    /// Alias entries sorted by token, for display.
    pub fn aliases(&self) -> Vec<(&str, &str, AliasSource)> {
        let mut out: Vec<_> = self
            .aliases
            .iter()
            .map(|(t, a)| (t.as_str(), a.vendor.as_str(), a.source))
            .collect();
        out.sort_by(|a, b| a.0.cmp(b.0));
        out
    }
}

/// Map every token that appears in exactly one vendor name to that vendor.
///
/// Vendors are grouped by display name, so a name listed twice still owns its
/// tokens.
pub fn build_alias_index(vendors: &[Vendor]) -> HashMap<String, Alias> {
    let mut owners: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for vendor in vendors {
        for token in &vendor.tokens {
            owners.entry(token.as_str()).or_default().insert(vendor.name.as_str());
        }
    }

    let mut index = HashMap::new();
    for (token, names) in owners {
        if names.len() != 1 {
            continue;
        }
        if let Some(name) = names.into_iter().next() {
            index.insert(
                token.to_string(),
                Alias {
                    vendor: name.to_string(),
                    source: AliasSource::Derived,
                },
            );
        }
    }
    debug!(vendors = vendors.len(), aliases = index.len(), "built alias index");
    index
}

/// Read a vendor list: one name per line, `#` comments and blank lines ignored.
pub fn load_vendor_file(path: &Path) -> Result<Vec<String>> {
    let content = std::fs::read_to_string(path)?;
    let names: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#'))
        .map(str::to_string)
        .collect();
    if names.is_empty() {
        return Err(PettyError::EmptyVendorList(path.display().to_string()));
    }
    Ok(names)
}
