/// AfCFTA member states offered at registration
pub const AFCFTA_COUNTRIES: &[&str] = &[
    "Algeria", "Angola", "Benin", "Botswana", "Burkina Faso", "Burundi", "Cameroon",
    "Cape Verde", "Central African Republic", "Chad", "Comoros", "Congo",
    "Democratic Republic of Congo", "Djibouti", "Egypt", "Equatorial Guinea", "Eritrea",
    "Eswatini", "Ethiopia", "Gabon", "Gambia", "Ghana", "Guinea", "Guinea-Bissau",
    "Ivory Coast", "Kenya", "Lesotho", "Liberia", "Libya", "Madagascar", "Malawi", "Mali",
    "Mauritania", "Mauritius", "Morocco", "Mozambique", "Namibia", "Niger", "Nigeria",
    "Rwanda", "Sao Tome and Principe", "Senegal", "Seychelles", "Sierra Leone", "Somalia",
    "South Africa", "South Sudan", "Sudan", "Tanzania", "Togo", "Tunisia", "Uganda",
    "Zambia", "Zimbabwe",
];

/// Guided Trade Initiative countries, granted the priority-market bonus
pub const PRIORITY_MARKETS: &[&str] = &[
    "Ghana", "Kenya", "Rwanda", "Tanzania", "Mauritius", "Egypt", "Cameroon", "South Africa",
];

/// Product categories (HS code groupings) as `(identifier, label)`
pub const PRODUCT_CATEGORIES: &[(&str, &str)] = &[
    ("agricultural_products", "Agricultural Products & Food"),
    ("textiles_clothing", "Textiles & Clothing"),
    ("machinery_equipment", "Machinery & Equipment"),
    ("electronics_technology", "Electronics & Technology"),
    ("chemicals_pharmaceuticals", "Chemicals & Pharmaceuticals"),
    ("metals_minerals", "Metals & Minerals"),
    ("automotive_transport", "Automotive & Transport Equipment"),
    ("wood_paper", "Wood & Paper Products"),
    ("plastics_rubber", "Plastics & Rubber"),
    ("construction_materials", "Construction Materials"),
    ("energy_petroleum", "Energy & Petroleum Products"),
    ("handicrafts_arts", "Handicrafts & Arts"),
    ("services_consulting", "Services & Consulting"),
];

#[inline]
pub fn is_priority_market(country: &str) -> bool {
    PRIORITY_MARKETS.contains(&country)
}

pub fn product_label(id: &str) -> Option<&'static str> {
    PRODUCT_CATEGORIES
        .iter()
        .find(|(key, _)| *key == id)
        .map(|(_, label)| *label)
}
