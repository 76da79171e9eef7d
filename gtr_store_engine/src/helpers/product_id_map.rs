/// Product ids the storefront shipped with before the catalog moved to `prod_{n}` identifiers. Carts built from
/// cached frontend bundles still submit these slugs.
const LEGACY_PRODUCT_IDS: [(&str, &str); 8] = [
    ("turbocharger", "prod_1"),
    ("brake-kit", "prod_2"),
    ("suspension", "prod_3"),
    ("exhaust", "prod_4"),
    ("racing-seat", "prod_5"),
    ("carbon-hood", "prod_6"),
    ("intercooler", "prod_7"),
    ("racing-wheel", "prod_8"),
];

/// Maps a legacy product slug to its canonical catalog id. Ids that are not legacy slugs pass through unchanged.
pub fn canonical_product_id(requested: &str) -> &str {
    LEGACY_PRODUCT_IDS
        .iter()
        .find(|(slug, _)| *slug == requested)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(requested)
}
