//! Compile-time registry of price sheets.
//!
//! Each sheet is a TOML file under `price_sheets/` embedded with
//! [`include_str!`]. Adding a sheet means adding the file and a line below.

use roofdesk_roof_models::PriceSheet;

use crate::RoofError;

/// Sheet used when the caller does not name one.
pub const DEFAULT_PRICE_SHEET_ID: &str = "standard";

const PRICE_SHEET_TOMLS: &[(&str, &str)] = &[
    ("standard", include_str!("../price_sheets/standard.toml")),
    ("premium", include_str!("../price_sheets/premium.toml")),
    ("metal", include_str!("../price_sheets/metal.toml")),
];

#[cfg(test)]
const EXPECTED_SHEET_COUNT: usize = 3;

/// Parses a price sheet from TOML.
///
/// # Errors
///
/// Returns [`RoofError::PriceSheet`] if the TOML is malformed or missing
/// required fields.
pub fn parse_price_sheet(toml_str: &str) -> Result<PriceSheet, RoofError> {
    toml::de::from_str(toml_str).map_err(|e| RoofError::PriceSheet {
        message: e.to_string(),
    })
}

/// Returns every embedded price sheet.
///
/// # Panics
///
/// Panics if any embedded TOML is malformed (caught by the tests below).
#[must_use]
pub fn all_price_sheets() -> Vec<PriceSheet> {
    PRICE_SHEET_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            parse_price_sheet(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse price sheet '{name}': {e}"))
        })
        .collect()
}

/// Looks up an embedded price sheet by id.
///
/// # Errors
///
/// Returns [`RoofError::PriceSheet`] if no sheet has that id.
pub fn price_sheet(id: &str) -> Result<PriceSheet, RoofError> {
    all_price_sheets()
        .into_iter()
        .find(|sheet| sheet.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| RoofError::PriceSheet {
            message: format!(
                "Unknown price sheet '{id}'. Available: {}",
                PRICE_SHEET_TOMLS
                    .iter()
                    .map(|(name, _)| *name)
                    .collect::<Vec<_>>()
                    .join(", ")
            ),
        })
}

/// Returns the default price sheet.
///
/// # Panics
///
/// Panics if the default sheet is not embedded (caught by the tests below).
#[must_use]
pub fn default_price_sheet() -> PriceSheet {
    price_sheet(DEFAULT_PRICE_SHEET_ID)
        .unwrap_or_else(|e| panic!("Default price sheet missing: {e}"))
}
