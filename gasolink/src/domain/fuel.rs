//! Fuel product keys.

use std::fmt;
use std::str::FromStr;

/// Error returned when parsing an unknown fuel key.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown fuel key: {0}")]
pub struct UnknownFuelKey(pub String);

/// A canonical fuel product identifier.
///
/// Each key names a price field in the station records (for example
/// `"Gasolina95"`), with a paired `"<key>_media"` field holding the
/// regional average. Spanish, Portuguese and French products all share the
/// same record shape, which is why several keys carry the same label.
///
/// # Examples
///
/// ```
/// use gasolink::domain::FuelKey;
///
/// let key: FuelKey = "Gasolina95".parse().unwrap();
/// assert_eq!(key, FuelKey::Gasolina95);
/// assert_eq!(key.label(), "Gasolina 95");
/// assert_eq!(key.average_field(), "Gasolina95_media");
///
/// // Field names are matched exactly
/// assert!("gasolina95".parse::<FuelKey>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FuelKey {
    Gasolina95,
    Gasolina98,
    Diesel,
    DieselPremium,
    DieselB,
    Glp,
    Gpl,
    Simples95,
    Simples98,
    Gasoleo,
    GasoleoEspecial,
    Especial95,
    Especial98,
    Gazole,
    Sp95,
    E85,
    E10,
    Gplc,
    Sp98,
}

impl FuelKey {
    /// Every fuel key, in display order.
    pub const ALL: [FuelKey; 19] = [
        FuelKey::Gasolina95,
        FuelKey::Gasolina98,
        FuelKey::Diesel,
        FuelKey::DieselPremium,
        FuelKey::DieselB,
        FuelKey::Glp,
        FuelKey::Gpl,
        FuelKey::Simples95,
        FuelKey::Simples98,
        FuelKey::Gasoleo,
        FuelKey::GasoleoEspecial,
        FuelKey::Especial95,
        FuelKey::Especial98,
        FuelKey::Gazole,
        FuelKey::Sp95,
        FuelKey::E85,
        FuelKey::E10,
        FuelKey::Gplc,
        FuelKey::Sp98,
    ];

    /// The JSON field name holding this fuel's price.
    pub fn field(self) -> &'static str {
        match self {
            FuelKey::Gasolina95 => "Gasolina95",
            FuelKey::Gasolina98 => "Gasolina98",
            FuelKey::Diesel => "Diesel",
            FuelKey::DieselPremium => "DieselPremium",
            FuelKey::DieselB => "DieselB",
            FuelKey::Glp => "GLP",
            FuelKey::Gpl => "GPL",
            FuelKey::Simples95 => "Simples95",
            FuelKey::Simples98 => "Simples98",
            FuelKey::Gasoleo => "Gasoleo",
            FuelKey::GasoleoEspecial => "GasoleoEspecial",
            FuelKey::Especial95 => "Especial95",
            FuelKey::Especial98 => "Especial98",
            FuelKey::Gazole => "Gazole",
            FuelKey::Sp95 => "SP95",
            FuelKey::E85 => "E85",
            FuelKey::E10 => "E10",
            FuelKey::Gplc => "GPLc",
            FuelKey::Sp98 => "SP98",
        }
    }

    /// The JSON field name holding this fuel's regional average.
    pub fn average_field(self) -> String {
        format!("{}_media", self.field())
    }

    /// Human-readable product name.
    pub fn label(self) -> &'static str {
        match self {
            FuelKey::Gasolina95 => "Gasolina 95",
            FuelKey::Gasolina98 => "Gasolina 98",
            FuelKey::Diesel => "Diésel",
            FuelKey::DieselPremium => "Diésel Premium",
            FuelKey::DieselB => "Diésel B",
            FuelKey::Glp => "GLP",
            FuelKey::Gpl => "GPL",
            FuelKey::Simples95 => "Gasolina 95 Simple",
            FuelKey::Simples98 => "Gasolina 98 Simple",
            FuelKey::Gasoleo => "Gasóleo",
            FuelKey::GasoleoEspecial => "Gasóleo Especial",
            FuelKey::Especial95 => "Especial 95",
            FuelKey::Especial98 => "Especial 98",
            FuelKey::Gazole => "Gasóleo",
            FuelKey::Sp95 => "SP95",
            FuelKey::E85 => "E85",
            FuelKey::E10 => "E10",
            FuelKey::Gplc => "GPL",
            FuelKey::Sp98 => "SP98",
        }
    }
}

impl FromStr for FuelKey {
    type Err = UnknownFuelKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FuelKey::ALL
            .into_iter()
            .find(|key| key.field() == s)
            .ok_or_else(|| UnknownFuelKey(s.to_string()))
    }
}

impl fmt::Display for FuelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.field())
    }
}

/// Distinct fuel labels, sorted, for populating a fuel picker.
pub fn available_fuel_labels() -> Vec<&'static str> {
    let mut labels: Vec<&'static str> = FuelKey::ALL.iter().map(|k| k.label()).collect();
    labels.sort_unstable();
    labels.dedup();
    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_field_name() {
        for key in FuelKey::ALL {
            assert_eq!(key.field().parse::<FuelKey>(), Ok(key));
        }
    }

    #[test]
    fn reject_unknown_keys() {
        assert!("Gasolina96".parse::<FuelKey>().is_err());
        assert!("".parse::<FuelKey>().is_err());
        assert!("Gasolina95_media".parse::<FuelKey>().is_err());
        assert_eq!(
            "Kerosene".parse::<FuelKey>().unwrap_err().to_string(),
            "unknown fuel key: Kerosene"
        );
    }

    #[test]
    fn field_names_are_unique() {
        use std::collections::HashSet;
        let fields: HashSet<_> = FuelKey::ALL.iter().map(|k| k.field()).collect();
        assert_eq!(fields.len(), FuelKey::ALL.len());
    }

    #[test]
    fn average_field_suffix() {
        assert_eq!(FuelKey::Glp.average_field(), "GLP_media");
        assert_eq!(FuelKey::Gplc.average_field(), "GPLc_media");
    }

    #[test]
    fn display_uses_field_name() {
        assert_eq!(FuelKey::Sp98.to_string(), "SP98");
        assert_eq!(format!("{}", FuelKey::DieselPremium), "DieselPremium");
    }

    #[test]
    fn labels_are_deduplicated_and_sorted() {
        let labels = available_fuel_labels();
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
        // "Gasóleo" and "GPL" are each shared by two keys
        assert_eq!(labels.len(), FuelKey::ALL.len() - 2);
        assert!(labels.contains(&"Gasóleo"));
        assert!(labels.contains(&"GPL"));
    }
}
