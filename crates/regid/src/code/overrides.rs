use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Preferred codes for names whose mechanical code would be ambiguous or
/// unidiomatic.
pub const BUILTIN_OVERRIDES: &[(&str, &str)] = &[
    ("Hà Nội", "HN"),
    ("Hồ Chí Minh", "HCM"),
    ("Hải Phòng", "HP"),
    ("Đà Nẵng", "DNG"),
    ("Đồng Nai", "DNA"),
    ("Cần Thơ", "CT"),
    ("Huế", "HUE"),
    ("Lào Cai", "LCI"),
    ("Lai Châu", "LCU"),
    ("Quảng Ninh", "QNH"),
    ("Quảng Ngãi", "QNG"),
    ("Thái Nguyên", "TNG"),
    ("Tây Ninh", "TNI"),
    ("Đắk Lắk", "DLK"),
    ("Lâm Đồng", "LDG"),
];

/// An immutable lookup from native names to preferred codes.
///
/// Keys are compared in NFC form, so composed and decomposed spellings of
/// the same name hit the same entry.
#[derive(Clone, Debug, Default)]
pub struct OverrideTable {
    entries: HashMap<String, String>,
}

impl OverrideTable {
    /// The table compiled into the crate.
    pub fn builtin() -> Self {
        BUILTIN_OVERRIDES.iter().copied().collect()
    }

    /// A table with no overrides.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the preferred code for `name`, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(&nfc(name)).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, C> FromIterator<(N, C)> for OverrideTable
where
    N: AsRef<str>,
    C: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let entries = iter
            .into_iter()
            .map(|(name, code)| (nfc(name.as_ref()), code.into()))
            .collect();
        Self { entries }
    }
}

fn nfc(name: &str) -> String {
    name.trim().nfc().collect()
}
