use core::fmt;

use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{MapAccess, Visitor},
    ser::SerializeMap,
};

use crate::{prefix::extract_prefix, store::region_file};

/// A top-level region as listed by the directory service.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize)]
pub struct RegionSummary {
    /// Code assigned by the directory service.
    #[serde(deserialize_with = "service_code")]
    pub code: String,
    /// Native-language name, e.g. `Hà Nội`.
    pub name: String,
}

impl RegionSummary {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
        }
    }
}

/// A sub-region as listed by the directory service for one region.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRegion {
    #[serde(deserialize_with = "service_code")]
    pub code: String,
    #[serde(default)]
    pub name: String,
    /// Name with its descriptive prefix, e.g. `Phường Ba Đình`.
    #[serde(default)]
    pub full_name: Option<String>,
    /// Former units merged into this sub-region.
    #[serde(default, deserialize_with = "nullable")]
    pub legacy: Vec<LegacyAlias>,
}

/// A former sub-region absorbed into a current one.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAlias {
    #[serde(deserialize_with = "service_code")]
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// A region after identifier assignment.
///
/// Immutable once created; `identifier` is unique within a run.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AssignedRegion {
    pub service_code: String,
    pub identifier: String,
    pub name: String,
}

/// The per-region output document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionDocument {
    pub service_code: String,
    pub identifier: String,
    pub name: String,
    pub sub_regions: Vec<SubRegionEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubRegionEntry {
    pub service_code: String,
    pub name: String,
    pub prefix: String,
    pub legacy_aliases: Vec<LegacyAliasEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAliasEntry {
    pub service_code: String,
    pub name: String,
    pub prefix: String,
}

impl RegionDocument {
    /// Reshapes fetched sub-regions into the output document for `region`.
    pub fn new(region: &AssignedRegion, sub_regions: &[SubRegion]) -> Self {
        Self {
            service_code: region.service_code.clone(),
            identifier: region.identifier.clone(),
            name: region.name.clone(),
            sub_regions: sub_regions.iter().map(SubRegionEntry::from).collect(),
        }
    }
}

impl From<&SubRegion> for SubRegionEntry {
    fn from(sub: &SubRegion) -> Self {
        Self {
            service_code: sub.code.clone(),
            name: sub.name.clone(),
            prefix: extract_prefix(sub.full_name.as_deref().unwrap_or_default(), &sub.name),
            legacy_aliases: sub.legacy.iter().map(LegacyAliasEntry::from).collect(),
        }
    }
}

impl From<&LegacyAlias> for LegacyAliasEntry {
    fn from(alias: &LegacyAlias) -> Self {
        Self {
            service_code: alias.code.clone(),
            name: alias.name.clone(),
            prefix: extract_prefix(alias.full_name.as_deref().unwrap_or_default(), &alias.name),
        }
    }
}

/// One index entry. The region name is the map key in JSON form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    #[serde(skip)]
    pub name: String,
    pub identifier: String,
    /// Path of the region document relative to the index.
    pub file: String,
}

/// The summary index, keyed by native region name.
///
/// Serialized as a JSON object whose keys keep the order of `entries`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IndexDocument {
    entries: Vec<IndexEntry>,
}

impl IndexDocument {
    /// Builds an index over `regions`, keeping their order.
    pub fn from_regions(regions: &[AssignedRegion]) -> Self {
        let entries = regions
            .iter()
            .map(|region| IndexEntry {
                name: region.name.clone(),
                identifier: region.identifier.clone(),
                file: region_file(&region.identifier),
            })
            .collect();
        Self { entries }
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for IndexDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for IndexDocument {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = IndexDocument;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of region names to index entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((name, mut entry)) = access.next_entry::<String, IndexEntry>()? {
                    entry.name = name;
                    entries.push(entry);
                }
                Ok(IndexDocument { entries })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}

// Codes arrive as strings ("01") or bare numbers depending on the endpoint.
fn service_code<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(code) => code,
        Code::Unsigned(code) => code.to_string(),
        Code::Signed(code) => code.to_string(),
    })
}

fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
