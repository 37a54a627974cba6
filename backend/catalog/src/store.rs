use std::{
    collections::{HashMap, hash_map::Entry},
    fs,
    path::Path,
};

use rust_decimal::Decimal;
use tracing::info;

use crate::{error::CatalogError, melon::Melon};

const SEED: &str = include_str!("../seed/melons.json");

/// Read-only catalog. Keeps seed order for listing and an id index for lookups.
#[derive(Debug, Clone)]
pub struct Catalog {
    melons: Vec<Melon>,
    melon_id_to_index: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(melons: Vec<Melon>) -> Result<Self, CatalogError> {
        let mut melon_id_to_index = HashMap::with_capacity(melons.len());

        for (index, melon) in melons.iter().enumerate() {
            if melon.price < Decimal::ZERO {
                return Err(CatalogError::NegativePrice {
                    id: melon.id.clone(),
                    price: melon.price,
                });
            }

            match melon_id_to_index.entry(melon.id.clone()) {
                Entry::Vacant(entry) => {
                    entry.insert(index);
                }
                Entry::Occupied(entry) => {
                    return Err(CatalogError::DuplicateId {
                        id: entry.key().clone(),
                    });
                }
            }
        }

        Ok(Self {
            melons,
            melon_id_to_index,
        })
    }

    /// Catalog compiled into the binary.
    pub fn seed() -> Result<Self, CatalogError> {
        let catalog = Self::from_json(SEED)?;
        info!("Loaded {} melons from embedded seed", catalog.len());

        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let catalog = Self::from_json(&fs::read_to_string(path)?)?;
        info!("Loaded {} melons from {}", catalog.len(), path.display());

        Ok(catalog)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        Self::new(serde_json::from_str(json)?)
    }

    pub fn get_all(&self) -> &[Melon] {
        &self.melons
    }

    pub fn get_by_id(&self, id: &str) -> Result<&Melon, CatalogError> {
        self.melon_id_to_index
            .get(id)
            .map(|&index| &self.melons[index])
            .ok_or_else(|| CatalogError::not_found(id))
    }

    pub fn len(&self) -> usize {
        self.melons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.melons.is_empty()
    }
}
