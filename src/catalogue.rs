use serde::Deserialize;
use tracing::warn;

use std::path::Path;

use crate::{dataset, dataset::LoadError, usd::Usd};

/// One priced item from the product catalogue.
///
/// Any other fields present in the catalogue file are ignored.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct CatalogueEntry {
    pub title: String,
    #[serde(default)]
    pub price: Option<Usd>,
}

/// The product catalogue, in file order.
///
/// Titles are not required to be unique; lookups use the first match.
#[derive(Clone, Debug, Default)]
pub struct Catalogue(Vec<CatalogueEntry>);

impl Catalogue {
    #[must_use]
    pub fn new(entries: Vec<CatalogueEntry>) -> Self {
        Self(entries)
    }

    /// Reads the catalogue from the JSON file at `path`.
    ///
    /// The file must contain an array of objects, each with a string `title`
    /// and an optional numeric `price`.
    ///
    /// # Errors
    ///
    /// Returns any error from [`dataset::load`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        dataset::load(path).map(Self)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the unit price of `product`.
    ///
    /// The first entry whose title is exactly `product` is used. If there is
    /// no such entry, or the entry has no price, a warning is logged and the
    /// price is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compute_sales::{Catalogue, CatalogueEntry, Usd};
    /// let catalogue = Catalogue::new(vec![CatalogueEntry {
    ///     title: "Apple".into(),
    ///     price: Some(Usd::new(2.5)),
    /// }]);
    /// assert_eq!(catalogue.price_of("Apple"), Usd::new(2.5));
    /// assert_eq!(catalogue.price_of("apple"), Usd::default());
    /// ```
    #[must_use]
    pub fn price_of(&self, product: &str) -> Usd {
        match self.0.iter().find(|entry| entry.title == product) {
            Some(CatalogueEntry {
                price: Some(price), ..
            }) => *price,
            Some(_) => {
                warn!("price not found for {product} in catalogue");
                Usd::default()
            }
            None => {
                warn!("item '{product}' not found in catalogue");
                Usd::default()
            }
        }
    }
}
