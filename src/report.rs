use tracing::debug;

use std::{collections::HashMap, fmt::Display};

use crate::{catalogue::Catalogue, dataset::SaleRecord, usd::Usd};

/// Width of the line separating the product lines from the total.
const SEPARATOR_WIDTH: usize = 30;

/// Running totals for one product.
///
/// The unit cost is fixed when the aggregate is created, and every later
/// [`ProductAggregate::add`] is priced at that cost, so `total` always equals
/// `unit_cost * quantity`.
#[derive(Clone, Debug, PartialEq)]
pub struct ProductAggregate {
    name: String,
    unit_cost: Usd,
    quantity: f64,
    total: Usd,
}

impl ProductAggregate {
    #[must_use]
    pub fn new(name: impl Into<String>, unit_cost: Usd, quantity: f64) -> Self {
        Self {
            name: name.into(),
            unit_cost,
            quantity,
            total: unit_cost * quantity,
        }
    }

    /// Adds `quantity` more units at the recorded unit cost.
    pub fn add(&mut self, quantity: f64) {
        self.quantity += quantity;
        self.total += self.unit_cost * quantity;
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn unit_cost(&self) -> Usd {
        self.unit_cost
    }

    #[must_use]
    pub fn quantity(&self) -> f64 {
        self.quantity
    }

    #[must_use]
    pub fn total(&self) -> Usd {
        self.total
    }
}

impl Display for ProductAggregate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} = {} piece(s) x ${} =  ${}",
            self.name,
            self.quantity,
            self.unit_cost,
            self.total.rounded()
        )
    }
}

/// Per-product sales totals, in the order each product was first sold.
///
/// To build an `Aggregation` from sales data, use [`Aggregation::from_sales`]
/// or [`Aggregation::add_sale`].
///
/// To get the printable report, use [`Aggregation::render`].
#[derive(Debug, Default)]
pub struct Aggregation {
    products: Vec<ProductAggregate>,
    index: HashMap<String, usize>,
}

impl Aggregation {
    /// Creates a new, empty aggregation.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregates `sales`, pricing each product from `catalogue`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use compute_sales::{Aggregation, Catalogue, CatalogueEntry, SaleRecord, Usd};
    /// let catalogue = Catalogue::new(vec![CatalogueEntry {
    ///     title: "Apple".into(),
    ///     price: Some(Usd::new(2.5)),
    /// }]);
    /// let sales = vec![
    ///     SaleRecord { product: "Apple".into(), quantity: 3.0 },
    ///     SaleRecord { product: "Apple".into(), quantity: 2.0 },
    /// ];
    /// let aggregation = Aggregation::from_sales(&catalogue, &sales);
    /// let apple = aggregation.get("Apple").unwrap();
    /// assert_eq!(apple.quantity(), 5.0);
    /// assert_eq!(apple.total(), Usd::new(12.5));
    /// ```
    #[must_use]
    pub fn from_sales(catalogue: &Catalogue, sales: &[SaleRecord]) -> Self {
        let mut aggregation = Self::new();
        for sale in sales {
            aggregation.add_sale(catalogue, sale);
        }
        debug!(
            "aggregated {} sale records into {} products",
            sales.len(),
            aggregation.len()
        );
        aggregation
    }

    /// Adds one sale record.
    ///
    /// The catalogue is only consulted the first time a product is seen.
    pub fn add_sale(&mut self, catalogue: &Catalogue, sale: &SaleRecord) {
        if let Some(&i) = self.index.get(&sale.product) {
            self.products[i].add(sale.quantity);
            return;
        }
        let unit_cost = catalogue.price_of(&sale.product);
        self.index.insert(sale.product.clone(), self.products.len());
        self.products
            .push(ProductAggregate::new(&sale.product, unit_cost, sale.quantity));
    }

    #[must_use]
    pub fn get(&self, product: &str) -> Option<&ProductAggregate> {
        self.index.get(product).map(|&i| &self.products[i])
    }

    /// Iterates over the products in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &ProductAggregate> {
        self.products.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Returns the unrounded sum of every product's total.
    #[must_use]
    pub fn grand_total(&self) -> Usd {
        self.iter().map(ProductAggregate::total).sum()
    }

    /// Renders the report: one line per product, a separator, and the total.
    #[must_use]
    pub fn render(&self) -> Rendered {
        let mut lines: Vec<String> = self.iter().map(ToString::to_string).collect();
        let grand_total = self.grand_total();
        lines.push("=".repeat(SEPARATOR_WIDTH));
        lines.push(format!("Total: ${}", grand_total.rounded()));
        Rendered { lines, grand_total }
    }
}

/// A rendered sales report.
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    lines: Vec<String>,
    grand_total: Usd,
}

impl Rendered {
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The unrounded grand total.
    #[must_use]
    pub fn grand_total(&self) -> Usd {
        self.grand_total
    }

    /// The report for the console, lines separated by newlines.
    #[must_use]
    pub fn console_text(&self) -> String {
        self.lines.join("\n")
    }

    /// The report for the results file, every line newline-terminated.
    #[must_use]
    pub fn file_text(&self) -> String {
        self.lines.iter().map(|line| format!("{line}\n")).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogue::CatalogueEntry;

    fn catalogue(entries: &[(&str, Option<f64>)]) -> Catalogue {
        Catalogue::new(
            entries
                .iter()
                .map(|(title, price)| CatalogueEntry {
                    title: (*title).into(),
                    price: price.map(Usd::new),
                })
                .collect(),
        )
    }

    fn sale(product: &str, quantity: f64) -> SaleRecord {
        SaleRecord {
            product: product.into(),
            quantity,
        }
    }

    #[test]
    fn from_sales_fn_accumulates_repeat_products() {
        let catalogue = catalogue(&[("Apple", Some(2.5))]);
        let aggregation =
            Aggregation::from_sales(&catalogue, &[sale("Apple", 3.0), sale("Apple", 2.0)]);
        assert_eq!(aggregation.len(), 1);
        let apple = aggregation.get("Apple").unwrap();
        assert_eq!(apple.unit_cost(), Usd::new(2.5));
        assert_eq!(apple.quantity(), 5.0);
        assert_eq!(apple.total(), Usd::new(12.5));
    }

    #[test]
    fn from_sales_fn_preserves_first_seen_order() {
        let catalogue = catalogue(&[("A", Some(1.0)), ("B", Some(2.0)), ("C", Some(3.0))]);
        let sales = [
            sale("C", 1.0),
            sale("A", 1.0),
            sale("C", 1.0),
            sale("B", 1.0),
            sale("A", 1.0),
        ];
        let aggregation = Aggregation::from_sales(&catalogue, &sales);
        let names: Vec<_> = aggregation.iter().map(ProductAggregate::name).collect();
        assert_eq!(names, vec!["C", "A", "B"]);
    }

    #[test]
    fn from_sales_fn_prices_unknown_products_at_zero() {
        let aggregation = Aggregation::from_sales(&Catalogue::default(), &[sale("Banana", 4.0)]);
        let banana = aggregation.get("Banana").unwrap();
        assert_eq!(banana.unit_cost(), Usd::default());
        assert_eq!(banana.quantity(), 4.0);
        assert_eq!(banana.total(), Usd::default());
    }

    #[test]
    fn from_sales_fn_passes_negative_and_fractional_quantities_through() {
        let catalogue = catalogue(&[("Cheese", Some(4.0))]);
        let aggregation =
            Aggregation::from_sales(&catalogue, &[sale("Cheese", 1.5), sale("Cheese", -3.0)]);
        let cheese = aggregation.get("Cheese").unwrap();
        assert_eq!(cheese.quantity(), -1.5);
        assert_eq!(cheese.total(), Usd::new(-6.0));
    }

    #[test]
    fn add_fn_keeps_total_equal_to_unit_cost_times_quantity() {
        let mut product = ProductAggregate::new("Leeks", Usd::new(0.5), 2.0);
        for quantity in [1.0, 4.0, 0.5, 8.0] {
            product.add(quantity);
            assert_eq!(product.total(), product.unit_cost() * product.quantity());
        }
        assert_eq!(product.quantity(), 15.5);
    }

    #[test]
    fn add_sale_fn_never_looks_up_price_again() {
        let mut aggregation = Aggregation::new();
        aggregation.add_sale(&catalogue(&[("Apple", Some(2.0))]), &sale("Apple", 1.0));
        aggregation.add_sale(&catalogue(&[("Apple", Some(100.0))]), &sale("Apple", 1.0));
        let apple = aggregation.get("Apple").unwrap();
        assert_eq!(apple.unit_cost(), Usd::new(2.0));
        assert_eq!(apple.total(), Usd::new(4.0));
    }

    #[test]
    fn render_fn_formats_product_and_total_lines() {
        let catalogue = catalogue(&[("Apple", Some(2.5))]);
        let aggregation =
            Aggregation::from_sales(&catalogue, &[sale("Apple", 3.0), sale("Apple", 2.0)]);
        let rendered = aggregation.render();
        assert_eq!(
            rendered.lines(),
            [
                "Apple = 5 piece(s) x $2.5 =  $12.5",
                "==============================",
                "Total: $12.5",
            ]
        );
        assert_eq!(rendered.grand_total(), Usd::new(12.5));
    }

    #[test]
    fn render_fn_shows_unknown_products_at_zero() {
        let aggregation = Aggregation::from_sales(&Catalogue::default(), &[sale("Banana", 4.0)]);
        let rendered = aggregation.render();
        assert_eq!(rendered.lines()[0], "Banana = 4 piece(s) x $0 =  $0");
        assert_eq!(rendered.lines()[2], "Total: $0");
    }

    #[test]
    fn render_fn_rounds_only_for_display() {
        let catalogue = catalogue(&[("Widget", Some(0.333))]);
        let aggregation =
            Aggregation::from_sales(&catalogue, &[sale("Widget", 1.0), sale("Widget", 2.0)]);
        let rendered = aggregation.render();
        assert_eq!(rendered.lines()[0], "Widget = 3 piece(s) x $0.333 =  $1");
        assert_eq!(rendered.grand_total(), aggregation.get("Widget").unwrap().total());
        assert_ne!(rendered.grand_total(), Usd::new(1.0));
    }

    #[test]
    fn render_fn_prints_whole_amounts_without_decimals() {
        let catalogue = catalogue(&[("X", Some(2.5))]);
        let rendered = Aggregation::from_sales(&catalogue, &[sale("X", 4.0)]).render();
        assert_eq!(rendered.lines()[0], "X = 4 piece(s) x $2.5 =  $10");
        assert_eq!(rendered.lines()[2], "Total: $10");
    }

    #[test]
    fn render_fn_is_idempotent() {
        let catalogue = catalogue(&[("A", Some(1.25)), ("B", None)]);
        let aggregation =
            Aggregation::from_sales(&catalogue, &[sale("A", 2.0), sale("B", 1.0), sale("A", 1.0)]);
        assert_eq!(aggregation.render(), aggregation.render());
    }

    #[test]
    fn render_fn_handles_empty_aggregation() {
        let rendered = Aggregation::new().render();
        assert_eq!(rendered.lines(), ["==============================", "Total: $0"]);
    }

    #[test]
    fn file_text_fn_terminates_every_line() {
        let catalogue = catalogue(&[("A", Some(1.0))]);
        let rendered = Aggregation::from_sales(&catalogue, &[sale("A", 2.0)]).render();
        assert_eq!(
            rendered.file_text(),
            "A = 2 piece(s) x $1 =  $2\n==============================\nTotal: $2\n"
        );
        assert_eq!(
            rendered.console_text(),
            "A = 2 piece(s) x $1 =  $2\n==============================\nTotal: $2"
        );
    }
}
