use serde::{Deserialize, Serialize};

use crate::entities::menu_item::{AddOn, MenuItem, Variation};

/// One materialized cart line. `total_price` is fixed at add time as
/// effective price + variation delta; add-on cost is carried on the
/// expanded `selected_add_ons` list and only reattached at quote/summary
/// time, never folded back into the line price.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    pub id: String,
    pub item_id: String,
    pub name: String,
    pub total_price: f32,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_variation: Option<Variation>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_add_ons: Vec<AddOn>,
}

impl CartItem {
    pub fn line_total(&self) -> f32 {
        self.total_price * self.quantity as f32
    }
}

#[derive(Clone, Debug, Default)]
pub struct Cart {
    lines: Vec<CartItem>,
    next_line: u32,
}

impl Cart {
    pub fn new() -> Cart {
        Cart::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Appends a new line. Re-adding an identical configuration appends a
    /// second line with a fresh derived id, it never merges quantities.
    pub fn add_to_cart(
        &mut self,
        item: &MenuItem,
        quantity: u32,
        variation: Option<Variation>,
        add_ons: Vec<AddOn>,
    ) -> CartItem {
        self.next_line += 1;

        let total_price = item.effective_price()
            + variation
                .as_ref()
                .map(|variation| variation.price)
                .unwrap_or(0.0);

        //one entry per selected unit, the quantity marker is dropped
        let selected_add_ons: Vec<AddOn> = add_ons
            .iter()
            .flat_map(|add_on| {
                let count = add_on.quantity.unwrap_or(1) as usize;
                std::iter::repeat(AddOn {
                    quantity: None,
                    ..add_on.clone()
                })
                .take(count)
            })
            .collect();

        let line = CartItem {
            id: format!("{}-{}", item.id, self.next_line),
            item_id: item.id.clone(),
            name: item.name.clone(),
            total_price,
            quantity,
            selected_variation: variation,
            selected_add_ons,
        };
        self.lines.push(line.clone());
        line
    }

    /// Quantity 0 removes the line entirely. Returns false when no line
    /// carries the id.
    pub fn update_quantity(&mut self, line_id: &str, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_from_cart(line_id);
        }
        match self.lines.iter_mut().find(|line| line.id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Unconditional removal, a no-op when the id is absent.
    pub fn remove_from_cart(&mut self, line_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.id != line_id);
        self.lines.len() != before
    }

    pub fn clear_cart(&mut self) {
        self.lines.clear();
    }

    pub fn get_total_price(&self) -> f32 {
        self.lines.iter().map(|line| line.line_total()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variation(name: &str, price: f32) -> Variation {
        Variation {
            id: name.to_lowercase(),
            name: name.to_owned(),
            price,
        }
    }

    fn add_on(id: &str, price: f32, quantity: Option<u32>) -> AddOn {
        AddOn {
            id: id.to_owned(),
            name: id.to_owned(),
            price,
            category: "extras".to_owned(),
            quantity,
        }
    }

    fn item(id: &str, base_price: f32) -> MenuItem {
        MenuItem {
            id: id.to_owned(),
            name: id.to_owned(),
            description: String::new(),
            base_price,
            discount_price: None,
            is_on_discount: false,
            available: true,
            category: "rice-meals".to_owned(),
            variations: vec![],
            add_ons: vec![],
            popular: false,
            image: None,
        }
    }

    #[test]
    fn total_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        cart.add_to_cart(&item("pancit", 100.0), 2, None, vec![]);
        cart.add_to_cart(&item("lumpia", 50.0), 1, None, vec![]);
        assert_eq!(cart.get_total_price(), 250.0);
    }

    #[test]
    fn add_then_remove_restores_prior_total() {
        let mut cart = Cart::new();
        cart.add_to_cart(&item("pancit", 100.0), 2, None, vec![]);
        let before = cart.get_total_price();

        let line = cart.add_to_cart(&item("lumpia", 50.0), 3, None, vec![]);
        assert_eq!(cart.get_total_price(), before + 150.0);

        cart.remove_from_cart(&line.id);
        assert_eq!(cart.get_total_price(), before);
    }

    #[test]
    fn update_quantity_zero_removes_the_line() {
        let mut cart = Cart::new();
        let kept = cart.add_to_cart(&item("pancit", 100.0), 2, None, vec![]);
        let dropped = cart.add_to_cart(&item("lumpia", 50.0), 1, None, vec![]);

        assert!(cart.update_quantity(&dropped.id, 0));
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].id, kept.id);
        assert_eq!(cart.get_total_price(), 200.0);
    }

    #[test]
    fn update_quantity_sets_new_count() {
        let mut cart = Cart::new();
        let line = cart.add_to_cart(&item("pancit", 100.0), 1, None, vec![]);
        assert!(cart.update_quantity(&line.id, 4));
        assert_eq!(cart.get_total_price(), 400.0);
        assert!(!cart.update_quantity("pancit-99", 4));
    }

    #[test]
    fn remove_is_a_noop_for_absent_ids() {
        let mut cart = Cart::new();
        cart.add_to_cart(&item("pancit", 100.0), 1, None, vec![]);
        assert!(!cart.remove_from_cart("halo-halo-7"));
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn identical_configurations_never_merge() {
        let mut cart = Cart::new();
        let pancit = item("pancit", 100.0);
        let first = cart.add_to_cart(&pancit, 1, None, vec![]);
        let second = cart.add_to_cart(&pancit, 1, None, vec![]);

        assert_eq!(cart.items().len(), 2);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn line_price_includes_variation_but_not_add_ons() {
        let mut cart = Cart::new();
        let mut siomai = item("siomai-rice", 150.0);
        siomai.discount_price = Some(120.0);
        siomai.is_on_discount = true;

        let line = cart.add_to_cart(
            &siomai,
            1,
            Some(variation("Large", 30.0)),
            vec![add_on("chili-oil", 15.0, Some(2))],
        );

        assert_eq!(line.total_price, 150.0);
        assert_eq!(cart.get_total_price(), 150.0);
    }

    #[test]
    fn add_on_selection_expands_to_unit_entries() {
        let mut cart = Cart::new();
        let line = cart.add_to_cart(
            &item("siomai-rice", 99.0),
            1,
            None,
            vec![
                add_on("chili-oil", 15.0, Some(2)),
                add_on("extra-rice", 20.0, Some(1)),
            ],
        );

        assert_eq!(line.selected_add_ons.len(), 3);
        assert!(line.selected_add_ons.iter().all(|a| a.quantity.is_none()));
        assert_eq!(line.selected_add_ons[0].id, "chili-oil");
        assert_eq!(line.selected_add_ons[1].id, "chili-oil");
        assert_eq!(line.selected_add_ons[2].id, "extra-rice");
    }

    #[test]
    fn clear_cart_empties_all_lines() {
        let mut cart = Cart::new();
        cart.add_to_cart(&item("pancit", 100.0), 2, None, vec![]);
        cart.add_to_cart(&item("lumpia", 50.0), 1, None, vec![]);
        cart.clear_cart();
        assert!(cart.is_empty());
        assert_eq!(cart.get_total_price(), 0.0);
    }
}
