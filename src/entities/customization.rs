use crate::entities::menu_item::{AddOn, MenuItem, Variation};

/// Transient add-on picks while an item is being customized. Every entry
/// carries `quantity: Some(n)` with n > 0; setting a quantity to zero
/// deletes the entry.
#[derive(Clone, Debug, Default)]
pub struct AddOnSelection {
    picks: Vec<AddOn>,
}

impl AddOnSelection {
    pub fn new() -> AddOnSelection {
        AddOnSelection::default()
    }

    pub fn set_quantity(&mut self, add_on: &AddOn, quantity: u32) {
        if quantity == 0 {
            self.picks.retain(|pick| pick.id != add_on.id);
            return;
        }
        match self.picks.iter_mut().find(|pick| pick.id == add_on.id) {
            Some(existing) => existing.quantity = Some(quantity),
            None => self.picks.push(AddOn {
                quantity: Some(quantity),
                ..add_on.clone()
            }),
        }
    }

    pub fn picks(&self) -> &[AddOn] {
        &self.picks
    }

    pub fn into_picks(self) -> Vec<AddOn> {
        self.picks
    }

    /// The authoritative price shown before the line is confirmed:
    /// effective price + variation delta + every pick at its quantity.
    pub fn calculate_price(&self, item: &MenuItem, variation: Option<&Variation>) -> f32 {
        let mut price = item.effective_price();
        if let Some(variation) = variation {
            price += variation.price;
        }
        for pick in &self.picks {
            price += pick.price * pick.quantity.unwrap_or(0) as f32;
        }
        price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add_on(id: &str, price: f32) -> AddOn {
        AddOn {
            id: id.to_owned(),
            name: id.to_owned(),
            price,
            category: "extras".to_owned(),
            quantity: None,
        }
    }

    fn discounted_item() -> MenuItem {
        MenuItem {
            id: "siomai-rice".to_owned(),
            name: "Siomai Rice".to_owned(),
            description: String::new(),
            base_price: 150.0,
            discount_price: Some(120.0),
            is_on_discount: true,
            available: true,
            category: "rice-meals".to_owned(),
            variations: vec![Variation {
                id: "large".to_owned(),
                name: "Large".to_owned(),
                price: 30.0,
            }],
            add_ons: vec![],
            popular: false,
            image: None,
        }
    }

    #[test]
    fn price_is_effective_plus_variation_plus_picks() {
        let item = discounted_item();
        let mut selection = AddOnSelection::new();
        selection.set_quantity(&add_on("chili-oil", 15.0), 2);
        selection.set_quantity(&add_on("extra-rice", 20.0), 1);

        let price = selection.calculate_price(&item, item.variations.first());
        assert_eq!(price, 120.0 + 30.0 + 15.0 * 2.0 + 20.0);
    }

    #[test]
    fn discounted_item_with_large_variation_quotes_back_to_base() {
        //150 base, 120 on discount, Large +30 lands on 150 again
        let item = discounted_item();
        let selection = AddOnSelection::new();
        assert_eq!(
            selection.calculate_price(&item, item.variations.first()),
            150.0
        );
    }

    #[test]
    fn zero_quantity_deletes_the_pick() {
        let mut selection = AddOnSelection::new();
        let chili = add_on("chili-oil", 15.0);
        selection.set_quantity(&chili, 2);
        assert_eq!(selection.picks().len(), 1);

        selection.set_quantity(&chili, 0);
        assert!(selection.picks().is_empty());
    }

    #[test]
    fn setting_quantity_again_upserts() {
        let mut selection = AddOnSelection::new();
        let chili = add_on("chili-oil", 15.0);
        selection.set_quantity(&chili, 1);
        selection.set_quantity(&chili, 3);

        assert_eq!(selection.picks().len(), 1);
        assert_eq!(selection.picks()[0].quantity, Some(3));
    }
}
