use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub id: String,
    pub name: String,
    pub price: f32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AddOn {
    pub id: String,
    pub name: String,
    pub price: f32,
    pub category: String,
    //only set inside a customization selection, never in the catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: f32,
    #[serde(default)]
    pub discount_price: Option<f32>,
    #[serde(default)]
    pub is_on_discount: bool,
    #[serde(default = "default_available")]
    pub available: bool,
    pub category: String,
    #[serde(default)]
    pub variations: Vec<Variation>,
    #[serde(default)]
    pub add_ons: Vec<AddOn>,
    #[serde(default)]
    pub popular: bool,
    #[serde(default)]
    pub image: Option<String>,
}

fn default_available() -> bool {
    true
}

impl MenuItem {
    /// Discounted price when the discount flag is set and a discount price
    /// exists, base price otherwise.
    pub fn effective_price(&self) -> f32 {
        if self.is_on_discount {
            if let Some(discount_price) = self.discount_price {
                return discount_price;
            }
        }
        self.base_price
    }

    pub fn variation(&self, id: &str) -> Option<&Variation> {
        self.variations.iter().find(|variation| variation.id == id)
    }

    pub fn add_on(&self, id: &str) -> Option<&AddOn> {
        self.add_ons.iter().find(|add_on| add_on.id == id)
    }

    //groups keep first-seen category order, not sorted
    pub fn grouped_add_ons(&self) -> Vec<(String, Vec<&AddOn>)> {
        let mut groups: Vec<(String, Vec<&AddOn>)> = Vec::new();
        for add_on in &self.add_ons {
            match groups
                .iter_mut()
                .find(|(category, _)| *category == add_on.category)
            {
                Some((_, list)) => list.push(add_on),
                None => groups.push((add_on.category.clone(), vec![add_on])),
            }
        }
        groups
    }
}
