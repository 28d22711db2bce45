use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::entities::cart::CartItem;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceType {
    DineIn,
    Pickup,
    Delivery,
}

impl ServiceType {
    //the storefront capitalizes only the first letter
    pub fn label(&self) -> &'static str {
        match self {
            ServiceType::DineIn => "Dine-in",
            ServiceType::Pickup => "Pickup",
            ServiceType::Delivery => "Delivery",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum PickupTime {
    #[serde(rename = "5-10")]
    FiveToTen,
    #[serde(rename = "15-20")]
    FifteenToTwenty,
    #[serde(rename = "25-30")]
    TwentyFiveToThirty,
    #[serde(rename = "custom")]
    Custom,
}

impl PickupTime {
    pub fn bucket(&self) -> &'static str {
        match self {
            PickupTime::FiveToTen => "5-10",
            PickupTime::FifteenToTwenty => "15-20",
            PickupTime::TwentyFiveToThirty => "25-30",
            PickupTime::Custom => "custom",
        }
    }
}

impl Default for PickupTime {
    fn default() -> PickupTime {
        PickupTime::FiveToTen
    }
}

/// Customer-supplied fulfillment details. Lives only for the duration of a
/// checkout session, nothing here is persisted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OrderDetails {
    pub customer_name: String,
    pub contact_number: String,
    pub service_type: ServiceType,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub landmark: String,
    #[serde(default)]
    pub pickup_time: PickupTime,
    #[serde(default)]
    pub custom_time: String,
    #[serde(default = "default_party_size")]
    pub party_size: u32,
    #[serde(default)]
    pub dine_in_time: Option<NaiveDateTime>,
    #[serde(default)]
    pub notes: String,
}

fn default_party_size() -> u32 {
    1
}

impl OrderDetails {
    /// Gates the details -> payment transition. Checks presence only, the
    /// contact number is not checked for shape.
    pub fn is_valid(&self) -> bool {
        if self.customer_name.is_empty() || self.contact_number.is_empty() {
            return false;
        }
        match self.service_type {
            ServiceType::Delivery => !self.address.is_empty(),
            ServiceType::Pickup => {
                self.pickup_time != PickupTime::Custom || !self.custom_time.is_empty()
            }
            ServiceType::DineIn => self.party_size > 0 && self.dine_in_time.is_some(),
        }
    }

    /// "custom" substitutes the free text, any other bucket reads
    /// "<bucket> minutes".
    pub fn pickup_time_text(&self) -> String {
        if self.pickup_time == PickupTime::Custom {
            self.custom_time.clone()
        } else {
            format!("{} minutes", self.pickup_time.bucket())
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Details,
    Payment,
}

/// Two-step checkout: details -> payment, forward only when the details
/// validate, backward always allowed. The messenger handoff happens from
/// `Payment`, there is no third state.
#[derive(Clone, Debug)]
pub struct CheckoutSession {
    pub step: CheckoutStep,
    pub details: Option<OrderDetails>,
}

impl Default for CheckoutSession {
    fn default() -> CheckoutSession {
        CheckoutSession {
            step: CheckoutStep::Details,
            details: None,
        }
    }
}

impl CheckoutSession {
    pub fn new() -> CheckoutSession {
        CheckoutSession::default()
    }

    pub fn submit_details(&mut self, details: OrderDetails) -> bool {
        if !details.is_valid() {
            return false;
        }
        self.details = Some(details);
        self.step = CheckoutStep::Payment;
        true
    }

    pub fn back_to_details(&mut self) {
        self.step = CheckoutStep::Details;
    }
}

/// Renders the deterministic order summary the storefront hands off to the
/// messaging channel. Line items read
/// `• Name (Variation) + AddOn, AddOn x2 x<qty> - ₱<line total>`.
pub fn compose_order_message(
    store_name: &str,
    cart_items: &[CartItem],
    details: &OrderDetails,
    total_price: f32,
    payment_method_name: &str,
) -> String {
    let delivery_info = if details.service_type == ServiceType::Delivery {
        let mut info = format!("🏠 Address: {}", details.address);
        if !details.landmark.is_empty() {
            info.push_str("\n🗺️ Landmark: ");
            info.push_str(&details.landmark);
        }
        info
    } else {
        String::new()
    };

    let pickup_info = if details.service_type == ServiceType::Pickup {
        format!("⏰ Pickup Time: {}", details.pickup_time_text())
    } else {
        String::new()
    };

    let dine_in_info = if details.service_type == ServiceType::DineIn {
        let time_text = details
            .dine_in_time
            .map(|time| time.format("%A, %B %-d, %Y at %I:%M %p").to_string())
            .unwrap_or_else(|| "Not selected".to_owned());
        format!(
            "👥 Party Size: {} person{}\n🕐 Preferred Time: {}",
            details.party_size,
            if details.party_size != 1 { "s" } else { "" },
            time_text
        )
    } else {
        String::new()
    };

    let order_lines: Vec<String> = cart_items
        .iter()
        .map(|item| {
            let mut line = format!("• {}", item.name);
            if let Some(variation) = &item.selected_variation {
                line.push_str(&format!(" ({})", variation.name));
            }
            if !item.selected_add_ons.is_empty() {
                let names: Vec<String> = item
                    .selected_add_ons
                    .iter()
                    .map(|add_on| match add_on.quantity {
                        Some(quantity) if quantity > 1 => {
                            format!("{} x{}", add_on.name, quantity)
                        }
                        _ => add_on.name.clone(),
                    })
                    .collect();
                line.push_str(&format!(" + {}", names.join(", ")));
            }
            line.push_str(&format!(" x{} - ₱{}", item.quantity, item.line_total()));
            line
        })
        .collect();

    let delivery_fee_line = if details.service_type == ServiceType::Delivery {
        "🛵 DELIVERY FEE:"
    } else {
        ""
    };

    let notes_line = if !details.notes.is_empty() {
        format!("📝 Notes: {}", details.notes)
    } else {
        String::new()
    };

    let message = format!(
        "\n🛒 {store_name} ORDER\n\n👤 Customer: {customer}\n📞 Contact: {contact}\n📍 Service: {service}\n{delivery_info}\n{pickup_info}\n{dine_in_info}\n\n\n📋 ORDER DETAILS:\n{order_lines}\n\n💰 TOTAL: ₱{total}\n{delivery_fee_line}\n\n💳 Payment: {payment}\n📸 Payment Screenshot: Please attach your payment receipt screenshot\n\n{notes_line}\n\nPlease confirm this order to proceed. Thank you for choosing {store_name}!",
        store_name = store_name,
        customer = details.customer_name,
        contact = details.contact_number,
        service = details.service_type.label(),
        delivery_info = delivery_info,
        pickup_info = pickup_info,
        dine_in_info = dine_in_info,
        order_lines = order_lines.join("\n"),
        total = total_price,
        delivery_fee_line = delivery_fee_line,
        payment = payment_method_name,
        notes_line = notes_line,
    );

    message.trim().to_owned()
}

/// Percent-encodes the summary onto the store's messenger link template.
pub fn messenger_link(handle: &str, message: &str) -> String {
    format!("https://m.me/{}?text={}", handle, urlencoding::encode(message))
}
