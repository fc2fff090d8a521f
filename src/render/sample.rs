//! Canonical sample events for previews.
//!
//! The editor has no real event to show while a widget is being designed,
//! so each template kind gets one fixed sample.

use serde::Serialize;

/// A synthetic event payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SampleEvent {
    /// Catalog template this sample represents.
    pub template_id: &'static str,
    pub name: &'static str,
    /// Event phrase shown after the name, e.g. `purchased Premium Plan`.
    pub action: &'static str,
    pub product: &'static str,
    pub value: Option<f64>,
    pub rating: Option<u8>,
    pub review: Option<&'static str>,
    pub city: &'static str,
    pub country: &'static str,
    /// How long ago the sample event happened.
    pub minutes_ago: i64,
}

const PURCHASE: SampleEvent = SampleEvent {
    template_id: "recent_purchase",
    name: "Sarah Johnson",
    action: "purchased Premium Plan",
    product: "Premium Plan",
    value: Some(49.99),
    rating: None,
    review: None,
    city: "New York",
    country: "US",
    minutes_ago: 2,
};

const SAMPLES: &[SampleEvent] = &[
    PURCHASE,
    SampleEvent {
        template_id: "new_signup",
        name: "Michael Chen",
        action: "just signed up for a free trial",
        product: "Free Trial",
        value: None,
        rating: None,
        review: None,
        city: "London",
        country: "GB",
        minutes_ago: 5,
    },
    SampleEvent {
        template_id: "product_review",
        name: "Emma Wilson",
        action: "left a 5-star review",
        product: "Wireless Headphones",
        value: None,
        rating: Some(5),
        review: Some("Absolutely love these! The sound quality is amazing and shipping was fast."),
        city: "Toronto",
        country: "CA",
        minutes_ago: 60,
    },
    SampleEvent {
        template_id: "live_visitors",
        name: "23 people",
        action: "are viewing this page",
        product: "",
        value: Some(23.0),
        rating: None,
        review: None,
        city: "",
        country: "",
        minutes_ago: 0,
    },
    SampleEvent {
        template_id: "cart_activity",
        name: "David Brown",
        action: "added Running Shoes to their cart",
        product: "Running Shoes",
        value: Some(89.0),
        rating: None,
        review: None,
        city: "Sydney",
        country: "AU",
        minutes_ago: 3,
    },
    SampleEvent {
        template_id: "low_stock",
        name: "Classic Hoodie",
        action: "is almost sold out: only 3 left",
        product: "Classic Hoodie",
        value: Some(3.0),
        rating: None,
        review: None,
        city: "",
        country: "",
        minutes_ago: 0,
    },
    SampleEvent {
        template_id: "form_submission",
        name: "Olivia Martinez",
        action: "requested a free consultation",
        product: "Consultation",
        value: None,
        rating: None,
        review: None,
        city: "Austin",
        country: "US",
        minutes_ago: 12,
    },
    SampleEvent {
        template_id: "donation",
        name: "James Taylor",
        action: "donated to Clean Water Fund",
        product: "Clean Water Fund",
        value: Some(25.0),
        rating: None,
        review: None,
        city: "Berlin",
        country: "DE",
        minutes_ago: 20,
    },
];

/// Alternate identifiers seen in stored widgets, mapped to catalog ids.
const SYNONYMS: &[(&str, &str)] = &[
    ("purchase", "recent_purchase"),
    ("order", "recent_purchase"),
    ("sale", "recent_purchase"),
    ("signup", "new_signup"),
    ("sign_up", "new_signup"),
    ("registration", "new_signup"),
    ("review", "product_review"),
    ("reviews", "product_review"),
    ("visitors", "live_visitors"),
    ("live_visitor", "live_visitors"),
    ("page_view", "live_visitors"),
    ("cart", "cart_activity"),
    ("add_to_cart", "cart_activity"),
    ("inventory", "low_stock"),
    ("stock", "low_stock"),
    ("form", "form_submission"),
    ("form_submit", "form_submission"),
    ("lead", "form_submission"),
    ("donate", "donation"),
    ("donations", "donation"),
];

/// `Product-Review` / ` product review ` -> `product_review`.
fn normalize(id: &str) -> String {
    id.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c.is_whitespace() { '_' } else { c })
        .collect()
}

/// The sample for a template id or synonym; the purchase sample otherwise.
pub fn get_template_sample(template_id: &str) -> &'static SampleEvent {
    let key = normalize(template_id);
    let key = SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, id)| *id)
        .unwrap_or(key.as_str());

    SAMPLES
        .iter()
        .find(|sample| sample.template_id == key)
        .unwrap_or(&PURCHASE)
}
