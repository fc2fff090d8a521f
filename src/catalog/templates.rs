//! Built-in notification templates.

use crate::models::template::{
    FormattedMessage, MessageTemplate, NotificationTemplate, PreviewData, TemplateDisplayDefaults,
    TemplateRules,
};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Currency prefix used by `{value_display}` when the event names none.
const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[allow(clippy::too_many_arguments)]
fn template(
    id: &str,
    name: &str,
    description: &str,
    icon: &str,
    category: &str,
    rules: TemplateRules,
    display: TemplateDisplayDefaults,
    message: (&str, &str),
    preview: (&str, &str, &str),
) -> NotificationTemplate {
    NotificationTemplate {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        category: category.to_string(),
        default_rules: rules,
        default_display: display,
        message_template: MessageTemplate {
            title: message.0.to_string(),
            message: message.1.to_string(),
        },
        preview_data: PreviewData {
            title: preview.0.to_string(),
            message: preview.1.to_string(),
            timestamp: preview.2.to_string(),
        },
    }
}

fn rules(event_types: &[&str], min_value: Option<f64>, window_hours: u32, require_location: bool) -> TemplateRules {
    TemplateRules {
        event_types: event_types.iter().map(|s| s.to_string()).collect(),
        min_value,
        time_window_hours: window_hours,
        exclude_test_events: true,
        require_location,
    }
}

fn display(duration: u32, show_timestamp: bool, show_location: bool, anonymize: bool) -> TemplateDisplayDefaults {
    TemplateDisplayDefaults {
        duration,
        show_timestamp,
        show_location,
        anonymize,
    }
}

fn build_templates() -> Vec<NotificationTemplate> {
    vec![
        template(
            "recent_purchase",
            "Recent Purchase",
            "Show visitors that real people are buying right now",
            "shopping-bag",
            "ecommerce",
            rules(&["purchase", "order"], Some(0.0), 48, false),
            display(8, true, true, false),
            (
                "{name} {location_display}",
                "purchased {product} {value_display}",
            ),
            (
                "Sarah from New York",
                "purchased Premium Plan for $49.99",
                "2 minutes ago",
            ),
        ),
        template(
            "new_signup",
            "New Signup",
            "Highlight fresh signups to build momentum",
            "user-plus",
            "saas",
            rules(&["signup", "registration"], None, 24, false),
            display(6, true, true, true),
            ("{name} {location_display}", "just signed up for {product}"),
            ("Michael from London", "just signed up for a free trial", "5 minutes ago"),
        ),
        template(
            "product_review",
            "Product Review",
            "Surface recent reviews and star ratings",
            "star",
            "reviews",
            rules(&["review"], None, 168, false),
            display(10, true, false, false),
            ("{name} left a {rating}-star review", "\"{review}\""),
            (
                "Emma left a 5-star review",
                "\"Absolutely love it, shipping was fast!\"",
                "1 hour ago",
            ),
        ),
        template(
            "live_visitors",
            "Live Visitors",
            "Display how many people are browsing right now",
            "eye",
            "traffic",
            rules(&["page_view"], None, 1, false),
            display(6, false, false, false),
            ("{count} people are viewing this page", "{product}"),
            ("23 people are viewing this page", "Join them before it sells out", "right now"),
        ),
        template(
            "cart_activity",
            "Cart Activity",
            "Show products being added to carts",
            "shopping-cart",
            "ecommerce",
            rules(&["add_to_cart"], None, 6, false),
            display(6, true, true, true),
            ("{name} {location_display}", "added {product} to their cart"),
            ("Someone from Toronto", "added Running Shoes to their cart", "3 minutes ago"),
        ),
        template(
            "low_stock",
            "Low Stock Alert",
            "Create urgency when inventory runs low",
            "alert-triangle",
            "urgency",
            rules(&["inventory"], None, 24, false),
            display(8, false, false, false),
            ("Only {count} left in stock", "{product} is selling fast"),
            ("Only 3 left in stock", "Classic Hoodie is selling fast", "just now"),
        ),
        template(
            "form_submission",
            "Form Submission",
            "Show recent contact, quote or demo requests",
            "file-text",
            "leads",
            rules(&["form_submit", "lead"], None, 48, false),
            display(7, true, true, true),
            ("{name} {location_display}", "requested {product}"),
            ("David from Austin", "requested a free consultation", "12 minutes ago"),
        ),
        template(
            "donation",
            "Recent Donation",
            "Celebrate supporters of a cause",
            "heart",
            "nonprofit",
            rules(&["donation"], Some(1.0), 72, false),
            display(8, true, true, false),
            ("{name} {location_display}", "donated to {product} {value_display}"),
            ("Olivia from Sydney", "donated to Clean Water Fund for $25", "20 minutes ago"),
        ),
    ]
}

/// Every built-in template, in catalog order.
pub fn all_templates() -> &'static [NotificationTemplate] {
    static TEMPLATES: OnceLock<Vec<NotificationTemplate>> = OnceLock::new();
    TEMPLATES.get_or_init(build_templates)
}

/// Exact-match lookup by template id.
pub fn get_template_by_id(id: &str) -> Option<&'static NotificationTemplate> {
    all_templates().iter().find(|t| t.id == id)
}

/// All templates in `category`; an unknown category yields an empty list.
pub fn get_templates_by_category(category: &str) -> Vec<&'static NotificationTemplate> {
    all_templates()
        .iter()
        .filter(|t| t.category == category)
        .collect()
}

/// Text for a plain placeholder.
fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => match n.as_f64() {
            // f64 Display gives the shortest form: 50 -> "50", 49.99 -> "49.99".
            Some(f) if n.is_f64() => f.to_string(),
            _ => n.to_string(),
        },
        Value::Bool(b) => b.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

fn numeric(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn build_variables(event_data: &Map<String, Value>) -> HashMap<String, String> {
    let mut vars: HashMap<String, String> = event_data
        .iter()
        .map(|(k, v)| (k.clone(), value_text(v)))
        .collect();

    let value_display = event_data
        .get("value")
        .filter(|v| numeric(v).is_some_and(|n| n != 0.0 && n.is_finite()))
        .map(|v| {
            let currency = event_data
                .get("currency")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_CURRENCY_SYMBOL);
            format!("for {}{}", currency, value_text(v))
        })
        .unwrap_or_default();
    vars.insert("value_display".to_string(), value_display);

    let location_display = event_data
        .get("location")
        .map(value_text)
        .filter(|l| !l.trim().is_empty())
        .map(|l| format!("from {}", l))
        .unwrap_or_default();
    vars.insert("location_display".to_string(), location_display);

    vars
}

/// Replace `{name}` placeholders; unknown or malformed placeholders are dropped.
fn substitute(pattern: &str, vars: &HashMap<String, String>) -> String {
    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        match after.find('}') {
            Some(close) => {
                let name = &after[..close];
                if let Some(text) = vars.get(name) {
                    out.push_str(text);
                }
                rest = &after[close + 1..];
            }
            None => {
                // Unterminated brace: keep the literal text.
                out.push_str(&rest[open..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out.trim().to_string()
}

/// Fill a template's title and message from event data.
///
/// Never fails: missing variables become empty strings and leftover
/// placeholders are stripped.
pub fn format_notification_message(
    template: &NotificationTemplate,
    event_data: &Map<String, Value>,
) -> FormattedMessage {
    let vars = build_variables(event_data);
    FormattedMessage {
        title: substitute(&template.message_template.title, &vars),
        message: substitute(&template.message_template.message, &vars),
    }
}

/// One candidate location of a template id in a stored `config` blob.
type TemplateIdExtractor = fn(&Value) -> Option<&str>;

fn non_empty(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
}

/// Candidate locations, most authoritative first.
const TEMPLATE_ID_EXTRACTORS: &[TemplateIdExtractor] = &[
    |config| non_empty(config.get("templateId")),
    |config| non_empty(config.get("template_id")),
    |config| non_empty(config.pointer("/template/id")),
    |config| non_empty(config.get("notificationType")),
    |config| non_empty(config.get("notification_type")),
];

/// Work out which template a stored widget was created from.
///
/// Tries each blob location in order, then falls back to the row `type`
/// column when it names a known template.
pub fn resolve_template_id(config: &Value, row_type: Option<&str>) -> Option<String> {
    TEMPLATE_ID_EXTRACTORS
        .iter()
        .find_map(|extract| extract(config))
        .or_else(|| row_type.filter(|t| get_template_by_id(t).is_some()))
        .map(str::to_string)
}
