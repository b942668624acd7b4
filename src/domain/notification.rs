use serde::Deserialize;

/// Fixed ids Mercado Pago's webhook test tool sends. These never exist as
/// real payments and must be acknowledged without a provider lookup.
pub const TEST_PAYMENT_IDS: &[&str] = &["123456"];

pub fn is_test_id(id: &str) -> bool {
    TEST_PAYMENT_IDS.contains(&id)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotificationKind {
    Payment,
    MerchantOrder,
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Payment => "payment",
            Self::MerchantOrder => "merchant_order",
            Self::Other(topic) => topic,
        }
    }
}

/// A provider notification resolved to one internal value before any
/// business logic runs.
#[derive(Debug, Clone)]
pub struct Notification {
    pub kind: NotificationKind,
    pub resource_id: String,
}

/// The three body shapes Mercado Pago is known to deliver. Anything else is
/// provider housekeeping and gets acknowledged without action.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawNotification {
    Nested {
        data: RawData,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
    Ipn {
        resource: String,
        topic: String,
    },
    Direct {
        id: RawId,
        #[serde(rename = "type")]
        kind: Option<String>,
    },
}

#[derive(Deserialize)]
struct RawData {
    id: RawId,
}

// Ids arrive as strings in webhook bodies and as numbers in IPN bodies.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Numeric(i64),
}

impl RawId {
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Numeric(n) => n.to_string(),
        }
    }
}

fn kind_from(raw: Option<&str>) -> NotificationKind {
    match raw {
        // Absent type means the old `{data: {id}}` payment form.
        None | Some("payment") => NotificationKind::Payment,
        Some("merchant_order") | Some("topic_merchant_order_wh") => NotificationKind::MerchantOrder,
        Some(other) => NotificationKind::Other(other.to_string()),
    }
}

impl Notification {
    /// Parse an inbound body permissively. `None` means the shape is not one
    /// of the known variants; callers acknowledge and do nothing.
    pub fn parse(body: &serde_json::Value) -> Option<Notification> {
        let raw: RawNotification = serde_json::from_value(body.clone()).ok()?;

        let notification = match raw {
            RawNotification::Nested { data, kind } => Notification {
                kind: kind_from(kind.as_deref()),
                resource_id: data.id.into_string(),
            },
            RawNotification::Direct { id, kind } => Notification {
                kind: kind_from(kind.as_deref()),
                resource_id: id.into_string(),
            },
            RawNotification::Ipn { resource, topic } => {
                // The resource is either a bare id or a URL ending in one.
                let id = resource
                    .trim_end_matches('/')
                    .rsplit('/')
                    .next()
                    .unwrap_or_default()
                    .to_string();
                Notification {
                    kind: kind_from(Some(&topic)),
                    resource_id: id,
                }
            }
        };

        if notification.resource_id.is_empty() {
            return None;
        }
        Some(notification)
    }
}
