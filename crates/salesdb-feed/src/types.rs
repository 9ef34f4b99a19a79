//! Wire types for the product transaction feed.
//!
//! The feed is a bare JSON array of transactions:
//!
//! ```text
//! [{"id":1,"title":"...","price":329.85,"description":"...","category":"men's clothing",
//!   "image":"https://...","sold":false,"dateOfSale":"2021-11-27T20:29:54+05:30"}, ...]
//! ```

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedTransaction {
    pub id: i64,
    pub title: String,
    /// Usually a JSON number; numeric strings are tolerated.
    pub price: serde_json::Value,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    /// Present in the feed but not persisted.
    #[serde(default)]
    pub image: Option<String>,
    /// Present in the feed but not persisted.
    #[serde(default)]
    pub sold: Option<bool>,
    pub date_of_sale: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_feed_entry() {
        let raw = serde_json::json!({
            "id": 1,
            "title": "Fjallraven  Foldsack No 1 Backpack, Fits 15 Laptops",
            "price": 329.85,
            "description": "Your perfect pack for everyday use",
            "category": "men's clothing",
            "image": "https://fakestoreapi.com/img/81fPKd-2AYL._AC_SL1500_.jpg",
            "sold": false,
            "dateOfSale": "2021-11-27T20:29:54+05:30"
        });

        let tx: FeedTransaction = serde_json::from_value(raw).expect("deserialize");
        assert_eq!(tx.id, 1);
        assert_eq!(tx.category.as_deref(), Some("men's clothing"));
        assert_eq!(tx.sold, Some(false));
        assert_eq!(tx.date_of_sale, "2021-11-27T20:29:54+05:30");
    }

    #[test]
    fn optional_fields_default_to_none() {
        let raw = serde_json::json!({
            "id": 2,
            "title": "Jacket",
            "price": 150,
            "dateOfSale": "2021-03-20"
        });

        let tx: FeedTransaction = serde_json::from_value(raw).expect("deserialize");
        assert!(tx.description.is_none());
        assert!(tx.category.is_none());
        assert!(tx.image.is_none());
        assert!(tx.sold.is_none());
    }

    #[test]
    fn missing_date_of_sale_is_an_error() {
        let raw = serde_json::json!({ "id": 3, "title": "Ring", "price": 10 });
        assert!(serde_json::from_value::<FeedTransaction>(raw).is_err());
    }
}
