use serde::{Deserialize, Serialize};

use crate::geo::Coordinate;

/// A single line item of spending attached to a destination.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostItem {
    pub id: String,
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub detail: String,
}

/// Point of interest placed on a trip day.
///
/// Only `id` and `coordinate` are read by route computations; the other
/// attributes are carried through untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub costs: Vec<CostItem>,
    #[serde(flatten)]
    pub coordinate: Coordinate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_hours: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

impl Destination {
    /// Bare destination with a single empty cost line.
    pub fn new(id: impl Into<String>, name: impl Into<String>, coordinate: Coordinate) -> Self {
        let id = id.into();
        Self {
            costs: vec![CostItem {
                id: format!("{id}-1"),
                ..CostItem::default()
            }],
            id,
            name: name.into(),
            address: String::new(),
            coordinate,
            image_url: None,
            rating: None,
            review_count: None,
            place_type: None,
            open_hours: None,
            price_level: None,
            website: None,
        }
    }

    pub fn from_lat_lng(id: impl Into<String>, lat: f64, lng: f64) -> Self {
        let id = id.into();
        let name = format!("point {id}");
        Self::new(id, name, Coordinate::new(lat, lng))
    }

    pub fn lat(&self) -> f64 {
        self.coordinate.lat
    }

    pub fn lng(&self) -> f64 {
        self.coordinate.lng
    }

    pub fn distance_km(&self, rhs: &Self) -> f64 {
        self.coordinate.distance_km(&rhs.coordinate)
    }
}

#[cfg(test)]
mod tests {
    use super::Destination;

    #[test]
    fn new_seeds_one_cost_line() {
        let d = Destination::from_lat_lng("7", 1.0, 2.0);
        assert_eq!(d.costs.len(), 1);
        assert_eq!(d.costs[0].id, "7-1");
        assert_eq!(d.name, "point 7");
        assert_eq!((d.lat(), d.lng()), (1.0, 2.0));
    }

    #[test]
    fn deserializes_flat_lat_lng_and_passthrough_fields() {
        let json = r#"{
            "id": "louvre",
            "name": "Louvre",
            "address": "Rue de Rivoli",
            "costs": [{"id": "c1", "amount": 17.0, "detail": "ticket"}],
            "lat": 48.8606,
            "lng": 2.3376,
            "rating": 4.7,
            "reviewCount": 1200,
            "placeType": "museum",
            "priceLevel": 2
        }"#;

        let d: Destination = serde_json::from_str(json).expect("destination json");
        assert_eq!(d.id, "louvre");
        assert_eq!(d.coordinate.lat, 48.8606);
        assert_eq!(d.coordinate.lng, 2.3376);
        assert_eq!(d.review_count, Some(1200));
        assert_eq!(d.place_type.as_deref(), Some("museum"));
        assert_eq!(d.costs[0].amount, 17.0);
        assert!(d.website.is_none());
    }

    #[test]
    fn serializes_with_camel_case_and_skips_missing_attributes() {
        let mut d = Destination::from_lat_lng("1", 10.0, 20.0);
        d.image_url = Some("https://example.com/a.jpg".into());

        let value = serde_json::to_value(&d).expect("serialize destination");
        assert_eq!(value["lat"], 10.0);
        assert_eq!(value["lng"], 20.0);
        assert_eq!(value["imageUrl"], "https://example.com/a.jpg");
        assert!(value.get("rating").is_none());
        assert!(value.get("coordinate").is_none());
    }
}
