use serde::{Deserialize, Serialize};

/// A practitioner as listed by `/api/practitioners`.
///
/// The by-id endpoint may return the richer detail shape; its extra fields
/// are optional so both decode into this one type.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Practitioner {
    pub id: u32,
    pub name: String,
    pub specialty: String,
    pub rating: f64,
    pub experience: String,
    pub location: String,
    pub next_available: String,
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifications: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<Vec<String>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Pre-discount price, shown struck through next to `price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<f64>,
    pub rating: f64,
    pub reviews: u32,
    pub image: String,
    pub category: String,
    pub in_stock: bool,
}

impl Product {
    /// Whole-percent discount off `original_price`, if there is one.
    pub fn discount_percent(&self) -> Option<u32> {
        let original = self.original_price?;
        if original <= 0.0 || original <= self.price {
            return None;
        }
        Some(((original - self.price) / original * 100.0).round() as u32)
    }
}

/// Read-only aggregate: how many products live in a category.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ProductCategory {
    pub name: String,
    pub count: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct PractitionerResponse {
    pub practitioners: Vec<Practitioner>,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct ProductResponse {
    pub products: Vec<Product>,
    pub total: u64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    pub service: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price: f64, original_price: Option<f64>) -> Product {
        Product {
            id: 1,
            name: "Ashwagandha".to_string(),
            description: "Root powder".to_string(),
            price,
            original_price,
            rating: 4.5,
            reviews: 12,
            image: String::new(),
            category: "herbs".to_string(),
            in_stock: true,
        }
    }

    /// Contract test: wire names are camelCase and optional fields may be absent.
    #[test]
    fn test_practitioner_decodes_list_shape() {
        let json = r#"{
            "id": 7,
            "name": "Dr. Priya Sharma",
            "specialty": "Panchakarma",
            "rating": 4.9,
            "experience": "15 years",
            "location": "Mumbai",
            "nextAvailable": "Tomorrow 10:00",
            "image": "https://example.com/p.jpg"
        }"#;
        let p: Practitioner = serde_json::from_str(json).unwrap();
        assert_eq!(p.id, 7);
        assert_eq!(p.next_available, "Tomorrow 10:00");
        assert!(p.description.is_none());
        assert!(p.languages.is_none());
    }

    #[test]
    fn test_practitioner_decodes_detail_shape() {
        let json = r#"{
            "id": 7, "name": "A", "specialty": "B", "rating": 5,
            "experience": "1 year", "location": "C", "nextAvailable": "D", "image": "",
            "description": "Calm", "qualifications": ["BAMS"], "languages": ["Hindi", "English"]
        }"#;
        let p: Practitioner = serde_json::from_str(json).unwrap();
        assert_eq!(p.rating, 5.0);
        assert_eq!(p.qualifications, Some(vec!["BAMS".to_string()]));
        assert_eq!(p.languages.as_ref().map(Vec::len), Some(2));
    }

    #[test]
    fn test_product_response_decodes() {
        let json = r#"{"products":[{"id":1,"name":"Ghee","description":"d","price":12.5,
            "originalPrice":15.0,"rating":4.2,"reviews":30,"image":"","category":"food",
            "inStock":false}],
            "total":1}"#;
        let resp: ProductResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.total, 1);
        assert_eq!(resp.products[0].original_price, Some(15.0));
        assert!(!resp.products[0].in_stock);
    }

    #[test]
    fn test_product_serializes_camel_case_and_skips_missing_original_price() {
        let json = serde_json::to_value(product(10.0, None)).unwrap();
        assert_eq!(json["inStock"], true);
        assert!(json.get("originalPrice").is_none());
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(product(15.0, Some(20.0)).discount_percent(), Some(25));
        assert_eq!(product(20.0, Some(20.0)).discount_percent(), None);
        assert_eq!(product(20.0, None).discount_percent(), None);
    }
}
