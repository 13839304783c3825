//! Domain types served by the upstream API.
//!
//! Field names follow the upstream's camelCase JSON. Unknown fields are
//! ignored so richer upstream payloads still deserialize.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u64,
    pub user_id: u64,
    pub title: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePost {
    pub title: String,
    pub body: String,
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: u64,
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTodo {
    pub todo: String,
    pub completed: bool,
    pub user_id: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maiden_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birth_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blood_group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub eye_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hair: Option<Hair>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mac_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub university: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank: Option<Bank>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<Company>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ein: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ssn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hair {
    pub color: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub address: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    pub postal_code: String,
    pub state: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bank {
    pub card_expire: String,
    pub card_number: String,
    pub card_type: String,
    pub currency: String,
    pub iban: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    pub department: String,
    pub name: String,
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_post_uses_camel_case() {
        let post: Post = serde_json::from_value(json!({
            "id": 1,
            "userId": 7,
            "title": "t",
            "body": "b",
            "tags": ["ignored"],
            "views": 305
        }))
        .unwrap();
        assert_eq!(post.user_id, 7);

        let create = CreatePost {
            title: "t".into(),
            body: "b".into(),
            user_id: 7,
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({ "title": "t", "body": "b", "userId": 7 })
        );
    }

    #[test]
    fn test_user_with_nested_profile() {
        let user: User = serde_json::from_value(json!({
            "id": 1,
            "firstName": "Emily",
            "lastName": "Johnson",
            "email": "emily.johnson@x.dummyjson.com",
            "phone": "+81 965-431-3024",
            "username": "emilys",
            "hair": { "color": "Brown", "type": "Curly" },
            "address": {
                "address": "626 Main Street",
                "city": "Phoenix",
                "coordinates": { "lat": -77.16213, "lng": -92.084824 },
                "postalCode": "29112",
                "state": "Mississippi"
            },
            "role": "admin"
        }))
        .unwrap();

        assert_eq!(user.first_name, "Emily");
        assert_eq!(user.hair.unwrap().kind, "Curly");
        assert_eq!(user.address.unwrap().postal_code, "29112");
        assert!(user.company.is_none());
    }

    #[test]
    fn test_create_user_omits_missing_optionals() {
        let create = CreateUser {
            first_name: "A".into(),
            last_name: "B".into(),
            username: "ab".into(),
            email: "a@b.c".into(),
            phone: None,
            age: Some(30),
        };
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({
                "firstName": "A",
                "lastName": "B",
                "username": "ab",
                "email": "a@b.c",
                "age": 30
            })
        );
    }
}
