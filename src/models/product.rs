use serde::Serialize;
use serde_json::Number;

/// A product that passed validation but has not been given an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    pub code: String,
    pub name: String,
    pub price: Number,
    pub cost: Number,
    pub note: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Product {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub price: Number,
    pub cost: Number,
    pub note: String,
}

impl Product {
    pub fn from_new(id: i64, new: NewProduct) -> Self {
        Self {
            id,
            code: new.code,
            name: new.name,
            price: new.price,
            cost: new.cost,
            note: new.note,
        }
    }
}
