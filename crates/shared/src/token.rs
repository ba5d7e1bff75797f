//! Interaction tokens.
//!
//! A token is the whole navigation state carried between requests: an ASCII
//! tag followed by `_`-separated integer fields. Field order and arity are a
//! wire contract and must not change.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{CategoryId, ProductId, SubcategoryId},
    error::NavError,
};

const DELIMITER: char = '_';

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum Command {
    ListCategories {
        page: u32,
    },
    ListSubcategories {
        category_id: CategoryId,
        page: u32,
    },
    /// Opens a subcategory at its first product.
    ListProducts {
        subcategory_id: SubcategoryId,
        category_id: CategoryId,
    },
    /// Steps to an absolute 1-based product index. The index is not
    /// validated here; it may fall outside the subcategory.
    ViewProduct {
        subcategory_id: SubcategoryId,
        category_id: CategoryId,
        index: i64,
    },
    CartAdd {
        product_id: ProductId,
    },
    Checkout,
}

impl Command {
    pub fn start() -> Self {
        Self::ListCategories { page: 1 }
    }

    pub fn encode(&self) -> String {
        match self {
            Self::ListCategories { page } => format!("catalog_{page}"),
            Self::ListSubcategories { category_id, page } => {
                format!("category_{category_id}_{page}")
            }
            Self::ListProducts {
                subcategory_id,
                category_id,
            } => format!("subcategory_{subcategory_id}_1_{category_id}"),
            Self::ViewProduct {
                subcategory_id,
                category_id,
                index,
            } => format!("product_{subcategory_id}_{category_id}_{index}"),
            Self::CartAdd { product_id } => format!("add_to_cart_{product_id}"),
            Self::Checkout => "buy_product".to_string(),
        }
    }

    pub fn decode(raw: &str) -> Result<Self, NavError> {
        let fields: Vec<&str> = raw.split(DELIMITER).collect();
        let malformed = || NavError::malformed(raw);

        let command = match fields.as_slice() {
            ["catalog", page] => Self::ListCategories {
                page: parse_page(page).ok_or_else(malformed)?,
            },
            ["category", category_id, page] => Self::ListSubcategories {
                category_id: CategoryId(parse_int(category_id).ok_or_else(malformed)?),
                page: parse_page(page).ok_or_else(malformed)?,
            },
            ["subcategory", subcategory_id, page, category_id] => {
                // the page slot is kept for wire compatibility; products
                // always open at the first index
                parse_page(page).ok_or_else(malformed)?;
                Self::ListProducts {
                    subcategory_id: SubcategoryId(
                        parse_int(subcategory_id).ok_or_else(malformed)?,
                    ),
                    category_id: CategoryId(parse_int(category_id).ok_or_else(malformed)?),
                }
            }
            ["product", subcategory_id, category_id, index] => Self::ViewProduct {
                subcategory_id: SubcategoryId(parse_int(subcategory_id).ok_or_else(malformed)?),
                category_id: CategoryId(parse_int(category_id).ok_or_else(malformed)?),
                index: parse_int(index).ok_or_else(malformed)?,
            },
            ["add", "to", "cart", product_id] => Self::CartAdd {
                product_id: ProductId(parse_int(product_id).ok_or_else(malformed)?),
            },
            ["buy", "product"] => Self::Checkout,
            _ => return Err(malformed()),
        };
        Ok(command)
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Accepts an optional leading `-` followed by ASCII digits only.
fn parse_int(field: &str) -> Option<i64> {
    let digits = field.strip_prefix('-').unwrap_or(field);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok()
}

fn parse_page(field: &str) -> Option<u32> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    field.parse().ok().filter(|page| *page >= 1)
}

#[cfg(test)]
#[path = "tests/token_tests.rs"]
mod tests;
