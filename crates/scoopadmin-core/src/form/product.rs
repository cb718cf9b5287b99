// ── Product form draft ──

use serde_json::json;

use scoopadmin_api::{Attachment, MutationBody, ResourceKind};

use super::{Draft, FormMode, ValidationErrors, Validator, push_opt};

/// Draft input for the product create/edit form.
///
/// Price and stock arrive as raw text from the form and are coerced
/// here; anything that does not parse is a field error, not a silent
/// zero.
#[derive(Debug, Clone, Default)]
pub struct ProductDraft {
    pub name: String,
    pub description: String,
    /// Decimal text, e.g. `"4.50"`.
    pub price: String,
    /// Whole-number text; empty means zero stock.
    pub stock: String,
    pub section: String,
    pub active: bool,
    /// Newly picked image files, if any.
    pub images: Vec<Attachment>,
}

impl ProductDraft {
    pub fn from_product(product: &crate::model::Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone().unwrap_or_default(),
            price: format!("{:.2}", product.price),
            stock: product.stock.to_string(),
            section: product.section.clone().unwrap_or_default(),
            active: product.active,
            images: Vec::new(),
        }
    }
}

impl Draft for ProductDraft {
    fn kind(&self) -> ResourceKind {
        ResourceKind::Products
    }

    fn build(&self, mode: &FormMode) -> Result<MutationBody, ValidationErrors> {
        let mut v = Validator::default();
        v.require("name", &self.name);

        let price = coerce_price(&mut v, &self.price);
        let stock = coerce_stock(&mut v, &self.stock);
        v.finish()?;

        if self.images.is_empty() {
            let mut body = json!({
                "name": self.name.trim(),
                "price": price,
                "stock": stock,
                "active": self.active,
            });
            if let FormMode::Edit { id } = mode {
                body["id"] = json!(id);
            }
            if !self.description.trim().is_empty() {
                body["description"] = json!(self.description.trim());
            }
            if !self.section.trim().is_empty() {
                body["section"] = json!(self.section.trim());
            }
            Ok(MutationBody::Json(body))
        } else {
            let mut fields = Vec::new();
            if let FormMode::Edit { id } = mode {
                fields.push(("id".to_owned(), id.clone()));
            }
            fields.push(("name".to_owned(), self.name.trim().to_owned()));
            fields.push(("price".to_owned(), format!("{price:.2}")));
            fields.push(("stock".to_owned(), stock.to_string()));
            fields.push(("active".to_owned(), self.active.to_string()));
            push_opt(&mut fields, "description", &self.description);
            push_opt(&mut fields, "section", &self.section);

            Ok(MutationBody::Multipart {
                fields,
                attachments: self.images.clone(),
            })
        }
    }
}

fn coerce_price(v: &mut Validator, raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(price) if price >= 0.0 => price,
        Ok(_) => {
            v.push("price", "must not be negative");
            0.0
        }
        Err(_) => {
            v.push("price", "must be a number");
            0.0
        }
    }
}

fn coerce_stock(v: &mut Validator, raw: &str) -> i64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return 0;
    }
    match raw.parse::<i64>() {
        Ok(stock) if stock >= 0 => stock,
        Ok(_) => {
            v.push("stock", "must not be negative");
            0
        }
        Err(_) => {
            v.push("stock", "must be a whole number");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_and_stock_are_coerced_from_text() {
        let draft = ProductDraft {
            name: "Pistachio cone".into(),
            price: "4.50".into(),
            stock: "12".into(),
            active: true,
            ..ProductDraft::default()
        };
        let MutationBody::Json(json) = draft.build(&FormMode::Create).expect("valid") else {
            unreachable!()
        };
        assert!((json["price"].as_f64().expect("number") - 4.5).abs() < f64::EPSILON);
        assert_eq!(json["stock"], 12);
    }

    #[test]
    fn unparsable_numbers_are_field_errors() {
        let draft = ProductDraft {
            name: "Mystery".into(),
            price: "four fifty".into(),
            stock: "a dozen".into(),
            ..ProductDraft::default()
        };
        let errs = draft.build(&FormMode::Create).expect_err("bad numbers");
        assert!(errs.contains("price"));
        assert!(errs.contains("stock"));
    }

    #[test]
    fn negative_price_is_rejected() {
        let draft = ProductDraft {
            name: "Refund scoop".into(),
            price: "-1.00".into(),
            ..ProductDraft::default()
        };
        let errs = draft.build(&FormMode::Create).expect_err("negative");
        assert!(errs.contains("price"));
    }

    #[test]
    fn empty_stock_defaults_to_zero() {
        let draft = ProductDraft {
            name: "Seasonal special".into(),
            price: "3.00".into(),
            stock: String::new(),
            ..ProductDraft::default()
        };
        let MutationBody::Json(json) = draft.build(&FormMode::Create).expect("valid") else {
            unreachable!()
        };
        assert_eq!(json["stock"], 0);
    }

    #[test]
    fn images_switch_the_body_to_multipart() {
        let draft = ProductDraft {
            name: "Sundae".into(),
            price: "6.00".into(),
            images: vec![Attachment {
                field: "images".into(),
                file_name: "sundae.jpg".into(),
                content_type: "image/jpeg".into(),
                bytes: vec![0xff, 0xd8],
            }],
            ..ProductDraft::default()
        };
        let body = draft
            .build(&FormMode::Edit { id: "p-7".into() })
            .expect("valid");
        let MutationBody::Multipart { fields, attachments } = body else {
            unreachable!()
        };
        assert!(fields.contains(&("id".to_owned(), "p-7".to_owned())));
        assert_eq!(attachments.len(), 1);
    }
}
