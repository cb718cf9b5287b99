// ── Email template form draft ──

use serde_json::json;

use scoopadmin_api::{MutationBody, ResourceKind};

use super::{Draft, FormMode, ValidationErrors, Validator};

/// Draft input for the email template create/edit form. Plain JSON
/// only; templates carry no attachments.
#[derive(Debug, Clone, Default)]
pub struct EmailTemplateDraft {
    pub name: String,
    pub subject: String,
    pub body: String,
}

impl EmailTemplateDraft {
    pub fn from_template(template: &crate::model::EmailTemplate) -> Self {
        Self {
            name: template.name.clone(),
            subject: template.subject.clone(),
            body: template.body.clone(),
        }
    }
}

impl Draft for EmailTemplateDraft {
    fn kind(&self) -> ResourceKind {
        ResourceKind::EmailTemplates
    }

    fn build(&self, mode: &FormMode) -> Result<MutationBody, ValidationErrors> {
        let mut v = Validator::default();
        v.require("name", &self.name);
        v.require("subject", &self.subject);
        v.finish()?;

        let mut body = json!({
            "name": self.name.trim(),
            "subject": self.subject.trim(),
            "body": self.body,
        });
        if let FormMode::Edit { id } = mode {
            body["id"] = json!(id);
        }
        Ok(MutationBody::Json(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_name_never_reaches_the_wire() {
        let draft = EmailTemplateDraft {
            name: "   ".into(),
            subject: "Order confirmed".into(),
            body: "Thanks!".into(),
        };
        let errs = draft.build(&FormMode::Create).expect_err("blank name");
        assert!(errs.contains("name"));
        assert_eq!(errs.errors.len(), 1);
    }

    #[test]
    fn valid_draft_builds_json_with_id_on_edit() {
        let draft = EmailTemplateDraft {
            name: "order-confirmed".into(),
            subject: "Order confirmed".into(),
            body: "Your scoops are on the way.".into(),
        };
        let MutationBody::Json(json) = draft
            .build(&FormMode::Edit { id: "t-3".into() })
            .expect("valid")
        else {
            unreachable!()
        };
        assert_eq!(json["id"], "t-3");
        assert_eq!(json["name"], "order-confirmed");
    }
}
