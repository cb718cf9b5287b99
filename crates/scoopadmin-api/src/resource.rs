// Resource addressing and mutation payloads.
//
// Endpoint paths are derived uniformly from the resource kind; no
// per-resource path tables. The five collection resources all speak
// the same list/get/create/update/delete shape.

/// A backend-owned collection resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Banners,
    EmailTemplates,
    Orders,
    Customers,
    Products,
}

impl ResourceKind {
    pub const ALL: [Self; 5] = [
        Self::Banners,
        Self::EmailTemplates,
        Self::Orders,
        Self::Customers,
        Self::Products,
    ];

    /// The URL path segment: `/api/{segment}`, `/api/{segment}/get`, ...
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::Banners => "banners",
            Self::EmailTemplates => "email-templates",
            Self::Orders => "orders",
            Self::Customers => "customers",
            Self::Products => "products",
        }
    }

    /// Singular human label for notifications ("Banner created").
    pub fn label(self) -> &'static str {
        match self {
            Self::Banners => "Banner",
            Self::EmailTemplates => "Email template",
            Self::Orders => "Order",
            Self::Customers => "Customer",
            Self::Products => "Product",
        }
    }

    /// Reverse of [`path_segment`](Self::path_segment), used when the
    /// push feed names a resource.
    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.path_segment() == segment)
    }
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// A file part for a multipart mutation (banner/product images).
#[derive(Debug, Clone)]
pub struct Attachment {
    /// Form field name, e.g. `"image"`.
    pub field: String,
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Body of a create/update request.
///
/// Multipart is used whenever a file attachment is present; plain JSON
/// otherwise. The form-flow layer decides which to build.
#[derive(Debug, Clone)]
pub enum MutationBody {
    Json(serde_json::Value),
    Multipart {
        fields: Vec<(String, String)>,
        attachments: Vec<Attachment>,
    },
}

impl MutationBody {
    /// Whether this body carries file attachments.
    pub fn is_multipart(&self) -> bool {
        matches!(self, Self::Multipart { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_segment_round_trips() {
        for kind in ResourceKind::ALL {
            assert_eq!(
                ResourceKind::from_path_segment(kind.path_segment()),
                Some(kind)
            );
        }
        assert_eq!(ResourceKind::from_path_segment("unknown"), None);
    }
}
