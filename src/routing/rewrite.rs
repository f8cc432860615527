//! Internal path rewriting.
//!
//! One rule per [`TenantKind`]:
//!
//! ```text
//! Root          → path
//! Admin         → {admin_prefix}{path}
//! User(id)      → {tenant_prefix}/{id}{path}
//! ```

use crate::routing::tenant::TenantKind;

/// Maps a tenant kind and public path to the renderer's internal path.
#[derive(Debug, Clone)]
pub struct RouteRewriter {
    admin_prefix: String,
    tenant_prefix: String,
}

impl RouteRewriter {
    pub fn new(admin_prefix: impl Into<String>, tenant_prefix: impl Into<String>) -> Self {
        Self {
            admin_prefix: admin_prefix.into(),
            tenant_prefix: tenant_prefix.into(),
        }
    }

    pub fn rewrite(&self, kind: &TenantKind, path: &str) -> String {
        match kind {
            TenantKind::Root => path.to_string(),
            TenantKind::Admin => format!("{}{}", self.admin_prefix, path),
            TenantKind::User(id) => format!("{}/{}{}", self.tenant_prefix, id, path),
        }
    }
}

impl Default for RouteRewriter {
    fn default() -> Self {
        Self::new("/admin", "/subdomain")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::DomainRule;
    use crate::routing::host::HostParser;

    fn user(label: &str) -> TenantKind {
        let parser = HostParser::new(&[DomainRule::new("example.com", 3, &["www"])]);
        let id = parser
            .extract_tenant(&format!("{}.example.com", label))
            .unwrap();
        TenantKind::User(id)
    }

    #[test]
    fn test_rule_table() {
        let rewriter = RouteRewriter::default();
        assert_eq!(rewriter.rewrite(&TenantKind::Root, "/browse"), "/browse");
        assert_eq!(rewriter.rewrite(&TenantKind::Admin, "/"), "/admin/");
        assert_eq!(
            rewriter.rewrite(&user("acme"), "/dashboard"),
            "/subdomain/acme/dashboard"
        );
    }

    #[test]
    fn test_admin_never_takes_tenant_prefix() {
        let rewriter = RouteRewriter::default();
        let path = rewriter.rewrite(&TenantKind::Admin, "/users");
        assert!(path.starts_with("/admin"));
        assert!(!path.starts_with("/subdomain"));
    }

    #[test]
    fn test_custom_prefixes() {
        let rewriter = RouteRewriter::new("/_admin", "/_t");
        assert_eq!(rewriter.rewrite(&TenantKind::Admin, "/x"), "/_admin/x");
        assert_eq!(rewriter.rewrite(&user("acme"), "/x"), "/_t/acme/x");
    }
}
