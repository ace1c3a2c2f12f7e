//! Mock server configuration.

/// Mock server configuration.
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// URL prefix stripped before route matching and resource resolution (e.g. "/api")
    pub namespace: String,
    /// Default status code for GET handlers
    pub get_status: u16,
    /// Default status code for POST handlers
    pub post_status: u16,
    /// Default status code for PUT handlers
    pub put_status: u16,
    /// Default status code for DELETE handlers
    pub delete_status: u16,
    /// Emit an info-level event for every handled request
    pub log_requests: bool,
}

impl MockConfig {
    /// Returns the configured namespace normalized to "/prefix" form,
    /// or an empty string when no namespace is set.
    pub fn normalized_namespace(&self) -> String {
        let trimmed = self.namespace.trim_matches('/');
        if trimmed.is_empty() {
            String::new()
        } else {
            format!("/{}", trimmed)
        }
    }

    /// Strips the namespace prefix from a path. Paths outside the namespace
    /// are returned unchanged.
    pub fn strip_namespace<'a>(&self, path: &'a str) -> &'a str {
        let namespace = self.normalized_namespace();
        if namespace.is_empty() {
            return path;
        }
        match path.strip_prefix(namespace.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
            _ => path,
        }
    }
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            namespace: String::new(),
            get_status: 200,
            post_status: 201,
            put_status: 200,
            delete_status: 204,
            log_requests: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_status_codes() {
        let config = MockConfig::default();
        assert_eq!(config.get_status, 200);
        assert_eq!(config.post_status, 201);
        assert_eq!(config.put_status, 200);
        assert_eq!(config.delete_status, 204);
        assert!(!config.log_requests);
    }

    #[test]
    fn test_strip_namespace() {
        let config = MockConfig {
            namespace: "api/".to_string(),
            ..Default::default()
        };
        assert_eq!(config.normalized_namespace(), "/api");
        assert_eq!(config.strip_namespace("/api/contacts/1"), "/contacts/1");
        assert_eq!(config.strip_namespace("/apiary/1"), "/apiary/1");
        assert_eq!(config.strip_namespace("/contacts"), "/contacts");
    }

    #[test]
    fn test_empty_namespace_is_noop() {
        let config = MockConfig::default();
        assert_eq!(config.strip_namespace("/contacts/1"), "/contacts/1");
    }
}
