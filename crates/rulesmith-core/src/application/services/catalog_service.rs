//! Catalog Service - profile lookup and listing.
//!
//! Separated from the provisioner so `list` never needs a filesystem.

use serde::Serialize;

use crate::{
    application::ports::ProfileCatalog,
    domain::{DomainError, Profile},
    error::RulesmithResult,
};

/// Information about a profile for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileInfo {
    pub name: String,
    pub description: String,
    pub directories: usize,
    pub artifacts: usize,
    pub conversions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global: Option<String>,
}

impl From<&Profile> for ProfileInfo {
    fn from(profile: &Profile) -> Self {
        Self {
            name: profile.name.clone(),
            description: profile.description.clone(),
            directories: profile.directories.len(),
            artifacts: profile.artifacts.len(),
            conversions: profile.conversions.len(),
            global: profile.global.as_ref().map(|g| g.path.clone()),
        }
    }
}

/// Service for catalog queries.
pub struct CatalogService {
    catalog: Box<dyn ProfileCatalog>,
}

impl CatalogService {
    pub fn new(catalog: Box<dyn ProfileCatalog>) -> Self {
        Self { catalog }
    }

    pub fn names(&self) -> Vec<String> {
        self.catalog.names()
    }

    /// Resolve a profile by name and validate it.
    pub fn resolve(&self, name: &str) -> RulesmithResult<Profile> {
        let profile = self.catalog.profile(name)?;
        profile.validate()?;
        Ok(profile)
    }

    /// List all profiles.
    pub fn list(&self) -> RulesmithResult<Vec<ProfileInfo>> {
        Ok(self
            .catalog
            .profiles()?
            .iter()
            .map(ProfileInfo::from)
            .collect())
    }

    /// Check that every profile in the catalog is well formed.
    pub fn validate_all(&self) -> RulesmithResult<()> {
        for profile in self.catalog.profiles()? {
            profile.validate().map_err(|e| {
                DomainError::InvalidCatalog(format!("profile '{}': {e}", profile.name))
            })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Vec<Profile>);

    impl ProfileCatalog for Fixed {
        fn names(&self) -> Vec<String> {
            self.0.iter().map(|p| p.name.clone()).collect()
        }

        fn profile(&self, name: &str) -> RulesmithResult<Profile> {
            self.0
                .iter()
                .find(|p| p.name == name)
                .cloned()
                .ok_or_else(|| {
                    DomainError::UnknownProfile {
                        name: name.into(),
                        available: self.names(),
                    }
                    .into()
                })
        }
    }

    fn service() -> CatalogService {
        CatalogService::new(Box::new(Fixed(vec![
            Profile::new("alpha")
                .description("first")
                .directory("a")
                .artifact("a/x.md", "x"),
            Profile::new("beta")
                .directory("b")
                .global(".beta/rules.md", "g"),
        ])))
    }

    #[test]
    fn list_preserves_catalog_order() {
        let infos = service().list().unwrap();
        assert_eq!(infos.len(), 2);
        assert_eq!(infos[0].name, "alpha");
        assert_eq!(infos[0].artifacts, 1);
        assert_eq!(infos[1].global.as_deref(), Some(".beta/rules.md"));
    }

    #[test]
    fn resolve_unknown_profile_lists_names() {
        let err = service().resolve("gamma").unwrap_err();
        assert!(err.suggestions().iter().any(|s| s.contains("alpha")));
    }

    #[test]
    fn validate_all_names_the_bad_profile() {
        let service = CatalogService::new(Box::new(Fixed(vec![
            Profile::new("broken").directory(""),
        ])));
        let err = service.validate_all().unwrap_err();
        assert!(err.to_string().contains("broken"));
    }
}
