//! Built-in profile catalog.
//!
//! Payloads are compiled into the binary from `templates/<profile>/<name>`
//! and looked up by `(profile, name)`. Profile shapes (directories, artifact
//! destinations, conversions) are declared in code below.

use tracing::debug;

use rulesmith_core::{
    application::ports::ProfileCatalog,
    domain::{ConversionTemplate, DomainError, Profile},
    error::RulesmithResult,
};

/// One embedded payload.
#[derive(Debug, Clone, Copy)]
pub struct EmbeddedPayload {
    pub profile: &'static str,
    pub name: &'static str,
    pub content: &'static str,
}

macro_rules! embed {
    ($profile:literal, $name:literal) => {
        EmbeddedPayload {
            profile: $profile,
            name: $name,
            content: include_str!(concat!("../../templates/", $profile, "/", $name)),
        }
    };
}

/// Every payload shipped with the binary.
pub const PAYLOADS: &[EmbeddedPayload] = &[
    embed!("shared", "coding-standards.rule"),
    embed!("shared", "commit-messages.rule"),
    embed!("cursor", "project.mdc"),
    embed!("cursor", "shared.mdc"),
    embed!("windsurf", "project.md"),
    embed!("cline", "project.md"),
    embed!("copilot", "copilot-instructions.md"),
    embed!("claude", "CLAUDE.md"),
    embed!("claude", "review.md"),
    embed!("claude", "global.md"),
];

/// Shared rule documents other profiles mirror, by stem.
const SHARED_RULES: &[&str] = &["coding-standards", "commit-messages"];

/// Where the `shared` profile keeps its rule documents.
pub const SHARED_DIR: &str = ".rulesmith/shared";

type ProfileBuilder = fn() -> RulesmithResult<Profile>;

const PROFILES: &[(&str, ProfileBuilder)] = &[
    ("shared", shared),
    ("cursor", cursor),
    ("windsurf", windsurf),
    ("cline", cline),
    ("copilot", copilot),
    ("claude", claude),
];

/// Look up an embedded payload.
pub fn payload(profile: &str, name: &str) -> Option<&'static str> {
    PAYLOADS
        .iter()
        .find(|p| p.profile == profile && p.name == name)
        .map(|p| p.content)
}

fn embedded(profile: &str, name: &str) -> RulesmithResult<String> {
    payload(profile, name).map(str::to_string).ok_or_else(|| {
        DomainError::InvalidCatalog(format!("no embedded payload '{name}' for '{profile}'"))
            .into()
    })
}

/// One conversion per shared rule, with the destination derived from its stem.
fn mirror_shared(destination: impl Fn(&str) -> String) -> Vec<ConversionTemplate> {
    SHARED_RULES
        .iter()
        .map(|stem| {
            ConversionTemplate::new(
                format!("{SHARED_DIR}/{stem}.rule"),
                [destination(stem)],
            )
        })
        .collect()
}

fn with_conversions(profile: Profile, conversions: Vec<ConversionTemplate>) -> Profile {
    conversions.into_iter().fold(profile, Profile::conversion)
}

fn shared() -> RulesmithResult<Profile> {
    let mut profile = Profile::new("shared")
        .description("Tool-neutral rule documents mirrored by other profiles")
        .directory(SHARED_DIR);
    for stem in SHARED_RULES {
        let name = format!("{stem}.rule");
        let content = embedded("shared", &name)?;
        profile = profile.artifact(format!("{SHARED_DIR}/{name}"), content);
    }
    Ok(profile)
}

fn cursor() -> RulesmithResult<Profile> {
    Ok(Profile::new("cursor")
        .description("Cursor project rules (.cursor/rules)")
        .directory(".cursor")
        .directory(".cursor/rules")
        .artifact(".cursor/rules/project.mdc", embedded("cursor", "project.mdc")?)
        .artifact(".cursor/rules/shared.mdc", embedded("cursor", "shared.mdc")?))
}

fn windsurf() -> RulesmithResult<Profile> {
    let profile = Profile::new("windsurf")
        .description("Windsurf workspace rules (.windsurf/rules)")
        .directory(".windsurf")
        .directory(".windsurf/rules")
        .artifact(".windsurf/rules/project.md", embedded("windsurf", "project.md")?);
    Ok(with_conversions(
        profile,
        mirror_shared(|stem| format!(".windsurf/rules/{stem}.md")),
    ))
}

fn cline() -> RulesmithResult<Profile> {
    let profile = Profile::new("cline")
        .description("Cline rules directory (.clinerules)")
        .directory(".clinerules")
        .artifact(".clinerules/project.md", embedded("cline", "project.md")?);
    Ok(with_conversions(
        profile,
        mirror_shared(|stem| format!(".clinerules/{stem}.md")),
    ))
}

fn copilot() -> RulesmithResult<Profile> {
    let profile = Profile::new("copilot")
        .description("GitHub Copilot instructions (.github)")
        .directory(".github")
        .directory(".github/instructions")
        .artifact(
            ".github/copilot-instructions.md",
            embedded("copilot", "copilot-instructions.md")?,
        );
    Ok(with_conversions(
        profile,
        mirror_shared(|stem| format!(".github/instructions/{stem}.instructions.md")),
    ))
}

fn claude() -> RulesmithResult<Profile> {
    let profile = Profile::new("claude")
        .description("Claude project memory, commands and user-level defaults")
        .directory(".claude")
        .directory(".claude/commands")
        .directory(".claude/rules")
        .artifact("CLAUDE.md", embedded("claude", "CLAUDE.md")?)
        .artifact(".claude/commands/review.md", embedded("claude", "review.md")?)
        .global(".claude/CLAUDE.md", embedded("claude", "global.md")?);
    Ok(with_conversions(
        profile,
        mirror_shared(|stem| format!(".claude/rules/{stem}.md")),
    ))
}

/// Catalog of the profiles compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }
}

impl ProfileCatalog for BuiltinCatalog {
    fn names(&self) -> Vec<String> {
        PROFILES.iter().map(|(name, _)| (*name).to_string()).collect()
    }

    fn profile(&self, name: &str) -> RulesmithResult<Profile> {
        let (_, build) = PROFILES
            .iter()
            .find(|(candidate, _)| *candidate == name)
            .ok_or_else(|| DomainError::UnknownProfile {
                name: name.to_string(),
                available: self.names(),
            })?;

        let profile = build()?;
        debug!(
            profile = name,
            artifacts = profile.artifacts.len(),
            conversions = profile.conversions.len(),
            "resolved built-in profile"
        );
        Ok(profile)
    }
}
