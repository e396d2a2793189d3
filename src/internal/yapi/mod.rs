pub mod client;
pub mod error;
pub mod settings;
pub mod types;

// Re-export main types
pub use client::{YapiApi, YapiClient};
pub use error::YapiError;
pub use settings::{EnvSettings, SettingsSource, YapiSettings};
pub use types::{
    ApiEnvelope, BodyField, Category, CategoryResult, DetailOutcome, Interface, InterfaceRecord,
    InterfaceSummary, ProjectCategoriesResult,
};
