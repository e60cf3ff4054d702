//! Static payloads for the descriptive endpoints.
//!
//! Values are fixed at build time and never derived from runtime state.

use serde::Serialize;

use super::schema::FEATURE_NAMES;

pub const WELCOME_MESSAGE: &str = "Welcome to the Iris Classifier API!";
pub const CLASS_LABELS: [&str; 3] = ["setosa", "versicolor", "virginica"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Welcome {
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionInfo {
    pub version: &'static str,
    pub message: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub service: &'static str,
    pub version: &'static str,
    pub deployment: &'static str,
    pub timestamp: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ApiInfo {
    pub api_name: &'static str,
    pub model_type: &'static str,
    pub features: [&'static str; 4],
    pub classes: [&'static str; 3],
    pub author: &'static str,
    pub deployment: &'static str,
}

/// All descriptive payloads served by the API
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServiceMetadata {
    pub welcome: Welcome,
    pub version: VersionInfo,
    pub health: HealthStatus,
    pub info: ApiInfo,
}

impl Default for ServiceMetadata {
    fn default() -> Self {
        Self {
            welcome: Welcome {
                message: WELCOME_MESSAGE,
            },
            version: VersionInfo {
                version: "2.0",
                message: "Updated via CD pipeline!",
            },
            // Liveness only: reports healthy whenever the process answers
            health: HealthStatus {
                status: "healthy",
                service: "Iris ML API",
                version: "1.0",
                deployment: "Kubernetes + Docker",
                timestamp: "2025-07-26",
            },
            info: ApiInfo {
                api_name: "Iris Species Classifier",
                model_type: "Decision Tree",
                features: FEATURE_NAMES,
                classes: CLASS_LABELS,
                author: "Pragati Sethi",
                deployment: "GKE with CI/CD",
            },
        }
    }
}
