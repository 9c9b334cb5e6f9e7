// Version information for the CarBrands Detection Node

/// Full version string with feature description
pub const VERSION: &str = "v0.1.0-brand-detection-2026-08-29";

/// Semantic version number
pub const VERSION_NUMBER: &str = "0.1.0";

/// Build date
pub const BUILD_DATE: &str = "2026-08-29";

/// Version tag of the trained weights this node serves
pub const MODEL_VERSION: &str = "V5";
