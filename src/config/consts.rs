// src/config/consts.rs

// Dataset
pub const DATASET_VERSION: &str = "0.2.0";
pub const DEFAULT_DATASET_DIR: &str = "dataset";
pub const DATASET_FILE: &str = "filters.json";
pub const SCHEMA_FILE: &str = "json_schema.json";
pub const SHEET_STEM: &str = "filters";

// Raw per-vendor dumps
pub const DEFAULT_RAW_DIR: &str = "raw";
pub const APOLLO_RAW_FILE: &str = "apollo.json";
pub const LEE_RAW_FILE: &str = "lee.json";
pub const ROSCO_RAW_FILE: &str = "rosco.json";

// Apollo (local captures)
pub const DEFAULT_APOLLO_PDF_DIR: &str = "apollo-pdf";
pub const DEFAULT_APOLLO_HEX_FILE: &str = "colorhex.js";
pub const APOLLO_PDF_PREFIX: &str = "AP";

// Net config
pub const LEE_BASE_URL: &str = "https://leefilters.com/lighting/colour-effect-lighting-filters/";
pub const ROSCO_MYCOLOR_URL: &str = "https://legacy.rosco.com/mycolor/mycolor.cfm";
pub const ROSCO_TECHSHEET_URL: &str = "https://legacy.rosco.com/mycolor/TechSheet.cfm";
pub const USER_AGENT: &str = concat!("lighting_filters/", env!("CARGO_PKG_VERSION"));
pub const HTTP_TIMEOUT_SECS: u64 = 30;

// Lee colour temperatures (K)
pub const LEE_TUNGSTEN_K: u32 = 3200;
pub const LEE_DAYLIGHT_K: u32 = 6774;

// Swatch
pub const DEFAULT_SWATCH_SIZE: u32 = 400;
pub const CONTRAST_THRESHOLD: f64 = 50.0;

// Config file picked up from the working directory when present
pub const DEFAULT_CONFIG_FILE: &str = "lighting_filters.conf";
