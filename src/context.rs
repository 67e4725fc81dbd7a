// src/context.rs

use std::path::PathBuf;

pub const APP_QUALIFIER: &str = "org";
pub const APP_ORG: &str = "ista-matadi";
pub const APP_ID: &str = "campus-registration-wizard";

pub const ARTIFACTS_DIR: &str = "inscriptions";

#[derive(Debug)]
pub struct AppCtx {
    pub app_data_dir: PathBuf,
    pub debug_ui: bool,
}

impl AppCtx {
    pub fn new(app_data_dir: PathBuf) -> Self {
        let debug_ui = std::env::var("CAMPUSREG_DEBUG")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            app_data_dir,
            debug_ui,
        }
    }

    /// <app_data>/inscriptions — where generated PDFs land.
    pub fn artifacts_dir(&self) -> PathBuf {
        self.app_data_dir.join(ARTIFACTS_DIR)
    }
}
