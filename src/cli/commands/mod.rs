//! CLI command implementations

pub mod recognizers;
pub mod scan;
pub mod validate;
pub mod xref;

use crate::config::{load_config_or_default, XrefConfig};
use crate::service::PiiService;

/// Load configuration and build the service, or the exit code to stop with
fn build_service(config_path: Option<&str>) -> Result<(XrefConfig, PiiService), i32> {
    let config = match load_config_or_default(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("❌ Failed to load configuration");
            eprintln!("   Error: {e}");
            return Err(2); // Configuration error exit code
        }
    };

    match PiiService::new(&config) {
        Ok(service) => Ok((config, service)),
        Err(e) => {
            eprintln!("❌ Failed to load recognizers");
            eprintln!("   Error: {e}");
            Err(2)
        }
    }
}
