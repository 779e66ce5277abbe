//! Shared helpers for the end-to-end suites.

#![allow(dead_code)]

mod fake_lidarr;
mod test_app;

pub use fake_lidarr::FakeLidarr;
pub use test_app::TestApp;

use lidarr_bulk_adder::Configuration;

pub const TEST_API_KEY: &str = "test-api-key";

pub fn configuration_for(lidarr: &FakeLidarr) -> Configuration {
    Configuration {
        catalog_base_url: lidarr.base_url.clone(),
        api_key: TEST_API_KEY.to_string(),
        root_folder_path: "/music".to_string(),
    }
}
