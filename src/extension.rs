// file: src/extension.rs
// version: 1.0.0
// guid: 61a8f075-dc9f-4238-b24e-f61c2c28cb16

//! Host plugin registration metadata
//!
//! Hosts that load extensions expect node mappings even when an extension
//! only contributes HTTP routes and a UI script. This one registers no
//! nodes, so both mappings are empty.

use crate::server::{PANEL_JS_PATH, RCLONE_RUN_PATH, RSYNC_RUN_PATH};
use serde::Serialize;
use std::collections::BTreeMap;

pub const EXTENSION_NAME: &str = "transfer-bridge";

/// Web asset directory, relative to the extension root
pub const WEB_DIRECTORY: &str = "web";

#[derive(Debug, Clone, Serialize)]
pub struct ExtensionManifest {
    pub name: String,
    pub version: String,
    pub routes: Vec<RouteInfo>,
    pub web_directory: &'static str,
    /// Scripts the host should load, relative to `web_directory`
    pub js_extensions: Vec<&'static str>,
    pub node_class_mappings: BTreeMap<String, String>,
    pub node_display_name_mappings: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RouteInfo {
    pub method: &'static str,
    pub path: &'static str,
}

pub fn extension_web_dirs() -> Vec<&'static str> {
    vec![WEB_DIRECTORY]
}

pub fn js_web_extensions() -> Vec<&'static str> {
    vec!["js/transfer_panel.js"]
}

pub fn node_class_mappings() -> BTreeMap<String, String> {
    BTreeMap::new()
}

pub fn node_display_name_mappings() -> BTreeMap<String, String> {
    BTreeMap::new()
}

/// Registration metadata for the host
pub fn manifest() -> ExtensionManifest {
    ExtensionManifest {
        name: EXTENSION_NAME.to_string(),
        version: crate::VERSION.to_string(),
        routes: vec![
            RouteInfo { method: "POST", path: RSYNC_RUN_PATH },
            RouteInfo { method: "POST", path: RCLONE_RUN_PATH },
            RouteInfo { method: "GET", path: PANEL_JS_PATH },
        ],
        web_directory: WEB_DIRECTORY,
        js_extensions: js_web_extensions(),
        node_class_mappings: node_class_mappings(),
        node_display_name_mappings: node_display_name_mappings(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manifest_lists_run_routes() {
        let manifest = manifest();
        let paths: Vec<_> = manifest.routes.iter().map(|r| r.path).collect();

        assert_eq!(
            paths,
            vec![
                "/rsync/run",
                "/rclone/run",
                "/extensions/transfer-bridge/js/transfer_panel.js"
            ]
        );
        assert!(manifest.node_class_mappings.is_empty());
        assert!(manifest.node_display_name_mappings.is_empty());
    }

    #[test]
    fn test_panel_script_declared_under_web_dir() {
        let manifest = manifest();

        assert_eq!(extension_web_dirs(), vec!["web"]);
        assert_eq!(manifest.js_extensions, vec!["js/transfer_panel.js"]);

        let served = manifest.routes.iter().find(|r| r.method == "GET").unwrap().path;
        let declared = format!("/extensions/{}/{}", EXTENSION_NAME, manifest.js_extensions[0]);
        assert_eq!(served, declared);
    }
}
