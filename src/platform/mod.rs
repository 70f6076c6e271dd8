//! Built-in platform: Surface Pro X (SQ2)
//!
//! The source list is data (an embedded manifest); the patch pipeline is
//! code parameterized by the locations below.

use crate::config::Manifest;
use crate::error::Result;
use crate::patch::{BoardRepack, CompatSymlinks, FeatureFlags, PatchPipeline, VenusExtract};
use crate::tool::ToolPaths;

/// Embedded manifest for the Surface Pro X (SQ2)
pub const MANIFEST_YAML: &str = include_str!("surface_pro_x_sq2.yaml");

const PLATFORM_DIR: &str = "qcom/msft/surface/pro-x-sq2";
const VENUS_DIR: &str = "qcom/venus-5.2";
const ATH10K_DIR: &str = "ath10k/WCN3990/hw1.0";

const ATH10K_BOARD_FILE: &str = "bdwlan.b58";
const ATH10K_BOARD_NAME: &str = "bus=snoc,qmi-board-id=ff,qmi-chip-id=30224";
const ATH10K_FEATURES: [&str; 4] = [
    "wowlan",
    "mgmt-tx-by-ref",
    "non-bmi",
    "single-chan-info-per-channel",
];

const QCA_BT_FILES: [&str; 8] = [
    "crbtfw21.tlv",
    "crnv21.b3c",
    "crnv21.b44",
    "crnv21.b45",
    "crnv21.b46",
    "crnv21.b47",
    "crnv21.b71",
    "crnv21.bin",
];

/// Parse the embedded manifest
pub fn builtin_manifest() -> Result<Manifest> {
    Manifest::from_yaml(MANIFEST_YAML, "<built-in surface-pro-x-sq2>")
}

/// Patches for the gathered tree, in the order they must run
pub fn patch_pipeline(tools: &ToolPaths) -> PatchPipeline {
    let mut pipeline = PatchPipeline::new();

    pipeline.push(VenusExtract::new(
        format!("{PLATFORM_DIR}/qcvss8180.mbn"),
        VENUS_DIR,
        tools.pil_splitter.clone(),
    ));
    pipeline.push(BoardRepack::new(
        format!("{ATH10K_DIR}/boards"),
        ATH10K_BOARD_FILE,
        ATH10K_BOARD_NAME,
        format!("{ATH10K_DIR}/board-2.bin"),
        tools.board_encoder.clone(),
    ));
    pipeline.push(FeatureFlags::new(
        format!("{ATH10K_DIR}/firmware-5.bin"),
        ATH10K_FEATURES,
        tools.firmware_encoder.clone(),
    ));
    pipeline.push(CompatSymlinks::new("qca", QCA_BT_FILES, "21", "01"));

    pipeline
}
